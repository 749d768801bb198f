//! Core request types for the vitrine products API.
//!
//! This crate provides the fundamental types shared by controllers and sinks:
//! - `RequestContext` - Typed request parameters
//! - `RouteConfig` - Route-to-action configuration
//! - `InvocationError` - Failure raised when a payload cannot be emitted

mod config;
mod context;
mod error;

pub use config::*;
pub use context::*;
pub use error::*;
