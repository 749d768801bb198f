//! Structured request logging for vitrine.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with request context
//! - `LogBuilder` - Fluent builder for entries with typed fields
//! - `LogOutput` - Where entries go (stderr, or memory for tests)

mod logging;

pub use logging::*;

// Re-export RequestId from vitrine-core for convenience
pub use vitrine_core::RequestId;
