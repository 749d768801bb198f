//! Controllers and request routing for the vitrine products API.
//!
//! A controller answers a request by emitting a payload into a
//! [`ResponseSink`](vitrine_sink::ResponseSink). It never sees the transport,
//! which keeps it testable with a [`ResponseRecorder`](vitrine_sink::ResponseRecorder):
//!
//! ```rust
//! use vitrine_controllers::prelude::*;
//!
//! let controller = ProductsController::new();
//! let mut recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();
//!
//! controller
//!     .handle_list(&RequestContext::default(), &mut recorder)
//!     .unwrap();
//!
//! assert!(recorder.was_called());
//! assert!(recorder.was_called_with(&[DEFAULT_PRODUCT]));
//! ```
//!
//! The [`Router`] maps configured routes onto controller actions and forwards
//! each request and sink to the matching action unchanged.

mod products;
mod router;

pub use products::*;
pub use router::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{DispatchError, LogSettings, ProductsController, RoutePattern, Router};
    pub use vitrine_catalog::{Product, DEFAULT_PRODUCT};
    pub use vitrine_core::{InvocationError, Method, RequestContext, RouteConfig};
    pub use vitrine_sink::{HttpResponse, ResponseRecorder, ResponseSink, WriterSink};
}
