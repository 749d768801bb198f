//! Response sinks for vitrine controllers.
//!
//! Controllers never touch a transport directly; they emit into a sink:
//! - `ResponseSink` - The emit capability
//! - `HttpResponse` - Buffered HTTP response with a JSON body
//! - `WriterSink` - JSON lines into any `io::Write`
//! - `ResponseRecorder` - Test double recording every emitted payload

mod http_response;
mod recorder;
mod sink;
mod writer;

pub use http_response::*;
pub use recorder::*;
pub use sink::*;
pub use writer::*;
