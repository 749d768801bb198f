//! The emit capability.

use vitrine_core::InvocationError;

/// Something a controller can deliver a payload to.
///
/// The controller borrows the sink for the duration of a single call and
/// never retains it. The trait is object safe so routers can forward a
/// `&mut dyn ResponseSink<P>` without knowing the concrete transport.
pub trait ResponseSink<P: ?Sized> {
    /// Deliver `payload` to the caller.
    fn emit(&mut self, payload: &P) -> Result<(), InvocationError>;
}

impl<P, S> ResponseSink<P> for &mut S
where
    P: ?Sized,
    S: ResponseSink<P> + ?Sized,
{
    fn emit(&mut self, payload: &P) -> Result<(), InvocationError> {
        (**self).emit(payload)
    }
}
