//! Recording test double.

use vitrine_core::InvocationError;

use crate::sink::ResponseSink;

/// A sink that records every payload it receives.
///
/// Stands in for a real transport in tests. Each `emit` stores an owned copy
/// of the payload in call order and always succeeds, so assertions can be made
/// afterwards with [`was_called`](Self::was_called) and
/// [`was_called_with`](Self::was_called_with).
///
/// `T` is the owned form of the payload: a recorder for `[Product]` payloads
/// is a `ResponseRecorder<Vec<Product>>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecorder<T> {
    calls: Vec<T>,
}

impl<T> Default for ResponseRecorder<T> {
    fn default() -> Self {
        Self { calls: Vec::new() }
    }
}

impl<T> ResponseRecorder<T> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `emit` has been invoked at least once.
    pub fn was_called(&self) -> bool {
        !self.calls.is_empty()
    }

    /// Whether any recorded payload is structurally equal to `expected`.
    pub fn was_called_with<Q>(&self, expected: &Q) -> bool
    where
        Q: ?Sized,
        T: PartialEq<Q>,
    {
        self.calls.iter().any(|call| call == expected)
    }

    /// Number of recorded invocations.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// All recorded payloads, in call order.
    pub fn calls(&self) -> &[T] {
        &self.calls
    }

    /// The most recent payload.
    pub fn last_call(&self) -> Option<&T> {
        self.calls.last()
    }

    /// Forget all recorded calls.
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    /// Consume the recorder and return the recorded payloads.
    pub fn into_calls(self) -> Vec<T> {
        self.calls
    }
}

impl<T, P> ResponseSink<P> for ResponseRecorder<T>
where
    P: ToOwned<Owned = T> + ?Sized,
{
    fn emit(&mut self, payload: &P) -> Result<(), InvocationError> {
        self.calls.push(payload.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_catalog::{Product, DEFAULT_PRODUCT};

    fn emit_slice(sink: &mut dyn ResponseSink<[Product]>, payload: &[Product]) {
        sink.emit(payload).expect("recorder never fails");
    }

    #[test]
    fn test_recorder_starts_empty() {
        let recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();

        assert!(!recorder.was_called());
        assert_eq!(recorder.call_count(), 0);
        assert!(recorder.last_call().is_none());
        assert!(!recorder.was_called_with(&[DEFAULT_PRODUCT][..]));
    }

    #[test]
    fn test_recorder_records_call() {
        let mut recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();
        emit_slice(&mut recorder, &[DEFAULT_PRODUCT]);

        assert!(recorder.was_called());
        assert_eq!(recorder.call_count(), 1);
        assert!(recorder.was_called_with(&vec![DEFAULT_PRODUCT]));
        assert!(recorder.was_called_with(&[DEFAULT_PRODUCT]));
    }

    #[test]
    fn test_was_called_with_uses_structural_equality() {
        let mut recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();
        emit_slice(&mut recorder, &[DEFAULT_PRODUCT]);

        let rebuilt = vec![Product::new("Default product", "product description", 100)];
        assert!(recorder.was_called_with(&rebuilt));

        let other_price = vec![Product::new("Default product", "product description", 101)];
        assert!(!recorder.was_called_with(&other_price));
        assert!(!recorder.was_called_with(&Vec::<Product>::new()));
    }

    #[test]
    fn test_calls_are_kept_in_order() {
        let mut recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();
        let mug = Product::new("Mug", "Ceramic mug", 12);

        emit_slice(&mut recorder, &[DEFAULT_PRODUCT]);
        emit_slice(&mut recorder, &[mug.clone()]);

        assert_eq!(recorder.call_count(), 2);
        assert_eq!(recorder.calls()[0], vec![DEFAULT_PRODUCT]);
        assert_eq!(recorder.last_call(), Some(&vec![mug.clone()]));
        assert!(recorder.was_called_with(&[DEFAULT_PRODUCT]));
        assert!(recorder.was_called_with(&[mug]));
    }

    #[test]
    fn test_reset_clears_calls() {
        let mut recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();
        emit_slice(&mut recorder, &[DEFAULT_PRODUCT]);

        recorder.reset();

        assert!(!recorder.was_called());
        assert!(recorder.into_calls().is_empty());
    }

    #[test]
    fn test_recorder_accepts_scalar_payloads() {
        let mut recorder: ResponseRecorder<String> = ResponseRecorder::new();
        recorder.emit("hello").expect("recorder never fails");

        assert!(recorder.was_called_with("hello"));
        assert!(!recorder.was_called_with("bye"));
    }
}
