//! Products controller.

use vitrine_catalog::{default_catalog, Catalog, Product};
use vitrine_core::{InvocationError, RequestContext};
use vitrine_sink::ResponseSink;

/// Answers product listing requests from an immutable catalog.
///
/// The catalog is fixed at construction. Without configuration it is the
/// built-in catalog holding the single default product.
#[derive(Debug, Clone)]
pub struct ProductsController {
    catalog: Catalog,
}

impl Default for ProductsController {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductsController {
    /// Controller name used in logs and action names.
    pub const NAME: &'static str = "products";

    /// Action name for [`handle_list`](Self::handle_list).
    pub const LIST_ACTION: &'static str = "products#list";

    /// Create a controller serving the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: default_catalog(),
        }
    }

    /// Create a controller serving the given catalog.
    pub fn with_catalog(catalog: impl Into<Catalog>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }

    /// The products this controller lists.
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Emit the product list into `response`.
    ///
    /// Calls `emit` exactly once. The request does not influence the payload.
    /// Sink errors are returned to the caller as-is.
    pub fn handle_list<S>(
        &self,
        request: &RequestContext,
        response: &mut S,
    ) -> Result<(), InvocationError>
    where
        S: ResponseSink<[Product]> + ?Sized,
    {
        tracing::debug!(
            request_id = %request.request_id,
            path = %request.path,
            products = self.catalog.len(),
            "listing products"
        );

        response.emit(self.catalog())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_catalog::DEFAULT_PRODUCT;
    use vitrine_core::Method;
    use vitrine_sink::{HttpResponse, ResponseRecorder};

    #[test]
    fn test_recorder_not_called_before_handling() {
        let recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();
        assert!(!recorder.was_called());
    }

    #[test]
    fn test_handle_list_emits_default_catalog_once() {
        let controller = ProductsController::new();
        let mut recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();

        controller
            .handle_list(&RequestContext::default(), &mut recorder)
            .expect("recorder never fails");

        assert!(recorder.was_called());
        assert_eq!(recorder.call_count(), 1);
        assert!(recorder.was_called_with(&[Product::from_static(
            "Default product",
            "product description",
            100
        )]));
    }

    #[test]
    fn test_handle_list_ignores_request() {
        let controller = ProductsController::new();
        let mut plain: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();
        let mut busy: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();

        let mut request = RequestContext::from_uri(Method::Post, "/anything?page=9");
        request.params.insert("id".into(), "7".into());

        controller
            .handle_list(&RequestContext::default(), &mut plain)
            .expect("recorder never fails");
        controller
            .handle_list(&request, &mut busy)
            .expect("recorder never fails");

        assert_eq!(plain.calls(), busy.calls());
    }

    #[test]
    fn test_repeated_calls_yield_identical_payload() {
        let controller = ProductsController::new();

        let payloads: Vec<Vec<Product>> = (0..5)
            .map(|_| {
                let mut recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();
                controller
                    .handle_list(&RequestContext::default(), &mut recorder)
                    .expect("recorder never fails");
                assert_eq!(recorder.call_count(), 1);
                recorder.into_calls().remove(0)
            })
            .collect();

        assert!(payloads.iter().all(|p| p == &vec![DEFAULT_PRODUCT]));
    }

    #[test]
    fn test_was_called_with_rejects_other_payloads() {
        let controller = ProductsController::new();
        let mut recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();

        controller
            .handle_list(&RequestContext::default(), &mut recorder)
            .expect("recorder never fails");

        assert!(!recorder.was_called_with(&Vec::<Product>::new()));
        assert!(!recorder.was_called_with(&[DEFAULT_PRODUCT, DEFAULT_PRODUCT]));
        assert!(!recorder.was_called_with(&[Product::new("Default product", "other", 100)]));
    }

    #[test]
    fn test_custom_catalog() {
        let mug = Product::new("Mug", "Ceramic mug", 12);
        let controller = ProductsController::with_catalog(vec![mug.clone()]);
        let mut recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();

        controller
            .handle_list(&RequestContext::default(), &mut recorder)
            .expect("recorder never fails");

        assert_eq!(controller.catalog(), &[mug.clone()]);
        assert!(recorder.was_called_with(&[mug]));
    }

    #[test]
    fn test_sink_errors_propagate() {
        let controller = ProductsController::new();
        let mut response = HttpResponse::for_method(Method::Head);

        let err = controller
            .handle_list(&RequestContext::new(Method::Head, "/products"), &mut response)
            .unwrap_err();

        assert!(matches!(err, InvocationError::MissingCapability(_)));
    }

    #[test]
    fn test_handle_list_through_trait_object() {
        let controller = ProductsController::new();
        let mut recorder: ResponseRecorder<Vec<Product>> = ResponseRecorder::new();
        let sink: &mut dyn ResponseSink<[Product]> = &mut recorder;

        controller
            .handle_list(&RequestContext::default(), sink)
            .expect("recorder never fails");

        assert!(recorder.was_called_with(&[DEFAULT_PRODUCT]));
    }
}
