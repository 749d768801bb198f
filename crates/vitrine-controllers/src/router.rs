//! Route table and request dispatch.

use std::rc::Rc;

use http::StatusCode;
use thiserror::Error;
use vitrine_catalog::Product;
use vitrine_core::{InvocationError, Method, RequestContext, RouteConfig, RouteParams};
use vitrine_observability::{LogFormat, LogLevel, LogOutput, StructuredLogger};
use vitrine_sink::{HttpResponse, ResponseSink};

use crate::products::ProductsController;

/// Errors that can occur while dispatching a request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No route matches the path.
    #[error("No route for {method} {path}")]
    RouteNotFound { method: Method, path: String },

    /// A route matches the path but not the method.
    #[error("Method {method} not allowed for {path}")]
    MethodNotAllowed { method: Method, path: String },

    /// A route names an action no controller provides.
    #[error("Unknown controller action: {0}")]
    UnknownAction(String),

    /// A route pattern could not be parsed.
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The controller action failed to emit its response.
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

impl DispatchError {
    /// HTTP status matching this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            DispatchError::UnknownAction(_)
            | DispatchError::InvalidPattern { .. }
            | DispatchError::Invocation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed route pattern such as `/products/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern. It must start with `/`; `:name` segments capture.
    pub fn parse(pattern: &str) -> Result<Self, DispatchError> {
        let invalid = |reason: &str| DispatchError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let mut segments = Vec::new();
        for part in pattern.split('/').filter(|p| !p.is_empty()) {
            match part.strip_prefix(':') {
                Some("") => return Err(invalid("parameter name is empty")),
                Some(name) => segments.push(Segment::Param(name.to_string())),
                None => segments.push(Segment::Static(part.to_string())),
            }
        }

        Ok(Self { segments })
    }

    /// Match a request path, returning captured parameters.
    ///
    /// Empty segments are ignored, so `/products/` matches `/products`.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(params)
    }
}

/// Logging settings applied to every dispatched request.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Minimum level written.
    pub min_level: LogLevel,
    /// Line format.
    pub format: LogFormat,
    /// Destination.
    pub output: LogOutput,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            output: LogOutput::Stderr,
        }
    }
}

impl LogSettings {
    fn logger(&self, request: &RequestContext) -> StructuredLogger {
        StructuredLogger::new(request.request_id.clone())
            .with_route(request.path.clone())
            .with_min_level(self.min_level)
            .with_format(self.format)
            .with_output(self.output.clone())
    }
}

type Action =
    Box<dyn Fn(&RequestContext, &mut dyn ResponseSink<[Product]>) -> Result<(), InvocationError>>;

struct RouteEntry {
    config: RouteConfig,
    pattern: RoutePattern,
    action: Action,
}

/// Maps routes onto controller actions.
///
/// The router forwards the request and the response sink to the matched
/// action unchanged, after copying captured path parameters into the request.
#[derive(Default)]
pub struct Router {
    routes: Vec<RouteEntry>,
    log: LogSettings,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router whose routes point at products controller actions.
    pub fn for_products(
        controller: ProductsController,
        routes: &[RouteConfig],
    ) -> Result<Self, DispatchError> {
        let controller = Rc::new(controller);
        let mut router = Self::new();

        for route in routes {
            router = match route.action.as_str() {
                ProductsController::LIST_ACTION => {
                    let controller = Rc::clone(&controller);
                    router.route(route.clone(), move |request, response| {
                        controller.handle_list(request, response)
                    })?
                }
                other => return Err(DispatchError::UnknownAction(other.to_string())),
            };
        }

        Ok(router)
    }

    /// Register an action for a route.
    pub fn route<F>(mut self, config: RouteConfig, action: F) -> Result<Self, DispatchError>
    where
        F: Fn(&RequestContext, &mut dyn ResponseSink<[Product]>) -> Result<(), InvocationError>
            + 'static,
    {
        let pattern = RoutePattern::parse(&config.pattern)?;
        self.routes.push(RouteEntry {
            config,
            pattern,
            action: Box::new(action),
        });
        Ok(self)
    }

    /// Set logging for dispatched requests.
    pub fn with_logging(mut self, log: LogSettings) -> Self {
        self.log = log;
        self
    }

    /// Registered routes, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteConfig> {
        self.routes.iter().map(|entry| &entry.config)
    }

    /// Dispatch a request to the first matching route.
    ///
    /// Routes are tried in registration order. A path that matches only
    /// routes rejecting the method yields `MethodNotAllowed`.
    pub fn dispatch(
        &self,
        request: &mut RequestContext,
        response: &mut dyn ResponseSink<[Product]>,
    ) -> Result<(), DispatchError> {
        let logger = self.log.logger(request);
        logger
            .debug_builder("dispatching request")
            .field("method", request.method.as_str())
            .emit();

        let mut path_matched = false;
        for entry in &self.routes {
            let Some(params) = entry.pattern.matches(&request.path) else {
                continue;
            };
            if !entry.config.allows(request.method) {
                path_matched = true;
                continue;
            }

            request.params.extend(params);
            let logger = logger.clone().with_controller(controller_name(&entry.config.action));

            return match (entry.action)(request, response) {
                Ok(()) => {
                    logger
                        .info_builder("request completed")
                        .field("action", entry.config.action.as_str())
                        .field_u64("status", u64::from(StatusCode::OK.as_u16()))
                        .emit();
                    Ok(())
                }
                Err(e) => {
                    let err = DispatchError::from(e);
                    logger
                        .error_builder("request failed")
                        .field("action", entry.config.action.as_str())
                        .field("error", err.to_string())
                        .field_u64("status", u64::from(err.status_code().as_u16()))
                        .emit();
                    Err(err)
                }
            };
        }

        let err = if path_matched {
            DispatchError::MethodNotAllowed {
                method: request.method,
                path: request.path.clone(),
            }
        } else {
            DispatchError::RouteNotFound {
                method: request.method,
                path: request.path.clone(),
            }
        };
        logger
            .warn_builder("no matching route")
            .field("error", err.to_string())
            .field_u64("status", u64::from(err.status_code().as_u16()))
            .emit();
        Err(err)
    }

    /// Serve an `http` request end to end through a buffered [`HttpResponse`].
    ///
    /// Dispatch errors become a JSON `{"error": ..}` body with the matching
    /// status code (body omitted for `HEAD`).
    pub fn handle_http<B>(&self, req: &http::Request<B>) -> http::Response<Vec<u8>> {
        let Some(mut request) = RequestContext::from_http(req) else {
            return status_only(StatusCode::METHOD_NOT_ALLOWED);
        };

        let mut response = HttpResponse::for_method(request.method);
        let outcome = self.dispatch(&mut request, &mut response);
        let response = match outcome {
            Ok(()) => response,
            Err(err) => error_response(request.method, &err),
        };

        response
            .into_http()
            .unwrap_or_else(|_| status_only(StatusCode::INTERNAL_SERVER_ERROR))
    }
}

fn controller_name(action: &str) -> &str {
    action.split('#').next().unwrap_or(action)
}

fn error_response(method: Method, err: &DispatchError) -> HttpResponse {
    let mut response = HttpResponse::for_method(method);
    response.set_status(err.status_code().as_u16());
    if method.allows_body() {
        let body = serde_json::json!({ "error": err.to_string() }).to_string();
        response.set_header("content-type", "application/json");
        response.set_body(body.into_bytes());
    }
    response
}

fn status_only(status: StatusCode) -> http::Response<Vec<u8>> {
    let mut response = http::Response::new(Vec::new());
    *response.status_mut() = status;
    response
}
