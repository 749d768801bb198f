//! Buffered HTTP response sink.

use std::collections::HashMap;

use serde::Serialize;
use vitrine_core::{InvocationError, Method};

use crate::sink::ResponseSink;

/// State of the buffered response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseState {
    /// Nothing emitted yet.
    Open,
    /// A body has been written.
    Sent,
}

/// A buffered HTTP response that controllers emit JSON payloads into.
///
/// The response accepts exactly one payload. A response opened for a `HEAD`
/// request carries no body and rejects `emit`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
    body_allowed: bool,
    state: ResponseState,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponse {
    /// Create an empty `200 OK` response.
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            body: Vec::new(),
            body_allowed: true,
            state: ResponseState::Open,
        }
    }

    /// Create a response for a request with the given method.
    pub fn for_method(method: Method) -> Self {
        Self {
            body_allowed: method.allows_body(),
            ..Self::new()
        }
    }

    /// Set the status code.
    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Set a header, replacing any previous value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into().to_lowercase(), value.into());
    }

    /// Replace the body and its `content-length` header.
    ///
    /// Bypasses `emit`, so the response stays open for a payload.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.set_header("content-length", body.len().to_string());
        self.body = body;
    }

    /// The status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|v| v.as_str())
    }

    /// The response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether a payload has been emitted.
    pub fn is_sent(&self) -> bool {
        self.state == ResponseState::Sent
    }

    /// Convert into an `http::Response`.
    pub fn into_http(self) -> Result<http::Response<Vec<u8>>, InvocationError> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
            .body(self.body)
            .map_err(|e| InvocationError::Transport(e.to_string()))
    }
}

impl<P> ResponseSink<P> for HttpResponse
where
    P: Serialize + ?Sized,
{
    fn emit(&mut self, payload: &P) -> Result<(), InvocationError> {
        if !self.body_allowed {
            return Err(InvocationError::MissingCapability(
                "response to HEAD carries no body".to_string(),
            ));
        }
        if self.state == ResponseState::Sent {
            return Err(InvocationError::AlreadySent);
        }

        let body = serde_json::to_vec(payload)?;
        self.set_body(body);
        self.status = 200;
        self.set_header("content-type", "application/json");
        self.state = ResponseState::Sent;

        Ok(())
    }
}
