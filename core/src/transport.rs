//! The execute phase: one blocking round trip per call.
//!
//! # Design
//! `Transport` is the seam between building a request and classifying its
//! response. `UreqTransport` is the shared default client; tests swap in
//! fakes to script responses and count calls. Implementations must return
//! every status as data so the executor owns classification.

use std::sync::OnceLock;

use thiserror::Error;
use tracing::trace;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Connection-level failure: no response object was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failed: {reason}")]
pub struct TransportError {
    pub reason: String,
}

impl TransportError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Sends a request and returns the response with its body unread.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Process-wide agent behind every `UreqTransport`.
///
/// Redirects are not followed, so a 3xx comes back as data like any other
/// status. Timeouts and pooling are the ureq defaults.
fn shared_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .new_agent()
    })
}

/// Default transport backed by the single shared `ureq::Agent`.
///
/// Clones of the agent share one connection pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: shared_agent().clone(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let body = request.body.as_deref();

        let response = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()?
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if request.method == HttpMethod::Post {
                    self.agent.post(url)
                } else {
                    self.agent.put(url)
                };
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.send(body.as_bytes())?,
                    None => builder.send_empty()?,
                }
            }
        };

        let status = response.status().as_u16();
        trace!(status, url, "response headers received");
        Ok(HttpResponse::new(status, response.into_body().into_reader()))
    }
}
