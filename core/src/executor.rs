//! Build, send and classify one HTTP call.
//!
//! # Design
//! `RequestExecutor` holds only its collaborators (transport, notifier, echo)
//! and carries no state between calls, so one instance can serve any number
//! of threads. A call moves through four phases:
//!
//! 1. build: parse the verb and address, attach the body (never for GET);
//! 2. headers: apply the caller's map, last write wins per name;
//! 3. send: one blocking round trip through the `Transport`;
//! 4. classify: 200/201 read the whole body, everything else maps to a
//!    `QueryError` from the catalog.
//!
//! Every internal failure is also reported to the `Notifier`. The response
//! body is owned by the `HttpResponse` and released when it goes out of
//! scope, on every path out of `send`.

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

use tracing::{debug, debug_span};
use url::Url;

use crate::error::{check_status, QueryError};
use crate::headers::HeaderMap;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::sink::{guarded, Echo, Notifier, StdoutEcho, TracingNotifier};
use crate::transport::{Transport, UreqTransport};

/// Synchronous, stateless request executor.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    echo: Arc<dyn Echo>,
}

impl RequestExecutor {
    /// Executor over the shared ureq client, logging failures through
    /// `tracing` and echoing to stdout.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RequestExecutorBuilder {
        RequestExecutorBuilder::default()
    }

    /// Execute one request.
    ///
    /// `method` must be one of `"GET"`, `"POST"`, `"PUT"`. An empty `body`
    /// sends no entity, and GET never carries one. When `echo` is set, a
    /// successful payload goes to the echo sink before it is returned.
    pub fn execute(
        &self,
        method: &str,
        target: &str,
        body: &str,
        headers: Option<&HeaderMap>,
        echo: bool,
    ) -> Result<Vec<u8>, QueryError> {
        let method = method.parse::<HttpMethod>().inspect_err(|err| {
            self.notify(&format!("request {method}"), err);
        })?;
        self.send(method, target, body, headers, echo)
    }

    /// Read-only query; no body is sent.
    pub fn get(&self, target: &str, headers: Option<&HeaderMap>, echo: bool) -> Result<Vec<u8>, QueryError> {
        self.send(HttpMethod::Get, target, "", headers, echo)
    }

    pub fn post(
        &self,
        target: &str,
        body: &str,
        headers: Option<&HeaderMap>,
        echo: bool,
    ) -> Result<Vec<u8>, QueryError> {
        self.send(HttpMethod::Post, target, body, headers, echo)
    }

    pub fn put(
        &self,
        target: &str,
        body: &str,
        headers: Option<&HeaderMap>,
        echo: bool,
    ) -> Result<Vec<u8>, QueryError> {
        self.send(HttpMethod::Put, target, body, headers, echo)
    }

    /// Same as `execute` with the verb already resolved.
    pub fn send(
        &self,
        method: HttpMethod,
        target: &str,
        body: &str,
        headers: Option<&HeaderMap>,
        echo: bool,
    ) -> Result<Vec<u8>, QueryError> {
        let span = debug_span!("execute", %method, url = target);
        let _enter = span.enter();

        let request = self.build(method, target, body, headers)?;

        let response = self.transport.send(&request).map_err(|err| {
            self.notify(&format!("do {method}"), &err);
            QueryError::NilResponse
        })?;
        debug!(status = response.status, "response received");

        self.classify(method, response, echo)
    }

    fn build(
        &self,
        method: HttpMethod,
        target: &str,
        body: &str,
        headers: Option<&HeaderMap>,
    ) -> Result<HttpRequest, QueryError> {
        let tag = format!("request {method}");
        let url = Url::parse(target).map_err(|err| {
            self.notify(&tag, &err);
            QueryError::NilRequest
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            self.notify(&tag, &QueryError::NilRequest);
            return Err(QueryError::NilRequest);
        }

        let mut request = HttpRequest::new(method, url);
        if method.allows_body() && !body.is_empty() {
            request.body = Some(body.to_string());
        }
        for (name, value) in headers.into_iter().flatten() {
            request.set_header(name, value);
        }
        Ok(request)
    }

    fn classify(&self, method: HttpMethod, mut response: HttpResponse, echo: bool) -> Result<Vec<u8>, QueryError> {
        if let Err(err) = check_status(response.status) {
            // Drain so the connection is not left mid-body.
            if let Err(drain) = io::copy(&mut response.body, &mut io::sink()) {
                self.notify(&format!("body {method}"), &drain);
            }
            return Err(err);
        }

        let mut payload = Vec::new();
        if let Err(err) = response.body.read_to_end(&mut payload) {
            self.notify(&format!("body {method}"), &err);
            return Err(QueryError::BodyRead {
                partial: payload,
                reason: err.to_string(),
            });
        }

        if echo {
            guarded(|| self.echo.emit(&payload));
        }
        Ok(payload)
    }

    fn notify(&self, tag: &str, err: &(dyn std::error::Error + 'static)) {
        guarded(|| self.notifier.report(tag, err));
    }
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor").finish_non_exhaustive()
    }
}

/// Swaps the collaborators of a `RequestExecutor`; unset ones use the defaults.
#[derive(Default)]
pub struct RequestExecutorBuilder {
    transport: Option<Arc<dyn Transport>>,
    notifier: Option<Arc<dyn Notifier>>,
    echo: Option<Arc<dyn Echo>>,
}

impl RequestExecutorBuilder {
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn echo(mut self, echo: Arc<dyn Echo>) -> Self {
        self.echo = Some(echo);
        self
    }

    pub fn build(self) -> RequestExecutor {
        RequestExecutor {
            transport: self.transport.unwrap_or_else(|| Arc::new(UreqTransport::new())),
            notifier: self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier)),
            echo: self.echo.unwrap_or_else(|| Arc::new(StdoutEcho)),
        }
    }
}
