//! Synchronous REST query helper.
//!
//! # Overview
//! Issues GET, POST and PUT requests against a remote API, reads the whole
//! response body and turns the status code into a small, closed set of typed
//! errors. Callers receive raw bytes; decoding is up to them.
//!
//! # Design
//! - `RequestExecutor` is stateless apart from its collaborators and can be
//!   cloned and shared between threads.
//! - The round trip goes through the `Transport` trait; `UreqTransport` is the
//!   default, tests inject fakes.
//! - Failures are returned as `QueryError` and also reported to a `Notifier`
//!   side channel (`TracingNotifier` by default).
//! - No retries, no timeout overrides, no streaming.

pub mod error;
pub mod executor;
pub mod headers;
pub mod http;
pub mod sink;
pub mod transport;

pub use error::{check_status, QueryError};
pub use executor::{RequestExecutor, RequestExecutorBuilder};
pub use headers::HeaderMap;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use sink::{Echo, Notifier, StdoutEcho, TracingNotifier};
pub use transport::{Transport, TransportError, UreqTransport};
