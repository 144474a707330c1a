//! Error catalog for request execution.
//!
//! # Design
//! Every failure a call can end in is one variant of `QueryError`, so callers
//! match on the kind instead of re-deriving meaning from a status code. The
//! server-reported kinds are one-to-one with the status codes the API
//! documents; everything else collapses into `Unclassified`, which keeps the
//! raw code for diagnostics.

use thiserror::Error;

/// Status codes the API answers with.
pub mod status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const SERVER_PROBLEM: u16 = 500;
}

/// Errors returned by `RequestExecutor::execute`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The request could not be built (unknown verb, malformed address).
    #[error("Null Response Request Message")]
    NilRequest,

    /// The transport produced no response (DNS, refused connection, TLS, timeout).
    #[error("Null Response Message")]
    NilResponse,

    #[error("Request is 400 Bad Request. Please check your request")]
    BadRequest,

    #[error("Request is 401 Unauthorized. Please check the login information")]
    Unauthorized,

    #[error("Request is 403 Forbidden. You are not authorized for this query")]
    Forbidden,

    #[error("Request is 404 Not Found. Please check variables, queries, links and other parameters")]
    NotFound,

    #[error("Request is 500 Server Problem. There is a server problem. Please try later")]
    ServerProblem,

    /// Any status outside the recognized set, e.g. 301, 429 or 502.
    #[error(
        "No problem could be detected (status {status}). Please check the information. \
         If the problem is not resolved, consult the program owner"
    )]
    Unclassified { status: u16 },

    /// The status was a success but the body stream failed part way.
    /// `partial` holds whatever was read before the failure.
    #[error("Response body could not be read: {reason}")]
    BodyRead { partial: Vec<u8>, reason: String },
}

impl QueryError {
    /// HTTP status behind a server-reported failure, `None` for local ones.
    pub fn status(&self) -> Option<u16> {
        match self {
            QueryError::BadRequest => Some(status::BAD_REQUEST),
            QueryError::Unauthorized => Some(status::UNAUTHORIZED),
            QueryError::Forbidden => Some(status::FORBIDDEN),
            QueryError::NotFound => Some(status::NOT_FOUND),
            QueryError::ServerProblem => Some(status::SERVER_PROBLEM),
            QueryError::Unclassified { status } => Some(*status),
            QueryError::NilRequest | QueryError::NilResponse | QueryError::BodyRead { .. } => None,
        }
    }
}

/// Map a response status to `Ok` for 200/201 or the matching `QueryError`.
pub fn check_status(code: u16) -> Result<(), QueryError> {
    match code {
        status::OK | status::CREATED => Ok(()),
        status::BAD_REQUEST => Err(QueryError::BadRequest),
        status::UNAUTHORIZED => Err(QueryError::Unauthorized),
        status::FORBIDDEN => Err(QueryError::Forbidden),
        status::NOT_FOUND => Err(QueryError::NotFound),
        status::SERVER_PROBLEM => Err(QueryError::ServerProblem),
        other => Err(QueryError::Unclassified { status: other }),
    }
}
