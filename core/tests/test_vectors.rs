//! Verify status classification against `test-vectors/classification.json`.
//!
//! Each case scripts one response; every verb must classify it the same way.
//! No network is involved: a static transport hands back the scripted reply.

use std::io::Cursor;
use std::sync::Arc;

use rest_query::{HttpRequest, HttpResponse, QueryError, RequestExecutor, Transport, TransportError};
use serde::Deserialize;

const TARGET: &str = "http://localhost:3000/v3/resource";

#[derive(Debug, Deserialize)]
struct Vectors {
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    status: u16,
    body: String,
    expected_error: Option<String>,
}

struct StaticTransport {
    status: u16,
    body: String,
}

impl Transport for StaticTransport {
    fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(self.status, Cursor::new(self.body.clone().into_bytes())))
    }
}

fn expected(name: &str, status: u16) -> QueryError {
    match name {
        "BadRequest" => QueryError::BadRequest,
        "Unauthorized" => QueryError::Unauthorized,
        "Forbidden" => QueryError::Forbidden,
        "NotFound" => QueryError::NotFound,
        "ServerProblem" => QueryError::ServerProblem,
        "Unclassified" => QueryError::Unclassified { status },
        other => panic!("unknown expected_error: {other}"),
    }
}

#[test]
fn classification_test_vectors() {
    let raw = include_str!("../../test-vectors/classification.json");
    let vectors: Vectors = serde_json::from_str(raw).unwrap();
    assert!(!vectors.cases.is_empty());

    for case in vectors.cases {
        let executor = RequestExecutor::builder()
            .transport(Arc::new(StaticTransport {
                status: case.status,
                body: case.body.clone(),
            }))
            .build();

        for method in ["GET", "POST", "PUT"] {
            let result = executor.execute(method, TARGET, "k=v", None, false);
            match &case.expected_error {
                None => assert_eq!(
                    result.as_deref(),
                    Ok(case.body.as_bytes()),
                    "{}: {method} payload",
                    case.name
                ),
                Some(kind) => assert_eq!(
                    result,
                    Err(expected(kind, case.status)),
                    "{}: {method} error",
                    case.name
                ),
            }
        }
    }
}
