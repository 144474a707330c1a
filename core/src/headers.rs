//! Header names, values and ready-made maps for the API's common calls.

use std::collections::BTreeMap;

/// Headers applied to an outgoing request, one value per name.
pub type HeaderMap = BTreeMap<String, String>;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const APPLICATION_JSON: &str = "application/json";
pub const BEARER_PREFIX: &str = "Bearer ";
pub const GRANT_TYPE_PREFIX: &str = "grant_type=";

/// `Authorization: Bearer <token>`.
pub fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION.to_string(), format!("{BEARER_PREFIX}{token}"));
    headers
}

/// Form-encoded content type, plus a bearer token when given.
pub fn form(token: Option<&str>) -> HeaderMap {
    with_content_type(FORM_URLENCODED, token)
}

/// JSON content type, plus a bearer token when given.
pub fn json(token: Option<&str>) -> HeaderMap {
    with_content_type(APPLICATION_JSON, token)
}

/// Body prefix for token requests, e.g. `grant_type=password`.
pub fn grant_type(kind: &str) -> String {
    format!("{GRANT_TYPE_PREFIX}{kind}")
}

fn with_content_type(content_type: &str, token: Option<&str>) -> HeaderMap {
    let mut headers = token.map(bearer).unwrap_or_default();
    headers.insert(CONTENT_TYPE.to_string(), content_type.to_string());
    headers
}
