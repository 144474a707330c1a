use std::{
    collections::{BTreeMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::{rejection::FormRejection, Path, Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub grant_type: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// What `/echo` saw: verb, lower-cased headers and the raw body.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echoed {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct AppState {
    tokens: Arc<RwLock<HashSet<String>>>,
    hits: Arc<AtomicUsize>,
}

pub fn app() -> Router {
    let state = AppState::default();
    Router::new()
        .route("/v3/ping", get(ping))
        .route("/v3/login", post(login))
        .route("/v3/me", get(me))
        .route("/status/{code}", any(status))
        .route("/loop", any(redirect_loop))
        .route("/echo", get(echo).post(echo).put(echo))
        .route_layer(middleware::from_fn_with_state(state.clone(), count_hits))
        .route("/hits", get(hits))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn count_hits(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    info!(method = %request.method(), uri = %request.uri(), "request");
    next.run(request).await
}

async fn hits(State(state): State<AppState>) -> Json<usize> {
    Json(state.hits.load(Ordering::SeqCst))
}

async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<Token>, StatusCode> {
    let Form(form) = form.map_err(|_| StatusCode::BAD_REQUEST)?;
    if form.grant_type != "password" {
        return Err(StatusCode::BAD_REQUEST);
    }
    if form.username.as_deref() != Some(USERNAME) || form.password.as_deref() != Some(PASSWORD) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let token = Uuid::new_v4().to_string();
    state.tokens.write().await.insert(token.clone());
    Ok(Json(Token {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, StatusCode> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;
    if !state.tokens.read().await.contains(token) {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(Json(serde_json::json!({ "username": USERNAME })))
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(code) => (code, format!("status {}", code.as_u16())).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// Redirects to itself forever.
async fn redirect_loop() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/loop")])
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> (StatusCode, Json<Echoed>) {
    let code = if method == Method::POST {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let headers = headers
        .iter()
        .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
        .collect();
    (
        code,
        Json(Echoed {
            method: method.to_string(),
            headers,
            body,
        }),
    )
}
