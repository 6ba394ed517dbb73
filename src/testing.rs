use axum::{
    body::{to_bytes, Body},
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{app::build_app, state::AppState, users::repo::UserStore};

pub struct Reply {
    pub status: StatusCode,
    pub text: String,
    pub json: Value,
}

pub fn test_app() -> (Router, AppState) {
    test_app_with(UserStore::new())
}

pub fn test_app_with(store: UserStore) -> (Router, AppState) {
    let state = AppState::fake(store);
    (build_app(state.clone()), state)
}

pub fn token_for(state: &AppState, user_id: u64) -> String {
    state.keys.sign(user_id).expect("sign token")
}

pub fn alice() -> Value {
    json!({"name": "Alice", "age": 30, "email": "a@x.com", "password": "pw123"})
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let header = token.map(|t| format!("Bearer {t}"));
    send_with_auth(app, method, uri, header.as_deref(), body).await
}

/// Like [`send`], but with the raw `Authorization` header value.
pub async fn send_with_auth(
    app: &Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        req = req.header(AUTHORIZATION, value);
    }
    let req = match body {
        Some(v) => req
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string())),
        None => req.body(Body::empty()),
    }
    .expect("request");

    let res = app.clone().oneshot(req).await.expect("response");
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply { status, text, json }
}
