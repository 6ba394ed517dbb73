use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse},
        password::{verify_password_blocking, PasswordError},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let payload = match payload {
        Ok(Json(p)) => p,
        Err(e) => {
            warn!(error = %e, "login body rejected");
            LoginRequest::default()
        }
    };
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        warn!("login without email or password");
        return Err(ApiError::InvalidCredentials);
    };

    let user = state.store.read().await.get_by_email(&email).cloned();
    let Some(user) = user else {
        warn!(%email, "login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    let ok = match verify_password_blocking(user.password.clone(), password).await {
        Ok(v) => v,
        Err(PasswordError::Verification(e)) => {
            error!(error = %e, user_id = user.id, "stored password hash is unusable");
            false
        }
        Err(e) => return Err(e.into()),
    };

    if !ok {
        warn!(%email, user_id = user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.keys.sign(user.id)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(LoginResponse {
        user: user.into(),
        token,
    }))
}
