use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{debug, info, instrument};

use super::{dto::UserBody, repo_types::NewUser, repo_types::User};
use crate::{
    auth::{extractors::AuthUser, password::hash_password_blocking},
    error::ApiError,
    state::AppState,
};

type IdParam = Result<Path<u64>, PathRejection>;
type BodyParam = Result<Json<UserBody>, JsonRejection>;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_users).post(create_user))
        .route(
            "/user/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// A non-numeric id names no user: 404, same as an unknown one.
fn user_id(path: IdParam) -> Result<u64, ApiError> {
    let Path(id) = path?;
    Ok(id)
}

/// Swaps the plaintext password for its Argon2 hash before anything reaches the store.
async fn hash_body(body: BodyParam) -> Result<NewUser, ApiError> {
    let Json(body) = body?;
    let (plain, fields) = body.split()?;
    let hash = hash_password_blocking(plain).await?;
    debug!("password hashed");
    Ok(fields.with_hash(hash))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Json<Vec<User>> {
    Json(state.store.read().await.list().to_vec())
}

#[instrument(skip(state, path))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    path: IdParam,
) -> Result<Json<User>, ApiError> {
    let id = user_id(path)?;
    let user = state.store.read().await.get_by_id(id)?.clone();
    Ok(Json(user))
}

#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    body: BodyParam,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let new = hash_body(body).await?;
    let user = state.store.write().await.insert(new);
    info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// The password is hashed before the bearer token is looked at, so an
/// unauthenticated caller still pays for one hash. The id is resolved last.
#[instrument(skip(state, path, auth, body))]
pub async fn update_user(
    State(state): State<AppState>,
    path: IdParam,
    auth: Result<AuthUser, ApiError>,
    body: BodyParam,
) -> Result<Json<User>, ApiError> {
    let new = hash_body(body).await?;
    let AuthUser(caller) = auth?;
    let id = user_id(path)?;
    let user = state.store.write().await.update(id, new)?;
    info!(user_id = id, caller, "user updated");
    Ok(Json(user))
}

#[instrument(skip(state, path))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    path: IdParam,
) -> Result<&'static str, ApiError> {
    let id = user_id(path)?;
    state.store.write().await.delete(id)?;
    info!(user_id = id, caller, "user deleted");
    Ok("User deleted")
}
