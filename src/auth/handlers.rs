use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::dto::{LoginRequest, SignupRequest, UserResponse},
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .auth
        .create_user(payload.username, payload.email, &payload.password)
        .await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    match state.auth.login(&payload.email, &payload.password).await? {
        Some(user) => {
            info!(user_id = user.id, "user logged in");
            Ok(Json(user.into()))
        }
        None => {
            warn!(email = %payload.email, "login rejected");
            Err(AppError::InvalidCredentials)
        }
    }
}
