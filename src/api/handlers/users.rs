//! User registration request handlers.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::api::dto::{CreateUserRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates user-related routes.
///
/// Routes:
/// - POST / - Register a new user
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(create_user))
}

/// POST /api/users - Register a new user
///
/// Validates the payload (including password confirmation) and creates the
/// user. The password is hashed before storage and never echoed back.
/// Returns 201 Created with the created user data, or 409 when the email
/// is already taken.
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let new_user = payload.into_new_user();
    let user = state.services.users.create_user(new_user).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
