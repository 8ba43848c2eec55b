//! Current user (me) endpoints.

use axum::{Extension, Json, Router, extract::State, routing::get};

use crate::api::dto::UserResponse;
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Creates the "me" routes (current authenticated user).
///
/// # Routes
/// - `GET /me` - Get current user's information
///
/// # Authentication
/// Requires an authenticated user; mounted behind `require_user`.
pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

/// GET /api/me - Get current user information
///
/// Returns the authenticated user's record, re-read from the database
/// rather than echoed from token claims.
async fn get_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users
        .find_by_id(auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            entity: "user".to_string(),
            field: "id".to_string(),
            value: auth_user.user_id.to_string(),
        })?;
    Ok(Json(UserResponse::from(user)))
}
