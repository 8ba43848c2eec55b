//! Session (login/logout) request handlers.

use axum::{
    Extension, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::{delete, get, post},
};

use crate::api::dto::{CreateSessionRequest, SessionResponse, SessionTokensResponse};
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::SessionFilter;
use crate::state::AppState;
use crate::utils::jwt::generate_token_pair;
use crate::utils::validate::ValidatedJson;

/// Creates the public session routes.
///
/// Routes:
/// - POST / - Log in (create a session and issue a token pair)
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/", post(create_session))
}

/// Creates the session routes that require an authenticated user.
///
/// Routes:
/// - GET /    - List the caller's valid sessions
/// - DELETE / - Log out (invalidate the current session)
pub fn protected_session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions))
        .route("/", delete(delete_session))
}

/// POST /api/sessions - Log in
///
/// Verifies the credentials, records a session tagged with the caller's
/// User-Agent, and returns an access/refresh token pair. Bad credentials
/// answer 401 without distinguishing unknown email from wrong password.
async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateSessionRequest>,
) -> AppResult<Json<SessionTokensResponse>> {
    let user = state
        .services
        .users
        .validate_credentials(&payload.email, &payload.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid email or password".to_string(),
        })?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let session = state
        .services
        .sessions
        .create_session(user.id, user_agent)
        .await?;

    let (access_token, refresh_token) = generate_token_pair(
        user.id,
        user.email,
        user.name,
        session.id,
        &state.jwt_config.secret,
        state.jwt_config.access_token_ttl_minutes,
        state.jwt_config.refresh_token_ttl_minutes,
    )?;

    Ok(Json(SessionTokensResponse::issued(
        access_token,
        refresh_token,
    )))
}

/// GET /api/sessions - List the caller's valid sessions
async fn list_sessions(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<SessionResponse>>> {
    let filter = SessionFilter {
        id: None,
        user_id: Some(auth_user.user_id),
        valid: Some(true),
    };
    let sessions = state.services.sessions.find_sessions(&filter).await?;
    let responses: Vec<SessionResponse> =
        sessions.into_iter().map(SessionResponse::from).collect();
    Ok(Json(responses))
}

/// DELETE /api/sessions - Log out
///
/// Invalidates the session named in the caller's token and returns nulled
/// tokens so clients drop their copies. Always answers 200 for an
/// authenticated caller, even when the session was already invalid.
async fn delete_session(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<(StatusCode, Json<SessionTokensResponse>)> {
    state
        .services
        .sessions
        .invalidate_session(auth_user.session_id)
        .await?;
    Ok((StatusCode::OK, Json(SessionTokensResponse::revoked())))
}
