//! Authentication middleware.
//!
//! `deserialize_user` runs on every request: it decodes the bearer access
//! token into an `AuthUser` extension when possible, and when the access
//! token is unusable but an `x-refresh` header carries a still-valid
//! refresh token, it redeems that token for a fresh access token and hands
//! it back in the `x-access-token` response header. `require_user` then
//! gates protected routes on the extension being present.

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Response header carrying a transparently re-issued access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Request header clients use to present their refresh token.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh";

/// Extension type for authenticated user information.
///
/// Added to request extensions after successful authentication and
/// extracted in handlers using `Extension<AuthUser>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID from JWT claims
    pub user_id: i32,
    /// User email from JWT claims
    pub email: String,
    /// User display name from JWT claims
    pub name: String,
    /// Server-side session the presented token belongs to
    pub session_id: i32,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub.parse().unwrap_or(0),
            email: claims.email,
            name: claims.name,
            session_id: claims.session,
        }
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

fn refresh_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(String::from)
}

/// Middleware that attaches the current user to the request when a usable
/// token is presented.
///
/// Never rejects: anonymous requests pass through without an `AuthUser`
/// extension and `require_user` decides whether that matters. Redemption
/// failures (including database errors) also degrade to anonymous here,
/// matching the uniform-denial contract of the re-issuance pipeline.
pub async fn deserialize_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut auth_user = bearer_token(&request)
        .and_then(|token| validate_access_token(token, &state.jwt_config.secret).ok())
        .map(AuthUser::from);

    let mut reissued: Option<String> = None;
    if auth_user.is_none() {
        if let Some(refresh) = refresh_token(&request) {
            match state.services.sessions.re_issue_access_token(&refresh).await {
                Ok(Some(new_token)) => {
                    if let Ok(claims) =
                        validate_access_token(&new_token, &state.jwt_config.secret)
                    {
                        auth_user = Some(AuthUser::from(claims));
                        reissued = Some(new_token);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "Token re-issuance failed");
                }
            }
        }
    }

    if let Some(user) = auth_user {
        request.extensions_mut().insert(user);
    }

    let mut response = next.run(request).await;

    if let Some(token) = reissued {
        if let Ok(value) = HeaderValue::from_str(&token) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(ACCESS_TOKEN_HEADER), value);
        }
    }

    response
}

/// Middleware that rejects requests without an authenticated user.
///
/// Anonymous access to a protected route answers 403, matching the HTTP
/// boundary contract for ownership-gated resources.
pub async fn require_user(request: Request, next: Next) -> Result<Response, AppError> {
    if request.extensions().get::<AuthUser>().is_none() {
        return Err(AppError::Forbidden {
            message: "Authentication required".to_string(),
        });
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenType;

    #[test]
    fn test_auth_user_from_claims() {
        let claims = Claims {
            sub: "123".to_string(),
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
            session: 9,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9_999_999_999,
        };

        let auth_user = AuthUser::from(claims);
        assert_eq!(auth_user.user_id, 123);
        assert_eq!(auth_user.email, "test@example.com");
        assert_eq!(auth_user.session_id, 9);
    }

    #[test]
    fn test_auth_user_from_claims_invalid_id() {
        let claims = Claims {
            sub: "invalid".to_string(),
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
            session: 1,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9_999_999_999,
        };

        let auth_user = AuthUser::from(claims);
        assert_eq!(auth_user.user_id, 0); // Falls back to 0 on parse error
    }

    #[test]
    fn test_bearer_token_extraction() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc.def.ghi")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request), Some("abc.def.ghi"));

        let request = Request::builder()
            .header(header::AUTHORIZATION, "Basic abc")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&request), None);
    }
}
