//! Session-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Session;

/// Request body for logging in (creating a session).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(email(message = "Not a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token pair handed out on login; logout answers with both fields null so
/// clients drop their stored tokens.
#[derive(Debug, Serialize)]
pub struct SessionTokensResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionTokensResponse {
    pub fn issued(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
        }
    }

    pub fn revoked() -> Self {
        Self {
            access_token: None,
            refresh_token: None,
        }
    }
}

/// Response body for a session row.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: i32,
    pub user_id: i32,
    pub valid: bool,
    pub user_agent: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            user_id: session.user_id,
            valid: session.valid,
            user_agent: session.user_agent,
            created_at: session
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            updated_at: session
                .updated_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
        }
    }
}
