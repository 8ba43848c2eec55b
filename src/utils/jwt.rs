use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
}

/// JWT Claims carrying the user's public attributes plus the id of the
/// server-side session the token belongs to.
///
/// `session` is mandatory: a token without it fails to decode, which the
/// re-issuance pipeline treats as a denial like any other bad token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// User display name
    pub name: String,
    /// Server-side session id this token was minted for
    pub session: i32,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user and session.
    pub fn new(
        user_id: i32,
        email: String,
        name: String,
        session_id: i32,
        token_type: TokenType,
        ttl_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(ttl_minutes);

        Self {
            sub: user_id.to_string(),
            email,
            name,
            session: session_id,
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

/// Generates a signed JWT for a user and session.
pub fn generate_token(
    user_id: i32,
    email: String,
    name: String,
    session_id: i32,
    token_type: TokenType,
    secret: &str,
    ttl_minutes: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, email, name, session_id, token_type, ttl_minutes);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates an access token (short-lived).
pub fn generate_access_token(
    user_id: i32,
    email: String,
    name: String,
    session_id: i32,
    secret: &str,
    ttl_minutes: i64,
) -> AppResult<String> {
    generate_token(
        user_id,
        email,
        name,
        session_id,
        TokenType::Access,
        secret,
        ttl_minutes,
    )
}

/// Generates a refresh token (long-lived).
pub fn generate_refresh_token(
    user_id: i32,
    email: String,
    name: String,
    session_id: i32,
    secret: &str,
    ttl_minutes: i64,
) -> AppResult<String> {
    generate_token(
        user_id,
        email,
        name,
        session_id,
        TokenType::Refresh,
        secret,
        ttl_minutes,
    )
}

/// Generates both access and refresh tokens for the same user and session.
pub fn generate_token_pair(
    user_id: i32,
    email: String,
    name: String,
    session_id: i32,
    secret: &str,
    access_ttl_minutes: i64,
    refresh_ttl_minutes: i64,
) -> AppResult<(String, String)> {
    let access_token = generate_access_token(
        user_id,
        email.clone(),
        name.clone(),
        session_id,
        secret,
        access_ttl_minutes,
    )?;

    let refresh_token = generate_refresh_token(
        user_id,
        email,
        name,
        session_id,
        secret,
        refresh_ttl_minutes,
    )?;

    Ok((access_token, refresh_token))
}

/// Validates and decodes a JWT token.
///
/// When `expected_type` is given the decoded claims must carry that token
/// type; an access token presented where a refresh token is expected fails
/// validation.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        _ => AppError::Unauthorized {
            message: format!("Token validation failed: {}", e),
        },
    })?;

    if let Some(expected) = expected_type {
        if claims.token_type != expected {
            return Err(AppError::Unauthorized {
                message: format!(
                    "Invalid token type: expected {:?}, got {:?}",
                    expected, claims.token_type
                ),
            });
        }
    }

    Ok(claims)
}

/// Validates an access token.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

/// Validates a refresh token.
pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing";

    fn sample_access_token(session_id: i32) -> String {
        generate_access_token(
            1,
            "test@example.com".to_string(),
            "Test User".to_string(),
            session_id,
            TEST_SECRET,
            15,
        )
        .unwrap()
    }

    #[test]
    fn test_generate_token() {
        let token = sample_access_token(9);
        assert!(!token.is_empty());
        assert!(token.contains('.'));
    }

    #[test]
    fn test_generate_token_pair() {
        let (access_token, refresh_token) = generate_token_pair(
            1,
            "test@example.com".to_string(),
            "Test User".to_string(),
            4,
            TEST_SECRET,
            15,
            525_600,
        )
        .unwrap();

        assert!(!access_token.is_empty());
        assert!(!refresh_token.is_empty());
        assert_ne!(access_token, refresh_token);
    }

    #[test]
    fn test_validate_token_success() {
        let token = sample_access_token(42);
        let claims = validate_access_token(&token, TEST_SECRET).unwrap();

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.name, "Test User");
        assert_eq!(claims.session, 42);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_validate_wrong_token_type() {
        let access_token = sample_access_token(1);

        let result = validate_refresh_token(&access_token, TEST_SECRET);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("Invalid token type"));
        } else {
            panic!("Expected Unauthorized error for wrong token type");
        }
    }

    #[test]
    fn test_validate_token_invalid_secret() {
        let token = sample_access_token(1);

        let result = validate_token(&token, "wrong_secret", None);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("signature"));
        } else {
            panic!("Expected Unauthorized error");
        }
    }

    #[test]
    fn test_validate_token_invalid_format() {
        let result = validate_token("invalid.token.format", TEST_SECRET, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token() {
        let token = generate_access_token(
            1,
            "test@example.com".to_string(),
            "Test User".to_string(),
            1,
            TEST_SECRET,
            -90, // already expired, past the default decode leeway
        )
        .unwrap();

        let result = validate_token(&token, TEST_SECRET, None);
        assert!(result.is_err());

        if let Err(AppError::Unauthorized { message }) = result {
            assert!(message.contains("expired"));
        } else {
            panic!("Expected Unauthorized error for expired token");
        }
    }

    #[test]
    fn test_claims_structure() {
        let claims = Claims::new(
            42,
            "user@example.com".to_string(),
            "Jane Doe".to_string(),
            7,
            TokenType::Refresh,
            525_600,
        );

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.session, 7);
        assert_eq!(claims.token_type, TokenType::Refresh);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_type_serialization() {
        let claims = Claims::new(
            1,
            "test@example.com".to_string(),
            "Test User".to_string(),
            1,
            TokenType::Access,
            15,
        );

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"token_type\":\"access\""));
    }
}
