//! Session service: session lifecycle and refresh-token redemption.

use tracing::debug;

use crate::config::JwtConfig;
use crate::error::AppResult;
use crate::models::{NewSession, Session, SessionChanges, SessionFilter, User};
use crate::repositories::{SessionRepository, UserRepository};
use crate::utils::jwt::{generate_access_token, validate_refresh_token};

/// Session lookup surface the redemption pipeline reads through.
pub trait SessionLookup {
    async fn find_session(&self, session_id: i32) -> AppResult<Option<Session>>;
}

/// User lookup surface the redemption pipeline reads through.
pub trait UserLookup {
    async fn find_user(&self, user_id: i32) -> AppResult<Option<User>>;
}

impl SessionLookup for SessionRepository {
    async fn find_session(&self, session_id: i32) -> AppResult<Option<Session>> {
        self.find_by_id(session_id).await
    }
}

impl UserLookup for UserRepository {
    async fn find_user(&self, user_id: i32) -> AppResult<Option<User>> {
        self.find_by_id(user_id).await
    }
}

/// Session service mediating session creation, invalidation, and the
/// refresh-token → access-token re-issuance pipeline.
#[derive(Clone)]
pub struct SessionService {
    sessions: SessionRepository,
    users: UserRepository,
    jwt: JwtConfig,
}

impl SessionService {
    /// Creates a new SessionService.
    pub fn new(sessions: SessionRepository, users: UserRepository, jwt: JwtConfig) -> Self {
        Self {
            sessions,
            users,
            jwt,
        }
    }

    /// Creates a session for a login; the row starts out valid.
    pub async fn create_session(&self, user_id: i32, user_agent: String) -> AppResult<Session> {
        self.sessions
            .create(NewSession {
                user_id,
                user_agent,
            })
            .await
    }

    /// Lists sessions matching the filter.
    pub async fn find_sessions(&self, filter: &SessionFilter) -> AppResult<Vec<Session>> {
        self.sessions.find_many(filter).await
    }

    /// Applies a partial update to the sessions matching the filter.
    pub async fn update_session(
        &self,
        filter: &SessionFilter,
        changes: &SessionChanges,
    ) -> AppResult<bool> {
        self.sessions.update_one(filter, changes).await
    }

    /// Marks the given session invalid. Invalidation is terminal for
    /// issuance: the session can still be read, but never again yields an
    /// access token.
    pub async fn invalidate_session(&self, session_id: i32) -> AppResult<bool> {
        self.update_session(
            &SessionFilter::by_id(session_id),
            &SessionChanges::invalidate(),
        )
        .await
    }

    /// Redeems a refresh token for a fresh access token.
    ///
    /// The pipeline checks, in order: token signature and type, the session
    /// the token references, that session's validity flag, and the owning
    /// user. Every rejection collapses into the same `Ok(None)` denial; the
    /// caller cannot tell why redemption failed. `Err` is reserved for
    /// database failures.
    pub async fn re_issue_access_token(&self, refresh_token: &str) -> AppResult<Option<String>> {
        re_issue_access_token_with(&self.sessions, &self.users, &self.jwt, refresh_token).await
    }
}

/// Redemption pipeline body, written against the lookup traits.
async fn re_issue_access_token_with<S, U>(
    sessions: &S,
    users: &U,
    jwt: &JwtConfig,
    refresh_token: &str,
) -> AppResult<Option<String>>
where
    S: SessionLookup,
    U: UserLookup,
{
    let claims = match validate_refresh_token(refresh_token, &jwt.secret) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Refresh token rejected");
            return Ok(None);
        }
    };

    let session = match sessions.find_session(claims.session).await? {
        Some(session) if session.valid => session,
        _ => {
            debug!(session_id = claims.session, "Session missing or invalidated");
            return Ok(None);
        }
    };

    let Some(user) = users.find_user(session.user_id).await? else {
        debug!(user_id = session.user_id, "Session owner no longer exists");
        return Ok(None);
    };

    let access_token = generate_access_token(
        user.id,
        user.email,
        user.name,
        session.id,
        &jwt.secret,
        jwt.access_token_ttl_minutes,
    )?;

    Ok(Some(access_token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chrono::Utc;

    use crate::utils::jwt::{generate_access_token, generate_refresh_token, validate_access_token};

    const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn test_jwt() -> JwtConfig {
        JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_ttl_minutes: 15,
            refresh_token_ttl_minutes: 60,
        }
    }

    fn session(id: i32, user_id: i32, valid: bool) -> Session {
        let now = Utc::now().naive_utc();
        Session {
            id,
            user_id,
            valid,
            user_agent: "session-tests".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn user(id: i32) -> User {
        let now = Utc::now().naive_utc();
        User {
            id,
            email: format!("user{id}@example.com"),
            name: "Test User".to_string(),
            password: "$2b$04$irrelevant-for-these-tests".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    struct SessionMap(HashMap<i32, Session>);

    impl SessionLookup for SessionMap {
        async fn find_session(&self, session_id: i32) -> AppResult<Option<Session>> {
            Ok(self.0.get(&session_id).cloned())
        }
    }

    struct UserMap(HashMap<i32, User>);

    impl UserLookup for UserMap {
        async fn find_user(&self, user_id: i32) -> AppResult<Option<User>> {
            Ok(self.0.get(&user_id).cloned())
        }
    }

    fn stores(sessions: Vec<Session>, users: Vec<User>) -> (SessionMap, UserMap) {
        (
            SessionMap(sessions.into_iter().map(|s| (s.id, s)).collect()),
            UserMap(users.into_iter().map(|u| (u.id, u)).collect()),
        )
    }

    fn refresh_token_for(user: &User, session_id: i32, secret: &str) -> String {
        generate_refresh_token(
            user.id,
            user.email.clone(),
            user.name.clone(),
            session_id,
            secret,
            60,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_re_issue_denied_for_bad_signature() {
        let owner = user(1);
        let (sessions, users) = stores(vec![session(10, 1, true)], vec![owner.clone()]);
        let token = refresh_token_for(&owner, 10, "another_secret_that_is_not_ours!!");

        let result = re_issue_access_token_with(&sessions, &users, &test_jwt(), &token).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_re_issue_denied_for_access_token_in_refresh_position() {
        let owner = user(1);
        let (sessions, users) = stores(vec![session(10, 1, true)], vec![owner.clone()]);
        let token = generate_access_token(
            owner.id,
            owner.email.clone(),
            owner.name.clone(),
            10,
            TEST_SECRET,
            15,
        )
        .unwrap();

        let result = re_issue_access_token_with(&sessions, &users, &test_jwt(), &token).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_re_issue_denied_for_unknown_session() {
        let owner = user(1);
        let (sessions, users) = stores(Vec::new(), vec![owner.clone()]);
        let token = refresh_token_for(&owner, 404, TEST_SECRET);

        let result = re_issue_access_token_with(&sessions, &users, &test_jwt(), &token).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_re_issue_denied_for_invalidated_session() {
        let owner = user(1);
        let (sessions, users) = stores(vec![session(10, 1, false)], vec![owner.clone()]);
        let token = refresh_token_for(&owner, 10, TEST_SECRET);

        let result = re_issue_access_token_with(&sessions, &users, &test_jwt(), &token).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_re_issue_denied_for_missing_user() {
        let owner = user(1);
        let (sessions, users) = stores(vec![session(10, 1, true)], Vec::new());
        let token = refresh_token_for(&owner, 10, TEST_SECRET);

        let result = re_issue_access_token_with(&sessions, &users, &test_jwt(), &token).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_re_issue_emits_access_token_bound_to_session() {
        let owner = user(7);
        let (sessions, users) = stores(vec![session(42, 7, true)], vec![owner.clone()]);
        let token = refresh_token_for(&owner, 42, TEST_SECRET);

        let reissued = re_issue_access_token_with(&sessions, &users, &test_jwt(), &token)
            .await
            .unwrap()
            .expect("expected a fresh access token");

        assert!(!reissued.is_empty());
        let claims = validate_access_token(&reissued, TEST_SECRET).unwrap();
        assert_eq!(claims.session, 42);
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, owner.email);
    }
}
