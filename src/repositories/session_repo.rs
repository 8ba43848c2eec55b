//! Session repository for async database operations.
//!
//! Sessions are never deleted by this layer: a session ends by having its
//! `valid` flag updated to false, after which it can still be read but no
//! longer backs token issuance.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewSession, Session, SessionChanges, SessionFilter};

/// Session repository holding an async connection pool.
#[derive(Clone)]
pub struct SessionRepository {
    pool: AsyncDbPool,
}

impl SessionRepository {
    /// Creates a new SessionRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new session.
    ///
    /// `valid` is left to the database default, so the returned row is
    /// always valid at creation.
    ///
    /// # Returns
    /// The created session with generated id and timestamps
    pub async fn create(&self, new_session: NewSession) -> AppResult<Session> {
        use crate::schema::sessions::dsl::*;

        let mut conn = self.pool.get().await?;
        diesel::insert_into(sessions)
            .values(&new_session)
            .returning(Session::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a session by its ID.
    pub async fn find_by_id(&self, session_id: i32) -> AppResult<Option<Session>> {
        self.find_one(&SessionFilter::by_id(session_id)).await
    }

    /// Finds the first session matching the filter; empty filters return
    /// `None` without querying.
    pub async fn find_one(&self, filter: &SessionFilter) -> AppResult<Option<Session>> {
        use crate::schema::sessions::dsl::*;

        let Some(predicate) = filter.predicate() else {
            return Ok(None);
        };

        let mut conn = self.pool.get().await?;
        sessions
            .filter(predicate)
            .limit(1)
            .select(Session::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists every session matching the filter, newest first; empty
    /// filters return an empty list without querying.
    pub async fn find_many(&self, filter: &SessionFilter) -> AppResult<Vec<Session>> {
        use crate::schema::sessions::dsl::*;

        let Some(predicate) = filter.predicate() else {
            return Ok(Vec::new());
        };

        let mut conn = self.pool.get().await?;
        sessions
            .filter(predicate)
            .order(created_at.desc())
            .select(Session::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Applies a partial update to every session matching the filter.
    ///
    /// The statement carries no row cap: a broad filter (say `user_id`
    /// alone) updates every matching session. Callers targeting a single
    /// session filter by `id`.
    ///
    /// Returns whether any row was affected. Zero affected rows is
    /// "nothing matched", not an error, and an empty filter or empty
    /// changeset short-circuits to `false` without touching the database.
    pub async fn update_one(
        &self,
        filter: &SessionFilter,
        changes: &SessionChanges,
    ) -> AppResult<bool> {
        use crate::schema::sessions::dsl::*;

        if changes.is_empty() {
            return Ok(false);
        }
        let Some(predicate) = filter.predicate() else {
            return Ok(false);
        };

        let mut conn = self.pool.get().await?;
        let affected = diesel::update(sessions.filter(predicate))
            .set(changes)
            .execute(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(affected > 0)
    }
}
