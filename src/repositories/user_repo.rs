//! User repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User, UserFilter};
use crate::utils::password::hash_password;

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment). No need for `Arc<UserRepository>`.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
    bcrypt_cost: u32,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool and
    /// bcrypt work factor.
    pub fn new(pool: AsyncDbPool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// Creates a new user in the database.
    ///
    /// The plain-text password in `new_user` is bcrypt-hashed before the
    /// row is written; the stored value never contains the original.
    ///
    /// # Returns
    /// The created user with generated id and timestamps
    pub async fn create(&self, mut new_user: NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;

        new_user.password = hash_password(&new_user.password, self.bcrypt_cost)?;

        let mut conn = self.pool.get().await?;
        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Finds a user by their ID.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    pub async fn find_by_id(&self, user_id: i32) -> AppResult<Option<User>> {
        self.find_one(&UserFilter::by_id(user_id)).await
    }

    /// Finds the first user matching the filter.
    ///
    /// An empty filter returns `None` without querying the database, so a
    /// blank query can never surface an arbitrary first row.
    pub async fn find_one(&self, filter: &UserFilter) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;

        let Some(predicate) = filter.predicate() else {
            return Ok(None);
        };

        let mut conn = self.pool.get().await?;
        users
            .filter(predicate)
            .limit(1)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
