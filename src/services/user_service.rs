//! User service for business logic operations.

use crate::error::AppResult;
use crate::models::{NewUser, User, UserFilter};
use crate::repositories::UserRepository;
use crate::utils::password::verify_password;

/// User service for handling user-related business logic.
///
/// This service wraps the `UserRepository`. Since the repository uses
/// `Arc` internally via the connection pool, cloning is cheap.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Creates a new UserService with the given repository.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Creates a new user; the repository hashes the password.
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        self.repo.create(new_user).await
    }

    /// Finds a user by their ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    /// Finds the first user matching the filter.
    pub async fn find_user(&self, filter: &UserFilter) -> AppResult<Option<User>> {
        self.repo.find_one(filter).await
    }

    /// Checks an email/password pair against the stored credentials.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller: both come back as `None`.
    pub async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<Option<User>> {
        let Some(user) = self.repo.find_one(&UserFilter::by_email(email)).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
