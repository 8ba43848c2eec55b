//! Repository layer for data access operations.
//!
//! Each repository owns exactly one table and translates typed partial
//! queries into parameterized single-table SQL. A filter or changeset with
//! no usable fields is treated as a guard, not an error: the operation
//! short-circuits to a "not found"/zero-effect result without issuing a
//! statement, so a blank filter can never touch the whole table.

mod product_repo;
mod session_repo;
mod user_repo;

pub use product_repo::ProductRepository;
pub use session_repo::SessionRepository;
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Options for find-and-update operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// When set, the post-update row is re-read and returned.
    pub new: bool,
}

impl UpdateOptions {
    pub fn returning_new() -> Self {
        Self { new: true }
    }
}

/// Aggregates all repositories for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub sessions: SessionRepository,
    pub products: ProductRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    /// * `bcrypt_cost` - Work factor the user repository hashes passwords with
    pub fn new(pool: AsyncDbPool, bcrypt_cost: u32) -> Self {
        Self {
            users: UserRepository::new(pool.clone(), bcrypt_cost),
            sessions: SessionRepository::new(pool.clone()),
            products: ProductRepository::new(pool),
        }
    }
}
