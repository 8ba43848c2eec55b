//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers. Relations between entities (session → user)
//! are resolved here as sequential independent lookups; the repositories
//! never join across tables.

mod product_service;
mod session_service;
mod user_service;

pub use product_service::ProductService;
pub use session_service::SessionService;
pub use user_service::UserService;

use crate::config::JwtConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub sessions: SessionService,
    pub products: ProductService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, jwt: JwtConfig) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            sessions: SessionService::new(repos.sessions, repos.users, jwt),
            products: ProductService::new(repos.products),
        }
    }
}
