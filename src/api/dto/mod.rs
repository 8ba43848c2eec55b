//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - registration and user responses
//! - `session` - login, token pair, and session responses
//! - `product` - product CRUD requests and responses
//! - `error` - common error response DTOs

mod error;
mod product;
mod session;
mod user;

pub use error::ErrorResponse;
pub use product::{CreateProductRequest, ProductResponse, UpdateProductRequest};
pub use session::{CreateSessionRequest, SessionResponse, SessionTokensResponse};
pub use user::{CreateUserRequest, UserResponse};
