//! Shared utilities: tokens, password hashing, identifiers, validation.

pub mod ident;
pub mod jwt;
pub mod password;
pub mod validate;
