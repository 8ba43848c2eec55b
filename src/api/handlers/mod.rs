//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod health;
pub mod me;
pub mod products;
pub mod sessions;
pub mod users;
