use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;

use crate::models::BoxedPredicate;
use crate::schema::users;

/// User model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub password: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewUser model for inserting new records.
///
/// `password` holds the plain text here; the repository hashes it before
/// the row is written.
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Partial query over the users table.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub id: Option<i32>,
    pub email: Option<String>,
}

impl UserFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.email.is_none()
    }

    /// Compiles all present fields into one AND-ed predicate.
    ///
    /// Returns `None` for an empty filter so callers never run an
    /// unfiltered statement by accident.
    pub fn predicate(&self) -> Option<BoxedPredicate<users::table>> {
        let mut clause: Option<BoxedPredicate<users::table>> = None;
        if let Some(v) = self.id {
            clause = Some(match clause {
                Some(prior) => Box::new(prior.and(users::id.eq(v))),
                None => Box::new(users::id.eq(v)),
            });
        }
        if let Some(v) = self.email.clone() {
            clause = Some(match clause {
                Some(prior) => Box::new(prior.and(users::email.eq(v))),
                None => Box::new(users::email.eq(v)),
            });
        }
        clause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_predicate() {
        let filter = UserFilter::default();
        assert!(filter.is_empty());
        assert!(filter.predicate().is_none());
    }

    #[test]
    fn test_single_field_filter_compiles() {
        let filter = UserFilter::by_email("user@example.com");
        assert!(!filter.is_empty());
        assert!(filter.predicate().is_some());
    }

    #[test]
    fn test_combined_filter_compiles() {
        let filter = UserFilter {
            id: Some(7),
            email: Some("user@example.com".to_string()),
        };
        assert!(filter.predicate().is_some());
    }
}
