use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;

use crate::models::BoxedPredicate;
use crate::schema::sessions;

/// Session model for reading from database.
///
/// A session starts out valid and is only ever flipped to invalid through
/// an update; this layer never deletes session rows.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    pub valid: bool,
    pub user_agent: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewSession model for inserting new records.
///
/// `valid` is not a member; the database default (`TRUE`) applies, so every
/// session is created valid.
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession {
    pub user_id: i32,
    pub user_agent: String,
}

/// Partial update for the sessions table. `None` fields are left untouched.
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::sessions)]
pub struct SessionChanges {
    pub valid: Option<bool>,
    pub user_agent: Option<String>,
}

impl SessionChanges {
    pub fn invalidate() -> Self {
        Self {
            valid: Some(false),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.valid.is_none() && self.user_agent.is_none()
    }
}

/// Partial query over the sessions table.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub valid: Option<bool>,
}

impl SessionFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.user_id.is_none() && self.valid.is_none()
    }

    /// Compiles all present fields into one AND-ed predicate, `None` when
    /// the filter is empty.
    pub fn predicate(&self) -> Option<BoxedPredicate<sessions::table>> {
        let mut clause: Option<BoxedPredicate<sessions::table>> = None;
        if let Some(v) = self.id {
            clause = Some(match clause {
                Some(prior) => Box::new(prior.and(sessions::id.eq(v))),
                None => Box::new(sessions::id.eq(v)),
            });
        }
        if let Some(v) = self.user_id {
            clause = Some(match clause {
                Some(prior) => Box::new(prior.and(sessions::user_id.eq(v))),
                None => Box::new(sessions::user_id.eq(v)),
            });
        }
        if let Some(v) = self.valid {
            clause = Some(match clause {
                Some(prior) => Box::new(prior.and(sessions::valid.eq(v))),
                None => Box::new(sessions::valid.eq(v)),
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
        let filter = SessionFilter::default();
        assert!(filter.is_empty());
        assert!(filter.predicate().is_none());
    }

    #[test]
    fn test_partial_filter_compiles() {
        let filter = SessionFilter {
            user_id: Some(3),
            valid: Some(true),
            ..SessionFilter::default()
        };
        assert!(!filter.is_empty());
        assert!(filter.predicate().is_some());
    }

    #[test]
    fn test_invalidate_changes() {
        let changes = SessionChanges::invalidate();
        assert_eq!(changes.valid, Some(false));
        assert!(changes.user_agent.is_none());
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_empty_changes() {
        assert!(SessionChanges::default().is_empty());
    }
}
