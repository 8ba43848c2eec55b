use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Converts Diesel database errors to structured AppError variants.
///
/// Constraint violations are parsed into `Duplicate`/`Validation` with the
/// entity and field extracted from the Postgres constraint name; everything
/// else becomes an opaque `Database` error that surfaces as a 5xx.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                if let Some((entity, field)) = parse_constraint(constraint_name) {
                    AppError::Duplicate {
                        entity,
                        field,
                        value: "provided value".to_string(),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Unique constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::NotNullViolation => {
                let field = info.column_name().unwrap_or("unknown").to_string();
                AppError::Validation {
                    field,
                    reason: "Field is required".to_string(),
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                if let Some((entity, field)) = parse_constraint(constraint_name) {
                    AppError::Validation {
                        field,
                        reason: format!("References a missing {} row", entity),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Foreign key violation: {}",
                            message
                        )),
                    }
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(message.to_string()),
            },
        }
    }
}

/// Splits a Postgres constraint name like `users_email_key` or
/// `sessions_user_id_fkey` into (entity, field).
fn parse_constraint(constraint_name: Option<&str>) -> Option<(String, String)> {
    let name = constraint_name?;
    let trimmed = name
        .strip_suffix("_key")
        .or_else(|| name.strip_suffix("_fkey"))
        .or_else(|| name.strip_suffix("_idx"))
        .unwrap_or(name);
    let (entity, field) = trimmed.split_once('_')?;
    if entity.is_empty() || field.is_empty() {
        return None;
    }
    Some((entity.to_string(), field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unique_constraint() {
        let parsed = parse_constraint(Some("users_email_key"));
        assert_eq!(parsed, Some(("users".to_string(), "email".to_string())));
    }

    #[test]
    fn test_parse_fk_constraint() {
        let parsed = parse_constraint(Some("sessions_user_id_fkey"));
        assert_eq!(parsed, Some(("sessions".to_string(), "user_id".to_string())));
    }

    #[test]
    fn test_parse_missing_constraint() {
        assert_eq!(parse_constraint(None), None);
        assert_eq!(parse_constraint(Some("malformed")), None);
    }
}
