use crate::error::AppResult;

/// Hash a password with bcrypt at the given work factor.
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Verify a password against a stored bcrypt hash.
///
/// A malformed hash counts as a mismatch rather than an error, so callers
/// get a plain yes/no answer for any stored value.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}
