use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::SharedSecret;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing credential")]
    Missing,

    #[error("invalid credential")]
    Mismatch,
}

/// Check a presented credential against the shared secret.
///
/// - No IO
/// - No panics
/// - The comparison is exact: no `Bearer ` prefix stripping, no trimming
pub fn authorize(secret: &SharedSecret, presented: Option<&str>) -> Result<(), AuthError> {
    let presented = presented.ok_or(AuthError::Missing)?;
    let matches: bool = presented.as_bytes().ct_eq(secret.as_str().as_bytes()).into();
    if matches {
        Ok(())
    } else {
        Err(AuthError::Mismatch)
    }
}
