//! Strongly-typed federation identifier.

use core::num::IntErrorKind;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller-supplied identifier of a federation.
///
/// Identifiers are plain integers on the wire (`{"id": 1, ...}`) and in paths
/// (`/federations/1`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FederationId(i64);

impl FederationId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for FederationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for FederationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<FederationId> for i64 {
    fn from(value: FederationId) -> Self {
        value.0
    }
}

/// A path segment could not be read as an integer identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdParseError {
    #[error("parsing {0:?}: invalid syntax")]
    InvalidSyntax(String),

    #[error("parsing {0:?}: value out of range")]
    OutOfRange(String),
}

impl FromStr for FederationId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self).map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                IdParseError::OutOfRange(s.to_string())
            }
            _ => IdParseError::InvalidSyntax(s.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_integers() {
        assert_eq!("42".parse::<FederationId>().unwrap(), FederationId::new(42));
        assert_eq!("-7".parse::<FederationId>().unwrap(), FederationId::new(-7));
        assert_eq!("+7".parse::<FederationId>().unwrap(), FederationId::new(7));
    }

    #[test]
    fn non_numeric_is_invalid_syntax() {
        let err = "abc".parse::<FederationId>().unwrap_err();
        assert_eq!(err, IdParseError::InvalidSyntax("abc".into()));
        assert_eq!(err.to_string(), r#"parsing "abc": invalid syntax"#);
    }

    #[test]
    fn empty_is_invalid_syntax() {
        let err = "".parse::<FederationId>().unwrap_err();
        assert_eq!(err.to_string(), r#"parsing "": invalid syntax"#);
    }

    #[test]
    fn overflow_is_out_of_range() {
        let err = "99999999999999999999".parse::<FederationId>().unwrap_err();
        assert!(matches!(err, IdParseError::OutOfRange(_)));
        assert!(err.to_string().ends_with("value out of range"));
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&FederationId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
