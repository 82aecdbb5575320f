//! The federation record.

use serde::{Deserialize, Serialize};

use crate::FederationId;

/// The only domain record managed by the service.
///
/// Wire shape: `{"id": <integer>, "owner": <string>}`. The owner carries no
/// length or charset constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Federation {
    pub id: FederationId,
    pub owner: String,
}

impl Federation {
    pub fn new(id: i64, owner: impl Into<String>) -> Self {
        Self {
            id: FederationId::new(id),
            owner: owner.into(),
        }
    }
}
