use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use fedsvc_core::{
    Federation, FederationId, FederationRepository, RepositoryError, RepositoryResult, WriteStatus,
};

use crate::fault::{NoFaults, SetupFault};

/// Volatile, process-local federation store.
///
/// Records live in a `BTreeMap` keyed by identifier, so `list` is
/// identifier-ascending without an extra sort. The lock makes `add`'s
/// check-then-insert atomic.
pub struct InMemoryFederationRepository {
    records: RwLock<BTreeMap<FederationId, Federation>>,
    faults: Arc<dyn SetupFault>,
}

impl InMemoryFederationRepository {
    pub fn new() -> Self {
        Self::with_faults(Arc::new(NoFaults))
    }

    /// Empty store whose `setup()` consults `faults`.
    pub fn with_faults(faults: Arc<dyn SetupFault>) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            faults,
        }
    }

    /// Store pre-populated with the demo records `1 → "Owner 1"`, `2 → "Owner 2"`.
    pub fn seeded() -> Self {
        let repo = Self::new();
        repo.extend([Federation::new(1, "Owner 1"), Federation::new(2, "Owner 2")]);
        repo
    }

    /// Replace the fault hook, keeping stored records.
    pub fn set_faults(mut self, faults: Arc<dyn SetupFault>) -> Self {
        self.faults = faults;
        self
    }

    /// Insert or overwrite records without conflict checks.
    pub fn extend(&self, federations: impl IntoIterator<Item = Federation>) {
        let mut map = self.records.write().unwrap_or_else(PoisonError::into_inner);
        for fed in federations {
            map.insert(fed.id, fed);
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryFederationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for InMemoryFederationRepository {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryFederationRepository")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl FederationRepository for InMemoryFederationRepository {
    fn setup(&self) -> RepositoryResult<()> {
        match self.faults.check() {
            Some(msg) => {
                tracing::error!(error = %msg, "repository setup failed");
                Err(RepositoryError::unavailable(msg))
            }
            None => Ok(()),
        }
    }

    fn add(&self, federation: Federation) -> RepositoryResult<WriteStatus> {
        let mut map = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let id = federation.id;
        if map.contains_key(&id) {
            return Err(RepositoryError::AlreadyExists(id));
        }
        map.insert(id, federation);
        Ok(WriteStatus::Created)
    }

    fn get(&self, id: FederationId) -> Option<Federation> {
        let map = self.records.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&id).cloned()
    }

    fn list(&self) -> Vec<Federation> {
        let map = self.records.read().unwrap_or_else(PoisonError::into_inner);
        map.values().cloned().collect()
    }

    fn update(&self, federation: Federation) -> RepositoryResult<WriteStatus> {
        let mut map = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let stored = map
            .get_mut(&federation.id)
            .ok_or(RepositoryError::NotFound(federation.id))?;
        // Identifier is fixed once stored; only the owner changes.
        stored.owner = federation.owner;
        Ok(WriteStatus::Ok)
    }

    fn delete(&self, id: FederationId) -> RepositoryResult<WriteStatus> {
        let mut map = self.records.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(&id);
        Ok(WriteStatus::Ok)
    }
}
