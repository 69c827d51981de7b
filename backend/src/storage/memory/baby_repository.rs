use anyhow::Result;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::models::baby::Baby as DomainBaby;
use crate::storage::traits::BabyStorage;

use super::seed;

/// MemoryConnection owns the process-wide list of babies.
///
/// All repositories created from the same connection share the same list.
/// The mutex only guards against overlapping access from multiple handles;
/// the execution model is single-threaded and every operation runs to
/// completion while holding the lock.
#[derive(Clone)]
pub struct MemoryConnection {
    babies: Arc<Mutex<Vec<DomainBaby>>>,
}

impl MemoryConnection {
    /// Create a connection with an empty store
    pub fn new() -> Self {
        Self {
            babies: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a connection seeded with the demo fixture babies
    pub fn seeded() -> Self {
        let connection = Self::new();
        {
            let mut babies = connection.lock_babies();
            *babies = seed::fixture_babies();
        }
        info!("Seeded in-memory store with fixture babies");
        connection
    }

    fn lock_babies(&self) -> MutexGuard<'_, Vec<DomainBaby>> {
        // A poisoned lock only means a panic elsewhere; the data is still
        // consistent because every mutation completes under the lock.
        self.babies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory baby repository backed by a shared [`MemoryConnection`].
#[derive(Clone)]
pub struct BabyRepository {
    connection: Arc<MemoryConnection>,
}

impl BabyRepository {
    /// Create a new in-memory baby repository
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }

    /// Clone a baby out of the store with its records presented sorted.
    ///
    /// Reads hand out snapshots so callers can never alias the stored
    /// nested collections.
    fn snapshot(baby: &DomainBaby) -> DomainBaby {
        let mut copy = baby.clone();
        copy.sort_sleep_records();
        copy
    }
}

impl BabyStorage for BabyRepository {
    fn store_baby(&self, baby: &DomainBaby) -> Result<()> {
        let mut babies = self.connection.lock_babies();
        babies.push(baby.clone());
        debug!("Stored baby {} ({} total)", baby.id, babies.len());
        Ok(())
    }

    fn get_baby(&self, baby_id: &str) -> Result<Option<DomainBaby>> {
        let babies = self.connection.lock_babies();
        Ok(babies
            .iter()
            .find(|b| b.id == baby_id)
            .map(Self::snapshot))
    }

    fn get_baby_by_parent_username(&self, parent_username: &str) -> Result<Option<DomainBaby>> {
        let babies = self.connection.lock_babies();
        Ok(babies
            .iter()
            .find(|b| !b.is_archived && b.parent_username == parent_username)
            .map(Self::snapshot))
    }

    fn list_active_babies(&self) -> Result<Vec<DomainBaby>> {
        let babies = self.connection.lock_babies();
        Ok(babies
            .iter()
            .filter(|b| !b.is_archived)
            .map(Self::snapshot)
            .collect())
    }

    fn list_archived_babies(&self) -> Result<Vec<DomainBaby>> {
        let babies = self.connection.lock_babies();
        Ok(babies
            .iter()
            .filter(|b| b.is_archived)
            .map(Self::snapshot)
            .collect())
    }

    fn update_baby(&self, baby: &DomainBaby) -> Result<()> {
        let mut babies = self.connection.lock_babies();
        match babies.iter_mut().find(|b| b.id == baby.id) {
            Some(existing) => {
                *existing = baby.clone();
                Ok(())
            }
            None => {
                warn!("Attempted to update a non-existent baby: {}", baby.id);
                Err(anyhow::anyhow!("Baby not found for update: {}", baby.id))
            }
        }
    }

    fn delete_baby(&self, baby_id: &str) -> Result<bool> {
        let mut babies = self.connection.lock_babies();
        let before = babies.len();
        babies.retain(|b| b.id != baby_id);
        let deleted = babies.len() < before;
        if deleted {
            info!("Permanently deleted baby: {}", baby_id);
        }
        Ok(deleted)
    }
}
