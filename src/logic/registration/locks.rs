// One async lock per match. Everything that reads occupancy and then writes a registration
// for a match holds that match's lock until its transaction is done.
use std::{collections::HashMap, sync::{Arc, Mutex, PoisonError}};

use tokio::sync::Mutex as AsyncMutex;

use crate::logic::types::MatchId;

#[derive(Default)]
pub struct MatchLocks {
    locks: Mutex<HashMap<MatchId, Arc<AsyncMutex<()>>>>,
}

impl MatchLocks {
    // Get the lock of a match, creating it on first use.
    pub fn for_match(&self, match_id: MatchId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        return locks.entry(match_id).or_default().clone();
    }

    // Forget locks nobody is holding or waiting for.
    pub fn prune(&self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
