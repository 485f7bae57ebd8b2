// External write policy. Runs before a mutating call reaches the ledger.
use std::collections::HashSet;

use crate::logic::{registration::Actor, types::PlayerId};

pub trait WriteGuard: Send + Sync {
    // Err carries the reason for the veto.
    fn check(&self, actor: &Actor) -> Result<(), String>;
}

pub struct AllowAll;

impl WriteGuard for AllowAll {
    fn check(&self, _actor: &Actor) -> Result<(), String> {
        Ok(())
    }
}

// Accounts that may look but not touch, such as a public demo login.
#[derive(Debug)]
#[derive(Default, Clone)]
pub struct ProtectedAccounts {
    ids: HashSet<PlayerId>,
}

impl ProtectedAccounts {
    pub fn build(ids: impl IntoIterator<Item = PlayerId>) -> Self {
        Self { ids: ids.into_iter().collect() }
    }
}

impl WriteGuard for ProtectedAccounts {
    fn check(&self, actor: &Actor) -> Result<(), String> {
        match actor.id() {
            Some(id) if self.ids.contains(&id) => Err(format!("account {id} is read-only")),
            _ => Ok(()),
        }
    }
}
