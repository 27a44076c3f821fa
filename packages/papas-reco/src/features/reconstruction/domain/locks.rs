//! Per-block consumption state

use std::collections::BTreeMap;

use crate::shared::models::Identifier;

/// Tracks which elements of a block have been consumed
///
/// Scoped to one block reconstruction. Locking is idempotent; an id that is
/// not a member of the block is recorded too, so callers can see what was
/// touched.
#[derive(Debug, Clone, Default)]
pub struct LockMap {
    locked: BTreeMap<Identifier, bool>,
}

impl LockMap {
    /// Every id starts unlocked
    pub fn new(ids: &[Identifier]) -> Self {
        Self {
            locked: ids.iter().map(|&id| (id, false)).collect(),
        }
    }

    pub fn lock(&mut self, id: Identifier) {
        self.locked.insert(id, true);
    }

    pub fn is_locked(&self, id: Identifier) -> bool {
        self.locked.get(&id).copied().unwrap_or(false)
    }

    /// Unlocked ids, ascending
    pub fn unlocked(&self) -> Vec<Identifier> {
        self.locked
            .iter()
            .filter(|&(_, &locked)| !locked)
            .map(|(&id, _)| id)
            .collect()
    }

    pub fn locked_count(&self) -> usize {
        self.locked.values().filter(|&&locked| locked).count()
    }
}
