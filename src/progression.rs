//! Level progression: which level is next and how much reward is banked.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::store::{LEVEL_KEY, ProgressStore, REWARD_KEY, StoreError};

/// Reward granted for each completed level.
pub const LEVEL_REWARD: u32 = 15;

/// Progression counters for a play session.
///
/// Threaded explicitly through the session rather than held in globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressionState {
    current_level_index: usize,
    total_reward: u64,
}

impl ProgressionState {
    /// Creates a state at the given level and reward.
    pub fn new(current_level_index: usize, total_reward: u64) -> Self {
        Self {
            current_level_index,
            total_reward,
        }
    }

    /// Index of the level to play.
    pub fn current_level_index(&self) -> usize {
        self.current_level_index
    }

    /// Reward accumulated across completions.
    pub fn total_reward(&self) -> u64 {
        self.total_reward
    }

    /// Records a completed level and returns the new state.
    ///
    /// Advances to the next level, wrapping to 0 after the last of
    /// `level_count` levels, and banks `reward`.
    #[instrument(skip(self), fields(level = self.current_level_index, total = self.total_reward))]
    pub fn on_level_complete(&mut self, reward: u32, level_count: usize) -> Self {
        let next = self.current_level_index + 1;
        self.current_level_index = if next >= level_count { 0 } else { next };
        self.total_reward = self.total_reward.saturating_add(u64::from(reward));
        info!(
            next_level = self.current_level_index,
            total_reward = self.total_reward,
            "Level complete"
        );
        *self
    }

    /// Reads progression from `store`, defaulting to level 0 with no reward.
    ///
    /// A stored index beyond the catalog wraps onto a defined level.
    #[instrument(skip(store))]
    pub fn load(store: &impl ProgressStore, level_count: usize) -> Result<Self, StoreError> {
        let raw_index = store.get_int_or(LEVEL_KEY, 0)?;
        let raw_reward = store.get_int_or(REWARD_KEY, 0)?;

        let count = level_count.max(1) as i64;
        let index = raw_index.rem_euclid(count) as usize;
        if index as i64 != raw_index {
            warn!(raw_index, index, "Stored level index out of range, wrapped");
        }

        let reward = u64::try_from(raw_reward).unwrap_or_else(|_| {
            warn!(raw_reward, "Stored reward negative, reset to 0");
            0
        });

        Ok(Self::new(index, reward))
    }

    /// Writes progression back to `store`.
    #[instrument(skip(store))]
    pub fn save(&self, store: &mut impl ProgressStore) -> Result<(), StoreError> {
        let index = i64::try_from(self.current_level_index)
            .map_err(|_| StoreError::new("Level index does not fit the store"))?;
        let reward = i64::try_from(self.total_reward)
            .map_err(|_| StoreError::new("Reward does not fit the store"))?;
        store.set_int(LEVEL_KEY, index)?;
        store.set_int(REWARD_KEY, reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_completion_advances_and_rewards() {
        let mut state = ProgressionState::default();
        let next = state.on_level_complete(LEVEL_REWARD, 3);
        assert_eq!(next.current_level_index(), 1);
        assert_eq!(next.total_reward(), 15);
        assert_eq!(state, next);
    }

    #[test]
    fn test_wraps_after_last_level() {
        let mut state = ProgressionState::new(2, 30);
        state.on_level_complete(LEVEL_REWARD, 3);
        assert_eq!(state.current_level_index(), 0);
        assert_eq!(state.total_reward(), 45);
    }

    #[test]
    fn test_single_level_catalog_stays_at_zero() {
        let mut state = ProgressionState::default();
        state.on_level_complete(LEVEL_REWARD, 1);
        state.on_level_complete(LEVEL_REWARD, 1);
        assert_eq!(state.current_level_index(), 0);
        assert_eq!(state.total_reward(), 30);
    }

    #[test]
    fn test_load_defaults() {
        let state = ProgressionState::load(&MemoryStore::new(), 5).unwrap();
        assert_eq!(state, ProgressionState::new(0, 0));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        ProgressionState::new(3, 90).save(&mut store).unwrap();
        assert_eq!(ProgressionState::load(&store, 5).unwrap(), ProgressionState::new(3, 90));
    }

    #[test]
    fn test_load_wraps_stale_index() {
        let mut store = MemoryStore::new();
        store.set_int(LEVEL_KEY, 7).unwrap();
        store.set_int(REWARD_KEY, -4).unwrap();
        let state = ProgressionState::load(&store, 5).unwrap();
        assert_eq!(state.current_level_index(), 2);
        assert_eq!(state.total_reward(), 0);
    }
}
