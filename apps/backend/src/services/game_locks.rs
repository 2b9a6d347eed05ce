//! Per-game serialization of recruitment changes.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::config::RecruitmentLocking;
use crate::domain::GameId;

/// One mutex per game id, present only while some caller holds or waits on it.
///
/// Only serializes callers within this process.
#[derive(Debug, Default)]
pub struct GameLocks {
    mode: RecruitmentLocking,
    locks: DashMap<GameId, Arc<Mutex<()>>>,
}

impl GameLocks {
    pub fn new(mode: RecruitmentLocking) -> Self {
        Self {
            mode,
            locks: DashMap::new(),
        }
    }

    pub fn mode(&self) -> RecruitmentLocking {
        self.mode
    }

    /// Run `f` while holding the lock of `game`.
    pub fn with_game_lock<R>(&self, game: &GameId, f: impl FnOnce() -> R) -> R {
        match self.mode {
            RecruitmentLocking::None => f(),
            RecruitmentLocking::PerGame => {
                // Clone out of the map so the shard guard is released before blocking.
                let lock = self
                    .locks
                    .entry(*game)
                    .or_insert_with(|| Arc::new(Mutex::new(())))
                    .value()
                    .clone();
                let result = {
                    let _guard = lock.lock();
                    f()
                };
                drop(lock);
                // Last holder out removes the entry.
                self.locks
                    .remove_if(game, |_, held| Arc::strong_count(held) == 1);
                result
            }
        }
    }
}
