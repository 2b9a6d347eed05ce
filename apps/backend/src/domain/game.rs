use serde::{Deserialize, Serialize};

use super::ids::GameId;

/// Run state of a game.
///
/// `WaitingToStart --start--> Running --stop--> Stopped`, and
/// `WaitingToStart --stop--> Stopped`. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    WaitingToStart,
    Running,
    Stopped,
}

/// A game session created from a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    identifier: GameId,
    run_state: RunState,
}

impl Game {
    pub fn new(identifier: GameId, run_state: RunState) -> Self {
        Self {
            identifier,
            run_state,
        }
    }

    pub fn identifier(&self) -> &GameId {
        &self.identifier
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn set_run_state(&mut self, run_state: RunState) {
        self.run_state = run_state;
    }
}
