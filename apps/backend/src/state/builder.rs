use std::sync::Arc;

use tracing::info;

use super::app_state::AppState;
use crate::config::AppConfig;
use crate::db::Repository;
use crate::domain::{Clock, SystemClock};
use crate::errors::domain::DomainError;
use crate::services::{GameLocks, GamePlayersService, GameService, ScenarioService, UserService};

/// Builder for creating AppState instances.
///
/// Anything not supplied falls back to: configuration from the environment,
/// the system clock, the built-in scenario catalog and empty in-memory stores.
#[derive(Default)]
pub struct StateBuilder {
    config: Option<AppConfig>,
    clock: Option<Arc<dyn Clock>>,
    scenarios: Option<ScenarioService>,
    repository: Option<Repository>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }
    pub fn with_scenarios(mut self, scenarios: ScenarioService) -> Self {
        self.scenarios = Some(scenarios);
        self
    }
    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn build(self) -> Result<AppState, DomainError> {
        let config = match self.config {
            Some(config) => config,
            None => AppConfig::from_env()?,
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let scenarios = match self.scenarios {
            Some(scenarios) => scenarios,
            None => ScenarioService::with_default_scenario()?,
        };
        let repository = self.repository.unwrap_or_else(Repository::in_memory);

        let users = UserService::new(repository.clone());
        let games = GameService::new(clock, scenarios.clone(), repository.clone());
        let game_players = GamePlayersService::new(
            games.clone(),
            users.clone(),
            scenarios.clone(),
            repository.clone(),
            Arc::new(GameLocks::new(config.recruitment_locking)),
        );
        info!(locking = ?config.recruitment_locking, "application state built");

        Ok(AppState {
            config,
            repository,
            scenarios,
            users,
            games,
            game_players,
        })
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
