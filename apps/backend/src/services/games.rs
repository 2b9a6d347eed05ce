//! Game creation and the run-state machine.

use std::collections::BTreeSet;
use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use super::scenarios::ScenarioService;
use crate::db::{Context, Repository};
use crate::domain::clock::truncate_to_millis;
use crate::domain::{Clock, Game, GameId, RunState, ScenarioId};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Game domain service.
#[derive(Clone)]
pub struct GameService {
    clock: Arc<dyn Clock>,
    scenarios: ScenarioService,
    repository: Repository,
}

impl GameService {
    pub fn new(clock: Arc<dyn Clock>, scenarios: ScenarioService, repository: Repository) -> Self {
        Self {
            clock,
            scenarios,
            repository,
        }
    }

    /// Create a game of the given scenario, waiting to start.
    ///
    /// The game is identified by the scenario and the current instant.
    pub fn create(&self, scenario: ScenarioId) -> Result<Game, DomainError> {
        self.repository.with_context(|ctx| {
            if self.scenarios.get_scenario(ctx, &scenario).is_none() {
                return Err(unknown_scenario(&scenario));
            }
            let id = self.free_game_id(ctx, scenario)?;
            let game = Game::new(id, RunState::WaitingToStart);
            ctx.add_game(game.clone())?;
            info!(game_id = %game.identifier(), "game created");
            Ok(game)
        })
    }

    /// An id for a new game of `scenario` that no stored game uses.
    ///
    /// Starts at the current instant and steps forward a millisecond at a
    /// time past existing games.
    fn free_game_id(
        &self,
        context: &mut Context,
        scenario: ScenarioId,
    ) -> Result<GameId, DomainError> {
        let mut id = GameId::new(scenario, self.get_now());
        while context.find_game(&id)?.is_some() {
            debug!(game_id = %id, "game id taken; stepping creation instant");
            id = GameId::new(scenario, id.created() + Duration::milliseconds(1));
        }
        Ok(id)
    }

    /// The current instant, at the precision game ids are minted with.
    pub fn get_now(&self) -> OffsetDateTime {
        truncate_to_millis(self.clock.now())
    }

    pub fn get_game(&self, id: &GameId) -> Result<Option<Game>, DomainError> {
        self.repository.with_context(|ctx| self.get_game_in(ctx, id))
    }

    pub(crate) fn get_game_in(
        &self,
        context: &mut Context,
        id: &GameId,
    ) -> Result<Option<Game>, DomainError> {
        Ok(context.find_game(id)?.map(|tracked| tracked.into_value()))
    }

    pub fn get_game_identifiers(&self) -> Result<BTreeSet<GameId>, DomainError> {
        self.repository
            .with_context(|ctx| self.get_game_identifiers_in(ctx))
    }

    pub(crate) fn get_game_identifiers_in(
        &self,
        context: &mut Context,
    ) -> Result<BTreeSet<GameId>, DomainError> {
        context.find_all_game_identifiers()
    }

    /// Creation instants of every game of `scenario`.
    pub fn get_creation_times_of_games_of_scenario(
        &self,
        scenario: &ScenarioId,
    ) -> Result<BTreeSet<OffsetDateTime>, DomainError> {
        self.repository.with_context(|ctx| {
            if self.scenarios.get_scenario(ctx, scenario).is_none() {
                return Err(unknown_scenario(scenario));
            }
            Ok(self
                .get_game_identifiers_in(ctx)?
                .into_iter()
                .filter(|id| id.scenario() == *scenario)
                .map(|id| id.created())
                .collect())
        })
    }

    /// Start a game that is waiting to start; starting a running game does
    /// nothing.
    pub fn start_game(&self, id: &GameId) -> Result<Game, DomainError> {
        self.transition(id, |state| match state {
            RunState::WaitingToStart => Ok(Some(RunState::Running)),
            RunState::Running => Ok(None),
            RunState::Stopped => Err(DomainError::illegal_game_state(format!(
                "game {id} is stopped"
            ))),
        })
    }

    /// Stop a game; stopping a stopped game does nothing.
    pub fn stop_game(&self, id: &GameId) -> Result<Game, DomainError> {
        self.transition(id, |state| match state {
            RunState::WaitingToStart | RunState::Running => Ok(Some(RunState::Stopped)),
            RunState::Stopped => Ok(None),
        })
    }

    fn transition<F>(&self, id: &GameId, next: F) -> Result<Game, DomainError>
    where
        F: FnOnce(RunState) -> Result<Option<RunState>, DomainError>,
    {
        self.repository.with_context(|ctx| {
            let tracked = ctx
                .find_game(id)?
                .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("game {id}")))?;
            let mut game = tracked.value;
            let from = game.run_state();
            match next(from)? {
                Some(to) => {
                    game.set_run_state(to);
                    ctx.update_game(&tracked.handle, game.clone())?;
                    info!(game_id = %id, ?from, ?to, "game run state changed");
                }
                None => debug!(game_id = %id, state = ?from, "game run state unchanged"),
            }
            Ok(game)
        })
    }
}

fn unknown_scenario(id: &ScenarioId) -> DomainError {
    DomainError::not_found(NotFoundKind::Scenario, format!("scenario {id}"))
}
