//! Builders for services wired over in-memory stores.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use backend_test_support::unique_helpers::unique_username;
use mc_backend::config::RecruitmentLocking;
use mc_backend::domain::{
    Authority, CharacterId, Clock, NamedId, NewUser, Scenario, ScenarioId, UserId,
};
use mc_backend::{build_state, AppConfig, AppState, Repository, ScenarioService};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

/// A clock that advances one millisecond per reading, so every created game
/// gets a distinct id.
#[derive(Debug)]
pub struct SteppingClock {
    start: OffsetDateTime,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub fn new(start: OffsetDateTime) -> Self {
        Self {
            start,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::new(datetime!(2026-01-01 00:00 UTC))
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> OffsetDateTime {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::milliseconds(tick)
    }
}

/// A scenario with `slots` characters named `Character 0..slots`.
pub fn scenario_with_slots(slots: usize) -> Scenario {
    let characters = (0..slots)
        .map(|i| NamedId::new(CharacterId::new_random(), format!("Character {i}")).unwrap())
        .collect();
    Scenario::new(
        NamedId::new(ScenarioId::new_random(), format!("{slots} slot scenario")).unwrap(),
        "test scenario",
        characters,
    )
    .unwrap()
}

pub struct TestApp {
    pub state: AppState,
    pub scenario: Scenario,
}

impl TestApp {
    pub fn new(scenario: Scenario) -> Self {
        Self::with_repository(scenario, Repository::in_memory())
    }

    pub fn with_repository(scenario: Scenario, repository: Repository) -> Self {
        let state = build_state()
            .with_config(AppConfig {
                recruitment_locking: RecruitmentLocking::PerGame,
            })
            .with_clock(Arc::new(SteppingClock::default()))
            .with_scenarios(ScenarioService::new([scenario.clone()]))
            .with_repository(repository)
            .build()
            .expect("state builds");
        Self { state, scenario }
    }

    /// Fixture over the two-character scenario.
    pub fn two_slots() -> Self {
        Self::new(scenario_with_slots(2))
    }

    pub fn scenario_id(&self) -> ScenarioId {
        self.scenario.id()
    }

    /// Character ids in assignment order.
    pub fn characters(&self) -> Vec<CharacterId> {
        self.scenario.characters().iter().map(|c| c.id()).collect()
    }

    pub fn player(&self, prefix: &str) -> UserId {
        self.user_with(prefix, [Authority::Player])
    }

    pub fn user_with(&self, prefix: &str, authorities: impl IntoIterator<Item = Authority>) -> UserId {
        self.state
            .users
            .add(NewUser::new(unique_username(prefix), authorities))
            .expect("user added")
            .id
    }

    pub fn new_game(&self) -> mc_backend::domain::GameId {
        *self
            .state
            .games
            .create(self.scenario_id())
            .expect("game created")
            .identifier()
    }
}
