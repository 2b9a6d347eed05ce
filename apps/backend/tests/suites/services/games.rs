use std::sync::Arc;

use mc_backend::domain::{FixedClock, GameId, RunState, ScenarioId};
use mc_backend::errors::domain::NotFoundKind;
use mc_backend::{build_state, AppConfig, DomainError, ScenarioService};
use time::macros::datetime;

use crate::support::factory::{scenario_with_slots, TestApp};

#[test]
fn create_then_get_round_trips_with_millisecond_instant() {
    let scenario = scenario_with_slots(2);
    let state = build_state()
        .with_config(AppConfig::default())
        .with_clock(Arc::new(FixedClock(datetime!(2026-09-09 09:09:09.987654321 UTC))))
        .with_scenarios(ScenarioService::new([scenario.clone()]))
        .build()
        .unwrap();

    let game = state.games.create(scenario.id()).unwrap();

    assert_eq!(
        game.identifier().created(),
        datetime!(2026-09-09 09:09:09.987 UTC)
    );
    assert_eq!(state.games.get_now(), game.identifier().created());
    assert_eq!(state.games.get_game(game.identifier()).unwrap(), Some(game));
}

#[test]
fn creation_times_are_filtered_by_scenario() {
    let app = TestApp::two_slots();
    let first = app.new_game();
    let second = app.new_game();

    let times = app
        .state
        .games
        .get_creation_times_of_games_of_scenario(&app.scenario_id())
        .unwrap();
    assert_eq!(
        times.into_iter().collect::<Vec<_>>(),
        vec![first.created(), second.created()]
    );
    assert_eq!(
        app.state.games.get_game_identifiers().unwrap().len(),
        2
    );
}

#[test]
fn creation_times_of_unknown_scenario_is_not_found() {
    let app = TestApp::two_slots();
    let err = app
        .state
        .games
        .get_creation_times_of_games_of_scenario(&ScenarioId::new_random())
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Scenario, _)));
}

#[test]
fn unknown_game_with_known_scenario_is_not_found() {
    let app = TestApp::two_slots();
    let missing = GameId::new(app.scenario_id(), datetime!(2019-12-31 23:59 UTC));

    assert_eq!(app.state.games.get_game(&missing).unwrap(), None);
    let err = app.state.games.start_game(&missing).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
}

#[test]
fn stopped_game_cannot_restart() {
    let app = TestApp::two_slots();
    let game = app.new_game();

    app.state.games.stop_game(&game).unwrap();
    assert!(matches!(
        app.state.games.start_game(&game),
        Err(DomainError::IllegalGameState(_))
    ));
    assert_eq!(
        app.state.games.get_game(&game).unwrap().unwrap().run_state(),
        RunState::Stopped
    );
}

#[test]
fn game_created_in_the_same_millisecond_does_not_replace_a_stopped_game() {
    let scenario = scenario_with_slots(2);
    let state = build_state()
        .with_config(AppConfig::default())
        .with_clock(Arc::new(FixedClock(datetime!(2026-09-09 09:09:09.987 UTC))))
        .with_scenarios(ScenarioService::new([scenario.clone()]))
        .build()
        .unwrap();

    let original = *state.games.create(scenario.id()).unwrap().identifier();
    state.games.stop_game(&original).unwrap();
    let next = state.games.create(scenario.id()).unwrap();

    assert_ne!(next.identifier(), &original);
    assert_eq!(next.run_state(), RunState::WaitingToStart);
    assert_eq!(
        state.games.get_game(&original).unwrap().unwrap().run_state(),
        RunState::Stopped
    );
}
