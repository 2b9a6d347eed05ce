//! Read-through and identity caching within one context.

use mc_backend::domain::{Game, GameId, GamePlayers, RunState, ScenarioId, UserGameAssociation, UserId};
use mc_backend::errors::domain::ContextErrorKind;
use mc_backend::repos::KeyValueStore;
use mc_backend::DomainError;
use time::macros::datetime;

use crate::support::stores::CountingStores;

fn stored_game(stores: &CountingStores, minute: u8) -> Game {
    let created = datetime!(2026-03-03 03:00 UTC) + time::Duration::minutes(i64::from(minute));
    let game = Game::new(GameId::new(ScenarioId::new_random(), created), RunState::WaitingToStart);
    stores.games.save(game.identifier(), &game).unwrap();
    game
}

#[test]
fn present_id_is_fetched_once_per_context() {
    let stores = CountingStores::new();
    let game = stored_game(&stores, 0);
    let finds = stores.games.counts.finds();
    let mut ctx = stores.repository().open_context();

    for _ in 0..3 {
        let found = ctx.find_game(game.identifier()).unwrap().unwrap();
        assert_eq!(found.value, game);
    }
    assert_eq!(stores.games.counts.finds() - finds, 1);

    // A new context starts cold.
    let mut next = stores.repository().open_context();
    next.find_game(game.identifier()).unwrap();
    assert_eq!(stores.games.counts.finds() - finds, 2);
}

#[test]
fn reads_see_earlier_writes_in_the_same_context() {
    let stores = CountingStores::new();
    let game = stored_game(&stores, 0);
    let mut ctx = stores.repository().open_context();

    let tracked = ctx.find_game(game.identifier()).unwrap().unwrap();
    let mut running = tracked.value.clone();
    running.set_run_state(RunState::Running);
    ctx.update_game(&tracked.handle, running.clone()).unwrap();

    assert_eq!(ctx.find_game(game.identifier()).unwrap().unwrap().value, running);
    assert_eq!(
        stores.games.find(game.identifier()).unwrap().unwrap().run_state(),
        RunState::WaitingToStart
    );
    assert_eq!(ctx.find_game(game.identifier()).unwrap().unwrap().handle, tracked.handle);
}

#[test]
fn all_game_identifiers_are_a_per_context_snapshot() {
    let stores = CountingStores::new();
    let first = stored_game(&stores, 0);
    let mut ctx = stores.repository().open_context();

    let ids = ctx.find_all_game_identifiers().unwrap();
    assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![*first.identifier()]);

    let second = stored_game(&stores, 1);
    let ids = ctx.find_all_game_identifiers().unwrap();
    assert!(!ids.contains(second.identifier()));
    assert_eq!(stores.games.counts.find_alls(), 1);

    // Games added in the context are included.
    let third = Game::new(
        GameId::new(ScenarioId::new_random(), datetime!(2026-03-04 00:00 UTC)),
        RunState::WaitingToStart,
    );
    ctx.add_game(third.clone()).unwrap();
    let ids = ctx.find_all_game_identifiers().unwrap();
    assert!(ids.contains(third.identifier()));
    assert_eq!(ids.len(), 2);

    let mut fresh = stores.repository().open_context();
    assert!(fresh.find_all_game_identifiers().unwrap().contains(second.identifier()));
}

#[test]
fn loaded_games_are_served_from_cache() {
    let stores = CountingStores::new();
    let game = stored_game(&stores, 0);
    let mut ctx = stores.repository().open_context();
    ctx.find_all_game_identifiers().unwrap();
    let finds = stores.games.counts.finds();

    assert!(ctx.find_game(game.identifier()).unwrap().is_some());
    assert_eq!(stores.games.counts.finds(), finds);
}

#[test]
fn adding_a_tracked_id_is_rejected() {
    let stores = CountingStores::new();
    let game = stored_game(&stores, 0);
    let mut ctx = stores.repository().open_context();
    ctx.find_game(game.identifier()).unwrap();

    let err = ctx.add_game(game.clone()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Context(ContextErrorKind::AlreadyPresent, _)
    ));

    let user = UserId::new_random();
    let association = UserGameAssociation::new(user, *game.identifier());
    ctx.add_current_user_game(association).unwrap();
    assert!(matches!(
        ctx.add_current_user_game(association),
        Err(DomainError::Context(ContextErrorKind::AlreadyPresent, _))
    ));
}

#[test]
fn handles_do_not_cross_contexts() {
    let stores = CountingStores::new();
    let game = stored_game(&stores, 0);
    let repository = stores.repository();
    let mut first = repository.open_context();
    let mut second = repository.open_context();

    let players = GamePlayers::virtual_default(*game.identifier());
    let handle = first.add_game_players(players.clone()).unwrap();
    second.add_game_players(players.clone()).unwrap();

    assert!(matches!(
        second.update_game_players(&handle, players),
        Err(DomainError::Context(ContextErrorKind::NotPresent, _))
    ));
}
