//! Property tests for recruitment over random join/close sequences.

use std::collections::{BTreeMap, BTreeSet};

use mc_backend::domain::{GameId, UserId};
use proptest::prelude::*;

use crate::support::factory::{scenario_with_slots, TestApp};

const USERS: usize = 6;
const GAMES: usize = 3;
const SLOTS: usize = 3;

#[derive(Debug, Clone)]
enum Op {
    Join { user: usize, game: usize },
    EndRecruitment { game: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..USERS, 0..GAMES).prop_map(|(user, game)| Op::Join { user, game }),
        1 => (0..GAMES).prop_map(|game| Op::EndRecruitment { game }),
    ]
}

struct World {
    app: TestApp,
    users: Vec<UserId>,
    games: Vec<GameId>,
}

fn world() -> World {
    let app = TestApp::new(scenario_with_slots(SLOTS));
    let users = (0..USERS).map(|i| app.player(&format!("p{i}"))).collect();
    let games = (0..GAMES).map(|_| app.new_game()).collect();
    World { app, users, games }
}

fn run(world: &World, ops: &[Op]) {
    let service = &world.app.state.game_players;
    for op in ops {
        // Failures are expected outcomes here; only the resulting state matters.
        match *op {
            Op::Join { user, game } => {
                let _ = service.user_joins_game(&world.users[user], &world.games[game]);
            }
            Op::EndRecruitment { game } => {
                let _ = service.end_recruitment(&world.games[game]);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Every user is in at most one game, and exactly in the game their
    /// current-game association names.
    #[test]
    fn prop_single_current_game(ops in prop::collection::vec(op(), 0..24)) {
        let world = world();
        run(&world, &ops);
        let service = &world.app.state.game_players;

        let mut seen_in: BTreeMap<UserId, Vec<GameId>> = BTreeMap::new();
        for game in &world.games {
            let players = service.get_game_players_as_game_manager(game).unwrap().unwrap();
            let distinct: BTreeSet<&UserId> = players.users().values().collect();
            prop_assert_eq!(distinct.len(), players.users().len());
            prop_assert!(players.users().len() <= SLOTS);
            for user in players.users().values() {
                seen_in.entry(*user).or_default().push(*game);
            }
        }

        for user in &world.users {
            let current = service.get_current_game_of_user(user).unwrap();
            let games = seen_in.remove(user).unwrap_or_default();
            prop_assert!(games.len() <= 1);
            prop_assert_eq!(current, games.first().copied());
        }
    }

    /// A non-manager's view never contains another user's entry.
    #[test]
    fn prop_redaction_never_leaks(ops in prop::collection::vec(op(), 0..24)) {
        let world = world();
        run(&world, &ops);
        let service = &world.app.state.game_players;

        for game in &world.games {
            let full = service.get_game_players_as_game_manager(game).unwrap().unwrap();
            for user in &world.users {
                let view = service
                    .get_game_players_as_non_game_manager(game, user)
                    .unwrap()
                    .unwrap();
                prop_assert!(view.users().values().all(|u| u == user));
                for (character, u) in view.users() {
                    prop_assert_eq!(full.users().get(character), Some(u));
                }
                if view.users().len() < full.users().len() {
                    prop_assert!(!view.is_recruiting());
                }
            }
        }
    }

    /// Recruitment closes exactly when the last slot is taken, unless it was
    /// closed explicitly first.
    #[test]
    fn prop_full_games_stop_recruiting(ops in prop::collection::vec(op(), 0..24)) {
        let world = world();
        run(&world, &ops);
        let service = &world.app.state.game_players;

        for game in &world.games {
            let players = service.get_game_players_as_game_manager(game).unwrap().unwrap();
            if players.users().len() == SLOTS {
                prop_assert!(!players.is_recruiting());
            }
        }
    }
}
