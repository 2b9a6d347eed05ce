//! Concurrent joins against one game under per-game locking.

use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};
use std::thread;

use crate::support::factory::{scenario_with_slots, TestApp};

#[test]
fn concurrent_joins_never_share_a_character() {
    let slots = 3;
    let contenders = 8;
    let app = Arc::new(TestApp::new(scenario_with_slots(slots)));
    let game = app.new_game();
    let users: Vec<_> = (0..contenders).map(|i| app.player(&format!("c{i}"))).collect();
    let barrier = Arc::new(Barrier::new(contenders));

    let handles: Vec<_> = users
        .into_iter()
        .map(|user| {
            let app = Arc::clone(&app);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                app.state
                    .game_players
                    .user_joins_game(&user, &game)
                    .ok()
                    .map(|character| (user, character))
            })
        })
        .collect();
    let joined: Vec<_> = handles
        .into_iter()
        .filter_map(|h| h.join().expect("join thread"))
        .collect();

    assert_eq!(joined.len(), slots);
    let characters: BTreeSet<_> = joined.iter().map(|(_, c)| *c).collect();
    assert_eq!(characters.len(), slots);

    let players = app
        .state
        .game_players
        .get_game_players_as_game_manager(&game)
        .unwrap()
        .unwrap();
    assert!(!players.is_recruiting());
    for (user, character) in joined {
        assert_eq!(players.users().get(&character), Some(&user));
    }
}
