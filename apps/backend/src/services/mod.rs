pub mod game_locks;
pub mod game_players;
pub mod games;
pub mod scenarios;
pub mod users;

pub use game_locks::GameLocks;
pub use game_players::GamePlayersService;
pub use games::GameService;
pub use scenarios::ScenarioService;
pub use users::UserService;
