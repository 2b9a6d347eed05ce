use crate::config::AppConfig;
use crate::db::Repository;
use crate::services::{GamePlayersService, GameService, ScenarioService, UserService};

/// Application state containing the wired services
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub repository: Repository,
    pub scenarios: ScenarioService,
    pub users: UserService,
    pub games: GameService,
    pub game_players: GamePlayersService,
}
