//! Domain layer: session, player and scenario types.

pub mod association;
pub mod clock;
pub mod game;
pub mod game_players;
pub mod ids;
pub mod scenario;
pub mod user;

pub use association::UserGameAssociation;
pub use clock::{Clock, FixedClock, SystemClock};
pub use game::{Game, RunState};
pub use game_players::GamePlayers;
pub use ids::{CharacterId, GameId, ScenarioId, UserId};
pub use scenario::{NamedId, Scenario};
pub use user::{Authority, NewUser, User};
