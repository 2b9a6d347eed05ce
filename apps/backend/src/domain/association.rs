use serde::{Deserialize, Serialize};

use super::ids::{GameId, UserId};

/// The game a user is currently playing.
///
/// Stored keyed by the user's id; at most one per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserGameAssociation {
    pub user: UserId,
    pub game: GameId,
}

impl UserGameAssociation {
    pub fn new(user: UserId, game: GameId) -> Self {
        Self { user, game }
    }
}
