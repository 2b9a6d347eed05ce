//! Which users play which characters of a game, and whether the game is
//! still recruiting.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::ids::{CharacterId, GameId, UserId};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GamePlayersRecord")]
pub struct GamePlayers {
    game: GameId,
    recruiting: bool,
    users: BTreeMap<CharacterId, UserId>,
}

/// Stored shape of [`GamePlayers`], checked through [`GamePlayers::new`].
#[derive(Deserialize)]
struct GamePlayersRecord {
    game: GameId,
    recruiting: bool,
    users: BTreeMap<CharacterId, UserId>,
}

impl TryFrom<GamePlayersRecord> for GamePlayers {
    type Error = DomainError;

    fn try_from(record: GamePlayersRecord) -> Result<Self, Self::Error> {
        GamePlayers::new(record.game, record.recruiting, record.users)
    }
}

impl GamePlayers {
    /// Build a record, rejecting maps in which one user plays two characters.
    pub fn new(
        game: GameId,
        recruiting: bool,
        users: BTreeMap<CharacterId, UserId>,
    ) -> Result<Self, DomainError> {
        let distinct: BTreeSet<&UserId> = users.values().collect();
        if distinct.len() != users.len() {
            return Err(DomainError::validation(
                "a user may play at most one character of a game",
            ));
        }
        Ok(Self {
            game,
            recruiting,
            users,
        })
    }

    /// The record of a known game that nobody has joined yet.
    pub fn virtual_default(game: GameId) -> Self {
        Self {
            game,
            recruiting: true,
            users: BTreeMap::new(),
        }
    }

    pub fn game(&self) -> &GameId {
        &self.game
    }

    pub fn is_recruiting(&self) -> bool {
        self.recruiting
    }

    pub fn users(&self) -> &BTreeMap<CharacterId, UserId> {
        &self.users
    }

    pub fn is_played(&self, character: &CharacterId) -> bool {
        self.users.contains_key(character)
    }

    /// The character played by `user`, if any.
    pub fn character_of(&self, user: &UserId) -> Option<CharacterId> {
        self.users
            .iter()
            .find(|(_, u)| *u == user)
            .map(|(character, _)| *character)
    }

    /// Assign `character` to `user`.
    ///
    /// Re-assigning the character a user already plays is accepted.
    pub fn add_user(&mut self, character: CharacterId, user: UserId) -> Result<(), DomainError> {
        if !self.recruiting {
            return Err(DomainError::illegal_game_state(
                "Game not recruiting players",
            ));
        }
        if self.users.get(&character) != Some(&user) && self.character_of(&user).is_some() {
            return Err(DomainError::validation(
                "User already present with a different character",
            ));
        }
        self.users.insert(character, user);
        Ok(())
    }

    /// One-way: recruitment never reopens.
    pub fn end_recruitment(&mut self) {
        self.recruiting = false;
    }

    /// View of this record restricted to the entries played by `user`.
    ///
    /// When anything was hidden the view also reports the game as not
    /// recruiting, so a non-manager learns nothing about other players.
    pub fn filtered_for(&self, user: &UserId) -> GamePlayers {
        let users: BTreeMap<CharacterId, UserId> = self
            .users
            .iter()
            .filter(|(_, u)| *u == user)
            .map(|(c, u)| (*c, *u))
            .collect();
        if users.len() == self.users.len() {
            self.clone()
        } else {
            GamePlayers {
                game: self.game,
                recruiting: false,
                users,
            }
        }
    }
}
