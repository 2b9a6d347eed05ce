use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::UserId;

/// Username reserved for the built-in administrator.
pub const ADMINISTRATOR_USERNAME: &str = "Administrator";

/// Id of the built-in administrator.
pub const ADMINISTRATOR_ID: UserId = UserId(Uuid::nil());

static ADMINISTRATOR: Lazy<User> = Lazy::new(|| User {
    id: ADMINISTRATOR_ID,
    username: ADMINISTRATOR_USERNAME.to_string(),
    authorities: Authority::ALL.into_iter().collect(),
});

/// Permissions a user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Authority {
    /// May join games as a player.
    Player,
    ManageUsers,
    ManageGames,
}

impl Authority {
    pub const ALL: [Authority; 3] = [
        Authority::Player,
        Authority::ManageUsers,
        Authority::ManageGames,
    ];
}

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub authorities: BTreeSet<Authority>,
}

impl User {
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        authorities: impl IntoIterator<Item = Authority>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            authorities: authorities.into_iter().collect(),
        }
    }

    /// The built-in administrator, holding every authority.
    pub fn administrator() -> &'static User {
        &ADMINISTRATOR
    }

    pub fn has_authority(&self, authority: Authority) -> bool {
        self.authorities.contains(&authority)
    }
}

/// Details of a user to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub authorities: BTreeSet<Authority>,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        authorities: impl IntoIterator<Item = Authority>,
    ) -> Self {
        Self {
            username: username.into(),
            authorities: authorities.into_iter().collect(),
        }
    }
}
