//! Identifier newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Fresh random (v4) identifier.
            pub fn new_random() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(
    /// Identifies a registered user.
    UserId
);
uuid_id!(
    /// Identifies a scenario in the catalog.
    ScenarioId
);
uuid_id!(
    /// Identifies a character slot within a scenario.
    CharacterId
);

/// Identifies a game: the scenario it was created from plus its creation
/// instant (millisecond precision, UTC).
///
/// Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId {
    scenario: ScenarioId,
    created: OffsetDateTime,
}

impl GameId {
    pub fn new(scenario: ScenarioId, created: OffsetDateTime) -> Self {
        Self { scenario, created }
    }

    pub fn scenario(&self) -> ScenarioId {
        self.scenario
    }

    pub fn created(&self) -> OffsetDateTime {
        self.created
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.scenario, self.created)
    }
}
