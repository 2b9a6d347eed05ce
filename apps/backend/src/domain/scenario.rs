//! Read-only scenario definitions.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::ids::{CharacterId, ScenarioId};
use crate::errors::domain::DomainError;

/// Longest permitted title, in characters.
pub const MAX_TITLE_LEN: usize = 64;

/// An identifier paired with a human-readable title.
///
/// Equality is by id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedId<I> {
    id: I,
    title: String,
}

impl<I: Copy> NamedId<I> {
    pub fn new(id: I, title: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        if !is_valid_title(&title) {
            return Err(DomainError::validation(format!(
                "invalid title {title:?}: must be 1 to {MAX_TITLE_LEN} characters"
            )));
        }
        Ok(Self { id, title })
    }

    pub fn id(&self) -> I {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl<I: PartialEq> PartialEq for NamedId<I> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<I: Eq> Eq for NamedId<I> {}

impl<I: Hash> Hash for NamedId<I> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

pub fn is_valid_title(text: &str) -> bool {
    let length = text.chars().count();
    0 < length && length <= MAX_TITLE_LEN
}

/// A scenario: the template games are created from.
///
/// The order of `characters` is the order in which joining players are
/// assigned them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    identifier: NamedId<ScenarioId>,
    description: String,
    characters: Vec<NamedId<CharacterId>>,
}

impl Scenario {
    pub fn new(
        identifier: NamedId<ScenarioId>,
        description: impl Into<String>,
        characters: Vec<NamedId<CharacterId>>,
    ) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(characters.len());
        if !characters.iter().all(|c| seen.insert(c.id())) {
            return Err(DomainError::validation(
                "scenario characters must have distinct ids",
            ));
        }
        Ok(Self {
            identifier,
            description: description.into(),
            characters,
        })
    }

    pub fn id(&self) -> ScenarioId {
        self.identifier.id()
    }

    pub fn identifier(&self) -> &NamedId<ScenarioId> {
        &self.identifier
    }

    pub fn title(&self) -> &str {
        self.identifier.title()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Character slots in selection priority order.
    pub fn characters(&self) -> &[NamedId<CharacterId>] {
        &self.characters
    }
}

impl PartialEq for Scenario {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Scenario {}
