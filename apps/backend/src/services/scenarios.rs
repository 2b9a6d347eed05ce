//! Read-only scenario catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::Context;
use crate::domain::{CharacterId, NamedId, Scenario, ScenarioId};
use crate::errors::domain::DomainError;

pub const DEFAULT_SCENARIO_TITLE: &str = "Section assault";
pub const DEFAULT_SCENARIO_DESCRIPTION: &str = "Basic fire and movement tactics.";
pub const DEFAULT_CHARACTER_TITLES: [&str; 2] = ["Lt. Winters", "Sgt. Summer"];

/// The scenarios games can be created from.
#[derive(Debug, Clone)]
pub struct ScenarioService {
    scenarios: Arc<BTreeMap<ScenarioId, Scenario>>,
}

impl ScenarioService {
    pub fn new(scenarios: impl IntoIterator<Item = Scenario>) -> Self {
        let scenarios = scenarios.into_iter().map(|s| (s.id(), s)).collect();
        Self {
            scenarios: Arc::new(scenarios),
        }
    }

    /// Catalog holding only the built-in section assault scenario.
    pub fn with_default_scenario() -> Result<Self, DomainError> {
        Ok(Self::new([default_scenario()?]))
    }

    pub fn get_scenario(&self, _context: &Context, id: &ScenarioId) -> Option<Scenario> {
        self.scenarios.get(id).cloned()
    }

    pub fn get_scenario_identifiers<'a>(
        &'a self,
        _context: &Context,
    ) -> impl Iterator<Item = ScenarioId> + 'a {
        self.scenarios.keys().copied()
    }

    pub fn get_named_scenario_identifiers(&self) -> Vec<NamedId<ScenarioId>> {
        self.scenarios
            .values()
            .map(|s| s.identifier().clone())
            .collect()
    }
}

/// Built-in scenario; ids are fresh on every call.
pub fn default_scenario() -> Result<Scenario, DomainError> {
    let characters = DEFAULT_CHARACTER_TITLES
        .iter()
        .map(|title| NamedId::new(CharacterId::new_random(), *title))
        .collect::<Result<Vec<_>, _>>()?;
    Scenario::new(
        NamedId::new(ScenarioId::new_random(), DEFAULT_SCENARIO_TITLE)?,
        DEFAULT_SCENARIO_DESCRIPTION,
        characters,
    )
}
