use std::env;

use crate::errors::domain::DomainError;

/// Environment variable selecting how recruitment is serialized.
pub const RECRUITMENT_LOCKING_VAR: &str = "MC_RECRUITMENT_LOCKING";

/// How concurrent changes to one game's players are serialized in-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecruitmentLocking {
    /// Joins and recruitment closure for one game run one at a time.
    #[default]
    PerGame,
    /// No in-process serialization; the backing store must arbitrate.
    None,
}

impl RecruitmentLocking {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "per-game" | "per_game" => Some(Self::PerGame),
            "none" | "off" => Some(Self::None),
            _ => None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub recruitment_locking: RecruitmentLocking,
}

impl AppConfig {
    /// Read the configuration from the environment; unset variables take
    /// their defaults.
    pub fn from_env() -> Result<Self, DomainError> {
        let recruitment_locking = match optional_var(RECRUITMENT_LOCKING_VAR) {
            Some(value) => RecruitmentLocking::parse(&value).ok_or_else(|| {
                DomainError::validation(format!(
                    "Environment variable '{RECRUITMENT_LOCKING_VAR}' must be 'per-game' or 'none', but got: '{value}'"
                ))
            })?,
            None => RecruitmentLocking::default(),
        };
        Ok(Self {
            recruitment_locking,
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
