#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Game-session core: games created from scenarios, recruitment of players
//! into scenario characters, and the unit of work these run inside.

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod repos;
pub mod services;
pub mod state;

// Re-exports for public API
pub use config::{AppConfig, RecruitmentLocking};
pub use db::{Context, Handle, Repository, Tracked};
pub use errors::{DomainError, ErrorCode};
pub use services::{GamePlayersService, GameService, ScenarioService, UserService};
pub use state::{build_state, AppState, StateBuilder};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
