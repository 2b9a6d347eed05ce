pub mod context;
pub mod tracked;

use std::sync::Arc;

pub use context::Context;
pub use tracked::{Handle, Tracked};

use crate::adapters::InMemoryStore;
use crate::domain::{Game, GameId, GamePlayers, User, UserGameAssociation, UserId};
use crate::errors::domain::DomainError;
use crate::repos::{KeyValueStore, UserStore};

/// The backing stores, and the factory for contexts over them.
#[derive(Clone)]
pub struct Repository {
    games: Arc<dyn KeyValueStore<GameId, Game>>,
    game_players: Arc<dyn KeyValueStore<GameId, GamePlayers>>,
    current_user_games: Arc<dyn KeyValueStore<UserId, UserGameAssociation>>,
    users: Arc<dyn UserStore>,
}

impl Repository {
    pub fn new(
        games: Arc<dyn KeyValueStore<GameId, Game>>,
        game_players: Arc<dyn KeyValueStore<GameId, GamePlayers>>,
        current_user_games: Arc<dyn KeyValueStore<UserId, UserGameAssociation>>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            games,
            game_players,
            current_user_games,
            users,
        }
    }

    /// A repository over fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryStore::<GameId, Game>::new()),
            Arc::new(InMemoryStore::<GameId, GamePlayers>::new()),
            Arc::new(InMemoryStore::<UserId, UserGameAssociation>::new()),
            Arc::new(InMemoryStore::<UserId, User>::new()),
        )
    }

    pub fn open_context(&self) -> Context {
        Context::new(
            Arc::clone(&self.games),
            Arc::clone(&self.game_players),
            Arc::clone(&self.current_user_games),
            Arc::clone(&self.users),
        )
    }

    /// Run `f` inside a fresh context.
    ///
    /// On `Ok` the context is closed, flushing its writes; a flush failure
    /// replaces the value. On `Err` the writes are discarded and the
    /// original error is returned.
    pub fn with_context<R, F>(&self, f: F) -> Result<R, DomainError>
    where
        F: FnOnce(&mut Context) -> Result<R, DomainError>,
    {
        let mut context = self.open_context();
        match f(&mut context) {
            Ok(value) => {
                context.close()?;
                Ok(value)
            }
            Err(err) => {
                context.discard();
                Err(err)
            }
        }
    }
}
