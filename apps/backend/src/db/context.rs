//! The unit of work every service operation runs inside.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use super::tracked::{Handle, Tracked, TrackedStore};
use crate::domain::{Game, GameId, GamePlayers, User, UserGameAssociation, UserId};
use crate::errors::domain::{ContextErrorKind, DomainError};
use crate::repos::{KeyValueStore, UserStore};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContextState {
    Open,
    Closed,
}

/// Identity-aware cache and write buffer over the game stores.
///
/// Obtained from [`Repository::open_context`](super::Repository::open_context)
/// and used by one thread for one business operation. Writes reach the
/// backing stores only on [`Context::close`]. Dropping an open context
/// discards its pending writes.
pub struct Context {
    id: u64,
    state: ContextState,
    games: TrackedStore<GameId, Game>,
    game_players: TrackedStore<GameId, GamePlayers>,
    current_user_games: TrackedStore<UserId, UserGameAssociation>,
    users: Arc<dyn UserStore>,
}

impl Context {
    pub(crate) fn new(
        games: Arc<dyn KeyValueStore<GameId, Game>>,
        game_players: Arc<dyn KeyValueStore<GameId, GamePlayers>>,
        current_user_games: Arc<dyn KeyValueStore<UserId, UserGameAssociation>>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        let id = NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed);
        debug!(context = id, "context opened");
        Self {
            id,
            state: ContextState::Open,
            games: TrackedStore::new("game", games, |g: &Game| *g.identifier()),
            game_players: TrackedStore::new("game_players", game_players, |p: &GamePlayers| {
                *p.game()
            }),
            current_user_games: TrackedStore::new(
                "current_user_game",
                current_user_games,
                |a: &UserGameAssociation| a.user,
            ),
            users,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == ContextState::Open
    }

    /// Number of entities written in this context and not yet flushed.
    pub fn pending_writes(&self) -> usize {
        self.games.pending_writes()
            + self.game_players.pending_writes()
            + self.current_user_games.pending_writes()
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        match self.state {
            ContextState::Open => Ok(()),
            ContextState::Closed => Err(DomainError::context(
                ContextErrorKind::Closed,
                format!("context {} is closed", self.id),
            )),
        }
    }

    pub fn add_game(&mut self, game: Game) -> Result<Handle<Game>, DomainError> {
        self.ensure_open()?;
        let id = *game.identifier();
        self.games.add(self.id, id, game)
    }

    pub fn update_game(&mut self, handle: &Handle<Game>, game: Game) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.games.update(self.id, handle, game)
    }

    pub fn find_game(&mut self, id: &GameId) -> Result<Option<Tracked<Game>>, DomainError> {
        self.ensure_open()?;
        self.games.find(self.id, id)
    }

    /// Every known game id, loaded from the store at most once per context.
    pub fn find_all_game_identifiers(&mut self) -> Result<BTreeSet<GameId>, DomainError> {
        self.ensure_open()?;
        Ok(self.games.find_all_ids()?.into_iter().collect())
    }

    pub fn add_game_players(
        &mut self,
        players: GamePlayers,
    ) -> Result<Handle<GamePlayers>, DomainError> {
        self.ensure_open()?;
        let id = *players.game();
        self.game_players.add(self.id, id, players)
    }

    pub fn update_game_players(
        &mut self,
        handle: &Handle<GamePlayers>,
        players: GamePlayers,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.game_players.update(self.id, handle, players)
    }

    pub fn find_game_players(
        &mut self,
        game: &GameId,
    ) -> Result<Option<Tracked<GamePlayers>>, DomainError> {
        self.ensure_open()?;
        self.game_players.find(self.id, game)
    }

    pub fn add_current_user_game(
        &mut self,
        association: UserGameAssociation,
    ) -> Result<Handle<UserGameAssociation>, DomainError> {
        self.ensure_open()?;
        let user = association.user;
        self.current_user_games.add(self.id, user, association)
    }

    pub fn update_current_user_game(
        &mut self,
        handle: &Handle<UserGameAssociation>,
        association: UserGameAssociation,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.current_user_games.update(self.id, handle, association)
    }

    pub fn find_current_user_game(
        &mut self,
        user: &UserId,
    ) -> Result<Option<Tracked<UserGameAssociation>>, DomainError> {
        self.ensure_open()?;
        self.current_user_games.find(self.id, user)
    }

    // Users are not cached; the user store owns its lookup strategy.

    pub fn find_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.ensure_open()?;
        Ok(self.users.find(id)?)
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.ensure_open()?;
        Ok(self.users.find_by_username(username)?)
    }

    pub fn find_all_users(&self) -> Result<Vec<User>, DomainError> {
        self.ensure_open()?;
        Ok(self.users.find_all()?)
    }

    /// Writes through immediately.
    pub fn save_user(&self, user: &User) -> Result<(), DomainError> {
        self.ensure_open()?;
        Ok(self.users.save(&user.id, user)?)
    }

    /// Flush pending writes and release the context.
    ///
    /// Games are saved before game players, and game players before current
    /// games. A failed save stops the flush; the context is closed either
    /// way. Closing a closed context does nothing.
    pub fn close(&mut self) -> Result<(), DomainError> {
        if !self.is_open() {
            return Ok(());
        }
        let result = self.flush();
        self.release();
        if let Err(err) = &result {
            warn!(context = self.id, error = %err, "context flush failed");
        } else {
            debug!(context = self.id, "context closed");
        }
        result
    }

    /// Release the context without writing anything.
    pub fn discard(&mut self) {
        if !self.is_open() {
            return;
        }
        let pending = self.pending_writes();
        self.release();
        debug!(context = self.id, pending, "context discarded");
    }

    fn flush(&mut self) -> Result<(), DomainError> {
        self.games.flush()?;
        self.game_players.flush()?;
        self.current_user_games.flush()?;
        Ok(())
    }

    fn release(&mut self) {
        self.games.clear();
        self.game_players.clear();
        self.current_user_games.clear();
        self.state = ContextState::Closed;
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if !self.is_open() {
            return;
        }
        let pending = self.pending_writes();
        if pending > 0 {
            warn!(
                context = self.id,
                pending, "context dropped without close; discarding writes"
            );
        }
        self.release();
    }
}
