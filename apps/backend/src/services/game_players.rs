//! Recruitment: assigning scenario characters to joining users.

use std::sync::Arc;

use tracing::{debug, info};

use super::game_locks::GameLocks;
use super::games::GameService;
use super::scenarios::ScenarioService;
use super::users::UserService;
use crate::db::{Context, Handle, Repository};
use crate::domain::{
    Authority, CharacterId, GameId, GamePlayers, UserGameAssociation, UserId,
};
use crate::errors::domain::{ConflictKind, DomainError, InvariantKind, NotFoundKind};

/// Players of a game as read through a context.
///
/// `handle` is absent while the record is still virtual.
struct LoadedPlayers {
    handle: Option<Handle<GamePlayers>>,
    players: GamePlayers,
}

/// Outcome of validating a join, before anything is written.
enum JoinDecision {
    /// The user already plays this game.
    AlreadyJoined(CharacterId),
    Join {
        loaded: LoadedPlayers,
        character: CharacterId,
        closes_recruitment: bool,
    },
}

#[derive(Clone)]
pub struct GamePlayersService {
    games: GameService,
    users: UserService,
    scenarios: ScenarioService,
    repository: Repository,
    locks: Arc<GameLocks>,
}

impl GamePlayersService {
    pub fn new(
        games: GameService,
        users: UserService,
        scenarios: ScenarioService,
        repository: Repository,
        locks: Arc<GameLocks>,
    ) -> Self {
        Self {
            games,
            users,
            scenarios,
            repository,
            locks,
        }
    }

    /// The players of `game`, or the virtual default if the game exists but
    /// nobody has joined it yet. Never writes.
    pub fn get(
        &self,
        context: &mut Context,
        game: &GameId,
    ) -> Result<Option<GamePlayers>, DomainError> {
        Ok(self.load(context, game)?.map(|loaded| loaded.players))
    }

    fn load(
        &self,
        context: &mut Context,
        game: &GameId,
    ) -> Result<Option<LoadedPlayers>, DomainError> {
        if let Some(tracked) = context.find_game_players(game)? {
            return Ok(Some(LoadedPlayers {
                handle: Some(tracked.handle),
                players: tracked.value,
            }));
        }
        if self.games.get_game_in(context, game)?.is_none() {
            return Ok(None);
        }
        Ok(Some(LoadedPlayers {
            handle: None,
            players: GamePlayers::virtual_default(*game),
        }))
    }

    fn store(
        context: &mut Context,
        handle: Option<Handle<GamePlayers>>,
        players: GamePlayers,
    ) -> Result<(), DomainError> {
        match handle {
            Some(handle) => context.update_game_players(&handle, players),
            None => context.add_game_players(players).map(|_| ()),
        }
    }

    /// Stop accepting players. Closing a closed game saves it again.
    pub fn end_recruitment(&self, game: &GameId) -> Result<GamePlayers, DomainError> {
        self.locks.with_game_lock(game, || {
            self.repository.with_context(|ctx| {
                let LoadedPlayers {
                    handle,
                    mut players,
                } = self.load(ctx, game)?.ok_or_else(|| unknown_game(game))?;
                players.end_recruitment();
                Self::store(ctx, handle, players.clone())?;
                info!(game_id = %game, "recruitment ended");
                Ok(players)
            })
        })
    }

    /// Add `user` to `game`, assigning the first character nobody plays.
    ///
    /// Joining a game the user already plays succeeds without changes.
    /// Returns the character the user plays.
    pub fn user_joins_game(
        &self,
        user: &UserId,
        game: &GameId,
    ) -> Result<CharacterId, DomainError> {
        self.locks.with_game_lock(game, || {
            self.repository.with_context(|ctx| {
                match self.decide_join(ctx, user, game)? {
                    JoinDecision::AlreadyJoined(character) => {
                        debug!(user_id = %user, game_id = %game, "user already in game");
                        Ok(character)
                    }
                    JoinDecision::Join {
                        loaded,
                        character,
                        closes_recruitment,
                    } => {
                        let LoadedPlayers {
                            handle,
                            mut players,
                        } = loaded;
                        players.add_user(character, *user)?;
                        if closes_recruitment {
                            players.end_recruitment();
                        }
                        ctx.add_current_user_game(UserGameAssociation::new(*user, *game))?;
                        Self::store(ctx, handle, players)?;
                        info!(
                            user_id = %user,
                            game_id = %game,
                            character_id = %character,
                            "user joined game"
                        );
                        if closes_recruitment {
                            info!(game_id = %game, "recruitment ended; all characters taken");
                        }
                        Ok(character)
                    }
                }
            })
        })
    }

    /// Whether [`user_joins_game`](Self::user_joins_game) would succeed now.
    ///
    /// Refusals are `Ok(false)`; storage and context failures are returned.
    pub fn may_user_join_game(&self, user: &UserId, game: &GameId) -> Result<bool, DomainError> {
        let decision = self
            .repository
            .with_context(|ctx| self.decide_join(ctx, user, game).map(|_| ()));
        match decision {
            Ok(()) => Ok(true),
            Err(
                DomainError::NotFound(..)
                | DomainError::Conflict(..)
                | DomainError::IllegalGameState(_)
                | DomainError::PermissionDenied(_)
                | DomainError::Invariant(..),
            ) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn decide_join(
        &self,
        ctx: &mut Context,
        user: &UserId,
        game: &GameId,
    ) -> Result<JoinDecision, DomainError> {
        let user = self
            .users
            .get_user_in(ctx, user)?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::User, format!("user {user}")))?;
        if !user.has_authority(Authority::Player) {
            return Err(DomainError::permission_denied(format!(
                "user {} may not play games",
                user.id
            )));
        }
        let loaded = self.load(ctx, game)?.ok_or_else(|| unknown_game(game))?;
        let current = ctx.find_current_user_game(&user.id)?.map(|t| t.value);

        match current {
            Some(association) if association.game != *game => Err(DomainError::conflict(
                ConflictKind::UserAlreadyPlaying,
                format!("user {} is playing game {}", user.id, association.game),
            )),
            Some(_) => loaded
                .players
                .character_of(&user.id)
                .map(JoinDecision::AlreadyJoined)
                .ok_or_else(|| {
                    DomainError::invariant(
                        InvariantKind::CharacterMissing,
                        format!("user {} is in game {game} without a character", user.id),
                    )
                }),
            None => {
                if !loaded.players.is_recruiting() {
                    return Err(DomainError::illegal_game_state(format!(
                        "game {game} is not recruiting players"
                    )));
                }
                let scenario = self
                    .scenarios
                    .get_scenario(ctx, &game.scenario())
                    .ok_or_else(|| {
                        DomainError::not_found(
                            NotFoundKind::Scenario,
                            format!("scenario {}", game.scenario()),
                        )
                    })?;
                let character = scenario
                    .characters()
                    .iter()
                    .map(|c| c.id())
                    .find(|c| !loaded.players.is_played(c))
                    .ok_or_else(|| {
                        DomainError::not_found(
                            NotFoundKind::Character,
                            format!("no free character in game {game}"),
                        )
                    })?;
                // Counted before this join: it takes the last slot.
                let closes_recruitment =
                    scenario.characters().len().saturating_sub(1) <= loaded.players.users().len();
                Ok(JoinDecision::Join {
                    loaded,
                    character,
                    closes_recruitment,
                })
            }
        }
    }

    /// The game `user` is playing, if the user exists and plays one.
    pub fn get_current_game_of_user(&self, user: &UserId) -> Result<Option<GameId>, DomainError> {
        self.repository.with_context(|ctx| {
            if self.users.get_user_in(ctx, user)?.is_none() {
                return Ok(None);
            }
            Ok(ctx.find_current_user_game(user)?.map(|t| t.value.game))
        })
    }

    /// Every player of `game`.
    pub fn get_game_players_as_game_manager(
        &self,
        game: &GameId,
    ) -> Result<Option<GamePlayers>, DomainError> {
        self.repository.with_context(|ctx| self.get(ctx, game))
    }

    /// Only the entry `user` plays; hides whether the game is recruiting
    /// when other players exist.
    pub fn get_game_players_as_non_game_manager(
        &self,
        game: &GameId,
        user: &UserId,
    ) -> Result<Option<GamePlayers>, DomainError> {
        Ok(self
            .repository
            .with_context(|ctx| self.get(ctx, game))?
            .map(|players| players.filtered_for(user)))
    }
}

fn unknown_game(game: &GameId) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("game {game}"))
}
