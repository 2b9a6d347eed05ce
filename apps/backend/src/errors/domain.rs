//! Domain-level error type used across services, the unit of work and adapters.
//!
//! This error type is transport- and storage-agnostic. Every public service
//! operation returns `Result<T, DomainError>`; adapters report failures as
//! [`StoreError`](crate::repos::StoreError), which converts into
//! `DomainError::Infra`.

use thiserror::Error;

use super::error_code::ErrorCode;

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Game,
    Scenario,
    /// No free character slot remains in the game's scenario.
    Character,
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// The user is already playing a different game.
    UserAlreadyPlaying,
    UsernameTaken,
}

/// Internal consistency faults between aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvariantKind {
    /// A user is associated with a game but holds no character in it.
    CharacterMissing,
}

/// Misuse of a unit-of-work context (programming errors, never user errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextErrorKind {
    AlreadyPresent,
    NotPresent,
    Closed,
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    StorageFailure,
    DataCorruption,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input validation or business rule violation
    #[error("validation error: {0}")]
    Validation(String),
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Semantic conflict
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// The game is not in a state that permits the operation
    #[error("illegal game state: {0}")]
    IllegalGameState(String),
    /// The user lacks a required authority
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// Stored aggregates disagree with each other
    #[error("invariant violated {0:?}: {1}")]
    Invariant(InvariantKind, String),
    /// Unit-of-work misuse
    #[error("context {0:?}: {1}")]
    Context(ContextErrorKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn illegal_game_state(detail: impl Into<String>) -> Self {
        Self::IllegalGameState(detail.into())
    }
    pub fn permission_denied(detail: impl Into<String>) -> Self {
        Self::PermissionDenied(detail.into())
    }
    pub fn invariant(kind: InvariantKind, detail: impl Into<String>) -> Self {
        Self::Invariant(kind, detail.into())
    }
    pub fn context(kind: ContextErrorKind, detail: impl Into<String>) -> Self {
        Self::Context(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Stable code for this error, suitable for callers that map errors onto
    /// an outer protocol.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::NotFound(kind, _) => match kind {
                NotFoundKind::User => ErrorCode::UserNotFound,
                NotFoundKind::Game => ErrorCode::GameNotFound,
                NotFoundKind::Scenario => ErrorCode::ScenarioNotFound,
                NotFoundKind::Character => ErrorCode::CharacterNotFound,
            },
            Self::Conflict(kind, _) => match kind {
                ConflictKind::UserAlreadyPlaying => ErrorCode::UserAlreadyPlaying,
                ConflictKind::UsernameTaken => ErrorCode::UsernameTaken,
            },
            Self::IllegalGameState(_) => ErrorCode::IllegalGameState,
            Self::PermissionDenied(_) => ErrorCode::PermissionDenied,
            Self::Invariant(kind, _) => match kind {
                InvariantKind::CharacterMissing => ErrorCode::CharacterMissing,
            },
            Self::Context(kind, _) => match kind {
                ContextErrorKind::AlreadyPresent => ErrorCode::AlreadyPresent,
                ContextErrorKind::NotPresent => ErrorCode::NotPresent,
                ContextErrorKind::Closed => ErrorCode::ContextClosed,
            },
            Self::Infra(kind, _) => match kind {
                InfraErrorKind::StorageFailure => ErrorCode::StorageFailure,
                InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(..))
    }
}
