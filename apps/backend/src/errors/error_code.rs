//! Error codes for the game-session core.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that outer
/// layers can expose unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Game not found
    GameNotFound,
    /// Scenario not found
    ScenarioNotFound,
    /// No free character in the game
    CharacterNotFound,

    // Business Logic Conflicts
    /// User is already playing a different game
    UserAlreadyPlaying,
    /// Username already registered
    UsernameTaken,
    /// Game run state or recruitment forbids the operation
    IllegalGameState,
    /// User lacks the required authority
    PermissionDenied,

    // Consistency
    /// User associated with a game but has no character in it
    CharacterMissing,

    // Unit of work misuse
    /// Identifier already tracked by the context
    AlreadyPresent,
    /// Handle not tracked by the context
    NotPresent,
    /// Context already closed
    ContextClosed,

    // System Errors
    /// Backing store failed
    StorageFailure,
    /// Backing store returned inconsistent data
    DataCorruption,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 15] = [
        Self::ValidationError,
        Self::UserNotFound,
        Self::GameNotFound,
        Self::ScenarioNotFound,
        Self::CharacterNotFound,
        Self::UserAlreadyPlaying,
        Self::UsernameTaken,
        Self::IllegalGameState,
        Self::PermissionDenied,
        Self::CharacterMissing,
        Self::AlreadyPresent,
        Self::NotPresent,
        Self::ContextClosed,
        Self::StorageFailure,
        Self::DataCorruption,
    ];

    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::ScenarioNotFound => "SCENARIO_NOT_FOUND",
            Self::CharacterNotFound => "CHARACTER_NOT_FOUND",

            Self::UserAlreadyPlaying => "USER_ALREADY_PLAYING",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::IllegalGameState => "ILLEGAL_GAME_STATE",
            Self::PermissionDenied => "PERMISSION_DENIED",

            Self::CharacterMissing => "CHARACTER_MISSING",

            Self::AlreadyPresent => "ALREADY_PRESENT",
            Self::NotPresent => "NOT_PRESENT",
            Self::ContextClosed => "CONTEXT_CLOSED",

            Self::StorageFailure => "STORAGE_FAILURE",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
