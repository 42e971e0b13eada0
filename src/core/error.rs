//=========================================================================
// Scene Errors
//=========================================================================
//
// Error taxonomy for the scene sequencer.
//
// Recoverable:
//   UnknownScene, InvalidAction, NotInSceneMode
//
// Authoring bugs (callers treat as fatal):
//   NoActiveLevel, NoActiveOverworld
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== SceneError ==========================================================

/// Errors raised by scene loading, construction and completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// No scene is registered under the requested identifier.
    #[error("Invalid scene '{name}'.")]
    UnknownScene { name: String },

    /// A scene asked to resume the active level, but none is loaded.
    #[error("Bug: requested resume of the active level, but no level is active")]
    NoActiveLevel,

    /// A scene asked to resume the active overworld, but none is loaded.
    #[error("Bug: requested resume of the active overworld, but no overworld is active")]
    NoActiveOverworld,

    /// An action was constructed with parameters it cannot run with.
    #[error("invalid scene action: {reason}")]
    InvalidAction { reason: String },

    /// A scene operation was requested while the game is not in scene mode.
    #[error("no scene is currently active")]
    NotInSceneMode,
}

impl SceneError {
    /// Returns `true` for errors that indicate a scene authoring bug.
    ///
    /// These have no safe fallback; the game loop is expected to abort
    /// with the diagnostic rather than continue in an inconsistent mode.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NoActiveLevel | Self::NoActiveOverworld)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SceneError>;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scene_message_names_identifier() {
        let err = SceneError::UnknownScene { name: "epilogue".into() };
        assert_eq!(err.to_string(), "Invalid scene 'epilogue'.");
    }

    #[test]
    fn resume_errors_are_fatal() {
        assert!(SceneError::NoActiveLevel.is_fatal());
        assert!(SceneError::NoActiveOverworld.is_fatal());
    }

    #[test]
    fn lookup_and_validation_errors_are_recoverable() {
        assert!(!SceneError::UnknownScene { name: "x".into() }.is_fatal());
        assert!(!SceneError::InvalidAction { reason: "empty path".into() }.is_fatal());
        assert!(!SceneError::NotInSceneMode.is_fatal());
    }
}
