//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use storyline_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Director
pub use crate::engine::{SceneDirector, SceneDirectorBuilder};

// Errors
pub use crate::core::error::SceneError;

// Global context and configuration
pub use crate::core::globals::{GlobalContext, SceneConfig};

// Collaborators
pub use crate::core::audio::{Audio, ChannelAudio, MutedAudio};
pub use crate::core::render::{Canvas, FocusOwner};
pub use crate::core::world::{GameWorld, MenuKind, WorldState};

// Input
pub use crate::core::input::{ConfirmBindings, JoyButton, KeyCode, KeyEvent, Modifiers, MouseButton};

// Scene system
pub use crate::core::scene::{
    Action, ActionSequence, GameMode, ModeChange, NextMode, Scene, SceneRegistry, SceneState,
    SceneStatus, TransitionIntent,
};
