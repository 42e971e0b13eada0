//=========================================================================
// Core Systems
//
// Everything the scene director coordinates.
//
// Modules:
// - scene:   actions, sequences, scenes, registry, transitions
// - globals: the explicit context scenes borrow while they run
// - input:   key/mouse/joystick events and held-state tracking
// - audio:   music collaborator and its channel-backed implementation
// - render:  display state scenes own and the `Canvas` they draw into
// - world:   the level/overworld/menu collaborator transitions act on
// - error:   the crate error type
//
//=========================================================================

pub mod audio;
pub mod error;
pub mod globals;
pub mod input;
pub mod render;
pub mod scene;
pub mod world;

//=== Public API ==========================================================

pub use error::{Result, SceneError};
