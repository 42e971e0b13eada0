//=========================================================================
// Input
//
// Decoded input types and the held-input tracker used by scenes.
//
// Responsibilities:
// - Represent key, mouse and joystick events in a portable form
// - Track held inputs, including joystick latches reset on scene exit
// - Define which inputs confirm story prompts
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod confirm;
mod state_tracker;

//=== Public API ==========================================================

pub use confirm::ConfirmBindings;
pub use event::{JoyButton, KeyCode, KeyEvent, Modifiers, MouseButton};
pub use state_tracker::StateTracker;
