//=========================================================================
// Global Context
//=========================================================================
//
// Shared state a scene claims on enter and gives back on leave.
//
// Contains:
// - active_camera / input_focus: single-owner slots
// - hud / console: overlays hidden while a scene plays
// - gui_root: where the narration box is attached
// - input_state: held keys and joystick latches
// - audio: music collaborator
// - config: scene playback tunables
//
// The context is passed explicitly into `Scene::enter`, `update` and
// `leave`. No scene keeps a reference to it between calls.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneConfig;
use crate::core::audio::Audio;
use crate::core::input::StateTracker;
use crate::core::render::{FocusOwner, GuiRoot, Overlay};

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during their lifecycle.
pub struct GlobalContext {
    /// Owner of the camera the renderer draws through.
    pub active_camera: FocusOwner,

    /// Owner of the mouse cursor's sprite space.
    pub input_focus: FocusOwner,

    /// Whether the mouse cursor is interactive.
    pub cursor_active: bool,

    /// Heads-up display.
    pub hud: Overlay,

    /// In-game console.
    pub console: Overlay,

    /// GUI root window that scene overlays attach to.
    pub gui_root: GuiRoot,

    /// Held-input state.
    pub input_state: StateTracker,

    /// Music playback.
    pub audio: Box<dyn Audio>,

    /// Scene playback configuration.
    pub config: SceneConfig,
}

impl GlobalContext {
    /// Creates a context where the game owns every slot.
    pub fn new(audio: Box<dyn Audio>, config: SceneConfig) -> Self {
        Self {
            active_camera: FocusOwner::Game,
            input_focus: FocusOwner::Game,
            cursor_active: true,
            hud: Overlay::new(true),
            console: Overlay::new(false),
            gui_root: GuiRoot::default(),
            input_state: StateTracker::new(),
            audio,
            config,
        }
    }
}
