//=========================================================================
// Scene Configuration
//=========================================================================
//
// Tunables shared by every scene the director plays.
//
// Values are set through `SceneDirectorBuilder` and read by scenes and
// actions through `GlobalContext::config`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::ConfirmBindings;

//=== SceneConfig =========================================================

/// Configuration for scene playback.
///
/// # Default Values
///
/// - **fps_reference**: 32.0 (speed factor 1.0 equals one frame at this rate)
/// - **screen_height**: 600.0
/// - **confirm**: Enter, Space, S; joystick buttons 0 and 1
/// - **leave_music_fadeout_ms**: 1000
/// - **scene_music_fade_in_ms**: 1000
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Frames per second that a speed factor of 1.0 corresponds to.
    ///
    /// Timed waits convert seconds into this many speed-factor units.
    pub fps_reference: f32,

    /// Height of the game resolution.
    ///
    /// The background sprite starts one screen above the visible area.
    pub screen_height: f32,

    /// Inputs that acknowledge narration and return-prompts.
    pub confirm: ConfirmBindings,

    /// Music fade-out issued when a scene is left.
    pub leave_music_fadeout_ms: u32,

    /// Fade-in used by music changes inside a scene.
    pub scene_music_fade_in_ms: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fps_reference: 32.0,
            screen_height: 600.0,
            confirm: ConfirmBindings::default(),
            leave_music_fadeout_ms: 1000,
            scene_music_fade_in_ms: 1000,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
