//=========================================================================
// Stage
//=========================================================================
//
// The part of a scene that actions are allowed to change.
//
// Actions never hold a reference to their scene. Instead the scene lends
// its stage to the head action for the duration of one call.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::transition::TransitionIntent;
use crate::core::render::{NarrationBox, SceneImage, SpriteLayer};

//=== Stage ===============================================================

/// Display state and transition intent owned by one scene.
#[derive(Debug, Default)]
pub struct Stage {
    pub image: SceneImage,
    pub narration: NarrationBox,
    pub sprites: SpriteLayer,
    intent: TransitionIntent,
    armed: bool,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Display helpers --------------------------------------------------

    /// Sets the background image. Paths are relative to the pixmaps directory.
    pub fn set_scene_image(&mut self, path: &str) {
        self.image.set_image(path);
    }

    pub fn show_story_box(&mut self) {
        self.narration.show();
    }

    pub fn hide_story_box(&mut self) {
        self.narration.hide();
    }

    /// Replaces the narration text without showing the box.
    pub fn set_story_text(&mut self, text: &str) {
        self.narration.set_text(text);
    }

    //--- Transition intent ------------------------------------------------

    /// Arms the post-scene destination. The last call wins.
    pub fn arm(&mut self, intent: TransitionIntent) {
        if self.armed && self.intent != intent {
            warn!(
                "Scene destination re-armed: {:?} replaces {:?}",
                intent, self.intent
            );
        }
        self.intent = intent;
        self.armed = true;
    }

    /// The armed destination, or the default (resume the level) if none.
    pub fn intent(&self) -> &TransitionIntent {
        &self.intent
    }

    /// Returns `true` once a destination has been armed.
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
