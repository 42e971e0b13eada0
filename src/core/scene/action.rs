//=========================================================================
// Scene Actions
//=========================================================================
//
// Units of cutscene behaviour, executed one at a time from the head of a
// scene's action sequence.
//
// Contract:
//   execute() → true   the action is done; the scene drops it and moves on
//   execute() → false  the action stays at the head, receives input, and
//                      is executed again next frame
//
// Variants:
//   ImageChange   one-shot, sets the background image
//   MusicChange   one-shot, starts looped music with a fade-in
//   WaitReturn    blocks until a confirm input arrives
//   WaitTime      blocks for a number of seconds of game time
//   Narration     shows messages one at a time, each acknowledged by confirm
//   NextUp        one-shot, arms where the game goes after the scene
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::stage::Stage;
use super::transition::{NextMode, TransitionIntent};
use crate::core::audio::Audio;
use crate::core::error::{Result, SceneError};
use crate::core::globals::SceneConfig;
use crate::core::input::{ConfirmBindings, JoyButton, KeyEvent, MouseButton};

//=== ActionContext =======================================================

/// Per-frame collaborators lent to the executing action.
pub struct ActionContext<'a> {
    pub audio: &'a mut dyn Audio,
    pub config: &'a SceneConfig,

    /// Elapsed game time this frame, in reference frames (1.0 = one frame
    /// at `config.fps_reference`).
    pub speed_factor: f32,
}

//=== Action ==============================================================

/// One step of a cutscene.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ImageChange(ImageChange),
    MusicChange(MusicChange),
    WaitReturn(WaitReturn),
    WaitTime(WaitTime),
    Narration(Narration),
    NextUp(NextUp),
}

impl Action {
    //--- Construction -----------------------------------------------------

    /// Background image change. Fails on an empty path.
    pub fn image_change(path: &str) -> Result<Self> {
        Ok(Self::ImageChange(ImageChange { image: required_path("image", path)? }))
    }

    /// Music change. Fails on an empty path.
    pub fn music_change(path: &str) -> Result<Self> {
        Ok(Self::MusicChange(MusicChange { music: required_path("music", path)? }))
    }

    /// Waits for a confirm input.
    pub fn wait_return() -> Self {
        Self::WaitReturn(WaitReturn { confirmed: false })
    }

    /// Waits for `seconds` of game time. Negative or non-finite durations
    /// are clamped to zero and finish on the first execute.
    pub fn wait_time(seconds: f32) -> Self {
        let seconds = if seconds.is_finite() && seconds >= 0.0 {
            seconds
        } else {
            warn!("WaitTime of {} seconds clamped to 0", seconds);
            0.0
        };
        Self::WaitTime(WaitTime { seconds, remaining: None })
    }

    /// Narrates `messages` in order, one per confirm.
    pub fn narration<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Narration(Narration {
            messages: messages.into_iter().map(Into::into).collect(),
            read: true,
        })
    }

    /// Arms the post-scene destination.
    pub fn next_up(next_mode: NextMode, name: Option<&str>, entry: Option<&str>) -> Self {
        Self::NextUp(NextUp { intent: TransitionIntent::new(next_mode, name, entry) })
    }

    //--- Execution --------------------------------------------------------

    /// Runs one frame of the action. Returns `true` when finished.
    pub fn execute(&mut self, stage: &mut Stage, ctx: &mut ActionContext<'_>) -> bool {
        match self {
            Self::ImageChange(action) => action.execute(stage),
            Self::MusicChange(action) => action.execute(ctx),
            Self::WaitReturn(action) => action.execute(),
            Self::WaitTime(action) => action.execute(ctx),
            Self::Narration(action) => action.execute(stage),
            Self::NextUp(action) => action.execute(stage),
        }
    }

    //--- Input ------------------------------------------------------------
    //
    // Handlers return `true` if the event was consumed. Only blocking
    // actions ever see input, since one-shots finish the frame they start.

    pub fn key_down(&mut self, event: &KeyEvent, confirm: &ConfirmBindings) -> bool {
        match self {
            Self::WaitReturn(action) => action.acknowledge(confirm.accepts_key(event)),
            Self::Narration(action) => action.acknowledge(confirm.accepts_key(event)),
            _ => false,
        }
    }

    pub fn key_up(&mut self, _event: &KeyEvent) -> bool {
        false
    }

    pub fn mouse_down(&mut self, _button: MouseButton) -> bool {
        false
    }

    pub fn mouse_up(&mut self, _button: MouseButton) -> bool {
        false
    }

    pub fn joy_button_down(&mut self, button: JoyButton, confirm: &ConfirmBindings) -> bool {
        match self {
            Self::WaitReturn(action) => action.acknowledge(confirm.accepts_joy_button(button)),
            Self::Narration(action) => action.acknowledge(confirm.accepts_joy_button(button)),
            _ => false,
        }
    }

    pub fn joy_button_up(&mut self, _button: JoyButton) -> bool {
        false
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ImageChange(_) => "ImageChange",
            Self::MusicChange(_) => "MusicChange",
            Self::WaitReturn(_) => "WaitReturn",
            Self::WaitTime(_) => "WaitTime",
            Self::Narration(_) => "Narration",
            Self::NextUp(_) => "NextUp",
        }
    }
}

fn required_path(what: &str, path: &str) -> Result<String> {
    if path.trim().is_empty() {
        return Err(SceneError::InvalidAction {
            reason: format!("{} path must not be empty", what),
        });
    }
    Ok(path.to_string())
}

//=== ImageChange =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageChange {
    image: String,
}

impl ImageChange {
    fn execute(&self, stage: &mut Stage) -> bool {
        debug!("Scene image -> {}", self.image);
        stage.set_scene_image(&self.image);
        true
    }
}

//=== MusicChange =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicChange {
    music: String,
}

impl MusicChange {
    fn execute(&self, ctx: &mut ActionContext<'_>) -> bool {
        let fade_in = ctx.config.scene_music_fade_in_ms;
        if !ctx.audio.play_music(&self.music, true, false, fade_in) {
            warn!("Could not start scene music {}", self.music);
        }
        true
    }
}

//=== WaitReturn ==========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitReturn {
    confirmed: bool,
}

impl WaitReturn {
    fn execute(&self) -> bool {
        self.confirmed
    }

    fn acknowledge(&mut self, is_confirm: bool) -> bool {
        if is_confirm {
            self.confirmed = true;
        }
        is_confirm
    }
}

//=== WaitTime ============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct WaitTime {
    seconds: f32,
    // Countdown in reference frames, set on first execute.
    remaining: Option<f32>,
}

impl WaitTime {
    fn execute(&mut self, ctx: &ActionContext<'_>) -> bool {
        let fps = ctx.config.fps_reference;
        let seconds = self.seconds;
        let remaining = self.remaining.get_or_insert(seconds * fps);
        *remaining -= ctx.speed_factor.max(0.0);
        *remaining <= 0.0
    }

    /// Reference frames left, or `None` before the first execute.
    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }
}

//=== Narration ===========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    messages: VecDeque<String>,
    // Whether the message on screen has been acknowledged.
    read: bool,
}

impl Narration {
    fn execute(&mut self, stage: &mut Stage) -> bool {
        if !self.read {
            return false;
        }

        match self.messages.pop_front() {
            Some(message) => {
                stage.set_story_text(&message);
                stage.show_story_box();
                self.read = false;
                false
            }
            None => {
                stage.hide_story_box();
                true
            }
        }
    }

    fn acknowledge(&mut self, is_confirm: bool) -> bool {
        if is_confirm {
            self.read = true;
        }
        is_confirm
    }

    /// Messages not yet shown.
    pub fn pending(&self) -> usize {
        self.messages.len()
    }
}

//=== NextUp ==============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextUp {
    intent: TransitionIntent,
}

impl NextUp {
    fn execute(&self, stage: &mut Stage) -> bool {
        stage.arm(self.intent.clone());
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
