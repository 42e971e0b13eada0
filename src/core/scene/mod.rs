//=========================================================================
// Scene System
//=========================================================================
//
// Non-interactive story sequences played between levels.
//
// Architecture:
//   Scene
//     ├─ sequence: ActionSequence   (actions, drained from the head)
//     ├─ stage: Stage               (image, narration, sprites, intent)
//     ├─ camera: SceneCamera
//     └─ claim: FocusClaim          (what the game had before enter)
//
// Lifecycle:
//   Constructed ──enter()──► Entered ──update()──► Draining
//                                                     │ sequence empty
//                                                     ▼
//                            leave() ◄── outcome() ◄── Completed
//
// Input is forwarded to the head action only. A scene whose sequence is
// empty ignores input.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::Result;
use crate::core::globals::GlobalContext;
use crate::core::input::{JoyButton, KeyEvent, MouseButton};
use crate::core::render::{Canvas, FocusOwner, NarrationBox, SceneCamera, SceneHandle};
use crate::core::world::GameWorld;

//=== Module Declarations =================================================

mod action;
mod registry;
mod requests;
mod sequence;
mod stage;
mod transition;

//=== Public API ==========================================================

pub use action::{
    Action, ActionContext, ImageChange, MusicChange, Narration, NextUp, WaitReturn, WaitTime,
};
pub use registry::{SceneFactory, SceneRegistry, SceneRegistryBuilder};
pub use requests::{ModeRequestSender, ModeRequests};
pub use sequence::{ActionSequence, SequenceBuilder};
pub use stage::Stage;
pub use transition::{
    EndEffect, FadeEffect, GameMode, LoadStep, ModeChange, NextMode, StartEffect,
    TransitionIntent,
};

//=== Scene State =========================================================

/// Where a scene is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Built but not yet entered.
    Constructed,

    /// Entered, not yet updated.
    Entered,

    /// Actions are running.
    Draining,

    /// The sequence ran out and the outcome has been computed. Terminal.
    Completed,
}

/// Result of one scene update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneStatus {
    Running,
    Completed,
}

//=== Focus Claim =========================================================

/// Shared state a scene took over on enter and gives back on leave.
#[derive(Debug, Clone, Copy)]
struct FocusClaim {
    camera: FocusOwner,
    input_focus: FocusOwner,
    cursor_active: bool,
    hud_visible: bool,
}

//=== Scene ===============================================================

/// A playable story scene.
///
/// The scene owns its actions and display state. Shared engine state
/// (camera slot, input focus, HUD, GUI root, audio) is borrowed from the
/// [`GlobalContext`] on each call and never stored.
///
/// # Example
///
/// ```
/// use storyline_engine::prelude::*;
///
/// # fn main() -> storyline_engine::core::Result<()> {
/// let sequence = ActionSequence::builder()
///     .image("scene_images/dawn.png")?
///     .next_up(NextMode::World, Some("world_1"), None)
///     .build();
///
/// let mut ctx = GlobalContext::new(Box::new(MutedAudio), SceneConfig::default());
/// let world = WorldState::default();
/// let mut scene = Scene::new("dawn", sequence);
///
/// scene.enter(&mut ctx, GameMode::Level);
/// let status = scene.update(&mut ctx, &world, 1.0)?;
/// assert_eq!(status, SceneStatus::Completed);
/// assert_eq!(scene.outcome().map(|change| change.target), Some(GameMode::World));
///
/// scene.leave(&mut ctx, GameMode::World);
/// assert_eq!(ctx.active_camera, FocusOwner::Game);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Scene {
    name: String,
    handle: SceneHandle,
    sequence: ActionSequence,
    stage: Stage,
    camera: SceneCamera,
    state: SceneState,
    claim: Option<FocusClaim>,
    outcome: Option<ModeChange>,
}

impl Scene {
    //--- Construction -----------------------------------------------------

    /// Creates a scene that will play `sequence` from the first action.
    pub fn new(name: &str, sequence: ActionSequence) -> Self {
        Self {
            name: name.to_string(),
            handle: SceneHandle::next(),
            sequence,
            stage: Stage::new(),
            camera: SceneCamera::default(),
            state: SceneState::Constructed,
            claim: None,
            outcome: None,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Takes over presentation from the game.
    ///
    /// Hides the HUD and console, makes the scene camera active, gives
    /// input focus to the scene, parks the background at its initial
    /// position and attaches the story box to the GUI root.
    pub fn enter(&mut self, ctx: &mut GlobalContext, old_mode: GameMode) {
        if self.claim.is_some() {
            warn!("Scene '{}' entered twice; ignoring", self.name);
            return;
        }

        info!("Entering scene '{}' from {:?}", self.name, old_mode);

        self.claim = Some(FocusClaim {
            camera: ctx.active_camera,
            input_focus: ctx.input_focus,
            cursor_active: ctx.cursor_active,
            hud_visible: ctx.hud.is_visible(),
        });

        let owner = FocusOwner::Scene(self.handle);
        ctx.active_camera = owner;
        ctx.input_focus = owner;
        ctx.cursor_active = false;
        ctx.hud.hide();
        ctx.console.hide();

        let top = -ctx.config.screen_height;
        self.stage.image.set_position(0.0, top);
        self.camera.set_position(0.0, top);

        ctx.gui_root.add_child(NarrationBox::WINDOW_NAME);
        self.state = SceneState::Entered;
    }

    /// Runs the action sequence for one frame.
    ///
    /// Once the sequence is empty the armed destination is resolved and
    /// the scene completes. A completed scene does nothing on further
    /// updates and keeps returning [`SceneStatus::Completed`].
    ///
    /// # Errors
    ///
    /// Propagates the resolve error when the scene asks to resume a level
    /// or overworld that is not loaded. The scene stays `Draining`.
    pub fn update(
        &mut self,
        ctx: &mut GlobalContext,
        world: &dyn GameWorld,
        speed_factor: f32,
    ) -> Result<SceneStatus> {
        match self.state {
            SceneState::Completed => return Ok(SceneStatus::Completed),
            SceneState::Constructed => warn!("Scene '{}' updated before enter", self.name),
            SceneState::Entered | SceneState::Draining => {}
        }
        self.state = SceneState::Draining;

        let mut action_ctx = ActionContext {
            audio: ctx.audio.as_mut(),
            config: &ctx.config,
            speed_factor,
        };
        let finished = self.sequence.advance(&mut self.stage, &mut action_ctx);
        if finished > 0 {
            debug!("Scene '{}': {} action(s) finished, {} left", self.name, finished, self.sequence.len());
        }

        self.camera.update();

        if !self.sequence.is_empty() {
            return Ok(SceneStatus::Running);
        }

        let change = self.stage.intent().resolve(world)?;
        info!(
            "Scene '{}' completed after {} frame(s); next mode {:?}",
            self.name,
            self.camera.updates(),
            change.target
        );
        self.outcome = Some(change);
        self.state = SceneState::Completed;
        Ok(SceneStatus::Completed)
    }

    /// Hands presentation back to the game.
    ///
    /// Shared slots are only restored if this scene still holds them, so
    /// a later claimant is never overwritten. Music fades out, joystick
    /// state is reset and the story box is detached.
    pub fn leave(&mut self, ctx: &mut GlobalContext, next_mode: GameMode) {
        info!("Leaving scene '{}' for {:?}", self.name, next_mode);

        let owner = FocusOwner::Scene(self.handle);
        match self.claim.take() {
            Some(claim) => {
                if ctx.active_camera == owner {
                    ctx.active_camera = claim.camera;
                }
                if ctx.input_focus == owner {
                    ctx.input_focus = claim.input_focus;
                }
                ctx.cursor_active = claim.cursor_active;
                if claim.hud_visible {
                    ctx.hud.show();
                }
            }
            None => warn!("Scene '{}' left without being entered", self.name),
        }

        // A restored claim may itself point at this scene if it was entered twice.
        if ctx.active_camera == owner {
            ctx.active_camera = FocusOwner::Game;
        }
        if ctx.input_focus == owner {
            ctx.input_focus = FocusOwner::Game;
        }

        ctx.audio.fadeout_music(ctx.config.leave_music_fadeout_ms);
        ctx.input_state.reset_joystick();
        ctx.gui_root.remove_child(NarrationBox::WINDOW_NAME);
        self.stage.hide_story_box();
    }

    //--- Rendering --------------------------------------------------------

    /// Draws the background, the sprite layer, then the story box if shown.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear();

        if let Some(image) = self.stage.image.image() {
            canvas.draw_sprite(image, self.camera.to_screen(self.stage.image.position()));
        }
        for sprite in self.stage.sprites.iter() {
            canvas.draw_sprite(&sprite.image, self.camera.to_screen(sprite.position));
        }
        if self.stage.narration.is_visible() {
            canvas.draw_narration(self.stage.narration.text());
        }
    }

    //--- Input ------------------------------------------------------------

    pub fn key_down(&mut self, ctx: &mut GlobalContext, event: &KeyEvent) -> bool {
        ctx.input_state.record_key_down(event);
        match self.sequence.head_mut() {
            Some(head) => head.key_down(event, &ctx.config.confirm),
            None => self.ignore_input("key down"),
        }
    }

    pub fn key_up(&mut self, ctx: &mut GlobalContext, event: &KeyEvent) -> bool {
        ctx.input_state.record_key_up(event);
        match self.sequence.head_mut() {
            Some(head) => head.key_up(event),
            None => self.ignore_input("key up"),
        }
    }

    pub fn mouse_down(&mut self, ctx: &mut GlobalContext, button: MouseButton) -> bool {
        ctx.input_state.record_mouse_down(button);
        match self.sequence.head_mut() {
            Some(head) => head.mouse_down(button),
            None => self.ignore_input("mouse down"),
        }
    }

    pub fn mouse_up(&mut self, ctx: &mut GlobalContext, button: MouseButton) -> bool {
        ctx.input_state.record_mouse_up(button);
        match self.sequence.head_mut() {
            Some(head) => head.mouse_up(button),
            None => self.ignore_input("mouse up"),
        }
    }

    pub fn joy_button_down(&mut self, ctx: &mut GlobalContext, button: JoyButton) -> bool {
        ctx.input_state.record_joy_down(button);
        match self.sequence.head_mut() {
            Some(head) => head.joy_button_down(button, &ctx.config.confirm),
            None => self.ignore_input("joystick button down"),
        }
    }

    pub fn joy_button_up(&mut self, ctx: &mut GlobalContext, button: JoyButton) -> bool {
        ctx.input_state.record_joy_up(button);
        match self.sequence.head_mut() {
            Some(head) => head.joy_button_up(button),
            None => self.ignore_input("joystick button up"),
        }
    }

    fn ignore_input(&self, what: &str) -> bool {
        warn!("Scene '{}' has no actions left; {} ignored", self.name, what);
        false
    }

    //--- Accessors --------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> SceneHandle {
        self.handle
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Returns `true` between `enter` and `leave`.
    pub fn is_entered(&self) -> bool {
        self.claim.is_some()
    }

    /// The mode change computed when the scene completed.
    pub fn outcome(&self) -> Option<&ModeChange> {
        self.outcome.as_ref()
    }

    pub fn sequence(&self) -> &ActionSequence {
        &self.sequence
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable stage access, e.g. for placing foreground sprites.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn camera(&self) -> &SceneCamera {
        &self.camera
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        if self.claim.is_some() {
            warn!("Scene '{}' dropped while still entered", self.name);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::{AudioCommand, ChannelAudio};
    use crate::core::globals::SceneConfig;
    use crate::core::input::KeyCode;
    use crate::core::world::WorldState;

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self) {
            self.calls.push("clear".to_string());
        }

        fn draw_sprite(&mut self, image: &str, position: (f32, f32)) {
            self.calls.push(format!("sprite {} {:?}", image, position));
        }

        fn draw_narration(&mut self, text: &str) {
            self.calls.push(format!("narration {}", text));
        }
    }

    fn context() -> GlobalContext {
        GlobalContext::new(Box::new(crate::core::audio::MutedAudio), SceneConfig::default())
    }

    fn enter_key() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter)
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn enter_takes_over_presentation() {
        let mut ctx = context();
        let mut scene = Scene::new("test", ActionSequence::new());
        scene.enter(&mut ctx, GameMode::Level);

        let owner = FocusOwner::Scene(scene.handle());
        assert_eq!(ctx.active_camera, owner);
        assert_eq!(ctx.input_focus, owner);
        assert!(!ctx.cursor_active);
        assert!(!ctx.hud.is_visible());
        assert!(!ctx.console.is_visible());
        assert!(ctx.gui_root.has_child(NarrationBox::WINDOW_NAME));
        assert_eq!(scene.stage().image.position(), (0.0, -600.0));
        assert_eq!(scene.state(), SceneState::Entered);

        scene.leave(&mut ctx, GameMode::Level);
    }

    #[test]
    fn leave_restores_what_enter_took() {
        let mut ctx = context();
        let mut scene = Scene::new("test", ActionSequence::new());
        scene.enter(&mut ctx, GameMode::Level);
        scene.leave(&mut ctx, GameMode::Level);

        assert_eq!(ctx.active_camera, FocusOwner::Game);
        assert_eq!(ctx.input_focus, FocusOwner::Game);
        assert!(ctx.cursor_active);
        assert!(ctx.hud.is_visible());
        assert!(!ctx.gui_root.has_child(NarrationBox::WINDOW_NAME));
        assert!(!scene.is_entered());
    }

    #[test]
    fn leave_does_not_steal_slots_claimed_by_someone_else() {
        let mut ctx = context();
        let mut first = Scene::new("first", ActionSequence::new());
        let second = Scene::new("second", ActionSequence::new());

        first.enter(&mut ctx, GameMode::Level);
        ctx.active_camera = FocusOwner::Scene(second.handle());
        first.leave(&mut ctx, GameMode::Scene);

        assert_eq!(ctx.active_camera, FocusOwner::Scene(second.handle()));
        assert_eq!(ctx.input_focus, FocusOwner::Game);
    }

    #[test]
    fn leave_fades_music_and_resets_joystick() {
        let (audio, commands) = ChannelAudio::new(8);
        let mut ctx = GlobalContext::new(Box::new(audio), SceneConfig::default());
        let mut scene = Scene::new("test", ActionSequence::new());

        scene.enter(&mut ctx, GameMode::Level);
        scene.joy_button_down(&mut ctx, JoyButton(3));
        assert!(ctx.input_state.is_joy_down(JoyButton(3)));

        scene.leave(&mut ctx, GameMode::Level);
        assert!(!ctx.input_state.is_joy_down(JoyButton(3)));
        assert_eq!(commands.try_recv(), Ok(AudioCommand::FadeoutMusic { ms: 1000 }));
    }

    //--- Update -----------------------------------------------------------

    #[test]
    fn completes_with_default_intent_when_level_is_active() {
        let mut ctx = context();
        let world = WorldState::default().with_level("level_1");
        let mut scene = Scene::new("test", ActionSequence::new());

        scene.enter(&mut ctx, GameMode::Level);
        assert_eq!(scene.update(&mut ctx, &world, 1.0).ok(), Some(SceneStatus::Completed));
        assert_eq!(scene.outcome().map(|change| change.target), Some(GameMode::Level));
        scene.leave(&mut ctx, GameMode::Level);
    }

    #[test]
    fn completed_scene_is_not_recomputed() {
        let mut ctx = context();
        let world = WorldState::default().with_level("level_1");
        let mut scene = Scene::new("test", ActionSequence::new());

        scene.enter(&mut ctx, GameMode::Level);
        scene.update(&mut ctx, &world, 1.0).unwrap();
        let first = scene.outcome().cloned();
        let empty_world = WorldState::default();
        assert_eq!(scene.update(&mut ctx, &empty_world, 1.0).ok(), Some(SceneStatus::Completed));
        assert_eq!(scene.outcome().cloned(), first);
        scene.leave(&mut ctx, GameMode::Level);
    }

    #[test]
    fn camera_counts_frames_until_completion() {
        let mut ctx = context();
        let world = WorldState::default().with_level("level_1");
        let mut scene = Scene::new("test", ActionSequence::builder().wait_for_confirm().build());
        scene.enter(&mut ctx, GameMode::Level);

        scene.update(&mut ctx, &world, 1.0).unwrap();
        scene.key_down(&mut ctx, &enter_key());
        assert_eq!(scene.update(&mut ctx, &world, 1.0).ok(), Some(SceneStatus::Completed));
        assert_eq!(scene.camera().updates(), 2);

        scene.update(&mut ctx, &world, 1.0).unwrap();
        assert_eq!(scene.camera().updates(), 2);
        scene.leave(&mut ctx, GameMode::Level);
    }

    #[test]
    fn resume_without_level_is_an_error() {
        let mut ctx = context();
        let world = WorldState::default();
        let mut scene = Scene::new("test", ActionSequence::new());

        scene.enter(&mut ctx, GameMode::Menu);
        assert!(scene.update(&mut ctx, &world, 1.0).is_err());
        assert_eq!(scene.state(), SceneState::Draining);
        scene.leave(&mut ctx, GameMode::Menu);
    }

    #[test]
    fn narration_shows_text_and_waits_for_confirm() {
        let mut ctx = context();
        let world = WorldState::default();
        let sequence = ActionSequence::builder()
            .narrate(["one", "two"])
            .next_up(NextMode::World, Some("world_1"), None)
            .build();
        let mut scene = Scene::new("test", sequence);
        scene.enter(&mut ctx, GameMode::Level);

        assert_eq!(scene.update(&mut ctx, &world, 1.0).ok(), Some(SceneStatus::Running));
        assert!(scene.stage().narration.is_visible());
        assert_eq!(scene.stage().narration.text(), "one");

        assert!(scene.key_down(&mut ctx, &enter_key()));
        scene.update(&mut ctx, &world, 1.0).unwrap();
        assert_eq!(scene.stage().narration.text(), "two");

        scene.key_down(&mut ctx, &enter_key());
        assert_eq!(scene.update(&mut ctx, &world, 1.0).ok(), Some(SceneStatus::Completed));
        assert!(!scene.stage().narration.is_visible());
        scene.leave(&mut ctx, GameMode::World);
    }

    #[test]
    fn input_on_empty_sequence_is_ignored() {
        let mut ctx = context();
        let mut scene = Scene::new("test", ActionSequence::new());
        scene.enter(&mut ctx, GameMode::Level);

        assert!(!scene.key_down(&mut ctx, &enter_key()));
        assert!(!scene.mouse_down(&mut ctx, MouseButton::Left));
        assert!(!scene.joy_button_down(&mut ctx, JoyButton(0)));
        scene.leave(&mut ctx, GameMode::Level);
    }

    //--- Rendering --------------------------------------------------------

    #[test]
    fn draw_order_is_background_sprites_narration() {
        let mut ctx = context();
        let world = WorldState::default();
        let sequence = ActionSequence::builder()
            .image("bg.png")
            .unwrap()
            .narrate(["hello"])
            .build();
        let mut scene = Scene::new("test", sequence);
        scene.enter(&mut ctx, GameMode::Level);
        scene.stage_mut().sprites.add("hero.png", (10.0, -590.0));
        scene.update(&mut ctx, &world, 1.0).unwrap();

        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas);
        assert_eq!(
            canvas.calls,
            vec![
                "clear".to_string(),
                "sprite bg.png (0.0, 0.0)".to_string(),
                "sprite hero.png (10.0, 10.0)".to_string(),
                "narration hello".to_string(),
            ]
        );
        scene.leave(&mut ctx, GameMode::Level);
    }
}
