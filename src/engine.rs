//=========================================================================
// Scene Director
//
// Main entry point: owns the game-mode state machine that scenes plug
// into.
//
// Architecture:
// ```text
//     SceneDirectorBuilder  ──build()──>  SceneDirector  ──tick()──>  [Frame]
//         │                                   │
//         ├─ with_fps_reference()             ├─ drains mode requests
//         ├─ with_screen_height()             ├─ applies the pending change
//         ├─ with_confirm_bindings()          │    leave → load → enter
//         ├─ with_audio()                     └─ updates the active scene
//         ├─ with_registry()
//         └─ with_world()
// ```
//
// Mode changes are never applied mid-frame. Scenes, scripts and callers
// request them; the next tick applies them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::audio::{Audio, MutedAudio};
use crate::core::error::{Result, SceneError};
use crate::core::globals::{GlobalContext, SceneConfig};
use crate::core::input::{ConfirmBindings, JoyButton, KeyEvent, MouseButton};
use crate::core::render::Canvas;
use crate::core::scene::{
    GameMode, ModeChange, ModeRequestSender, ModeRequests, Scene, SceneRegistry, SceneState,
    SceneStatus, StartEffect,
};
use crate::core::world::{GameWorld, WorldState};

//=== SceneDirectorBuilder ================================================

/// Builder for configuring and constructing a [`SceneDirector`].
///
/// # Default Values
///
/// - **FPS reference**: 32.0 (the speed factor base)
/// - **Screen height**: 600.0
/// - **Confirm bindings**: Enter, Space, S; joystick buttons 0 and 1
/// - **Leave music fadeout**: 1000 ms
/// - **Scene music fade-in**: 1000 ms
/// - **Audio**: [`MutedAudio`]
/// - **Registry**: [`SceneRegistry::builtin`]
/// - **World**: empty [`WorldState`]
/// - **Request capacity**: 16
///
/// # Examples
///
/// ```
/// use storyline_engine::SceneDirectorBuilder;
/// use storyline_engine::core::world::WorldState;
///
/// let director = SceneDirectorBuilder::new()
///     .with_fps_reference(60.0)
///     .with_screen_height(720.0)
///     .with_world(WorldState::new().with_level("level_1"))
///     .build();
///
/// assert_eq!(director.context().config.fps_reference, 60.0);
/// ```
pub struct SceneDirectorBuilder<W: GameWorld = WorldState> {
    config: SceneConfig,
    audio: Option<Box<dyn Audio>>,
    registry: Option<Arc<SceneRegistry>>,
    world: W,
    initial_mode: GameMode,
    request_capacity: usize,
}

impl SceneDirectorBuilder<WorldState> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: SceneConfig::default(),
            audio: None,
            registry: None,
            world: WorldState::new(),
            initial_mode: GameMode::Nothing,
            request_capacity: 16,
        }
    }
}

impl Default for SceneDirectorBuilder<WorldState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: GameWorld> SceneDirectorBuilder<W> {
    /// Sets the frame rate one unit of speed factor corresponds to.
    ///
    /// Default: 32.0
    ///
    /// # Panics
    ///
    /// Panics if `fps` is not a positive finite number.
    pub fn with_fps_reference(mut self, fps: f32) -> Self {
        assert!(fps.is_finite() && fps > 0.0, "FPS reference must be positive, got {}", fps);
        self.config.fps_reference = fps;
        self
    }

    /// Sets the game resolution height. The background sprite starts this
    /// far above the origin.
    ///
    /// Default: 600.0
    ///
    /// # Panics
    ///
    /// Panics if `height` is not a positive finite number.
    pub fn with_screen_height(mut self, height: f32) -> Self {
        assert!(
            height.is_finite() && height > 0.0,
            "Screen height must be positive, got {}",
            height
        );
        self.config.screen_height = height;
        self
    }

    /// Replaces the inputs that acknowledge narration and waits.
    pub fn with_confirm_bindings(mut self, confirm: ConfirmBindings) -> Self {
        self.config.confirm = confirm;
        self
    }

    /// Music fadeout applied when a scene is left.
    ///
    /// Default: 1000
    pub fn with_leave_music_fadeout(mut self, ms: u32) -> Self {
        self.config.leave_music_fadeout_ms = ms;
        self
    }

    /// Fade-in used by scene music changes.
    ///
    /// Default: 1000
    pub fn with_scene_music_fade_in(mut self, ms: u32) -> Self {
        self.config.scene_music_fade_in_ms = ms;
        self
    }

    /// Sets the music backend.
    pub fn with_audio<A: Audio + 'static>(mut self, audio: A) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    /// Sets the scene table. Shared with the scripting layer via `Arc`.
    pub fn with_registry(mut self, registry: impl Into<Arc<SceneRegistry>>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// Sets the game world that mode changes load into.
    pub fn with_world<V: GameWorld>(self, world: V) -> SceneDirectorBuilder<V> {
        SceneDirectorBuilder {
            config: self.config,
            audio: self.audio,
            registry: self.registry,
            world,
            initial_mode: self.initial_mode,
            request_capacity: self.request_capacity,
        }
    }

    /// Mode the director starts in.
    ///
    /// Default: [`GameMode::Nothing`]
    pub fn with_initial_mode(mut self, mode: GameMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Maximum number of queued mode requests.
    ///
    /// Default: 16
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_request_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Request capacity must be positive");
        self.request_capacity = capacity;
        self
    }

    /// Builds the director.
    pub fn build(self) -> SceneDirector<W> {
        info!(
            "Building scene director (fps reference: {}, screen height: {}, mode: {:?})",
            self.config.fps_reference, self.config.screen_height, self.initial_mode
        );

        let audio: Box<dyn Audio> = match self.audio {
            Some(audio) => audio,
            None => Box::new(MutedAudio),
        };
        let registry = self.registry.unwrap_or_else(|| Arc::new(SceneRegistry::builtin()));

        SceneDirector {
            context: GlobalContext::new(audio, self.config),
            registry,
            world: self.world,
            mode: self.initial_mode,
            active: None,
            pending: None,
            requests: ModeRequests::new(self.request_capacity),
            last_change: None,
        }
    }
}

//=== SceneDirector =======================================================

/// Game-mode state machine hosting scenes.
///
/// Create via [`SceneDirectorBuilder`].
///
/// # Frame Contract
///
/// ```text
/// tick(speed_factor)
///   ├─► drain ModeRequests (scripts, other threads)
///   ├─► apply pending ModeChange
///   │     start: music fadeout
///   │     leave + drop the active scene
///   │     middle: load steps on the world / build the next scene
///   │     enter the next scene
///   └─► Scene::update() while in scene mode
///         on completion → its ModeChange becomes pending
/// ```
///
/// # Examples
///
/// ```
/// use storyline_engine::prelude::*;
///
/// # fn main() -> storyline_engine::core::Result<()> {
/// let mut director = SceneDirectorBuilder::new().build();
/// director.play_scene("prologue")?;
/// director.tick(1.0)?;
///
/// assert_eq!(director.mode(), GameMode::Scene);
/// assert_eq!(director.active_scene().map(|scene| scene.name()), Some("01_prologue"));
/// # Ok(())
/// # }
/// ```
pub struct SceneDirector<W: GameWorld = WorldState> {
    context: GlobalContext,
    registry: Arc<SceneRegistry>,
    world: W,
    mode: GameMode,
    active: Option<Scene>,
    pending: Option<ModeChange>,
    requests: ModeRequests,
    last_change: Option<ModeChange>,
}

impl<W: GameWorld> SceneDirector<W> {
    //--- Requests ---------------------------------------------------------

    /// Requests that the named scene play from the next tick.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownScene`] if the registry does not know `name`.
    /// Nothing is armed in that case.
    pub fn play_scene(&mut self, name: &str) -> Result<()> {
        let canonical = self
            .registry
            .canonical_name(name)
            .ok_or_else(|| SceneError::UnknownScene { name: name.to_string() })?
            .to_string();

        self.request(ModeChange::play_scene(&canonical));
        Ok(())
    }

    /// Arms a mode change for the next tick. The last request wins.
    pub fn request(&mut self, change: ModeChange) {
        if let Some(previous) = &self.pending {
            warn!(
                "Pending mode change to {:?} replaced by change to {:?}",
                previous.target, change.target
            );
        }
        self.pending = Some(change);
    }

    /// A handle other layers (scripting, other threads) use to request
    /// mode changes.
    pub fn request_sender(&self) -> ModeRequestSender {
        self.requests.sender()
    }

    //--- Frame ------------------------------------------------------------

    /// Advances one frame.
    ///
    /// `speed_factor` is elapsed game time in reference frames.
    ///
    /// # Errors
    ///
    /// - [`SceneError::NoActiveLevel`] / [`SceneError::NoActiveOverworld`]
    ///   when a finished scene asks to resume something that is not
    ///   loaded. These are fatal; the caller should stop the game.
    /// - [`SceneError::UnknownScene`] or a content error when a requested
    ///   scene cannot be built. The current mode is left untouched.
    pub fn tick(&mut self, speed_factor: f32) -> Result<()> {
        for change in self.requests.drain() {
            self.request(change);
        }

        if let Some(change) = self.pending.take() {
            self.apply(change).map_err(report)?;
        }

        if self.mode != GameMode::Scene {
            return Ok(());
        }

        let Some(scene) = self.active.as_mut() else {
            return Ok(());
        };
        if scene.state() == SceneState::Completed {
            return Ok(());
        }

        let status = scene
            .update(&mut self.context, &self.world, speed_factor)
            .map_err(report)?;

        let outcome = match status {
            SceneStatus::Completed => scene.outcome().cloned(),
            SceneStatus::Running => None,
        };
        if let Some(change) = outcome {
            self.request(change);
        }
        Ok(())
    }

    fn apply(&mut self, change: ModeChange) -> Result<()> {
        info!("Mode change {:?} -> {:?}", self.mode, change.target);

        // Build before tearing anything down so a bad name changes nothing.
        let next_scene = match change.scene_to_load() {
            Some(name) => Some(self.registry.load(name)?),
            None if change.target == GameMode::Scene => return Err(SceneError::NotInSceneMode),
            None => None,
        };

        for effect in &change.start {
            if let StartEffect::MusicFadeout { ms } = effect {
                self.context.audio.fadeout_music(*ms);
            }
        }

        if let Some(mut previous) = self.active.take() {
            previous.leave(&mut self.context, change.target);
        }

        for step in &change.middle {
            if step.apply(&mut self.world) {
                debug!("Applied load step {:?}", step);
            }
        }

        if let Some(mut scene) = next_scene {
            scene.enter(&mut self.context, self.mode);
            self.active = Some(scene);
        }

        self.mode = change.target;
        self.last_change = Some(change);
        Ok(())
    }

    /// Draws the active scene. Returns `false` when no scene is playing.
    pub fn draw(&self, canvas: &mut dyn Canvas) -> bool {
        match self.playing() {
            Some(scene) => {
                scene.draw(canvas);
                true
            }
            None => false,
        }
    }

    //--- Input ------------------------------------------------------------
    //
    // Forwarded to the active scene. Every method returns false when the
    // director is not in scene mode.
    //

    pub fn key_down(&mut self, event: &KeyEvent) -> bool {
        self.forward(|scene, ctx| scene.key_down(ctx, event))
    }

    pub fn key_up(&mut self, event: &KeyEvent) -> bool {
        self.forward(|scene, ctx| scene.key_up(ctx, event))
    }

    pub fn mouse_down(&mut self, button: MouseButton) -> bool {
        self.forward(|scene, ctx| scene.mouse_down(ctx, button))
    }

    pub fn mouse_up(&mut self, button: MouseButton) -> bool {
        self.forward(|scene, ctx| scene.mouse_up(ctx, button))
    }

    pub fn joy_button_down(&mut self, button: JoyButton) -> bool {
        self.forward(|scene, ctx| scene.joy_button_down(ctx, button))
    }

    pub fn joy_button_up(&mut self, button: JoyButton) -> bool {
        self.forward(|scene, ctx| scene.joy_button_up(ctx, button))
    }

    //--- Accessors --------------------------------------------------------

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// The scene being played, if any.
    pub fn active_scene(&self) -> Option<&Scene> {
        self.active.as_ref()
    }

    /// The scene being played.
    ///
    /// # Errors
    ///
    /// [`SceneError::NotInSceneMode`] outside scene mode.
    pub fn scene(&self) -> Result<&Scene> {
        self.playing().ok_or(SceneError::NotInSceneMode)
    }

    pub fn pending(&self) -> Option<&ModeChange> {
        self.pending.as_ref()
    }

    /// The last applied change. The renderer reads its fade effects.
    pub fn last_change(&self) -> Option<&ModeChange> {
        self.last_change.as_ref()
    }

    pub fn registry(&self) -> &Arc<SceneRegistry> {
        &self.registry
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn context(&self) -> &GlobalContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GlobalContext {
        &mut self.context
    }

    //--- Internal Helpers -------------------------------------------------

    fn playing(&self) -> Option<&Scene> {
        if self.mode == GameMode::Scene {
            self.active.as_ref()
        } else {
            None
        }
    }

    fn forward<F>(&mut self, deliver: F) -> bool
    where
        F: FnOnce(&mut Scene, &mut GlobalContext) -> bool,
    {
        if self.mode != GameMode::Scene {
            return false;
        }
        match self.active.as_mut() {
            Some(scene) => deliver(scene, &mut self.context),
            None => false,
        }
    }
}

impl<W: GameWorld> Drop for SceneDirector<W> {
    fn drop(&mut self) {
        if let Some(mut scene) = self.active.take() {
            scene.leave(&mut self.context, GameMode::Nothing);
        }
    }
}

fn report(err: SceneError) -> SceneError {
    if err.is_fatal() {
        error!("Scene playback failed: {}", err);
    } else {
        warn!("Mode change rejected: {}", err);
    }
    err
}

//=========================================================================
// Unit Tests
//=========================================================================
