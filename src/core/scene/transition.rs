//=========================================================================
// Scene Transitions
//=========================================================================
//
// What happens after a scene's action sequence runs out.
//
// A `NextUp` action arms a `TransitionIntent` on the scene. When the
// sequence empties, the intent is resolved against the game world into
// a three-phase `ModeChange` that the director applies:
//
// ```text
//   start  (fade-out phase)  →  middle (load phase)  →  end (fade-in phase)
//   MusicFadeout                UnloadLevels             ScreenFadein
//   ScreenFadeout               LoadLevel / EnterWorld
//                               LoadMenu / LoadScene
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::{Result, SceneError};
use crate::core::world::{GameWorld, MenuKind};

//=== GameMode ============================================================

/// Top-level mode of the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Nothing,
    Level,
    World,
    Menu,
    Scene,
}

//=== NextMode ============================================================

/// Where a finished scene hands control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextMode {
    /// Enter (or resume) a level.
    #[default]
    Level,

    /// Enter (or resume) an overworld.
    World,

    /// Roll the credits.
    Credits,
}

//=== TransitionIntent ====================================================

/// Armed post-scene destination.
///
/// With no target name, `Level` and `World` resume whatever was active
/// before the scene started. The entry names a level entry for levels,
/// or the waypoint exit to advance through for overworlds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionIntent {
    pub next_mode: NextMode,
    pub target_name: Option<String>,
    pub target_entry: Option<String>,
}

impl TransitionIntent {
    /// Creates an intent. Empty strings count as "not given".
    pub fn new(next_mode: NextMode, target_name: Option<&str>, target_entry: Option<&str>) -> Self {
        Self {
            next_mode,
            target_name: non_empty(target_name),
            target_entry: non_empty(target_entry),
        }
    }

    /// Resolves the intent against the current world state.
    ///
    /// # Errors
    ///
    /// [`SceneError::NoActiveLevel`] or [`SceneError::NoActiveOverworld`]
    /// when asked to resume something that is not loaded. Both are
    /// authoring bugs in the scene.
    pub fn resolve(&self, world: &dyn GameWorld) -> Result<ModeChange> {
        let entry = self.target_entry.clone();

        match self.next_mode {
            NextMode::Level => {
                let mut change = ModeChange::new(GameMode::Level);
                change.start.push(StartEffect::ScreenFadeout {
                    effect: Some(FadeEffect::HorizontalVertical),
                    speed: Some(3.0),
                });

                match &self.target_name {
                    None => {
                        if world.active_level().is_none() {
                            return Err(SceneError::NoActiveLevel);
                        }
                        if let Some(entry) = entry {
                            change.middle.push(LoadStep::ActivateLevelEntry(entry));
                        }
                    }
                    Some(name) => {
                        change.middle.push(LoadStep::UnloadLevels);
                        change.middle.push(LoadStep::LoadLevel(name.clone()));
                        // load_level_entry, not activate_level_entry: the level is new
                        if let Some(entry) = entry {
                            change.middle.push(LoadStep::LoadLevelEntry(entry));
                        }
                    }
                }

                change.end.push(EndEffect::ScreenFadein {
                    effect: Some(FadeEffect::Black),
                    speed: Some(3.0),
                });
                Ok(change)
            }

            NextMode::World => {
                let mut change = ModeChange::new(GameMode::World);
                change.start.push(StartEffect::MusicFadeout { ms: 1000 });
                change.start.push(StartEffect::ScreenFadeout {
                    effect: Some(FadeEffect::Black),
                    speed: Some(3.0),
                });
                change.middle.push(LoadStep::UnloadLevels);

                match &self.target_name {
                    None => {
                        if world.active_overworld().is_none() {
                            return Err(SceneError::NoActiveOverworld);
                        }
                        change.middle.push(LoadStep::AdvanceOverworld(entry));
                    }
                    Some(name) => change.middle.push(LoadStep::EnterWorld(name.clone())),
                }

                change.end.push(EndEffect::ScreenFadein {
                    effect: Some(FadeEffect::Random),
                    speed: Some(3.0),
                });
                Ok(change)
            }

            NextMode::Credits => {
                let mut change = ModeChange::new(GameMode::Menu);
                change.start.push(StartEffect::MusicFadeout { ms: 1500 });
                change.start.push(StartEffect::ScreenFadeout {
                    effect: Some(FadeEffect::HorizontalVertical),
                    speed: None,
                });
                change.middle.push(LoadStep::UnloadLevels);
                change.middle.push(LoadStep::LoadMenu(MenuKind::Credits));
                change.end.push(EndEffect::ScreenFadein {
                    effect: Some(FadeEffect::Random),
                    speed: None,
                });
                Ok(change)
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

//=== Effects =============================================================

/// Screen fade style. `Random` lets the renderer pick one per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FadeEffect {
    HorizontalVertical,
    Black,
    Random,
}

/// Effects applied before anything is loaded.
///
/// A `None` effect or speed leaves the renderer's default in place.
#[derive(Debug, Clone, PartialEq)]
pub enum StartEffect {
    MusicFadeout { ms: u32 },
    ScreenFadeout { effect: Option<FadeEffect>, speed: Option<f32> },
}

/// Effects applied after the new mode is loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum EndEffect {
    ScreenFadein { effect: Option<FadeEffect>, speed: Option<f32> },
}

//=== LoadStep ============================================================

/// One step of the load phase of a mode change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStep {
    UnloadLevels,
    LoadLevel(String),
    LoadLevelEntry(String),
    ActivateLevelEntry(String),
    EnterWorld(String),
    AdvanceOverworld(Option<String>),
    LoadMenu(MenuKind),
    LoadScene(String),
}

impl LoadStep {
    /// Applies the step to the world.
    ///
    /// `LoadScene` is not a world operation; it returns `false` and is
    /// left to the director.
    pub fn apply(&self, world: &mut dyn GameWorld) -> bool {
        match self {
            Self::UnloadLevels => world.unload_levels(),
            Self::LoadLevel(name) => world.load_level(name),
            Self::LoadLevelEntry(entry) => world.load_level_entry(entry),
            Self::ActivateLevelEntry(entry) => world.activate_level_entry(entry),
            Self::EnterWorld(name) => world.enter_world(name),
            Self::AdvanceOverworld(exit) => world.advance_overworld(exit.as_deref()),
            Self::LoadMenu(menu) => world.load_menu(*menu),
            Self::LoadScene(_) => return false,
        }
        true
    }
}

//=== ModeChange ==========================================================

/// A request to switch the game loop into another mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeChange {
    pub target: GameMode,
    pub start: Vec<StartEffect>,
    pub middle: Vec<LoadStep>,
    pub end: Vec<EndEffect>,
}

impl ModeChange {
    /// Creates a change to `target` with no effects or load steps.
    pub fn new(target: GameMode) -> Self {
        Self {
            target,
            start: Vec::new(),
            middle: Vec::new(),
            end: Vec::new(),
        }
    }

    /// The change requested when a script plays a scene.
    pub fn play_scene(name: &str) -> Self {
        let mut change = Self::new(GameMode::Scene);
        change.start.push(StartEffect::ScreenFadeout { effect: None, speed: Some(1.5) });
        change.middle.push(LoadStep::LoadScene(name.to_string()));
        change.end.push(EndEffect::ScreenFadein { effect: None, speed: Some(1.5) });
        change
    }

    /// Name of the scene this change loads, if any.
    pub fn scene_to_load(&self) -> Option<&str> {
        self.middle.iter().find_map(|step| match step {
            LoadStep::LoadScene(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::world::WorldState;

    //--- Level ------------------------------------------------------------

    #[test]
    fn default_intent_resumes_level() {
        let intent = TransitionIntent::default();
        assert_eq!(intent.next_mode, NextMode::Level);
        assert_eq!(intent.target_name, None);

        let world = WorldState::new().with_level("lvl_1");
        let change = intent.resolve(&world).unwrap();

        assert_eq!(change.target, GameMode::Level);
        assert!(change.middle.is_empty(), "Resume without entry loads nothing");
        assert_eq!(
            change.end,
            vec![EndEffect::ScreenFadein { effect: Some(FadeEffect::Black), speed: Some(3.0) }]
        );
    }

    #[test]
    fn resume_level_without_active_level_fails() {
        let err = TransitionIntent::default().resolve(&WorldState::new()).unwrap_err();
        assert_eq!(err, SceneError::NoActiveLevel);
        assert!(err.is_fatal());
    }

    #[test]
    fn resume_level_with_entry_activates_entry() {
        let intent = TransitionIntent::new(NextMode::Level, None, Some("exit_door"));
        let change = intent.resolve(&WorldState::new().with_level("lvl_1")).unwrap();
        assert_eq!(change.middle, vec![LoadStep::ActivateLevelEntry("exit_door".into())]);
    }

    #[test]
    fn named_level_unloads_then_loads() {
        let intent = TransitionIntent::new(NextMode::Level, Some("lvl_2"), Some("start"));
        let change = intent.resolve(&WorldState::new()).unwrap();
        assert_eq!(
            change.middle,
            vec![
                LoadStep::UnloadLevels,
                LoadStep::LoadLevel("lvl_2".into()),
                LoadStep::LoadLevelEntry("start".into()),
            ]
        );
    }

    #[test]
    fn empty_strings_mean_not_given() {
        let intent = TransitionIntent::new(NextMode::Level, Some(""), Some(""));
        assert_eq!(intent, TransitionIntent::default());
    }

    //--- World ------------------------------------------------------------

    #[test]
    fn resume_world_advances_waypoint() {
        let intent = TransitionIntent::new(NextMode::World, None, Some("right"));
        let change = intent.resolve(&WorldState::new().with_overworld("world_1")).unwrap();

        assert_eq!(change.target, GameMode::World);
        assert_eq!(change.start[0], StartEffect::MusicFadeout { ms: 1000 });
        assert_eq!(
            change.middle,
            vec![LoadStep::UnloadLevels, LoadStep::AdvanceOverworld(Some("right".into()))]
        );
        assert_eq!(
            change.end,
            vec![EndEffect::ScreenFadein { effect: Some(FadeEffect::Random), speed: Some(3.0) }]
        );
    }

    #[test]
    fn resume_world_without_overworld_fails() {
        let intent = TransitionIntent::new(NextMode::World, None, None);
        assert_eq!(intent.resolve(&WorldState::new()), Err(SceneError::NoActiveOverworld));
    }

    #[test]
    fn named_world_is_entered_fresh() {
        let intent = TransitionIntent::new(NextMode::World, Some("world_1"), None);
        let change = intent.resolve(&WorldState::new()).unwrap();
        assert_eq!(
            change.middle,
            vec![LoadStep::UnloadLevels, LoadStep::EnterWorld("world_1".into())]
        );
    }

    //--- Credits ----------------------------------------------------------

    #[test]
    fn credits_open_credits_menu() {
        let intent = TransitionIntent::new(NextMode::Credits, None, None);
        let change = intent.resolve(&WorldState::new()).unwrap();

        assert_eq!(change.target, GameMode::Menu);
        assert_eq!(change.start[0], StartEffect::MusicFadeout { ms: 1500 });
        assert_eq!(
            change.middle,
            vec![LoadStep::UnloadLevels, LoadStep::LoadMenu(MenuKind::Credits)]
        );
    }

    //--- ModeChange -------------------------------------------------------

    #[test]
    fn play_scene_loads_named_scene() {
        let change = ModeChange::play_scene("01_prologue");
        assert_eq!(change.target, GameMode::Scene);
        assert_eq!(change.scene_to_load(), Some("01_prologue"));
        assert_eq!(
            change.start,
            vec![StartEffect::ScreenFadeout { effect: None, speed: Some(1.5) }]
        );
    }

    #[test]
    fn load_scene_step_is_not_a_world_step() {
        let mut world = WorldState::new();
        assert!(!LoadStep::LoadScene("x".into()).apply(&mut world));
        assert!(LoadStep::LoadMenu(MenuKind::Credits).apply(&mut world));
        assert_eq!(world.active_menu(), Some(MenuKind::Credits));
    }
}
