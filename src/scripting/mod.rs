//=========================================================================
// Scene Scripting
//=========================================================================
//
// Lua binding for starting scenes from level scripts.
//
// Lua API:
//   Scene.play("prologue")    -- queue the scene; errors on unknown names
//                             -- or when the request queue is full
//   Scene.exists("prologue")  -- true if the registry knows the name
//
// `play` validates the name immediately so the script author sees the
// error at the call site. The scene itself starts on the director's
// next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::debug;
use mlua::{Error as LuaError, Lua, Result as LuaResult};

//=== Internal Dependencies ===============================================

use crate::core::error::SceneError;
use crate::core::scene::{ModeChange, ModeRequestSender, SceneRegistry};

//=== Installation ========================================================

/// Defines the global `Scene` table in `lua`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use mlua::Lua;
/// use storyline_engine::prelude::*;
/// use storyline_engine::scripting::install_scene_module;
///
/// let mut director = SceneDirectorBuilder::new().build();
/// let lua = Lua::new();
/// install_scene_module(&lua, Arc::clone(director.registry()), director.request_sender()).unwrap();
///
/// lua.load("Scene.play('prologue')").exec().unwrap();
/// director.tick(1.0).unwrap();
/// assert_eq!(director.mode(), GameMode::Scene);
///
/// assert!(lua.load("Scene.play('nowhere')").exec().is_err());
/// ```
pub fn install_scene_module(
    lua: &Lua,
    registry: Arc<SceneRegistry>,
    requests: ModeRequestSender,
) -> LuaResult<()> {
    let scene = lua.create_table()?;

    let play_registry = Arc::clone(&registry);
    let play = lua.create_function(move |_, name: String| {
        let canonical = play_registry
            .canonical_name(&name)
            .ok_or_else(|| LuaError::RuntimeError(SceneError::UnknownScene { name: name.clone() }.to_string()))?;

        debug!("Script requested scene '{}'", canonical);
        if !requests.request(ModeChange::play_scene(canonical)) {
            return Err(LuaError::RuntimeError(format!("Scene '{}' could not be queued", canonical)));
        }
        Ok(())
    })?;
    scene.set("play", play)?;

    let exists = lua.create_function(move |_, name: String| Ok(registry.contains(&name)))?;
    scene.set("exists", exists)?;

    lua.globals().set("Scene", scene)?;
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{GameMode, ModeRequests};

    fn setup() -> (Lua, ModeRequests) {
        let lua = Lua::new();
        let requests = ModeRequests::new(4);
        install_scene_module(&lua, Arc::new(SceneRegistry::builtin()), requests.sender()).unwrap();
        (lua, requests)
    }

    #[test]
    fn play_queues_canonical_scene() {
        let (lua, requests) = setup();
        lua.load("Scene.play('prologue')").exec().unwrap();

        let queued = requests.drain();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].target, GameMode::Scene);
        assert_eq!(queued[0].scene_to_load(), Some("01_prologue"));
    }

    #[test]
    fn unknown_scene_raises_lua_error() {
        let (lua, requests) = setup();
        let err = lua.load("Scene.play('epilogue')").exec().unwrap_err();
        assert!(err.to_string().contains("Invalid scene 'epilogue'."));
        assert!(requests.is_empty());
    }

    #[test]
    fn script_can_catch_unknown_scene() {
        let (lua, _requests) = setup();
        let caught: bool = lua
            .load("return not pcall(Scene.play, 'epilogue')")
            .eval()
            .unwrap();
        assert!(caught);
    }

    #[test]
    fn exists_reports_registry_membership() {
        let (lua, _requests) = setup();
        let known: bool = lua.load("return Scene.exists('01_prologue')").eval().unwrap();
        let unknown: bool = lua.load("return Scene.exists('02_missing')").eval().unwrap();
        assert!(known);
        assert!(!unknown);
    }

    #[test]
    fn full_request_queue_raises_lua_error() {
        let lua = Lua::new();
        let requests = ModeRequests::new(1);
        install_scene_module(&lua, Arc::new(SceneRegistry::builtin()), requests.sender()).unwrap();

        lua.load("Scene.play('prologue')").exec().unwrap();
        let err = lua.load("Scene.play('prologue')").exec().unwrap_err();
        assert!(err.to_string().contains("Scene '01_prologue' could not be queued"));

        assert_eq!(requests.drain().len(), 1);
    }
}
