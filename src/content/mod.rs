//=========================================================================
// Story Content
//=========================================================================
//
// The cutscenes shipped with the game.
//
// Each scene is a function building its action sequence. Registration
// names follow the `NN_name` convention so scenes sort in story order;
// every scene also gets a short alias for scripts.
//
//=========================================================================

//=== Module Declarations =================================================

mod prologue;

//=== Public API ==========================================================

pub use prologue::prologue;

use crate::core::scene::SceneRegistryBuilder;

/// Adds every built-in scene to `builder`.
pub fn register_builtin(builder: SceneRegistryBuilder) -> SceneRegistryBuilder {
    builder
        .register(prologue::NAME, prologue)
        .alias("prologue", prologue::NAME)
}
