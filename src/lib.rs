//=========================================================================
// Storyline Engine — Library Root
//
// Cutscene sequencing for a 2D platformer: scripted story scenes played
// between levels, and the game-mode switching around them.
//
// Responsibilities:
// - Expose the scene director (`SceneDirector`) that a game loop ticks
// - Provide the scene building blocks (actions, sequences, registry)
// - Ship the built-in story scenes and the Lua binding that plays them
//
// Typical usage:
// ```no_run
// use storyline_engine::prelude::*;
//
// let mut director = SceneDirectorBuilder::new().build();
// director.play_scene("prologue")?;
// loop {
//     director.tick(1.0)?;
// }
// # Ok::<(), SceneError>(())
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the scene system and the collaborators it talks to
// (input, audio, rendering state, game world). `content` holds the
// story scenes. `scripting` is the Lua binding, behind the `scripting`
// feature.
//
pub mod content;
pub mod core;
pub mod prelude;

#[cfg(feature = "scripting")]
pub mod scripting;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the director and its builder; both are re-exported
// below.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{SceneDirector, SceneDirectorBuilder};
