//=========================================================================
// Global Engine State
//=========================================================================
//
// Explicit context handed to scenes instead of process-wide pointers.
//
// Architecture:
//   SceneConfig:   playback tunables (set via SceneDirectorBuilder)
//   GlobalContext: camera/focus slots, overlays, input, audio, config
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod scene_config;

//=== Public API ==========================================================

pub use global_context::GlobalContext;
pub use scene_config::SceneConfig;
