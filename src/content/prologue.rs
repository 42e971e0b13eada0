//=========================================================================
// Prologue
//=========================================================================
//
// Opening scene of a new game: a lone traveller lost in the desert at
// dusk. Ends by entering the first overworld.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::Result;
use crate::core::scene::{ActionSequence, NextMode};

//=== Prologue ============================================================

/// Registry name of the prologue.
pub(crate) const NAME: &str = "01_prologue";

/// Builds the prologue's action sequence.
pub fn prologue() -> Result<ActionSequence> {
    Ok(ActionSequence::builder()
        .image("scene_images/placeholder.png")?
        .music("story/theme_1.ogg")?
        .narrate([
            "The last light of the setting sun spilled across the Eastern Desert \
             as a lone traveller climbed dune after dune.",
            "From the crest of the tallest dune he looked out, and saw sand. \
             Beyond it, more sand. Beyond that, sand again.",
            "He unfolded his map, but no star had yet appeared in the darkening \
             sky, and nothing in this endless sea of dunes could tell him the way.",
        ])
        .next_up(NextMode::World, Some("world_1"), None)
        .build())
}

//=========================================================================
// Unit Tests
//=========================================================================
