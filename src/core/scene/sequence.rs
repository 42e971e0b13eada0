//=========================================================================
// Action Sequence
//=========================================================================
//
// FIFO queue of actions, drained from the head.
//
// advance():
//   loop {
//       head.execute() == true  → drop head, continue with the next one
//       head.execute() == false → stop; head stays and receives input
//       queue empty             → stop
//   }
//
// Several zero-duration actions therefore finish within one frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::debug;

//=== Internal Dependencies ===============================================

use super::action::{Action, ActionContext};
use super::stage::Stage;
use super::transition::NextMode;
use crate::core::error::Result;

//=== ActionSequence ======================================================

/// Ordered actions of one scene. Insertion order is execution order.
#[derive(Debug, Default, Clone)]
pub struct ActionSequence {
    actions: VecDeque<Action>,
}

impl ActionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a declarative sequence builder.
    pub fn builder() -> SequenceBuilder {
        SequenceBuilder::default()
    }

    /// Appends an action to the end of the sequence.
    pub fn push(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    /// Executes actions from the head until one blocks or none remain.
    ///
    /// Returns the number of actions that finished. Calling this on an
    /// empty sequence does nothing.
    pub fn advance(&mut self, stage: &mut Stage, ctx: &mut ActionContext<'_>) -> usize {
        let mut finished = 0;

        while let Some(head) = self.actions.front_mut() {
            if !head.execute(stage, ctx) {
                break;
            }
            if let Some(done) = self.actions.pop_front() {
                debug!("Action {} finished", done.kind());
            }
            finished += 1;
        }

        finished
    }

    /// The action currently receiving input, if any.
    pub fn head(&self) -> Option<&Action> {
        self.actions.front()
    }

    pub fn head_mut(&mut self) -> Option<&mut Action> {
        self.actions.front_mut()
    }

    /// Remaining actions, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<Action> for ActionSequence {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self { actions: iter.into_iter().collect() }
    }
}

//=== SequenceBuilder =====================================================

/// Builds the action list of a story scene.
///
/// Methods taking paths validate them and return an error on bad input,
/// so a broken script fails when the scene is constructed rather than
/// while it plays.
///
/// # Example
///
/// ```
/// use storyline_engine::core::scene::{ActionSequence, NextMode};
///
/// # fn main() -> storyline_engine::core::Result<()> {
/// let sequence = ActionSequence::builder()
///     .image("scene_images/night.png")?
///     .music("story/calm.ogg")?
///     .narrate(["It was a quiet night."])
///     .wait_seconds(1.5)
///     .next_up(NextMode::Level, None, None)
///     .build();
///
/// assert_eq!(sequence.len(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    sequence: ActionSequence,
}

impl SequenceBuilder {
    pub fn image(mut self, path: &str) -> Result<Self> {
        self.sequence.push(Action::image_change(path)?);
        Ok(self)
    }

    pub fn music(mut self, path: &str) -> Result<Self> {
        self.sequence.push(Action::music_change(path)?);
        Ok(self)
    }

    pub fn wait_for_confirm(mut self) -> Self {
        self.sequence.push(Action::wait_return());
        self
    }

    pub fn wait_seconds(mut self, seconds: f32) -> Self {
        self.sequence.push(Action::wait_time(seconds));
        self
    }

    pub fn narrate<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sequence.push(Action::narration(messages));
        self
    }

    pub fn next_up(mut self, next_mode: NextMode, name: Option<&str>, entry: Option<&str>) -> Self {
        self.sequence.push(Action::next_up(next_mode, name, entry));
        self
    }

    pub fn build(self) -> ActionSequence {
        self.sequence
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::MutedAudio;
    use crate::core::globals::SceneConfig;
    use crate::core::input::{ConfirmBindings, KeyCode, KeyEvent};

    fn advance(sequence: &mut ActionSequence, stage: &mut Stage) -> usize {
        let config = SceneConfig::default();
        let mut audio = MutedAudio;
        let mut ctx = ActionContext { audio: &mut audio, config: &config, speed_factor: 1.0 };
        sequence.advance(stage, &mut ctx)
    }

    #[test]
    fn zero_duration_actions_drain_in_one_call() {
        let mut sequence = ActionSequence::builder()
            .image("a.png").unwrap()
            .music("a.ogg").unwrap()
            .next_up(NextMode::World, Some("world_1"), None)
            .wait_for_confirm()
            .build();
        let mut stage = Stage::new();

        assert_eq!(advance(&mut sequence, &mut stage), 3);
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence.head().map(Action::kind), Some("WaitReturn"));
        assert_eq!(stage.image.image(), Some("a.png"));
        assert!(stage.is_armed());
    }

    #[test]
    fn blocked_head_is_not_advanced_again() {
        let mut sequence = ActionSequence::builder().wait_for_confirm().image("b.png").unwrap().build();
        let mut stage = Stage::new();

        assert_eq!(advance(&mut sequence, &mut stage), 0);
        assert_eq!(advance(&mut sequence, &mut stage), 0);
        assert_eq!(stage.image.image(), None);

        if let Some(head) = sequence.head_mut() {
            head.key_down(&KeyEvent::new(KeyCode::Enter), &ConfirmBindings::default());
        }
        assert_eq!(advance(&mut sequence, &mut stage), 2);
        assert!(sequence.is_empty());
    }

    #[test]
    fn advancing_empty_sequence_is_noop() {
        let mut sequence = ActionSequence::new();
        let mut stage = Stage::new();
        assert_eq!(advance(&mut sequence, &mut stage), 0);
        assert_eq!(advance(&mut sequence, &mut stage), 0);
        assert!(sequence.head().is_none());
    }

    #[test]
    fn collects_from_iterator_in_order() {
        let sequence: ActionSequence = vec![Action::wait_return(), Action::wait_time(1.0)]
            .into_iter()
            .collect();
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.head().map(Action::kind), Some("WaitReturn"));
    }

    #[test]
    fn builder_rejects_empty_image() {
        assert!(ActionSequence::builder().image("").is_err());
    }
}
