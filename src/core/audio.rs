//=========================================================================
// Audio Bridge
//=========================================================================
//
// Music commands issued by scenes.
//
// The mixer lives outside this crate. Scenes only ever start a looped
// music track or fade the current one out, so the contract is two calls.
//
// Architecture:
// ```text
//   Scene / Action ──play_music()──► ChannelAudio ──try_send──► Mixer thread
//                                          │
//                                   crossbeam bounded
// ```
//
// Sending never blocks the frame: a full or disconnected channel drops
// the command and logs a warning.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, warn};

//=== Audio Trait =========================================================

/// Music playback collaborator used by scenes.
pub trait Audio: Send {
    /// Starts playing `path`.
    ///
    /// `force_restart` restarts the track even if it is already playing.
    /// `fade_in_ms` of zero starts at full volume. Returns `false` if the
    /// request could not be delivered.
    fn play_music(&mut self, path: &str, looped: bool, force_restart: bool, fade_in_ms: u32) -> bool;

    /// Fades out the current music over `ms` milliseconds.
    fn fadeout_music(&mut self, ms: u32);
}

//=== AudioCommand ========================================================

/// A music request as it travels to the mixer thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCommand {
    PlayMusic {
        path: String,
        looped: bool,
        force_restart: bool,
        fade_in_ms: u32,
    },
    FadeoutMusic {
        ms: u32,
    },
}

//=== ChannelAudio ========================================================

/// [`Audio`] implementation that forwards commands over a bounded channel.
///
/// # Example
///
/// ```
/// use storyline_engine::core::audio::{Audio, AudioCommand, ChannelAudio};
///
/// let (mut audio, mixer) = ChannelAudio::new(16);
/// audio.fadeout_music(500);
///
/// assert_eq!(mixer.try_recv(), Ok(AudioCommand::FadeoutMusic { ms: 500 }));
/// ```
pub struct ChannelAudio {
    sender: Sender<AudioCommand>,
}

impl ChannelAudio {
    /// Creates the bridge and returns the receiving end for the mixer.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> (Self, Receiver<AudioCommand>) {
        assert!(capacity > 0, "Audio channel capacity must be positive");
        let (sender, receiver) = bounded(capacity);
        (Self { sender }, receiver)
    }

    fn send(&self, command: AudioCommand) -> bool {
        match self.sender.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(command)) => {
                warn!("Audio channel full, dropping {:?}", command);
                false
            }
            Err(TrySendError::Disconnected(command)) => {
                warn!("Audio mixer disconnected, dropping {:?}", command);
                false
            }
        }
    }
}

impl Audio for ChannelAudio {
    fn play_music(&mut self, path: &str, looped: bool, force_restart: bool, fade_in_ms: u32) -> bool {
        debug!("Play music {} (loop: {}, fade in: {}ms)", path, looped, fade_in_ms);
        self.send(AudioCommand::PlayMusic {
            path: path.to_string(),
            looped,
            force_restart,
            fade_in_ms,
        })
    }

    fn fadeout_music(&mut self, ms: u32) {
        debug!("Fade out music over {}ms", ms);
        self.send(AudioCommand::FadeoutMusic { ms });
    }
}

//=== MutedAudio ==========================================================

/// [`Audio`] implementation that discards every command.
///
/// Used when the game runs without sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutedAudio;

impl Audio for MutedAudio {
    fn play_music(&mut self, _path: &str, _looped: bool, _force_restart: bool, _fade_in_ms: u32) -> bool {
        true
    }

    fn fadeout_music(&mut self, _ms: u32) {}
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_music_forwards_all_parameters() {
        let (mut audio, mixer) = ChannelAudio::new(4);
        assert!(audio.play_music("story/theme_1.ogg", true, false, 1000));

        assert_eq!(
            mixer.try_recv(),
            Ok(AudioCommand::PlayMusic {
                path: "story/theme_1.ogg".into(),
                looped: true,
                force_restart: false,
                fade_in_ms: 1000,
            })
        );
    }

    #[test]
    fn commands_arrive_in_order() {
        let (mut audio, mixer) = ChannelAudio::new(4);
        audio.play_music("a.ogg", true, false, 0);
        audio.fadeout_music(1000);

        let received: Vec<_> = mixer.try_iter().collect();
        assert_eq!(received.len(), 2);
        assert!(matches!(received[0], AudioCommand::PlayMusic { .. }));
        assert_eq!(received[1], AudioCommand::FadeoutMusic { ms: 1000 });
    }

    #[test]
    fn full_channel_drops_without_blocking() {
        let (mut audio, mixer) = ChannelAudio::new(1);
        assert!(audio.play_music("a.ogg", true, false, 0));
        assert!(!audio.play_music("b.ogg", true, false, 0), "Second send should be dropped");
        assert_eq!(mixer.len(), 1);
    }

    #[test]
    fn disconnected_mixer_reports_failure() {
        let (mut audio, mixer) = ChannelAudio::new(4);
        drop(mixer);
        assert!(!audio.play_music("a.ogg", true, false, 0));
        audio.fadeout_music(100);
    }

    #[test]
    #[should_panic(expected = "Audio channel capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = ChannelAudio::new(0);
    }

    #[test]
    fn muted_audio_accepts_everything() {
        let mut audio = MutedAudio;
        assert!(audio.play_music("a.ogg", false, true, 0));
        audio.fadeout_music(10);
    }
}
