//=========================================================================
// Mode Requests
//=========================================================================
//
// Queue for mode changes requested from outside the director's tick.
//
// Scripts (and any other thread) hold a `ModeRequestSender`. The director
// owns the `ModeRequests` end and drains it at the start of each tick,
// so a request never interrupts a frame that is already running.
//
//   ModeRequestSender ──try_send──► [bounded channel] ──drain──► director
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::ModeChange;

//=== ModeRequestSender ===================================================

/// Cloneable handle for requesting a mode change.
#[derive(Debug, Clone)]
pub struct ModeRequestSender {
    tx: Sender<ModeChange>,
}

impl ModeRequestSender {
    /// Queues `change` for the next tick.
    ///
    /// Returns `false` (and logs) if the queue is full or the director is
    /// gone; the request is dropped in that case.
    pub fn request(&self, change: ModeChange) -> bool {
        match self.tx.try_send(change) {
            Ok(()) => true,
            Err(TrySendError::Full(change)) => {
                warn!("Mode request queue full; dropping change to {:?}", change.target);
                false
            }
            Err(TrySendError::Disconnected(change)) => {
                warn!("Mode request receiver gone; dropping change to {:?}", change.target);
                false
            }
        }
    }
}

//=== ModeRequests ========================================================

/// Receiving end of the mode request queue.
#[derive(Debug)]
pub struct ModeRequests {
    tx: Sender<ModeChange>,
    rx: Receiver<ModeChange>,
}

impl ModeRequests {
    /// Creates a queue holding at most `capacity` pending requests.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Mode request capacity must be positive");
        let (tx, rx) = bounded(capacity);
        Self { tx, rx }
    }

    /// A new sender feeding this queue.
    pub fn sender(&self) -> ModeRequestSender {
        ModeRequestSender { tx: self.tx.clone() }
    }

    /// Takes every pending request, oldest first.
    pub fn drain(&self) -> Vec<ModeChange> {
        self.rx.try_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::GameMode;

    #[test]
    fn drain_returns_requests_in_order() {
        let requests = ModeRequests::new(4);
        let sender = requests.sender();
        assert!(sender.request(ModeChange::play_scene("a")));
        assert!(sender.request(ModeChange::new(GameMode::Level)));
        assert_eq!(requests.len(), 2);

        let drained = requests.drain();
        assert_eq!(drained[0].scene_to_load(), Some("a"));
        assert_eq!(drained[1].target, GameMode::Level);
        assert!(requests.is_empty());
    }

    #[test]
    fn full_queue_drops_request() {
        let requests = ModeRequests::new(1);
        let sender = requests.sender();
        assert!(sender.request(ModeChange::new(GameMode::Level)));
        assert!(!sender.request(ModeChange::new(GameMode::World)));
        assert_eq!(requests.drain().len(), 1);
    }

    #[test]
    fn senders_work_across_threads() {
        let requests = ModeRequests::new(8);
        let sender = requests.sender();
        std::thread::spawn(move || sender.request(ModeChange::play_scene("b")))
            .join()
            .unwrap();
        assert_eq!(requests.drain().len(), 1);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = ModeRequests::new(0);
    }
}
