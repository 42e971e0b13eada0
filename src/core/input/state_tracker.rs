//=========================================================================
// State Tracker
//=========================================================================
//
// Held-input bookkeeping shared by the game loop and the active scene.
//
// Architecture:
//   Scene::key_down/joy_button_down → record_*() → HashSet → query
//
// Leaving a scene resets the joystick latches so a button held during
// the cutscene does not leak into the next game mode.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::debug;

//=== Internal Dependencies ===============================================

use super::event::{JoyButton, KeyCode, KeyEvent, Modifiers, MouseButton};

//=== StateTracker ========================================================

/// Tracks which keys, mouse buttons and joystick buttons are held.
pub struct StateTracker {
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    joy_buttons_down: HashSet<JoyButton>,
    modifiers: Modifiers,
}

impl StateTracker {
    /// Creates a new state tracker with nothing held.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            joy_buttons_down: HashSet::new(),
            modifiers: Modifiers::NONE,
        }
    }

    //--- Recording --------------------------------------------------------

    /// Records a key press. Returns `true` if the key was not already held.
    pub fn record_key_down(&mut self, event: &KeyEvent) -> bool {
        self.modifiers = event.modifiers;
        self.keys_down.insert(event.key)
    }

    /// Records a key release. Returns `true` if the key was held.
    pub fn record_key_up(&mut self, event: &KeyEvent) -> bool {
        self.modifiers = event.modifiers;
        self.keys_down.remove(&event.key)
    }

    /// Records a mouse button press.
    pub fn record_mouse_down(&mut self, button: MouseButton) -> bool {
        self.mouse_buttons_down.insert(button)
    }

    /// Records a mouse button release.
    pub fn record_mouse_up(&mut self, button: MouseButton) -> bool {
        self.mouse_buttons_down.remove(&button)
    }

    /// Records a joystick button press.
    pub fn record_joy_down(&mut self, button: JoyButton) -> bool {
        self.joy_buttons_down.insert(button)
    }

    /// Records a joystick button release.
    pub fn record_joy_up(&mut self, button: JoyButton) -> bool {
        self.joy_buttons_down.remove(&button)
    }

    /// Forgets every latched joystick button.
    pub fn reset_joystick(&mut self) {
        if !self.joy_buttons_down.is_empty() {
            debug!("Releasing {} latched joystick button(s)", self.joy_buttons_down.len());
        }
        self.joy_buttons_down.clear();
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for joystick buttons.
    pub fn is_joy_down(&self, button: JoyButton) -> bool {
        self.joy_buttons_down.contains(&button)
    }

    /// Returns the modifier state of the most recent key event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Returns the number of joystick buttons currently latched.
    pub fn joy_buttons_held(&self) -> usize {
        self.joy_buttons_down.len()
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_then_up() {
        let mut tracker = StateTracker::new();
        let event = KeyEvent::new(KeyCode::Enter);

        assert!(tracker.record_key_down(&event));
        assert!(tracker.is_key_down(KeyCode::Enter));

        assert!(tracker.record_key_up(&event));
        assert!(!tracker.is_key_down(KeyCode::Enter));
    }

    #[test]
    fn duplicate_key_down_reports_no_change() {
        let mut tracker = StateTracker::new();
        let event = KeyEvent::new(KeyCode::Space);

        assert!(tracker.record_key_down(&event));
        assert!(!tracker.record_key_down(&event), "Second press should be a no-op");
    }

    #[test]
    fn key_up_without_down_ignored() {
        let mut tracker = StateTracker::new();
        assert!(!tracker.record_key_up(&KeyEvent::new(KeyCode::KeyA)));
    }

    #[test]
    fn modifiers_follow_latest_key_event() {
        let mut tracker = StateTracker::new();
        tracker.record_key_down(&KeyEvent::new(KeyCode::KeyS).with_modifiers(Modifiers::CTRL));
        assert_eq!(tracker.modifiers(), Modifiers::CTRL);

        tracker.record_key_up(&KeyEvent::new(KeyCode::KeyS));
        assert_eq!(tracker.modifiers(), Modifiers::NONE);
    }

    #[test]
    fn mouse_buttons_tracked_independently() {
        let mut tracker = StateTracker::new();
        tracker.record_mouse_down(MouseButton::Left);
        assert!(tracker.is_button_down(MouseButton::Left));
        assert!(!tracker.is_button_down(MouseButton::Right));

        tracker.record_mouse_up(MouseButton::Left);
        assert!(!tracker.is_button_down(MouseButton::Left));
    }

    #[test]
    fn reset_joystick_clears_only_joystick_latches() {
        let mut tracker = StateTracker::new();
        tracker.record_key_down(&KeyEvent::new(KeyCode::KeyW));
        tracker.record_joy_down(JoyButton(0));
        tracker.record_joy_down(JoyButton(3));
        assert_eq!(tracker.joy_buttons_held(), 2);

        tracker.reset_joystick();

        assert_eq!(tracker.joy_buttons_held(), 0);
        assert!(!tracker.is_joy_down(JoyButton(0)));
        assert!(tracker.is_key_down(KeyCode::KeyW), "Keyboard state must survive");
    }
}
