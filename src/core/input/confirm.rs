//=========================================================================
// Confirm Bindings
//=========================================================================
//
// Which inputs count as "confirm" inside a cutscene.
//
// Narration boxes and return-prompts advance on the confirm input. The
// game usually maps its jump, shoot and menu-accept keys here so that
// players do not need to learn a separate key for story scenes.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::{JoyButton, KeyCode, KeyEvent};

//=== ConfirmBindings =====================================================

/// Keys and joystick buttons that acknowledge story prompts.
///
/// # Example
///
/// ```
/// use storyline_engine::prelude::*;
///
/// let bindings = ConfirmBindings::new()
///     .with_key(KeyCode::Enter)
///     .with_joy_button(JoyButton(0));
///
/// assert!(bindings.accepts_key(&KeyEvent::new(KeyCode::Enter)));
/// assert!(!bindings.accepts_key(&KeyEvent::new(KeyCode::Escape)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmBindings {
    keys: Vec<KeyCode>,
    joy_buttons: Vec<JoyButton>,
}

impl ConfirmBindings {
    /// Creates an empty binding set. Nothing confirms until bound.
    pub fn new() -> Self {
        Self { keys: Vec::new(), joy_buttons: Vec::new() }
    }

    /// Adds a confirm key.
    pub fn with_key(mut self, key: KeyCode) -> Self {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
        self
    }

    /// Adds a confirm joystick button.
    pub fn with_joy_button(mut self, button: JoyButton) -> Self {
        if !self.joy_buttons.contains(&button) {
            self.joy_buttons.push(button);
        }
        self
    }

    /// Returns `true` if `event` is a confirm key press.
    ///
    /// Modifiers are ignored: Shift+Enter still confirms.
    pub fn accepts_key(&self, event: &KeyEvent) -> bool {
        self.keys.contains(&event.key)
    }

    /// Returns `true` if `button` is a confirm joystick button.
    pub fn accepts_joy_button(&self, button: JoyButton) -> bool {
        self.joy_buttons.contains(&button)
    }

    /// Bound confirm keys, in binding order.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }
}

impl Default for ConfirmBindings {
    /// Enter (menu accept), Space (jump) and S (shoot); joystick buttons 0 and 1.
    fn default() -> Self {
        Self::new()
            .with_key(KeyCode::Enter)
            .with_key(KeyCode::Space)
            .with_key(KeyCode::KeyS)
            .with_joy_button(JoyButton(0))
            .with_joy_button(JoyButton(1))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
