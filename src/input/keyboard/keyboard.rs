//! Keyboard level state, folded from discrete key events.

use super::{KeyCode, KeyEvent, KeySet};
use crate::{errors::Result, input::KeyboardStateReader};

use ::tracing::trace;

/// Tracks which keys are currently held, for hosts which learn about the
/// keyboard through discrete OS messages.
///
/// # Key Pressed Tracking
///
/// Most platforms communicate keyboard changes by sending messages to the
/// process. The input pipeline, however, works on frame-sampled state: a game
/// loop has a well-defined location in its update where it looks at which keys
/// are down and routes them to consumers. The [`Keyboard`] bridges the two. Key
/// events are folded into a persistent view of which keys are pressed as they
/// arrive, and the pipeline samples that view once per tick through
/// [`KeyboardStateReader`].
///
/// Because state is sampled, a key pressed and released between two samples
/// is never observed by the pipeline.
///
/// # Example
///
/// ```
/// use ::switchyard::input::{
///     keyboard::{KeyCode, KeyEvent, KeySet, Keyboard},
///     KeyboardStateReader,
/// };
///
/// let mut keyboard = Keyboard::new();
/// keyboard.process_evt(KeyEvent::KeyDown {
///     key_code: KeyCode::Left,
///     is_repeat: false,
/// });
///
/// assert!(keyboard.is_key_pressed(KeyCode::Left));
/// assert_eq!(keyboard.pressed_keys().unwrap(), KeySet::from([KeyCode::Left]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    /// Tracks the press state for the keyboard keys.
    pressed: KeySet,
}

impl Keyboard {
    /// Constructs a new keyboard with no keys pressed.
    pub fn new() -> Self {
        Self {
            pressed: KeySet::new(),
        }
    }

    /// Process an event from the host platform and update internal state.
    ///
    /// The event will be reflected in the next call to [`is_key_pressed`] and
    /// the next sample taken by the input pipeline.
    ///
    /// [`is_key_pressed`]: Self::is_key_pressed
    pub fn process_evt(&mut self, evt: KeyEvent) {
        match evt {
            KeyEvent::KeyDown {
                key_code,
                is_repeat,
            } => {
                if !is_repeat && self.pressed.insert(key_code) {
                    trace!(key = %key_code, "Key down");
                }
            }
            KeyEvent::KeyUp { key_code } => {
                if self.pressed.remove(key_code) {
                    trace!(key = %key_code, "Key up");
                }
            }
        }
    }

    /// Returns `true` if the given key is currently pressed, otherwise `false`.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(key)
    }

    /// Reset all keyboard state, for example when the host window loses focus
    /// and key up events can no longer be relied upon.
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}

impl KeyboardStateReader for Keyboard {
    fn pressed_keys(&mut self) -> Result<KeySet> {
        Ok(self.pressed)
    }
}
