//! Discrete key events, for hosts which receive keyboard changes as a stream
//! of OS messages rather than a polled snapshot.

use super::KeyCode;

/// A key transition reported by the host platform. These are consumed by the
/// [`Keyboard`] reader, which folds them into level state that can be sampled
/// once per tick.
///
/// [`Keyboard`]: crate::input::keyboard::Keyboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    KeyDown {
        key_code: KeyCode,
        /// `true` if the platform reports this as an auto-repeat of a key
        /// which was already down.
        is_repeat: bool,
    },
    KeyUp {
        key_code: KeyCode,
    },
}

impl KeyEvent {
    /// The key this event refers to.
    pub const fn key_code(&self) -> KeyCode {
        match *self {
            Self::KeyDown { key_code, .. } | Self::KeyUp { key_code } => key_code,
        }
    }

    /// Adapts a raw virtual-key value into a [`KeyEvent`]. Returns `None` if
    /// the value does not name a known key.
    pub fn from_raw(value: u8, is_down: bool, is_repeat: bool) -> Option<Self> {
        KeyCode::try_from(value).ok().map(|key_code| {
            if is_down {
                Self::KeyDown {
                    key_code,
                    is_repeat,
                }
            } else {
                Self::KeyUp { key_code }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    /// Pressing 'h'.
    #[test]
    fn test_key_down() {
        let event = KeyEvent::from_raw(0x48, true, false).unwrap();
        assert_eq!(
            event,
            KeyEvent::KeyDown {
                key_code: KeyCode::H,
                is_repeat: false,
            }
        );
    }

    /// Releasing 'h'.
    #[test]
    fn test_key_up() {
        let event = KeyEvent::from_raw(0x48, false, true)
            .expect("Valid key up event should be adapted");
        assert_eq!(event, KeyEvent::KeyUp { key_code: KeyCode::H });
        assert_eq!(event.key_code(), KeyCode::H);
    }

    #[test]
    fn test_unknown_key_is_dropped() {
        assert_eq!(KeyEvent::from_raw(0xFF, true, false), None);
    }
}
