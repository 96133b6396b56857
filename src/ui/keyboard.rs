//! Keyboard forwarding to a UI view.

use super::UiView;
use crate::{
    config::Config,
    input::keyboard::{KeyCode, KeySet, KeyboardInputHandler},
};

use ::std::{collections::HashMap, time::Duration};
use ::tracing::{debug, trace};

/// Forwards key edges to an attached [`UiView`], with its own key repeat.
///
/// A key going down is sent as [`UiView::key_down`], and is claimed only if
/// the view handled it. While an accepted key stays down it remains claimed,
/// and `key_down` is sent again every time more than the configured repeat
/// interval has passed. A release is sent as [`UiView::key_up`].
///
/// Without an attached view every key passes through.
pub struct ViewKeyboardHandler<V> {
    view: Option<V>,
    key_repeat_interval: Duration,
    /// When each accepted key was last sent to the view.
    last_sent: HashMap<KeyCode, Duration>,
}

impl<V: UiView> ViewKeyboardHandler<V> {
    /// Constructs a handler with no view attached.
    pub fn new(config: &Config) -> Self {
        Self {
            view: None,
            key_repeat_interval: config.key_repeat_interval(),
            last_sent: HashMap::new(),
        }
    }

    /// Starts forwarding to `view`. Returns the previously attached view.
    pub fn attach(&mut self, view: V) -> Option<V> {
        debug!("Attaching view to keyboard handler");
        self.last_sent.clear();
        self.view.replace(view)
    }

    /// Stops forwarding, and returns the view. Keys still down are not
    /// released on the view.
    pub fn detach(&mut self) -> Option<V> {
        debug!("Detaching view from keyboard handler");
        self.last_sent.clear();
        self.view.take()
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut V> {
        self.view.as_mut()
    }
}

impl<V: UiView> KeyboardInputHandler for ViewKeyboardHandler<V> {
    fn process_keys(&mut self, pressed_keys: &KeySet, time: Duration) -> KeySet {
        let Self {
            view,
            key_repeat_interval,
            last_sent,
        } = self;
        let view = match view.as_mut() {
            Some(view) => view,
            None => return *pressed_keys,
        };

        let released: KeySet = last_sent
            .keys()
            .copied()
            .filter(|key| !pressed_keys.contains(*key))
            .collect();
        for key in released.iter() {
            trace!(%key, "Key up to view");
            last_sent.remove(&key);
            view.key_up(key);
        }

        let mut unclaimed = KeySet::new();
        for key in pressed_keys.iter() {
            match last_sent.get_mut(&key) {
                None => {
                    if view.key_down(key) {
                        trace!(%key, "Key down accepted by view");
                        last_sent.insert(key, time);
                    } else {
                        unclaimed.insert(key);
                    }
                }
                Some(sent) => {
                    if time.saturating_sub(*sent) > *key_repeat_interval {
                        trace!(%key, "Key repeat to view");
                        view.key_down(key);
                        *sent += *key_repeat_interval;
                    }
                }
            }
        }

        unclaimed
    }
}
