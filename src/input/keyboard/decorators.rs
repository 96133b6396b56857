//! Composable wrappers which give a [`HandlerFunction`] edge or timing
//! semantics.
//!
//! Decorators accept anything callable as a handler, including another
//! decorator's output, so they nest:
//!
//! ```
//! use ::std::time::Duration;
//! use ::switchyard::input::keyboard::{at_key_down, with_repeat_delay, KeyStroke};
//!
//! let scroll = with_repeat_delay(
//!     |stroke: &KeyStroke<'_, ()>| {
//!         println!("scroll at {:?}", stroke.time);
//!         true
//!     },
//!     Duration::from_millis(400),
//!     Some(Duration::from_millis(50)),
//! );
//! let confirm = at_key_down(|_: &KeyStroke<'_, ()>| true);
//! # let _ = (scroll, confirm);
//! ```

use super::{HandlerFunction, KeyCode, KeyStroke, KeyTransition};

use ::std::{collections::HashMap, time::Duration};
use ::tracing::trace;

/// Invokes `handler` only when the key goes down.
///
/// Every other stroke is claimed without invoking `handler`, so the key does
/// not leak to later handlers while it is held or when it is released.
pub fn at_key_down<S, F>(mut handler: F) -> HandlerFunction<S>
where
    S: 'static,
    F: FnMut(&KeyStroke<'_, S>) -> bool + 'static,
{
    Box::new(move |stroke: &KeyStroke<'_, S>| match stroke.transition {
        KeyTransition::Pressed => handler(stroke),
        KeyTransition::Held | KeyTransition::Released => true,
    })
}

/// Invokes `handler` only when the key is released.
///
/// Every other stroke is claimed without invoking `handler`. Claiming the key
/// while it is down is what gets its release delivered.
pub fn at_key_up<S, F>(mut handler: F) -> HandlerFunction<S>
where
    S: 'static,
    F: FnMut(&KeyStroke<'_, S>) -> bool + 'static,
{
    Box::new(move |stroke: &KeyStroke<'_, S>| match stroke.transition {
        KeyTransition::Released => handler(stroke),
        KeyTransition::Pressed | KeyTransition::Held => true,
    })
}

/// Invokes `handler` when the key goes down, then again after `first_delay`
/// while the key stays held, and every `next_delay` after that.
///
/// `next_delay` defaults to `first_delay`. Strokes between fires are claimed.
/// The release is not claimed, and clears the key's schedule so the next
/// press starts over. If `handler` declines a fire, the key passes through
/// unclaimed and its schedule is dropped.
///
/// Fires happen on the first pass at or after the scheduled time. When a
/// pass arrives so late that the following fire would already be due, the
/// schedule is re-anchored on that pass rather than firing repeatedly to
/// catch up.
pub fn with_repeat_delay<S, F>(
    mut handler: F,
    first_delay: Duration,
    next_delay: Option<Duration>,
) -> HandlerFunction<S>
where
    S: 'static,
    F: FnMut(&KeyStroke<'_, S>) -> bool + 'static,
{
    let next_delay = next_delay.unwrap_or(first_delay);
    let mut next_fire: HashMap<KeyCode, Duration> = HashMap::new();

    Box::new(move |stroke: &KeyStroke<'_, S>| {
        let key = stroke.key;
        let due = match stroke.transition {
            KeyTransition::Released => {
                next_fire.remove(&key);
                return false;
            }
            KeyTransition::Pressed => None,
            // Held without a schedule, e.g. the binding was swapped in while
            // the key was down. Treated as a fresh press.
            KeyTransition::Held => match next_fire.get(&key) {
                Some(&due) if stroke.time < due => return true,
                scheduled => scheduled.copied(),
            },
        };

        if !handler(stroke) {
            next_fire.remove(&key);
            return false;
        }

        let next = match due {
            None => stroke.time.saturating_add(first_delay),
            Some(due) => {
                let next = due.saturating_add(next_delay);
                if next > stroke.time {
                    next
                } else {
                    stroke.time.saturating_add(next_delay)
                }
            }
        };
        trace!(%key, ?next, "Scheduled key repeat");
        next_fire.insert(key, next);
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keyboard::{KeyCode, KeySet, KeyboardInputRegister};

    use ::pretty_assertions::assert_eq;
    use ::std::{cell::RefCell, rc::Rc};

    type Fired = Rc<RefCell<Vec<(u64, KeyTransition)>>>;

    fn counter(fired: &Fired) -> impl FnMut(&KeyStroke<'_, ()>) -> bool + 'static {
        let fired = fired.clone();
        move |stroke: &KeyStroke<'_, ()>| {
            fired
                .borrow_mut()
                .push((stroke.time.as_millis() as u64, stroke.transition));
            true
        }
    }

    fn times(fired: &Fired) -> Vec<u64> {
        fired.borrow().iter().map(|(time, _)| *time).collect()
    }

    /// Replays a script of `(time_ms, is_down)` samples for a single key.
    fn replay(
        register: &mut KeyboardInputRegister<()>,
        key: KeyCode,
        script: &[(u64, bool)],
    ) -> Vec<KeySet> {
        script
            .iter()
            .map(|&(time, down)| {
                let pressed = if down { KeySet::from([key]) } else { KeySet::new() };
                register.process_keys(&pressed, &(), Duration::from_millis(time))
            })
            .collect()
    }

    fn hold(from: u64, to: u64, step: u64) -> Vec<(u64, bool)> {
        (from..=to).step_by(step as usize).map(|time| (time, true)).collect()
    }

    #[test]
    fn test_at_key_down_fires_once() {
        let fired = Fired::default();
        let mut register = KeyboardInputRegister::new();
        register.register_key(KeyCode::Enter, (), at_key_down(counter(&fired)));

        let mut script = hold(0, 100, 20);
        script.push((120, false));
        let unclaimed = replay(&mut register, KeyCode::Enter, &script);

        assert_eq!(*fired.borrow(), vec![(0, KeyTransition::Pressed)]);
        assert!(unclaimed.iter().all(KeySet::is_empty), "Held key must stay claimed");
    }

    #[test]
    fn test_at_key_up_fires_once() {
        let fired = Fired::default();
        let mut register = KeyboardInputRegister::new();
        register.register_key(KeyCode::Escape, (), at_key_up(counter(&fired)));

        let mut script = hold(0, 100, 20);
        script.extend([(120, false), (140, false)]);
        replay(&mut register, KeyCode::Escape, &script);

        assert_eq!(*fired.borrow(), vec![(120, KeyTransition::Released)]);
    }

    #[test]
    fn test_repeat_delay_single_phase() {
        let fired = Fired::default();
        let mut register = KeyboardInputRegister::new();
        register.register_key(
            KeyCode::Down,
            (),
            with_repeat_delay(counter(&fired), Duration::from_millis(100), None),
        );

        replay(&mut register, KeyCode::Down, &[(0, true), (60, true)]);
        assert_eq!(times(&fired), vec![0], "Must not fire before the first delay");

        replay(&mut register, KeyCode::Down, &[(100, true), (150, true), (200, true)]);
        assert_eq!(times(&fired), vec![0, 100, 200]);
    }

    #[test]
    fn test_repeat_delay_two_phase() {
        let fired = Fired::default();
        let mut register = KeyboardInputRegister::new();
        register.register_key(
            KeyCode::Down,
            (),
            with_repeat_delay(
                counter(&fired),
                Duration::from_millis(100),
                Some(Duration::from_millis(50)),
            ),
        );

        replay(&mut register, KeyCode::Down, &hold(0, 250, 10));
        assert_eq!(times(&fired), vec![0, 100, 150, 200, 250]);
        assert_eq!(fired.borrow()[1].1, KeyTransition::Held);
    }

    #[test]
    fn test_repeat_delay_release_resets_schedule() {
        let fired = Fired::default();
        let mut register = KeyboardInputRegister::new();
        register.register_key(
            KeyCode::Down,
            (),
            with_repeat_delay(counter(&fired), Duration::from_millis(100), None),
        );

        let unclaimed = replay(
            &mut register,
            KeyCode::Down,
            &[(0, true), (50, false), (60, true), (110, true), (160, true)],
        );

        assert_eq!(times(&fired), vec![0, 60, 160]);
        assert!(unclaimed.iter().all(KeySet::is_empty));
    }

    /// The release is delivered but left unclaimed, and the wrapped handler
    /// is not told about it.
    #[test]
    fn test_repeat_delay_release_not_claimed() {
        let fired = Fired::default();
        let mut handler = with_repeat_delay(counter(&fired), Duration::from_millis(100), None);

        let stroke = |time, transition| KeyStroke {
            key: KeyCode::Up,
            state: &(),
            time: Duration::from_millis(time),
            transition,
        };
        assert!(handler(&stroke(0, KeyTransition::Pressed)));
        assert!(!handler(&stroke(20, KeyTransition::Released)));
        assert_eq!(fired.borrow().len(), 1);
    }

    #[test]
    fn test_repeat_delay_stall_does_not_burst() {
        let fired = Fired::default();
        let mut register = KeyboardInputRegister::new();
        register.register_key(
            KeyCode::Right,
            (),
            with_repeat_delay(counter(&fired), Duration::from_millis(100), None),
        );

        replay(
            &mut register,
            KeyCode::Right,
            &[(0, true), (450, true), (460, true), (540, true), (550, true)],
        );

        assert_eq!(times(&fired), vec![0, 450, 550]);
    }

    #[test]
    fn test_repeat_delay_unbounded_fires_once() {
        let fired = Fired::default();
        let mut register = KeyboardInputRegister::new();
        register.register_key(
            KeyCode::Up,
            (),
            with_repeat_delay(counter(&fired), Duration::MAX, None),
        );

        let unclaimed = replay(&mut register, KeyCode::Up, &hold(16, 160, 16));

        assert_eq!(times(&fired), vec![16]);
        assert!(unclaimed.iter().all(KeySet::is_empty), "Held key must stay claimed");
    }

    #[test]
    fn test_repeat_delay_near_clock_limit() {
        let mut handler = with_repeat_delay(
            |_: &KeyStroke<'_, ()>| true,
            Duration::from_millis(100),
            None,
        );
        let late = Duration::MAX - Duration::from_millis(50);
        let stroke = |time, transition| KeyStroke {
            key: KeyCode::Up,
            state: &(),
            time,
            transition,
        };

        assert!(handler(&stroke(late, KeyTransition::Pressed)));
        assert!(handler(&stroke(Duration::MAX, KeyTransition::Held)));
        assert!(handler(&stroke(Duration::MAX, KeyTransition::Held)));
    }

    #[test]
    fn test_repeat_delay_declined_fire_passes_through() {
        let mut register = KeyboardInputRegister::new();
        register.register_key(
            KeyCode::Tab,
            (),
            with_repeat_delay(|_: &KeyStroke<'_, ()>| false, Duration::from_millis(100), None),
        );

        let unclaimed = replay(&mut register, KeyCode::Tab, &[(0, true), (16, true)]);
        assert_eq!(unclaimed, vec![KeySet::from([KeyCode::Tab]); 2]);
    }

    #[test]
    fn test_decorators_compose() {
        let fired = Fired::default();
        let mut register = KeyboardInputRegister::new();
        register.register_key(
            KeyCode::Space,
            (),
            at_key_down(with_repeat_delay(counter(&fired), Duration::from_millis(100), None)),
        );

        replay(&mut register, KeyCode::Space, &hold(0, 300, 50));
        assert_eq!(times(&fired), vec![0]);
    }
}
