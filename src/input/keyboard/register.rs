//! Keyed dispatch: `(key, state) -> handler` lookup with edge detection.

use super::{KeyCode, KeySet, KeyboardInputHandler};

use ::std::{collections::HashMap, fmt, hash::Hash, time::Duration};
use ::tracing::{debug, trace};

/// How a key's pressed state changed between two passes of a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyTransition {
    /// The key is down now, and was not claimed in the previous pass.
    Pressed,
    /// The key is down now, and was claimed in the previous pass.
    Held,
    /// The key was claimed in the previous pass, and is no longer down.
    Released,
}

/// A single key as presented to a [`HandlerFunction`].
#[derive(Debug)]
pub struct KeyStroke<'a, S> {
    pub key: KeyCode,
    /// The application state the binding was looked up with.
    pub state: &'a S,
    pub time: Duration,
    pub transition: KeyTransition,
}

impl<S> KeyStroke<'_, S> {
    /// Returns `true` if the key is down in the current pass.
    pub fn is_live(&self) -> bool {
        !matches!(self.transition, KeyTransition::Released)
    }
}

/// A bound key handler. Returns `true` to claim the key.
pub type HandlerFunction<S> = Box<dyn FnMut(&KeyStroke<'_, S>) -> bool>;

/// Maps `(key, state)` pairs to handler functions, and routes a tick's keys to
/// them.
///
/// # Release Delivery
///
/// The register remembers which keys were claimed in its previous pass (the
/// look-back set). Those keys are revisited in the next pass even if they are
/// no longer pressed, so the handler which claimed a key is told when it is
/// released, as a [`KeyTransition::Released`] stroke. The look-back set is
/// also what [`KeyTransition::Pressed`] and [`KeyTransition::Held`] are
/// measured against.
///
/// # Example
///
/// ```
/// use ::std::time::Duration;
/// use ::switchyard::input::keyboard::{KeyCode, KeyboardInputRegister, KeySet};
///
/// #[derive(PartialEq, Eq, Hash)]
/// enum Mode {
///     Menu,
///     Play,
/// }
///
/// let mut register = KeyboardInputRegister::new();
/// register.register_key(KeyCode::Enter, Mode::Menu, |_| true);
///
/// let pressed = KeySet::from([KeyCode::Enter, KeyCode::Escape]);
/// assert_eq!(
///     register.process_keys(&pressed, &Mode::Menu, Duration::ZERO),
///     KeySet::from([KeyCode::Escape])
/// );
/// assert_eq!(
///     register.process_keys(&pressed, &Mode::Play, Duration::ZERO),
///     pressed
/// );
/// ```
pub struct KeyboardInputRegister<S> {
    bindings: HashMap<S, HashMap<KeyCode, HandlerFunction<S>>>,
    look_back: KeySet,
}

impl<S> Default for KeyboardInputRegister<S> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
            look_back: KeySet::new(),
        }
    }
}

impl<S> fmt::Debug for KeyboardInputRegister<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardInputRegister")
            .field("bindings", &self.bindings.values().map(HashMap::len).sum::<usize>())
            .field("look_back", &self.look_back)
            .finish()
    }
}

impl<S: Eq + Hash> KeyboardInputRegister<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a handler to a key in the given state, replacing any handler
    /// already bound to the same pair.
    pub fn register_key<F>(&mut self, key: KeyCode, state: S, handler: F)
    where
        F: FnMut(&KeyStroke<'_, S>) -> bool + 'static,
    {
        let replaced = self
            .bindings
            .entry(state)
            .or_default()
            .insert(key, Box::new(handler))
            .is_some();
        debug!(%key, replaced, "Bound key handler");
    }

    /// Returns `true` if a handler is bound to the key in the given state.
    pub fn is_bound(&self, key: KeyCode, state: &S) -> bool {
        self.bindings
            .get(state)
            .map_or(false, |keys| keys.contains_key(&key))
    }

    /// Routes the pressed keys to the handlers bound for `state`, returning
    /// the pressed keys which were not claimed.
    ///
    /// Every key which is pressed now or was claimed in the previous pass is
    /// visited exactly once, in ascending key order. Keys without a binding
    /// pass through unclaimed. A released key is never part of the result.
    pub fn process_keys(&mut self, pressed_keys: &KeySet, state: &S, time: Duration) -> KeySet {
        let candidates = pressed_keys.union(&self.look_back);
        let mut claimed = KeySet::new();
        let mut unclaimed = KeySet::new();

        for key in candidates.iter() {
            let live = pressed_keys.contains(key);
            let transition = match (live, self.look_back.contains(key)) {
                (true, false) => KeyTransition::Pressed,
                (true, true) => KeyTransition::Held,
                (false, _) => KeyTransition::Released,
            };

            let handled = match self
                .bindings
                .get_mut(state)
                .and_then(|keys| keys.get_mut(&key))
            {
                Some(handler) => handler(&KeyStroke {
                    key,
                    state,
                    time,
                    transition,
                }),
                None => false,
            };
            trace!(%key, ?transition, handled, "Dispatched key");

            if !live {
                continue;
            }
            if handled {
                claimed.insert(key);
            } else {
                unclaimed.insert(key);
            }
        }

        self.look_back = claimed;
        unclaimed
    }
}

/// Adapts a register into a chain handler, by sampling the application state
/// from a provider closure at the start of every pass.
///
/// ```
/// use ::std::{cell::Cell, rc::Rc, time::Duration};
/// use ::switchyard::input::keyboard::{
///     KeyCode, KeySet, KeyboardInputHandler, KeyboardInputRegister, RegisterHandler,
/// };
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash)]
/// enum Mode {
///     Running,
///     Paused,
/// }
///
/// let mode = Rc::new(Cell::new(Mode::Running));
///
/// let mut register = KeyboardInputRegister::new();
/// let toggle = mode.clone();
/// register.register_key(KeyCode::P, Mode::Running, move |_| {
///     toggle.set(Mode::Paused);
///     true
/// });
///
/// let provider = mode.clone();
/// let mut handler = RegisterHandler::new(register, move || provider.get());
/// handler.process_keys(&KeySet::from([KeyCode::P]), Duration::ZERO);
/// assert!(mode.get() == Mode::Paused);
/// ```
pub struct RegisterHandler<S> {
    register: KeyboardInputRegister<S>,
    state: Box<dyn FnMut() -> S>,
}

impl<S: Eq + Hash> RegisterHandler<S> {
    pub fn new<F>(register: KeyboardInputRegister<S>, state: F) -> Self
    where
        F: FnMut() -> S + 'static,
    {
        Self {
            register,
            state: Box::new(state),
        }
    }

    pub fn register(&self) -> &KeyboardInputRegister<S> {
        &self.register
    }

    /// Mutable access to the underlying register, for binding keys after the
    /// handler was added to a chain.
    pub fn register_mut(&mut self) -> &mut KeyboardInputRegister<S> {
        &mut self.register
    }
}

impl<S: Eq + Hash> KeyboardInputHandler for RegisterHandler<S> {
    fn process_keys(&mut self, pressed_keys: &KeySet, time: Duration) -> KeySet {
        let state = (self.state)();
        self.register.process_keys(pressed_keys, &state, time)
    }
}
