//! The keyboard consumer contract and the prioritized chain which routes a
//! tick's keys through consumers.

use super::KeySet;
use crate::input::priority::{HandlerRef, InputHandlerPriority, Tiers};

use ::std::time::Duration;
use ::tracing::{debug, trace, warn};

/// A consumer of keyboard input.
pub trait KeyboardInputHandler {
    /// Processes the keys which are pressed and still unclaimed in this tick.
    ///
    /// `time` is the host's clock for this tick. Returns the subset of
    /// `pressed_keys` which this handler did not claim, for consumption by
    /// handlers further down the chain.
    fn process_keys(&mut self, pressed_keys: &KeySet, time: Duration) -> KeySet;
}

/// Routes keys through handlers grouped into [`InputHandlerPriority`] tiers.
///
/// Each handler receives only the keys which were left unclaimed by every
/// handler before it: tiers are visited from high to low priority, and
/// handlers within a tier in the order they were added. The chain is itself a
/// [`KeyboardInputHandler`], so chains can be nested.
///
/// # Example
///
/// ```
/// use ::std::{cell::RefCell, rc::Rc, time::Duration};
/// use ::switchyard::input::{
///     keyboard::{KeyCode, KeySet, KeyboardHandlerChain, KeyboardInputHandler},
///     InputHandlerPriority,
/// };
///
/// /// Claims the escape key, whenever it is pressed.
/// struct MenuHandler;
///
/// impl KeyboardInputHandler for MenuHandler {
///     fn process_keys(&mut self, pressed_keys: &KeySet, _time: Duration) -> KeySet {
///         let mut unclaimed = *pressed_keys;
///         unclaimed.remove(KeyCode::Escape);
///         unclaimed
///     }
/// }
///
/// let mut chain = KeyboardHandlerChain::new();
/// chain.add(InputHandlerPriority::High, Rc::new(RefCell::new(MenuHandler)));
///
/// let unclaimed = chain.process_keys(
///     &KeySet::from([KeyCode::Escape, KeyCode::Space]),
///     Duration::ZERO,
/// );
/// assert_eq!(unclaimed, KeySet::from([KeyCode::Space]));
/// ```
#[derive(Default)]
pub struct KeyboardHandlerChain {
    tiers: Tiers<dyn KeyboardInputHandler>,
}

impl KeyboardHandlerChain {
    /// Constructs an empty chain. An empty chain claims nothing.
    pub fn new() -> Self {
        Self {
            tiers: Tiers::new(),
        }
    }

    /// Registers a handler at the end of the given tier.
    ///
    /// The chain must not be modified from within one of its own handlers
    /// while a pass is in flight.
    pub fn add<H>(&mut self, priority: InputHandlerPriority, handler: HandlerRef<H>)
    where
        H: KeyboardInputHandler + 'static,
    {
        debug!(%priority, "Adding keyboard handler");
        self.tiers.add(priority, handler);
    }

    /// Removes a handler from whichever tier holds it. Removing a handler
    /// which is not registered is a no-op. Returns `true` if the handler was
    /// registered.
    pub fn remove<H>(&mut self, handler: &HandlerRef<H>) -> bool
    where
        H: KeyboardInputHandler + ?Sized,
    {
        let removed = self.tiers.remove(handler);
        if removed {
            debug!("Removed keyboard handler");
        }
        removed
    }

    /// The number of handlers registered in the given tier.
    pub fn len(&self, priority: InputHandlerPriority) -> usize {
        self.tiers.len(priority)
    }

    /// Returns `true` if no handler is registered in any tier.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl KeyboardInputHandler for KeyboardHandlerChain {
    fn process_keys(&mut self, pressed_keys: &KeySet, time: Duration) -> KeySet {
        let mut unclaimed = *pressed_keys;

        // Handlers are offered the set even once it is empty, so they still
        // see their releases.
        for (priority, handler) in self.tiers.iter() {
            trace!(%priority, offered = ?unclaimed, "Offering keys to handler");
            let returned = handler.borrow_mut().process_keys(&unclaimed, time);
            if !returned.is_subset(&unclaimed) {
                warn!(
                    %priority,
                    invented = ?returned.difference(&unclaimed),
                    "Keyboard handler returned keys it was not offered"
                );
            }
            unclaimed = returned.intersection(&unclaimed);
        }

        unclaimed
    }
}
