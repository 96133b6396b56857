//! Dispatch tiers shared by the keyboard and mouse handler chains.

use ::std::{cell::RefCell, rc::Rc};
use ::strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// A shared, mutable handle to a registered handler.
///
/// Handlers are shared between the chain which dispatches to them and the
/// consumer which created them (and which may need to inspect or reconfigure
/// them between ticks). The chain identifies a handler by the address of this
/// allocation when it is removed.
pub type HandlerRef<H> = Rc<RefCell<H>>;

/// The dispatch rank of a handler. Tiers are visited in declaration order:
/// every [`High`] handler sees input before any [`Normal`] handler, and so on.
///
/// [`High`]: InputHandlerPriority::High
/// [`Normal`]: InputHandlerPriority::Normal
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumCount)]
pub enum InputHandlerPriority {
    High,
    Normal,
    Low,
}

impl InputHandlerPriority {
    const fn index(self) -> usize {
        self as usize
    }
}

/// A fixed set of tiers, each holding handlers in insertion order.
///
/// `H` is usually a trait object, such as `dyn KeyboardInputHandler`.
pub(crate) struct Tiers<H: ?Sized> {
    tiers: [Vec<HandlerRef<H>>; InputHandlerPriority::COUNT],
}

impl<H: ?Sized> Default for Tiers<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> Tiers<H> {
    pub(crate) fn new() -> Self {
        Self {
            tiers: ::std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Appends a handler to the end of the given tier.
    pub(crate) fn add(&mut self, priority: InputHandlerPriority, handler: HandlerRef<H>) {
        self.tiers[priority.index()].push(handler);
    }

    /// Removes every registration of the handler, from whichever tier holds it.
    /// Returns `true` if anything was removed.
    pub(crate) fn remove<T: ?Sized>(&mut self, handler: &HandlerRef<T>) -> bool {
        let target = Rc::as_ptr(handler) as *const ();
        let mut removed = false;

        for tier in self.tiers.iter_mut() {
            let before = tier.len();
            tier.retain(|registered| Rc::as_ptr(registered) as *const () != target);
            removed |= tier.len() != before;
        }

        removed
    }

    /// The number of registrations in the given tier.
    pub(crate) fn len(&self, priority: InputHandlerPriority) -> usize {
        self.tiers[priority.index()].len()
    }

    /// Returns `true` if no tier holds any handler.
    pub(crate) fn is_empty(&self) -> bool {
        self.tiers.iter().all(Vec::is_empty)
    }

    /// Iterates over every handler in traversal order: tiers from [`High`] to
    /// [`Low`], and insertion order within a tier.
    ///
    /// [`High`]: InputHandlerPriority::High
    /// [`Low`]: InputHandlerPriority::Low
    pub(crate) fn iter(
        &self,
    ) -> impl Iterator<Item = (InputHandlerPriority, &HandlerRef<H>)> + '_ {
        InputHandlerPriority::iter().flat_map(move |priority| {
            self.tiers[priority.index()]
                .iter()
                .map(move |handler| (priority, handler))
        })
    }
}
