//! The mouse consumer contract and its prioritized chain.

use super::MouseButton;
use crate::input::priority::{HandlerRef, InputHandlerPriority, Tiers};

use ::std::time::Duration;
use ::tracing::{debug, trace};

/// A consumer of mouse input.
///
/// The input pipeline drives a handler through one sample per tick:
/// [`prepare_processing`] first, then the `process_*` calls describing the
/// sample, then [`update`]. The `process_*` calls return `true` to claim the
/// event. Every method defaults to doing nothing and claiming nothing.
///
/// [`prepare_processing`]: Self::prepare_processing
/// [`update`]: Self::update
pub trait MouseInputHandler {
    /// Starts a new sample. Called before any `process_*` call of the tick.
    fn prepare_processing(&mut self) {}

    /// The pointer is at `(x, y)`.
    fn process_mouse_move(&mut self, _x: i32, _y: i32) -> bool {
        false
    }

    /// The absolute wheel value is `wheel`.
    fn process_mouse_wheel(&mut self, _wheel: i32) -> bool {
        false
    }

    /// The button is down in this sample.
    fn process_button_pressed(&mut self, _button: MouseButton) -> bool {
        false
    }

    /// Completes the sample. `time` is the host's clock for this tick.
    fn update(&mut self, _time: Duration) {}
}

/// Routes mouse samples through handlers grouped into
/// [`InputHandlerPriority`] tiers.
///
/// Moves, wheel values and button presses are offered in traversal order
/// until the first handler claims them; later handlers never see a claimed
/// event. [`prepare_processing`] and [`update`] reach every handler, so each
/// handler's per-tick bookkeeping stays consistent whether or not it was
/// offered anything.
///
/// [`prepare_processing`]: MouseInputHandler::prepare_processing
/// [`update`]: MouseInputHandler::update
#[derive(Default)]
pub struct MouseHandlerChain {
    tiers: Tiers<dyn MouseInputHandler>,
}

impl MouseHandlerChain {
    pub fn new() -> Self {
        Self {
            tiers: Tiers::new(),
        }
    }

    /// Registers a handler at the end of the given tier.
    pub fn add<H>(&mut self, priority: InputHandlerPriority, handler: HandlerRef<H>)
    where
        H: MouseInputHandler + 'static,
    {
        debug!(%priority, "Adding mouse handler");
        self.tiers.add(priority, handler);
    }

    /// Removes a handler from whichever tier holds it. Returns `true` if the
    /// handler was registered.
    pub fn remove<H>(&mut self, handler: &HandlerRef<H>) -> bool
    where
        H: MouseInputHandler + ?Sized,
    {
        let removed = self.tiers.remove(handler);
        if removed {
            debug!("Removed mouse handler");
        }
        removed
    }

    pub fn len(&self, priority: InputHandlerPriority) -> usize {
        self.tiers.len(priority)
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    fn for_each_handler(&self, mut callback: impl FnMut(&mut dyn MouseInputHandler)) {
        for (_, handler) in self.tiers.iter() {
            callback(&mut *handler.borrow_mut());
        }
    }

    fn until_claimed(&self, mut callback: impl FnMut(&mut dyn MouseInputHandler) -> bool) -> bool {
        self.tiers.iter().any(|(priority, handler)| {
            let claimed = callback(&mut *handler.borrow_mut());
            if claimed {
                trace!(%priority, "Mouse event claimed");
            }
            claimed
        })
    }
}

impl MouseInputHandler for MouseHandlerChain {
    fn prepare_processing(&mut self) {
        self.for_each_handler(|handler| handler.prepare_processing());
    }

    fn process_mouse_move(&mut self, x: i32, y: i32) -> bool {
        self.until_claimed(|handler| handler.process_mouse_move(x, y))
    }

    fn process_mouse_wheel(&mut self, wheel: i32) -> bool {
        self.until_claimed(|handler| handler.process_mouse_wheel(wheel))
    }

    fn process_button_pressed(&mut self, button: MouseButton) -> bool {
        self.until_claimed(|handler| handler.process_button_pressed(button))
    }

    fn update(&mut self, time: Duration) {
        self.for_each_handler(|handler| handler.update(time));
    }
}
