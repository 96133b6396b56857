//! Frame-sampled input routing for games with independently developed input
//! consumers, such as a UI layer sitting on top of a simulation.
//!
//! Once per tick the host calls [`InputManager::update`] with its clock.
//! The manager samples the keyboard and mouse through the
//! [`KeyboardStateReader`] and [`MouseStateReader`] seams and routes the
//! samples through handler chains ordered by [`InputHandlerPriority`]. Each
//! keyboard handler sees only the keys that higher priority handlers left
//! unclaimed. Mouse events stop at the first handler which claims them.
//!
//! Game-side key bindings are usually built from a
//! [`KeyboardInputRegister`], which maps `(key, state)` pairs to handler
//! functions and detects key down, held and up transitions across ticks.
//! The [`at_key_down`], [`at_key_up`] and [`with_repeat_delay`] decorators
//! shape when a bound function fires.
//!
//! Nothing in this crate reads a clock. Time is always supplied by the
//! caller, so a recorded input script replays identically.
//!
//! [`InputManager::update`]: input::InputManager::update
//! [`KeyboardStateReader`]: input::KeyboardStateReader
//! [`MouseStateReader`]: input::MouseStateReader
//! [`InputHandlerPriority`]: input::InputHandlerPriority
//! [`KeyboardInputRegister`]: input::keyboard::KeyboardInputRegister
//! [`at_key_down`]: input::keyboard::at_key_down
//! [`at_key_up`]: input::keyboard::at_key_up
//! [`with_repeat_delay`]: input::keyboard::with_repeat_delay

pub mod config;
pub mod errors;
pub mod input;
pub mod ui;
