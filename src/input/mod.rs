//! The input pipeline: raw state readers, prioritized handler chains, and the
//! manager which drives them once per tick.

pub mod keyboard;
pub mod mouse;

mod manager;
mod priority;

pub use manager::*;
pub use priority::{HandlerRef, InputHandlerPriority};
