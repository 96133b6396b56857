//! Mouse input: buttons, sampled state, change tracking, and the handlers
//! which consume it.

mod button;
mod handler;
mod mouse;
mod tracker;

pub use button::*;
pub use handler::*;
pub use mouse::*;
pub use tracker::*;
