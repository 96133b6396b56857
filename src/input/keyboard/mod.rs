//! Keyboard input: key identifiers, sampled key sets, and the handlers which
//! consume them.

mod codes;
mod decorators;
mod event;
mod handler;
mod keyboard;
mod register;
mod set;

pub use codes::*;
pub use decorators::*;
pub use event::*;
pub use handler::*;
pub use keyboard::*;
pub use register::*;
pub use set::*;
