//! Built-in subscription sources.
//!
//! - **Terminal events** ([`terminal_events`]) -- key presses and resizes
//!   from the terminal.
//! - **Timers** ([`Every`]) -- a repeating ticker that stops as soon as it
//!   is no longer declared.

mod terminal;
mod ticker;

pub use terminal::*;
pub use ticker::*;
