//! Event loop for **typeterm**.
//!
//! `typeterm-runtime` follows the [Elm Architecture]: a program is an
//! **init -> update -> view** cycle, with side effects pushed to the edges
//! through [`Command`]s and [`Subscription`]s.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view / unmount) |
//! | [`Command`] | A side effect executed by the runtime |
//! | [`Subscription`] | Long-lived event source (terminal events, timers) |
//! | [`Every`] | Repeating ticker, cancelled by no longer declaring it |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for tests |
//!
//! The loop is single-threaded from the model's point of view: timer and
//! terminal tasks only push messages onto a channel, and `update` consumes
//! them one at a time.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{init_logging, Program, ProgramError, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, Every};

/// Run a model with custom options until it quits.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
