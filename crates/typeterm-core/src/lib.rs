//! Typewriter console core for **typeterm**.
//!
//! | Module | Role |
//! |--------|------|
//! | [`typewriter`] | Tick-driven reveal of one text, cancellable per target |
//! | [`input`] | Single-line keyboard buffer |
//! | [`dispatch`] | Maps a submitted line to an [`Action`](dispatch::Action) |
//! | [`history`] | Id-addressed command/response log |
//! | [`session`] | Owns all of the above and applies every state change |
//!
//! Rendering lives outside this crate. It reads a
//! [`Snapshot`](session::Snapshot) and never writes.

pub mod config;
pub mod content;
pub mod dispatch;
pub mod history;
pub mod input;
pub mod session;
pub mod typewriter;

pub use config::ConsoleConfig;
pub use content::Topic;
pub use dispatch::{resolve, Action};
pub use history::{EntryId, HistoryEntry, HistoryStore};
pub use input::{InputBuffer, InputOutcome, Key};
pub use session::{Activity, Message, Session, Snapshot};
pub use typewriter::{Reveal, RevealEvent, RunToken, Start, Target, TypewriterEngine};
