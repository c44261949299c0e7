//! Command dispatch: maps a submitted line to what the session should do.
//!
//! Dispatch is pure. It never touches the history or starts a reveal; the
//! session applies the returned [`Action`].

use crate::content::{Topic, HELP, NOT_FOUND};

/// The outcome of resolving a submitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Wipe the history. No entry is created.
    Reset,
    /// Create an entry and reveal `text` into it. `topic` is set when the
    /// command named a content topic.
    Reveal {
        text: &'static str,
        topic: Option<Topic>,
    },
    /// Not a known command.
    Unknown,
}

impl Action {
    /// Text an entry should reveal for this action, if any.
    ///
    /// Unknown commands reveal [`NOT_FOUND`] like any other reply.
    pub fn reply(&self) -> Option<&'static str> {
        match self {
            Action::Reset => None,
            Action::Reveal { text, .. } => Some(text),
            Action::Unknown => Some(NOT_FOUND),
        }
    }
}

/// Resolve a raw submitted line. Matching ignores surrounding whitespace and
/// case.
pub fn resolve(raw: &str) -> Action {
    let normalized = raw.trim().to_lowercase();
    match normalized.as_str() {
        "clear" => Action::Reset,
        "help" => Action::Reveal {
            text: HELP,
            topic: None,
        },
        other => match topic_for(other) {
            Some(topic) => Action::Reveal {
                text: topic.payload(),
                topic: Some(topic),
            },
            None => Action::Unknown,
        },
    }
}

fn topic_for(normalized: &str) -> Option<Topic> {
    Topic::ALL
        .into_iter()
        .find(|topic| topic.key() == normalized || topic.alias() == normalized)
}
