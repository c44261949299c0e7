//! The console session: the single owner of all mutable console state.
//!
//! [`Session`] wires keystrokes through the [`InputBuffer`] and the
//! dispatcher into the [`HistoryStore`], and applies reveal events from the
//! [`TypewriterEngine`]. It is the only writer of the history; the render
//! layer reads a [`Snapshot`].

use crate::config::ConsoleConfig;
use crate::content::Topic;
use crate::dispatch::{self, Action};
use crate::history::{EntryId, HistoryEntry, HistoryStore};
use crate::input::{InputBuffer, InputOutcome, Key};
use crate::typewriter::{RevealEvent, RunToken, Start, Target, TypewriterEngine};
use tracing::{debug, info, trace};
use typeterm_runtime::{Command, Subscription};

/// Messages understood by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A keystroke.
    Key(Key),
    /// One tick of the reveal named by the token.
    Tick(RunToken),
    /// Emitted when a submitted command selected a content topic. The session
    /// itself ignores it; whoever embeds the session may react to it.
    TopicSelected(Topic),
}

/// What the session is busy with. An empty list means idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    RevealingBanner,
    RevealingEntry(EntryId),
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub banner_text: &'a str,
    pub banner_cursor: Option<usize>,
    pub history: &'a [HistoryEntry],
    pub input_buffer: &'a str,
    pub is_banner_revealing: bool,
    pub is_any_entry_revealing: bool,
}

#[derive(Debug, Default)]
struct Banner {
    text: String,
    cursor: Option<usize>,
}

/// One mounted console session.
pub struct Session {
    banner: Banner,
    input: InputBuffer,
    history: HistoryStore,
    engine: TypewriterEngine,
}

impl Session {
    /// Create the session and start revealing the welcome banner.
    pub fn mount(config: ConsoleConfig) -> (Self, Command<Message>) {
        let mut session = Session {
            banner: Banner::default(),
            input: InputBuffer::new(),
            history: HistoryStore::new(),
            engine: TypewriterEngine::new(config.tick),
        };
        info!(tick_ms = config.tick.as_millis() as u64, "session mounted");
        if let Start::Finished(event) = session.engine.start(Target::Banner, config.welcome) {
            session.apply(Target::Banner, event);
        }
        (session, Command::none())
    }

    pub fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Key(key) => match self.input.handle(key) {
                InputOutcome::Submitted(line) => self.submit(line),
                InputOutcome::Edited | InputOutcome::Ignored => Command::none(),
            },
            Message::Tick(token) => {
                if let Some(event) = self.engine.advance(token) {
                    self.apply(token.target(), event);
                }
                Command::none()
            }
            Message::TopicSelected(_) => Command::none(),
        }
    }

    /// One ticker per reveal in flight.
    pub fn subscriptions(&self) -> Vec<Subscription<Message>> {
        self.engine.subscriptions(Message::Tick)
    }

    /// Cancel every reveal. Ticks already queued for them apply nothing.
    pub fn unmount(&mut self) {
        self.engine.cancel_all();
        info!(entries = self.history.len(), "session unmounted");
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            banner_text: &self.banner.text,
            banner_cursor: self.banner.cursor,
            history: self.history.entries(),
            input_buffer: self.input.value(),
            is_banner_revealing: self.is_banner_revealing(),
            is_any_entry_revealing: self
                .engine
                .active()
                .iter()
                .any(|token| matches!(token.target(), Target::Entry(_))),
        }
    }

    /// Current activities, banner first, then entries in submission order.
    pub fn activities(&self) -> Vec<Activity> {
        let mut activities: Vec<Activity> = self
            .engine
            .active()
            .into_iter()
            .map(|token| match token.target() {
                Target::Banner => Activity::RevealingBanner,
                Target::Entry(id) => Activity::RevealingEntry(id),
            })
            .collect();
        activities.sort_by_key(|activity| match activity {
            Activity::RevealingBanner => None,
            Activity::RevealingEntry(id) => Some(*id),
        });
        activities
    }

    pub fn is_idle(&self) -> bool {
        self.engine.active().is_empty()
    }

    pub fn is_banner_revealing(&self) -> bool {
        self.engine.is_running(Target::Banner)
    }

    /// Tokens of every reveal in flight.
    pub fn active_runs(&self) -> Vec<RunToken> {
        self.engine.active()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn input(&self) -> &str {
        self.input.value()
    }

    fn submit(&mut self, line: String) -> Command<Message> {
        let action = dispatch::resolve(&line);
        debug!(command = %line.trim(), "command submitted");
        match action.reply() {
            Some(text) => {
                self.reveal_entry(line, text);
            }
            None => self.clear(),
        }
        match action {
            Action::Reveal {
                topic: Some(topic), ..
            } => Command::message(Message::TopicSelected(topic)),
            _ => Command::none(),
        }
    }

    fn reveal_entry(&mut self, command: String, text: &str) -> EntryId {
        let id = self.history.append(command);
        if let Start::Finished(event) = self.engine.start(Target::Entry(id), text) {
            self.apply(Target::Entry(id), event);
        }
        id
    }

    fn clear(&mut self) {
        for entry in self.history.entries() {
            self.engine.cancel(Target::Entry(entry.id()));
        }
        let dropped = self.history.reset();
        self.input.clear();
        debug!(dropped = dropped.len(), "history cleared");
    }

    fn apply(&mut self, target: Target, event: RevealEvent) {
        match target {
            Target::Banner => {
                self.banner.text = event.prefix;
                self.banner.cursor = event.cursor;
            }
            Target::Entry(id) => {
                let written = self.history.update_output(id, &event.prefix)
                    && self.history.update_cursor(id, event.cursor);
                if !written {
                    trace!(%id, "reveal event for a removed entry dropped");
                }
            }
        }
    }
}
