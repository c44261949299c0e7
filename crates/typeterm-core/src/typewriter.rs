//! Typewriter reveal engine.
//!
//! A [`Reveal`] is the pure part: an iterator that yields one
//! [`RevealEvent`] per tick. The [`TypewriterEngine`] owns the running
//! reveals, at most one per [`Target`], and stamps each with an epoch. Tick
//! messages carry a [`RunToken`] (target plus epoch); a token whose epoch is
//! no longer current produces nothing. That is what makes cancellation hard:
//! once [`TypewriterEngine::cancel`] returns, ticks already queued for the
//! old run can never yield another event, even if a new run on the same
//! target has started meanwhile.
//!
//! Timing comes from one [`Every`] ticker per run, declared through
//! [`TypewriterEngine::subscriptions`]. Cancelling a run removes its ticker
//! from the declared set and the runtime aborts it.

use crate::history::EntryId;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};
use typeterm_runtime::{subscribe, Every, Subscription};

/// What a reveal writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Banner,
    Entry(EntryId),
}

/// Identifies one run: the target and the epoch it was started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunToken {
    target: Target,
    epoch: u64,
}

impl RunToken {
    pub fn target(&self) -> Target {
        self.target
    }
}

/// One step of a reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealEvent {
    /// The revealed prefix.
    pub prefix: String,
    /// Char index of the character just revealed; `None` on the final event.
    pub cursor: Option<usize>,
}

impl RevealEvent {
    fn finished(text: String) -> Self {
        Self {
            prefix: text,
            cursor: None,
        }
    }

    pub fn is_final(&self) -> bool {
        self.cursor.is_none()
    }
}

/// Incremental disclosure of a string.
///
/// Yields `n + 1` events for a text of `n` chars: event `i < n` is the first
/// `i + 1` chars with cursor `i`, the last one is the whole text with no
/// cursor.
#[derive(Debug, Clone)]
pub struct Reveal {
    text: String,
    byte_pos: usize,
    char_pos: usize,
    done: bool,
}

impl Reveal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            byte_pos: 0,
            char_pos: 0,
            done: false,
        }
    }

    /// Whether the final event has been yielded.
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Iterator for Reveal {
    type Item = RevealEvent;

    fn next(&mut self) -> Option<RevealEvent> {
        if self.done {
            return None;
        }
        match self.text[self.byte_pos..].chars().next() {
            Some(c) => {
                self.byte_pos += c.len_utf8();
                let event = RevealEvent {
                    prefix: self.text[..self.byte_pos].to_string(),
                    cursor: Some(self.char_pos),
                };
                self.char_pos += 1;
                Some(event)
            }
            None => {
                self.done = true;
                Some(RevealEvent::finished(self.text.clone()))
            }
        }
    }
}

/// Result of [`TypewriterEngine::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Start {
    /// The run is registered; its events arrive through ticks.
    Running(RunToken),
    /// Empty text: the only event, to be applied right away.
    Finished(RevealEvent),
}

struct Run {
    epoch: u64,
    reveal: Reveal,
}

/// Owns every in-flight reveal, one per target.
pub struct TypewriterEngine {
    tick: Duration,
    next_epoch: u64,
    runs: HashMap<Target, Run>,
}

impl TypewriterEngine {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            next_epoch: 1,
            runs: HashMap::new(),
        }
    }

    /// The tick cadence. A reveal of `n` chars lasts `tick * (n + 1)`.
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Start revealing `text` into `target`, cancelling any run that already
    /// targets it.
    pub fn start(&mut self, target: Target, text: impl Into<String>) -> Start {
        self.cancel(target);
        let epoch = self.next_epoch;
        self.next_epoch += 1;

        let text = text.into();
        if text.is_empty() {
            debug!(on = ?target, "empty reveal finished immediately");
            return Start::Finished(RevealEvent::finished(text));
        }

        debug!(on = ?target, epoch, chars = text.chars().count(), "reveal started");
        self.runs.insert(
            target,
            Run {
                epoch,
                reveal: Reveal::new(text),
            },
        );
        Start::Running(RunToken { target, epoch })
    }

    /// Advance the run named by `token` by one tick.
    ///
    /// Returns `None` when the token is stale: its run finished, was
    /// cancelled, or was superseded.
    pub fn advance(&mut self, token: RunToken) -> Option<RevealEvent> {
        let run = match self.runs.get_mut(&token.target) {
            Some(run) if run.epoch == token.epoch => run,
            _ => {
                trace!(on = ?token.target, epoch = token.epoch, "stale tick dropped");
                return None;
            }
        };
        let event = run.reveal.next();
        if run.reveal.is_done() {
            self.runs.remove(&token.target);
            debug!(on = ?token.target, epoch = token.epoch, "reveal finished");
        }
        event
    }

    /// Cancel the run on `target`. Returns whether one was running.
    pub fn cancel(&mut self, target: Target) -> bool {
        let cancelled = self.runs.remove(&target).is_some();
        if cancelled {
            debug!(on = ?target, "reveal cancelled");
        }
        cancelled
    }

    /// Cancel every run whose target matches.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(Target) -> bool) {
        self.runs.retain(|target, _| !pred(*target));
    }

    pub fn cancel_all(&mut self) {
        self.runs.clear();
    }

    pub fn is_running(&self, target: Target) -> bool {
        self.runs.contains_key(&target)
    }

    /// Tokens of every run still in flight.
    pub fn active(&self) -> Vec<RunToken> {
        self.runs
            .iter()
            .map(|(target, run)| RunToken {
                target: *target,
                epoch: run.epoch,
            })
            .collect()
    }

    /// One ticker per running reveal, each mapped through `on_tick`.
    pub fn subscriptions<Msg, F>(&self, on_tick: F) -> Vec<Subscription<Msg>>
    where
        Msg: Send + 'static,
        F: Fn(RunToken) -> Msg + Clone + Send + Sync + 'static,
    {
        self.active()
            .into_iter()
            .map(|token| {
                let on_tick = on_tick.clone();
                subscribe(Every::new(self.tick, &(token.target, token.epoch)))
                    .map(move |_| on_tick(token))
            })
            .collect()
    }
}
