use crossterm::event::{Event, KeyEvent};

/// Terminal events delivered through the
/// [`terminal_events`](crate::subscriptions::terminal_events) subscription.
///
/// Only the events a line-oriented console reacts to get their own variant;
/// mouse, focus and paste events collapse into [`TerminalEvent::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Anything else the terminal reported.
    Other,
}

impl From<Event> for TerminalEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(k) => TerminalEvent::Key(k),
            Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            _ => TerminalEvent::Other,
        }
    }
}
