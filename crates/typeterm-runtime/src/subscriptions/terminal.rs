use crate::event::TerminalEvent;
use crate::subscription::{Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;

/// Marker type giving the terminal event subscription its identity.
pub struct TerminalEvents;

/// Create a terminal events subscription that maps each event through a
/// user-provided function.
///
/// The `map` closure returns `Some(Msg)` to forward an event to the runtime
/// or `None` to discard it.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::Key(key)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);

    // The EventStream is built lazily inside the spawned task. Building it on
    // every subscriptions() call would poke crossterm's global reader and
    // disturb the stream that is already polling.
    Subscription::from_stream_fn(SubscriptionId::of::<TerminalEvents>(), move || {
        let stream = EventStream::new().filter_map(move |result| {
            let map = map.clone();
            async move {
                match result {
                    Ok(event) => map(TerminalEvent::from(event)),
                    Err(err) => {
                        tracing::warn!(%err, "terminal event stream error");
                        None
                    }
                }
            }
        });
        Box::pin(stream)
    })
}
