use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

/// A repeating timer that fires at a fixed interval.
///
/// The first tick arrives one full `interval` after the subscription starts,
/// not immediately. Each tick emits the current [`Instant`]. The key gives the
/// timer its identity, so several `Every` timers can run side by side and each
/// one is cancelled on its own by no longer declaring it.
///
/// # Example
///
/// ```rust,ignore
/// let sub = subscribe(Every::new(Duration::from_millis(30), &("entry", id, epoch)))
///     .map(move |_| Msg::Tick(token));
/// ```
pub struct Every {
    /// The interval between ticks.
    pub interval: Duration,
    id: SubscriptionId,
}

impl Every {
    /// Create a new repeating timer with the given interval and identity key.
    pub fn new(interval: Duration, key: &impl Hash) -> Self {
        Self {
            interval,
            id: SubscriptionId::keyed::<Self>(key),
        }
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        self.id.clone()
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let start = tokio::time::Instant::now() + self.interval;
        let mut interval = tokio::time::interval_at(start, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let stream = tokio_stream::wrappers::IntervalStream::new(interval)
            .map(|tick| tick.into_std());
        Box::pin(stream)
    }
}
