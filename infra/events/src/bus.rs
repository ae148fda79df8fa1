use crate::channel::{Channel, IntoChannel};
use crate::error::EventBusError;
use crate::event::Event;
use crate::fault::CallbackError;
use crate::observers::{Delivery, ObserverList};
use crate::subscription::Subscription;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct BusInner {
    channels: RwLock<FxHashMap<Channel, Arc<ObserverList<Event>>>>,
    seq: AtomicU64,
}

/// A thread-safe, synchronous Event Bus.
///
/// Manages one [`ObserverList`] per named [`Channel`]. Cloning the bus is cheap and
/// every clone shares the same registry; build one per process and hand clones to
/// the components that need it.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for every event subsequently published on `channel`.
    ///
    /// There is no limit on subscribers per channel. The callback stays registered while
    /// the returned [`Subscription`] is alive.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidChannel`] if `channel` is not a valid name.
    ///
    /// # Examples
    /// ```rust
    /// use relay_event_bus::EventBus;
    ///
    /// # fn main() -> Result<(), relay_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let sub = bus.subscribe("View2Msg", |event| {
    ///     assert_eq!(event.payload(), "hello");
    ///     Ok(())
    /// })?;
    /// assert_eq!(bus.publish("View2Msg", "hello")?.delivered, 1);
    /// drop(sub);
    /// assert_eq!(bus.publish("View2Msg", "hello")?.delivered, 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe<F>(
        &self,
        channel: impl IntoChannel,
        callback: F,
    ) -> Result<Subscription, EventBusError>
    where
        F: Fn(&Event) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        let channel = channel.into_channel()?;
        let subscription = self.observers(&channel).add(callback);
        debug!(channel = %channel, subscription = subscription.id(), "Subscribed");
        Ok(subscription)
    }

    /// Delivers `payload` synchronously, in registration order, to every callback
    /// currently registered on `channel`.
    ///
    /// The call returns once every callback has returned. A channel without
    /// subscribers drops the payload: nothing is buffered for late subscribers.
    /// Callback failures are isolated, logged, and counted in [`Delivery::faulted`].
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidChannel`] if `channel` is not a valid name.
    ///
    /// # Examples
    /// ```rust
    /// use relay_event_bus::EventBus;
    ///
    /// # fn main() -> Result<(), relay_event_bus::EventBusError> {
    /// let bus = EventBus::new();
    /// let delivery = bus.publish("nobody-listens", "ping")?;
    /// assert!(delivery.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn publish(
        &self,
        channel: impl IntoChannel,
        payload: impl Into<Arc<str>>,
    ) -> Result<Delivery, EventBusError> {
        let channel = channel.into_channel()?;

        let observers = self.inner.channels.read().get(&channel).cloned();
        let Some(observers) = observers.filter(|o| !o.is_empty()) else {
            trace!(channel = %channel, "Event dropped: no active subscribers");
            return Ok(Delivery::default());
        };

        let seq = self.inner.seq.fetch_add(1, Ordering::Relaxed);
        let event = Event::new(seq, channel, payload.into());
        let delivery = observers.notify(&event);
        trace!(
            channel = %event.channel(),
            seq,
            delivered = delivery.delivered,
            faulted = delivery.faulted,
            "Event dispatched"
        );
        Ok(delivery)
    }

    /// Releases `subscription`. Releasing an already released handle is a no-op.
    ///
    /// Returns `true` if this call released the registration.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        subscription.unsubscribe()
    }

    /// Number of callbacks currently registered on `channel`.
    ///
    /// Invalid or unknown channels have zero subscribers.
    #[must_use]
    pub fn subscriber_count(&self, channel: impl AsRef<str>) -> usize {
        self.inner.channels.read().get(channel.as_ref()).map_or(0, |o| o.len())
    }

    /// Channels that have been subscribed to at least once, sorted by name.
    #[must_use]
    pub fn channels(&self) -> Vec<Channel> {
        let mut channels: Vec<Channel> = self.inner.channels.read().keys().cloned().collect();
        channels.sort();
        channels
    }

    /// Releases every subscription on every channel.
    ///
    /// Returns the number of channels that were closed. Outstanding [`Subscription`]
    /// handles become inert.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let drained: Vec<Arc<ObserverList<Event>>> =
            self.inner.channels.write().drain().map(|(_, observers)| observers).collect();
        for observers in &drained {
            observers.clear();
        }
        debug!(channels = drained.len(), "Event bus shut down");
        drained.len()
    }

    fn observers(&self, channel: &Channel) -> Arc<ObserverList<Event>> {
        if let Some(existing) = self.inner.channels.read().get(channel) {
            return Arc::clone(existing);
        }

        let mut channels = self.inner.channels.write();
        let observers = channels.entry(channel.clone()).or_insert_with(|| {
            trace!(channel = %channel, "Initializing new event channel");
            ObserverList::new(channel.as_str())
        });
        Arc::clone(observers)
    }
}
