use crate::error::InboxError;
use crate::status::HolderStatus;
use parking_lot::{Mutex, ReentrantMutex};
use relay_domain::Message;
use relay_event_bus::{CallbackError, Channel, Event, EventBus, ObserverList, Subscription};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, info, trace};

/// Snapshot handed to change observers after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboxChange {
    /// Number of messages after the mutation.
    pub len: usize,
    /// Id of the newest message, if any.
    pub latest_id: Option<u64>,
    pub has_unread: bool,
}

#[derive(Debug, Default)]
struct InboxState {
    messages: Vec<Message>,
    has_unread: bool,
    next_id: u64,
    status: HolderStatus,
}

impl InboxState {
    fn change(&self) -> InboxChange {
        InboxChange {
            len: self.messages.len(),
            latest_id: self.messages.last().map(|m| m.id),
            has_unread: self.has_unread,
        }
    }
}

struct InboxInner {
    channel: Channel,
    state: Mutex<InboxState>,
    /// Held across mutation and notification so observers see changes in order.
    /// Reentrant: an observer may call back into the inbox on the same thread.
    turn: ReentrantMutex<()>,
    changes: Arc<ObserverList<InboxChange>>,
    subscription: Mutex<Option<Subscription>>,
}

impl InboxInner {
    fn on_event(&self, event: &Event) -> Result<(), CallbackError> {
        let _turn = self.turn.lock();
        let (id, change) = {
            let mut state = self.state.lock();
            if !state.status.is_active() {
                trace!(channel = %self.channel, seq = event.seq(), "Inbox disposed, event ignored");
                return Ok(());
            }
            let id = state.next_id;
            state.next_id += 1;
            state.messages.push(Message::new(id, event.payload(), event.seq()));
            state.has_unread = true;
            (id, state.change())
        };

        info!(channel = %self.channel, id, seq = event.seq(), payload = event.payload(), "Message received");
        self.changes.notify(&change);
        Ok(())
    }
}

/// Observable list of the messages received on one channel.
///
/// Cheap to clone; clones share state. The bus only holds a weak reference, so
/// dropping the last handle unsubscribes just like [`Inbox::dispose`].
#[derive(Clone)]
pub struct Inbox {
    inner: Arc<InboxInner>,
}

impl Inbox {
    /// Subscribes a new, empty inbox to `channel`.
    ///
    /// # Errors
    /// Returns [`InboxError::Bus`] if the bus rejects the subscription.
    pub fn attach(bus: &EventBus, channel: &Channel) -> Result<Self, InboxError> {
        let inner = Arc::new(InboxInner {
            channel: channel.clone(),
            state: Mutex::new(InboxState::default()),
            turn: ReentrantMutex::new(()),
            changes: ObserverList::new(format!("inbox:{channel}")),
            subscription: Mutex::new(None),
        });

        let weak = Arc::downgrade(&inner);
        let subscription = bus.subscribe(channel, move |event| {
            weak.upgrade().map_or(Ok(()), |inner| inner.on_event(event))
        })?;
        debug!(channel = %channel, subscription = subscription.id(), "Inbox attached");
        *inner.subscription.lock() = Some(subscription);

        Ok(Self { inner })
    }

    /// Unsubscribes from the bus and drops every change observer.
    ///
    /// One-way and idempotent. Returns `true` only for the call that performed the transition.
    pub fn dispose(&self) -> bool {
        {
            let mut state = self.inner.state.lock();
            if !state.status.is_active() {
                return false;
            }
            state.status = HolderStatus::Disposed;
        }

        let subscription = self.inner.subscription.lock().take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
        let observers = self.inner.changes.clear();
        debug!(channel = %self.inner.channel, observers, "Inbox disposed");
        true
    }

    /// Registers a change observer, called once per received message and on `mark_read`.
    ///
    /// Observers run synchronously inside the publish, after the mutation is visible.
    /// After `dispose` the returned handle is already released and never called.
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&InboxChange) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        let subscription = self.inner.changes.add(callback);
        // A concurrent dispose after this check is covered by its `clear`.
        if !self.status().is_active() {
            subscription.unsubscribe();
        }
        subscription
    }

    /// Clears the unread flag. Returns `false` if there was nothing unread or the
    /// inbox is disposed.
    pub fn mark_read(&self) -> bool {
        let _turn = self.inner.turn.lock();
        let change = {
            let mut state = self.inner.state.lock();
            if !state.status.is_active() || !state.has_unread {
                return false;
            }
            state.has_unread = false;
            state.change()
        };
        self.inner.changes.notify(&change);
        true
    }

    /// Snapshot of the messages in arrival order.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.inner.state.lock().messages.clone()
    }

    /// Message texts in arrival order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.inner.state.lock().messages.iter().map(|m| m.text.clone()).collect()
    }

    #[must_use]
    pub fn last(&self) -> Option<Message> {
        self.inner.state.lock().messages.last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.lock().messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().messages.is_empty()
    }

    #[must_use]
    pub fn has_unread(&self) -> bool {
        self.inner.state.lock().has_unread
    }

    #[must_use]
    pub fn status(&self) -> HolderStatus {
        self.inner.state.lock().status
    }

    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.inner.channel
    }

    /// Non-owning handle, for observers that must not keep the inbox alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakInbox {
        WeakInbox { inner: Arc::downgrade(&self.inner) }
    }
}

impl fmt::Debug for Inbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Inbox")
            .field("channel", &self.inner.channel)
            .field("status", &state.status)
            .field("len", &state.messages.len())
            .field("has_unread", &state.has_unread)
            .field("observers", &self.inner.changes.len())
            .finish()
    }
}

/// Weak counterpart of [`Inbox`].
#[derive(Clone)]
pub struct WeakInbox {
    inner: Weak<InboxInner>,
}

impl WeakInbox {
    #[must_use]
    pub fn upgrade(&self) -> Option<Inbox> {
        self.inner.upgrade().map(|inner| Inbox { inner })
    }
}

impl fmt::Debug for WeakInbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakInbox").field("alive", &(self.inner.strong_count() > 0)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() -> (EventBus, Channel, Inbox) {
        let bus = EventBus::new();
        let channel = Channel::new("C").unwrap();
        let inbox = Inbox::attach(&bus, &channel).unwrap();
        (bus, channel, inbox)
    }

    #[test]
    fn ids_follow_arrival_order() {
        let (bus, channel, inbox) = setup();
        for payload in ["a", "b", "c"] {
            bus.publish(&channel, payload).unwrap();
        }

        let ids: Vec<u64> = inbox.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, [0, 1, 2]);
        assert_eq!(inbox.last().map(|m| m.text), Some("c".to_owned()));
    }

    #[test]
    fn change_reports_state_after_mutation() {
        let (bus, channel, inbox) = setup();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reader = inbox.downgrade();
        let _obs = inbox.on_change(move |change| {
            let inbox = reader.upgrade().ok_or("inbox gone")?;
            assert_eq!(inbox.len(), change.len);
            sink.lock().push(*change);
            Ok(())
        });

        bus.publish(&channel, "a").unwrap();
        assert!(inbox.mark_read());
        assert!(!inbox.mark_read());

        assert_eq!(
            *seen.lock(),
            [
                InboxChange { len: 1, latest_id: Some(0), has_unread: true },
                InboxChange { len: 1, latest_id: Some(0), has_unread: false },
            ]
        );
    }

    #[test]
    fn dispose_is_one_way_and_idempotent() {
        let (bus, channel, inbox) = setup();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let obs = inbox.on_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert!(inbox.dispose());
        assert!(!inbox.dispose());
        assert!(!obs.is_active());
        assert_eq!(bus.subscriber_count("C"), 0);

        bus.publish(&channel, "late").unwrap();
        assert!(inbox.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(inbox.status(), HolderStatus::Disposed);
    }

    #[test]
    fn dropping_last_handle_unsubscribes() {
        let (bus, channel, inbox) = setup();
        let weak = inbox.downgrade();
        let clone = inbox.clone();

        drop(inbox);
        assert_eq!(bus.subscriber_count(channel.as_str()), 1);

        drop(clone);
        assert!(weak.upgrade().is_none());
        assert_eq!(bus.subscriber_count(channel.as_str()), 0);
    }
}
