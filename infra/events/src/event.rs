use crate::channel::Channel;
use std::sync::Arc;
use std::time::SystemTime;

/// Immutable payload delivered to every subscriber of a channel.
///
/// Created by [`EventBus::publish`](crate::EventBus::publish) and handed to each
/// subscriber by shared reference.
#[derive(Debug, Clone)]
pub struct Event {
    seq: u64,
    channel: Channel,
    payload: Arc<str>,
    at: SystemTime,
}

impl Event {
    pub(crate) fn new(seq: u64, channel: Channel, payload: Arc<str>) -> Self {
        Self { seq, channel, payload, at: SystemTime::now() }
    }

    /// Per-bus sequence number, strictly increasing in publish order.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub const fn channel(&self) -> &Channel {
        &self.channel
    }

    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Wall-clock time the event was created.
    #[must_use]
    pub const fn at(&self) -> SystemTime {
        self.at
    }
}
