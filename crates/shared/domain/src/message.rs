use serde::Serialize;
use std::time::SystemTime;

/// One received notification, as held by the view state.
///
/// `id` is assigned by the holder at append time: `0` for the first message and
/// `+1` for every following one. It is stable for the life of the holder and is
/// what list rows are keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub received_at: SystemTime,
    /// Sequence number of the bus event this message was built from.
    pub event_seq: u64,
}

impl Message {
    #[must_use]
    pub fn new(id: u64, text: impl Into<String>, event_seq: u64) -> Self {
        Self { id, text: text.into(), received_at: SystemTime::now(), event_seq }
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
