use relay_event_bus::EventBusError;
use std::borrow::Cow;

/// Inbox slice error type.
#[relay_derive::relay_error]
pub enum InboxError {
    #[error("Inbox bus error{}: {source}", format_context(.context))]
    Bus { source: EventBusError, context: Option<Cow<'static, str>> },
}
