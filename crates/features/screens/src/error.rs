use relay_event_bus::EventBusError;
use relay_inbox::InboxError;
use std::borrow::Cow;

/// Screens slice error type.
#[relay_derive::relay_error]
pub enum ScreenError {
    #[error("Screen bus error{}: {source}", format_context(.context))]
    Bus { source: EventBusError, context: Option<Cow<'static, str>> },

    #[error("Screen inbox error{}: {source}", format_context(.context))]
    Inbox { source: InboxError, context: Option<Cow<'static, str>> },
}
