use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[relay_derive::relay_error]
pub enum EventBusError {
    /// The channel name is empty, blank, or contains control characters.
    #[error("Invalid channel{}: {message}", format_context(.context))]
    InvalidChannel { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
