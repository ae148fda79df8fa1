use std::any::Any;
use std::borrow::Cow;

/// Failure reported by a subscriber callback.
///
/// Never propagated to the publisher or to other subscribers: the bus logs it,
/// counts it in [`Delivery::faulted`](crate::Delivery::faulted) and moves on.
#[relay_derive::relay_error]
pub enum CallbackError {
    /// The callback returned an error.
    #[error("Callback failed{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The callback panicked; the panic was caught at the delivery boundary.
    #[error("Callback panicked{}: {message}", format_context(.context))]
    Panicked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CallbackError {
    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message: Cow<'static, str> = if let Some(msg) = payload.downcast_ref::<&'static str>()
        {
            Cow::Borrowed(msg)
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            Cow::Owned(msg.clone())
        } else {
            Cow::Borrowed("unknown panic")
        };
        Self::Panicked { message, context: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_are_readable() {
        let err = CallbackError::from_panic(&"static boom");
        assert!(matches!(&err, CallbackError::Panicked { message, .. } if message == "static boom"));

        let err = CallbackError::from_panic(&String::from("owned boom"));
        assert_eq!(err.to_string(), "Callback panicked: owned boom");

        let err = CallbackError::from_panic(&42_u8);
        assert_eq!(err.label(), "callback_panicked");
        assert_eq!(err.to_string(), "Callback panicked: unknown panic");
    }

    #[test]
    fn callbacks_fail_with_plain_strings() {
        let err: CallbackError = "view is gone".into();
        assert_eq!(err.label(), "callback_internal");
        assert_eq!(err.to_string(), "Callback failed: view is gone");
    }
}
