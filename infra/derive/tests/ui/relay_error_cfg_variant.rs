use relay_derive::relay_error;
use std::borrow::Cow;

#[relay_error]
pub enum ChannelError {
    #[error("Invalid channel{}: {message}", format_context(.context))]
    InvalidChannel { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[cfg(any())]
    #[error("Never compiled{}: {message}", format_context(.context))]
    NeverCompiled { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = ChannelError::InvalidChannel { message: "empty".into(), context: None };
    assert_eq!(err.label(), "channel_invalid_channel");
}
