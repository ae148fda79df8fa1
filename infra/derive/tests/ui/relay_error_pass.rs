use relay_derive::relay_error;
use std::borrow::Cow;

#[relay_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk on fire")).context("Reading the inbox")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.label(), "demo_io");
    assert_eq!(err.to_string(), "IO error (Reading the inbox): disk on fire");

    let err = DemoError::from("boom");
    assert_eq!(err.label(), "demo_internal");
    assert_eq!(err.to_string(), "Internal error: boom");

    let err: Result<(), DemoError> = Err(DemoError::from(String::from("late")));
    let err = err.context("after dispose").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (after dispose): late");
}
