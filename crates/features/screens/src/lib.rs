//! # Screens
//!
//! Presentation components of the notification demo.
//!
//! * [`SenderView`] ("View2") publishes a greeting on the configured channel.
//! * [`ReceiverView`] ("Notification Center Demo") owns an [`Inbox`](relay_inbox::Inbox)
//!   and re-renders its list onto a [`Surface`] whenever the inbox changes.
//! * [`Navigator`] is the two-level stack that switches between them.
//!
//! Views never draw directly: they produce [`Frame`]s and hand them to a [`Surface`].

mod error;
mod frame;
mod navigator;
mod receiver;
mod sender;
mod surface;

pub use crate::error::{ScreenError, ScreenErrorExt};
pub use crate::frame::{Frame, Line};
pub use crate::navigator::{Navigator, Screen};
pub use crate::receiver::{RECEIVER_TITLE, ReceiverView, SENDER_LINK};
pub use crate::sender::{SEND_BUTTON, SENDER_TITLE, SenderView};
pub use crate::surface::{BufferSurface, Surface};
