//! # Inbox
//!
//! The view state behind a notification list. An [`Inbox`] subscribes to one bus
//! channel, appends every payload it receives as a [`Message`] and tells its own
//! change observers about it before the publish returns.
//!
//! ```rust
//! use relay_event_bus::{Channel, EventBus};
//! use relay_inbox::{HolderStatus, Inbox};
//!
//! let bus = EventBus::new();
//! let channel = Channel::new("View2Msg").unwrap();
//! let inbox = Inbox::attach(&bus, &channel).unwrap();
//!
//! bus.publish(&channel, "a").unwrap();
//! bus.publish(&channel, "b").unwrap();
//! assert_eq!(inbox.texts(), ["a", "b"]);
//! assert!(inbox.has_unread());
//!
//! inbox.dispose();
//! bus.publish(&channel, "c").unwrap();
//! assert_eq!(inbox.len(), 2);
//! assert_eq!(inbox.status(), HolderStatus::Disposed);
//! ```

mod error;
mod inbox;
mod status;

pub use crate::error::{InboxError, InboxErrorExt};
pub use crate::inbox::{Inbox, InboxChange, WeakInbox};
pub use crate::status::HolderStatus;
pub use relay_domain::Message;
