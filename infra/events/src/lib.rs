//! # Event Bus
//!
//! A synchronous, thread-safe publish/subscribe registry keyed by named channels.
//!
//! ## Overview
//!
//! Publishers and subscribers share a single [`EventBus`] and agree only on a
//! [`Channel`] name. `publish` delivers the payload to every callback registered on
//! the channel, in registration order, before it returns.
//!
//! ## Features
//!
//! * **Named channels**: validated once, cheap to clone.
//! * **Synchronous delivery**: no queues, no buffering, no replay for late subscribers.
//! * **Isolation**: a failing or panicking callback never stops delivery to the others.
//! * **Handles**: a [`Subscription`] unregisters its callback when released or dropped.
//! * **Fast registry**: `FxHashMap` + `parking_lot` locks, no lock held during callbacks.
//!
//! # Example
//!
//! ```rust
//! use relay_event_bus::{EventBus, EventBusError};
//! use std::sync::{Arc, Mutex};
//!
//! fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!     let received = Arc::new(Mutex::new(Vec::new()));
//!
//!     let sink = Arc::clone(&received);
//!     let _sub = bus.subscribe("View2Msg", move |event| {
//!         sink.lock().map_err(|_| "poisoned")?.push(event.payload().to_owned());
//!         Ok(())
//!     })?;
//!
//!     bus.publish("View2Msg", "a")?;
//!     bus.publish("View2Msg", "b")?;
//!
//!     assert_eq!(*received.lock().unwrap(), ["a", "b"]);
//!     Ok(())
//! }
//! ```

mod bus;
mod channel;
mod error;
mod event;
mod fault;
mod observers;
mod subscription;

pub use bus::EventBus;
pub use channel::{Channel, IntoChannel};
pub use error::{EventBusError, EventBusErrorExt};
pub use event::Event;
pub use fault::{CallbackError, CallbackErrorExt};
pub use observers::{Callback, Delivery, ObserverList};
pub use subscription::Subscription;
