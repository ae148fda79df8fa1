//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`).
//! Keep it lean: no I/O, no bus wiring, no rendering. Just data and simple helpers.

pub mod channels;
pub mod config;
pub mod message;

pub use message::Message;
