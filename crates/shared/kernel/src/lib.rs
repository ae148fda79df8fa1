//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading and the composition root that
//! owns the single [`EventBus`](relay_event_bus::EventBus) of the process.
//!
//! ## Config loading
//! ```rust
//! use relay_kernel::config::load_config;
//! use relay_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
//! assert!(!cfg.channel.is_empty());
//! ```
//!
//! ## Composition root
//! ```rust
//! use relay_kernel::AppContext;
//! use relay_kernel::domain::config::AppConfig;
//!
//! let ctx = AppContext::new(AppConfig::default()).unwrap();
//! assert_eq!(ctx.channel.as_str(), "View2Msg");
//! ```
pub mod config;
pub mod context;

pub use context::AppContext;
pub use relay_domain as domain;
pub use relay_event_bus as events;
