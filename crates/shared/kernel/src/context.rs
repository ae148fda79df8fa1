use crate::config::{ConfigError, ConfigErrorExt};
use relay_domain::config::AppConfig;
use relay_event_bus::{Channel, EventBus};
use std::ops::Deref;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct AppContextInner {
    pub config: AppConfig,
    /// The one bus of the process. Components get it injected from here.
    pub bus: EventBus,
    /// Validated form of `config.channel`.
    pub channel: Channel,
}

/// Composition root: owns the configuration and the process-wide event bus.
///
/// Cheap to clone; every clone shares the same bus.
#[derive(Debug, Clone)]
pub struct AppContext {
    inner: Arc<AppContextInner>,
}

impl AppContext {
    /// Validates `config` and builds a fresh bus.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidChannel`] if `config.channel` is not a valid channel name.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let channel = Channel::new(&config.channel).context("Configured channel is invalid")?;
        debug!(channel = %channel, "Application context created");

        Ok(Self { inner: Arc::new(AppContextInner { config, bus: EventBus::new(), channel }) })
    }
}

impl Deref for AppContext {
    type Target = AppContextInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
