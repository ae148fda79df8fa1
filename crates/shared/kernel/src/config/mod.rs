use config::{Config, Environment, File};
use relay_event_bus::EventBusError;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides (`RELAY__SENDER__GREETING` maps to `sender.greeting`).
pub const ENV_PREFIX: &str = "RELAY";

/// Custom error type for config loading.
#[relay_derive::relay_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Invalid channel in config{}: {source}", format_context(.context))]
    InvalidChannel { source: EventBusError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: when `path` is given, settings are loaded from it. The format is
///    inferred from the extension (`relay.toml`, `relay.json`, ...) and the file is required.
///    Without a path, every field falls back to `T`'s serde defaults.
/// 2. **Environment Overrides**: values from environment variables prefixed with `RELAY__`
///    are layered on top. Nested keys use double underscores
///    (e.g., `RELAY__LOG__LEVEL` maps to `log.level`).
///
/// # Errors
/// This function will return an error if:
/// * The specified configuration file cannot be found or parsed.
/// * The merged settings do not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use relay_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     channel: String,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/missing.toml")).unwrap_or_default();
/// assert!(cfg.channel.is_empty());
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = &path {
        let path: &Path = path.as_ref();
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    } else {
        info!("No config file given, using defaults and {ENV_PREFIX}__ overrides");
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake), // Env var overrides (e.g., RELAY__LOG__JSON)
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
