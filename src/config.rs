use ascii_models::{Config, StreamerError};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

/// Points at an explicit config file.
pub const CONFIG_ENV: &str = "ASCII_CONFIG";
pub const ENV_PREFIX: &str = "ASCII_";
pub const CONFIG_PATHS: [&str; 2] = ["config/default.toml", "configs/default.toml"];
/// Upper bound for `stream.max_delay_secs`.
pub const MAX_DELAY_LIMIT_SECS: f64 = 3600.0;

/// The file to layer over the defaults: `$ASCII_CONFIG`, else the first
/// existing entry of [`CONFIG_PATHS`].
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

pub fn figment(path: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
}

/// Defaults, then the config file, then `ASCII_*` environment variables.
pub fn load_config() -> Result<Config, figment::Error> {
    let path = config_path();
    if let Some(path) = &path {
        if !path.exists() {
            return Err(figment::Error::from(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
    }
    figment(path.as_deref()).extract()
}

pub fn validate_config(config: &Config) -> Result<(), StreamerError> {
    let invalid = |reason: String| Err(StreamerError::Config { reason });

    if config.server.workers == 0 {
        return invalid("server.workers must be at least 1".to_string());
    }
    let stream = &config.stream;
    if !(stream.max_delay_secs > 0.0 && stream.max_delay_secs <= MAX_DELAY_LIMIT_SECS) {
        return invalid(format!(
            "stream.max_delay_secs must be in (0, {}]",
            MAX_DELAY_LIMIT_SECS
        ));
    }
    if !(stream.default_delay_secs > 0.0 && stream.default_delay_secs <= stream.max_delay_secs) {
        return invalid(format!(
            "stream.default_delay_secs must be in (0, {}]",
            stream.max_delay_secs
        ));
    }
    if config.animations.is_empty() {
        return invalid("at least one animation must be configured".to_string());
    }
    Ok(())
}
