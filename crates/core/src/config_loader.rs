use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::config::AppConfig;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering the TOML file (if present) and
    /// `OPTVIEWER_`-prefixed environment variables over the defaults.
    /// Nested keys use `__`, e.g. `OPTVIEWER_VIEWER__REFRESH_INTERVAL_MS`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or environment cannot be parsed into
    /// a valid `AppConfig`.
    pub fn load(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("OPTVIEWER_").split("__"))
            .extract()?;

        Ok(config)
    }
}
