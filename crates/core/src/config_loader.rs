use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

/// Environment variable prefix; nested keys are split on `__`.
pub const ENV_PREFIX: &str = "LEV_ALLOC_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering built-in defaults, `config/Config.toml`
    /// and `LEV_ALLOC_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from("config/Config.toml", None)
    }

    /// Loads configuration with a profile overlay (`config/Config.{profile}.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        Self::load_from("config/Config.toml", Some(profile))
    }

    /// Loads configuration from an explicit base file, with an optional
    /// profile overlay next to it. Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(path: &str, profile: Option<&str>) -> Result<AppConfig> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path));

        if let Some(profile) = profile {
            figment = figment.merge(Toml::file(profile_path(path, profile)));
        }

        let config: AppConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }
}

/// `config/Config.toml` + `paper` -> `config/Config.paper.toml`
fn profile_path(path: &str, profile: &str) -> String {
    match path.strip_suffix(".toml") {
        Some(stem) => format!("{stem}.{profile}.toml"),
        None => format!("{path}.{profile}"),
    }
}
