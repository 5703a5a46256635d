// Layered settings: defaults -> lobx.toml (or --config) -> LOBX__* environment.

use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat, FileSourceFile};
use serde::Deserialize;

use crate::error::{AggError, AggResult};
use crate::market_data::adapters::{coinbase, gemini};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log_filter: String,
    pub http: HttpSettings,
    pub venues: VenueSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    pub timeout_ms: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueSettings {
    pub gemini: VenueEndpoint,
    pub coinbase: VenueEndpoint,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueEndpoint {
    pub url: String,
    pub min_interval_ms: u64,
    pub enabled: bool,
}

impl VenueEndpoint {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Settings {
    /// Load settings. `path` replaces the default optional `lobx.toml` and must exist.
    pub fn load(path: Option<&Path>) -> AggResult<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name("lobx").required(false),
        };
        Self::layered(Some(file), Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix("LOBX").separator("__").try_parsing(true)
    }

    fn layered(file: Option<File<FileSourceFile, FileFormat>>, env: Environment) -> AggResult<Self> {
        let mut builder = Config::builder()
            .set_default("log_filter", "info")?
            .set_default("http.timeout_ms", 5_000)?
            .set_default("http.user_agent", concat!("lobx-agg/", env!("CARGO_PKG_VERSION")))?
            .set_default("venues.gemini.url", gemini::DEFAULT_URL)?
            .set_default("venues.gemini.min_interval_ms", 2_000)?
            .set_default("venues.gemini.enabled", true)?
            .set_default("venues.coinbase.url", coinbase::DEFAULT_URL)?
            .set_default("venues.coinbase.min_interval_ms", 2_000)?
            .set_default("venues.coinbase.enabled", true)?;
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from defaults, an optional file, and `vars` standing in for the process environment.
    #[cfg(test)]
    pub(crate) fn isolated(file: Option<&Path>, vars: &[(&str, &str)]) -> AggResult<Self> {
        let vars = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Self::layered(file.map(|p| File::from(p).required(true)), Self::environment().source(Some(vars)))
    }

    fn validate(&self) -> AggResult<()> {
        if self.http.timeout_ms == 0 {
            return Err(AggError::Config("http.timeout_ms must be greater than 0".to_string()));
        }
        if !self.venues.gemini.enabled && !self.venues.coinbase.enabled {
            return Err(AggError::Config("at least one venue must be enabled".to_string()));
        }
        Ok(())
    }
}
