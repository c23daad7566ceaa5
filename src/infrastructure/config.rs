use serde::Deserialize;
use std::time::Duration;

use crate::application::geocode_service::CacheSettings;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_base_url")]
    pub base_url: String,
    /// Appended to every search so bare city/state pairs resolve domestically.
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_base_url(),
            country: default_country(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl GeocoderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache(&self) -> CacheSettings {
        CacheSettings {
            capacity: self.cache_capacity,
            ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_geocoder_base_url() -> String {
    "https://geocode.maps.co".to_string()
}

fn default_country() -> String {
    "US".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_ttl_secs() -> u64 {
    24 * 3600
}

fn default_cache_capacity() -> u64 {
    1000
}

/// Load `config/electrichome.*` (optional) overlaid with `ELECTRICHOME__SECTION__KEY` variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/electrichome").required(false))
        .add_source(config::Environment::with_prefix("ELECTRICHOME").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[geocoder]\ncountry = \"CA\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.geocoder.country, "CA");
        assert_eq!(config.geocoder.base_url, "https://geocode.maps.co");
        assert_eq!(config.geocoder.api_key, None);
        assert_eq!(config.geocoder.timeout(), Duration::from_secs(10));
        assert_eq!(config.geocoder.cache().ttl, Duration::from_secs(86_400));
    }
}
