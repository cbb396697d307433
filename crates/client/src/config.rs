//! Environment-driven client configuration.

use std::path::PathBuf;

/// Runtime configuration for the EcoBoard client.
///
/// - `ECOBOARD_API_URL`: base URL of the identity service; when unset the
///   binary runs against its built-in demo service.
/// - `ECOBOARD_API_KEY`: optional bearer token for the service.
/// - `ECOBOARD_DATA_DIR`: override for where the session slot lives
///   (defaults to the OS app-data directory).
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: get("ECOBOARD_API_URL").filter(|v| !v.trim().is_empty()),
            api_key: get("ECOBOARD_API_KEY").filter(|v| !v.trim().is_empty()),
            data_dir: get("ECOBOARD_DATA_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn missing_vars_mean_demo_mode() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert!(config.api_url.is_none());
        assert!(config.api_key.is_none());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn set_vars_are_picked_up() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("ECOBOARD_API_URL", "https://id.malabar.eco"),
            ("ECOBOARD_API_KEY", "key-123"),
            ("ECOBOARD_DATA_DIR", "/tmp/ecoboard"),
        ]));
        assert_eq!(config.api_url.as_deref(), Some("https://id.malabar.eco"));
        assert_eq!(config.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/ecoboard")));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = ClientConfig::from_lookup(lookup(&[("ECOBOARD_API_URL", "  ")]));
        assert!(config.api_url.is_none());
    }
}
