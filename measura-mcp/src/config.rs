//! Server configuration from the environment

use std::env;
use std::path::PathBuf;
use measura::MAX_MIN_SCALE;
use tracing::warn;

pub const DATA_PATH_VAR: &str = "MEASURA_DATA_PATH";
pub const MIN_SCALE_VAR: &str = "MEASURA_MIN_SCALE";

const DEFAULT_DATA_PATH: &str = "./measura-data";
const PREFS_FILE: &str = "prefs.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_path: PathBuf,
    pub min_scale: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            min_scale: 0,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable lookup. Unparsable values fall back to the
    /// defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(MIN_SCALE_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(scale) if scale > MAX_MIN_SCALE => {
                    warn!(value = scale, max = MAX_MIN_SCALE, "clamping {}", MIN_SCALE_VAR);
                    config.min_scale = MAX_MIN_SCALE;
                }
                Ok(scale) => config.min_scale = scale,
                Err(e) => warn!(value = %raw, error = %e, "ignoring invalid {}", MIN_SCALE_VAR),
            }
        }

        config
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.data_path.join(PREFS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]);
        assert_eq!(c, ServerConfig::default());
        assert_eq!(c.prefs_path(), PathBuf::from("./measura-data/prefs.json"));
    }

    #[test]
    fn test_overrides() {
        let c = config(&[(DATA_PATH_VAR, "/var/lib/measura"), (MIN_SCALE_VAR, " 6 ")]);
        assert_eq!(c.data_path, PathBuf::from("/var/lib/measura"));
        assert_eq!(c.min_scale, 6);
    }

    #[test]
    fn test_oversized_scale_is_clamped() {
        let c = config(&[(MIN_SCALE_VAR, "4294967295")]);
        assert_eq!(c.min_scale, MAX_MIN_SCALE);
    }

    #[test]
    fn test_invalid_scale_is_ignored() {
        let c = config(&[(MIN_SCALE_VAR, "-2")]);
        assert_eq!(c.min_scale, 0);
    }
}
