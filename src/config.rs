use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Path the binaries look for a config at.
pub const DEFAULT_CONFIG_PATH: &str = "dashboard.json";

/// Startup configuration: the time-series source and the fixed input /
/// output file paths. Every field has a default, so a missing file or a
/// partial JSON object both work.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// InfluxDB base URL.
    pub url: String,
    pub org: String,
    pub token: String,
    /// Bucket holding the sensor measurements.
    pub bucket: String,
    /// Offline comparison dataset read at startup.
    pub comparison_path: PathBuf,
    /// Destination of the optional readings cache.
    pub cache_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: "http://localhost:8086".to_string(),
            org: String::new(),
            token: "root:root".to_string(),
            bucket: "esp2nred".to_string(),
            comparison_path: PathBuf::from("dht11-temp-data-boxplot.csv"),
            cache_path: PathBuf::from("dht11-temp-data.csv"),
        }
    }
}

/// Read `path` if it exists, otherwise fall back to the defaults.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if !path.exists() {
        log::info!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"url": "http://192.168.1.20:8086", "bucket": "attic"}"#)
                .unwrap();
        assert_eq!(config.url, "http://192.168.1.20:8086");
        assert_eq!(config.bucket, "attic");
        assert_eq!(config.token, "root:root");
        assert_eq!(config.cache_path, PathBuf::from("dht11-temp-data.csv"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_or_default(Path::new("does-not-exist.json")).unwrap();
        assert_eq!(config, Config::default());
    }
}
