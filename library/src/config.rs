//! Host configuration loaded from `host.toml`.

use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HostError;
use crate::tensor::Device;

/// Largest pixel dimension a node may produce unless configured otherwise.
pub const DEFAULT_MAX_RESOLUTION: u32 = 16384;

/// Smallest pixel dimension any node produces.
pub const MIN_RESOLUTION: u32 = 64;

/// Largest `max_resolution` a config may set; integer widgets are 32-bit signed.
pub const MAX_CONFIGURABLE_RESOLUTION: u32 = i32::MAX as u32;

const CONFIG_FILE_NAME: &str = "host.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    pub max_resolution: u32,
    pub intermediate_device: Device,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_resolution: DEFAULT_MAX_RESOLUTION,
            intermediate_device: Device::Cpu,
        }
    }
}

impl HostConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, HostError> {
        let config: HostConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Strict load: any read, parse or validation failure is an error.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, HostError> {
        let toml_str = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&toml_str)
    }

    fn validate(&self) -> Result<(), HostError> {
        if self.max_resolution < MIN_RESOLUTION {
            return Err(HostError::InvalidArgument(format!(
                "max_resolution must be at least {}, got {}",
                MIN_RESOLUTION, self.max_resolution
            )));
        }
        if self.max_resolution > MAX_CONFIGURABLE_RESOLUTION {
            return Err(HostError::InvalidArgument(format!(
                "max_resolution must be at most {}, got {}",
                MAX_CONFIGURABLE_RESOLUTION, self.max_resolution
            )));
        }
        Ok(())
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    ProjectDirs::from("ai", "latent", "latent_host")
        .map(|proj_dirs| proj_dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Lenient load from the platform config directory, or from `path` when
/// given. Falls back to defaults when the file is absent or broken.
pub fn load_config(path: Option<&Path>) -> HostConfig {
    let explicit = path.is_some();
    let path = match path.map(Path::to_path_buf).or_else(get_config_path) {
        Some(path) => path,
        None => return HostConfig::default(),
    };
    if !path.exists() {
        if explicit {
            warn!("Config file {} not found, using defaults", path.display());
        }
        return HostConfig::default();
    }
    match HostConfig::from_path(&path) {
        Ok(config) => {
            info!("Host config loaded from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load config file, using defaults: {}", e);
            HostConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = HostConfig::from_toml("").unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.max_resolution, 16384);
    }

    #[test]
    fn parses_device_and_limit() {
        let config = HostConfig::from_toml(
            r#"
            max_resolution = 8192
            intermediate_device = { gpu = 1 }
            "#,
        )
        .unwrap();
        assert_eq!(config.max_resolution, 8192);
        assert_eq!(config.intermediate_device, Device::Gpu(1));

        let config = HostConfig::from_toml(r#"intermediate_device = "cpu""#).unwrap();
        assert_eq!(config.intermediate_device, Device::Cpu);
    }

    #[test]
    fn rejects_limit_below_minimum() {
        let err = HostConfig::from_toml("max_resolution = 32").unwrap_err();
        assert!(matches!(err, HostError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_limit_past_signed_32_bits() {
        let err = HostConfig::from_toml("max_resolution = 4294967295").unwrap_err();
        assert!(matches!(err, HostError::InvalidArgument(ref msg) if msg.contains("at most")));

        let config = HostConfig::from_toml("max_resolution = 2147483647").unwrap();
        assert_eq!(config.max_resolution, MAX_CONFIGURABLE_RESOLUTION);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/latent_host/host.toml")));
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "max_resolution = 4096\n").unwrap();

        let config = HostConfig::from_path(&path).unwrap();
        assert_eq!(config.max_resolution, 4096);
        assert_eq!(load_config(Some(&path)), config);
    }

    #[test]
    fn unparseable_file_is_strict_error_but_lenient_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "max_resolution = [not toml").unwrap();

        let err = HostConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, HostError::Config(_)));
        assert_eq!(load_config(Some(&path)), HostConfig::default());
    }

    #[test]
    fn invalid_limit_in_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "max_resolution = 8").unwrap();

        assert!(matches!(
            HostConfig::from_path(&path),
            Err(HostError::InvalidArgument(_))
        ));
        assert_eq!(load_config(Some(&path)), HostConfig::default());
    }
}
