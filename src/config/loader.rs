use super::types::*;
use crate::utils::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOCAL_CONFIG_FILE: &str = "hdr2sdr.yaml";
const USER_CONFIG_DIR: &str = "hdr2sdr";
const USER_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub tools: ToolsConfig,
    pub conversion: ConversionConfig,
    pub organize: OrganizeConfig,
    pub logging: LoggingConfig,
}

/// Values given on the command line; `None` keeps the file value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub ffmpeg: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub auto_organize: Option<bool>,
    pub on_collision: Option<CollisionPolicy>,
    pub log_level: Option<String>,
    pub colored_output: Option<bool>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the explicit path if given (it must exist), otherwise the first
    /// of `./hdr2sdr.yaml` and the user config file that exists, otherwise
    /// built-in defaults.
    pub fn load_with_fallback(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::validation(format!(
                    "Configuration file does not exist: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        for candidate in Self::default_locations() {
            if candidate.is_file() {
                debug!("Loading configuration from {}", candidate.display());
                return Self::load(&candidate);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE));
        }
        locations
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(input) = overrides.input {
            self.paths.input = input;
        }
        if let Some(output) = overrides.output {
            self.paths.output = output;
        }
        if let Some(ffmpeg) = overrides.ffmpeg {
            self.tools.ffmpeg = ffmpeg;
        }
        if let Some(timeout) = overrides.timeout_seconds {
            self.conversion.timeout_seconds = timeout;
        }
        if let Some(auto) = overrides.auto_organize {
            self.organize.auto = Some(auto);
        }
        if let Some(policy) = overrides.on_collision {
            self.organize.on_collision = policy;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(colored) = overrides.colored_output {
            self.logging.colored_output = colored;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tools.ffmpeg.trim().is_empty() {
            return Err(Error::validation("tools.ffmpeg must not be empty"));
        }

        let conversion = &self.conversion;
        if conversion.extensions.is_empty() {
            return Err(Error::validation(
                "At least one video extension must be configured",
            ));
        }
        if let Some(ext) = conversion
            .extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(Error::validation(format!(
                "Invalid extension '{}' (must start with '.')",
                ext
            )));
        }
        if conversion.nominal_peak.is_nan() || conversion.nominal_peak <= 0.0 {
            return Err(Error::validation(format!(
                "nominal_peak must be greater than 0 (got {})",
                conversion.nominal_peak
            )));
        }
        if !(0.0..=10.0).contains(&conversion.desaturation) {
            return Err(Error::validation(format!(
                "desaturation must be between 0 and 10 (got {})",
                conversion.desaturation
            )));
        }
        for (name, value) in [
            ("pixel_format", &conversion.pixel_format),
            ("video_codec", &conversion.video_codec),
            ("audio_codec", &conversion.audio_codec),
        ] {
            if value.trim().is_empty() {
                return Err(Error::validation(format!("{} must not be empty", name)));
            }
        }

        if self.organize.delimiter.is_empty() {
            return Err(Error::validation("organize.delimiter must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();

        assert_eq!(config.paths.input, PathBuf::from("videos"));
        assert_eq!(config.paths.output, PathBuf::from("output_videos"));
        assert_eq!(config.conversion.extensions.len(), 6);
        assert_eq!(config.conversion.tonemap, ToneMapOperator::Hable);
        assert_eq!(config.organize.auto, None);
    }

    #[test]
    fn test_config_load_from_string() {
        let yaml = r#"
paths:
  input: "/media/hdr"
  output: "/media/sdr"

tools:
  ffmpeg: "/opt/ffmpeg/bin/ffmpeg"

conversion:
  nominal_peak: 203
  tonemap: mobius
  timeout_seconds: 3600

organize:
  auto: true
  delimiter: "_"
  on_collision: overwrite

logging:
  level: "debug"
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.paths.input, PathBuf::from("/media/hdr"));
        assert_eq!(config.tools.ffmpeg, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.conversion.nominal_peak, 203.0);
        assert_eq!(config.conversion.tonemap, ToneMapOperator::Mobius);
        assert_eq!(config.conversion.timeout_seconds, 3600);
        assert_eq!(config.conversion.video_codec, "libx264");
        assert_eq!(config.organize.auto, Some(true));
        assert_eq!(config.organize.delimiter, "_");
        assert_eq!(config.organize.on_collision, CollisionPolicy::Overwrite);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.colored_output);
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.conversion.extensions = vec!["mp4".to_string()];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.conversion.extensions.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.conversion.nominal_peak = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.conversion.video_codec = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.organize.delimiter.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_tonemap_rejected() {
        let yaml = "conversion:\n  tonemap: filmic\n";
        assert!(matches!(Config::from_yaml(yaml), Err(Error::Config(_))));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            input: Some(PathBuf::from("/in")),
            timeout_seconds: Some(120),
            auto_organize: Some(false),
            ..Default::default()
        });

        assert_eq!(config.paths.input, PathBuf::from("/in"));
        assert_eq!(config.paths.output, PathBuf::from("output_videos"));
        assert_eq!(config.conversion.timeout_seconds, 120);
        assert_eq!(config.organize.auto, Some(false));
        assert_eq!(config.tools.ffmpeg, "ffmpeg");
    }

    #[test]
    fn test_load_with_fallback_missing_explicit() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("none.yaml");
        assert!(Config::load_with_fallback(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_with_fallback_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "tools:\n  ffmpeg: ffmpeg7\n").unwrap();

        let config = Config::load_with_fallback(Some(&path)).unwrap();
        assert_eq!(config.tools.ffmpeg, "ffmpeg7");
    }
}
