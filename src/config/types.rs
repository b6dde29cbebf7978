use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::filesystem::VIDEO_EXTENSIONS;

pub const DEFAULT_INPUT_DIR: &str = "videos";
pub const DEFAULT_OUTPUT_DIR: &str = "output_videos";

/// Nominal peak luminance (cd/m²) used when linearizing the source.
pub const DEFAULT_NOMINAL_PEAK: f64 = 100.0;
pub const DEFAULT_PIXEL_FORMAT: &str = "yuv420p";
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
pub const DEFAULT_AUDIO_CODEC: &str = "copy";
pub const DEFAULT_PREFIX_DELIMITER: &str = "-";

/// Tone-mapping curves understood by FFmpeg's `tonemap` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMapOperator {
    None,
    Linear,
    Gamma,
    Clip,
    Reinhard,
    #[default]
    Hable,
    Mobius,
}

impl ToneMapOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Linear => "linear",
            Self::Gamma => "gamma",
            Self::Clip => "clip",
            Self::Reinhard => "reinhard",
            Self::Hable => "hable",
            Self::Mobius => "mobius",
        }
    }
}

/// What the organizer does when the destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Leave the source where it is and warn.
    #[default]
    Skip,
    /// Replace the existing destination file.
    Overwrite,
    /// Abort organizing.
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub extensions: Vec<String>,
    pub nominal_peak: f64,
    pub tonemap: ToneMapOperator,
    pub desaturation: f64,
    pub pixel_format: String,
    pub video_codec: String,
    pub audio_codec: String,
    /// Per-file limit in seconds, 0 disables it.
    pub timeout_seconds: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            extensions: VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            nominal_peak: DEFAULT_NOMINAL_PEAK,
            tonemap: ToneMapOperator::Hable,
            desaturation: 0.0,
            pixel_format: DEFAULT_PIXEL_FORMAT.to_string(),
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            timeout_seconds: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizeConfig {
    /// `None` asks on the terminal after conversion.
    pub auto: Option<bool>,
    pub delimiter: String,
    pub on_collision: CollisionPolicy,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            auto: None,
            delimiter: DEFAULT_PREFIX_DELIMITER.to_string(),
            on_collision: CollisionPolicy::Skip,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_timestamps: bool,
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_timestamps: false,
            colored_output: true,
        }
    }
}
