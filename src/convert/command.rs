//! FFmpeg invocation for a single HDR to SDR conversion.

use crate::config::ConversionConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Intermediate pixel format for tone mapping; `tonemap` needs float RGB input.
pub const LINEAR_WORKING_FORMAT: &str = "gbrpf32le";
/// Target primaries, transfer and matrix.
pub const SDR_COLOR_STANDARD: &str = "bt709";

/// Comma-joined FFmpeg filter graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    filters: Vec<String>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(&mut self, filter: impl Into<String>) {
        self.filters.push(filter.into());
    }

    pub fn build_ffmpeg_args(&self) -> Vec<OsString> {
        if self.filters.is_empty() {
            Vec::new()
        } else {
            vec!["-vf".into(), self.to_string().into()]
        }
    }
}

impl std::fmt::Display for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.filters.join(","))
    }
}

/// Linearize, tone map, convert back to BT.709 and pack to the output pixel format.
pub fn tone_map_filter(settings: &ConversionConfig) -> FilterChain {
    let mut chain = FilterChain::new();
    chain.add_filter(format!("zscale=t=linear:npl={}", settings.nominal_peak));
    chain.add_filter(format!("format={}", LINEAR_WORKING_FORMAT));
    chain.add_filter(format!(
        "tonemap={}:desat={}",
        settings.tonemap.as_str(),
        settings.desaturation
    ));
    chain.add_filter(format!(
        "zscale=p={std}:t={std}:m={std}",
        std = SDR_COLOR_STANDARD
    ));
    chain.add_filter(format!("format={}", settings.pixel_format));
    chain
}

/// Full argument list for converting one file.
#[derive(Debug, Clone)]
pub struct ToneMapCommand {
    pub input: PathBuf,
    pub output: PathBuf,
    args: Vec<OsString>,
}

impl ToneMapCommand {
    pub fn new(settings: &ConversionConfig, input: &Path, output: &Path) -> Self {
        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.into()];
        args.extend(tone_map_filter(settings).build_ffmpeg_args());
        let codecs: [OsString; 5] = [
            "-c:v".into(),
            settings.video_codec.as_str().into(),
            "-c:a".into(),
            settings.audio_codec.as_str().into(),
            output.into(),
        ];
        args.extend(codecs);

        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            args,
        }
    }

    /// Output goes to `output_dir` under the input's file name.
    pub fn for_output_dir(settings: &ConversionConfig, input: &Path, output_dir: &Path) -> Self {
        let output = match input.file_name() {
            Some(name) => output_dir.join(name),
            None => output_dir.to_path_buf(),
        };
        Self::new(settings, input, &output)
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}
