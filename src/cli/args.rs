use crate::config::{CollisionPolicy, ConfigOverrides};
use crate::utils::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(name = "hdr2sdr")]
#[command(about = "Batch HDR to SDR video conversion with FFmpeg tone mapping")]
#[command(long_about = "
Converts every HDR video in a folder to SDR by running FFmpeg with a hable
tone-mapping filter graph (zscale linearization, BT.709 output, x264 video,
audio copied). Afterwards the converted files can be grouped into folders by
the text before the first '-' in their names.

EXAMPLES:
  # Convert ./videos into ./output_videos and ask about organizing
  hdr2sdr

  # Explicit folders, organize without asking
  hdr2sdr -i ~/Movies/HDR -o ~/Movies/SDR --organize

  # Show the FFmpeg commands without running them
  hdr2sdr -i ~/Movies/HDR --dry-run

  # Only regroup an existing output folder
  hdr2sdr -o ~/Movies/SDR --organize-only
")]
pub struct CliArgs {
    /// Folder containing the HDR videos
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Folder receiving the SDR videos (created if missing)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file path (defaults to ./hdr2sdr.yaml, then the user config dir)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Organize output files into folders without asking
    #[arg(long, conflicts_with = "no_organize")]
    pub organize: bool,

    /// Never organize output files and do not ask
    #[arg(long)]
    pub no_organize: bool,

    /// Skip conversion and only organize the output folder
    #[arg(long, conflicts_with_all = ["no_organize", "dry_run"])]
    pub organize_only: bool,

    /// What to do when an organized file already exists
    #[arg(long, value_name = "POLICY", value_enum)]
    pub on_collision: Option<CollisionPolicy>,

    /// Per-file FFmpeg timeout in seconds (0 = unlimited)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// FFmpeg executable
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<String>,

    /// Print the FFmpeg commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose logging, including the full FFmpeg command lines
    #[arg(short, long)]
    pub verbose: bool,

    /// Trace logging
    #[arg(long)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    pub fn get_log_level(&self) -> Option<String> {
        if self.debug {
            Some("trace".to_string())
        } else if self.verbose {
            Some("debug".to_string())
        } else {
            None
        }
    }

    pub fn should_use_color(&self) -> bool {
        !self.no_color
    }

    /// `Some(true)` for --organize, `Some(false)` for --no-organize, otherwise ask.
    pub fn auto_organize(&self) -> Option<bool> {
        if self.organize || self.organize_only {
            Some(true)
        } else if self.no_organize {
            Some(false)
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ffmpeg) = &self.ffmpeg {
            if ffmpeg.trim().is_empty() {
                return Err(crate::utils::Error::validation(
                    "FFmpeg path must not be empty",
                ));
            }
        }

        Ok(())
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            ffmpeg: self.ffmpeg.clone(),
            timeout_seconds: self.timeout,
            auto_organize: self.auto_organize(),
            on_collision: self.on_collision,
            log_level: self.get_log_level(),
            colored_output: (!self.should_use_color()).then_some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["hdr2sdr"]).unwrap();
        assert_eq!(args.auto_organize(), None);
        assert_eq!(args.get_log_level(), None);
        assert_eq!(args.overrides(), ConfigOverrides::default());
    }

    #[test]
    fn test_overrides_from_flags() {
        let args = CliArgs::try_parse_from([
            "hdr2sdr",
            "-i",
            "/hdr",
            "-o",
            "/sdr",
            "--organize",
            "--on-collision",
            "overwrite",
            "--timeout",
            "600",
            "--debug",
            "--no-color",
        ])
        .unwrap();
        args.validate().unwrap();

        let overrides = args.overrides();
        assert_eq!(overrides.input, Some(PathBuf::from("/hdr")));
        assert_eq!(overrides.output, Some(PathBuf::from("/sdr")));
        assert_eq!(overrides.auto_organize, Some(true));
        assert_eq!(overrides.on_collision, Some(CollisionPolicy::Overwrite));
        assert_eq!(overrides.timeout_seconds, Some(600));
        assert_eq!(overrides.log_level.as_deref(), Some("trace"));
        assert_eq!(overrides.colored_output, Some(false));
    }

    #[test]
    fn test_organize_flags_conflict() {
        assert!(CliArgs::try_parse_from(["hdr2sdr", "--organize", "--no-organize"]).is_err());
        assert!(CliArgs::try_parse_from(["hdr2sdr", "--organize-only", "--dry-run"]).is_err());
    }

    #[test]
    fn test_no_organize() {
        let args = CliArgs::try_parse_from(["hdr2sdr", "--no-organize"]).unwrap();
        assert_eq!(args.auto_organize(), Some(false));
    }

    #[test]
    fn test_collision_policy_values() {
        assert!(CliArgs::try_parse_from(["hdr2sdr", "--on-collision", "rename"]).is_err());

        let args = CliArgs::try_parse_from(["hdr2sdr", "--on-collision", "error"]).unwrap();
        assert_eq!(args.on_collision, Some(CollisionPolicy::Error));
        assert_eq!(args.overrides().on_collision, Some(CollisionPolicy::Error));
    }
}
