use once_cell::sync::Lazy;
use regex::Regex;
use std::ffi::OsString;

static PROGRESS_TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"time=\s*(\d{2}):(\d{2}):(\d{2})\.(\d{2})").unwrap());

static FRAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"frame=\s*(\d+)").unwrap());

static SPEED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"speed=\s*([0-9.]+)x").unwrap());

static FPS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"fps=\s*([0-9.]+)").unwrap());

/// One FFmpeg status update, as printed on stderr while encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct FfmpegProgress {
    pub frame: Option<u64>,
    pub fps: Option<f32>,
    pub time: f64,
    pub speed: Option<f32>,
}

impl FfmpegProgress {
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(frame) = self.frame {
            parts.push(format!("frame {}", frame));
        }
        parts.push(format_timestamp(self.time));
        if let Some(fps) = self.fps {
            parts.push(format!("{:.1} fps", fps));
        }
        if let Some(speed) = self.speed {
            parts.push(format!("{:.2}x", speed));
        }
        parts.join(" | ")
    }
}

/// Parses an FFmpeg status line. Returns `None` for anything that is not a progress update.
pub fn parse_progress_line(line: &str) -> Option<FfmpegProgress> {
    if !line.contains("frame=") {
        return None;
    }

    let captures = PROGRESS_TIME_REGEX.captures(line)?;
    let hours: u32 = captures[1].parse().ok()?;
    let minutes: u32 = captures[2].parse().ok()?;
    let seconds: u32 = captures[3].parse().ok()?;
    let centiseconds: u32 = captures[4].parse().ok()?;
    let time = hours as f64 * 3600.0
        + minutes as f64 * 60.0
        + seconds as f64
        + centiseconds as f64 / 100.0;

    Some(FfmpegProgress {
        frame: FRAME_REGEX
            .captures(line)
            .and_then(|c| c[1].parse().ok()),
        fps: FPS_REGEX.captures(line).and_then(|c| c[1].parse().ok()),
        time,
        speed: SPEED_REGEX
            .captures(line)
            .and_then(|c| c[1].parse().ok()),
    })
}

fn format_timestamp(seconds: f64) -> String {
    let total = seconds as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Renders a command line for logs, quoting arguments that contain spaces.
pub fn format_command(program: &str, args: &[OsString]) -> String {
    let mut rendered = vec![program.to_string()];
    rendered.extend(args.iter().map(|arg| {
        let arg = arg.to_string_lossy();
        if arg.contains(char::is_whitespace) {
            format!("\"{}\"", arg)
        } else {
            arg.into_owned()
        }
    }));
    rendered.join(" ")
}
