//! Message filtering to remove noisy FFmpeg output

use crate::utils::logging::TOOL_OUTPUT_TARGET;

/// FFmpeg banner and encoder chatter that adds nothing to a batch log.
const NOISE_PATTERNS: &[&str] = &[
    "ffmpeg version",
    "built with",
    "configuration: --",
    "libavutil",
    "libavcodec",
    "libavformat",
    "libavdevice",
    "libavfilter",
    "libswscale",
    "libswresample",
    "libpostproc",
    "Press [q] to stop",
    "using cpu capabilities",
    "264 - core",
    "Invalid Block Addition value",
    "Consider increasing the value for the 'analyzeduration'",
];

/// Returns true if the message should be displayed, false if it is noise
pub fn should_show_message(message: &str) -> bool {
    !NOISE_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
}

/// Relayed tool output is filtered; everything the program logs itself is shown.
pub fn should_show_event(target: &str, message: &str) -> bool {
    target != TOOL_OUTPUT_TARGET || should_show_message(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_show_normal_message() {
        assert!(should_show_message("Processing file 1/2: a.mp4"));
        assert!(should_show_message("Stream #0:0: Video: hevc (Main 10)"));
    }

    #[test]
    fn test_should_filter_ffmpeg_banner() {
        assert!(!should_show_message("ffmpeg version 6.1 Copyright (c) 2000-2023"));
        assert!(!should_show_message("  libavcodec     60. 31.102 / 60. 31.102"));
        assert!(!should_show_message("Press [q] to stop, [?] for help"));
    }

    #[test]
    fn test_own_messages_are_never_filtered() {
        let message = "Error converting House built with Lego.mp4: Tool error: ffmpeg exited with code 1";
        assert!(should_show_event("hdr2sdr::convert", message));
        assert!(should_show_event("hdr2sdr", "Converted 1/1: House built with Lego.mp4"));
        assert!(!should_show_event(TOOL_OUTPUT_TARGET, "  built with gcc 13.2.0"));
        assert!(should_show_event(TOOL_OUTPUT_TARGET, "Stream #0:0: Video: hevc"));
    }

    #[test]
    fn test_should_filter_x264_chatter() {
        assert!(!should_show_message(
            "[libx264 @ 0x55d1] using cpu capabilities: MMX2 SSE2Fast"
        ));
    }
}
