pub mod cancel;
pub mod error;
pub mod ffmpeg;
pub mod filesystem;
pub mod logging;
pub mod progress;
pub mod tool_runner;

pub use cancel::{CancelHandle, CancelSignal, InterruptScope};
pub use error::{Error, Result};
pub use ffmpeg::{parse_progress_line, FfmpegProgress};
pub use filesystem::{find_video_files, JobPaths};
pub use logging::{setup_logging, TOOL_OUTPUT_TARGET};
pub use progress::BatchProgress;
pub use tool_runner::ToolRunner;
