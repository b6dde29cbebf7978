//! Batch HDR to SDR conversion.
//!
//! Every recognized video directly inside the input directory is handed to
//! FFmpeg, one file at a time. A file that fails is logged and skipped; only
//! setup problems and cancellation end the batch early.

pub mod command;

pub use command::{tone_map_filter, FilterChain, ToneMapCommand};

use crate::config::{Config, ConversionConfig};
use crate::utils::filesystem::{display_name, ensure_dir};
use crate::utils::{
    find_video_files, parse_progress_line, BatchProgress, CancelSignal, Error, JobPaths, Result,
    ToolRunner, TOOL_OUTPUT_TARGET,
};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Result of converting a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Converted,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// What happened to a batch. Per-file failures never turn into an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
    /// Commands listed but not run.
    pub planned: usize,
    /// Final position of the progress counter.
    pub progress_position: u64,
}

impl BatchSummary {
    fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    fn record(&mut self, path: PathBuf, outcome: ConversionOutcome) {
        match outcome {
            ConversionOutcome::Converted => self.converted.push(path),
            ConversionOutcome::Failed { reason } => self.failed.push(FailedFile { path, reason }),
        }
    }
}

pub struct BatchConverter<'a> {
    settings: &'a ConversionConfig,
    runner: ToolRunner,
    cancel: CancelSignal,
    dry_run: bool,
    show_progress: bool,
}

impl<'a> BatchConverter<'a> {
    pub fn new(config: &'a Config, cancel: CancelSignal) -> Self {
        Self {
            settings: &config.conversion,
            runner: ToolRunner::new(
                config.tools.ffmpeg.clone(),
                config.conversion.timeout_seconds,
            ),
            cancel,
            dry_run: false,
            show_progress: true,
        }
    }

    /// Log the FFmpeg command lines instead of running them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Converts every video in `paths.input` into `paths.output`.
    ///
    /// Fails before touching the output directory if the input directory is
    /// missing. Returns `Error::Cancelled` if interrupted; the running FFmpeg
    /// process is killed first.
    pub async fn convert(&self, paths: &JobPaths) -> Result<BatchSummary> {
        if !paths.input.is_dir() {
            return Err(Error::directory_not_found(&paths.input));
        }
        if paths.input == paths.output {
            return Err(Error::validation(format!(
                "Input and output directories must differ: {}",
                paths.input.display()
            )));
        }

        let candidates = find_video_files(&paths.input, &self.settings.extensions)?;
        if !self.dry_run {
            ensure_dir(&paths.output)?;
        }

        let total = candidates.len();
        info!("Conversion process started");
        info!(
            "Found {} video file(s) to convert in {}",
            total,
            paths.input.display()
        );

        let progress = BatchProgress::new(total as u64, self.show_progress && !self.dry_run);
        let mut summary = BatchSummary::new(total);

        for (index, input) in candidates.into_iter().enumerate() {
            let name = display_name(&input);
            let command = ToneMapCommand::for_output_dir(self.settings, &input, &paths.output);

            if self.dry_run {
                info!("Would run: {}", self.runner.describe(command.args()));
                summary.planned += 1;
                continue;
            }

            progress.suspend(|| info!("Processing file {}/{}: {}", index + 1, total, name));
            progress.set_message(name.clone());

            let outcome = match self.convert_file(&command, &progress).await {
                Ok(()) => {
                    progress.advance();
                    progress.suspend(|| info!("Converted {}/{}: {}", index + 1, total, name));
                    ConversionOutcome::Converted
                }
                Err(e) if e.is_per_file() => {
                    progress.suspend(|| {
                        error!("Error converting {}: {}", name, e);
                        error!("  Command: {}", self.runner.describe(command.args()));
                    });
                    ConversionOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
                Err(e) => {
                    progress.abandon();
                    warn!("Conversion stopped while processing {}: {}", name, e);
                    return Err(e);
                }
            };
            summary.record(input, outcome);
        }

        progress.finish();
        summary.progress_position = progress.position();
        self.log_summary(&summary);

        Ok(summary)
    }

    async fn convert_file(&self, command: &ToneMapCommand, progress: &BatchProgress) -> Result<()> {
        let name = display_name(&command.input);

        self.runner
            .run_streaming(command.args(), &self.cancel, |line| {
                match parse_progress_line(line) {
                    Some(update) => progress.set_message(format!("{} | {}", name, update.summary())),
                    None => progress.suspend(|| info!(target: TOOL_OUTPUT_TARGET, "{}", line)),
                }
            })
            .await?;

        if !command.output.is_file() {
            return Err(Error::tool(format!(
                "{} reported success but {} was not written",
                self.runner.tool_path(),
                command.output.display()
            )));
        }

        Ok(())
    }

    fn log_summary(&self, summary: &BatchSummary) {
        if self.dry_run {
            info!(
                "Conversion process completed (dry run): {} command(s) planned",
                summary.planned
            );
            return;
        }

        info!(
            "Conversion process completed: {} converted, {} failed",
            summary.converted.len(),
            summary.failed.len()
        );
        for failed in &summary.failed {
            warn!("  - {}: {}", display_name(&failed.path), failed.reason);
        }
    }
}
