use crate::utils::ffmpeg::format_command;
use crate::utils::{CancelSignal, Error, Result};
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::debug;

const READ_CHUNK_SIZE: usize = 4096;

/// Runs an external tool to completion while relaying its stderr.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    tool_path: String,
    timeout: Option<Duration>,
}

impl ToolRunner {
    /// `timeout_seconds == 0` means no timeout.
    pub fn new(tool_path: String, timeout_seconds: u64) -> Self {
        Self {
            tool_path,
            timeout: (timeout_seconds > 0).then(|| Duration::from_secs(timeout_seconds)),
        }
    }

    pub fn tool_path(&self) -> &str {
        &self.tool_path
    }

    pub fn describe(&self, args: &[OsString]) -> String {
        format_command(&self.tool_path, args)
    }

    /// Spawns the tool and hands every stderr line to `on_line` as it arrives.
    /// Lines end at `\n` or `\r`, so carriage-return status updates are seen live.
    ///
    /// Returns once the tool has exited and stderr is drained. The child is
    /// killed on timeout or cancellation.
    pub async fn run_streaming<F>(
        &self,
        args: &[OsString],
        cancel: &CancelSignal,
        mut on_line: F,
    ) -> Result<()>
    where
        F: FnMut(&str),
    {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        debug!("Running: {}", self.describe(args));

        let mut child = Command::new(&self.tool_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::tool(format!("Failed to spawn {}: {}", self.tool_path, e)))?;

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::tool("stderr pipe missing"))?;

        let deadline = async {
            match self.timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(deadline);

        let mut splitter = LineSplitter::default();
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let mut stderr_open = true;

        let status = loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    kill_child(&mut child).await;
                    return Err(Error::Cancelled);
                }
                _ = &mut deadline => {
                    kill_child(&mut child).await;
                    let seconds = self.timeout.map(|t| t.as_secs()).unwrap_or_default();
                    return Err(Error::timeout(seconds));
                }
                read = stderr.read(&mut chunk), if stderr_open => match read {
                    Ok(0) => {
                        stderr_open = false;
                        if let Some(line) = splitter.finish() {
                            on_line(&line);
                        }
                    }
                    Ok(n) => {
                        for line in splitter.push(&chunk[..n]) {
                            on_line(&line);
                        }
                    }
                    Err(e) => {
                        debug!("Stopped reading tool stderr: {}", e);
                        stderr_open = false;
                    }
                },
                status = child.wait(), if !stderr_open => {
                    break status.map_err(|e| Error::tool(format!("Failed to wait for {}: {}", self.tool_path, e)))?;
                }
            }
        };

        if !status.success() {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            debug!("Tool failed with exit code: {}", code);
            return Err(Error::tool(format!(
                "{} exited with code {}",
                self.tool_path, code
            )));
        }

        Ok(())
    }
}

async fn kill_child(child: &mut Child) {
    if let Err(e) = child.kill().await {
        debug!("Failed to kill tool process: {}", e);
    }
}

/// Splits a byte stream into lines on `\n` and `\r`, dropping empty lines.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in bytes {
            if byte == b'\n' || byte == b'\r' {
                if let Some(line) = self.take_line() {
                    lines.push(line);
                }
            } else {
                self.pending.push(byte);
            }
        }
        lines
    }

    pub fn finish(&mut self) -> Option<String> {
        self.take_line()
    }

    fn take_line(&mut self) -> Option<String> {
        let line = String::from_utf8_lossy(&self.pending).trim().to_string();
        self.pending.clear();
        (!line.is_empty()).then_some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_splitter_handles_cr_and_partial_chunks() {
        let mut splitter = LineSplitter::default();

        assert_eq!(splitter.push(b"Input #0, mov"), Vec::<String>::new());
        assert_eq!(
            splitter.push(b", from 'a.mp4':\nframe=  1 time=00:00:00.04\rframe=  2"),
            vec![
                "Input #0, mov, from 'a.mp4':".to_string(),
                "frame=  1 time=00:00:00.04".to_string(),
            ]
        );
        assert_eq!(splitter.push(b"\r\n\r\n"), vec!["frame=  2".to_string()]);
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn test_line_splitter_flushes_tail() {
        let mut splitter = LineSplitter::default();
        assert!(splitter.push(b"no newline at end").is_empty());
        assert_eq!(splitter.finish(), Some("no newline at end".to_string()));
    }

    #[test]
    fn test_zero_timeout_is_unbounded() {
        let runner = ToolRunner::new("ffmpeg".to_string(), 0);
        assert!(runner.timeout.is_none());

        let runner = ToolRunner::new("ffmpeg".to_string(), 90);
        assert_eq!(runner.timeout, Some(Duration::from_secs(90)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_streaming_relays_lines() {
        let runner = ToolRunner::new("sh".to_string(), 0);
        let args: Vec<OsString> = vec![
            "-c".into(),
            "echo first >&2; printf 'second\\rthird\\n' >&2".into(),
        ];
        let mut lines = Vec::new();

        runner
            .run_streaming(&args, &CancelSignal::never(), |line| {
                lines.push(line.to_string())
            })
            .await
            .unwrap();

        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_streaming_reports_exit_code() {
        let runner = ToolRunner::new("sh".to_string(), 0);
        let args: Vec<OsString> = vec!["-c".into(), "exit 3".into()];

        let err = runner
            .run_streaming(&args, &CancelSignal::never(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Tool { .. }));
        assert!(err.to_string().contains("code 3"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_failure_is_not_logged_as_error() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

        impl io::Write for SharedBuffer {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let runner = ToolRunner::new("sh".to_string(), 0);
        let args: Vec<OsString> = vec!["-c".into(), "exit 1".into()];
        let err = runner
            .run_streaming(&args, &CancelSignal::never(), |_| {})
            .await
            .unwrap_err();

        assert!(err.to_string().contains("code 1"));
        assert!(buffer.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_streaming_missing_tool() {
        let runner = ToolRunner::new("/nonexistent/definitely-not-ffmpeg".to_string(), 0);
        let err = runner
            .run_streaming(&[], &CancelSignal::never(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Tool { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_streaming_times_out() {
        let runner = ToolRunner::new("sleep".to_string(), 1);
        let args: Vec<OsString> = vec!["30".into()];

        let err = runner
            .run_streaming(&args, &CancelSignal::never(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { seconds: 1 }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_streaming_cancelled() {
        let runner = ToolRunner::new("sleep".to_string(), 0);
        let args: Vec<OsString> = vec!["30".into()];
        let (handle, signal) = CancelSignal::pair();
        handle.cancel();

        let err = runner
            .run_streaming(&args, &signal, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}
