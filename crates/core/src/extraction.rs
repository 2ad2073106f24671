//! Adapter for the external PDF table-extraction tool.
//!
//! The tool is opaque: it receives the path of an uploaded PDF as its last
//! argument and either prints a JSON document on stdout and exits 0, or
//! fails. Nothing about its output shape is interpreted here.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::error::CoreError;

/// Maximum stdout or stderr size captured per stream (32 MiB).
const MAX_OUTPUT_BYTES: usize = 32 * 1024 * 1024;

/// Errors raised while running the extraction tool.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Extraction command is empty")]
    EmptyCommand,

    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Extraction exited with code {exit_code}: {stderr}")]
    Failed { exit_code: i32, stderr: String },

    #[error("Extraction output exceeded {limit} bytes")]
    OutputTooLarge { limit: usize },

    #[error("Extraction produced invalid JSON: {0}")]
    InvalidOutput(#[from] serde_json::Error),

    #[error("I/O error while waiting for extraction: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExtractionError> for CoreError {
    fn from(err: ExtractionError) -> Self {
        CoreError::ExternalTool(format!("Conversion failed: {err}"))
    }
}

/// Runs the extraction tool as a child process.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    max_output_bytes: usize,
}

impl CommandExtractor {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
            max_output_bytes: MAX_OUTPUT_BYTES,
        }
    }

    /// Override the stdout cap. Larger output fails with
    /// [`ExtractionError::OutputTooLarge`].
    pub fn with_max_output_bytes(mut self, limit: usize) -> Self {
        self.max_output_bytes = limit;
        self
    }

    /// Build from a whitespace-separated command line such as
    /// `python3 -m pdf_table2json`.
    pub fn from_command_line(command_line: &str, timeout: Duration) -> Result<Self, ExtractionError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ExtractionError::EmptyCommand)?;
        Ok(Self::new(program, parts.collect(), timeout))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Extract the tables of the PDF at `pdf_path` as JSON.
    pub async fn extract(&self, pdf_path: &Path) -> Result<Value, ExtractionError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(pdf_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|source| ExtractionError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        // Drain both pipes concurrently so a chatty child cannot block on a
        // full pipe while we wait for it.
        let limit = self.max_output_bytes;
        let stdout_task = tokio::spawn(read_stream(child.stdout.take(), limit));
        let stderr_task = tokio::spawn(read_stream(child.stderr.take(), limit));

        match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) => {
                let stdout = join_stream(stdout_task).await?;
                let stderr = join_stream(stderr_task).await?;
                if !status.success() {
                    return Err(ExtractionError::Failed {
                        exit_code: status.code().unwrap_or(-1),
                        stderr: String::from_utf8_lossy(&stderr.bytes).trim().to_string(),
                    });
                }
                if stdout.truncated {
                    return Err(ExtractionError::OutputTooLarge { limit });
                }
                Ok(serde_json::from_slice(&stdout.bytes)?)
            }
            Ok(Err(e)) => Err(ExtractionError::Io(e)),
            // `child` is dropped on return and killed via `kill_on_drop`.
            Err(_elapsed) => Err(ExtractionError::Timeout {
                elapsed_ms: start.elapsed().as_millis() as u64,
            }),
        }
    }
}

/// Captured pipe contents, cut at the output cap.
struct Captured {
    bytes: Vec<u8>,
    truncated: bool,
}

/// Read up to `limit` bytes, then keep draining so the child never blocks
/// on a full pipe.
async fn read_stream<R: AsyncRead + Unpin>(
    handle: Option<R>,
    limit: usize,
) -> std::io::Result<Captured> {
    let mut bytes = Vec::new();
    let Some(mut h) = handle else {
        return Ok(Captured {
            bytes,
            truncated: false,
        });
    };

    (&mut h).take(limit as u64 + 1).read_to_end(&mut bytes).await?;
    let truncated = bytes.len() > limit;
    if truncated {
        bytes.truncate(limit);
        tokio::io::copy(&mut h, &mut tokio::io::sink()).await?;
    }
    Ok(Captured { bytes, truncated })
}

async fn join_stream(
    task: tokio::task::JoinHandle<std::io::Result<Captured>>,
) -> Result<Captured, ExtractionError> {
    let captured = task.await.map_err(std::io::Error::other)??;
    Ok(captured)
}
