//! Layout backends: where generation actually runs.
//!
//! [`InProcessBackend`] calls the engine directly. [`ExternalProcessBackend`]
//! sends `{"habitat": params}` to a separate engine process on stdin and
//! reads the same JSON response shape back from its stdout. Exactly one
//! request is in flight per call; there is no timeout or retry, and a
//! failed exchange fails only that call.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use habitat_logic::{generate_layout, LayoutResponse, LayoutResult, MissionParameters};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of a backend to produce a layout.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The engine executable could not be started (missing, not executable).
    #[error("failed to start layout engine {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O with the running engine failed.
    #[error("layout engine I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The request could not be encoded.
    #[error("failed to encode layout request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The engine exited unsuccessfully.
    #[error("layout engine exited with {}: {message}", describe_code(.code))]
    NonZeroExit { code: Option<i32>, message: String },

    /// The engine's stdout was not a layout response.
    #[error("layout engine returned malformed output: {0}")]
    MalformedOutput(#[source] serde_json::Error),

    /// The engine answered with an error response.
    #[error("layout engine reported an error: {message}")]
    Reported { message: String },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// A strategy for turning parameters into a layout.
pub trait LayoutBackend {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn generate(&self, params: &MissionParameters) -> Result<LayoutResult, BackendError>;

    /// Generate, folding any failure into an error response.
    fn respond(&self, params: &MissionParameters) -> LayoutResponse {
        match self.generate(params) {
            Ok(layout) => LayoutResponse::Success(layout),
            Err(err) => {
                warn!(backend = self.name(), error = %err, "layout generation failed");
                LayoutResponse::error(err.to_string())
            }
        }
    }
}

/// Runs the engine in this process. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessBackend;

impl LayoutBackend for InProcessBackend {
    fn name(&self) -> &str {
        "in-process"
    }

    fn generate(&self, params: &MissionParameters) -> Result<LayoutResult, BackendError> {
        Ok(generate_layout(params))
    }
}

/// Runs the engine as a child process speaking JSON over stdin/stdout.
#[derive(Debug, Clone)]
pub struct ExternalProcessBackend {
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalProcessBackend {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl LayoutBackend for ExternalProcessBackend {
    fn name(&self) -> &str {
        "external"
    }

    fn generate(&self, params: &MissionParameters) -> Result<LayoutResult, BackendError> {
        let request = serde_json::to_vec(&params.to_request()).map_err(BackendError::Encode)?;
        debug!(program = %self.program.display(), bytes = request.len(), "sending layout request");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BackendError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // Engines may exit without reading stdin; the exit status is checked below.
            match stdin.write_all(&request) {
                Err(err) if err.kind() == ErrorKind::BrokenPipe => {
                    debug!("layout engine closed stdin early")
                }
                other => other?,
            }
        }

        let output = child.wait_with_output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let message = match serde_json::from_str::<LayoutResponse>(&stdout) {
                Ok(LayoutResponse::Error { message }) => message,
                _ => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    let stderr = stderr.trim();
                    if stderr.is_empty() {
                        "no error output".to_string()
                    } else {
                        stderr.to_string()
                    }
                }
            };
            return Err(BackendError::NonZeroExit {
                code: output.status.code(),
                message,
            });
        }

        match serde_json::from_str::<LayoutResponse>(&stdout)
            .map_err(BackendError::MalformedOutput)?
        {
            LayoutResponse::Success(layout) => {
                debug!(modules = layout.modules.len(), "layout engine responded");
                Ok(layout)
            }
            LayoutResponse::Error { message } => Err(BackendError::Reported { message }),
        }
    }
}
