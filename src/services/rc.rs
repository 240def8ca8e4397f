//! Invocation of the rc command-line client
//!
//! rc is run directly with an argument vector (no shell in between). Calls are
//! blocking from the caller's point of view; internally a current-thread tokio
//! runtime drives the child so stdin can be fed while stdout/stderr are drained,
//! and so a hung daemon can be timed out.

use crate::error::{Result, RtagsError};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Raw result of one rc invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Something that can run rc. The plugin only talks to rc through this trait so
/// tests can substitute canned output.
pub trait RcRunner {
    /// Name of the command, used in error messages
    fn command_name(&self) -> &str;

    /// Run rc with `args`, writing `input` to its stdin when given.
    ///
    /// A non-zero exit status is not an error at this level.
    fn run(&self, args: &[String], input: Option<&str>) -> Result<CommandOutput>;

    /// Run rc and fail with [`RtagsError::ToolInvocation`] on a non-zero exit status.
    fn run_checked(&self, args: &[String], input: Option<&str>) -> Result<String> {
        let output = self.run(args, input)?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(RtagsError::ToolInvocation {
                command: self.command_name().to_string(),
                status: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            })
        }
    }
}

/// Runs the real rc binary
pub struct RcClient {
    command: String,
    timeout: Option<Duration>,
    runtime: tokio::runtime::Runtime,
}

impl RcClient {
    /// Create a client for `command` (usually just `rc`, resolved through PATH).
    ///
    /// `timeout` of `None` waits forever.
    pub fn new(command: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let command = command.into();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| RtagsError::Spawn {
                command: command.clone(),
                source,
            })?;
        Ok(Self {
            command,
            timeout,
            runtime,
        })
    }

    async fn run_async(&self, args: &[String], input: Option<&str>) -> Result<CommandOutput> {
        let mut cmd = Command::new(&self.command);
        cmd.args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the child on timeout must not leave rc running
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| RtagsError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        let stdin = child.stdin.take();
        let feed_input = async move {
            if let (Some(mut stdin), Some(input)) = (stdin, input) {
                // rc may exit without reading everything (e.g. unknown file); a
                // broken pipe here is reported through its exit status instead.
                if let Err(e) = stdin.write_all(input.as_bytes()).await {
                    tracing::debug!("Failed to write rc stdin: {}", e);
                }
                let _ = stdin.shutdown().await;
            }
        };

        let ((), output) = tokio::join!(feed_input, child.wait_with_output());
        let output = output.map_err(|source| RtagsError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        Ok(CommandOutput {
            // Killed by a signal: no exit code, report it as a failure
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl RcRunner for RcClient {
    fn command_name(&self) -> &str {
        &self.command
    }

    fn run(&self, args: &[String], input: Option<&str>) -> Result<CommandOutput> {
        tracing::debug!(
            "Running {} {} (stdin: {} bytes)",
            self.command,
            args.join(" "),
            input.map_or(0, str::len)
        );

        let output = self.runtime.block_on(async {
            match self.timeout {
                Some(timeout) => tokio::time::timeout(timeout, self.run_async(args, input))
                    .await
                    .map_err(|_| RtagsError::TimedOut {
                        command: self.command.clone(),
                        timeout,
                    })?,
                None => self.run_async(args, input).await,
            }
        })?;

        tracing::debug!(
            "{} exited with status {} ({} bytes stdout, {} bytes stderr)",
            self.command,
            output.status,
            output.stdout.len(),
            output.stderr.len()
        );
        Ok(output)
    }
}
