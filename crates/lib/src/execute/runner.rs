//! Process-backed tool runner.

use std::future::Future;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::execute::types::{ExecuteError, Invocation, ToolOutput};

/// Runs one external command to completion.
///
/// Implementations must not return before the process has exited; the
/// pipeline relies on each invocation being finished before the next begins.
/// A non-zero exit is reported through [`ToolOutput::code`], not as an error.
pub trait ToolRunner {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<ToolOutput, ExecuteError>> + Send;
}

/// Spawns real processes with `tokio::process`.
///
/// The child inherits the current environment with the invocation's variables
/// layered on top, and has stdin closed so a tool that prompts fails instead
/// of hanging.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
  async fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ExecuteError> {
    info!(cmd = %invocation.display(), "executing command");

    let mut command = Command::new(&invocation.program);
    command
      .args(&invocation.args)
      .envs(&invocation.env)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true);

    if let Some(cwd) = &invocation.cwd {
      command.current_dir(cwd);
    }

    debug!(program = %invocation.program, cwd = ?invocation.cwd, "spawning process");

    let output = command.output().await.map_err(|source| ExecuteError::Spawn {
      program: invocation.program.clone(),
      source,
    })?;

    let result = ToolOutput {
      code: output.status.code(),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if !result.stderr.is_empty() {
      debug!(stderr = %result.stderr, "command stderr");
    }
    debug!(code = ?result.code, "command finished");

    Ok(result)
  }
}
