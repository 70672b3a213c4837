//! Test utilities for simdwheel-lib.
//!
//! Cross-platform shell helpers plus [`FakeRunner`], a scripted stand-in for
//! the external tools.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::execute::{ExecuteError, Invocation, ToolOutput, ToolRunner};

/// Returns the shell command and args to echo an environment variable.
#[cfg(unix)]
pub fn shell_echo_env(var: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), format!("echo \"${}\"", var)])
}

#[cfg(windows)]
pub fn shell_echo_env(var: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), format!("echo %{}%", var)])
}

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// Canned reply for one program.
#[derive(Debug, Clone, Default)]
pub struct Reply {
  pub code: i32,
  pub stdout: String,
  /// Files written (empty) when the program "runs".
  pub creates: Vec<PathBuf>,
}

impl Reply {
  pub fn ok() -> Self {
    Self::default()
  }

  pub fn fail(code: i32) -> Self {
    Self {
      code,
      ..Self::default()
    }
  }

  pub fn stdout(mut self, stdout: &str) -> Self {
    self.stdout = stdout.to_string();
    self
  }

  pub fn creates(mut self, path: impl Into<PathBuf>) -> Self {
    self.creates.push(path.into());
    self
  }
}

/// Records every invocation and answers from a per-program script.
///
/// Programs without a scripted reply succeed with empty output.
#[derive(Debug, Default)]
pub struct FakeRunner {
  replies: HashMap<String, Reply>,
  calls: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn reply(mut self, program: &str, reply: Reply) -> Self {
    self.replies.insert(program.to_string(), reply);
    self
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.lock().unwrap().clone()
  }

  pub fn programs(&self) -> Vec<String> {
    self.calls().into_iter().map(|call| call.program).collect()
  }
}

impl ToolRunner for FakeRunner {
  async fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ExecuteError> {
    self.calls.lock().unwrap().push(invocation.clone());

    let reply = self.replies.get(&invocation.program).cloned().unwrap_or_default();
    for path in &reply.creates {
      if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
      }
      std::fs::write(path, b"")?;
    }

    Ok(ToolOutput {
      code: Some(reply.code),
      stdout: reply.stdout,
      stderr: String::new(),
    })
  }
}

/// Program the toolchain activation step launches on this host.
pub fn activation_program() -> &'static str {
  if cfg!(windows) { "cmd.exe" } else { "/bin/sh" }
}
