//! Compiler environment activation.
//!
//! The vendor script only mutates the environment of the shell that runs it,
//! so we run it in a child shell, dump that shell's environment afterwards and
//! parse the dump into a [`BuildEnv`].

use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::env::BuildEnv;
use crate::error::{PipelineError, Step};
use crate::execute::{Invocation, ToolRunner};
use crate::pipeline::run_checked;
use crate::toolchain::Toolchain;

/// Runs the compiler environment script and returns the environment it set up.
///
/// The script's own output is discarded. A non-zero status is fatal.
pub async fn activate<R: ToolRunner>(runner: &R, toolchain: &Toolchain) -> Result<BuildEnv, PipelineError> {
  info!(script = %toolchain.compiler_env_script().display(), "activating compiler environment");

  let scratch = tempfile::tempdir().map_err(PipelineError::io(Step::ToolchainActivation))?;
  let invocation = activation_command(toolchain.compiler_env_script(), scratch.path())
    .map_err(PipelineError::io(Step::ToolchainActivation))?;

  let output = run_checked(runner, Step::ToolchainActivation, &invocation).await?;

  let env = BuildEnv::from_captured(&output.stdout);
  debug!(vars = env.len(), "captured activated environment");

  Ok(env)
}

/// Batch wrapper: `call` the script quietly, bail on errorlevel, print `set`.
#[cfg(windows)]
fn activation_command(script: &Path, scratch: &Path) -> io::Result<Invocation> {
  let wrapper = scratch.join("activate.bat");
  std::fs::write(
    &wrapper,
    format!(
      "@echo off\r\ncall \"{}\" >nul 2>&1\r\nif errorlevel 1 exit /b %errorlevel%\r\nset\r\n",
      script.display().to_string().replace('%', "%%")
    ),
  )?;
  Ok(
    Invocation::new("cmd.exe")
      .args(["/d", "/c"])
      .arg(wrapper.to_string_lossy()),
  )
}

/// POSIX hosts: source the script in `sh` and print `env -0`. The path goes
/// in as `$1` so the shell never parses it.
#[cfg(not(windows))]
fn activation_command(script: &Path, _scratch: &Path) -> io::Result<Invocation> {
  Ok(
    Invocation::new("/bin/sh")
      .args(["-c", ". \"$1\" >/dev/null 2>&1 && env -0", "sh"])
      .arg(script.to_string_lossy()),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::execute::SystemRunner;
  use crate::toolchain::ToolchainConfig;
  use crate::util::testutil::{FakeRunner, Reply, activation_program};
  use tempfile::TempDir;

  fn toolchain(temp: &TempDir, script_body: &str) -> Toolchain {
    let script = temp.path().join("vcvars64.bat");
    std::fs::write(&script, script_body).unwrap();
    let root = temp.path().join("libs");
    std::fs::create_dir_all(&root).unwrap();
    ToolchainConfig::new(script, root).locate().unwrap()
  }

  #[tokio::test]
  async fn parses_captured_environment() {
    let temp = TempDir::new().unwrap();
    let toolchain = toolchain(&temp, "");
    let runner = FakeRunner::new().reply(
      activation_program(),
      Reply::ok().stdout("INCLUDE=/vc/include\nLIB=/vc/lib\n"),
    );

    let env = activate(&runner, &toolchain).await.unwrap();

    assert_eq!(env.get("INCLUDE"), Some("/vc/include"));
    assert_eq!(env.get("LIB"), Some("/vc/lib"));
    assert_eq!(runner.calls().len(), 1);
  }

  #[tokio::test]
  async fn failing_script_is_fatal() {
    let temp = TempDir::new().unwrap();
    let toolchain = toolchain(&temp, "");
    let runner = FakeRunner::new().reply(activation_program(), Reply::fail(1));

    let err = activate(&runner, &toolchain).await.unwrap_err();

    assert!(matches!(
      err,
      PipelineError::StepFailed {
        step: Step::ToolchainActivation,
        code: Some(1),
        ..
      }
    ));
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn sources_real_script() {
    let temp = TempDir::new().unwrap();
    let toolchain = toolchain(&temp, "echo noisy banner\nexport INCLUDE=/opt/vc/include\n");

    let env = activate(&SystemRunner, &toolchain).await.unwrap();

    assert_eq!(env.get("INCLUDE"), Some("/opt/vc/include"));
    assert!(!env.vars().values().any(|value| value.contains("noisy banner")));
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn script_path_with_shell_metacharacters() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("vs$HOME `true` \"x\"");
    std::fs::create_dir(&dir).unwrap();
    let script = dir.join("vcvars64.bat");
    std::fs::write(&script, "export INCLUDE=/opt/vc/include\n").unwrap();
    let root = temp.path().join("libs");
    std::fs::create_dir(&root).unwrap();
    let toolchain = ToolchainConfig::new(&script, &root).locate().unwrap();

    let env = activate(&SystemRunner, &toolchain).await.unwrap();

    assert_eq!(env.get("INCLUDE"), Some("/opt/vc/include"));
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn keeps_multiline_values_intact() {
    let temp = TempDir::new().unwrap();
    let toolchain = toolchain(&temp, "export MULTI='first\nSTRAY=second'\nexport AFTER=ok\n");

    let env = activate(&SystemRunner, &toolchain).await.unwrap();

    assert_eq!(env.get("MULTI"), Some("first\nSTRAY=second"));
    assert_eq!(env.get("STRAY"), None);
    assert_eq!(env.get("AFTER"), Some("ok"));
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn real_script_failure_stops() {
    let temp = TempDir::new().unwrap();
    let toolchain = toolchain(&temp, "return 1\n");

    let err = activate(&SystemRunner, &toolchain).await.unwrap_err();

    assert_eq!(err.step(), Step::ToolchainActivation);
  }
}
