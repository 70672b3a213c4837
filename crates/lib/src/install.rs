//! Auxiliary build tool installation.

use tracing::info;

use crate::config::BuildConfig;
use crate::env::BuildEnv;
use crate::error::{PipelineError, Step};
use crate::execute::{Invocation, ToolRunner};
use crate::mode::BuildMode;
use crate::pipeline::run_checked;

/// Installs the auxiliary packages with the selected backend.
///
/// Runs unconditionally: no version pins, no check for an existing install.
pub async fn install_dependencies<R: ToolRunner>(
  runner: &R,
  config: &BuildConfig,
  mode: BuildMode,
  env: &BuildEnv,
) -> Result<(), PipelineError> {
  info!(%mode, packages = ?config.aux_packages, "installing build tools");

  let (program, prefix) = mode.install_command(&config.python, &config.uv);
  let invocation = Invocation::new(program)
    .args(prefix)
    .args(config.aux_packages.iter().cloned())
    .envs(env.vars())
    .current_dir(&config.work_dir);

  run_checked(runner, Step::DependencyInstall, &invocation).await?;
  Ok(())
}
