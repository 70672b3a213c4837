//! The build pipeline.
//!
//! Steps run strictly in order and the first failure stops the run:
//! - Locate the compiler script and library root
//! - Select the installer backend
//! - Activate the compiler environment
//! - Export the library search paths
//! - Install the auxiliary build tools
//! - Build the wheel from source
//! - Repair the wheel
//! - Remove the intermediate wheels

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::artifact;
use crate::config::BuildConfig;
use crate::env::export_library_paths;
use crate::error::{PipelineError, Step};
use crate::execute::{Invocation, ToolOutput, ToolRunner};
use crate::install::install_dependencies;
use crate::mode::BuildMode;
use crate::toolchain::{ToolchainConfig, activate};

/// Summary of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
  pub mode: BuildMode,
  /// The repaired wheel, inside the output directory.
  pub artifact: PathBuf,
  pub artifact_bytes: u64,
  /// Intermediate wheels deleted from the working directory.
  pub removed: Vec<PathBuf>,
  pub elapsed_ms: u64,
}

pub struct Pipeline<R> {
  config: BuildConfig,
  toolchain: ToolchainConfig,
  runner: R,
}

impl<R: ToolRunner> Pipeline<R> {
  pub fn new(config: BuildConfig, toolchain: ToolchainConfig, runner: R) -> Self {
    Self {
      config,
      toolchain,
      runner,
    }
  }

  pub fn runner(&self) -> &R {
    &self.runner
  }

  /// Runs every step. `select_mode` is called once, after the toolchain
  /// checks pass and before any external command starts.
  pub async fn run<F>(&self, select_mode: F) -> Result<PipelineReport, PipelineError>
  where
    F: FnOnce() -> Result<BuildMode, PipelineError>,
  {
    let start = Instant::now();

    let toolchain = self.toolchain.locate()?;

    let mode = select_mode()?;
    info!(%mode, "installer selected");

    let env = activate(&self.runner, &toolchain).await?;
    let env = export_library_paths(env, &toolchain)?;

    install_dependencies(&self.runner, &self.config, mode, &env).await?;

    let built = artifact::build(&self.runner, &self.config, &env).await?;
    let repaired = artifact::repair(&self.runner, &self.config, &toolchain, &env, &built).await?;

    let removed = artifact::cleanup(&self.config)?;

    let artifact_bytes = std::fs::metadata(&repaired)
      .map_err(PipelineError::io(Step::ArtifactRepair))?
      .len();

    info!(wheel = %repaired.display(), "build complete");

    Ok(PipelineReport {
      mode,
      artifact: repaired,
      artifact_bytes,
      removed,
      elapsed_ms: start.elapsed().as_millis() as u64,
    })
  }
}

/// Runs `invocation` and turns a spawn failure or non-zero exit into the
/// error for `step`.
pub(crate) async fn run_checked<R: ToolRunner>(
  runner: &R,
  step: Step,
  invocation: &Invocation,
) -> Result<ToolOutput, PipelineError> {
  let output = runner
    .run(invocation)
    .await
    .map_err(|source| PipelineError::Spawn { step, source })?;

  if !output.success() {
    return Err(PipelineError::StepFailed {
      step,
      code: output.code,
      detail: tail(&output.stderr),
    });
  }

  if !output.stdout.is_empty() {
    debug!(%step, stdout = %output.stdout.trim(), "command output");
  }

  Ok(output)
}

/// Last lines of a tool's stderr, for error reports.
fn tail(stderr: &str) -> String {
  let lines: Vec<&str> = stderr.lines().collect();
  let start = lines.len().saturating_sub(20);
  lines[start..].join("\n")
}
