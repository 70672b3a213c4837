//! Wheel build, repair and cleanup.
//!
//! The artifact set is whatever matches [`ARTIFACT_GLOBS`] in a directory.
//! After a successful run exactly one repaired wheel sits in the output
//! directory and none remain in the working directory.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::BuildConfig;
use crate::consts::ARTIFACT_GLOBS;
use crate::env::BuildEnv;
use crate::error::{PipelineError, Step};
use crate::execute::{Invocation, ToolRunner};
use crate::pipeline::run_checked;
use crate::toolchain::Toolchain;

/// Wheels in `dir` matching either spelling, sorted and deduplicated.
pub fn find_artifacts(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
  let escaped = glob::Pattern::escape(&dir.to_string_lossy());

  let mut found = Vec::new();
  for pattern in ARTIFACT_GLOBS {
    let full = Path::new(&escaped).join(pattern);
    found.extend(glob::glob(&full.to_string_lossy())?.flatten().filter(|path| path.is_file()));
  }

  found.sort();
  found.dedup();
  Ok(found)
}

/// Deletes every artifact in `dir`. Files that vanish first are not an error.
pub fn remove_artifacts(dir: &Path, step: Step) -> Result<Vec<PathBuf>, PipelineError> {
  let mut removed = Vec::new();
  for path in find_artifacts(dir)? {
    match std::fs::remove_file(&path) {
      Ok(()) => {
        debug!(path = %path.display(), "removed artifact");
        removed.push(path);
      }
      Err(err) if err.kind() == io::ErrorKind::NotFound => {}
      Err(err) => return Err(PipelineError::Io { step, source: err }),
    }
  }
  Ok(removed)
}

/// Builds the wheel from the package index, source only, without dependencies.
///
/// Stale wheels in the working directory are removed first on a best-effort
/// basis. Returns the path of the freshly built wheel.
pub async fn build<R: ToolRunner>(runner: &R, config: &BuildConfig, env: &BuildEnv) -> Result<PathBuf, PipelineError> {
  match remove_artifacts(&config.work_dir, Step::ArtifactBuild) {
    Ok(stale) if !stale.is_empty() => info!(count = stale.len(), "removed stale wheels"),
    Ok(_) => {}
    Err(err) => warn!(error = %err, "could not remove stale wheels"),
  }

  info!(package = %config.package, "building wheel from source");

  let invocation = Invocation::new(&config.python)
    .args(["-m", "pip", "wheel", "--no-binary", ":all:", "--no-deps", "--wheel-dir"])
    .arg(config.work_dir.to_string_lossy())
    .arg(&config.package)
    .envs(env.vars())
    .current_dir(&config.work_dir);

  run_checked(runner, Step::ArtifactBuild, &invocation).await?;

  let built = find_artifacts(&config.work_dir)?;
  if built.len() > 1 {
    warn!(count = built.len(), "several wheels built, repairing the first");
  }
  built.into_iter().next().ok_or_else(|| PipelineError::ArtifactMissing {
    dir: config.work_dir.clone(),
  })
}

/// Bundles the library DLLs into a new wheel in the output directory.
///
/// The output directory is wiped first. The repair tool's exit status is
/// checked, and the output directory must end up holding exactly one wheel.
pub async fn repair<R: ToolRunner>(
  runner: &R,
  config: &BuildConfig,
  toolchain: &Toolchain,
  env: &BuildEnv,
  artifact: &Path,
) -> Result<PathBuf, PipelineError> {
  let output_dir = config.output_dir();
  if output_dir.exists() {
    debug!(path = %output_dir.display(), "removing previous output directory");
    std::fs::remove_dir_all(&output_dir).map_err(PipelineError::io(Step::ArtifactRepair))?;
  }

  info!(wheel = %artifact.display(), "repairing wheel");

  let invocation = Invocation::new(&config.repair_tool)
    .arg("repair")
    .arg("--add-path")
    .arg(toolchain.bin_dir().to_string_lossy())
    .arg("--wheel-dir")
    .arg(output_dir.to_string_lossy())
    .arg(artifact.to_string_lossy())
    .envs(env.vars())
    .current_dir(&config.work_dir);

  run_checked(runner, Step::ArtifactRepair, &invocation).await?;

  let repaired = if output_dir.is_dir() {
    find_artifacts(&output_dir)?
  } else {
    Vec::new()
  };
  match repaired.as_slice() {
    [wheel] => Ok(wheel.clone()),
    _ => Err(PipelineError::RepairOutput {
      dir: output_dir,
      found: repaired.len(),
    }),
  }
}

/// Removes the unrepaired wheels from the working directory. Idempotent.
pub fn cleanup(config: &BuildConfig) -> Result<Vec<PathBuf>, PipelineError> {
  let removed = remove_artifacts(&config.work_dir, Step::Cleanup)?;
  info!(count = removed.len(), "cleaned up intermediate wheels");
  Ok(removed)
}
