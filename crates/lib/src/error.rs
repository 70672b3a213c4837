//! Pipeline error taxonomy.
//!
//! Every error is fatal: the pipeline stops at the first one and the CLI
//! exits non-zero with the rendered message.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::env::PathListError;
use crate::execute::ExecuteError;

/// The pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
  EnvironmentCheck,
  ModeSelection,
  ToolchainActivation,
  PathExport,
  DependencyInstall,
  ArtifactBuild,
  ArtifactRepair,
  Cleanup,
}

impl Step {
  pub fn as_str(self) -> &'static str {
    match self {
      Step::EnvironmentCheck => "environment check",
      Step::ModeSelection => "mode selection",
      Step::ToolchainActivation => "toolchain activation",
      Step::PathExport => "library path export",
      Step::DependencyInstall => "dependency install",
      Step::ArtifactBuild => "wheel build",
      Step::ArtifactRepair => "wheel repair",
      Step::Cleanup => "cleanup",
    }
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

fn exit_status(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {}", code),
    None => "terminated by signal".to_string(),
  }
}

#[derive(Debug, Error)]
pub enum PipelineError {
  /// A required file or directory is absent.
  #[error("{what} not found: {}", .path.display())]
  PreconditionMissing { what: &'static str, path: PathBuf },

  /// The default library root cannot be derived.
  #[error("cannot derive the library root: {var} is not set")]
  ProfileUnset { var: &'static str },

  /// An external command ran and returned a failure status.
  #[error("{step} failed ({})", exit_status(.code))]
  StepFailed {
    step: Step,
    code: Option<i32>,
    /// Trailing lines of the command's stderr.
    detail: String,
  },

  /// An external command could not be started.
  #[error("{step} could not run: {source}")]
  Spawn {
    step: Step,
    #[source]
    source: ExecuteError,
  },

  #[error("no {} wheel found in {}", crate::consts::PACKAGE_NAME, .dir.display())]
  ArtifactMissing { dir: PathBuf },

  #[error("expected exactly one repaired wheel in {}, found {found}", .dir.display())]
  RepairOutput { dir: PathBuf, found: usize },

  #[error("library path export: {0}")]
  PathList(#[from] PathListError),

  #[error("invalid artifact pattern: {0}")]
  Pattern(#[from] glob::PatternError),

  #[error("{step}: {source}")]
  Io {
    step: Step,
    #[source]
    source: std::io::Error,
  },
}

impl PipelineError {
  /// The stage the error belongs to.
  pub fn step(&self) -> Step {
    match self {
      PipelineError::PreconditionMissing { .. } | PipelineError::ProfileUnset { .. } => Step::EnvironmentCheck,
      PipelineError::StepFailed { step, .. } | PipelineError::Spawn { step, .. } | PipelineError::Io { step, .. } => {
        *step
      }
      PipelineError::ArtifactMissing { .. } | PipelineError::Pattern(_) => Step::ArtifactBuild,
      PipelineError::RepairOutput { .. } => Step::ArtifactRepair,
      PipelineError::PathList(_) => Step::PathExport,
    }
  }

  pub(crate) fn io(step: Step) -> impl FnOnce(std::io::Error) -> PipelineError {
    move |source| PipelineError::Io { step, source }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn precondition_message_names_path() {
    let err = PipelineError::PreconditionMissing {
      what: "library root",
      path: PathBuf::from("/missing/libs"),
    };
    assert_eq!(err.to_string(), "library root not found: /missing/libs");
    assert_eq!(err.step(), Step::EnvironmentCheck);
  }

  #[test]
  fn step_failure_message_names_step() {
    let err = PipelineError::StepFailed {
      step: Step::DependencyInstall,
      code: Some(2),
      detail: String::new(),
    };
    assert_eq!(err.to_string(), "dependency install failed (exit code 2)");
  }

  #[test]
  fn signal_termination_is_reported() {
    let err = PipelineError::StepFailed {
      step: Step::ArtifactBuild,
      code: None,
      detail: String::new(),
    };
    assert_eq!(err.to_string(), "wheel build failed (terminated by signal)");
  }
}
