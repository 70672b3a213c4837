//! Compiler toolchain and third-party library discovery.

pub mod activate;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::PipelineError;
use crate::platform::paths;

pub use activate::activate;

/// Where the compiler environment script and the library install are
/// expected to be. Nothing is checked until [`ToolchainConfig::locate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
  compiler_env_script: PathBuf,
  library_root: PathBuf,
}

impl ToolchainConfig {
  pub fn new(compiler_env_script: impl Into<PathBuf>, library_root: impl Into<PathBuf>) -> Self {
    Self {
      compiler_env_script: compiler_env_script.into(),
      library_root: library_root.into(),
    }
  }

  /// Fills in whichever path is not given from the environment defaults.
  pub fn resolve(compiler_env_script: Option<PathBuf>, library_root: Option<PathBuf>) -> Result<Self, PipelineError> {
    let compiler_env_script = compiler_env_script.unwrap_or_else(paths::compiler_env_script);
    let library_root = match library_root {
      Some(root) => root,
      None => paths::library_root().ok_or(PipelineError::ProfileUnset {
        var: paths::PROFILE_VAR,
      })?,
    };
    Ok(Self::new(compiler_env_script, library_root))
  }

  pub fn compiler_env_script(&self) -> &Path {
    &self.compiler_env_script
  }

  pub fn library_root(&self) -> &Path {
    &self.library_root
  }

  /// Verifies both paths exist, compiler script first.
  ///
  /// The error names the exact path that was checked. No fallback search.
  pub fn locate(&self) -> Result<Toolchain, PipelineError> {
    debug!(path = %self.compiler_env_script.display(), "checking compiler environment script");
    if !self.compiler_env_script.is_file() {
      return Err(PipelineError::PreconditionMissing {
        what: "compiler environment script",
        path: self.compiler_env_script.clone(),
      });
    }

    debug!(path = %self.library_root.display(), "checking library root");
    if !self.library_root.is_dir() {
      return Err(PipelineError::PreconditionMissing {
        what: "library root",
        path: self.library_root.clone(),
      });
    }

    let compiler_env_script = canonical("compiler environment script", &self.compiler_env_script)?;
    let library_root = canonical("library root", &self.library_root)?;

    info!(
      script = %compiler_env_script.display(),
      libraries = %library_root.display(),
      "toolchain located"
    );

    Ok(Toolchain {
      compiler_env_script,
      library_root,
    })
  }
}

/// Absolute form of a checked path. The tools run from the working directory,
/// so a path relative to our own cwd would point elsewhere for them.
fn canonical(what: &'static str, path: &Path) -> Result<PathBuf, PipelineError> {
  dunce::canonicalize(path).map_err(|_| PipelineError::PreconditionMissing {
    what,
    path: path.to_path_buf(),
  })
}

/// A toolchain whose paths were verified to exist. Both paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  compiler_env_script: PathBuf,
  library_root: PathBuf,
}

impl Toolchain {
  pub fn compiler_env_script(&self) -> &Path {
    &self.compiler_env_script
  }

  pub fn library_root(&self) -> &Path {
    &self.library_root
  }

  pub fn include_dir(&self) -> PathBuf {
    self.library_root.join("include")
  }

  pub fn lib_dir(&self) -> PathBuf {
    self.library_root.join("lib")
  }

  /// DLLs the repair step embeds into the wheel.
  pub fn bin_dir(&self) -> PathBuf {
    self.library_root.join("bin")
  }
}
