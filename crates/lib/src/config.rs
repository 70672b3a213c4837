//! Build settings that are not part of the toolchain.

use std::io;
use std::path::{Path, PathBuf};

use crate::consts::{AUX_PACKAGES, DEFAULT_PYTHON, DEFAULT_REPAIR_TOOL, DEFAULT_UV, OUTPUT_DIR_NAME, PACKAGE_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  /// Directory the wheel is built into; the output directory lives below it.
  pub work_dir: PathBuf,
  pub output_dir_name: String,
  pub package: String,
  pub python: String,
  pub uv: String,
  pub repair_tool: String,
  pub aux_packages: Vec<String>,
}

impl BuildConfig {
  pub fn new(work_dir: impl Into<PathBuf>) -> Self {
    Self {
      work_dir: work_dir.into(),
      output_dir_name: OUTPUT_DIR_NAME.to_string(),
      package: PACKAGE_NAME.to_string(),
      python: DEFAULT_PYTHON.to_string(),
      uv: DEFAULT_UV.to_string(),
      repair_tool: DEFAULT_REPAIR_TOOL.to_string(),
      aux_packages: AUX_PACKAGES.iter().map(|p| p.to_string()).collect(),
    }
  }

  /// Like [`BuildConfig::new`], with the directory canonicalized.
  ///
  /// Uses `dunce` so Windows tools are never handed a `\\?\` path.
  pub fn for_dir(work_dir: &Path) -> io::Result<Self> {
    Ok(Self::new(dunce::canonicalize(work_dir)?))
  }

  pub fn output_dir(&self) -> PathBuf {
    self.work_dir.join(&self.output_dir_name)
  }
}
