//! Build environment overlay.
//!
//! [`BuildEnv`] is the set of variables handed to every tool invocation. It is
//! never written back to the current process: each step takes an environment
//! and returns a new one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::{INCLUDE_VAR, JPEG_ROOT_VAR, LIB_VAR, ZLIB_ROOT_VAR};
use crate::toolchain::Toolchain;

#[derive(Debug, Error)]
#[error("cannot append {} to {var}: path contains a list separator", .path.display())]
pub struct PathListError {
  pub var: String,
  pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
  vars: BTreeMap<String, String>,
}

impl BuildEnv {
  pub fn new() -> Self {
    Self::default()
  }

  /// Parses `NAME=VALUE` entries as printed by `set` (cmd.exe, one per line)
  /// or `env -0` (sh, NUL-terminated so values may span lines).
  ///
  /// Entries without `=` and cmd.exe's hidden `=C:=C:\` entries are skipped.
  pub fn from_captured(output: &str) -> Self {
    let separator = if output.contains('\0') { '\0' } else { '\n' };
    let vars = output
      .split(separator)
      .map(|entry| entry.trim_end_matches('\r'))
      .filter_map(|entry| entry.split_once('='))
      .filter(|(name, _)| !name.is_empty())
      .map(|(name, value)| (name.to_string(), value.to_string()))
      .collect();
    Self { vars }
  }

  /// Lookup is ASCII case-insensitive, as on Windows.
  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .vars
      .get(name)
      .or_else(|| {
        self
          .vars
          .iter()
          .find(|(key, _)| key.eq_ignore_ascii_case(name))
          .map(|(_, value)| value)
      })
      .map(String::as_str)
  }

  pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
    let key = self.key_for(name);
    self.vars.insert(key, value.into());
    self
  }

  /// Appends `dir` to the path list in `name`, keeping every existing entry.
  pub fn append_path(self, name: &str, dir: &Path) -> Result<Self, PathListError> {
    let existing = self.get(name).unwrap_or_default();

    let mut entries: Vec<PathBuf> = if existing.is_empty() {
      Vec::new()
    } else {
      std::env::split_paths(existing).collect()
    };
    entries.push(dir.to_path_buf());

    let joined = std::env::join_paths(entries).map_err(|_| PathListError {
      var: name.to_string(),
      path: dir.to_path_buf(),
    })?;

    Ok(self.set(name, joined.to_string_lossy()))
  }

  pub fn vars(&self) -> &BTreeMap<String, String> {
    &self.vars
  }

  pub fn len(&self) -> usize {
    self.vars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }

  fn key_for(&self, name: &str) -> String {
    self
      .vars
      .keys()
      .find(|key| key.eq_ignore_ascii_case(name))
      .cloned()
      .unwrap_or_else(|| name.to_string())
  }
}

/// Adds the library's headers and import libraries to the compiler search
/// paths and points the zlib/libjpeg discovery variables at the library root.
///
/// Must run on the activated environment: it appends to `INCLUDE` and `LIB`
/// rather than replacing them.
pub fn export_library_paths(env: BuildEnv, toolchain: &Toolchain) -> Result<BuildEnv, PathListError> {
  let root = toolchain.library_root().to_string_lossy().into_owned();

  let env = env
    .append_path(INCLUDE_VAR, &toolchain.include_dir())?
    .append_path(LIB_VAR, &toolchain.lib_dir())?
    .set(ZLIB_ROOT_VAR, root.clone())
    .set(JPEG_ROOT_VAR, root);

  debug!(
    include = env.get(INCLUDE_VAR).unwrap_or_default(),
    lib = env.get(LIB_VAR).unwrap_or_default(),
    "exported library paths"
  );

  Ok(env)
}
