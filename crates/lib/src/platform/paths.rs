use std::ffi::OsString;
use std::path::PathBuf;

use crate::consts::{DEFAULT_COMPILER_ENV_SCRIPT, DEFAULT_LIBRARY_SUBDIR, ENV_COMPILER_ENV, ENV_LIBRARY_ROOT};

/// Variable naming the user's profile directory.
#[cfg(windows)]
pub const PROFILE_VAR: &str = "USERPROFILE";

/// Variable naming the user's profile directory.
#[cfg(not(windows))]
pub const PROFILE_VAR: &str = "HOME";

fn non_empty_var(name: &str) -> Option<OsString> {
  std::env::var_os(name).filter(|value| !value.is_empty())
}

/// Returns the user's profile directory, if the profile variable is set.
pub fn profile_dir() -> Option<PathBuf> {
  non_empty_var(PROFILE_VAR).map(PathBuf::from)
}

/// Returns the compiler environment script, honoring `SIMDWHEEL_COMPILER_ENV`.
pub fn compiler_env_script() -> PathBuf {
  non_empty_var(ENV_COMPILER_ENV)
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_COMPILER_ENV_SCRIPT))
}

/// Returns the third-party library root, honoring `SIMDWHEEL_LIBRARY_ROOT`.
///
/// Without an override the root is derived from the profile directory, so
/// `None` means the profile variable is unset.
pub fn library_root() -> Option<PathBuf> {
  if let Some(root) = non_empty_var(ENV_LIBRARY_ROOT) {
    return Some(PathBuf::from(root));
  }
  profile_dir().map(|profile| DEFAULT_LIBRARY_SUBDIR.iter().fold(profile, |path, part| path.join(part)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn library_root_derives_from_profile() {
    temp_env::with_vars(
      [(ENV_LIBRARY_ROOT, None::<&str>), (PROFILE_VAR, Some("/home/user"))],
      || {
        assert_eq!(
          library_root(),
          Some(PathBuf::from("/home/user").join("vcpkg").join("installed").join("x64-windows"))
        );
      },
    );
  }

  #[test]
  #[serial]
  fn library_root_override_takes_precedence() {
    temp_env::with_vars(
      [(ENV_LIBRARY_ROOT, Some("/opt/libs")), (PROFILE_VAR, Some("/home/user"))],
      || {
        assert_eq!(library_root(), Some(PathBuf::from("/opt/libs")));
      },
    );
  }

  #[test]
  #[serial]
  fn library_root_missing_without_profile() {
    temp_env::with_vars([(ENV_LIBRARY_ROOT, None::<&str>), (PROFILE_VAR, None)], || {
      assert_eq!(library_root(), None);
    });
  }

  #[test]
  #[serial]
  fn empty_override_falls_back_to_default_script() {
    temp_env::with_var(ENV_COMPILER_ENV, Some(""), || {
      assert_eq!(compiler_env_script(), PathBuf::from(DEFAULT_COMPILER_ENV_SCRIPT));
    });
  }
}
