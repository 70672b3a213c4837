//! Installer backend selection.

use std::fmt;
use std::io::{self, BufRead, Write};

use serde::Serialize;

/// Which installer provisions the auxiliary build tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
  Uv,
  Pip,
}

impl BuildMode {
  /// Classifies a prompt answer.
  ///
  /// Only `y` (any case, surrounding whitespace ignored) selects uv. Every
  /// other answer, including an empty line, selects pip. There is no invalid
  /// input and no re-prompt.
  pub fn from_answer(answer: &str) -> Self {
    if answer.trim().eq_ignore_ascii_case("y") {
      BuildMode::Uv
    } else {
      BuildMode::Pip
    }
  }

  /// Program and leading arguments of the install command.
  pub fn install_command<'a>(self, python: &'a str, uv: &'a str) -> (&'a str, Vec<&'a str>) {
    match self {
      BuildMode::Uv => (uv, vec!["pip", "install"]),
      BuildMode::Pip => (python, vec!["-m", "pip", "install"]),
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      BuildMode::Uv => "uv",
      BuildMode::Pip => "pip",
    }
  }
}

impl fmt::Display for BuildMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

pub const MODE_PROMPT: &str = "Use uv for faster installs? [y/N] ";

/// Asks once, reads one line, reports the choice.
///
/// End of input counts as an empty answer.
pub fn prompt_mode<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<BuildMode> {
  write!(output, "{}", MODE_PROMPT)?;
  output.flush()?;

  let mut answer = String::new();
  input.read_line(&mut answer)?;

  let mode = BuildMode::from_answer(&answer);
  writeln!(output, "Using {}", mode)?;

  Ok(mode)
}
