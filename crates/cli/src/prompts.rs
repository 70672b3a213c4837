use std::io;

use simdwheel_lib::mode::prompt_mode;
use simdwheel_lib::{BuildMode, PipelineError, Step};

/// Asks on stderr which installer to use and reads the answer from stdin.
///
/// Unlike a confirmation, this never refuses to run without a terminal:
/// piped or closed stdin simply yields the default (pip).
pub fn select_mode() -> Result<BuildMode, PipelineError> {
  let stdin = io::stdin();
  prompt_mode(stdin.lock(), io::stderr()).map_err(|source| PipelineError::Io {
    step: Step::ModeSelection,
    source,
  })
}
