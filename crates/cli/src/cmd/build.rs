//! The build command.
//!
//! Runs the whole pipeline against the real tools and prints a summary.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use simdwheel_lib::execute::SystemRunner;
use simdwheel_lib::{BuildConfig, BuildMode, Pipeline, PipelineError, PipelineReport, ToolchainConfig};

use crate::output::{
  OutputFormat, format_bytes, format_duration, print_detail, print_info, print_json, print_stat, print_success,
  print_warning,
};
use crate::prompts;

pub struct BuildArgs {
  pub compiler_env: Option<PathBuf>,
  pub library_root: Option<PathBuf>,
  pub work_dir: PathBuf,
  /// Skips the prompt when set.
  pub mode: Option<BuildMode>,
  pub output: OutputFormat,
}

/// Execute the build.
///
/// Checks the toolchain, selects the installer, then activates the compiler
/// environment, installs the build tools, builds and repairs the wheel and
/// removes the intermediate copies. Any failure is returned as-is so the
/// caller can exit non-zero.
pub fn cmd_build(args: BuildArgs) -> Result<()> {
  let toolchain = ToolchainConfig::resolve(args.compiler_env, args.library_root)?;
  let config = BuildConfig::for_dir(&args.work_dir)
    .with_context(|| format!("Working directory not found: {}", args.work_dir.display()))?;
  debug!(work_dir = %config.work_dir.display(), "resolved working directory");

  let pipeline = Pipeline::new(config, toolchain, SystemRunner);

  let preset = args.mode;
  let select_mode = move || match preset {
    Some(mode) => {
      print_info(&format!("Using {}", mode));
      Ok(mode)
    }
    None => prompts::select_mode(),
  };

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = match rt.block_on(pipeline.run(select_mode)) {
    Ok(report) => report,
    Err(err) => {
      if let PipelineError::StepFailed { detail, .. } = &err {
        print_detail(detail);
      }
      return Err(err.into());
    }
  };

  print_report(&report, args.output)
}

fn print_report(report: &PipelineReport, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    return print_json(report);
  }

  println!();
  print_success("Wheel built and repaired!");
  print_stat("Installer", report.mode.as_str());
  print_stat("Wheel", &report.artifact.display().to_string());
  print_stat("Size", &format_bytes(report.artifact_bytes));
  print_stat("Intermediates removed", &report.removed.len().to_string());
  print_stat("Duration", &format_duration(Duration::from_millis(report.elapsed_ms)));

  if report.artifact_bytes == 0 {
    print_warning("The repaired wheel is empty");
  }

  Ok(())
}
