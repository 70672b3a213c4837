use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use simdwheel_lib::BuildMode;

mod cmd;
mod output;
mod prompts;

use output::{OutputFormat, print_error};

/// simdwheel - build a self-contained pillow-simd wheel on Windows
#[derive(Parser)]
#[command(name = "simdwheel")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Compiler environment script (vcvars64.bat)
  #[arg(long, env = "SIMDWHEEL_COMPILER_ENV", value_name = "PATH")]
  compiler_env: Option<PathBuf>,

  /// Third-party library root containing include/, lib/ and bin/
  #[arg(long, env = "SIMDWHEEL_LIBRARY_ROOT", value_name = "PATH")]
  library_root: Option<PathBuf>,

  /// Directory to build in; the repaired wheel lands in <DIR>/wheelhouse
  #[arg(long, value_name = "DIR", default_value = ".")]
  work_dir: PathBuf,

  /// Installer backend; prompts when omitted
  #[arg(long, value_enum)]
  mode: Option<ModeArg>,

  /// Summary format
  #[arg(short, long, value_enum, default_value_t)]
  output: OutputFormat,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
  Uv,
  Pip,
}

impl From<ModeArg> for BuildMode {
  fn from(mode: ModeArg) -> Self {
    match mode {
      ModeArg::Uv => BuildMode::Uv,
      ModeArg::Pip => BuildMode::Pip,
    }
  }
}

fn main() {
  let cli = Cli::parse();

  let default_filter = if cli.verbose { "simdwheel_lib=debug" } else { "simdwheel_lib=info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let args = cmd::BuildArgs {
    compiler_env: cli.compiler_env,
    library_root: cli.library_root,
    work_dir: cli.work_dir,
    mode: cli.mode.map(BuildMode::from),
    output: cli.output,
  };

  if let Err(err) = cmd::cmd_build(args) {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}
