pub const APP_NAME: &str = "simdwheel";

/// Package fetched from the index and compiled from source.
pub const PACKAGE_NAME: &str = "pillow-simd";

/// Both spellings pip and the repair tool emit for the wheel file name.
pub const ARTIFACT_GLOBS: [&str; 2] = ["pillow_simd-*.whl", "Pillow_SIMD-*.whl"];

/// Directory (relative to the working directory) that receives the repaired wheel.
pub const OUTPUT_DIR_NAME: &str = "wheelhouse";

/// Build tools installed before the wheel build.
pub const AUX_PACKAGES: [&str; 2] = ["wheel", "delvewheel"];

pub const DEFAULT_PYTHON: &str = "python";
pub const DEFAULT_UV: &str = "uv";
pub const DEFAULT_REPAIR_TOOL: &str = "delvewheel";

pub const DEFAULT_COMPILER_ENV_SCRIPT: &str =
  r"C:\Program Files\Microsoft Visual Studio\2022\Community\VC\Auxiliary\Build\vcvars64.bat";

/// Library install location, relative to the user profile directory.
pub const DEFAULT_LIBRARY_SUBDIR: [&str; 3] = ["vcpkg", "installed", "x64-windows"];

pub const ENV_COMPILER_ENV: &str = "SIMDWHEEL_COMPILER_ENV";
pub const ENV_LIBRARY_ROOT: &str = "SIMDWHEEL_LIBRARY_ROOT";

pub const INCLUDE_VAR: &str = "INCLUDE";
pub const LIB_VAR: &str = "LIB";
pub const ZLIB_ROOT_VAR: &str = "ZLIB_ROOT";
pub const JPEG_ROOT_VAR: &str = "JPEG_ROOT";
