//! Defaults shared by the library and the `glb-shrink` binary.

/// Size budget used when `--target-mb` is not given.
pub const TARGET_MB_DEFAULT: f64 = 25.0;

/// Optimizer binary looked up on `PATH` when no explicit path is configured.
pub const GLTFPACK_BIN: &str = "gltfpack";

/// Environment variable consulted for the optimizer binary.
pub const GLTFPACK_ENV: &str = "GLTFPACK";

/// Suffix appended to derived output file and directory names.
pub const OPTIMIZED_SUFFIX: &str = "_optimized";

/// Output directory used under the cwd when the input directory has no usable name.
pub const FALLBACK_OUTPUT_DIR: &str = "optimized";

/// Extension of the scene files picked up in directory mode.
pub const GLB_EXTENSION: &str = "glb";

/// Level of the mandatory first pass.
pub const INITIAL_LEVEL: u8 = 5;

/// Escalation levels tried after the first pass, mildest first.
pub const ESCALATION_LEVELS: [u8; 7] = [5, 10, 20, 30, 50, 70, 90];

pub(crate) const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub(crate) fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}
