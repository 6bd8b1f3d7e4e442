use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::config::{BYTES_PER_MB, FALLBACK_OUTPUT_DIR, GLB_EXTENSION, OPTIMIZED_SUFFIX};

/// One input file to shrink into one output file.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub target_mb: f64,
}

impl Job {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, target_mb: f64) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            target_mb,
        }
    }

    /// Job writing next to `input` as `<stem>_optimized.glb`.
    pub fn beside(input: impl Into<PathBuf>, target_mb: f64) -> Self {
        let input = input.into();
        let output = input.with_file_name(optimized_file_name(&input));
        Self::new(input, output, target_mb)
    }

    /// Job writing into `out_dir` as `<stem>_optimized.glb`.
    pub fn into_dir(input: impl Into<PathBuf>, out_dir: &Path, target_mb: f64) -> Self {
        let input = input.into();
        let output = out_dir.join(optimized_file_name(&input));
        Self::new(input, output, target_mb)
    }

    pub fn budget_bytes(&self) -> f64 {
        self.target_mb * BYTES_PER_MB
    }
}

/// `<stem>_optimized.glb` for the given input path.
pub fn optimized_file_name(input: &Path) -> OsString {
    let mut name = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push(OPTIMIZED_SUFFIX);
    name.push(".");
    name.push(GLB_EXTENSION);
    name
}

/// Default output directory for a directory run.
///
/// A named directory gets a `<name>_optimized` sibling. Paths such as `.` have no
/// usable name and fall back to `optimized` under `cwd`.
pub fn default_output_dir(input_dir: &Path, cwd: &Path) -> PathBuf {
    match input_dir.file_name() {
        Some(name) => {
            let mut name = name.to_os_string();
            name.push(OPTIMIZED_SUFFIX);
            input_dir.with_file_name(name)
        }
        None => cwd.join(FALLBACK_OUTPUT_DIR),
    }
}
