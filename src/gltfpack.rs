use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::debug;

use crate::{config::GLTFPACK_BIN, error::ToolError, schedule::PassParams};

/// Something that rewrites a scene file from `input` into `output`.
#[cfg_attr(test, mockall::automock)]
pub trait Optimizer {
    fn optimize(&self, input: &Path, output: &Path, params: &PassParams) -> Result<(), ToolError>;
}

/// Runs the gltfpack binary as a blocking subprocess.
#[derive(Debug, Clone)]
pub struct Gltfpack {
    bin: PathBuf,
}

impl Gltfpack {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    fn args(input: &Path, output: &Path, params: &PassParams) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-i".into(),
            input.into(),
            "-o".into(),
            output.into(),
            "-si".into(),
            format!("{:.2}", params.retention_ratio()).into(),
        ];
        if params.compress {
            args.push("-c".into());
        }
        args
    }
}

impl Default for Gltfpack {
    fn default() -> Self {
        Self::new(GLTFPACK_BIN)
    }
}

fn render_command(bin: &Path, args: &[OsString]) -> String {
    let mut line = bin.display().to_string();
    for arg in args {
        let arg = arg.to_string_lossy();
        line.push(' ');
        if arg.contains(char::is_whitespace) {
            line.push('"');
            line.push_str(&arg);
            line.push('"');
        } else {
            line.push_str(&arg);
        }
    }
    line
}

impl Optimizer for Gltfpack {
    fn optimize(&self, input: &Path, output: &Path, params: &PassParams) -> Result<(), ToolError> {
        let args = Self::args(input, output, params);
        let command = render_command(&self.bin, &args);
        debug!(%command, "running optimizer");

        let result = Command::new(&self.bin).args(&args).output();
        let out = match result {
            Ok(out) => out,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ToolError::Missing {
                    bin: self.bin.display().to_string(),
                });
            }
            Err(source) => return Err(ToolError::Spawn { command, source }),
        };

        if !out.status.success() {
            return Err(ToolError::Failed {
                command,
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
