use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Failure of a single optimizer invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("optimizer `{bin}` not found, is gltfpack installed and on PATH?")]
    Missing { bin: String },

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("optimizer output {} is not a usable glb: {reason}", path.display())]
    InvalidOutput { path: PathBuf, reason: String },
}

/// Filesystem failure while running a job. Tool failures never end up here.
#[derive(Debug, Error)]
pub enum ShrinkError {
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ShrinkError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| ShrinkError::Io {
            action,
            path,
            source,
        }
    }
}
