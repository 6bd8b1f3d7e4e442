use std::{
    fs,
    path::{Path, PathBuf},
};

use gltf::binary::Glb;
use tempfile::TempDir;
use tracing::{debug, error, info, warn};

use crate::{
    config::bytes_to_mb,
    error::{ShrinkError, ToolError},
    gltfpack::Optimizer,
    job::Job,
    schedule::{PassParams, Schedule},
};

/// How a job is driven through the optimizer.
#[derive(Debug, Clone)]
pub struct ShrinkOptions {
    pub schedule: Schedule,
    /// Reject optimizer output that is not a well-formed glb container.
    pub verify_output: bool,
}

impl Default for ShrinkOptions {
    fn default() -> Self {
        Self {
            schedule: Schedule::default(),
            verify_output: true,
        }
    }
}

/// What a job achieved.
#[derive(Debug)]
pub struct ShrinkOutcome {
    pub met_budget: bool,
    /// Size of the written output, or of the untouched input when the job aborted.
    pub size_mb: f64,
    /// Optimizer invocations, failed ones included.
    pub passes: usize,
    /// Passes after the first that failed and were skipped.
    pub skipped: usize,
    /// Set when the mandatory first pass failed and nothing was written.
    pub aborted: Option<ToolError>,
}

impl ShrinkOutcome {
    pub fn completed(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Private working copy of one job. The directory goes away when this is dropped.
struct Scratch {
    dir: TempDir,
    work: PathBuf,
    next: PathBuf,
    /// Topmost output directory this job had to create.
    created: Option<PathBuf>,
}

impl Scratch {
    fn create(input: &Path, output: &Path) -> Result<Self, ShrinkError> {
        let parent = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let created = parent
            .ancestors()
            .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
            .last()
            .map(Path::to_path_buf);
        fs::create_dir_all(parent).map_err(ShrinkError::io("create output directory", parent))?;

        // Same filesystem as the output so the final move is a rename.
        let dir = tempfile::Builder::new()
            .prefix(".glb-shrink-")
            .tempdir_in(parent)
            .map_err(ShrinkError::io("create scratch directory in", parent))?;

        let work = dir.path().join("work.glb");
        let next = dir.path().join("next.glb");
        fs::copy(input, &work).map_err(ShrinkError::io("copy", input))?;

        Ok(Self {
            dir,
            work,
            next,
            created,
        })
    }

    fn size(&self) -> Result<u64, ShrinkError> {
        fs::metadata(&self.work)
            .map(|m| m.len())
            .map_err(ShrinkError::io("stat", &self.work))
    }

    fn promote(&self) -> Result<(), ShrinkError> {
        fs::rename(&self.next, &self.work).map_err(ShrinkError::io("replace", &self.work))
    }

    fn persist(self, output: &Path) -> Result<(), ShrinkError> {
        fs::rename(&self.work, output).map_err(ShrinkError::io("move result to", output))
    }

    /// Drops the scratch copy and any output directory created for it.
    fn discard(self) {
        let Self { dir, created, .. } = self;
        if let Err(err) = dir.close() {
            warn!(%err, "failed to remove scratch directory");
        }
        if let Some(created) = created {
            if let Err(err) = fs::remove_dir_all(&created) {
                warn!(dir = %created.display(), %err, "failed to remove output directory");
            }
        }
    }
}

/// Checks the container framing only, scene content is never looked at.
pub fn verify_glb(path: &Path) -> Result<(), ToolError> {
    let invalid = |reason: String| ToolError::InvalidOutput {
        path: path.to_path_buf(),
        reason,
    };

    let data = fs::read(path).map_err(|e| invalid(format!("cannot read output: {e}")))?;
    Glb::from_slice(&data).map_err(|e| invalid(e.to_string()))?;

    Ok(())
}

fn run_pass<O: Optimizer + ?Sized>(
    optimizer: &O,
    scratch: &Scratch,
    params: &PassParams,
    verify: bool,
) -> Result<(), ToolError> {
    // leftovers from a failed pass
    let _ = fs::remove_file(&scratch.next);

    optimizer.optimize(&scratch.work, &scratch.next, params)?;

    if verify {
        verify_glb(&scratch.next)
    } else if scratch.next.is_file() {
        Ok(())
    } else {
        Err(ToolError::InvalidOutput {
            path: scratch.next.clone(),
            reason: "optimizer wrote no output".to_string(),
        })
    }
}

/// Shrinks `job.input` into `job.output` by escalating optimizer passes until the
/// output fits `job.target_mb` or the schedule runs out.
///
/// A failing first pass aborts the job without touching `job.output` and removes any
/// output directory the job created; the outcome then reports the input size. Later
/// failing passes are skipped. Only filesystem problems are returned as errors.
pub fn shrink<O: Optimizer + ?Sized>(
    optimizer: &O,
    job: &Job,
    options: &ShrinkOptions,
) -> Result<ShrinkOutcome, ShrinkError> {
    let original = fs::metadata(&job.input)
        .map_err(ShrinkError::io("read", &job.input))?
        .len();
    let budget = job.budget_bytes();

    let scratch = Scratch::create(&job.input, &job.output)?;
    debug!(input = %job.input.display(), scratch = %scratch.work.display(), "scratch copy ready");

    let initial = &options.schedule.initial;
    if let Err(err) = run_pass(optimizer, &scratch, initial, options.verify_output) {
        error!(input = %job.input.display(), %err, "first optimizer pass failed");
        scratch.discard();
        return Ok(ShrinkOutcome {
            met_budget: false,
            size_mb: bytes_to_mb(original),
            passes: 1,
            skipped: 0,
            aborted: Some(err),
        });
    }
    scratch.promote()?;

    let mut size = scratch.size()?;
    let mut passes = 1;
    let mut skipped = 0;
    info!(pass = passes, params = %initial, size_mb = bytes_to_mb(size), "pass done");

    for params in &options.schedule.steps {
        if size as f64 <= budget {
            break;
        }

        passes += 1;
        match run_pass(optimizer, &scratch, params, options.verify_output) {
            Ok(()) => {
                scratch.promote()?;
                size = scratch.size()?;
                info!(pass = passes, params = %params, size_mb = bytes_to_mb(size), "pass done");
            }
            Err(err) => {
                skipped += 1;
                warn!(pass = passes, params = %params, %err, "optimizer pass failed, escalating");
            }
        }
    }

    let met_budget = size as f64 <= budget;
    scratch.persist(&job.output)?;

    Ok(ShrinkOutcome {
        met_budget,
        size_mb: bytes_to_mb(size),
        passes,
        skipped,
        aborted: None,
    })
}
