use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{error, info};

use crate::{
    config::{GLB_EXTENSION, bytes_to_mb},
    error::ShrinkError,
    gltfpack::Optimizer,
    job::Job,
    opt::{ShrinkOptions, ShrinkOutcome, shrink},
};

/// A finished job. Filesystem errors are kept so later jobs still run.
#[derive(Debug)]
pub struct JobReport {
    pub job: Job,
    pub result: Result<ShrinkOutcome, ShrinkError>,
}

impl JobReport {
    pub fn met_budget(&self) -> bool {
        matches!(&self.result, Ok(outcome) if outcome.met_budget)
    }

    /// Achieved size, or the input size when the job never produced an outcome.
    pub fn size_mb(&self) -> f64 {
        match &self.result {
            Ok(outcome) => outcome.size_mb,
            Err(_) => fs::metadata(&self.job.input)
                .map(|m| bytes_to_mb(m.len()))
                .unwrap_or(0.0),
        }
    }

    /// `OK: <output> -> 12.34 MB`, with only the file name when `full_path` is false.
    pub fn status_line(&self, full_path: bool) -> String {
        let output = if full_path {
            self.job.output.display().to_string()
        } else {
            self.job
                .output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        status_line(self.met_budget(), &output, self.size_mb())
    }
}

pub fn status_line(met_budget: bool, output: &str, size_mb: f64) -> String {
    let verdict = if met_budget { "OK" } else { "NOT MET" };
    format!("{verdict}: {output} -> {size_mb:.2} MB")
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub jobs: usize,
    pub met: usize,
    pub aborted: usize,
    pub errored: usize,
}

fn is_glb(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(GLB_EXTENSION))
}

/// Direct children of `dir` with a `.glb` extension, sorted.
pub fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>, ShrinkError> {
    let entries = fs::read_dir(dir).map_err(ShrinkError::io("list", dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(ShrinkError::io("list", dir))?.path();
        if path.is_file() && is_glb(&path) {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// One job per scene file in `dir`, writing into `out_dir` (created if missing).
pub fn plan_dir(dir: &Path, out_dir: &Path, target_mb: f64) -> Result<Vec<Job>, ShrinkError> {
    fs::create_dir_all(out_dir).map_err(ShrinkError::io("create output directory", out_dir))?;

    let jobs = scan_dir(dir)?
        .into_iter()
        .map(|input| Job::into_dir(input, out_dir, target_mb))
        .collect();

    Ok(jobs)
}

/// Runs every job in order. `on_report` sees each job as soon as it finishes.
pub fn run_jobs<O, I, F>(
    optimizer: &O,
    jobs: I,
    options: &ShrinkOptions,
    mut on_report: F,
) -> BatchSummary
where
    O: Optimizer + ?Sized,
    I: IntoIterator<Item = Job>,
    F: FnMut(&JobReport),
{
    let mut summary = BatchSummary::default();

    for job in jobs {
        let result = shrink(optimizer, &job, options);
        if let Err(err) = &result {
            error!(input = %job.input.display(), %err, "job failed");
        }

        let report = JobReport { job, result };
        summary.jobs += 1;
        match &report.result {
            Ok(outcome) if outcome.met_budget => summary.met += 1,
            Ok(outcome) if !outcome.completed() => summary.aborted += 1,
            Ok(_) => {}
            Err(_) => summary.errored += 1,
        }

        on_report(&report);
    }

    info!(
        jobs = summary.jobs,
        met = summary.met,
        aborted = summary.aborted,
        errored = summary.errored,
        "batch finished"
    );
    summary
}
