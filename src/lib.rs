//! Shrink `.glb` scenes under a size budget by running gltfpack with escalating
//! simplification until the output fits.

pub mod batch;
pub mod config;
pub mod error;
pub mod gltfpack;
pub mod job;
pub mod opt;
pub mod schedule;

#[cfg(test)]
#[path = "../tests/common/glb.rs"]
mod testutil;

pub mod prelude {
    pub use crate::{
        batch::{BatchSummary, JobReport, plan_dir, run_jobs},
        error::{ShrinkError, ToolError},
        gltfpack::{Gltfpack, Optimizer},
        job::{Job, default_output_dir},
        opt::{ShrinkOptions, ShrinkOutcome, shrink},
        schedule::{PassParams, Schedule},
    };
}
