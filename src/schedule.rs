use std::fmt;

use crate::config::{ESCALATION_LEVELS, INITIAL_LEVEL};

/// Parameters of one optimizer pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassParams {
    /// Simplification aggressiveness in percent, higher discards more triangles.
    pub level: u8,
    /// Apply gltfpack's basic compression (`-c`).
    pub compress: bool,
}

impl PassParams {
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            compress: true,
        }
    }

    /// Fraction of triangles the optimizer is asked to keep.
    pub fn retention_ratio(&self) -> f64 {
        1.0 - f64::from(self.level.min(100)) / 100.0
    }
}

impl fmt::Display for PassParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {} (keep {:.2})", self.level, self.retention_ratio())
    }
}

/// Ordered escalation plan: one mandatory pass, then steps until the budget is met.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub initial: PassParams,
    pub steps: Vec<PassParams>,
}

impl Schedule {
    pub fn from_levels(initial: u8, steps: &[u8]) -> Self {
        Self {
            initial: PassParams::new(initial),
            steps: steps.iter().copied().map(PassParams::new).collect(),
        }
    }

    /// Upper bound on optimizer invocations for one job.
    pub fn max_passes(&self) -> usize {
        1 + self.steps.len()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::from_levels(INITIAL_LEVEL, &ESCALATION_LEVELS)
    }
}
