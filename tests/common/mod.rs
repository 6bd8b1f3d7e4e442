#![allow(dead_code)]

mod glb;

use std::{cell::RefCell, fs, path::Path};

pub use glb::{MIN_LEN, glb_bytes, write_glb};
use glb_shrink::prelude::*;

pub const KIB: usize = 1024;
pub const MB: f64 = 1024.0 * 1024.0;

/// Size the fake optimizer produces from an input of `len` bytes.
pub fn scaled_len(len: usize, factor: f64) -> usize {
    ((len as f64 * factor) as usize).max(MIN_LEN) & !3
}

/// Stand-in for gltfpack that scales the file by a fixed factor per call.
pub struct ScalingOptimizer {
    factor: f64,
    fail_calls: Vec<usize>,
    pub levels: RefCell<Vec<u8>>,
}

impl ScalingOptimizer {
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            fail_calls: Vec::new(),
            levels: RefCell::new(Vec::new()),
        }
    }

    /// Make the given 1-based calls fail.
    pub fn failing_on(mut self, calls: &[usize]) -> Self {
        self.fail_calls = calls.to_vec();
        self
    }

    pub fn calls(&self) -> usize {
        self.levels.borrow().len()
    }
}

impl Optimizer for ScalingOptimizer {
    fn optimize(&self, input: &Path, output: &Path, params: &PassParams) -> Result<(), ToolError> {
        self.levels.borrow_mut().push(params.level);
        if self.fail_calls.contains(&self.calls()) {
            return Err(ToolError::Missing {
                bin: "fake-gltfpack".to_string(),
            });
        }

        let len = fs::metadata(input).unwrap().len() as usize;
        write_glb(output, scaled_len(len, self.factor));
        Ok(())
    }
}
