mod common;

use std::fs;

use common::{KIB, MB, ScalingOptimizer, write_glb};
use glb_shrink::prelude::*;

#[test]
fn every_file_gets_its_own_job() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("models");
    fs::create_dir(&input_dir).unwrap();
    for name in ["a.glb", "b.glb", "c.glb"] {
        write_glb(&input_dir.join(name), 40 * KIB);
    }
    fs::write(input_dir.join("readme.md"), "not a scene").unwrap();

    let out_dir = default_output_dir(&input_dir, dir.path());
    let jobs = plan_dir(&input_dir, &out_dir, 25.0 * KIB as f64 / MB).unwrap();
    assert_eq!(jobs.len(), 3);

    // second job's mandatory pass fails, the others still run
    let optimizer = ScalingOptimizer::new(0.5).failing_on(&[2]);
    let mut lines = Vec::new();
    let summary = run_jobs(&optimizer, jobs, &ShrinkOptions::default(), |report| {
        lines.push(report.status_line(false));
    });

    assert_eq!(optimizer.calls(), 3);
    assert_eq!(
        summary,
        BatchSummary {
            jobs: 3,
            met: 2,
            aborted: 1,
            errored: 0,
        }
    );
    assert_eq!(
        lines,
        [
            "OK: a_optimized.glb -> 0.02 MB",
            "NOT MET: b_optimized.glb -> 0.04 MB",
            "OK: c_optimized.glb -> 0.02 MB",
        ]
    );

    assert_eq!(out_dir, dir.path().join("models_optimized"));
    assert!(out_dir.join("a_optimized.glb").is_file());
    assert!(!out_dir.join("b_optimized.glb").exists());
    assert!(out_dir.join("c_optimized.glb").is_file());
}

#[test]
fn io_errors_do_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.glb");
    write_glb(&good, 8 * KIB);
    let out_dir = dir.path().join("out");

    let jobs = vec![
        Job::into_dir(dir.path().join("vanished.glb"), &out_dir, 1.0),
        Job::into_dir(&good, &out_dir, 1.0),
    ];

    let optimizer = ScalingOptimizer::new(0.5);
    let mut met = Vec::new();
    let summary = run_jobs(&optimizer, jobs, &ShrinkOptions::default(), |report| {
        met.push(report.met_budget());
    });

    assert_eq!(met, [false, true]);
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.met, 1);
    assert_eq!(optimizer.calls(), 1);
}

#[test]
fn empty_directory_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let jobs = plan_dir(dir.path(), &dir.path().join("out"), 25.0).unwrap();
    assert!(jobs.is_empty());

    let optimizer = ScalingOptimizer::new(0.5);
    let summary = run_jobs(&optimizer, jobs, &ShrinkOptions::default(), |_| {});
    assert_eq!(summary, BatchSummary::default());
    assert_eq!(optimizer.calls(), 0);
}
