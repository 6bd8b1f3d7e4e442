use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use glb_shrink::{
    batch::status_line,
    config::{GLTFPACK_BIN, GLTFPACK_ENV, TARGET_MB_DEFAULT},
    prelude::*,
};
use tracing::info;

/// Shrink .glb files to <= target size via gltfpack.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input .glb file or directory
    input: PathBuf,

    /// Output file/dir (default: *_optimized.glb or <dir>_optimized)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Size budget in megabytes
    #[arg(short, long, default_value_t = TARGET_MB_DEFAULT, value_parser = parse_target_mb)]
    target_mb: f64,

    /// gltfpack binary to run
    #[arg(long, env = GLTFPACK_ENV, default_value = GLTFPACK_BIN)]
    gltfpack: PathBuf,

    /// Accept optimizer output without checking it is a valid glb container
    #[arg(long, default_value_t = false)]
    no_verify: bool,
}

fn parse_target_mb(s: &str) -> Result<f64, String> {
    let mb: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if mb.is_finite() && mb > 0.0 {
        Ok(mb)
    } else {
        Err(format!("target must be a positive number of megabytes, got {s}"))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let optimizer = Gltfpack::new(&args.gltfpack);
    let options = ShrinkOptions {
        verify_output: !args.no_verify,
        ..Default::default()
    };
    info!(
        gltfpack = %optimizer.bin().display(),
        target_mb = args.target_mb,
        verify = options.verify_output,
        "glb-shrink starting"
    );

    if args.input.is_file() {
        let job = match args.output {
            Some(output) => Job::new(&args.input, output, args.target_mb),
            None => Job::beside(&args.input, args.target_mb),
        };
        let outcome = shrink(&optimizer, &job, &options)
            .with_context(|| format!("failed to shrink {}", job.input.display()))?;
        println!(
            "{}",
            status_line(
                outcome.met_budget,
                &job.output.display().to_string(),
                outcome.size_mb
            )
        );
    } else if args.input.is_dir() {
        let out_dir = match args.output {
            Some(dir) => dir,
            None => {
                let cwd = std::env::current_dir().context("failed to read current directory")?;
                default_output_dir(&args.input, &cwd)
            }
        };
        let jobs = plan_dir(&args.input, &out_dir, args.target_mb)
            .with_context(|| format!("failed to prepare {}", args.input.display()))?;
        if jobs.is_empty() {
            info!(dir = %args.input.display(), "no .glb files found");
        }
        run_jobs(&optimizer, jobs, &options, |report| {
            println!("{}", report.status_line(false));
        });
    } else {
        bail!("input {} does not exist", args.input.display());
    }

    Ok(())
}
