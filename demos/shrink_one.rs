use glb_shrink::prelude::*;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <input.glb> <output.glb> <target_mb>", args[0]);
        std::process::exit(1);
    }

    let target_mb: f64 = args[3].parse().expect("target_mb must be a number");
    let job = Job::new(&args[1], &args[2], target_mb);

    let outcome = shrink(&Gltfpack::default(), &job, &ShrinkOptions::default())
        .expect("Failed to shrink");

    if let Some(err) = &outcome.aborted {
        eprintln!("gltfpack failed: {err}");
        std::process::exit(2);
    }

    println!(
        "{} after {} passes ({} skipped): {:.2} MB",
        if outcome.met_budget { "Fits" } else { "Too big" },
        outcome.passes,
        outcome.skipped,
        outcome.size_mb
    );
}
