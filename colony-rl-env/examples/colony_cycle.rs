//! Example: Pheromone learning cycles in the sandbox

use colony_rl_core::{JsonDocumentStore, PheromoneParams, PheromoneStore};
use colony_rl_env::{CycleRunner, SandboxConfig, SandboxEnv};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Pheromone memory lives in a shared JSON document
    let memory_path = std::env::temp_dir()
        .join("colony_rl_demo")
        .join("memory.json");
    let snapshots = JsonDocumentStore::new(&memory_path);

    let store = PheromoneStore::with_snapshots(
        PheromoneParams::default(),
        Box::new(snapshots.clone()),
    );
    let env = SandboxEnv::new(SandboxConfig {
        seed: Some(7),
        ..SandboxConfig::default()
    });

    let mut runner = CycleRunner::new(store, env);
    runner.set_heuristic([("optimize_energy", 1.1)].into_iter().collect());

    // Run learning cycles
    let num_cycles = 10;
    let report = runner.run(num_cycles)?;

    for outcome in &report.outcomes {
        println!(
            "Cycle {}: action '{}' -> reward {:.2} (tau {:.3})",
            outcome.cycle, outcome.action, outcome.reward, outcome.tau
        );
    }

    // Print statistics
    println!("\n{}", runner.metrics().summary());
    println!("Total reward over {} cycles: {:.2}", num_cycles, report.total_reward);

    // Persist the learning metrics next to the pheromone table
    snapshots.save_metrics(&runner.metrics().snapshot())?;
    println!("Memory document: {}", memory_path.display());

    Ok(())
}
