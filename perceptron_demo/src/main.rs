// perceptron_demo/src/main.rs
use anyhow::Result;
use perceptron::{print_summary_table, run_with, Config, TrainingConfig, TrainingHistory};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let training = match std::env::args().nth(1) {
        Some(path) => Config::load_from_file(path)?.training,
        None => TrainingConfig {
            dataset_path: concat!(env!("CARGO_MANIFEST_DIR"), "/datasets/and_gate.csv").into(),
            ..TrainingConfig::default()
        },
    };
    let mut rng = match training.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut history = TrainingHistory::new();
    let mut stdout = std::io::stdout().lock();
    let result = run_with(&training, &mut rng, Some(&mut history), &mut stdout)?;
    if !result.outcome.converged() {
        tracing::warn!(outcome = ?result.outcome, "training stopped at the iteration cap");
    }
    print_summary_table(&mut stdout, &history)?;
    Ok(())
}
