// perceptron_demo/src/bin/generate_log.rs
use anyhow::Result;
use perceptron::{generate, Config, CsvLogStore, LogConfig, LogStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let log = match std::env::args().nth(1) {
        Some(path) => Config::load_from_file(path)?.log,
        None => LogConfig::default(),
    };
    let mut rng = match log.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut store = CsvLogStore::new(&log.path);
    generate(log.rows as u64, &mut store, &mut rng)?;
    let entries = store.load()?;
    println!("{} now holds {} rows", store.path().display(), entries.len());
    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        println!("Iterations {} to {}", first.iteration, last.iteration);
    }
    Ok(())
}
