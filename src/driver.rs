//! End-to-end training run: load, initialize, report, train, report.
use crate::config::TrainingConfig;
use crate::datasets::{feature_count, load_examples};
use crate::history::TrainingObserver;
use crate::initializer::normal_weights;
use crate::metrics::accuracy;
use crate::perceptron::{Perceptron, TrainingOutcome};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;

/// Result of [`run`]: the trained model and how training ended.
#[derive(Debug)]
pub struct TrainingRun {
    pub perceptron: Perceptron,
    pub outcome: TrainingOutcome,
}

/// Run training as configured, seeding from `config.seed` or entropy.
pub fn run<W: Write>(config: &TrainingConfig, out: &mut W) -> Result<TrainingRun> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    run_with(config, &mut rng, None, out)
}

/// Run training with an explicit RNG and an optional per-pass observer.
pub fn run_with<W, R>(
    config: &TrainingConfig,
    rng: &mut R,
    observer: Option<&mut dyn TrainingObserver>,
    out: &mut W,
) -> Result<TrainingRun>
where
    W: Write,
    R: Rng + ?Sized,
{
    config.validate()?;
    let dataset = config.dataset_path.display();
    writeln!(out, "Reading the dataset located at {}", dataset)?;
    let examples = load_examples(&config.dataset_path)?;

    writeln!(
        out,
        "Initializing synaptic weights using the following distribution: gauss({},{})",
        config.mean, config.std_dev
    )?;
    let weights = normal_weights(feature_count(&examples) + 1, config.mean, config.std_dev, rng)?;
    let mut perceptron =
        Perceptron::new(weights, &examples, config.learning_rate, config.max_iterations)?;
    writeln!(
        out,
        "Created perceptron object with learning step of {} and max training iterations of {}",
        config.learning_rate, config.max_iterations
    )?;

    writeln!(out, "\nBefore training on {}:", dataset)?;
    write_report(&perceptron, out)?;

    writeln!(
        out,
        "\nStarting training with the following synaptic weights : {:?}",
        perceptron.weights()
    )?;
    let outcome = match observer {
        Some(observer) => perceptron.train_with(observer),
        None => perceptron.train(),
    };
    if let TrainingOutcome::Converged { epoch } = outcome {
        writeln!(
            out,
            "Finished training after {} iterations with the following synaptic weights : {:?}",
            epoch,
            perceptron.weights()
        )?;
    }

    writeln!(out, "\nAfter training:")?;
    write_report(&perceptron, out)?;
    writeln!(out, "Accuracy: {:.2}%", accuracy(&perceptron) * 100.0)?;

    Ok(TrainingRun {
        perceptron,
        outcome,
    })
}

fn write_report<W: Write>(perceptron: &Perceptron, out: &mut W) -> Result<()> {
    for prediction in perceptron.report() {
        writeln!(out, "{}", prediction)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::TrainingHistory;
    use std::fs;
    use std::path::Path;

    fn config_for(path: &Path, max_iterations: usize) -> TrainingConfig {
        TrainingConfig {
            dataset_path: path.to_path_buf(),
            max_iterations,
            seed: Some(42),
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn and_gate_run_converges_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("and_gate.csv");
        fs::write(&path, "x1,x2,label\n0,0,0\n0,1,0\n1,0,0\n1,1,1\n").unwrap();

        let mut out = Vec::new();
        let result = run(&config_for(&path, 5000), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(result.outcome.converged());
        assert_eq!(accuracy(&result.perceptron), 1.0);
        assert!(text.contains("gauss(0,1.2)"));
        assert!(text.contains("Before training on"));
        assert!(text.contains("Finished training after"));
        let after = text.split("After training:").nth(1).unwrap();
        assert!(after.contains("Example 4, Inputs: [1.0, 1.0], Outcome: 1, Expected: 1"));
        assert!(after.contains("Example 1, Inputs: [0.0, 0.0], Outcome: 0, Expected: 0"));
    }

    #[test]
    fn seeded_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("or_gate.csv");
        fs::write(&path, "a,b,y\n0,0,0\n0,1,1\n1,0,1\n1,1,1\n").unwrap();
        let config = config_for(&path, 100);

        let mut first = TrainingHistory::new();
        let mut second = TrainingHistory::new();
        let a = run_with(&config, &mut StdRng::seed_from_u64(9), Some(&mut first), &mut Vec::<u8>::new())
            .unwrap();
        let b = run_with(&config, &mut StdRng::seed_from_u64(9), Some(&mut second), &mut Vec::<u8>::new())
            .unwrap();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(first.samples, second.samples);
        assert_eq!(a.perceptron.weights(), b.perceptron.weights());
    }

    #[test]
    fn non_convergence_is_silent_but_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xor.csv");
        fs::write(&path, "a,b,y\n0,0,0\n0,1,1\n1,0,1\n1,1,0\n").unwrap();

        let mut out = Vec::new();
        let result = run(&config_for(&path, 25), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(result.outcome, TrainingOutcome::Exhausted { epochs: 25 });
        assert!(!text.contains("Finished training"));
        assert!(text.contains("After training:"));
    }

    #[test]
    fn missing_dataset_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("absent.csv"), 10);
        assert!(run(&config, &mut Vec::<u8>::new()).is_err());
    }
}
