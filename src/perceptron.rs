//! Single-layer perceptron trained with the discrete perceptron rule.
use crate::datasets::Example;
use crate::history::{NoopObserver, TrainingObserver};
use anyhow::{anyhow, bail, Result};
use std::fmt;
use tracing::{debug, info};

/// How a call to [`Perceptron::train`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOutcome {
    /// Pass `epoch` (zero-based) made no mistakes; `epoch` correcting passes preceded it.
    Converged { epoch: usize },
    /// Every allowed pass still misclassified at least one row.
    Exhausted { epochs: usize },
}

impl TrainingOutcome {
    pub fn converged(&self) -> bool {
        matches!(self, TrainingOutcome::Converged { .. })
    }
}

/// One row of a before/after comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction<'a> {
    /// Zero-based position in the dataset.
    pub index: usize,
    /// Features without the bias input.
    pub inputs: &'a [f64],
    pub outcome: u8,
    pub expected: u8,
}

impl fmt::Display for Prediction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Example {}, Inputs: {:?}, Outcome: {}, Expected: {}",
            self.index + 1,
            self.inputs,
            self.outcome,
            self.expected
        )
    }
}

#[derive(Debug, Clone)]
pub struct Perceptron {
    weights: Vec<f64>,
    /// Training rows with the bias input prepended.
    rows: Vec<Vec<f64>>,
    labels: Vec<u8>,
    learning_rate: f64,
    max_iterations: usize,
}

impl Perceptron {
    /// Build a perceptron over `examples`.
    ///
    /// `weights` holds one entry for the bias plus one per feature; every
    /// example must have exactly `weights.len() - 1` features.
    pub fn new(
        weights: Vec<f64>,
        examples: &[Example],
        learning_rate: f64,
        max_iterations: usize,
    ) -> Result<Self> {
        if examples.is_empty() {
            bail!("Cannot build a perceptron without training examples");
        }
        let mut rows = Vec::with_capacity(examples.len());
        let mut labels = Vec::with_capacity(examples.len());
        for (i, example) in examples.iter().enumerate() {
            if example.features.len() + 1 != weights.len() {
                bail!(
                    "Example {} has {} features but the weight vector expects {} (bias included)",
                    i + 1,
                    example.features.len(),
                    weights.len()
                );
            }
            let mut row = Vec::with_capacity(weights.len());
            row.push(1.0);
            row.extend_from_slice(&example.features);
            rows.push(row);
            labels.push(example.label);
        }
        Ok(Self {
            weights,
            rows,
            labels,
            learning_rate,
            max_iterations,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Number of training rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Classify a row that already carries the leading bias input.
    pub fn predict(&self, row: &[f64]) -> Result<u8> {
        if row.len() != self.weights.len() {
            return Err(anyhow!(
                "Row length {} does not match weight vector length {}",
                row.len(),
                self.weights.len()
            ));
        }
        Ok(activate(&self.weights, row))
    }

    /// Classify raw features, prepending the bias input.
    pub fn predict_features(&self, features: &[f64]) -> Result<u8> {
        let mut row = Vec::with_capacity(features.len() + 1);
        row.push(1.0);
        row.extend_from_slice(features);
        self.predict(&row)
    }

    /// Run the perceptron rule until a clean pass or the iteration cap.
    pub fn train(&mut self) -> TrainingOutcome {
        self.train_with(&mut NoopObserver)
    }

    /// Like [`train`](Self::train), reporting every pass to `observer`.
    pub fn train_with(&mut self, observer: &mut dyn TrainingObserver) -> TrainingOutcome {
        for epoch in 0..self.max_iterations {
            let errors = self.epoch();
            observer.on_epoch(epoch, &self.weights, errors);
            debug!(epoch, errors, "training pass finished");
            if errors == 0 {
                info!(epoch, weights = ?self.weights, "perceptron converged");
                return TrainingOutcome::Converged { epoch };
            }
        }
        info!(epochs = self.max_iterations, "iteration cap reached without convergence");
        TrainingOutcome::Exhausted {
            epochs: self.max_iterations,
        }
    }

    /// One pass over every row in dataset order; returns the mistake count.
    fn epoch(&mut self) -> usize {
        let mut errors = 0;
        for (row, &label) in self.rows.iter().zip(&self.labels) {
            let error = label as f64 - activate(&self.weights, row) as f64;
            if error != 0.0 {
                errors += 1;
                for (w, &x) in self.weights.iter_mut().zip(row) {
                    *w += self.learning_rate * error * x;
                }
            }
        }
        errors
    }

    /// Current prediction for every training row, recomputed on each call.
    pub fn report(&self) -> impl Iterator<Item = Prediction<'_>> + '_ {
        self.rows
            .iter()
            .zip(&self.labels)
            .enumerate()
            .map(move |(index, (row, &expected))| Prediction {
                index,
                inputs: &row[1..],
                outcome: activate(&self.weights, row),
                expected,
            })
    }
}

/// Heaviside step of the weighted sum; zero counts as firing.
fn activate(weights: &[f64], row: &[f64]) -> u8 {
    let potential: f64 = weights.iter().zip(row).map(|(&w, &x)| w * x).sum();
    (potential >= 0.0) as u8
}
