//! A single-layer perceptron for linearly separable binary data, plus a
//! sorted CSV training-log store.
//!
//! - Perceptron with the classic mistake-driven update rule
//! - CSV dataset loader and normal weight initialization
//! - Straight-line training driver with before/after reports
//! - Synthetic training-log generator over a pluggable store

pub mod config;
pub mod datasets;
pub mod driver;
pub mod history;
pub mod initializer;
pub mod metrics;
pub mod perceptron;
pub mod training_log;
pub mod utils;

pub use config::{Config, LogConfig, TrainingConfig};
pub use datasets::{load_examples, Example};
pub use driver::{run, run_with, TrainingRun};
pub use history::{EpochSample, NoopObserver, TrainingHistory, TrainingObserver};
pub use initializer::normal_weights;
pub use metrics::{accuracy, confusion_matrix};
pub use perceptron::{Perceptron, Prediction, TrainingOutcome};
pub use training_log::{generate, CsvLogStore, LogEntry, LogStore};
pub use utils::print_summary_table;
