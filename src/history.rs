//! Per-epoch training observation.

/// Receives the state of the model after every training pass.
pub trait TrainingObserver {
    fn on_epoch(&mut self, epoch: usize, weights: &[f64], errors: usize);
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TrainingObserver for NoopObserver {
    fn on_epoch(&mut self, _epoch: usize, _weights: &[f64], _errors: usize) {}
}

/// Snapshot taken at the end of one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochSample {
    pub epoch: usize,
    pub weights: Vec<f64>,
    pub errors: usize,
}

/// Records every pass, e.g. to plot or tabulate the trajectory afterwards.
#[derive(Debug, Clone, Default)]
pub struct TrainingHistory {
    pub samples: Vec<EpochSample>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Misclassification count of each pass, in order.
    pub fn errors(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.errors).collect()
    }
}

impl TrainingObserver for TrainingHistory {
    fn on_epoch(&mut self, epoch: usize, weights: &[f64], errors: usize) {
        self.samples.push(EpochSample {
            epoch,
            weights: weights.to_vec(),
            errors,
        });
    }
}
