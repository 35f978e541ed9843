//! Metrics for evaluating a trained perceptron on its training rows.
use crate::perceptron::Perceptron;

/// Fraction of training rows whose prediction matches the label.
pub fn accuracy(model: &Perceptron) -> f64 {
    if model.is_empty() {
        return 0.0;
    }
    let correct = model.report().filter(|p| p.outcome == p.expected).count();
    correct as f64 / model.len() as f64
}

/// 2x2 confusion matrix indexed `[expected][predicted]`.
pub fn confusion_matrix(model: &Perceptron) -> [[usize; 2]; 2] {
    let mut cm = [[0; 2]; 2];
    for p in model.report() {
        cm[p.expected as usize][p.outcome as usize] += 1;
    }
    cm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::Example;
    use float_cmp::approx_eq;

    fn and_gate() -> Vec<Example> {
        vec![
            Example::new(vec![0.0, 0.0], 0).unwrap(),
            Example::new(vec![0.0, 1.0], 0).unwrap(),
            Example::new(vec![1.0, 0.0], 0).unwrap(),
            Example::new(vec![1.0, 1.0], 1).unwrap(),
        ]
    }

    #[test]
    fn zero_weights_predict_all_ones() {
        let p = Perceptron::new(vec![0.0; 3], &and_gate(), 1.0, 1).unwrap();
        assert!(approx_eq!(f64, accuracy(&p), 0.25, ulps = 2));
        assert_eq!(confusion_matrix(&p), [[0, 3], [0, 1]]);
    }

    #[test]
    fn perfect_fit() {
        let p = Perceptron::new(vec![-1.5, 1.0, 1.0], &and_gate(), 1.0, 1).unwrap();
        assert!(approx_eq!(f64, accuracy(&p), 1.0, ulps = 2));
        assert_eq!(confusion_matrix(&p), [[3, 0], [0, 1]]);
    }
}
