//! Small numeric and reporting helpers.
use crate::history::TrainingHistory;
use anyhow::{bail, Result};
use std::io::{self, Write};

/// Round half away from zero to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Dot product of two equally long vectors.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        bail!("Cannot take the dot product of lengths {} and {}", a.len(), b.len());
    }
    Ok(a.iter().zip(b).map(|(&x, &y)| x * y).sum())
}

/// Write a short table of misclassifications per training pass.
pub fn print_summary_table<W: Write>(out: &mut W, history: &TrainingHistory) -> io::Result<()> {
    writeln!(out, "\nTraining Errors Summary Table:")?;
    writeln!(out, "+----------------+----------+")?;
    writeln!(out, "| Iteration      | Errors   |")?;
    writeln!(out, "+----------------+----------+")?;
    for sample in &history.samples {
        writeln!(out, "| {:<14} | {:>8} |", sample.epoch, sample.errors)?;
    }
    writeln!(out, "+----------------+----------+")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::TrainingObserver;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(0.123), 0.12);
        assert_eq!(round2(-0.456), -0.46);
        assert_eq!(round2(1.0), 1.0);
    }

    #[test]
    fn dot_product() {
        assert_eq!(dot(&[1.0, 2.0], &[3.0, -1.0]).unwrap(), 1.0);
    }

    #[test]
    fn dot_rejects_length_mismatch() {
        assert!(dot(&[1.0, 2.0], &[3.0]).is_err());
    }

    #[test]
    fn summary_lists_each_pass() {
        let mut history = TrainingHistory::new();
        history.on_epoch(0, &[0.0], 2);
        history.on_epoch(1, &[1.0], 0);
        let mut out = Vec::new();
        print_summary_table(&mut out, &history).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("| 0              |        2 |"));
        assert!(text.contains("| 1              |        0 |"));
    }
}
