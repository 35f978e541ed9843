//! Synthetic training-log rows and the sorted CSV file they are merged into.
//!
//! The CSV store is rewritten wholesale on every append: the file is read,
//! the new row is added, everything is re-sorted by iteration and written
//! back. There is no file locking, so two processes appending to the same
//! store at once can lose rows.
use crate::utils::{dot, round2};
use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rand::Rng;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const HEADER: [&str; 6] = [
    "",
    "Iteration",
    "Weights",
    "Variables",
    "Obtained_value",
    "Expected_value",
];

/// One logged training step.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub iteration: u64,
    pub weights: Vec<f64>,
    pub variables: Vec<f64>,
    pub obtained_value: f64,
    pub expected_value: f64,
}

impl LogEntry {
    pub fn new(
        iteration: u64,
        weights: Vec<f64>,
        variables: Vec<f64>,
        obtained_value: f64,
        expected_value: f64,
    ) -> Result<Self> {
        if iteration == 0 {
            bail!("Log iterations start at 1");
        }
        // JSON has no encoding for NaN or infinities, so they could not be read back.
        let finite = |xs: &[f64]| xs.iter().all(|x| x.is_finite());
        if !finite(&weights)
            || !finite(&variables)
            || !obtained_value.is_finite()
            || !expected_value.is_finite()
        {
            bail!("Log entry {} holds a non-finite value", iteration);
        }
        Ok(Self {
            iteration,
            weights,
            variables,
            obtained_value,
            expected_value,
        })
    }

    /// Random entry mimicking one step of a two-input perceptron.
    pub fn random<R: Rng + ?Sized>(iteration: u64, rng: &mut R) -> Result<Self> {
        let weights: Vec<f64> = (0..2).map(|_| round2(rng.gen_range(-1.0..=1.0))).collect();
        let variables: Vec<f64> = (0..2).map(|_| round2(rng.gen_range(0.0..=1.0))).collect();
        let obtained_value = round2(dot(&weights, &variables)?);
        let expected_value = round2(obtained_value + rng.gen_range(-0.5..=0.5));
        Self::new(iteration, weights, variables, obtained_value, expected_value)
    }

    fn to_record(&self, index: usize) -> Result<Vec<String>> {
        Ok(vec![
            index.to_string(),
            self.iteration.to_string(),
            serde_json::to_string(&self.weights)?,
            serde_json::to_string(&self.variables)?,
            self.obtained_value.to_string(),
            self.expected_value.to_string(),
        ])
    }

    fn from_record(record: &StringRecord) -> Result<Self> {
        if record.len() != HEADER.len() {
            bail!("Expected {} columns, found {}", HEADER.len(), record.len());
        }
        let iteration = record[1]
            .parse()
            .map_err(|_| anyhow!("Bad iteration {:?}", &record[1]))?;
        let weights = serde_json::from_str(&record[2])
            .with_context(|| format!("Bad weights {:?}", &record[2]))?;
        let variables = serde_json::from_str(&record[3])
            .with_context(|| format!("Bad variables {:?}", &record[3]))?;
        let obtained_value = record[4]
            .parse()
            .map_err(|_| anyhow!("Bad obtained value {:?}", &record[4]))?;
        let expected_value = record[5]
            .parse()
            .map_err(|_| anyhow!("Bad expected value {:?}", &record[5]))?;
        Self::new(iteration, weights, variables, obtained_value, expected_value)
    }
}

/// Where log entries are kept.
pub trait LogStore {
    fn append(&mut self, entry: LogEntry) -> Result<()>;
    /// All entries, ordered by iteration; rows sharing an iteration keep stored order.
    fn load(&self) -> Result<Vec<LogEntry>>;
}

/// Semicolon-separated file with a leading index column, kept sorted by iteration.
#[derive(Debug, Clone)]
pub struct CsvLogStore {
    path: PathBuf,
}

impl CsvLogStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the store with `entries`, leaving the old file intact on failure.
    fn write_all(&self, entries: &[LogEntry]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
        let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(tmp);
        wtr.write_record(HEADER)?;
        for (index, entry) in entries.iter().enumerate() {
            wtr.write_record(entry.to_record(index)?)?;
        }
        let mut tmp = wtr
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush {}: {}", self.path.display(), e.error()))?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| anyhow!("Failed to replace {}: {}", self.path.display(), e.error))?;
        Ok(())
    }
}

impl LogStore for CsvLogStore {
    fn append(&mut self, entry: LogEntry) -> Result<()> {
        let mut entries = if self.path.is_file() {
            self.load()?
        } else {
            Vec::new()
        };
        entries.push(entry);
        // Stable: rows sharing an iteration keep file order, the new row last.
        entries.sort_by_key(|e| e.iteration);
        self.write_all(&entries)?;
        debug!(path = %self.path.display(), rows = entries.len(), "rewrote training log");
        Ok(())
    }

    fn load(&self) -> Result<Vec<LogEntry>> {
        let file = File::open(&self.path)
            .map_err(|e| anyhow!("Failed to open {}: {}", self.path.display(), e))?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .from_reader(file);
        let mut entries = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| anyhow!("CSV parse error: {}", e))?;
            let entry = LogEntry::from_record(&record)
                .with_context(|| format!("{} row {}", self.path.display(), row + 2))?;
            entries.push(entry);
        }
        entries.sort_by_key(|e| e.iteration);
        Ok(entries)
    }
}

/// Append `count` random entries, iterations 1 through `count`, one write each.
pub fn generate<S, R>(count: u64, store: &mut S, rng: &mut R) -> Result<()>
where
    S: LogStore + ?Sized,
    R: Rng + ?Sized,
{
    for iteration in 1..=count {
        store.append(LogEntry::random(iteration, rng)?)?;
    }
    info!(count, "generated training log entries");
    Ok(())
}
