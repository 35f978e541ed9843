//! Dataset loading for labeled binary examples stored as CSV.
use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One labeled row of the dataset: numeric features followed by a 0/1 label.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub features: Vec<f64>,
    pub label: u8,
}

impl Example {
    pub fn new(features: Vec<f64>, label: u8) -> Result<Self> {
        if label > 1 {
            bail!("Label must be 0 or 1, got {}", label);
        }
        Ok(Self { features, label })
    }
}

/// Load comma-separated examples with a header row from `path`.
///
/// Every data row must hold the same number of numeric columns, the last of
/// which is the binary label. Any unreadable or malformed row aborts the load.
pub fn load_examples<P: AsRef<Path>>(path: P) -> Result<Vec<Example>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| anyhow!("Failed to open {}: {}", path.display(), e))?;
    read_examples(file).with_context(|| format!("Invalid dataset {}", path.display()))
}

/// Parse examples from any reader holding CSV text with a header row.
pub fn read_examples<R: Read>(reader: R) -> Result<Vec<Example>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut examples = Vec::new();
    let mut width = None;

    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| anyhow!("CSV parse error: {}", e))?;
        let line = row + 2;
        let expected = *width.get_or_insert(record.len());
        if record.len() != expected {
            bail!("Row {} has {} columns, expected {}", line, record.len(), expected);
        }
        if record.len() < 2 {
            bail!("Row {} needs at least one feature and a label", line);
        }
        examples.push(parse_example(&record).with_context(|| format!("Row {}", line))?);
    }
    if examples.is_empty() {
        return Err(anyhow!("No examples loaded"));
    }
    Ok(examples)
}

fn parse_example(record: &StringRecord) -> Result<Example> {
    let values = record
        .iter()
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| anyhow!("Not a number: {:?}", s))
        })
        .collect::<Result<Vec<f64>>>()?;
    let (label, features) = values
        .split_last()
        .ok_or_else(|| anyhow!("Empty row"))?;
    let label = match *label {
        l if l == 0.0 => 0,
        l if l == 1.0 => 1,
        other => bail!("Label must be 0 or 1, got {}", other),
    };
    Example::new(features.to_vec(), label)
}

/// Number of feature columns shared by every example.
pub fn feature_count(examples: &[Example]) -> usize {
    examples.first().map_or(0, |e| e.features.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_and_gate() {
        let csv = "x1,x2,label\n0,0,0\n0,1,0\n1,0,0\n1,1,1\n";
        let examples = read_examples(csv.as_bytes()).unwrap();
        assert_eq!(examples.len(), 4);
        assert_eq!(examples[3].features, vec![1.0, 1.0]);
        assert_eq!(examples[3].label, 1);
        assert_eq!(feature_count(&examples), 2);
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let csv = "x1,x2,label\n0,abc,0\n";
        let err = read_examples(csv.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("Not a number"));
    }

    #[test]
    fn rejects_non_binary_labels() {
        let csv = "x1,label\n0.5,2\n";
        assert!(read_examples(csv.as_bytes()).is_err());
    }

    #[test]
    fn rejects_ragged_rows() {
        let csv = "x1,x2,label\n0,0,0\n1,1\n";
        assert!(read_examples(csv.as_bytes()).is_err());
    }

    #[test]
    fn rejects_empty_dataset() {
        assert!(read_examples("x1,label\n".as_bytes()).is_err());
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_examples(dir.path().join("nope.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a,b,y\n1,0,1\n0,1,0").unwrap();
        let examples = load_examples(file.path()).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[1].label, 0);
    }
}
