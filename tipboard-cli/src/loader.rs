//! Dataset file access.
//!
//! The on-disk form is a JSON array of row objects, the same shape the
//! bundled sample ships in. Schema violations surface as `InvalidInput`
//! from the library so the runner can decline the load.

use std::path::Path;

use tipboard::{Dataset, Error as DataError, Record};

use crate::errors::Result;

/// Read and parse the rows of a dataset file.
///
/// Row validation (schema strictness, finite amounts, non-emptiness) is
/// left to the store so rejected loads leave the prior dataset live.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let contents = std::fs::read_to_string(path)?;
    let records = serde_json::from_str(&contents)
        .map_err(|e| DataError::InvalidInput(format!("malformed dataset: {e}")))?;
    Ok(records)
}

/// Read and fully validate a dataset file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    Ok(Dataset::from_records(load_records(path)?)?)
}

/// Write the bundled sample dataset to `path`.
pub fn write_sample(path: &Path) -> Result<()> {
    let dataset = Dataset::sample();
    let json = serde_json::to_string_pretty(dataset.records())?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn sample_round_trips_through_a_file() {
        let dir = std::env::temp_dir().join(format!("tipboard-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tips.json");

        write_sample(&path).unwrap();
        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.len(), Dataset::sample().len());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_dataset(Path::new("/nonexistent/tips.json")).expect_err("should fail");
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn malformed_file_reports_invalid_input() {
        let dir = std::env::temp_dir().join(format!("tipboard-loader-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tips.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_dataset(&path).expect_err("should fail");
        assert!(matches!(err, Error::Data(DataError::InvalidInput(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
