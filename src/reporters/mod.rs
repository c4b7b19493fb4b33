//! Output writers for cefr-pos results
//!
//! Supports two file formats:
//! - `json` - pretty-printed structural dump of any result
//! - `matrix` - line-oriented `CLASSES` + one row per tag list
//!
//! plus a `text` summary of frequency reports for the terminal.

mod json;
mod matrix;
mod text;

pub use text::render_freq_report;

use crate::error::{PipelineError, PipelineResult};
use crate::matrix::PosMatrix;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// File stem shared by both forms of the POS matrix
pub const MATRIX_FILE_STEM: &str = "pos_matrix";

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Matrix,
}

/// Get the file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Matrix => "csv",
    }
}

/// Output file name of the POS matrix in a format (`pos_matrix.csv`, `pos_matrix.json`)
pub fn matrix_file_name(format: OutputFormat) -> String {
    format!("{}.{}", MATRIX_FILE_STEM, file_extension(format))
}

/// Write a POS matrix in the given format
pub fn write(matrix: &PosMatrix, destination: &Path, format: OutputFormat) -> PipelineResult<()> {
    let contents = match format {
        OutputFormat::Json => json::render(matrix)?,
        OutputFormat::Matrix => matrix::render(matrix),
    };
    write_atomic(destination, &contents)
}

/// Write any serializable result as pretty JSON
pub fn write_json<T: Serialize + ?Sized>(data: &T, destination: &Path) -> PipelineResult<()> {
    write_atomic(destination, &json::render(data)?)
}

/// Write through a temp file and rename, so readers never see a partial file
pub fn write_atomic(destination: &Path, contents: &str) -> PipelineResult<()> {
    let mut tmp_name = destination.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = destination.with_file_name(tmp_name);
    let result = fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, destination));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(PipelineError::io(destination, e));
    }
    debug!("Wrote {} ({} bytes)", destination.display(), contents.len());
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::level::{Level, LevelKey};
    use indexmap::IndexMap;

    /// A small matrix for reporter tests
    pub(crate) fn test_matrix() -> PosMatrix {
        let mut rows = IndexMap::new();
        rows.insert(
            LevelKey::Level(Level::A1),
            vec![vec!["DT".to_string(), "NN".to_string(), "VBZ".to_string()]],
        );
        rows.insert(
            LevelKey::Level(Level::B2),
            vec![vec!["NNS".to_string(), "VBP".to_string(), "RB".to_string()]],
        );
        PosMatrix {
            classes: ["DT", "NN", "VBZ", "NNS", "VBP", "RB"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows,
        }
    }

    #[test]
    fn test_matrix_file_names() {
        assert_eq!(matrix_file_name(OutputFormat::Matrix), "pos_matrix.csv");
        assert_eq!(matrix_file_name(OutputFormat::Json), "pos_matrix.json");
    }

    #[test]
    fn test_write_matrix_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(matrix_file_name(OutputFormat::Matrix));
        write(&test_matrix(), &path, OutputFormat::Matrix).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("CLASSES,DT,NN,VBZ,NNS,VBP,RB\n"));
        assert!(!dir.path().join("pos_matrix.csv.tmp").exists());
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(matrix_file_name(OutputFormat::Json));
        write(&test_matrix(), &path, OutputFormat::Json).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["CLASSES"][0], "DT");
        assert_eq!(value["B2"][0][2], "RB");
    }

    #[test]
    fn test_unwritable_destination_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(matrix_file_name(OutputFormat::Matrix));
        let err = write(&test_matrix(), &path, OutputFormat::Matrix).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
        assert!(!path.exists());
    }
}
