//! CSV loading with pre-flight file checks.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Reject files starting with a UTF-16 byte order mark.
///
/// A UTF-8 BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        match buffer {
            [0xFF, 0xFE] => {
                return Err(IngestError::UnsupportedEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-16 LE",
                });
            }
            [0xFE, 0xFF] => {
                return Err(IngestError::UnsupportedEncoding {
                    path: path.to_path_buf(),
                    encoding: "UTF-16 BE",
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Fail with [`IngestError::EmptyCsv`] when the file has no header line.
pub fn ensure_header(path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let line = line.strip_prefix('\u{feff}').unwrap_or(&line);
    if line.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Validate the column names polars parsed from the header.
pub fn validate_column_names(df: &DataFrame, path: &Path) -> Result<()> {
    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Read a CSV file into a `DataFrame` after size, encoding and header checks.
///
/// A file with a header and no data rows yields an empty frame.
pub fn read_csv_frame(path: &Path, max_size: u64) -> Result<DataFrame> {
    check_file_size(path, max_size)?;
    validate_encoding(path)?;
    ensure_header(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    validate_column_names(&df, path)?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read CSV"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_ensure_header_accepts_bom() {
        let file = create_temp_csv("\u{feff}patient_id,facility_id\r\nP001,F001\n".as_bytes());
        assert!(ensure_header(file.path()).is_ok());
    }

    #[test]
    fn test_ensure_header_empty_file() {
        let file = create_temp_csv(b"");
        let result = ensure_header(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_quoted_comma_in_header() {
        let file = create_temp_csv(b"\"cost, usd\",patient_id\n10.5,P001\n");
        let df = read_csv_frame(file.path(), MAX_CSV_FILE_SIZE).unwrap();
        assert_eq!(df.width(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["cost, usd", "patient_id"]);
    }

    #[test]
    fn test_blank_column_name_rejected() {
        let df = DataFrame::new(vec![
            Series::new("patient_id".into(), vec!["P001"]).into_column(),
            Series::new(" ".into(), vec!["x"]).into_column(),
        ])
        .unwrap();
        let result = validate_column_names(&df, Path::new("in.csv"));
        assert!(matches!(result, Err(IngestError::EmptyColumnName { .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'p', 0]);
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_size_limit() {
        let file = create_temp_csv(b"a,b\n1,2\n");
        assert!(check_file_size(file.path(), 1024).is_ok());
        let result = check_file_size(file.path(), 4);
        assert!(matches!(
            result,
            Err(IngestError::FileTooLarge { max_size: 4, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_csv_frame(Path::new("/nonexistent/encounters.csv"), MAX_CSV_FILE_SIZE);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_csv_frame() {
        let file = create_temp_csv(b"A,B,C\n1,2,3\n4,5,6\n");
        let df = read_csv_frame(file.path(), MAX_CSV_FILE_SIZE).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
    }
}
