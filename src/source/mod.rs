//! Identifier source: reads document identifiers from a delimited table

use crate::config::SourceConfig;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Cannot open {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("Malformed input in {path}: {source}")]
    Parse { path: PathBuf, source: csv::Error },

    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Opaque token naming one target document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Reads identifiers in file order from the configured column
#[derive(Debug, Clone)]
pub struct IdentifierSource {
    path: PathBuf,
    delimiter: u8,
    column: String,
}

impl IdentifierSource {
    pub fn new(path: impl Into<PathBuf>, delimiter: u8, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            delimiter,
            column: column.into(),
        }
    }

    /// Build from validated config (delimiter is a single ASCII byte)
    pub fn from_config(config: &SourceConfig) -> Self {
        let delimiter = config.delimiter.as_bytes().first().copied().unwrap_or(b';');
        Self::new(&config.path, delimiter, config.id_column.trim())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Vec<Identifier>> {
        let file = std::fs::File::open(&self.path).map_err(|source| SourceError::Open {
            path: self.path.clone(),
            source,
        })?;

        self.read_from(file)
    }

    pub fn read_from<R: io::Read>(&self, reader: R) -> Result<Vec<Identifier>> {
        let parse_err = |source| SourceError::Parse {
            path: self.path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let column = reader
            .headers()
            .map_err(parse_err)?
            .iter()
            .position(|name| name.trim_start_matches('\u{feff}') == self.column)
            .ok_or_else(|| SourceError::MissingColumn {
                path: self.path.clone(),
                column: self.column.clone(),
            })?;

        let mut identifiers = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(parse_err)?;

            match record.get(column) {
                Some(value) if !value.is_empty() => identifiers.push(Identifier::new(value)),
                _ => warn!(row = row + 1, column = %self.column, "Skipping row without identifier"),
            }
        }

        debug!(path = %self.path.display(), count = identifiers.len(), "Identifiers loaded");

        Ok(identifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn source() -> IdentifierSource {
        IdentifierSource::new("directorio.csv", b';', "RBD")
    }

    #[test]
    fn test_reads_column_in_file_order() {
        let input = "AGNO;RBD;NOM_RBD\n2023;101;Escuela A\n2023;202;Escuela B\n2023;101;Escuela A bis\n";

        let ids = source().read_from(input.as_bytes()).unwrap();

        let ids: Vec<&str> = ids.iter().map(Identifier::as_str).collect();
        assert_eq!(ids, vec!["101", "202", "101"]);
    }

    #[test]
    fn test_skips_blank_identifiers_and_trims() {
        let input = "RBD;NOM\n 7 ;a\n;b\n8;c\n";

        let ids = source().read_from(input.as_bytes()).unwrap();

        assert_eq!(ids, vec![Identifier::from(7), Identifier::from(8)]);
    }

    #[test]
    fn test_missing_column() {
        let input = "AGNO;NOM_RBD\n2023;Escuela\n";

        let err = source().read_from(input.as_bytes()).unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn { ref column, .. } if column == "RBD"));
    }

    #[test]
    fn test_ragged_rows_are_a_parse_error() {
        let input = "AGNO;RBD\n2023;101\n2023;202;extra\n";

        let err = source().read_from(input.as_bytes()).unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_comma_file_read_with_semicolon_misses_column() {
        let input = "AGNO,RBD\n2023,101\n";

        let err = source().read_from(input.as_bytes()).unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn { .. }));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = IdentifierSource::new(temp_dir.path().join("absent.csv"), b';', "RBD");

        assert!(matches!(source.read().unwrap_err(), SourceError::Open { .. }));
    }

    #[test]
    fn test_read_from_disk_with_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ids.csv");
        fs::write(&path, "\u{feff}RBD;X\n42;y\n").unwrap();

        let config = SourceConfig {
            path: path.clone(),
            ..SourceConfig::default()
        };

        let ids = IdentifierSource::from_config(&config).read().unwrap();
        assert_eq!(ids, vec![Identifier::from("42")]);
    }
}
