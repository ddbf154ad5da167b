//! CSV loading.
//!
//! Reads the six configured tables into memory once. A missing file is an
//! empty table; an unreadable one is logged and also treated as empty, so a
//! single bad export never keeps the rest of the database offline.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::DataConfig;
use crate::models::{DatasetKind, Row};

/// Reads a headed CSV file into rows keyed by column name.
///
/// Returns an empty vector when `path` does not exist. Rows shorter than
/// the header simply lack the trailing columns; fully blank rows are skipped.
pub fn read_csv(path: &Path) -> Result<Vec<Row>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read CSV headers: {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read row {} of {}", line + 1, path.display()))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Outcome of loading one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Ok,
    Missing,
    Unreadable,
}

impl LoadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoadStatus::Ok => "OK",
            LoadStatus::Missing => "MISSING",
            LoadStatus::Unreadable => "UNREADABLE",
        }
    }
}

struct Table {
    path: PathBuf,
    status: LoadStatus,
    rows: Vec<Row>,
}

/// All six tables as loaded at startup.
pub struct Datasets {
    tables: IndexMap<DatasetKind, Table>,
    loaded_at: DateTime<Utc>,
}

impl Datasets {
    /// Loads every configured table. Never fails: problems degrade to
    /// empty tables and are recorded in [`Datasets::status`].
    pub fn load(config: &DataConfig) -> Self {
        let mut tables = IndexMap::new();

        for kind in DatasetKind::ALL {
            let path = config.path_for(kind);
            let (status, rows) = if !path.exists() {
                tracing::info!(dataset = %kind, path = %path.display(), "dataset file missing, using zero rows");
                (LoadStatus::Missing, Vec::new())
            } else {
                match read_csv(&path) {
                    Ok(rows) => {
                        tracing::info!(dataset = %kind, rows = rows.len(), "loaded dataset");
                        (LoadStatus::Ok, rows)
                    }
                    Err(e) => {
                        tracing::warn!(dataset = %kind, error = %format!("{:#}", e), "unreadable dataset, using zero rows");
                        (LoadStatus::Unreadable, Vec::new())
                    }
                }
            };
            tables.insert(kind, Table { path, status, rows });
        }

        Self {
            tables,
            loaded_at: Utc::now(),
        }
    }

    /// Builds datasets from in-memory rows; kinds not given are empty.
    pub fn from_rows(rows: impl IntoIterator<Item = (DatasetKind, Vec<Row>)>) -> Self {
        let mut given: IndexMap<DatasetKind, Vec<Row>> = rows.into_iter().collect();
        let tables = DatasetKind::ALL
            .into_iter()
            .map(|kind| {
                let rows = given.swap_remove(&kind).unwrap_or_default();
                let table = Table {
                    path: PathBuf::new(),
                    status: LoadStatus::Ok,
                    rows,
                };
                (kind, table)
            })
            .collect();

        Self {
            tables,
            loaded_at: Utc::now(),
        }
    }

    pub fn rows(&self, kind: DatasetKind) -> &[Row] {
        self.tables
            .get(&kind)
            .map(|t| t.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn status(&self, kind: DatasetKind) -> LoadStatus {
        self.tables
            .get(&kind)
            .map(|t| t.status)
            .unwrap_or(LoadStatus::Missing)
    }

    pub fn path(&self, kind: DatasetKind) -> Option<&Path> {
        self.tables.get(&kind).map(|t| t.path.as_path())
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let rows = read_csv(&tmp.path().join("nope.csv")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_reads_rows_by_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("basic_info.csv");
        fs::write(
            &path,
            "Plant_Name,Scientific_Name,Description\n\
             Neem,Azadirachta indica,\"Bitter, evergreen tree\"\n\
             ,,\n\
             Tulsi,Ocimum tenuiflorum\n",
        )
        .unwrap();

        let rows = read_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Description"], "Bitter, evergreen tree");
        assert_eq!(rows[1]["Scientific_Name"], "Ocimum tenuiflorum");
        assert!(rows[1].get("Description").is_none());
    }

    #[test]
    fn test_headers_are_trimmed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("class.csv");
        fs::write(&path, " Plant_Name , Family \nNeem,Meliaceae\n").unwrap();
        let rows = read_csv(&path).unwrap();
        assert_eq!(rows[0]["Family"], "Meliaceae");
    }

    #[test]
    fn test_load_degrades_per_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("genome.csv"),
            "Plant_Name,Nucleotide\nNeem,120\n",
        )
        .unwrap();
        fs::write(tmp.path().join("proteome.csv"), b"Plant_Name\n\xff\xfe\n").unwrap();

        let config = DataConfig {
            root: tmp.path().to_path_buf(),
            ..DataConfig::default()
        };
        let datasets = Datasets::load(&config);

        assert_eq!(datasets.status(DatasetKind::Genome), LoadStatus::Ok);
        assert_eq!(datasets.rows(DatasetKind::Genome).len(), 1);
        assert_eq!(datasets.status(DatasetKind::Basic), LoadStatus::Missing);
        assert_eq!(datasets.status(DatasetKind::Proteome), LoadStatus::Unreadable);
        assert!(datasets.rows(DatasetKind::Proteome).is_empty());
    }

    #[test]
    fn test_from_rows_fills_all_kinds() {
        let mut row = Row::new();
        row.insert("Plant_Name".into(), "Neem".into());
        let datasets = Datasets::from_rows([(DatasetKind::Phyto, vec![row])]);
        assert_eq!(datasets.rows(DatasetKind::Phyto).len(), 1);
        assert!(datasets.rows(DatasetKind::Basic).is_empty());
        assert_eq!(datasets.status(DatasetKind::Basic), LoadStatus::Ok);
    }
}
