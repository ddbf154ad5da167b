//! Core data models shared by the loader, the knowledge index, the list
//! views and the Plant Bot.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// One CSV row keyed by header name, in file column order.
pub type Row = IndexMap<String, String>;

/// Returns the trimmed value of `column`, or `""` when the column is absent.
pub fn field<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).map(|v| v.trim()).unwrap_or("")
}

/// The six source tables merged per plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Basic,
    Classification,
    Genome,
    Proteome,
    Transcript,
    Phyto,
}

impl DatasetKind {
    /// Ingestion order. The first row seen for a plant sets its labels, so
    /// this order decides which table names a plant.
    pub const ALL: [DatasetKind; 6] = [
        DatasetKind::Basic,
        DatasetKind::Classification,
        DatasetKind::Genome,
        DatasetKind::Proteome,
        DatasetKind::Transcript,
        DatasetKind::Phyto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Basic => "basic",
            DatasetKind::Classification => "classification",
            DatasetKind::Genome => "genome",
            DatasetKind::Proteome => "proteome",
            DatasetKind::Transcript => "transcript",
            DatasetKind::Phyto => "phyto",
        }
    }

    /// Phytochemical tables hold many rows per plant; every other table
    /// holds at most one.
    pub fn is_multi_row(&self) -> bool {
        matches!(self, DatasetKind::Phyto)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(DatasetKind::Basic),
            "classification" | "taxonomy" => Ok(DatasetKind::Classification),
            "genome" | "genomes" => Ok(DatasetKind::Genome),
            "proteome" => Ok(DatasetKind::Proteome),
            "transcript" | "transcriptome" => Ok(DatasetKind::Transcript),
            "phyto" | "phytochemical" | "metabolites" => Ok(DatasetKind::Phyto),
            other => anyhow::bail!(
                "unknown dataset: '{}'. Use basic, classification, genome, proteome, transcript, or phyto.",
                other
            ),
        }
    }
}

/// Per-plant rows, one slot per single-row table plus the phytochemical list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordDatasets {
    single: HashMap<DatasetKind, Row>,
    phyto: Vec<Row>,
}

impl RecordDatasets {
    pub fn single(&self, kind: DatasetKind) -> Option<&Row> {
        self.single.get(&kind)
    }

    pub fn phyto(&self) -> &[Row] {
        &self.phyto
    }

    /// Kinds that hold at least one row, in ingestion order.
    pub fn kinds(&self) -> Vec<DatasetKind> {
        DatasetKind::ALL
            .into_iter()
            .filter(|kind| {
                if kind.is_multi_row() {
                    !self.phyto.is_empty()
                } else {
                    self.single.contains_key(kind)
                }
            })
            .collect()
    }

    pub(crate) fn set_single(&mut self, kind: DatasetKind, row: Row) {
        self.single.insert(kind, row);
    }

    pub(crate) fn push_phyto(&mut self, row: Row) {
        self.phyto.push(row);
    }
}

/// Everything known about one plant, merged across all tables.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Record {
    pub canonical_label: String,
    pub scientific_label: String,
    /// Raw alias strings; sorted so summaries list them deterministically.
    pub aliases: BTreeSet<String>,
    pub datasets: RecordDatasets,
}

/// Reply returned to the CLI and HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub answer: String,
    pub source: Option<String>,
}

impl Answer {
    pub fn new(answer: impl Into<String>, source: Option<String>) -> Self {
        Self {
            answer: answer.into(),
            source,
        }
    }
}
