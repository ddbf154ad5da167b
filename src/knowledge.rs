//! In-memory knowledge index over the CSV tables.
//!
//! Every row from every table is attached to one [`Record`] per plant. Rows
//! are routed by a canonical key derived from their `Plant_Name` (or
//! `Scientific_Name`) column, and every name variant seen along the way is
//! registered in an alias index that points back at that key.
//!
//! The index is assembled by a [`KnowledgeBuilder`] and then frozen into a
//! [`PlantKnowledge`], which exposes no mutating API and can be shared
//! across request handlers behind an `Arc`.
//!
//! # Label precedence
//!
//! The first row that creates a record sets its display labels; later rows
//! only fill labels that are still empty. Because tables are ingested in
//! [`DatasetKind::ALL`] order, the basic-info table names a plant whenever
//! it lists it. Two tables that spell the same plant differently therefore
//! resolve in favour of whichever is ingested first.

use indexmap::IndexMap;

use crate::alias::{canonical_key, normalize, split_aliases};
use crate::config::DataConfig;
use crate::loader::Datasets;
use crate::models::{field, DatasetKind, Record, Row};

const PLANT_NAME: &str = "Plant_Name";
const SCIENTIFIC_NAME: &str = "Scientific_Name";

/// Mutable index used only while ingesting.
#[derive(Debug, Default)]
pub struct KnowledgeBuilder {
    records: IndexMap<String, Record>,
    alias_index: IndexMap<String, String>,
}

impl KnowledgeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds or creates the record for a plant and registers all of its
    /// name variants. Returns the record's canonical key.
    pub fn ensure_record(&mut self, plant_name: &str, scientific_name: &str) -> String {
        let plant_name = plant_name.trim();
        let scientific_name = scientific_name.trim();

        let label_source = if !plant_name.is_empty() {
            plant_name
        } else if !scientific_name.is_empty() {
            scientific_name
        } else {
            "Plant"
        };
        let key = canonical_key(label_source);

        let pretty_label = if !plant_name.is_empty() {
            split_aliases(plant_name).next().unwrap_or(plant_name)
        } else {
            label_source
        };

        let record = self.records.entry(key.clone()).or_insert_with(|| Record {
            canonical_label: pretty_label.to_string(),
            scientific_label: scientific_name.to_string(),
            ..Record::default()
        });

        if record.canonical_label.is_empty() && !plant_name.is_empty() {
            record.canonical_label = plant_name.to_string();
        }
        if record.scientific_label.is_empty() && !scientific_name.is_empty() {
            record.scientific_label = scientific_name.to_string();
        }

        for alias in split_aliases(plant_name).chain(split_aliases(scientific_name)) {
            let norm = normalize(alias);
            if norm.is_empty() {
                continue;
            }
            self.alias_index.insert(norm, key.clone());
            record.aliases.insert(alias.to_string());
        }

        key
    }

    /// Attaches each row to its plant as that plant's only entry for `kind`.
    /// A later row for the same plant replaces an earlier one.
    pub fn ingest_single(&mut self, kind: DatasetKind, rows: &[Row]) {
        for row in rows {
            let key = self.ensure_record(field(row, PLANT_NAME), field(row, SCIENTIFIC_NAME));
            if let Some(record) = self.records.get_mut(&key) {
                record.datasets.set_single(kind, row.clone());
            }
        }
    }

    /// Appends each phytochemical row to its plant's compound list.
    pub fn ingest_phyto(&mut self, rows: &[Row]) {
        for row in rows {
            let key = self.ensure_record(field(row, PLANT_NAME), field(row, SCIENTIFIC_NAME));
            if let Some(record) = self.records.get_mut(&key) {
                record.datasets.push_phyto(row.clone());
            }
        }
    }

    /// Ingests all tables in [`DatasetKind::ALL`] order.
    pub fn ingest_all(&mut self, datasets: &Datasets) {
        for kind in DatasetKind::ALL {
            let rows = datasets.rows(kind);
            if rows.is_empty() {
                continue;
            }
            if kind.is_multi_row() {
                self.ingest_phyto(rows);
            } else {
                self.ingest_single(kind, rows);
            }
        }
    }

    pub fn build(self) -> PlantKnowledge {
        tracing::info!(
            plants = self.records.len(),
            aliases = self.alias_index.len(),
            "knowledge index built"
        );
        PlantKnowledge {
            records: self.records,
            alias_index: self.alias_index,
        }
    }
}

/// Frozen knowledge index.
///
/// Both maps keep insertion order, so iteration (and therefore match
/// tie-breaking) is reproducible for a given set of input files.
#[derive(Debug, Default)]
pub struct PlantKnowledge {
    records: IndexMap<String, Record>,
    alias_index: IndexMap<String, String>,
}

impl PlantKnowledge {
    /// Reads the configured CSV files and builds the index.
    /// Missing or unreadable files contribute no rows.
    pub fn load(config: &DataConfig) -> Self {
        Self::from_datasets(&Datasets::load(config))
    }

    pub fn from_datasets(datasets: &Datasets) -> Self {
        let mut builder = KnowledgeBuilder::new();
        builder.ingest_all(datasets);
        builder.build()
    }

    pub fn record(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    /// Canonical key an alias resolves to, after normalization.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.alias_index.get(&normalize(alias)).map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// `(normalized alias, canonical key)` pairs in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.alias_index
            .iter()
            .map(|(a, k)| (a.as_str(), k.as_str()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn alias_count(&self) -> usize {
        self.alias_index.len()
    }
}
