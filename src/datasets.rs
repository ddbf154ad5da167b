//! Dataset and plant inventories for `mpmdb datasets`, `mpmdb plants` and
//! the matching HTTP endpoints.

use anyhow::Result;
use serde::Serialize;

use crate::knowledge::PlantKnowledge;
use crate::loader::{Datasets, LoadStatus};
use crate::models::DatasetKind;

#[derive(Debug, Clone, Serialize)]
pub struct DatasetStatus {
    pub dataset: DatasetKind,
    pub file: String,
    pub rows: usize,
    pub status: LoadStatus,
}

pub fn get_dataset_statuses(datasets: &Datasets) -> Vec<DatasetStatus> {
    DatasetKind::ALL
        .into_iter()
        .map(|kind| DatasetStatus {
            dataset: kind,
            file: datasets
                .path(kind)
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            rows: datasets.rows(kind).len(),
            status: datasets.status(kind),
        })
        .collect()
}

pub fn list_datasets(datasets: &Datasets) -> Result<()> {
    println!("{:<16} {:<12} {:>6}  FILE", "DATASET", "STATUS", "ROWS");
    for s in get_dataset_statuses(datasets) {
        println!(
            "{:<16} {:<12} {:>6}  {}",
            s.dataset.as_str(),
            s.status.label(),
            s.rows,
            s.file
        );
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct PlantSummary {
    pub key: String,
    pub label: String,
    pub scientific_name: String,
    pub aliases: Vec<String>,
    pub datasets: Vec<DatasetKind>,
}

pub fn get_plant_summaries(knowledge: &PlantKnowledge) -> Vec<PlantSummary> {
    knowledge
        .records()
        .map(|(key, record)| PlantSummary {
            key: key.to_string(),
            label: record.canonical_label.clone(),
            scientific_name: record.scientific_label.clone(),
            aliases: record.aliases.iter().cloned().collect(),
            datasets: record.datasets.kinds(),
        })
        .collect()
}

pub fn list_plants(knowledge: &PlantKnowledge) -> Result<()> {
    if knowledge.is_empty() {
        println!("No plants loaded.");
        return Ok(());
    }
    for plant in get_plant_summaries(knowledge) {
        let kinds: Vec<&str> = plant.datasets.iter().map(|k| k.as_str()).collect();
        println!(
            "{} ({}) [{}]",
            plant.label,
            if plant.scientific_name.is_empty() {
                "-"
            } else {
                plant.scientific_name.as_str()
            },
            kinds.join(", ")
        );
    }
    println!("{} plants, {} aliases", knowledge.len(), knowledge.alias_count());
    Ok(())
}
