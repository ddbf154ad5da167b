//! Search-filtered list views over the six tables.
//!
//! Each table is searched on its own set of columns with a
//! case-insensitive substring test. An empty query lists nothing; the
//! page still carries the full `(Plant_Name, Scientific_Name)` catalogue so
//! a client can offer browsing.

use anyhow::Result;
use serde::Serialize;

use crate::loader::Datasets;
use crate::models::{field, DatasetKind, Row};

/// Columns searched for a dataset's list view.
pub fn search_columns(kind: DatasetKind) -> &'static [&'static str] {
    match kind {
        DatasetKind::Basic => &["Plant_Name", "Scientific_Name", "Description"],
        DatasetKind::Classification => &[
            "Plant_Name",
            "Scientific_Name",
            "NCBI_Taxonomy_ID",
            "Family",
            "Genus",
            "Species",
        ],
        DatasetKind::Genome => &["Plant_Name", "Scientific_Name", "Nucleotide"],
        DatasetKind::Proteome => &["Plant_Name", "Scientific_Name", "Protein"],
        DatasetKind::Transcript => &[
            "Plant_Name",
            "Scientific_Name",
            "SRA",
            "BioProject",
            "BioSample",
        ],
        DatasetKind::Phyto => &[
            "Plant_Name",
            "Scientific_Name",
            "Phytochemicals",
            "Plant_Part",
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogueEntry {
    pub plant_name: String,
    pub scientific_name: String,
}

/// One rendered list view.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<'a> {
    pub dataset: DatasetKind,
    pub query: String,
    pub result_count: usize,
    pub results: Vec<&'a Row>,
    pub catalogue: Vec<CatalogueEntry>,
}

/// Read-only list views backed by the loaded tables.
pub struct Catalogue {
    datasets: Datasets,
}

impl Catalogue {
    pub fn new(datasets: Datasets) -> Self {
        Self { datasets }
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    /// Rows of `kind` matching `query`, ordered by `Plant_Name`.
    pub fn search(&self, kind: DatasetKind, query: &str) -> ListPage<'_> {
        let query = query.trim();
        let rows = self.datasets.rows(kind);

        let mut results: Vec<&Row> = if query.is_empty() {
            Vec::new()
        } else {
            let needle = query.to_lowercase();
            let columns = search_columns(kind);
            rows.iter()
                .filter(|row| {
                    columns
                        .iter()
                        .any(|column| field(row, column).to_lowercase().contains(&needle))
                })
                .collect()
        };
        results.sort_by(|a, b| field(a, "Plant_Name").cmp(field(b, "Plant_Name")));

        ListPage {
            dataset: kind,
            query: query.to_string(),
            result_count: results.len(),
            results,
            catalogue: self.catalogue(kind),
        }
    }

    /// All `(Plant_Name, Scientific_Name)` pairs of a table, by plant name.
    pub fn catalogue(&self, kind: DatasetKind) -> Vec<CatalogueEntry> {
        let mut entries: Vec<CatalogueEntry> = self
            .datasets
            .rows(kind)
            .iter()
            .map(|row| CatalogueEntry {
                plant_name: field(row, "Plant_Name").to_string(),
                scientific_name: field(row, "Scientific_Name").to_string(),
            })
            .collect();
        entries.sort_by(|a, b| a.plant_name.cmp(&b.plant_name));
        entries
    }
}

/// Runs a list-view search and prints it for `mpmdb search`.
///
/// Output is `results: N` followed by one line per row: plant name,
/// scientific name in parentheses, then the remaining non-empty columns.
pub fn run_search(catalogue: &Catalogue, kind: DatasetKind, query: &str) -> Result<()> {
    let page = catalogue.search(kind, query);
    println!("results: {}", page.result_count);
    for row in &page.results {
        let rest: Vec<String> = row
            .iter()
            .filter(|(column, value)| {
                column.as_str() != "Plant_Name"
                    && column.as_str() != "Scientific_Name"
                    && !value.trim().is_empty()
            })
            .map(|(column, value)| format!("{}={}", column, value.trim()))
            .collect();
        println!(
            "{} ({})  {}",
            field(row, "Plant_Name"),
            field(row, "Scientific_Name"),
            rest.join(" | ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn catalogue() -> Catalogue {
        Catalogue::new(Datasets::from_rows([
            (
                DatasetKind::Transcript,
                vec![
                    row(&[("Plant_Name", "Tulsi"), ("Scientific_Name", "Ocimum tenuiflorum"), ("SRA", "SRR100")]),
                    row(&[("Plant_Name", "Amla"), ("Scientific_Name", "Phyllanthus emblica"), ("BioProject", "PRJNA7")]),
                    row(&[("Plant_Name", "Clove"), ("Scientific_Name", "Syzygium aromaticum"), ("Description", "srr in a non-searched column")]),
                ],
            ),
            (
                DatasetKind::Classification,
                vec![row(&[("Plant_Name", "Neem"), ("Family", "Meliaceae"), ("NCBI_Taxonomy_ID", "124943")])],
            ),
        ]))
    }

    #[test]
    fn test_empty_query_lists_nothing_but_keeps_catalogue() {
        let cat = catalogue();
        let page = cat.search(DatasetKind::Transcript, "   ");
        assert_eq!(page.result_count, 0);
        assert!(page.results.is_empty());
        let names: Vec<&str> = page.catalogue.iter().map(|e| e.plant_name.as_str()).collect();
        assert_eq!(names, vec!["Amla", "Clove", "Tulsi"]);
    }

    #[test]
    fn test_case_insensitive_search_on_listed_columns() {
        let cat = catalogue();
        let page = cat.search(DatasetKind::Transcript, "srr");
        assert_eq!(page.result_count, 1);
        assert_eq!(page.results[0]["Plant_Name"], "Tulsi");

        let page = cat.search(DatasetKind::Transcript, "prjna");
        assert_eq!(page.results[0]["Plant_Name"], "Amla");
    }

    #[test]
    fn test_results_ordered_by_plant_name() {
        let cat = catalogue();
        let page = cat.search(DatasetKind::Transcript, "i");
        let names: Vec<&str> = page.results.iter().map(|r| field(r, "Plant_Name")).collect();
        assert_eq!(names, vec!["Amla", "Clove", "Tulsi"]);
    }

    #[test]
    fn test_taxonomy_id_and_family_searchable() {
        let cat = catalogue();
        assert_eq!(cat.search(DatasetKind::Classification, "124943").result_count, 1);
        assert_eq!(cat.search(DatasetKind::Classification, "meliac").result_count, 1);
        assert_eq!(cat.search(DatasetKind::Genome, "neem").result_count, 0);
    }
}
