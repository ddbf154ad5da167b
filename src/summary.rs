//! Natural-language summaries of a plant record.
//!
//! A summary is a sequence of sections (introduction, basic descriptors,
//! taxonomy, genome, proteome, transcriptome, phytochemicals) joined into one
//! paragraph, plus the references collected while rendering them. An
//! optional [`Focus`] moves one omics or taxonomy layer to the front.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::models::{field, Answer, DatasetKind, Record, Row};

const MAX_ALIASES: usize = 3;
const MAX_COMPOUNDS: usize = 3;

/// Section a summary sentence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    General,
    Basic,
    Classification,
    Genome,
    Proteome,
    Transcript,
    Phyto,
}

/// Layer a caller wants discussed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    Genomics,
    Proteomics,
    Transcriptomics,
    Taxonomy,
}

impl Focus {
    /// Case-insensitive, whitespace-tolerant parse. Anything unrecognized
    /// means "no focus" rather than an error.
    pub fn parse(value: &str) -> Option<Focus> {
        match value.trim().to_lowercase().as_str() {
            "genomics" => Some(Focus::Genomics),
            "proteomics" => Some(Focus::Proteomics),
            "transcriptomics" => Some(Focus::Transcriptomics),
            "taxonomy" => Some(Focus::Taxonomy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::Genomics => "genomics",
            Focus::Proteomics => "proteomics",
            Focus::Transcriptomics => "transcriptomics",
            Focus::Taxonomy => "taxonomy",
        }
    }

    /// Sections promoted by this focus.
    pub fn sections(&self) -> &'static [SectionKind] {
        match self {
            Focus::Genomics => &[SectionKind::Genome],
            Focus::Proteomics => &[SectionKind::Proteome],
            Focus::Transcriptomics => &[SectionKind::Transcript],
            Focus::Taxonomy => &[SectionKind::Classification],
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub text: String,
}

/// Rendered sections in their natural order, plus collected references.
#[derive(Debug, Clone, Default)]
pub struct Sections {
    pub sections: Vec<Section>,
    pub references: BTreeSet<String>,
}

impl Sections {
    fn push(&mut self, kind: SectionKind, text: impl Into<String>) {
        self.sections.push(Section {
            kind,
            text: text.into(),
        });
    }

    fn reference(&mut self, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.references.insert(value.to_string());
        }
    }

    /// Section texts with the focused sections first.
    ///
    /// When the record has none of the focused sections, a notice saying so
    /// leads instead. Relative order is otherwise preserved.
    pub fn ordered(&self, focus: Option<Focus>) -> Vec<String> {
        let Some(focus) = focus else {
            return self.sections.iter().map(|s| s.text.clone()).collect();
        };

        let promoted = focus.sections();
        let (first, rest): (Vec<&Section>, Vec<&Section>) = self
            .sections
            .iter()
            .partition(|s| promoted.contains(&s.kind));

        let mut ordered: Vec<String> = first.into_iter().map(|s| s.text.clone()).collect();
        if ordered.is_empty() {
            ordered.push(format!(
                "No curated {} dataset yet inside MPMDB. Consider contributing data or cross-checking NCBI.",
                focus
            ));
        }
        ordered.extend(rest.into_iter().map(|s| s.text.clone()));
        ordered
    }
}

/// Renders every section the record has data for.
pub fn build_sections(record: &Record) -> Sections {
    let mut out = Sections::default();
    let datasets = &record.datasets;

    out.push(SectionKind::General, introduction(record));

    if let Some(basic) = datasets.single(DatasetKind::Basic) {
        basic_sections(basic, &mut out);
    }
    if let Some(classification) = datasets.single(DatasetKind::Classification) {
        let lineage: Vec<&str> = ["Order", "Family", "Genus", "Species"]
            .into_iter()
            .map(|column| field(classification, column))
            .filter(|value| !value.is_empty())
            .collect();
        if !lineage.is_empty() {
            out.push(
                SectionKind::Classification,
                format!("Taxonomy · {}", lineage.join(" → ")),
            );
        }
        out.reference(field(classification, "NCBI_link"));
    }
    if let Some(genome) = datasets.single(DatasetKind::Genome) {
        out.push(
            SectionKind::Genome,
            format!(
                "Genome resources: {} nucleotide entries, {} genome assemblies, and {} mRNA sequences curated via NCBI.",
                count(genome, "Nucleotide"),
                count(genome, "Genome_Sequence"),
                count(genome, "mRNA_Sequence"),
            ),
        );
        out.reference(field(genome, "NCBI_link"));
    }
    if let Some(proteome) = datasets.single(DatasetKind::Proteome) {
        out.push(
            SectionKind::Proteome,
            format!(
                "Proteome coverage: {} protein sequences, {} identical protein groups, {} peptide identifications.",
                count(proteome, "Protein_Seq"),
                count(proteome, "Identical_Protein_Groups"),
                count(proteome, "Protein"),
            ),
        );
        out.reference(field(proteome, "NCBI_link"));
    }
    if let Some(transcript) = datasets.single(DatasetKind::Transcript) {
        out.push(
            SectionKind::Transcript,
            format!(
                "Transcriptomics: {} SRA runs with {} DNA and {} RNA libraries across {} BioProjects / {} BioSamples.",
                count(transcript, "SRA"),
                count(transcript, "DNA"),
                count(transcript, "RNA"),
                count(transcript, "BioProject"),
                count(transcript, "BioSample"),
            ),
        );
        out.reference(field(transcript, "NCBI_link"));
    }
    phyto_section(datasets.phyto(), &mut out);

    out
}

/// Full answer for a record: focused section order plus sorted references.
pub fn summarize(record: &Record, focus: Option<Focus>) -> Answer {
    let sections = build_sections(record);

    let answer = sections
        .ordered(focus)
        .iter()
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let source = if sections.references.is_empty() {
        None
    } else {
        Some(
            sections
                .references
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("; "),
        )
    };

    Answer { answer, source }
}

fn introduction(record: &Record) -> String {
    let label = if record.canonical_label.is_empty() {
        "This plant"
    } else {
        record.canonical_label.as_str()
    };

    let mut intro = if record.scientific_label.is_empty() {
        label.to_string()
    } else {
        format!("{} ({})", label, record.scientific_label)
    };

    let shown: Vec<&str> = record
        .aliases
        .iter()
        .take(MAX_ALIASES)
        .map(String::as_str)
        .collect();
    if !shown.is_empty() {
        intro.push_str(" aka ");
        intro.push_str(&shown.join(", "));
        if record.aliases.len() > MAX_ALIASES {
            intro.push('…');
        }
    }

    intro.push_str(" is curated inside MPMDB.");
    intro
}

fn basic_sections(basic: &Row, out: &mut Sections) {
    let description = field(basic, "Description");
    if !description.is_empty() {
        out.push(SectionKind::Basic, description);
    }
    for (column, prefix) in [
        ("Chemical_Properties", "Chemistry focus"),
        ("Medicinal_Value", "Therapeutic evidence"),
        ("Morphological_Features", "Morphology"),
        ("Worldwide_regions_Support_their_Growth", "Geography"),
    ] {
        let value = field(basic, column);
        if !value.is_empty() {
            out.push(SectionKind::Basic, format!("{}: {}", prefix, value));
        }
    }
    out.reference(field(basic, "References"));
}

/// First few distinct compounds, e.g. `Quercetin (activity 5, leaf)`.
fn phyto_section(rows: &[Row], out: &mut Sections) {
    let mut compounds = Vec::new();
    let mut seen = BTreeSet::new();

    for row in rows {
        let compound = field(row, "Phytochemicals");
        if compound.is_empty() || !seen.insert(compound) {
            continue;
        }
        let activity = non_empty_or(field(row, "Activity_Count"), "NA");
        let part = non_empty_or(field(row, "Plant_Part"), "various tissues").to_lowercase();
        compounds.push(format!("{} (activity {}, {})", compound, activity, part));

        // The last compound shown contributes no reference.
        if compounds.len() == MAX_COMPOUNDS {
            break;
        }
        out.reference(field(row, "References"));
    }

    if !compounds.is_empty() {
        out.push(
            SectionKind::Phyto,
            format!("Highlighted phytochemicals: {}.", compounds.join("; ")),
        );
    }
}

fn count<'a>(row: &'a Row, column: &str) -> &'a str {
    non_empty_or(field(row, column), "0")
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}
