//! The Plant Bot: free-text question → answer.
//!
//! Resolution order, first hit wins:
//!
//! 1. **Modality guidance**: questions mentioning a data modality
//!    ("metabolomics", "rna", "protein", "genome", ...) get a fixed
//!    explanation of what the database offers for it.
//! 2. **Curated plant**: the question is matched against the knowledge
//!    index and the record is summarized, honouring the requested focus.
//! 3. **Encyclopedia**: an external summary for topics nobody curated.
//! 4. **Guidance**: a fixed message explaining how to phrase questions.
//!
//! No branch returns an error; the worst case is the step 4 message.

use std::sync::Arc;

use crate::encyclopedia::Encyclopedia;
use crate::knowledge::PlantKnowledge;
use crate::models::Answer;
use crate::summary::{summarize, Focus};

/// Keyword groups checked in order against the lowercased question.
pub const GENERAL_RESPONSES: &[(&[&str], &str)] = &[
    (
        &["metabolite", "metabolomics"],
        "MPMDB curates LC–MS/NMR supported metabolite fingerprints across alkaloids, flavonoids, terpenoids, phenolics, glycosides, and essential oils. Specify a plant and the bot will align the relevant evidence.",
    ),
    (
        &["transcript", "rna", "expression"],
        "Transcriptome dashboards summarise RNA-Seq experiments, SNP calls, and stress-condition contrasts. Ask for the transcriptomic posture of a plant to focus the response.",
    ),
    (
        &["proteome", "protein", "peptide"],
        "Proteomic dossiers surface peptide accessions, identical protein groups, and curated pathway annotations. Mention the plant name plus 'proteome' for a targeted answer.",
    ),
    (
        &["sequencing", "genome", "assembly"],
        "Use the Sequencing Bot prompts to retrieve genome assembly counts, nucleotide records, and mRNA support for each plant.",
    ),
];

pub const ENCYCLOPEDIA_LEAD_IN: &str =
    "Here's what I found after checking recent encyclopedic sources:\n";

pub const FALLBACK_MESSAGE: &str = "I could not match that request to our curated plants yet. \
Try providing the botanical or scientific name, optionally followed by \
genome/proteome/transcriptome/metabolite context. You can also ask for \
taxonomy, sequencing, or metabolite insights explicitly.";

/// Canned modality response for a question, if any keyword appears in it.
pub fn general_response(question: &str) -> Option<&'static str> {
    let lowered = question.to_lowercase();
    GENERAL_RESPONSES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, response)| *response)
}

/// Question answering over an immutable knowledge index.
#[derive(Clone)]
pub struct PlantBot {
    knowledge: Arc<PlantKnowledge>,
    encyclopedia: Arc<dyn Encyclopedia>,
}

impl PlantBot {
    pub fn new(knowledge: Arc<PlantKnowledge>, encyclopedia: Arc<dyn Encyclopedia>) -> Self {
        Self {
            knowledge,
            encyclopedia,
        }
    }

    pub fn knowledge(&self) -> &PlantKnowledge {
        &self.knowledge
    }

    pub async fn generate_answer(&self, question: &str, focus: Option<Focus>) -> Answer {
        if let Some(response) = general_response(question) {
            tracing::debug!(branch = "general", "answered with modality guidance");
            return Answer::new(response, None);
        }

        if let Some(record) = self.knowledge.match_question(question) {
            tracing::debug!(branch = "curated", plant = %record.canonical_label, "answered from knowledge index");
            return summarize(record, focus);
        }

        if let Some(summary) = self.encyclopedia.lookup(question).await {
            tracing::debug!(branch = "encyclopedia", source = self.encyclopedia.name(), title = %summary.title, "answered from encyclopedia");
            return Answer::new(
                format!("{}{}", ENCYCLOPEDIA_LEAD_IN, summary.extract),
                summary.url,
            );
        }

        tracing::debug!(branch = "fallback", "no answer found");
        Answer::new(FALLBACK_MESSAGE, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encyclopedia::{DisabledEncyclopedia, EncyclopediaSummary};
    use crate::knowledge::KnowledgeBuilder;
    use crate::models::{DatasetKind, Row};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records how often it was consulted and always answers.
    struct StubEncyclopedia {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Encyclopedia for StubEncyclopedia {
        fn name(&self) -> &str {
            "stub"
        }

        async fn lookup(&self, topic: &str) -> Option<EncyclopediaSummary> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Some(EncyclopediaSummary {
                title: topic.to_string(),
                extract: "The baobab is a long-lived tree.".to_string(),
                url: Some("https://en.wikipedia.org/wiki/Adansonia".to_string()),
            })
        }
    }

    fn knowledge() -> Arc<PlantKnowledge> {
        let mut builder = KnowledgeBuilder::new();
        let row: Row = [
            ("Plant_Name", "Neem"),
            ("Scientific_Name", "Azadirachta indica"),
            ("Nucleotide", "10"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        builder.ingest_single(DatasetKind::Genome, &[row]);
        Arc::new(builder.build())
    }

    fn offline_bot() -> PlantBot {
        PlantBot::new(knowledge(), Arc::new(DisabledEncyclopedia))
    }

    #[test]
    fn test_general_response_keyword_order() {
        assert!(general_response("Tell me about transcriptomics")
            .unwrap()
            .starts_with("Transcriptome dashboards"));
        // "metabolite" group is checked before the "protein" group.
        assert!(general_response("protein metabolite links")
            .unwrap()
            .starts_with("MPMDB curates"));
        assert!(general_response("neem").is_none());
    }

    #[tokio::test]
    async fn test_modality_question_skips_index_and_encyclopedia() {
        let stub = Arc::new(StubEncyclopedia {
            calls: AtomicUsize::new(0),
        });
        let bot = PlantBot::new(knowledge(), stub.clone());
        let answer = bot.generate_answer("Tell me about transcriptomics", None).await;
        assert!(answer.answer.starts_with("Transcriptome dashboards summarise"));
        assert!(answer.source.is_none());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_curated_plant_is_summarized() {
        let answer = offline_bot()
            .generate_answer("What about neem?", Some(Focus::Genomics))
            .await;
        assert!(answer.answer.starts_with("Genome resources: 10 nucleotide entries"));
        assert!(answer.source.is_none());
    }

    #[tokio::test]
    async fn test_unknown_plant_uses_encyclopedia() {
        let stub = Arc::new(StubEncyclopedia {
            calls: AtomicUsize::new(0),
        });
        let bot = PlantBot::new(knowledge(), stub.clone());
        let answer = bot.generate_answer("baobab", None).await;
        assert_eq!(
            answer.answer,
            "Here's what I found after checking recent encyclopedic sources:\nThe baobab is a long-lived tree."
        );
        assert_eq!(
            answer.source.as_deref(),
            Some("https://en.wikipedia.org/wiki/Adansonia")
        );
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_plant_offline_falls_back() {
        let answer = offline_bot().generate_answer("baobab", None).await;
        assert_eq!(answer.answer, FALLBACK_MESSAGE);
        assert!(answer.source.is_none());
    }

    #[tokio::test]
    async fn test_empty_question_falls_back() {
        let answer = offline_bot().generate_answer("   ", None).await;
        assert_eq!(answer, Answer::new(FALLBACK_MESSAGE, None));
    }
}
