//! Free-text question → plant record resolution.
//!
//! Scoring per alias:
//! - alias is a substring of the normalized question: the alias length
//!   (longer names are more specific, so "holy basil" beats "basil");
//! - otherwise: the number of whitespace tokens shared with the question.
//!
//! The highest score wins. Ties go to the alias registered first, which
//! makes the result stable for a given set of input files.

use std::collections::HashSet;

use crate::alias::normalize;
use crate::knowledge::PlantKnowledge;
use crate::models::Record;

/// Best-scoring record for a question.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub key: &'a str,
    pub alias: &'a str,
    pub score: usize,
    pub record: &'a Record,
}

impl PlantKnowledge {
    pub fn best_match(&self, question: &str) -> Option<Match<'_>> {
        let norm_question = normalize(question);
        if norm_question.is_empty() {
            return None;
        }
        let tokens: HashSet<&str> = norm_question.split_whitespace().collect();

        let mut best: Option<(&str, &str, usize)> = None;
        for (alias, key) in self.aliases() {
            if alias.is_empty() {
                continue;
            }
            let score = if norm_question.contains(alias) {
                alias.chars().count()
            } else {
                alias
                    .split_whitespace()
                    .collect::<HashSet<_>>()
                    .intersection(&tokens)
                    .count()
            };
            if score > best.map_or(0, |(_, _, s)| s) {
                best = Some((alias, key, score));
            }
        }

        let (alias, key, score) = best?;
        let record = self.record(key)?;
        tracing::debug!(question, alias, key, score, "matched question to plant");
        Some(Match {
            key,
            alias,
            score,
            record,
        })
    }

    /// Record for the best-scoring alias, or `None` when nothing overlaps.
    pub fn match_question(&self, question: &str) -> Option<&Record> {
        self.best_match(question).map(|m| m.record)
    }
}
