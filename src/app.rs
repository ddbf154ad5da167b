//! Application wiring.
//!
//! Loads the tables once, freezes the knowledge index and hands out the
//! read-only handles used by the CLI and the HTTP server.

use anyhow::Result;
use std::sync::Arc;

use crate::answer::PlantBot;
use crate::catalogue::Catalogue;
use crate::config::Config;
use crate::encyclopedia::{create_encyclopedia, Encyclopedia};
use crate::knowledge::PlantKnowledge;
use crate::loader::Datasets;

#[derive(Clone)]
pub struct App {
    pub bot: PlantBot,
    pub catalogue: Arc<Catalogue>,
}

impl App {
    /// Loads the configured CSV files and builds every component.
    pub fn load(config: &Config) -> Result<Self> {
        let encyclopedia = create_encyclopedia(&config.encyclopedia)?;
        let datasets = Datasets::load(&config.data);
        Ok(Self::from_datasets(datasets, encyclopedia))
    }

    pub fn from_datasets(datasets: Datasets, encyclopedia: Arc<dyn Encyclopedia>) -> Self {
        let knowledge = Arc::new(PlantKnowledge::from_datasets(&datasets));
        Self {
            bot: PlantBot::new(knowledge, encyclopedia),
            catalogue: Arc::new(Catalogue::new(datasets)),
        }
    }

    pub fn knowledge(&self) -> &PlantKnowledge {
        self.bot.knowledge()
    }
}
