//! # MPMDB
//!
//! A medicinal plant knowledge base and question-answering bot.
//!
//! Six CSV tables (basic information, taxonomy, genome, proteome,
//! transcriptome and phytochemical records) are merged into one record per
//! plant. Every plant name, scientific name and alias is normalized into a
//! lookup index; free-text questions are matched against it and answered
//! with a prose summary of the matched record. Questions about no curated
//! plant fall back to an external encyclopedia, then to fixed guidance.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌────────────────┐
//! │ CSV tables │──▶│   loader   │──▶│   knowledge    │
//! │  (6 files) │   │  Datasets  │   │ PlantKnowledge │
//! └────────────┘   └─────┬──────┘   └──────┬─────────┘
//!                        │                 │ matcher + summary
//!                        ▼                 ▼
//!                  ┌───────────┐    ┌────────────┐   ┌──────────────┐
//!                  │ catalogue │    │  PlantBot  │──▶│ encyclopedia │
//!                  └─────┬─────┘    └─────┬──────┘   └──────────────┘
//!                        └───────┬────────┘
//!                        ┌───────┴───────┐
//!                        ▼               ▼
//!                   ┌─────────┐     ┌─────────┐
//!                   │   CLI   │     │  HTTP   │
//!                   │ (mpmdb) │     │ (axum)  │
//!                   └─────────┘     └─────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! mpmdb datasets                       # check the CSV files load
//! mpmdb ask "neem transcriptome"       # ask the Plant Bot
//! mpmdb search genome "azadirachta"    # list-view search
//! mpmdb serve                          # start the HTTP API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`loader`] | CSV loading |
//! | [`alias`] | Alias normalization |
//! | [`knowledge`] | Merged per-plant records and the alias index |
//! | [`matcher`] | Question → plant matching |
//! | [`summary`] | Prose summaries of a record |
//! | [`encyclopedia`] | External encyclopedia fallback |
//! | [`answer`] | The Plant Bot |
//! | [`catalogue`] | Dataset list views |
//! | [`datasets`] | Dataset and plant inventories |
//! | [`app`] | Shared application handle |
//! | [`server`] | HTTP server |

pub mod alias;
pub mod answer;
pub mod app;
pub mod catalogue;
pub mod config;
pub mod datasets;
pub mod encyclopedia;
pub mod knowledge;
pub mod loader;
pub mod matcher;
pub mod models;
pub mod server;
pub mod summary;
