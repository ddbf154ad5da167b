//! External encyclopedia fallback.
//!
//! When a question names no curated plant, the Plant Bot asks an external
//! encyclopedia for a short summary instead. Two implementations exist:
//!
//! - **[`WikipediaClient`]** performs a MediaWiki `opensearch` request for
//!   the question text, then fetches the REST page summary of the top hit.
//! - **[`DisabledEncyclopedia`]** never answers; used for offline runs and
//!   when `encyclopedia.enabled = false`.
//!
//! Lookups never fail from the caller's point of view: network errors,
//! timeouts, non-2xx statuses and unusable JSON all become `None`, and each
//! such failure is logged at `warn` level.
//!
//! Use [`create_encyclopedia`] to pick the implementation from config:
//!
//! ```rust,no_run
//! # use mpmdb::config::EncyclopediaConfig;
//! # use mpmdb::encyclopedia::create_encyclopedia;
//! let config = EncyclopediaConfig { enabled: false, ..EncyclopediaConfig::default() };
//! let encyclopedia = create_encyclopedia(&config).unwrap();
//! assert_eq!(encyclopedia.name(), "disabled");
//! ```

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::EncyclopediaConfig;

/// A summary returned by an encyclopedia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncyclopediaSummary {
    pub title: String,
    pub extract: String,
    pub url: Option<String>,
}

/// Source of fallback summaries for uncurated topics.
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Best-effort lookup. `None` means "no usable result", whatever the cause.
    async fn lookup(&self, topic: &str) -> Option<EncyclopediaSummary>;
}

/// Builds the encyclopedia described by the configuration.
pub fn create_encyclopedia(config: &EncyclopediaConfig) -> Result<Arc<dyn Encyclopedia>> {
    if config.enabled {
        Ok(Arc::new(WikipediaClient::new(config)?))
    } else {
        Ok(Arc::new(DisabledEncyclopedia))
    }
}

// ============ Disabled ============

/// Encyclopedia that never has an answer.
pub struct DisabledEncyclopedia;

#[async_trait]
impl Encyclopedia for DisabledEncyclopedia {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn lookup(&self, _topic: &str) -> Option<EncyclopediaSummary> {
        None
    }
}

// ============ Wikipedia ============

/// Wikipedia (or any MediaWiki with the REST summary endpoint).
pub struct WikipediaClient {
    client: reqwest::Client,
    search_url: Url,
    summary_url: Url,
}

impl WikipediaClient {
    pub fn new(config: &EncyclopediaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        let search_url = Url::parse(&config.search_url)
            .map_err(|e| anyhow!("invalid encyclopedia.search_url '{}': {}", config.search_url, e))?;
        let summary_url = Url::parse(&config.summary_url).map_err(|e| {
            anyhow!(
                "invalid encyclopedia.summary_url '{}': {}",
                config.summary_url,
                e
            )
        })?;
        if summary_url.cannot_be_a_base() {
            anyhow::bail!(
                "encyclopedia.summary_url must be a hierarchical URL: {}",
                config.summary_url
            );
        }

        Ok(Self {
            client,
            search_url,
            summary_url,
        })
    }

    /// Title of the top search hit, if any.
    async fn search_title(&self, topic: &str) -> Result<Option<String>> {
        let resp = self
            .client
            .get(self.search_url.clone())
            .query(&[
                ("action", "opensearch"),
                ("search", topic),
                ("limit", "1"),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let json: Value = resp.json().await?;
        Ok(parse_search_response(&json))
    }

    async fn fetch_summary(&self, title: &str) -> Result<Option<EncyclopediaSummary>> {
        let resp = self
            .client
            .get(self.summary_page_url(title))
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        let json: Value = resp.json().await?;
        Ok(parse_summary_response(title, &json))
    }

    /// `<summary_url>/<Title_With_Underscores>`, percent-encoded as one segment.
    fn summary_page_url(&self, title: &str) -> Url {
        let mut url = self.summary_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&title.replace(' ', "_"));
        }
        url
    }

    async fn try_lookup(&self, topic: &str) -> Result<Option<EncyclopediaSummary>> {
        let Some(title) = self.search_title(topic).await? else {
            return Ok(None);
        };
        self.fetch_summary(&title).await
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn lookup(&self, topic: &str) -> Option<EncyclopediaSummary> {
        match self.try_lookup(topic).await {
            Ok(Some(summary)) => Some(summary),
            Ok(None) => {
                tracing::debug!(topic, "encyclopedia returned no usable summary");
                None
            }
            Err(e) => {
                tracing::warn!(topic, error = %format!("{:#}", e), "encyclopedia lookup failed");
                None
            }
        }
    }
}

/// Extracts the first title from an `opensearch` response:
/// `[query, [titles...], [descriptions...], [urls...]]`.
pub fn parse_search_response(json: &Value) -> Option<String> {
    json.as_array()?
        .get(1)?
        .as_array()?
        .first()?
        .as_str()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
}

/// Extracts the extract and page URL from a REST page summary.
///
/// The URL comes from `content_urls.desktop.page`, falling back to a
/// top-level `canonical` field. A missing or blank `extract` yields `None`.
pub fn parse_summary_response(title: &str, json: &Value) -> Option<EncyclopediaSummary> {
    let extract = json
        .get("extract")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|e| !e.is_empty())?;

    let url = json
        .pointer("/content_urls/desktop/page")
        .and_then(Value::as_str)
        .or_else(|| json.get("canonical").and_then(Value::as_str))
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    let title = json
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(title)
        .to_string();

    Some(EncyclopediaSummary {
        title,
        extract: extract.to_string(),
        url,
    })
}
