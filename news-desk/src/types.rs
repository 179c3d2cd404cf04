use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
// Use the interfaces crate for the boundary types
pub use interfaces::defs::{EnrichmentState, ResultItem, SearchWindow, SelectedRecord, Verdict};

/// Shown by callers when a search ran but nothing survived classification.
pub const NO_RESULTS_MESSAGE: &str = "Nenhuma notícia encontrada com os critérios.";

/// Source label used when a feed item carries no `<source>`.
pub const DEFAULT_SOURCE_LABEL: &str = "Google News";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayKind {
    /// Body arrives as `{"contents": "..."}`.
    JsonEnvelope,
    /// Body arrives as-is.
    RawBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySpec {
    pub name: String,
    pub kind: RelayKind,
    pub endpoint: String,
    /// Query parameter that carries the target URL.
    pub param: String,
}

impl RelaySpec {
    pub fn all_origins() -> Self {
        Self {
            name: "allorigins".to_string(),
            kind: RelayKind::JsonEnvelope,
            endpoint: "https://api.allorigins.win/get".to_string(),
            param: "url".to_string(),
        }
    }

    pub fn code_tabs() -> Self {
        Self {
            name: "codetabs".to_string(),
            kind: RelayKind::RawBody,
            endpoint: "https://api.codetabs.com/v1/proxy".to_string(),
            param: "quest".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedLocale {
    pub hl: String,
    pub gl: String,
    pub ceid: String,
}

impl Default for FeedLocale {
    fn default() -> Self {
        Self {
            hl: "pt-BR".to_string(),
            gl: "BR".to_string(),
            ceid: "BR:pt-419".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub user_agent: String,
    pub relay_timeout_seconds: u64,
    pub relays: Vec<RelaySpec>,
    pub feed_search_url: String,
    pub locale: FeedLocale,
    pub shortener_url: String,
    /// Outbound links containing any of these are never taken as the
    /// resolved target of a redirect page.
    pub excluded_link_hosts: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            user_agent: "News-Desk/1.0".to_string(),
            relay_timeout_seconds: 10,
            relays: vec![RelaySpec::all_origins(), RelaySpec::code_tabs()],
            feed_search_url: "https://news.google.com/rss/search".to_string(),
            locale: FeedLocale::default(),
            shortener_url: "https://tinyurl.com/api-create.php".to_string(),
            excluded_link_hosts: vec!["google.com".to_string(), "blogger.com".to_string()],
        }
    }
}

/// One `item` as it appears in the feed. Missing fields are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub source: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEntry {
    pub title: String,
    pub link: String,
    pub pub_date: NaiveDate,
    pub pub_date_display: String,
    pub source: String,
    pub snippet: String,
    pub sortable_date: DateTime<Utc>,
}

impl NormalizedEntry {
    pub fn into_result_item(self, id: String) -> ResultItem {
        ResultItem {
            id,
            title: self.title,
            link: self.link,
            pub_date: self.pub_date,
            pub_date_display: self.pub_date_display,
            source: self.source,
            snippet: self.snippet,
            sortable_date: self.sortable_date,
        }
    }
}

/// What an enrichment task concluded for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentOutcome {
    Resolved(String),
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Falha ao buscar notícias. Tente novamente mais tarde.")]
    SearchFailed,

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
