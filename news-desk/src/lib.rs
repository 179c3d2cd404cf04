pub mod types;
pub mod config;
pub mod traits;
pub mod utils;
pub mod fetcher;
pub mod parser;
pub mod query;
pub mod classifier;
pub mod dedup;
pub mod aggregator;
pub mod enrichment;
pub mod state;

pub use types::*;
pub use config::KeywordSets;
pub use traits::{ContentFetcher, Relay};
pub use fetcher::ProxyFetcher;
pub use parser::FeedParser;
pub use classifier::RelevanceClassifier;
pub use aggregator::QueryAggregator;
pub use enrichment::LinkEnricher;
pub use state::{ReportState, Selection};
