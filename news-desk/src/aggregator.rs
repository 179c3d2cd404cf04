use crate::classifier::RelevanceClassifier;
use crate::dedup::deduplicate_and_rank;
use crate::parser::FeedParser;
use crate::query::{default_templates, search_url, time_filter, QueryTemplate};
use crate::traits::ContentFetcher;
use crate::types::{FeedLocale, PipelineConfig, PipelineError, RawEntry, Result, ResultItem, SearchWindow, Verdict};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use url::Url;

/// Runs the full search: every query in parallel, then filter, classify,
/// dedup and rank. Nothing is cached between calls.
pub struct QueryAggregator {
    fetcher: Arc<dyn ContentFetcher>,
    parser: FeedParser,
    classifier: RelevanceClassifier,
    templates: Vec<QueryTemplate>,
    feed_search_url: String,
    locale: FeedLocale,
}

impl QueryAggregator {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, classifier: RelevanceClassifier, config: &PipelineConfig) -> Self {
        Self {
            fetcher,
            parser: FeedParser::new(),
            classifier,
            templates: default_templates(),
            feed_search_url: config.feed_search_url.clone(),
            locale: config.locale.clone(),
        }
    }

    pub fn with_templates(mut self, templates: Vec<QueryTemplate>) -> Self {
        self.templates = templates;
        self
    }

    pub async fn search(&self, window: &SearchWindow) -> Result<Vec<ResultItem>> {
        if let (Some(start), Some(end)) = (window.start, window.end) {
            if start > end {
                warn!("Search window starts after it ends ({} > {}), nothing can match", start, end);
            }
        }

        let now = Utc::now();
        let filter = time_filter(window);
        let urls = self
            .templates
            .iter()
            .map(|template| search_url(&self.feed_search_url, &self.locale, &template.render(&filter)))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| {
                error!("Could not build search queries: {}", e);
                PipelineError::SearchFailed
            })?;

        info!("Dispatching {} queries with filter '{}'", urls.len(), filter);

        let queries = self
            .templates
            .iter()
            .zip(urls)
            .map(|(template, url)| self.run_query(template, url));
        let per_query: Vec<Vec<RawEntry>> = join_all(queries).await;

        let raw_count: usize = per_query.iter().map(Vec::len).sum();
        let mut out_of_window = 0usize;
        let mut accepted = 0usize;

        let classified: Vec<_> = per_query
            .into_iter()
            .flatten()
            .map(|raw| self.parser.normalize(raw, now))
            .filter(|entry| {
                let inside = window.contains(entry.pub_date);
                if !inside {
                    out_of_window += 1;
                }
                inside
            })
            .map(|entry| {
                let verdict = self.classifier.classify(&entry);
                if verdict == Verdict::Accept {
                    accepted += 1;
                }
                (entry, verdict)
            })
            .collect();

        let items = deduplicate_and_rank(classified);

        info!(
            "Search finished: {} raw entries, {} outside window, {} accepted, {} after dedup",
            raw_count,
            out_of_window,
            accepted,
            items.len()
        );
        if items.is_empty() {
            info!("No matching items for the given criteria");
        }

        Ok(items)
    }

    async fn run_query(&self, template: &QueryTemplate, url: Url) -> Vec<RawEntry> {
        match self.fetcher.fetch(url.as_str()).await {
            Some(content) => {
                let entries = self.parser.parse_feed(&content);
                debug!("Query {} returned {} entries", template.name, entries.len());
                entries
            }
            None => {
                warn!("Query {} returned no content", template.name);
                Vec::new()
            }
        }
    }
}
