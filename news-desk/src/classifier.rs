use crate::config::KeywordSets;
use crate::types::{NormalizedEntry, Verdict};
use std::sync::Arc;

/// Keyword relevance policy for the target region.
///
/// The verdict depends only on the entry's title, snippet and source label:
///
/// 1. any blacklist term rejects, whatever else matches;
/// 2. otherwise a security term is required;
/// 3. together with either a location term or a local outlet name.
#[derive(Clone)]
pub struct RelevanceClassifier {
    keywords: Arc<KeywordSets>,
}

impl RelevanceClassifier {
    /// Terms that are not already lowercase are normalized here.
    pub fn new(keywords: Arc<KeywordSets>) -> Self {
        if keywords.is_lowercased() {
            return Self { keywords };
        }
        Self {
            keywords: Arc::new(keywords.as_ref().clone().lowercased()),
        }
    }

    pub fn classify(&self, entry: &NormalizedEntry) -> Verdict {
        self.classify_text(&entry.title, &entry.snippet, &entry.source)
    }

    pub fn classify_text(&self, title: &str, snippet: &str, source: &str) -> Verdict {
        let text = format!("{} {}", title, snippet).to_lowercase();

        if contains_any(&text, &self.keywords.blacklist) {
            return Verdict::Reject;
        }

        let is_security = contains_any(&text, &self.keywords.security_terms);
        let is_local_source = contains_any(&text, &self.keywords.local_sources)
            || contains_any(&source.to_lowercase(), &self.keywords.local_sources);
        let has_location = contains_any(&text, &self.keywords.location_terms);

        if is_security && (has_location || is_local_source) {
            Verdict::Accept
        } else {
            Verdict::Reject
        }
    }
}

fn contains_any(text: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| text.contains(term.as_str()))
}
