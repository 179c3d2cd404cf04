use crate::traits::ContentFetcher;
use crate::types::{EnrichmentOutcome, PipelineConfig, Result};
use crate::utils::url::is_http_url;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Replaces a tracking link with its shortened canonical target.
pub struct LinkEnricher {
    fetcher: Arc<dyn ContentFetcher>,
    shortener: Url,
    excluded_hosts: Vec<String>,
}

impl LinkEnricher {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            shortener: Url::parse(&config.shortener_url)?,
            excluded_hosts: config.excluded_link_hosts.clone(),
        })
    }

    /// Resolve, then shorten. A fetch that yields nothing at either step ends
    /// the run as `Failed`.
    pub async fn enrich(&self, link: &str) -> EnrichmentOutcome {
        let Some(resolved) = self.resolve(link).await else {
            warn!("Could not fetch {} for resolution", link);
            return EnrichmentOutcome::Failed;
        };

        let Some(shortened) = self.shorten(&resolved).await else {
            warn!("Shortener unreachable for {}", resolved);
            return EnrichmentOutcome::Failed;
        };

        info!("Enriched {} -> {}", link, shortened);
        EnrichmentOutcome::Resolved(shortened)
    }

    /// Canonical target of `link`, or `link` itself when the page names none.
    /// `None` only when the page could not be fetched.
    pub async fn resolve(&self, link: &str) -> Option<String> {
        let document = self.fetcher.fetch(link).await?;
        let target = resolve_target(&document, link, &self.excluded_hosts);
        if target.is_none() {
            debug!("No canonical or outbound link in {}, keeping it", link);
        }
        Some(target.unwrap_or_else(|| link.to_string()))
    }

    /// Shortened form of `long_url`. A malformed shortener answer keeps
    /// `long_url`; `None` only when nothing came back.
    pub async fn shorten(&self, long_url: &str) -> Option<String> {
        let mut request = self.shortener.clone();
        request.query_pairs_mut().append_pair("url", long_url);

        let body = self.fetcher.fetch(request.as_str()).await?;
        let candidate = body.trim();
        if is_http_url(candidate) {
            Some(candidate.to_string())
        } else {
            debug!("Shortener answered with a non-URL, keeping {}", long_url);
            Some(long_url.to_string())
        }
    }
}

/// `<link rel="canonical">` first, then the first absolute outbound anchor
/// whose href mentions none of `excluded_hosts`.
pub fn resolve_target(html: &str, base: &str, excluded_hosts: &[String]) -> Option<String> {
    let document = Html::parse_document(html);
    let canonical_selector = Selector::parse(r#"link[rel="canonical"]"#).unwrap();
    let anchor_selector = Selector::parse("a[href]").unwrap();
    let base = Url::parse(base).ok();

    let canonical = document
        .select(&canonical_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .find_map(|href| absolutize(base.as_ref(), href));
    if canonical.is_some() {
        return canonical;
    }

    document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .find(|href| href.starts_with("http") && !excluded_hosts.iter().any(|host| href.contains(host.as_str())))
        .map(|href| href.to_string())
}

fn absolutize(base: Option<&Url>, href: &str) -> Option<String> {
    if is_http_url(href) {
        return Some(href.to_string());
    }
    base.and_then(|b| b.join(href).ok()).map(|u| u.to_string())
}
