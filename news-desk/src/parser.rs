use crate::types::{NormalizedEntry, RawEntry, DEFAULT_SOURCE_LABEL};
use crate::utils::time;
use chrono::{DateTime, Utc};
use scraper::Html;
use tracing::{debug, warn};

/// Turns feed documents into entries. Never fails: anything it cannot read
/// becomes zero entries.
pub struct FeedParser {
    default_source: String,
}

impl FeedParser {
    pub fn new() -> Self {
        Self {
            default_source: DEFAULT_SOURCE_LABEL.to_string(),
        }
    }

    pub fn parse_feed(&self, content: &str) -> Vec<RawEntry> {
        if !Self::looks_like_markup(content) {
            debug!("Skipping non-markup feed content ({} bytes)", content.len());
            return Vec::new();
        }

        let channel = match rss::Channel::read_from(leading_trimmed(content).as_bytes()) {
            Ok(channel) => channel,
            Err(e) => {
                warn!("Feed parse error: {}", e);
                return Vec::new();
            }
        };

        let entries: Vec<RawEntry> = channel
            .items()
            .iter()
            .map(|item| RawEntry {
                title: item.title().unwrap_or_default().to_string(),
                link: item.link().unwrap_or_default().to_string(),
                pub_date: item.pub_date().unwrap_or_default().to_string(),
                source: item
                    .source()
                    .and_then(|s| s.title())
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(self.default_source.as_str())
                    .to_string(),
                description: item.description().unwrap_or_default().to_string(),
            })
            .collect();

        debug!("Parsed feed with {} entries", entries.len());
        entries
    }

    /// Normalize one entry. `now` stands in for timestamps that do not parse.
    pub fn normalize(&self, raw: RawEntry, now: DateTime<Utc>) -> NormalizedEntry {
        let sortable_date = time::parse_feed_timestamp(&raw.pub_date).unwrap_or(now);
        let pub_date = time::local_date(sortable_date);

        NormalizedEntry {
            title: headline(&raw.title),
            link: raw.link,
            pub_date,
            pub_date_display: time::format_display(pub_date),
            source: raw.source,
            snippet: strip_markup(&raw.description),
            sortable_date,
        }
    }

    /// Cheap check before handing content to the XML reader. A leading
    /// byte-order mark counts as whitespace.
    pub fn looks_like_markup(content: &str) -> bool {
        leading_trimmed(content).starts_with('<')
    }
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

fn leading_trimmed(content: &str) -> &str {
    content.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Feed titles carry the outlet after a " - " separator.
fn headline(title: &str) -> String {
    title.split(" - ").next().unwrap_or_default().trim().to_string()
}

/// Text content of an HTML fragment with whitespace collapsed.
pub fn strip_markup(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(markup);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
