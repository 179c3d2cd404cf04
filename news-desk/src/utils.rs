//! Date and URL helpers shared by the pipeline stages

/// URL utilities
pub mod url {
    use url::Url;

    /// Link with any query-string component removed; the dedup identity.
    pub fn canonical_link(link: &str) -> String {
        link.split('?').next().unwrap_or_default().to_string()
    }

    /// Absolute http(s) URL check
    pub fn is_http_url(candidate: &str) -> bool {
        match Url::parse(candidate) {
            Ok(url) => (url.scheme() == "http" || url.scheme() == "https") && url.host_str().is_some(),
            Err(_) => false,
        }
    }
}

/// Time utilities
pub mod time {
    use chrono::{DateTime, Days, Local, NaiveDate, Utc};

    pub const STORAGE_FORMAT: &str = "%Y-%m-%d";
    pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

    /// Calendar date of an instant in the local timezone
    pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }

    pub fn format_display(date: NaiveDate) -> String {
        date.format(DISPLAY_FORMAT).to_string()
    }

    pub fn format_storage(date: NaiveDate) -> String {
        date.format(STORAGE_FORMAT).to_string()
    }

    pub fn parse_storage(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), STORAGE_FORMAT).ok()
    }

    /// Parse a feed `pubDate`: RFC 2822 first, RFC 3339 as fallback.
    pub fn parse_feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// `after:` token date. The feed's own day granularity is exclusive, so
    /// the bound moves one day outward. Stays at the calendar minimum.
    pub fn query_after(start: NaiveDate) -> String {
        format_storage(start.checked_sub_days(Days::new(1)).unwrap_or(start))
    }

    /// `before:` token date, one day past the inclusive end.
    pub fn query_before(end: NaiveDate) -> String {
        format_storage(end.checked_add_days(Days::new(1)).unwrap_or(end))
    }
}
