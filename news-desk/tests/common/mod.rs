#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use news_desk::ContentFetcher;
use std::sync::{Mutex, Once};
use std::time::Duration;
use url::Url;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init()
            .ok();
    });
}

/// Canned fetcher: the first route whose pattern appears in the request URL
/// (or in one of its decoded query values) answers. Unrouted URLs get `None`.
pub struct StubFetcher {
    routes: Vec<(String, Option<String>)>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn route(mut self, pattern: &str, body: Option<String>) -> Self {
        self.routes.push((pattern.to_string(), body));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Decoded `q` parameter of every request, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| {
                Url::parse(call)
                    .ok()?
                    .query_pairs()
                    .find(|(k, _)| k == "q")
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let decoded = Url::parse(url)
            .map(|u| u.query_pairs().map(|(_, v)| v.into_owned()).collect::<Vec<_>>().join(" "))
            .unwrap_or_default();

        self.routes
            .iter()
            .find(|(pattern, _)| url.contains(pattern.as_str()) || decoded.contains(pattern.as_str()))
            .and_then(|(_, body)| body.clone())
    }
}

pub struct FeedItem<'a> {
    pub title: &'a str,
    pub link: &'a str,
    pub pub_date: String,
    pub source: Option<&'a str>,
    pub description: &'a str,
}

impl<'a> FeedItem<'a> {
    pub fn new(title: &'a str, link: &'a str, pub_date: String) -> Self {
        Self {
            title,
            link,
            pub_date,
            source: Some("A Gazeta"),
            description: "",
        }
    }

    pub fn description(mut self, description: &'a str) -> Self {
        self.description = description;
        self
    }

    pub fn source(mut self, source: Option<&'a str>) -> Self {
        self.source = source;
        self
    }
}

/// RSS 2.0 document in the shape the news search returns.
pub fn rss_feed(items: &[FeedItem]) -> String {
    let mut body = String::new();
    for item in items {
        body.push_str("<item>");
        body.push_str(&format!("<title>{}</title>", item.title));
        body.push_str(&format!("<link>{}</link>", item.link));
        body.push_str(&format!("<pubDate>{}</pubDate>", item.pub_date));
        if let Some(source) = item.source {
            body.push_str(&format!("<source url=\"https://www.agazeta.com.br\">{}</source>", source));
        }
        body.push_str(&format!("<description><![CDATA[{}]]></description>", item.description));
        body.push_str("</item>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Busca</title><link>https://news.google.com</link><description>Google News</description>{}</channel></rss>"#,
        body
    )
}

/// RFC 2822 timestamp for a local wall-clock time.
pub fn local_rfc2822(y: i32, m: u32, d: u32, h: u32) -> String {
    local(y, m, d, h).to_rfc2822()
}

pub fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}
