use crate::traits::{ContentFetcher, Relay};
use crate::types::{PipelineConfig, PipelineError, RelayKind, RelaySpec, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Relay that answers with a JSON envelope holding the target body.
pub struct JsonEnvelopeRelay {
    name: String,
    endpoint: Url,
    param: String,
}

#[derive(Deserialize)]
struct Envelope {
    contents: Option<String>,
}

impl JsonEnvelopeRelay {
    pub fn new(name: impl Into<String>, endpoint: &str, param: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            endpoint: Url::parse(endpoint)?,
            param: param.into(),
        })
    }
}

#[async_trait]
impl Relay for JsonEnvelopeRelay {
    fn name(&self) -> &str {
        &self.name
    }

    fn wrap(&self, target: &str) -> Result<Url> {
        Ok(with_target(&self.endpoint, &self.param, target))
    }

    async fn unwrap(&self, response: Response) -> Result<Option<String>> {
        let envelope: Envelope = response.json().await?;
        Ok(envelope.contents)
    }
}

/// Relay that streams the target body back unchanged.
pub struct RawBodyRelay {
    name: String,
    endpoint: Url,
    param: String,
}

impl RawBodyRelay {
    pub fn new(name: impl Into<String>, endpoint: &str, param: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            endpoint: Url::parse(endpoint)?,
            param: param.into(),
        })
    }
}

#[async_trait]
impl Relay for RawBodyRelay {
    fn name(&self) -> &str {
        &self.name
    }

    fn wrap(&self, target: &str) -> Result<Url> {
        Ok(with_target(&self.endpoint, &self.param, target))
    }

    async fn unwrap(&self, response: Response) -> Result<Option<String>> {
        Ok(Some(response.text().await?))
    }
}

fn with_target(endpoint: &Url, param: &str, target: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().append_pair(param, target);
    url
}

pub fn relay_from_spec(spec: &RelaySpec) -> Result<Box<dyn Relay>> {
    let relay: Box<dyn Relay> = match spec.kind {
        RelayKind::JsonEnvelope => Box::new(JsonEnvelopeRelay::new(&spec.name, &spec.endpoint, &spec.param)?),
        RelayKind::RawBody => Box::new(RawBodyRelay::new(&spec.name, &spec.endpoint, &spec.param)?),
    };
    Ok(relay)
}

/// Fetches target URLs through an ordered chain of relays.
///
/// Every relay gets exactly one attempt, bounded by `attempt_timeout`. The first
/// attempt that yields non-empty content wins.
pub struct ProxyFetcher {
    client: Client,
    relays: Vec<Box<dyn Relay>>,
    attempt_timeout: Duration,
}

impl ProxyFetcher {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        if config.relays.is_empty() {
            return Err(PipelineError::Config("at least one relay is required".to_string()));
        }

        let relays = config
            .relays
            .iter()
            .map(relay_from_spec)
            .collect::<Result<Vec<_>>>()?;

        let attempt_timeout = Duration::from_secs(config.relay_timeout_seconds);
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(attempt_timeout)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        info!("Proxy fetcher ready with {} relays ({:?} per attempt)", relays.len(), attempt_timeout);
        Ok(Self::with_relays(client, relays, attempt_timeout))
    }

    pub fn with_relays(client: Client, relays: Vec<Box<dyn Relay>>, attempt_timeout: Duration) -> Self {
        Self {
            client,
            relays,
            attempt_timeout,
        }
    }

    pub fn relay_names(&self) -> Vec<&str> {
        self.relays.iter().map(|r| r.name()).collect()
    }

    async fn attempt(&self, relay: &dyn Relay, target: &str) -> Result<Option<String>> {
        let url = relay.wrap(target)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(PipelineError::General(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        relay.unwrap(response).await
    }
}

#[async_trait]
impl ContentFetcher for ProxyFetcher {
    async fn fetch(&self, target: &str) -> Option<String> {
        for relay in &self.relays {
            match tokio::time::timeout(self.attempt_timeout, self.attempt(relay.as_ref(), target)).await {
                Ok(Ok(Some(content))) if !content.is_empty() => {
                    debug!("Relay {} returned {} bytes for {}", relay.name(), content.len(), target);
                    return Some(content);
                }
                Ok(Ok(_)) => warn!("Relay {} returned no content for {}", relay.name(), target),
                Ok(Err(e)) => warn!("Relay {} failed for {}: {}", relay.name(), target, e),
                Err(_) => warn!(
                    "Relay {} timed out after {:?} for {}",
                    relay.name(),
                    self.attempt_timeout,
                    target
                ),
            }
        }

        warn!("All {} relays failed for {}", self.relays.len(), target);
        None
    }
}
