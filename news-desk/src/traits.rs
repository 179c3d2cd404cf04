use crate::types::Result;
use async_trait::async_trait;
use reqwest::Response;
use url::Url;

/// Anything that can turn a URL into its text content.
///
/// `None` is the routine "nothing came back" answer; implementations log
/// their own failures instead of returning them.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// One third-party relay endpoint and the way its responses are unwrapped.
#[async_trait]
pub trait Relay: Send + Sync {
    /// Name used in log lines
    fn name(&self) -> &str;

    /// Build the relay request URL carrying `target`.
    fn wrap(&self, target: &str) -> Result<Url>;

    /// Extract the target body from a successful relay response.
    async fn unwrap(&self, response: Response) -> Result<Option<String>>;
}
