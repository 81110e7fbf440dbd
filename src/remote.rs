//! Remote quote source
//!
//! The remote side is treated as unreliable: any call may fail or time out,
//! and callers only log such failures.

use crate::config::SyncConfig;
use crate::error::{QuoteError, Result};
use crate::quotes::Quote;
use async_trait::async_trait;
use serde::Deserialize;

/// Somewhere quotes can be fetched from and pushed to
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the remote list, adapted into quotes
    async fn fetch_quotes(&self) -> Result<Vec<Quote>>;

    /// Send the given quotes to the remote sink
    async fn push_quotes(&self, quotes: &[Quote]) -> Result<()>;

    /// Send a single newly added quote
    async fn push_quote(&self, quote: &Quote) -> Result<()> {
        self.push_quotes(std::slice::from_ref(quote)).await
    }
}

/// A post as returned by the remote endpoint; only the title is used
#[derive(Debug, Deserialize)]
struct RemotePost {
    title: String,
}

/// HTTP implementation of `RemoteSource`
///
/// GET on the endpoint returns a list of posts whose `title` becomes the
/// quote text; every fetched quote gets the configured category.
pub struct HttpRemote {
    client: reqwest::Client,
    endpoint: String,
    category: String,
}

impl HttpRemote {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| QuoteError::Remote(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            category: config.category.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Turn a fetched response body into quotes
///
/// # Arguments
/// * `body` - Response body, expected to be a JSON array of objects with a string `title`
/// * `category` - Category assigned to every quote
fn adapt_posts(body: &str, category: &str) -> Result<Vec<Quote>> {
    let posts: Vec<RemotePost> = serde_json::from_str(body)
        .map_err(|e| QuoteError::Format(format!("Unexpected response from server: {}", e)))?;

    Ok(posts
        .into_iter()
        .map(|post| Quote::new(post.title, category))
        .collect())
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        let response = self.client.get(&self.endpoint).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(QuoteError::Remote(format!(
                "Fetching quotes failed with status {}",
                status
            )));
        }

        let body = response.text().await?;
        adapt_posts(&body, &self.category)
    }

    async fn push_quotes(&self, quotes: &[Quote]) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(quotes).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(QuoteError::Remote(format!(
                "Posting quotes failed with status {}",
                status
            )));
        }
        Ok(())
    }

    async fn push_quote(&self, quote: &Quote) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(quote).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(QuoteError::Remote(format!(
                "Posting quote failed with status {}",
                status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapt_posts_maps_title_and_category() {
        let body = r#"[
            {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "..."},
            {"userId": 1, "id": 2, "title": "qui est esse", "body": "..."}
        ]"#;

        let quotes = adapt_posts(body, "Server").unwrap();
        assert_eq!(
            quotes,
            vec![
                Quote::new("sunt aut facere", "Server"),
                Quote::new("qui est esse", "Server"),
            ]
        );
    }

    #[test]
    fn test_adapt_posts_rejects_unexpected_shapes() {
        assert!(matches!(
            adapt_posts("<html>busy</html>", "Server"),
            Err(QuoteError::Format(_))
        ));
        assert!(matches!(
            adapt_posts(r#"{"title": "not a list"}"#, "Server"),
            Err(QuoteError::Format(_))
        ));
        assert!(matches!(
            adapt_posts(r#"[{"id": 1}]"#, "Server"),
            Err(QuoteError::Format(_))
        ));
    }

    #[test]
    fn test_http_remote_uses_configured_endpoint() {
        let config = SyncConfig {
            endpoint: "http://127.0.0.1:9/quotes".to_string(),
            ..SyncConfig::default()
        };
        let remote = HttpRemote::new(&config).unwrap();
        assert_eq!(remote.endpoint(), "http://127.0.0.1:9/quotes");
    }
}
