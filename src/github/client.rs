//! HTTP client for the GitHub search API.

#[cfg(test)]
use mockall::automock;

use std::time::Duration;

use color_eyre::eyre::{eyre, Result};

use super::types::{Pagination, SearchResponse, SearchResults};

const USER_AGENT: &str = concat!("fluxterm/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Access to the GitHub API. Implemented over HTTP in production and
/// mocked in tests.
#[cfg_attr(test, automock)]
pub trait GitHubApi: Send + Sync {
    /// Searches users matching `query`, returning one page of results and
    /// the pagination cursor for fetching more.
    fn search_users(&self, query: &str, page: u32) -> Result<SearchResults>;

    /// Downloads raw avatar image bytes.
    fn fetch_avatar(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP implementation of [GitHubApi].
pub struct HttpGitHubApi {
    api_url: String,
    per_page: u32,
    client: reqwest::blocking::Client,
}

impl HttpGitHubApi {
    pub fn new(api_url: String, per_page: u32) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            api_url,
            per_page,
            client,
        })
    }
}

impl GitHubApi for HttpGitHubApi {
    fn search_users(&self, query: &str, page: u32) -> Result<SearchResults> {
        let url = format!("{}/search/users", self.api_url);

        let response = self
            .client
            .get(url)
            .query(&[
                ("q", query),
                ("page", &page.to_string()),
                ("per_page", &self.per_page.to_string()),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(eyre!(
                "user search failed with status {}",
                response.status()
            ));
        }

        let pagination = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(Pagination::from_link_header)
            .unwrap_or(Pagination {
                next: None,
                last: None,
            });

        let body = response.text()?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        Ok(SearchResults {
            users: parsed.items,
            pagination,
        })
    }

    fn fetch_avatar(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(eyre!(
                "avatar fetch failed with status {}",
                response.status()
            ));
        }

        Ok(response.bytes()?.to_vec())
    }
}
