//! GitHub search API types.

use serde::Deserialize;

/// A user entry from the search users endpoint. Identity is `login`,
/// though the API does not enforce it.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub avatar_url: String,
}

/// Response body for `GET /search/users`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<GitHubUser>,
}

/// Page cursor parsed from the `Link` response header. A missing `next`
/// means there are no further pages.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Pagination {
    pub next: Option<u32>,
    pub last: Option<u32>,
}

/// One page of search results along with the cursor for fetching more.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub users: Vec<GitHubUser>,
    pub pagination: Pagination,
}

impl Pagination {
    /// Parses a `Link` header of the form
    /// `<https://…?q=x&page=2>; rel="next", <https://…?q=x&page=34>; rel="last"`
    /// extracting the page numbers for the `next` and `last` relations.
    pub fn from_link_header(header: &str) -> Self {
        let mut next: Option<u32> = None;
        let mut last: Option<u32> = None;

        for part in header.split(',') {
            let mut url: Option<&str> = None;
            let mut rel: Option<&str> = None;

            for segment in part.split(';') {
                let segment = segment.trim();
                if segment.starts_with('<') && segment.ends_with('>') {
                    url = Some(&segment[1..segment.len() - 1]);
                } else if let Some(value) = segment.strip_prefix("rel=") {
                    rel = Some(value.trim_matches('"'));
                }
            }

            let page = url.and_then(page_param);

            match rel {
                Some("next") => next = page,
                Some("last") => last = page,
                _ => {}
            }
        }

        Self { next, last }
    }
}

fn page_param(url: &str) -> Option<u32> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|v| v.parse::<u32>().ok())
}

#[cfg(test)]
#[path = "./types_tests.rs"]
mod tests;
