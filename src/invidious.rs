//! Fallback search source: public Invidious mirrors.
//!
//! Each mirror exposes `/api/v1/search?q=…&type=video&sort_by=relevance`
//! returning a JSON array of mixed entries (videos, channels, playlists).
//! Mirrors are tried in order; the first one answering with at least one
//! video wins.  A failing mirror is logged and skipped.

use log::{debug, info, warn};
use serde::Deserialize;

use crate::candidate::Candidate;
use crate::error::SearchError;
use crate::http::HttpClient;
use crate::provider::SearchSource;

/// Mirrors tried when none are configured.
pub const DEFAULT_MIRRORS: &[&str] = &[
    "https://invidious.io",
    "https://yewtu.be",
    "https://invidious.snopyta.org",
    "https://invidious.kavin.rocks",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSearchItem {
    #[serde(rename = "type")]
    item_type: Option<String>,
    video_id: Option<String>,
    title: Option<String>,
}

/// Parse a mirror's search response, keeping only video entries that carry
/// both an id and a title.
pub fn parse_mirror_response(body: &str, max_results: usize) -> Result<Vec<Candidate>, SearchError> {
    let items: Vec<ApiSearchItem> = serde_json::from_str(body)?;

    let results = items
        .into_iter()
        .filter(|item| item.item_type.as_deref() == Some("video"))
        .filter_map(|item| match (item.video_id, item.title) {
            (Some(id), Some(title)) if !id.is_empty() && !title.is_empty() => {
                Some(Candidate::from_video(&id, &title))
            }
            _ => None,
        })
        .take(max_results)
        .collect();

    Ok(results)
}

/// Queries an ordered list of mirrors.
#[derive(Debug, Clone)]
pub struct InvidiousSource {
    mirrors: Vec<String>,
}

impl InvidiousSource {
    pub fn new(mirrors: Vec<String>) -> Self {
        InvidiousSource { mirrors }
    }

    pub fn mirrors(&self) -> &[String] {
        &self.mirrors
    }

    fn search_mirror(
        &self,
        client: &dyn HttpClient,
        mirror: &str,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Candidate>, SearchError> {
        let url = format!("{}/api/v1/search", mirror.trim_end_matches('/'));
        let body = client.get_text(
            &url,
            &[("q", query), ("type", "video"), ("sort_by", "relevance")],
        )?;
        parse_mirror_response(&body, max_results)
    }
}

impl Default for InvidiousSource {
    fn default() -> Self {
        Self::new(DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect())
    }
}

impl SearchSource for InvidiousSource {
    fn name(&self) -> &str {
        "Invidious"
    }

    /// Never fails: a mirror error only moves on to the next mirror.
    fn search(
        &self,
        client: &dyn HttpClient,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Candidate>, SearchError> {
        for mirror in &self.mirrors {
            match self.search_mirror(client, mirror, query, max_results) {
                Ok(results) if !results.is_empty() => {
                    info!("Invidious: {} answered with {} video(s)", mirror, results.len());
                    return Ok(results);
                }
                Ok(_) => debug!("Invidious: {} returned no videos", mirror),
                Err(e) => warn!("Invidious: {} failed: {}", mirror, e),
            }
        }

        Ok(Vec::new())
    }
}
