//! Primary search source: the platform's own results page.
//!
//! The results page embeds its initial state as a JavaScript assignment
//! (`var ytInitialData = {...};`).  We locate that marker, read exactly one
//! JSON value after it and walk the known nesting down to the video entries:
//!
//! ```text
//! contents
//!   └ twoColumnSearchResultsRenderer
//!       └ primaryContents
//!           └ sectionListRenderer.contents[]
//!               └ itemSectionRenderer.contents[]
//!                   └ videoRenderer { videoId, title.runs[].text }
//! ```
//!
//! Any deviation from that shape is reported as [`SearchError::Shape`].

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::candidate::Candidate;
use crate::error::SearchError;
use crate::http::HttpClient;
use crate::provider::SearchSource;

pub const RESULTS_URL: &str = "https://www.youtube.com/results";

/// Assignments that introduce the embedded data blob, tried in order.
const DATA_MARKERS: &[&str] = &["var ytInitialData = ", "window[\"ytInitialData\"] = "];

// ── Embedded data shape ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitialData {
    contents: PageContents,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageContents {
    two_column_search_results_renderer: TwoColumnResults,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TwoColumnResults {
    primary_contents: PrimaryContents,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrimaryContents {
    section_list_renderer: SectionList,
}

#[derive(Debug, Deserialize)]
struct SectionList {
    contents: Vec<Section>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Section {
    item_section_renderer: Option<ItemSection>,
}

#[derive(Debug, Deserialize)]
struct ItemSection {
    #[serde(default)]
    contents: Vec<SectionItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SectionItem {
    video_renderer: Option<VideoRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoRenderer {
    video_id: Option<String>,
    title: Option<TitleText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitleText {
    #[serde(default)]
    runs: Vec<TextRun>,
    simple_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    #[serde(default)]
    text: String,
}

impl TitleText {
    /// Titles usually arrive as several runs; join them in order.
    fn joined(&self) -> String {
        if self.runs.is_empty() {
            self.simple_text.clone().unwrap_or_default()
        } else {
            self.runs.iter().map(|r| r.text.as_str()).collect()
        }
    }
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Locate the embedded data assignment in a results page and parse the
/// JSON object that follows it.
///
/// Only one JSON value is read, so a `};` inside a string (a video title,
/// say) cannot cut the blob short.
pub fn extract_initial_data(html: &str) -> Result<Value, SearchError> {
    let start = DATA_MARKERS
        .iter()
        .find_map(|marker| html.find(marker).map(|idx| idx + marker.len()))
        .ok_or(SearchError::MarkerNotFound)?;

    let rest = html[start..].trim_start();
    if !rest.starts_with('{') {
        return Err(SearchError::MarkerNotFound);
    }

    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(e.into()),
        None => Err(SearchError::MarkerNotFound),
    }
}

/// Collect up to `max_results` video candidates from the embedded data.
/// Entries without an id or title are skipped.
pub fn parse_search_results(data: Value, max_results: usize) -> Result<Vec<Candidate>, SearchError> {
    let data: InitialData =
        serde_json::from_value(data).map_err(|e| SearchError::Shape(e.to_string()))?;

    let videos = data
        .contents
        .two_column_search_results_renderer
        .primary_contents
        .section_list_renderer
        .contents
        .into_iter()
        .filter_map(|section| section.item_section_renderer)
        .flat_map(|section| section.contents)
        .filter_map(|item| item.video_renderer);

    let mut results = Vec::new();
    for video in videos {
        if results.len() >= max_results {
            break;
        }
        let id = video.video_id.unwrap_or_default();
        let title = video.title.map(|t| t.joined()).unwrap_or_default();
        if id.is_empty() || title.is_empty() {
            debug!("YouTube: skipping entry without id or title (id={:?})", id);
            continue;
        }
        results.push(Candidate::from_video(&id, &title));
    }

    Ok(results)
}

// ── Source ───────────────────────────────────────────────────────────────────

/// Scrapes the results page.
#[derive(Debug, Default)]
pub struct YoutubeScrapeSource;

impl YoutubeScrapeSource {
    pub fn new() -> Self {
        YoutubeScrapeSource
    }
}

impl SearchSource for YoutubeScrapeSource {
    fn name(&self) -> &str {
        "YouTube"
    }

    fn search(
        &self,
        client: &dyn HttpClient,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Candidate>, SearchError> {
        let html = client.get_text(RESULTS_URL, &[("search_query", query)])?;
        let data = extract_initial_data(&html)?;
        parse_search_results(data, max_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, StubClient};
    use serde_json::json;

    #[test]
    fn test_extract_initial_data_stops_at_value_end() {
        let html = r#"<script>var ytInitialData = {"a": "tricky }; text", "b": 1};var other = {};</script>"#;
        let value = extract_initial_data(html).unwrap();
        assert_eq!(value["a"], "tricky }; text");
        assert_eq!(value["b"], 1);
    }

    #[test]
    fn test_extract_initial_data_window_marker() {
        let html = r#"<script>window["ytInitialData"] = {"x": true};</script>"#;
        assert_eq!(extract_initial_data(html).unwrap()["x"], true);
    }

    #[test]
    fn test_extract_initial_data_missing_marker() {
        let err = extract_initial_data("<html>nothing</html>").unwrap_err();
        assert!(matches!(err, SearchError::MarkerNotFound));
    }

    #[test]
    fn test_extract_initial_data_broken_json() {
        let err = extract_initial_data("var ytInitialData = {\"a\": ;").unwrap_err();
        assert!(matches!(err, SearchError::Json(_)));
    }

    #[test]
    fn test_parse_search_results_joins_runs_and_skips_incomplete() {
        let data = extract_initial_data(&test_utils::results_page()).unwrap();
        let results = parse_search_results(data, 15).unwrap();

        let titles: Vec<&str> = results.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Metallica - Nothing Else Matters (Official Music Video)",
                "Nothing Else Matters acoustic cover",
                "Metallica Nothing Else Matters Live at Moscow",
            ]
        );
        assert_eq!(results[0].id, "tAGnKpE4NCI");
        assert_eq!(results[2].url, "https://www.youtube.com/watch?v=live1991");
    }

    #[test]
    fn test_parse_search_results_respects_max() {
        let data = extract_initial_data(&test_utils::results_page()).unwrap();
        let results = parse_search_results(data, 2).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_parse_search_results_simple_text_title() {
        let data = json!({"contents": {"twoColumnSearchResultsRenderer": {"primaryContents": {
            "sectionListRenderer": {"contents": [{"itemSectionRenderer": {"contents": [
                {"videoRenderer": {"videoId": "abc", "title": {"simpleText": "Plain Title"}}}
            ]}}]}}}}});
        let results = parse_search_results(data, 5).unwrap();
        assert_eq!(results, vec![Candidate::from_video("abc", "Plain Title")]);
    }

    #[test]
    fn test_parse_search_results_shape_drift() {
        let data = json!({"contents": {"singleColumnBrowseResultsRenderer": {}}});
        let err = parse_search_results(data, 5).unwrap_err();
        assert!(matches!(err, SearchError::Shape(_)));
    }

    #[test]
    fn test_source_sends_query_parameter() {
        let client = StubClient::new().respond(RESULTS_URL, &test_utils::results_page());
        let results = YoutubeScrapeSource::new()
            .search(&client, "metallica nothing else matters", 15)
            .unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(
            client.queries()[0],
            vec![("search_query".to_string(), "metallica nothing else matters".to_string())]
        );
    }

    #[test]
    fn test_source_non_success_status() {
        let client = StubClient::new().fail(RESULTS_URL, 429);
        let err = YoutubeScrapeSource::new().search(&client, "q", 5).unwrap_err();
        assert!(matches!(err, SearchError::Status(429)));
    }
}
