//! Scripted HTTP client and canned backend responses for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::json;

use crate::candidate::Candidate;
use crate::error::SearchError;
use crate::http::HttpClient;
use crate::provider::CandidateSearch;

/// [`HttpClient`] answering from a fixed route table.
/// Unknown URLs fail with a transport error, like an unreachable host.
#[derive(Default)]
pub struct StubClient {
    routes: HashMap<String, Result<String, u16>>,
    calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn fail(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), Err(status));
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(url, _)| url.clone()).collect()
    }

    /// Query parameters of each request so far, in order.
    pub fn queries(&self) -> Vec<Vec<(String, String)>> {
        self.calls.borrow().iter().map(|(_, q)| q.clone()).collect()
    }
}

impl HttpClient for StubClient {
    fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, SearchError> {
        let params: Vec<(String, String)> = query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self.calls.borrow_mut().push((url.to_string(), params));

        match self.routes.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(SearchError::Status(*status)),
            None => Err(SearchError::Transport(format!("no route to {}", url))),
        }
    }
}

/// [`CandidateSearch`] returning the same list for every query.
pub struct FixedCandidates {
    pub candidates: Vec<Candidate>,
    pub queries: RefCell<Vec<String>>,
}

impl FixedCandidates {
    pub fn titles(titles: &[&str]) -> Self {
        let candidates = titles
            .iter()
            .enumerate()
            .map(|(i, t)| Candidate::from_video(&format!("vid{}", i), t))
            .collect();
        FixedCandidates { candidates, queries: RefCell::new(Vec::new()) }
    }
}

impl CandidateSearch for FixedCandidates {
    fn search(&self, query: &str, max_results: usize) -> Vec<Candidate> {
        self.queries.borrow_mut().push(query.to_string());
        self.candidates.iter().take(max_results).cloned().collect()
    }
}

fn video(id: &str, runs: &[&str]) -> serde_json::Value {
    let runs: Vec<_> = runs.iter().map(|t| json!({ "text": t })).collect();
    json!({ "videoRenderer": { "videoId": id, "title": { "runs": runs } } })
}

/// A results page with three usable videos spread over two item sections,
/// plus entries that must be ignored.
pub fn results_page() -> String {
    let data = json!({
        "responseContext": { "visitorData": "x" },
        "contents": { "twoColumnSearchResultsRenderer": { "primaryContents": {
            "sectionListRenderer": { "contents": [
                { "itemSectionRenderer": { "contents": [
                    { "adSlotRenderer": {} },
                    video("tAGnKpE4NCI", &["Metallica - Nothing Else Matters ", "(Official Music Video)"]),
                    { "channelRenderer": { "channelId": "UC1", "title": { "simpleText": "Metallica" } } },
                    { "videoRenderer": { "videoId": "notitle" } },
                    video("", &["Missing id"]),
                    video("cover42", &["Nothing Else Matters acoustic cover"]),
                ]}},
                { "continuationItemRenderer": { "trigger": "CONTINUATION_TRIGGER_ON_ITEM_SHOWN" } },
                { "itemSectionRenderer": { "contents": [
                    video("live1991", &["Metallica Nothing Else Matters Live at Moscow"]),
                ]}},
            ]}
        }}}
    });

    format!(
        "<!DOCTYPE html><html><head><script>var ytcfg = {{}};</script></head><body>\
         <script nonce=\"abc\">var ytInitialData = {};</script>\
         <script>var ytInitialPlayerResponse = null;</script></body></html>",
        data
    )
}

/// A mirror response mixing videos with channels, playlists and a broken entry.
pub fn mirror_json() -> String {
    json!([
        { "type": "video", "videoId": "tAGnKpE4NCI",
          "title": "Metallica - Nothing Else Matters (Official Music Video)" },
        { "type": "channel", "author": "Metallica", "authorId": "UC1" },
        { "type": "playlist", "title": "Metallica Greatest Hits", "playlistId": "PL1" },
        { "type": "video", "videoId": "", "title": "Broken entry" },
        { "type": "video", "videoId": "cover42", "title": "Nothing Else Matters acoustic cover" },
    ])
    .to_string()
}
