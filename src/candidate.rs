//! Search result types shared by the providers and the ranker.

/// Base of the canonical watch link handed to the downloader.
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Build the canonical watch URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_BASE, video_id)
}

/// One search result that can be turned into a playable URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Opaque backend identifier (video id)
    pub id: String,
    pub title: String,
    /// Canonical watch link
    pub url: String,
}

impl Candidate {
    /// Create a candidate from a video id and title, deriving the watch URL.
    pub fn from_video(id: &str, title: &str) -> Self {
        Candidate {
            id: id.to_string(),
            title: title.to_string(),
            url: watch_url(id),
        }
    }
}

/// A candidate together with its heuristic match score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: i32,
}

/// Per-call search input: the free-text query plus what we expect to find.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    pub raw_query: String,
    pub expected_artist: Option<String>,
    pub expected_title: Option<String>,
}

impl QueryContext {
    pub fn new(raw_query: &str) -> Self {
        QueryContext {
            raw_query: raw_query.to_string(),
            ..Default::default()
        }
    }

    /// Attach the expected artist/title as given.  Empty strings count as absent.
    pub fn expecting(mut self, artist: &str, title: &str) -> Self {
        self.expected_artist = non_blank(artist);
        self.expected_title = non_blank(title);
        self
    }

    pub fn artist(&self) -> &str {
        self.expected_artist.as_deref().unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.expected_title.as_deref().unwrap_or("")
    }
}

fn non_blank(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
