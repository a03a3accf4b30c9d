//! Turning tablature metadata into search queries and file names.
//!
//! Tablature files carry free-form title/artist fields that are often
//! polluted with file extensions, transcriber credits ("by john") or
//! revision tags ("ver 2").  This module strips that noise before the text
//! is sent to a search backend.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

/// Longest file name produced by [`safe_filename`], in characters.
pub const MAX_FILENAME_CHARS: usize = 200;

/// Metadata extracted from one tablature file.
#[derive(Debug, Clone, Default)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub file_path: Option<PathBuf>,
}

impl TrackMetadata {
    pub fn new(artist: &str, title: &str) -> Self {
        TrackMetadata {
            artist: artist.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    fn file_stem(&self) -> Option<String> {
        self.file_path
            .as_deref()
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().into_owned())
    }
}

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("hard-coded pattern is valid"))
}

fn tab_extension() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?i)\.(gp[3-5x]?|tab)$")
}

fn brackets() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"[\[\](){}]")
}

fn version_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?i)\s+ver\s+\d+")
}

fn author_credit() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?i)\s+by\s+\w+")
}

fn control_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"[\x00-\x1f\x7f-\x9f]")
}

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\s+")
}

fn filename_forbidden() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r#"[<>:"/\\|?*]"#)
}

fn collapse_whitespace(s: &str) -> String {
    whitespace().replace_all(s, " ").trim().to_string()
}

/// Drop a trailing tablature file extension (`"One.gp5"` → `"One"`).
pub fn strip_tab_extension(term: &str) -> String {
    tab_extension().replace(term, "").into_owned()
}

/// Strip tablature noise from a metadata field.
///
/// `"Enter Sandman (ver 2) by tabber.gp5"` → `"Enter Sandman"`
pub fn clean_search_term(term: &str) -> String {
    if term.is_empty() {
        return String::new();
    }

    let term = tab_extension().replace(term, "");
    let term = brackets().replace_all(&term, "");
    let term = version_tag().replace_all(&term, "");
    let term = author_credit().replace_all(&term, "");
    let term = control_chars().replace_all(&term, "");
    collapse_whitespace(&term)
}

/// Build the base query for a track: cleaned artist and title, or the
/// cleaned file name when both are empty.  `None` when nothing usable is left.
pub fn build_search_query(metadata: &TrackMetadata) -> Option<String> {
    let parts: Vec<String> = [metadata.artist.trim(), metadata.title.trim()]
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| clean_search_term(s))
        .filter(|s| !s.is_empty())
        .collect();

    let query = if parts.is_empty() {
        metadata.file_stem().map(|stem| clean_search_term(&stem))?
    } else {
        parts.join(" ")
    };

    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}

/// Alternative spellings of a query, tried in order until one finds
/// something.  Duplicates are dropped.
pub fn query_variants(query: &str) -> Vec<String> {
    let candidates = [
        query.to_string(),
        query.replace(" guitar", ""),
        format!("{} official", query),
        query.replace(" - ", " "),
    ];

    let mut variants: Vec<String> = Vec::with_capacity(candidates.len());
    for v in candidates {
        if !v.trim().is_empty() && !variants.contains(&v) {
            variants.push(v);
        }
    }
    variants
}

/// File name (without extension) for the downloaded audio:
/// `"Artist - Title"`, or the tablature file stem as a fallback.
pub fn safe_filename(metadata: &TrackMetadata) -> String {
    let mut parts = Vec::new();

    let artist = metadata.artist.trim();
    if !artist.is_empty() {
        parts.push(artist.to_string());
    }

    let title = metadata.title.trim();
    if !title.is_empty() {
        parts.push(strip_tab_extension(title));
    }

    if parts.is_empty() {
        parts.push(metadata.file_stem().unwrap_or_else(|| "unknown".to_string()));
    }

    let name = parts.join(" - ");
    let name = filename_forbidden().replace_all(&name, "");
    let name: String = collapse_whitespace(&name)
        .chars()
        .take(MAX_FILENAME_CHARS)
        .collect();

    if name.is_empty() {
        "unknown".to_string()
    } else {
        name
    }
}
