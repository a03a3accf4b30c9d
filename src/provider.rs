//! Candidate search with pluggable sources and a fallback chain.
//!
//! The [`SearchSource`] trait defines a common interface for one way of
//! obtaining candidates.  Implementations live in separate modules:
//!
//! * [`crate::youtube::YoutubeScrapeSource`] (primary)
//! * [`crate::invidious::InvidiousSource`] (mirror fallback)
//!
//! [`SearchProvider`] tries each source in order and returns the first
//! non-empty result.  Source failures are logged and never reach the caller.

use log::{info, warn};

use crate::candidate::Candidate;
use crate::config::Config;
use crate::error::SearchError;
use crate::http::{HttpClient, UreqClient};
use crate::invidious::InvidiousSource;
use crate::youtube::YoutubeScrapeSource;

// ── Traits ───────────────────────────────────────────────────────────────────

/// One strategy for turning a query into candidates.
pub trait SearchSource {
    /// Short display name, e.g. "YouTube" or "Invidious".
    fn name(&self) -> &str;

    /// Return up to `max_results` candidates in backend order.
    /// An empty list means "nothing here", an error means the attempt failed;
    /// the provider treats both the same way.
    fn search(
        &self,
        client: &dyn HttpClient,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Candidate>, SearchError>;
}

/// Anything that can produce an ordered candidate list for a query.
///
/// Implemented by [`SearchProvider`]; the ranker only depends on this.
pub trait CandidateSearch {
    fn search(&self, query: &str, max_results: usize) -> Vec<Candidate>;
}

// ── Provider ─────────────────────────────────────────────────────────────────

/// Result of a search together with the source that produced it.
#[derive(Debug, Clone)]
pub struct SourcedResults {
    pub source: String,
    pub candidates: Vec<Candidate>,
}

/// Ordered fallback chain over [`SearchSource`]s sharing one HTTP client.
pub struct SearchProvider<C: HttpClient> {
    client: C,
    sources: Vec<Box<dyn SearchSource>>,
}

impl SearchProvider<UreqClient> {
    /// Provider with a real HTTP client and sources taken from `config`.
    pub fn from_config(config: &Config) -> Self {
        let client = UreqClient::new(&config.user_agent(), config.timeout());
        SearchProvider::with_sources(client, default_sources(config))
    }
}

impl<C: HttpClient> SearchProvider<C> {
    /// Provider over the default source chain (scrape first, then mirrors).
    pub fn new(client: C) -> Self {
        Self::with_sources(client, default_sources(&Config::new()))
    }

    /// Provider over an explicit, ordered source list.
    pub fn with_sources(client: C, sources: Vec<Box<dyn SearchSource>>) -> Self {
        SearchProvider { client, sources }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Names of the configured sources, in the order they are tried.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Try each source in order; the first non-empty result wins.
    /// Returns `None` when every source failed or came back empty.
    pub fn search_with_source(&self, query: &str, max_results: usize) -> Option<SourcedResults> {
        if max_results == 0 {
            return None;
        }

        for source in &self.sources {
            match source.search(&self.client, query, max_results) {
                Ok(mut candidates) if !candidates.is_empty() => {
                    candidates.truncate(max_results);
                    info!("{}: {} result(s) for \"{}\"", source.name(), candidates.len(), query);
                    return Some(SourcedResults {
                        source: source.name().to_string(),
                        candidates,
                    });
                }
                Ok(_) => {
                    info!("{}: no results for \"{}\"", source.name(), query);
                }
                Err(e) => {
                    warn!("{}: search failed for \"{}\": {}", source.name(), query, e);
                }
            }
        }

        None
    }
}

impl<C: HttpClient> CandidateSearch for SearchProvider<C> {
    fn search(&self, query: &str, max_results: usize) -> Vec<Candidate> {
        self.search_with_source(query, max_results)
            .map(|r| r.candidates)
            .unwrap_or_default()
    }
}

/// Scrape first, then the configured mirror list.
pub fn default_sources(config: &Config) -> Vec<Box<dyn SearchSource>> {
    vec![
        Box::new(YoutubeScrapeSource::new()),
        Box::new(InvidiousSource::new(config.mirrors())),
    ]
}
