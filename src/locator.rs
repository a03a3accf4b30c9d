//! Locate the audio for one tablature file.
//!
//! Builds a query from the file's metadata, then runs the ranked search over
//! a few spellings of that query until one of them produces a candidate.

use log::{debug, info};

use crate::candidate::{QueryContext, ScoredCandidate};
use crate::provider::CandidateSearch;
use crate::query::{build_search_query, query_variants, strip_tab_extension, TrackMetadata};
use crate::ranking::MatchRanker;

/// The chosen recording for a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedTrack {
    /// Query variant that produced the match
    pub query: String,
    pub url: String,
    pub title: String,
    pub score: i32,
}

impl LocatedTrack {
    fn from_scored(query: String, sc: ScoredCandidate) -> Self {
        LocatedTrack {
            query,
            url: sc.candidate.url,
            title: sc.candidate.title,
            score: sc.score,
        }
    }
}

pub struct TrackLocator<S: CandidateSearch> {
    ranker: MatchRanker<S>,
}

impl<S: CandidateSearch> TrackLocator<S> {
    pub fn new(ranker: MatchRanker<S>) -> Self {
        TrackLocator { ranker }
    }

    pub fn ranker(&self) -> &MatchRanker<S> {
        &self.ranker
    }

    /// Find the best recording for `metadata`.
    ///
    /// Returns `None` when no query can be built from the metadata or when
    /// every query variant comes back empty.
    pub fn locate(&self, metadata: &TrackMetadata) -> Option<LocatedTrack> {
        let Some(query) = build_search_query(metadata) else {
            debug!("No usable search terms in {:?}", metadata);
            return None;
        };

        // Expectations keep the field text; only the tab extension goes.
        let artist = metadata.artist.trim();
        let title = strip_tab_extension(metadata.title.trim());

        for variant in query_variants(&query) {
            let ctx = QueryContext::new(&variant).expecting(artist, &title);
            if let Some(best) = self.ranker.best_match_scored(&ctx) {
                info!(
                    "\"{}\": picked \"{}\" (score {})",
                    variant, best.candidate.title, best.score
                );
                return Some(LocatedTrack::from_scored(variant, best));
            }
            debug!("\"{}\": no candidates, trying next variant", variant);
        }

        None
    }
}
