pub mod candidate;
pub mod config;
pub mod error;
pub mod http;
pub mod invidious;
pub mod locator;
pub mod provider;
pub mod query;
pub mod ranking;
pub mod youtube;

#[cfg(test)]
mod test_utils;

pub use candidate::{Candidate, QueryContext, ScoredCandidate};
pub use config::Config;
pub use error::{ConfigError, SearchError};
pub use http::{HttpClient, UreqClient};
pub use locator::{LocatedTrack, TrackLocator};
pub use provider::{CandidateSearch, SearchProvider, SearchSource};
pub use query::TrackMetadata;
pub use ranking::{rank, score_title, MatchRanker, SCORING_RULES};
