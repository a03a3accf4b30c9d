//! Best-match selection over search candidates.
//!
//! Every candidate title is lower-cased and run through [`SCORING_RULES`], an
//! ordered table of (condition, delta) pairs.  All matching rules apply and
//! their deltas are summed; there is no clamping.  Candidates are then
//! stable-sorted by score, so ties keep the order the search backend gave.
//!
//! # Rules
//!
//! * expected artist at the start of the title +5, elsewhere +3
//! * expected title anywhere +4
//! * "official" style wording +4, label/channel wording +2, lyric videos +1
//! * each cover / alternate-version keyword found: −2 (live, concert),
//!   −4 (cover, remix, karaoke) or −3 (everything else)
//! * more than 100 characters −1, more than 3 of `|`, `-`, `(` −1
//! * short title (< 50 chars) containing both artist and title +2
//!
//! Matching is plain substring search after case-folding; no accent or
//! punctuation normalisation.
//!
//! The top candidate is returned even when its score is zero or negative.
//! [`MatchRanker::best_match_scored`] exposes the score so callers can apply
//! their own threshold.

use log::debug;

use crate::candidate::{Candidate, QueryContext, ScoredCandidate};
use crate::provider::CandidateSearch;

/// Number of candidates requested from the search backend per query.
pub const RANKING_POOL_SIZE: usize = 15;

// ── Rule table ───────────────────────────────────────────────────────────────

/// What a rule checks for.  Artist/title conditions never match when the
/// corresponding expectation is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Title starts with the expected artist.
    ArtistAtStart,
    /// Title contains the expected artist, but not at the start.
    ArtistElsewhere,
    /// Title contains the expected track title.
    TitleContained,
    /// Title contains at least one of the phrases.
    ContainsAny(&'static [&'static str]),
    /// Title contains the phrase.
    Contains(&'static str),
    /// Title is longer than this many characters.
    LongerThan(usize),
    /// More than this many `|`, `-` and `(` characters in total.
    SeparatorsAbove(usize),
    /// Title shorter than this many characters containing both the expected
    /// artist and the expected title.
    ShortWithBoth(usize),
}

/// One scoring rule: a named condition and the delta applied when it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRule {
    pub name: &'static str,
    pub condition: Condition,
    pub delta: i32,
}

const fn rule(name: &'static str, condition: Condition, delta: i32) -> ScoringRule {
    ScoringRule { name, condition, delta }
}

const fn keyword(phrase: &'static str, delta: i32) -> ScoringRule {
    rule(phrase, Condition::Contains(phrase), delta)
}

pub const OFFICIAL_KEYWORDS: &[&str] =
    &["official", "music video", "official video", "official music video"];
pub const LABEL_KEYWORDS: &[&str] = &["vevo", "records"];
pub const LYRIC_KEYWORDS: &[&str] = &["lyrics", "lyric video"];

/// The full rule table, evaluated top to bottom.
pub const SCORING_RULES: &[ScoringRule] = &[
    rule("artist at start", Condition::ArtistAtStart, 5),
    rule("artist in title", Condition::ArtistElsewhere, 3),
    rule("title match", Condition::TitleContained, 4),
    rule("official", Condition::ContainsAny(OFFICIAL_KEYWORDS), 4),
    rule("label channel", Condition::ContainsAny(LABEL_KEYWORDS), 2),
    rule("lyrics", Condition::ContainsAny(LYRIC_KEYWORDS), 1),
    // Live recordings
    keyword("live", -2),
    keyword("concert", -2),
    // Covers and remixes
    keyword("cover", -4),
    keyword("remix", -4),
    keyword("karaoke", -4),
    // Other alternate versions
    keyword("covers", -3),
    keyword("covered by", -3),
    keyword("covering", -3),
    keyword("remixed", -3),
    keyword("remix by", -3),
    keyword("instrumental", -3),
    keyword("backing track", -3),
    keyword("acoustic version", -3),
    keyword("acoustic cover", -3),
    keyword("piano version", -3),
    keyword("guitar cover", -3),
    keyword("live at", -3),
    keyword("live from", -3),
    keyword("tribute", -3),
    keyword("tribute to", -3),
    keyword("reaction", -3),
    keyword("reacts to", -3),
    keyword("tutorial", -3),
    keyword("how to play", -3),
    keyword("cover version", -3),
    keyword("version by", -3),
    // Compilations and noisy uploads
    rule("long title", Condition::LongerThan(100), -1),
    rule("many separators", Condition::SeparatorsAbove(3), -1),
    rule("short exact title", Condition::ShortWithBoth(50), 2),
];

/// Lower-cased expectations for one scoring pass.
#[derive(Debug, Clone, Default)]
struct Expectation {
    artist: String,
    title: String,
}

impl Expectation {
    fn new(artist: &str, title: &str) -> Self {
        Expectation {
            artist: artist.to_lowercase(),
            title: title.to_lowercase(),
        }
    }

    fn artist_in(&self, title: &str) -> bool {
        !self.artist.is_empty() && title.contains(&self.artist)
    }

    fn title_in(&self, title: &str) -> bool {
        !self.title.is_empty() && title.contains(&self.title)
    }
}

impl Condition {
    /// Evaluate against an already lower-cased title.
    fn holds(&self, title: &str, expect: &Expectation) -> bool {
        match *self {
            Condition::ArtistAtStart => expect.artist_in(title) && title.starts_with(&expect.artist),
            Condition::ArtistElsewhere => {
                expect.artist_in(title) && !title.starts_with(&expect.artist)
            }
            Condition::TitleContained => expect.title_in(title),
            Condition::ContainsAny(phrases) => phrases.iter().any(|p| title.contains(p)),
            Condition::Contains(phrase) => title.contains(phrase),
            Condition::LongerThan(limit) => title.chars().count() > limit,
            Condition::SeparatorsAbove(limit) => {
                title.chars().filter(|c| matches!(*c, '|' | '-' | '(')).count() > limit
            }
            Condition::ShortWithBoth(limit) => {
                title.chars().count() < limit && expect.artist_in(title) && expect.title_in(title)
            }
        }
    }
}

impl ScoringRule {
    /// Whether this rule fires for `title` (any case) given the expectations.
    pub fn matches(&self, title: &str, expected_artist: &str, expected_title: &str) -> bool {
        self.condition
            .holds(&title.to_lowercase(), &Expectation::new(expected_artist, expected_title))
    }
}

// ── Scoring ──────────────────────────────────────────────────────────────────

fn matching_rules<'a>(title: &'a str, expect: &'a Expectation) -> impl Iterator<Item = &'static ScoringRule> + 'a {
    SCORING_RULES.iter().filter(move |r| r.condition.holds(title, expect))
}

/// Score a candidate title against the expected artist and title.
/// Empty expectations disable the rules that need them.
pub fn score_title(title: &str, expected_artist: &str, expected_title: &str) -> i32 {
    let expect = Expectation::new(expected_artist, expected_title);
    let lowered = title.to_lowercase();
    matching_rules(&lowered, &expect).map(|r| r.delta).sum()
}

/// The rules that fired for a title, in table order, with their deltas.
pub fn score_breakdown(title: &str, expected_artist: &str, expected_title: &str) -> Vec<(&'static str, i32)> {
    let expect = Expectation::new(expected_artist, expected_title);
    let lowered = title.to_lowercase();
    matching_rules(&lowered, &expect).map(|r| (r.name, r.delta)).collect()
}

/// Score every candidate and sort best first.  The sort is stable: equal
/// scores keep their input order.
pub fn rank(candidates: Vec<Candidate>, expected_artist: &str, expected_title: &str) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let score = score_title(&candidate.title, expected_artist, expected_title);
            ScoredCandidate { candidate, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

// ── Ranker ───────────────────────────────────────────────────────────────────

/// Searches for a query and picks the single best candidate.
pub struct MatchRanker<S: CandidateSearch> {
    search: S,
    pool_size: usize,
}

impl<S: CandidateSearch> MatchRanker<S> {
    pub fn new(search: S) -> Self {
        Self::with_pool_size(search, RANKING_POOL_SIZE)
    }

    /// Ranker requesting `pool_size` candidates per query instead of the default.
    pub fn with_pool_size(search: S, pool_size: usize) -> Self {
        MatchRanker { search, pool_size }
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    /// Search and rank all candidates for a query (best first).
    pub fn ranked(&self, ctx: &QueryContext) -> Vec<ScoredCandidate> {
        let candidates = self.search.search(&ctx.raw_query, self.pool_size);
        if candidates.is_empty() {
            debug!("No candidates for \"{}\"", ctx.raw_query);
            return Vec::new();
        }

        let ranked = rank(candidates, ctx.artist(), ctx.title());

        debug!("Top results for \"{}\":", ctx.raw_query);
        for (i, sc) in ranked.iter().take(3).enumerate() {
            debug!("  {}. score {:>3}  {}", i + 1, sc.score, sc.candidate.title);
        }

        ranked
    }

    /// The top-ranked candidate with its score, whatever that score is.
    /// `None` only when the search produced no candidates at all.
    pub fn best_match_scored(&self, ctx: &QueryContext) -> Option<ScoredCandidate> {
        self.ranked(ctx).into_iter().next()
    }

    /// URL of the best candidate for `query`.  Empty artist/title strings
    /// mean "no expectation".
    pub fn best_match(&self, query: &str, expected_artist: &str, expected_title: &str) -> Option<String> {
        let ctx = QueryContext::new(query).expecting(expected_artist, expected_title);
        self.best_match_scored(&ctx).map(|sc| sc.candidate.url)
    }
}
