//! Find the best matching recording for a tablature track.
//!
//! Usage:
//!   find_audio "metallica nothing else matters" --artist Metallica --title "Nothing Else Matters"
//!   find_audio --file "tabs/Metallica - One.gp5"
//!   find_audio "enter sandman" --top 5 --verbose

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use tabfetch::ranking::score_breakdown;
use tabfetch::{Config, ConfigError, MatchRanker, QueryContext, SearchProvider, TrackLocator, TrackMetadata};

#[derive(Parser, Debug)]
#[command(name = "find_audio", version, about = "Find the audio recording matching a tablature track")]
struct Args {
    /// Free-text search query (built from --artist/--title/--file when omitted)
    query: Option<String>,

    /// Expected artist
    #[arg(long)]
    artist: Option<String>,

    /// Expected track title
    #[arg(long)]
    title: Option<String>,

    /// Tablature file; its name is used when artist and title are missing
    #[arg(long)]
    file: Option<PathBuf>,

    /// Print the N best ranked candidates with their matched rules
    #[arg(long, default_value_t = 0)]
    top: usize,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Candidates requested per query
    #[arg(long)]
    max_results: Option<usize>,

    /// Fallback mirror base URL (repeatable, replaces the saved list)
    #[arg(long = "mirror")]
    mirrors: Vec<String>,

    /// Show the effective settings and exit
    #[arg(long)]
    show_config: bool,

    /// Save the given options as defaults (~/.state/tabfetch/defaults.toml)
    #[arg(long)]
    save_defaults: bool,

    /// Debug logging (per-source results, candidate scores)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn as_config(&self) -> Config {
        Config {
            user_agent: None,
            timeout_secs: self.timeout,
            max_results: self.max_results,
            mirrors: if self.mirrors.is_empty() { None } else { Some(self.mirrors.clone()) },
        }
    }

    fn metadata(&self) -> Option<TrackMetadata> {
        if self.artist.is_none() && self.title.is_none() && self.file.is_none() {
            return None;
        }
        Some(TrackMetadata {
            artist: self.artist.clone().unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            album: String::new(),
            file_path: self.file.clone(),
        })
    }
}

fn main() {
    let args = Args::parse();

    let mut clog = colog::default_builder();
    clog.filter(
        None,
        if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info },
    );
    clog.init();

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(ConfigError::HomeNotSet) => Config::new(),
        Err(e) => {
            error!("Could not load saved defaults: {}", e);
            process::exit(2);
        }
    };
    config.merge(&args.as_config());

    if args.save_defaults {
        match config.save() {
            Ok(()) => println!("Defaults saved"),
            Err(e) => {
                error!("Could not save defaults: {}", e);
                process::exit(2);
            }
        }
    }

    if args.show_config {
        config.print("Effective settings");
        return;
    }

    let provider = SearchProvider::from_config(&config);
    let ranker = MatchRanker::with_pool_size(provider, config.max_results());

    let found = match (&args.query, args.metadata()) {
        (Some(query), meta) => {
            let meta = meta.unwrap_or_default();
            let ctx = QueryContext::new(query).expecting(&meta.artist, &meta.title);
            search_query(&ranker, &ctx, args.top)
        }
        (None, Some(meta)) => {
            let locator = TrackLocator::new(ranker);
            locator.locate(&meta).map(|t| {
                println!("Query: {}", t.query);
                (t.url, t.title, t.score)
            })
        }
        (None, None) => {
            error!("Nothing to search for: give a QUERY or --artist/--title/--file");
            process::exit(2);
        }
    };

    match found {
        Some((url, title, score)) => {
            println!("{}", url);
            println!("  {} (score {})", title, score);
        }
        None => {
            println!("No match found");
            process::exit(1);
        }
    }
}

/// Rank candidates for one query, optionally printing the leaders.
fn search_query<S: tabfetch::CandidateSearch>(
    ranker: &MatchRanker<S>,
    ctx: &QueryContext,
    top: usize,
) -> Option<(String, String, i32)> {
    let ranked = ranker.ranked(ctx);

    if top > 0 {
        println!("Top {} of {} candidate(s):", top.min(ranked.len()), ranked.len());
        for (i, sc) in ranked.iter().take(top).enumerate() {
            println!("{:>3}. [{:>3}] {}", i + 1, sc.score, sc.candidate.title);
            println!("       {}", sc.candidate.url);
            for (rule, delta) in score_breakdown(&sc.candidate.title, ctx.artist(), ctx.title()) {
                println!("         {:+} {}", delta, rule);
            }
        }
        println!();
    }

    ranked
        .into_iter()
        .next()
        .map(|sc| (sc.candidate.url, sc.candidate.title, sc.score))
}
