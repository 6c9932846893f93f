//! Cinematch command-line recommender
//!
//! Recommends movies from the IMDb 5000 dataset either by similarity to a
//! movie or by genres and a target score.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cinematch_catalog::config::{DEFAULT_SCORE, MIN_COUNT};
use cinematch_catalog::{
    Dataset, Genre, GenreQuery, MetadataClient, MovieDetails, RecommendConfig, RecommendMode,
    Recommendation, default_data_dir,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::FromEnvError;

/// Log level used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_LEVEL: &str = "info";

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "cinematch")]
#[command(about = "Movie recommendations by title or genre")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding movie_data.json and movie_titles.json
    #[arg(short = 'D', long, env = "CINEMATCH_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Print one JSON object per recommendation
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Movies similar to the given title
    Similar {
        /// Movie title (fuzzy matched)
        title: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Movies matching the given genres and score
    Genres {
        /// Genres to match, e.g. Action Sci-Fi
        #[arg(required = true)]
        genres: Vec<String>,

        /// Target IMDb score (1-10)
        #[arg(short, long, default_value_t = DEFAULT_SCORE)]
        score: f64,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the available genres
    ListGenres,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Number of recommendations (5-20)
    #[arg(short = 'n', long, default_value_t = MIN_COUNT)]
    count: usize,

    /// Skip scraping poster URLs from IMDb
    #[arg(long)]
    no_posters: bool,

    /// Skip scraping director, cast and story from IMDb
    #[arg(long)]
    no_details: bool,
}

impl OutputArgs {
    fn config(&self) -> RecommendConfig {
        let config = RecommendConfig::new()
            .with_count(self.count)
            .with_posters(!self.no_posters)
            .with_details(!self.no_details);
        if config.count != self.count {
            warn!(requested = self.count, used = config.count, "recommendation count clamped");
        }
        config
    }
}

/// One line of output.
#[derive(Debug, Serialize)]
struct RecommendationOutput {
    #[serde(flatten)]
    recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<MovieDetails>,
}

impl RecommendationOutput {
    fn render(&self) -> String {
        let rec = &self.recommendation;
        let mut text = format!("({}) {} <{}>\n", rec.rank, rec.title, rec.link);
        if let Some(poster) = &self.poster {
            text.push_str(&format!("Poster: {poster}\n"));
        }
        if let Some(details) = &self.details {
            text.push_str(&format!("{details}\n"));
        }
        text.push_str(&format!("IMDB Rating: {:.1}", rec.score));
        text
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(EnvFilter::try_from_default_env()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ListGenres => {
            for genre in Genre::ALL {
                println!("{genre}");
            }
            Ok(())
        }
        Commands::Similar { title, output } => {
            let dataset = load_dataset(cli.data_dir)?;
            let mode = select_movie(&dataset, &title)?;
            print_outputs(&recommend(&dataset, &mode, &output)?, cli.json)
        }
        Commands::Genres {
            genres,
            score,
            output,
        } => {
            let mode = genre_mode(&genres, score)?;
            let dataset = load_dataset(cli.data_dir)?;
            print_outputs(&recommend(&dataset, &mode, &output)?, cli.json)
        }
    }
}

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_LEVEL`].
fn log_filter(from_env: std::result::Result<EnvFilter, FromEnvError>) -> EnvFilter {
    from_env.unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn load_dataset(data_dir: Option<PathBuf>) -> Result<Dataset> {
    let dir = data_dir.unwrap_or_else(default_data_dir);
    Dataset::load(&dir).with_context(|| format!("failed to load dataset from {}", dir.display()))
}

/// Movie-based mode seeded by a fuzzy-matched title.
fn select_movie(dataset: &Dataset, title: &str) -> Result<RecommendMode> {
    let index = dataset
        .find_title(title)
        .with_context(|| format!("cannot recommend from {title:?}"))?;
    info!(index, matched = %dataset.title(index)?.title, "selected movie");
    Ok(RecommendMode::Movie(index))
}

/// Genre-based mode; the score is clamped to the IMDb range.
fn genre_mode(genres: &[String], score: f64) -> Result<RecommendMode> {
    Ok(RecommendMode::Genres(GenreQuery::from_names(genres, score)?))
}

fn recommend(
    dataset: &Dataset,
    mode: &RecommendMode,
    output: &OutputArgs,
) -> Result<Vec<RecommendationOutput>> {
    let config = output.config();
    let recommendations = dataset.recommend(mode, &config)?;
    enrich(recommendations, &config)
}

fn print_outputs(outputs: &[RecommendationOutput], json: bool) -> Result<()> {
    if outputs.is_empty() {
        println!("No recommendations found.");
        return Ok(());
    }

    for (i, out) in outputs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(out)?);
        } else {
            if i > 0 {
                println!("---");
            }
            println!("{}", out.render());
        }
    }
    Ok(())
}

/// Attaches scraped posters and details as configured.
fn enrich(
    recommendations: Vec<Recommendation>,
    config: &RecommendConfig,
) -> Result<Vec<RecommendationOutput>> {
    let client = if config.needs_scraping() {
        Some(MetadataClient::new().context("failed to create IMDb client")?)
    } else {
        None
    };

    Ok(recommendations
        .into_iter()
        .map(|recommendation| {
            let poster = client
                .as_ref()
                .filter(|_| config.fetch_posters)
                .map(|c| c.poster(&recommendation.link));
            let details = client
                .as_ref()
                .filter(|_| config.fetch_details)
                .map(|c| c.details(&recommendation.link));
            RecommendationOutput {
                recommendation,
                poster,
                details,
            }
        })
        .collect())
}
