use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use omdb_client::{EntityRecord, LookupKey, OmdbClient, OmdbConfig};
use server::{EngineConfig, MovieAggregator, RankedResult, RelatedMovies};
use sources::Axis;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// movie-recs - Movie discovery over the OMDb API
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Find top movies by genre and movies related to a title", long_about = None)]
struct Cli {
    /// Path to an engine config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// OMDb API key (falls back to the OMDB_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Override the OMDb base URL
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one movie by title or IMDb id
    Movie {
        #[command(flatten)]
        key: MovieKeyArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Top rated movies in a genre
    Genre {
        /// Genre to match (case-insensitive)
        #[arg(long)]
        name: String,

        /// Number of movies to return (defaults to the configured category limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Movies sharing a genre, director or actor with a title
    Related {
        /// Title of the seed movie
        #[arg(long)]
        title: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct MovieKeyArgs {
    /// Movie title
    #[arg(long)]
    title: Option<String>,

    /// IMDb id, e.g. tt0133093
    #[arg(long)]
    id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => server::config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let aggregator = build_aggregator(&cli, config)?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Movie { key, json } => handle_movie(&aggregator, key, json).await?,
        Commands::Genre { name, limit, json } => handle_genre(&aggregator, name, limit, json).await?,
        Commands::Related { title, json } => handle_related(&aggregator, title, json).await?,
    }

    Ok(())
}

fn build_aggregator(cli: &Cli, config: EngineConfig) -> Result<MovieAggregator> {
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("OMDB_API_KEY").ok())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow!("No API key: pass --api-key or set OMDB_API_KEY"))?;

    let mut omdb_config = OmdbConfig::new(api_key).with_timeout(config.call_timeout());
    if let Some(base_url) = &cli.base_url {
        omdb_config = omdb_config.with_base_url(base_url.clone());
    }
    let client = OmdbClient::new(omdb_config).context("Failed to build OMDb client")?;
    debug!("Using OMDb client with {:?}", config);

    Ok(MovieAggregator::new(Arc::new(client), config))
}

/// Handle the 'movie' command
async fn handle_movie(aggregator: &MovieAggregator, args: MovieKeyArgs, json: bool) -> Result<()> {
    let key = match (args.title, args.id) {
        (_, Some(id)) => LookupKey::Id(id),
        (Some(title), None) => LookupKey::Title(title),
        (None, None) => bail!("Provide --title or --id"),
    };

    let movie = aggregator.lookup_movie(key).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&movie)?);
    } else {
        print_movie(&movie);
    }
    Ok(())
}

/// Handle the 'genre' command
async fn handle_genre(
    aggregator: &MovieAggregator,
    name: String,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(aggregator.config().category_limit);
    if limit == 0 {
        bail!("--limit must be greater than zero");
    }

    let start = Instant::now();
    let results = aggregator.find_by_category(&name, limit).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("{}", format!("Top {} movies:", name).bold().blue());
    if results.is_empty() {
        println!("  {}", "No rated movies found".yellow());
    }
    print_results(&results);
    println!("{} Done in {:?}", "✓".green(), start.elapsed());
    Ok(())
}

/// Handle the 'related' command
async fn handle_related(aggregator: &MovieAggregator, title: String, json: bool) -> Result<()> {
    let start = Instant::now();
    let related = aggregator.find_related(&title).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&related)?);
        return Ok(());
    }

    print_related(&related);
    println!("{} Done in {:?}", "✓".green(), start.elapsed());
    Ok(())
}

fn print_movie(movie: &EntityRecord) {
    println!("{}", format!("{} ({})", movie.title, movie.year).bold().blue());
    println!("{}IMDb id: {}", "• ".green(), movie.imdb_id);
    println!("{}Rating: {}", "• ".green(), movie.imdb_rating);
    println!("{}Genres: {}", "• ".cyan(), movie.genres.join(", "));
    println!("{}Directors: {}", "• ".cyan(), movie.directors.join(", "));
    println!("{}Actors: {}", "• ".cyan(), movie.actors.join(", "));
    if let Some(plot) = &movie.plot {
        println!("\n{}", plot);
    }
}

fn print_related(related: &RelatedMovies) {
    println!("{}", format!("Movies related to {}:", related.seed_title).bold().blue());
    for axis in Axis::ALL {
        let heading = match axis {
            Axis::Genre => "By genre",
            Axis::Director => "By director",
            Axis::Actor => "By actor",
        };
        println!("\n{}", heading.bold());
        let results = related.axis(axis);
        if results.is_empty() {
            println!("  {}", "nothing found".yellow());
        }
        print_results(results);
    }
}

/// Helper function to format and print ranked results
fn print_results(results: &[RankedResult]) {
    for (i, movie) in results.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] - Rating: {}",
            (i + 1).to_string().green(),
            movie.title,
            movie.year,
            movie.genre,
            movie.imdb_rating
        );
    }
}
