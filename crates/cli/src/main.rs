use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use catalog::{CatalogStore, UserId, demo_catalog};
use ranking::{MovieQuery, MovieSummary};
use server::MovieService;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// movies - query and rate the movie catalog from the command line
#[derive(Parser)]
#[command(name = "movies")]
#[command(about = "Search, rank and rate movies in a catalog data directory", long_about = None)]
struct Cli {
    /// Catalog data directory; the built-in demo data is used when omitted
    #[arg(short, long, env = "MOVIES_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title substring, exact year and/or exact genre
    Search {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        genre: Option<String>,
    },

    /// Show the five highest rated movies
    TopRated,

    /// Show a user and the movies they rated highest
    User {
        #[arg(long)]
        user_id: UserId,
    },

    /// Rate a movie (1-5); overwrites the user's earlier rating
    Rate {
        #[arg(long)]
        user_id: UserId,

        #[arg(long)]
        movie_id: u32,

        #[arg(long)]
        rating: i64,
    },

    /// Time concurrent per-user top-rated lookups
    Benchmark {
        /// Number of lookups to make
        #[arg(long, default_value = "1000")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let store = match &cli.data_dir {
        Some(dir) => CatalogStore::open(dir)
            .with_context(|| format!("Failed to load catalog from {}", dir.display()))?,
        None => CatalogStore::in_memory(demo_catalog()),
    };
    let (users, movies, ratings) = store.read().counts();
    println!(
        "{} Loaded {} movies, {} users, {} ratings in {:?}",
        "✓".green(),
        movies,
        users,
        ratings,
        start.elapsed()
    );

    debug!(data_dir = ?cli.data_dir, "Catalog store opened");
    let service = MovieService::new(Arc::new(store));

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Search { title, year, genre } => {
            handle_search(&service, MovieQuery { title, year, genre })?
        }
        Commands::TopRated => handle_top_rated(&service),
        Commands::User { user_id } => handle_user(&service, user_id)?,
        Commands::Rate {
            user_id,
            movie_id,
            rating,
        } => handle_rate(&service, user_id, movie_id, rating)?,
        Commands::Benchmark { requests } => handle_benchmark(service, requests).await?,
    }

    Ok(())
}

/// Handle the 'search' command
fn handle_search(service: &MovieService, query: MovieQuery) -> Result<()> {
    let movies = service.filter_movies(&query)?;

    println!("{}", "Search results:".bold().blue());
    if movies.is_empty() {
        println!("  No movies match.");
    } else {
        print_movies(&movies);
    }
    Ok(())
}

/// Handle the 'top-rated' command
fn handle_top_rated(service: &MovieService) {
    println!("{}", "Top rated movies:".bold().blue());
    print_movies(&service.top_rated());
}

/// Handle the 'user' command
fn handle_user(service: &MovieService, user_id: UserId) -> Result<()> {
    let (name, rating_count, own_average) = {
        let catalog = service.store().read();
        let Some(user) = catalog.get_user(user_id) else {
            bail!("User {} not found", user_id);
        };
        let ratings = catalog.get_user_ratings(user_id);
        let own_average = if ratings.is_empty() {
            0.0
        } else {
            let total: u32 = ratings.iter().map(|r| u32::from(r.value.get())).sum();
            f64::from(total) / ratings.len() as f64
        };
        (user.name.clone(), ratings.len(), own_average)
    };

    println!("{}", format!("User {}: {}", user_id, name).bold().blue());
    println!("{}Ratings given: {}", "• ".cyan(), rating_count);
    println!("{}Average rating given: {:.2}", "• ".cyan(), own_average);

    let top = service.top_rated_by_user(user_id);
    if top.is_empty() {
        println!("No rated movies yet.");
    } else {
        println!("Top rated by this user:");
        print_movies(&top);
    }
    Ok(())
}

/// Handle the 'rate' command
fn handle_rate(service: &MovieService, user_id: UserId, movie_id: u32, rating: i64) -> Result<()> {
    let outcome = service.rate_movie(i64::from(user_id), i64::from(movie_id), rating)?;

    match outcome.previous_rating {
        None => println!(
            "{} User {} rated movie {}: {}",
            "✓".green(),
            outcome.user_id,
            outcome.movie_id,
            outcome.rating
        ),
        Some(previous) => println!(
            "{} User {} changed rating of movie {}: {} -> {}",
            "✓".green(),
            outcome.user_id,
            outcome.movie_id,
            previous,
            outcome.rating
        ),
    }

    if service.store().data_dir().is_none() {
        println!("{}", "Demo data: rating was not saved.".yellow());
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(service: MovieService, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    let user_ids: Vec<UserId> = service.store().read().users().map(|u| u.id).collect();
    if user_ids.is_empty() {
        bail!("Catalog has no users to benchmark with");
    }

    let wall = Instant::now();

    // Use spawn_blocking to run lookups concurrently on the blocking pool
    let mut handles = Vec::with_capacity(requests);
    for _ in 0..requests {
        let user_id = user_ids[rand::random_range(0..user_ids.len())];
        let service = service.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let movies = service.top_rated_by_user(user_id);
            (start.elapsed(), movies.len())
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for handle in handles {
        let (elapsed, _) = handle.await?;
        timings.push(elapsed);
    }
    let wall = wall.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", requests);
    println!("Wall time: {:?}", wall);
    println!("Average latency: {:?}", total / timings.len() as u32);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", requests as f64 / wall.as_secs_f64());

    Ok(())
}

/// Print one line per movie with rank, year, genres and average
fn print_movies(movies: &[MovieSummary]) {
    for (rank, movie) in movies.iter().enumerate() {
        println!(
            "{}. {} ({}, {} min) [{}] - avg {:.1}",
            (rank + 1).to_string().green(),
            movie.title,
            movie.year_of_release,
            movie.running_time,
            movie.genres.join(", "),
            movie.average_rating
        );
    }
}
