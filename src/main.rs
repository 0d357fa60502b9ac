//! naist-syllabus main entry point
//!
//! This is the command-line interface for the syllabus scraper.

use clap::Parser;
use naist_syllabus::config::{load_config_with_hash, validate, Config};
use naist_syllabus::syllabus::{run_scrape, LectureCategory};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// naist-syllabus: structured lecture data from the NAIST syllabus
///
/// Fetches the syllabus listing page, extracts the lectures of each
/// category, scrapes the session plan of every lecture and stores the
/// result in SQLite with a markdown summary.
#[derive(Parser, Debug)]
#[command(name = "naist-syllabus")]
#[command(version)]
#[command(about = "Scrapes the NAIST course syllabus", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Scrape only these categories (general, introduction, basic, specialized)
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// Only scrape the lecture lists, not the detail pages
    #[arg(long)]
    no_details: bool,

    /// JSON file of {"name", "url"} lectures to scrape details for
    #[arg(long, value_name = "FILE")]
    lectures: Option<PathBuf>,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long, conflicts_with = "export_summary")]
    dry_run: bool,

    /// Regenerate the markdown summary from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    export_summary: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    apply_overrides(&mut config, &cli)?;
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid command-line overrides: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.export_summary {
        handle_export_summary(&config)?;
    } else {
        handle_scrape(&config, &config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("naist_syllabus=info,warn"),
            1 => EnvFilter::new("naist_syllabus=debug,info"),
            2 => EnvFilter::new("naist_syllabus=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.categories.is_empty() {
        let mut categories = Vec::new();
        for name in &cli.categories {
            let category = name.parse::<LectureCategory>()?;
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        config.source.categories = categories;
    }

    if cli.no_details {
        config.source.scrape_details = false;
    }

    if let Some(path) = &cli.lectures {
        config.source.lectures_file = Some(path.display().to_string());
    }

    Ok(())
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== naist-syllabus Dry Run ===\n");

    println!("Source:");
    println!("  Listing page: {}", config.source.listing_url);
    for category in &config.source.categories {
        println!("  - {} ({})", category, category.section_selector());
    }
    match (&config.source.lectures_file, config.source.scrape_details) {
        (_, false) => println!("  Details: skipped"),
        (Some(path), true) => println!("  Details: lectures from {}", path),
        (None, true) => println!("  Details: every listed lecture"),
    }

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Delay between requests: {}ms", config.fetcher.request_delay_ms);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Summary: {}", config.output.summary_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --export-summary mode: regenerates the markdown summary
fn handle_export_summary(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use naist_syllabus::output::{generate_markdown_summary, generate_summary};
    use naist_syllabus::storage::open_storage;
    use std::path::Path;

    println!("Database: {}", config.output.database_path);
    println!("Output: {}", config.output.summary_path);

    let storage = open_storage(Path::new(&config.output.database_path))?;

    tracing::info!("Loading latest run from database...");
    let summary = generate_summary(&storage)?;
    generate_markdown_summary(&summary, Path::new(&config.output.summary_path))?;

    println!("✓ Summary exported to: {}", config.output.summary_path);

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: &Config, config_hash: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Scraping {} categories from {}",
        config.source.categories.len(),
        config.source.listing_url
    );

    let report = match run_scrape(config, config_hash).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    for (category, count) in &report.lectures {
        println!("{:<14} {} lectures", category.to_string(), count);
    }
    println!(
        "✓ Run {}: {} lectures with {} sessions",
        report.run_id, report.lectures_with_details, report.sessions
    );

    Ok(())
}
