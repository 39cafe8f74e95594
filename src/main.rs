use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod metrics;
mod models;
mod report;
mod sample;
mod source;
mod themes;

use models::Metrics;

#[derive(Parser)]
#[command(name = "coaching-visit-metrics")]
#[command(about = "Aggregated analytics for coaching visit logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute visit metrics from a sheet export
    #[command(group(
        ArgGroup::new("input")
            .args(["csv", "url"])
            .required(true)
            .multiple(false)
    ))]
    Metrics {
        /// Local CSV export of the visit log
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Sheet export URL to fetch the visit log from
        #[arg(long)]
        url: Option<String>,
        /// Restrict to one coach key, or "all"
        #[arg(long, default_value = "all")]
        coach: String,
        /// Restrict to one site, or "all"
        #[arg(long, default_value = "all")]
        site: String,
        /// Emit the full metrics snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    #[command(group(
        ArgGroup::new("input")
            .args(["csv", "url"])
            .required(true)
            .multiple(false)
    ))]
    Report {
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long, default_value = "all")]
        coach: String,
        #[arg(long, default_value = "all")]
        site: String,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Print the canned fallback dataset
    Sample {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Metrics {
            csv,
            url,
            coach,
            site,
            json,
        } => {
            let snapshot = load_metrics(csv, url, &coach, &site).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_summary(&snapshot);
            }
        }
        Commands::Report {
            csv,
            url,
            coach,
            site,
            out,
        } => {
            let snapshot = load_metrics(csv, url, &coach, &site).await?;
            let report = report::build_report(&snapshot, &coach, &site);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Sample { json } => {
            let snapshot = sample::sample_metrics();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_summary(&snapshot);
            }
        }
    }

    Ok(())
}

/// Load the visit log, compute the base snapshot, and narrow it to the
/// requested coach/site selection. A failed fetch substitutes the canned
/// sample data instead of surfacing the error.
async fn load_metrics(
    csv: Option<PathBuf>,
    url: Option<String>,
    coach: &str,
    site: &str,
) -> anyhow::Result<Metrics> {
    let base = match (csv, url) {
        (Some(path), _) => metrics::compute_metrics(source::load_csv(&path)?),
        (_, Some(url)) => match source::fetch_csv(&url).await {
            Ok(records) => metrics::compute_metrics(records),
            Err(err) => {
                warn!("falling back to sample data: {err:#}");
                sample::sample_metrics()
            }
        },
        (None, None) => anyhow::bail!("either --csv or --url is required"),
    };

    if coach == "all" && site == "all" {
        return Ok(base);
    }
    Ok(metrics::filter_and_recompute(&base, coach, site))
}

fn print_summary(snapshot: &Metrics) {
    println!("Total visits: {}", snapshot.total_visits);

    println!("\nVisits by coach:");
    for coach in snapshot.coaches.iter() {
        println!("- {} ({} visits)", coach.name, coach.visits);
    }

    println!("\nVisits by site:");
    for site in snapshot.sites.iter() {
        println!("- {} ({} visits)", site.name, site.visits);
    }

    println!("\nImplementation progress:");
    for bucket in snapshot.progress.iter() {
        println!("- {}: {}", bucket.name, bucket.value);
    }

    println!("\nTop strength themes:");
    for theme in snapshot.strength_themes.iter().take(5) {
        println!("- {} ({} mentions)", theme.theme, theme.count);
    }

    println!("\nTop improvement themes:");
    for theme in snapshot.improvement_themes.iter().take(5) {
        println!("- {} ({} mentions)", theme.theme, theme.count);
    }
}
