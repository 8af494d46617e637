use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use resumerank_core::config_file::{self, ConfigFile};
use resumerank_core::{Config, DocumentFormat, RankRequest, RawDocument, ResumeRanker};
use resumerank_pdf_mupdf::MupdfBackend;
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;

const DEFAULT_COUNT: i64 = 5;
const DEFAULT_THRESHOLD: f64 = 0.5;

/// Resume Ranker - Rank resumes in a blob container by keyword density
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank every PDF and DOCX listed in a blob container
    Rank {
        /// Comma-separated keywords to look for
        #[arg(short, long, value_delimiter = ',')]
        keywords: Vec<String>,

        /// Number of documents to return [default: 5]
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// Accepted for compatibility; does not affect the ranking [default: 0.5]
        #[arg(long)]
        threshold: Option<f64>,

        /// Container listing URL (e.g. https://acct.blob.core.windows.net/c?restype=container&comp=list)
        #[arg(long)]
        listing_url: Option<String>,

        /// Documents downloaded and extracted at once
        #[arg(long)]
        concurrency: Option<usize>,

        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Rank local PDF and DOCX files without contacting a blob store
    Score {
        /// Files to score
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Comma-separated keywords to look for
        #[arg(short, long, value_delimiter = ',')]
        keywords: Vec<String>,

        /// Number of documents to return [default: 5]
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file_config = config_file::load_config();

    match cli.command {
        Command::Rank {
            keywords,
            count,
            threshold,
            listing_url,
            concurrency,
            json,
            no_color,
        } => {
            rank(
                &file_config,
                keywords,
                count,
                threshold,
                listing_url,
                concurrency,
                json,
                ColorMode(!no_color),
            )
            .await
        }
        Command::Score {
            files,
            keywords,
            count,
            json,
            no_color,
        } => score(
            &file_config,
            files,
            keywords,
            count,
            json,
            ColorMode(!no_color),
        ),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::too_many_arguments)]
async fn rank(
    file_config: &ConfigFile,
    keywords: Vec<String>,
    count: Option<i64>,
    threshold: Option<f64>,
    listing_url: Option<String>,
    concurrency: Option<usize>,
    json: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let request_defaults = file_config.request.clone().unwrap_or_default();

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let listing_url = listing_url
        .or_else(|| std::env::var("RESUMERANK_LISTING_URL").ok())
        .or(request_defaults.listing_url)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No listing URL. Pass --listing-url, set RESUMERANK_LISTING_URL, or add listing_url under [request] in .resumerank.toml"
            )
        })?;

    let mut config = Config::default();
    file_config.apply_to(&mut config);
    if let Some(secs) = std::env::var("RESUMERANK_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.request_timeout_secs = secs;
    }
    if let Some(n) = concurrency {
        config.max_concurrent_fetches = n.max(1);
    }

    let request = RankRequest {
        keywords: resolve_keywords(keywords, request_defaults.keywords),
        required_count: count
            .or(request_defaults.required_count)
            .unwrap_or(DEFAULT_COUNT),
        threshold: threshold
            .or(request_defaults.threshold)
            .unwrap_or(DEFAULT_THRESHOLD),
        listing_url,
    };

    tracing::debug!(?config, "resolved configuration");
    let ranker = ResumeRanker::new(config, Arc::new(MupdfBackend::new()))?;
    let report = ranker.run(&request).await?;

    let mut stdout = std::io::stdout();
    if json {
        output::print_json(&mut stdout, &report.ranked)?;
    } else {
        output::print_ranked(&mut stdout, &report.ranked, color)?;
    }
    stdout.flush()?;

    output::print_skip_summary(&mut std::io::stderr(), &report, color)?;
    Ok(())
}

fn score(
    file_config: &ConfigFile,
    files: Vec<PathBuf>,
    keywords: Vec<String>,
    count: Option<i64>,
    json: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let request_defaults = file_config.request.clone().unwrap_or_default();
    let keywords = resolve_keywords(keywords, request_defaults.keywords);
    let count = count
        .or(request_defaults.required_count)
        .unwrap_or(DEFAULT_COUNT);

    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        documents.push(RawDocument {
            format: DocumentFormat::from_filename(&filename),
            bytes: std::fs::read(path)?,
            filename,
        });
    }

    let report =
        resumerank_core::pipeline::rank_documents(documents, &keywords, count, &MupdfBackend)?;

    let mut stdout = std::io::stdout();
    if json {
        output::print_json(&mut stdout, &report.ranked)?;
    } else {
        output::print_ranked(&mut stdout, &report.ranked, color)?;
    }
    stdout.flush()?;

    output::print_skip_summary(&mut std::io::stderr(), &report, color)?;
    Ok(())
}

/// Keywords from the command line win over the config file's list.
fn resolve_keywords(flag: Vec<String>, configured: Option<Vec<String>>) -> Vec<String> {
    if flag.is_empty() {
        configured.unwrap_or_default()
    } else {
        flag
    }
}
