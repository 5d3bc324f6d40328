// Best-available CLI entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Initialize tracing (stderr; stdout carries the player list)
// 3. Load settings
// 4. Fetch the draft's picks from Sleeper
// 5. Filter the rankings file against the drafted set
// 6. Print one line per available player

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use sleeper_scout::config;
use sleeper_scout::rankings::{self, RankingFormat};
use sleeper_scout::sleeper::SleeperClient;

/// Print the best available players for a live Sleeper draft.
///
/// Fetches the picks already made in the given draft and prints every entry
/// of the rankings CSV whose player is still on the board, in ranking order.
#[derive(Parser, Debug)]
#[command(name = "scout", about, version)]
struct Cli {
    /// Sleeper draft ID (the number in the draft room URL).
    #[arg(long)]
    draft: String,

    /// Path to the rankings CSV file.
    #[arg(long)]
    rankings: PathBuf,

    /// Rankings layout: `standard` (PLAYER NAME/TEAM/POS/RK) or `bc`
    /// (Player.Name/Tier/Position/Rank). Falls back to the configured
    /// default format.
    #[arg(long)]
    format: Option<RankingFormat>,

    /// Directory containing config/settings.toml (defaults to the current
    /// directory).
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let cli = Cli::parse();

    // 2. Initialize tracing
    init_tracing().context("failed to initialize logging")?;

    // 3. Load settings
    let settings = match &cli.config_dir {
        Some(dir) => config::load_settings_from(dir),
        None => config::load_settings(),
    }
    .context("failed to load settings")?;
    let format = cli.format.unwrap_or(settings.default_format);
    info!(
        "Settings loaded: base_url={}, format={}",
        settings.base_url, format
    );

    // 4. Fetch the draft's picks
    let client = SleeperClient::new(settings.base_url.as_str(), settings.timeout)
        .context("failed to build Sleeper client")?;
    let drafted = client
        .drafted_names(&cli.draft)
        .await
        .with_context(|| format!("failed to fetch picks for draft {}", cli.draft))?;

    // 5. Filter the rankings file
    let available = rankings::filter_rankings(&cli.rankings, &drafted, format)
        .with_context(|| format!("failed to filter rankings file {}", cli.rankings.display()))?;

    // 6. Print the result list
    if available.is_empty() {
        println!("No available players found or all players drafted.");
    } else {
        for line in &available {
            println!("{line}");
        }
    }

    Ok(())
}

/// Initialize tracing to stderr (stdout is reserved for the result list).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sleeper_scout=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
