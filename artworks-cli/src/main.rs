mod command;
mod interrupt;
mod render;
mod repl;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use artworks_lib::selection::SelectionConfig;
use artworks_lib::selection::SelectionController;
use artworks_lib::ArtworksClient;
use artworks_lib::Browser;
use artworks_lib::DEFAULT_BASE_URL;
use artworks_lib::DEFAULT_PAGE_SIZE;
use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::repl::CliError;

/// Browse the Art Institute of Chicago artworks collection.
#[derive(Debug, Parser)]
#[command(name = "artworks", version)]
struct Args {
    /// API base URL.
    #[arg(long, env = "ARTWORKS_API_URL", default_value = DEFAULT_BASE_URL)]
    endpoint: String,

    /// Rows per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Timeout for each page fetch, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Maximum pages a single `select` may fetch.
    #[arg(long)]
    max_pages: Option<u32>,

    /// Log file path.
    #[arg(long, default_value = "artworks-cli.log")]
    log_file: PathBuf,

    /// Log debug output.
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(&args.log_file)?;
    WriteLogger::init(level, Config::default(), log_file)?;

    let timeout = Duration::from_secs(args.timeout_secs);
    let client = ArtworksClient::builder()
        .url(&args.endpoint)
        .page_size(args.page_size)
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(concat!("artworks-cli/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let mut config = SelectionConfig::default().fetch_timeout(timeout);
    if let Some(max_pages) = args.max_pages {
        config = config.max_pages(max_pages);
    }

    log::info!("browsing {}", client.collection_url());
    let page_size = client.page_size();
    let browser = Browser::new(client, SelectionController::with_config(config), page_size);

    repl::run(browser)
}
