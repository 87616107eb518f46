use clap::Parser;
use pokedex_lib::bootstrap::{self, tracing::init_tracing_subscriber};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the PokeAPI catalog from the terminal", long_about = None)]
struct Cli {
    /// Config file path (defaults to <config_dir>/pokedex/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page size of the listing
    #[arg(short, long)]
    limit: Option<u32>,

    /// Pagination start of the listing
    #[arg(short, long)]
    offset: Option<u32>,

    /// Show the detail view of one entry instead of the list
    #[arg(short, long)]
    detail: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let mut config = bootstrap::resolve_config(cli.config)?;
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if let Some(offset) = cli.offset {
        config.offset = offset;
    }

    let facade = bootstrap::build_facade(&config)?;
    let mut stdout = std::io::stdout().lock();

    let result = match cli.detail {
        Some(name) => bootstrap::render_detail(&facade, &config.base_url, &name, &mut stdout).await,
        None => bootstrap::render_list(&facade, &mut stdout).await,
    };

    if let Err(err) = &result {
        error!(error = %err, "pokedex run failed");
    }
    result
}
