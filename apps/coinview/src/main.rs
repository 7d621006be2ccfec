mod app;
mod router;
mod views;

use anyhow::Context;
use app::{App, AppStore, HomeQuery};
use clap::{Parser, Subcommand, ValueEnum};
use coinview_coinranking::CoinrankingConfig;
use coinview_store::{Favorites, FileStore, MemoryStore, RedisStore};
use dotenv::dotenv;
use router::Router;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "coinview")]
#[command(author, version, about = "Browse Coinranking market data from the terminal", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Where favorites are kept
    #[arg(long, value_enum, default_value_t = StoreKind::File)]
    store: StoreKind,

    /// Storage file used by the file store (default: ~/.coinview/storage.json)
    #[arg(long, env = "COINVIEW_STORE_PATH")]
    store_path: Option<PathBuf>,

    /// Serve only the home page; every path lands there
    #[arg(long)]
    home_only: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    Memory,
    File,
    Redis,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open a page by path (/, /home, /favorites)
    Open {
        #[arg(default_value = "/")]
        path: String,

        /// Pagination offset for the home page
        #[arg(long)]
        offset: Option<u32>,

        /// Filter the home page by name or symbol
        #[arg(long, conflicts_with = "offset")]
        search: Option<String>,
    },
    /// List coins (first page, no stats)
    Coins,
    /// Show one page of coins with market stats
    Page {
        #[arg(default_value_t = 0)]
        offset: u32,
    },
    /// Search coins by name or symbol
    Search { term: Option<String> },
    /// Show favorite coins
    Favorites,
    /// Mark a coin as favorite
    Like { uuid: String },
    /// Remove a coin from favorites
    Unlike { uuid: String },
    /// Print the route table
    Routes,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let store = open_store(cli.store, cli.store_path)?;
    let router = if cli.home_only {
        Router::home_only()
    } else {
        Router::default()
    };

    let output = match cli.command {
        Commands::Like { uuid } => {
            if Favorites::new(&store).add(&uuid).await? {
                format!("Added {uuid} to favorites\n")
            } else {
                format!("{uuid} is already a favorite\n")
            }
        }
        Commands::Unlike { uuid } => {
            if Favorites::new(&store).remove(&uuid).await? {
                format!("Removed {uuid} from favorites\n")
            } else {
                format!("{uuid} was not a favorite\n")
            }
        }
        Commands::Routes => render_routes(&router),
        Commands::Open {
            path,
            offset,
            search,
        } => {
            bootstrap(store, router)?
                .mount(&path, &HomeQuery { offset, search })
                .await?
        }
        Commands::Page { offset } => {
            bootstrap(store, router)?
                .home(&HomeQuery {
                    offset: Some(offset),
                    search: None,
                })
                .await?
        }
        Commands::Search { term } => {
            bootstrap(store, router)?
                .search(term.as_deref())
                .await?
        }
        Commands::Favorites => bootstrap(store, router)?.favorites().await?,
        Commands::Coins => bootstrap(store, router)?.coins().await?,
    };

    print!("{output}");
    Ok(())
}

// Reads the token, so store-only commands never call this.
fn bootstrap(store: AppStore, router: Router) -> anyhow::Result<App<AppStore>> {
    let config =
        CoinrankingConfig::from_env().context("Failed to load Coinranking configuration")?;
    Ok(App::bootstrap(config, store)?.with_router(router))
}

fn render_routes(router: &Router) -> String {
    let mut out = String::new();
    for route in router.routes() {
        match route.alias {
            Some(alias) => out.push_str(&format!("{:<16} {:<12} (alias {alias})\n", route.path, route.name)),
            None => out.push_str(&format!("{:<16} {}\n", route.path, route.name)),
        }
    }
    out
}

fn open_store(kind: StoreKind, path: Option<PathBuf>) -> anyhow::Result<AppStore> {
    let store = match kind {
        StoreKind::Memory => AppStore::Memory(MemoryStore::new()),
        StoreKind::File => {
            let path = match path {
                Some(path) => path,
                None => default_store_path()?,
            };
            tracing::debug!(path = %path.display(), "using file store");
            AppStore::File(FileStore::new(path))
        }
        StoreKind::Redis => AppStore::Redis(RedisStore::from_env().context("Failed to open Redis store")?),
    };

    Ok(store)
}

fn default_store_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .context("Cannot locate the home directory; pass --store-path")?;
    Ok(PathBuf::from(home).join(".coinview").join("storage.json"))
}
