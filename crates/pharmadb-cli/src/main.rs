mod kakao;
mod prompt;
mod render;

use clap::{Parser, Subcommand};
use pharmadb_client::{PharmacyStore, StoreClient};
use pharmadb_core::{AppConfig, Coordinate, NewPharmacy};
use pharmadb_ui::{ListController, MutationOutcome, SaveOutcome, SearchController, SearchOutcome};
use tracing_subscriber::EnvFilter;

use crate::kakao::TerminalMap;
use crate::prompt::TerminalPrompter;

#[derive(Debug, Parser)]
#[command(name = "pharmadb")]
#[command(about = "Search nearby pharmacies and manage the saved records")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find pharmacies near an address and store them
    Search {
        address: String,
    },
    /// Search an address, then save one result individually
    Save {
        address: String,
        /// Position of the result in the search output
        #[arg(long, default_value = "0")]
        index: usize,
    },
    /// Show every saved pharmacy
    List,
    /// Show saved pharmacies within a distance
    Nearby {
        #[arg(long)]
        distance: f64,
    },
    /// Show one saved pharmacy
    Get {
        id: i64,
    },
    /// Delete a saved pharmacy
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Store a pharmacy by hand
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        distance: f64,
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
        #[arg(long)]
        address: Option<String>,
    },
    /// Resolve an address to coordinates and draw the map there
    Geocode {
        address: String,
    },
    /// Check that the backend is reachable
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = pharmadb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("pharmadb: no command given, try --help");
        return Ok(());
    };
    run(command, &config).await
}

async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    let store = StoreClient::new(config)?;

    match command {
        Commands::Search { address } => {
            let page = SearchController::new(
                store,
                TerminalMap::from_config(config)?,
                TerminalPrompter::new(false),
            );
            page.mount();
            let outcome = page.search(&address).await;
            let view = page.view();
            if let Some(message) = view.error() {
                anyhow::bail!("{message}");
            }
            if outcome != SearchOutcome::Empty {
                print!("{}", render::search(&view));
            }
            if let Some(map) = page.map() {
                print!("{map}");
            }
        }
        Commands::Save { address, index } => {
            let page = SearchController::new(
                store,
                TerminalMap::from_config(config)?,
                TerminalPrompter::new(false),
            );
            page.mount();
            page.search(&address).await;
            if let Some(message) = page.view().error() {
                anyhow::bail!("{message}");
            }
            let outcome = page.save_one(index).await;
            print!("{}", render::search(&page.view()));
            match outcome {
                SaveOutcome::Saved(_) => {}
                SaveOutcome::Ignored => anyhow::bail!("no search result at index {index}"),
                SaveOutcome::Failed | SaveOutcome::Stale => {
                    anyhow::bail!("save did not complete");
                }
            }
        }
        Commands::List => {
            let page = ListController::new(store, TerminalPrompter::new(false));
            page.mount().await;
            let view = page.view();
            if let Some(message) = view.error() {
                anyhow::bail!("{message}");
            }
            print!("{}", render::records(&view.records));
        }
        Commands::Nearby { distance } => {
            let records = store.nearby(distance).await?;
            print!("{}", render::records(&records));
        }
        Commands::Get { id } => {
            let record = store.get_by_id(id).await?;
            println!("{}", render::record_line(&record));
        }
        Commands::Delete { id, yes } => {
            let page = ListController::new(store, TerminalPrompter::new(yes));
            page.mount().await;
            let outcome = page.delete(id).await;
            let view = page.view();
            if let Some(message) = view.error() {
                anyhow::bail!("{message}");
            }
            if outcome == MutationOutcome::Completed {
                print!("{}", render::records(&view.records));
            }
        }
        Commands::Register {
            name,
            distance,
            latitude,
            longitude,
            address,
        } => {
            let record =
                NewPharmacy::new(&name, distance, Coordinate::new(latitude, longitude), address)?;
            let page = ListController::new(store, TerminalPrompter::new(false));
            page.mount().await;
            page.register(&record).await;
            let view = page.view();
            if let Some(message) = view.error() {
                anyhow::bail!("{message}");
            }
            print!("{}", render::records(&view.records));
        }
        Commands::Geocode { address } => {
            let page = SearchController::new(
                store,
                TerminalMap::from_config(config)?,
                TerminalPrompter::new(false),
            );
            page.mount();
            match page.locate(&address).await {
                Some(position) => println!("{address}: {position}"),
                None => anyhow::bail!("could not geocode \"{address}\""),
            }
            if let Some(map) = page.map() {
                print!("{map}");
            }
        }
        Commands::Health => {
            let status = store.health_check().await?;
            println!("{}", status.trim());
        }
    }

    Ok(())
}
