use catalog_explorer::commands::*;
use catalog_explorer::core::{entity::EntityId, error::Result, print_error};
use clap::{Parser, Subcommand};
use std::env;

#[derive(Parser)]
#[command(name = "catalog-explorer")]
#[command(about = "Browse a remote paginated catalog with search, filters and favorites")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Catalog API base URL (overrides config and CATALOG_EXPLORER_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current list, or replace the state first
    Browse {
        /// Search text
        #[arg(long)]
        q: Option<String>,
        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,
        /// Status filter: alive, dead or unknown
        #[arg(long)]
        status: Option<String>,
        /// Sort order: name-asc or name-desc
        #[arg(long)]
        sort: Option<String>,
        /// Show favorites instead of the catalog
        #[arg(long)]
        favorites: bool,
        /// Full query string to start from (e.g., "q=rick&page=2")
        #[arg(long, value_name = "QUERY")]
        state: Option<String>,
    },
    /// Search by name (page resets to 1)
    Search {
        /// Search text; omit to clear
        text: Vec<String>,
    },
    /// Set or clear the status filter
    Status {
        /// alive, dead or unknown; omit to clear
        status: Option<String>,
    },
    /// Set or clear the sort order
    Sort {
        /// name-asc or name-desc; omit to clear
        sort: Option<String>,
    },
    /// Toggle favorites mode
    Favorites,
    /// Go to the next page
    Next,
    /// Go to the previous page
    Prev,
    /// Toggle favorites by displayed index or by id
    Fav {
        /// Displayed indices (e.g., "1 3-5,8")
        indices: Vec<String>,
        /// Toggle this entity id instead
        #[arg(long, conflicts_with = "indices")]
        id: Option<EntityId>,
    },
    /// Show one entity with its note
    Show {
        /// Entity id
        id: EntityId,
    },
    /// Save or clear a note for an entity
    Note {
        /// Entity id
        id: EntityId,
        /// Note text
        text: Vec<String>,
        /// Remove the saved note
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },
    /// Interactive session: type to search, ':' for commands
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let api_url = cli.api_url.as_deref();
    let result = match cli.command {
        Commands::Browse {
            q,
            page,
            status,
            sort,
            favorites,
            state,
        } => {
            let args = BrowseArgs {
                q,
                page,
                status,
                sort,
                favorites,
                state,
            };
            execute_browse(api_url, args).await
        }
        Commands::Search { text } => execute_search(api_url, text).await,
        Commands::Status { status } => execute_status_filter(api_url, status).await,
        Commands::Sort { sort } => execute_sort(api_url, sort).await,
        Commands::Favorites => execute_favorites_mode(api_url).await,
        Commands::Next => execute_next(api_url).await,
        Commands::Prev => execute_prev(api_url).await,
        Commands::Fav { indices, id } => execute_fav(api_url, indices, id).await,
        Commands::Show { id } => execute_show(api_url, id).await,
        Commands::Note { id, text, clear } => execute_note(api_url, id, text, clear),
        Commands::Interactive => execute_interactive(api_url).await,
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
