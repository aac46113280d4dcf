use crate::commands::browse::present;
use crate::core::{
    context::ExplorerContext,
    entity::EntityId,
    error::Result,
    index_parser::IndexParser,
    output::{print_hint, print_success},
    state::load_snapshot,
};

/// Toggle favorites for displayed rows (`fav 1 3-5`) or for a raw id.
pub async fn execute_fav(
    api_url: Option<&str>,
    indices: Vec<String>,
    id: Option<EntityId>,
) -> Result<()> {
    let mut ctx = ExplorerContext::initialize(api_url)?;

    let targets: Vec<(EntityId, String)> = match id {
        Some(id) => vec![(id, format!("#{id}"))],
        None => {
            let snapshot = load_snapshot(&ctx.session_dir)?;
            let indices = IndexParser::parse_args(&indices, snapshot.entries.len())?;
            snapshot
                .select(&indices)
                .into_iter()
                .map(|entry| (entry.id, format!("{} (#{})", entry.name, entry.id)))
                .collect()
        }
    };

    for (id, label) in &targets {
        let favorites = ctx.explorer.toggle_favorite(*id);
        if favorites.contains(*id) {
            print_success(&format!("Added {label} to favorites"));
        } else {
            print_success(&format!("Removed {label} from favorites"));
        }
    }

    if !ctx.explorer.favorites_persistent() {
        print_hint("Favorites could not be saved and only last for this run.");
    }

    // The favorites list itself changed; show it again
    if ctx.explorer.state().favorites_mode {
        present(&mut ctx).await?;
    }

    Ok(())
}
