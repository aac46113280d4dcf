use crate::core::{
    api::CatalogApi,
    context::ExplorerContext,
    entity::EntityId,
    error::Result,
    output::{print_hint, print_section_header},
    render::colored_status,
};
use colored::*;

/// Print one entity with its favorite flag and saved note.
pub async fn execute_show(api_url: Option<&str>, id: EntityId) -> Result<()> {
    let ctx = ExplorerContext::initialize(api_url)?;
    let entity = ctx.api.fetch_entity(id).await?;
    let favorite = ctx.explorer.favorites().contains(id);
    let note = ctx.notes().get(id);

    print_section_header(&entity.name);
    println!("   {:<10}{}", "ID".bright_black(), entity.id);
    println!("   {:<10}{}", "Status".bright_black(), colored_status(&entity.status));
    if !entity.image.is_empty() {
        println!("   {:<10}{}", "Image".bright_black(), entity.image);
    }
    println!(
        "   {:<10}{}",
        "Favorite".bright_black(),
        if favorite { "★ yes".yellow() } else { "no".white() }
    );

    match note {
        Some(note) => println!("   {:<10}{}", "Note".bright_black(), note.white()),
        None => {
            println!();
            print_hint(&format!(
                "No note yet. Add one with: catalog-explorer note {id} <text>"
            ));
        }
    }

    Ok(())
}
