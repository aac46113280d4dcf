use crate::core::{
    context::ExplorerContext,
    entity::EntityId,
    error::Result,
    output::print_success,
};

/// Save a note for `id`, or remove it with `clear`.
pub fn execute_note(api_url: Option<&str>, id: EntityId, words: Vec<String>, clear: bool) -> Result<()> {
    let ctx = ExplorerContext::initialize(api_url)?;
    let mut notes = ctx.notes();

    if clear {
        notes.clear(id)?;
        print_success(&format!("Note cleared for #{id}"));
        return Ok(());
    }

    notes.save(id, &words.join(" "))?;
    print_success(&format!("Note saved for #{id}"));
    Ok(())
}
