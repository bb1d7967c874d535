use serde::Serialize;
use synzy_core::Entity;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CompareCommands;
use crate::commands::shared::parse_entity;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CompareResponse {
    action: &'static str,
    count: usize,
    items: Vec<Entity>,
}

pub fn handle(action: &CompareCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.comparison();
    let (verb, items) = match action {
        CompareCommands::List => ("list", store.load()),
        CompareCommands::Toggle { entity } => {
            let entity = parse_entity(entity)?;
            let was_listed = store.contains(&entity);
            let items = store.toggle(&entity)?;
            (toggle_verb(was_listed, store.contains(&entity)), items)
        }
        CompareCommands::Add { entity } => {
            let entity = parse_entity(entity)?;
            let before = store.len();
            let items = store.add(&entity)?;
            (if items.len() > before { "added" } else { "unchanged" }, items)
        }
        CompareCommands::Clear => {
            store.clear()?;
            ("cleared", Vec::new())
        }
    };

    output(
        &CompareResponse {
            action: verb,
            count: items.len(),
            items,
        },
        flags.format,
    )
}

const fn toggle_verb(was_listed: bool, is_listed: bool) -> &'static str {
    match (was_listed, is_listed) {
        (false, true) => "added",
        (true, false) => "removed",
        _ => "unchanged",
    }
}
