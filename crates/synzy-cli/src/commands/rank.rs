use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use synzy_config::GeoConfig;
use synzy_core::Entity;
use synzy_geo::{CityPreset, Coordinates, SortKey, enrich, sort_entities};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RankArgs;
use crate::context::AppContext;
use crate::output::output;

pub fn handle(args: &RankArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entities = read_listing(&args.file)?;
    let origin = resolve_origin(args, &ctx.config.geo)?;
    let sort: SortKey = args
        .sort
        .as_deref()
        .unwrap_or(&ctx.config.geo.sort)
        .parse()?;

    let mut ranked = enrich(entities, origin);
    sort_entities(&mut ranked, sort);
    if let Some(limit) = args.limit {
        ranked.truncate(limit);
    }
    tracing::debug!(%sort, results = ranked.len(), "listing ranked");

    output(&ranked, flags.format)
}

/// `--origin`, else `--city`, else the configured default city, else none.
fn resolve_origin(args: &RankArgs, geo: &GeoConfig) -> anyhow::Result<Option<Coordinates>> {
    if let Some(raw) = &args.origin {
        return Ok(Some(raw.parse()?));
    }
    let city = args.city.as_deref().or_else(|| geo.default_city());
    city.map(|name| {
        name.parse::<CityPreset>()
            .map(CityPreset::coordinates)
            .map_err(anyhow::Error::from)
    })
    .transpose()
}

fn read_listing(path: &Path) -> anyhow::Result<Vec<Entity>> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read listing from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read listing {}", path.display()))?
    };
    parse_listing(&raw)
}

fn parse_listing(raw: &str) -> anyhow::Result<Vec<Entity>> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw).context("listing is not valid JSON")? else {
        anyhow::bail!("listing must be a JSON array of records");
    };
    let total = items.len();
    let entities: Vec<Entity> = items
        .into_iter()
        .filter_map(|item| Entity::from_value(item).ok())
        .collect();
    if entities.len() < total {
        tracing::warn!(skipped = total - entities.len(), "skipped listing items that are not objects");
    }
    Ok(entities)
}
