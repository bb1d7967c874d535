//! List-view enrichment and ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use synzy_core::Entity;

use crate::distance::{Coordinates, extract_coordinates, format_distance};
use crate::error::GeoError;
use crate::score::{ScoreTier, score, score_display};

/// An entity with its derived presentation fields. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedEntity {
    pub entity: Entity,
    pub distance: Option<String>,
    /// Kilometres from the origin, for sorting.
    pub distance_value: Option<f64>,
    pub score: u8,
    pub score_display: String,
    pub tier: ScoreTier,
}

impl EnrichedEntity {
    #[must_use]
    pub fn new(entity: Entity, origin: Option<Coordinates>) -> Self {
        let score = score(&entity);
        let distance_value = origin
            .zip(extract_coordinates(&entity))
            .map(|(from, to)| from.distance_to(&to));
        Self {
            distance: distance_value.map(format_distance),
            distance_value,
            score,
            score_display: score_display(score),
            tier: ScoreTier::from_score(score),
            entity,
        }
    }

    #[must_use]
    pub const fn score_color_class(&self) -> &'static str {
        self.tier.color_class()
    }

    /// The original record with the derived fields written over it.
    #[must_use]
    pub fn to_entity(&self) -> Entity {
        let mut out = self.entity.clone();
        out.insert("score", self.score);
        out.insert("scoreDisplay", self.score_display.as_str());
        out.insert("scoreColorClass", self.score_color_class());
        if let (Some(distance), Some(value)) = (&self.distance, self.distance_value) {
            out.insert("distance", distance.as_str());
            out.insert("distanceValue", value);
        }
        out
    }
}

impl Serialize for EnrichedEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_entity().serialize(serializer)
    }
}

/// Score every entity, then measure it from `origin` when given.
#[must_use]
pub fn enrich(entities: Vec<Entity>, origin: Option<Coordinates>) -> Vec<EnrichedEntity> {
    let enriched: Vec<EnrichedEntity> = entities
        .into_iter()
        .map(|e| EnrichedEntity::new(e, origin))
        .collect();
    tracing::debug!(
        count = enriched.len(),
        located = enriched.iter().filter(|e| e.distance_value.is_some()).count(),
        "enriched listing"
    );
    enriched
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Nearest first; entities without a distance go last.
    #[default]
    Distance,
    /// Highest first.
    Score,
    /// Case-insensitive by name.
    Name,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Score => "score",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "score" => Ok(Self::Score),
            "name" => Ok(Self::Name),
            _ => Err(GeoError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Stable in-place sort.
pub fn sort_entities(list: &mut [EnrichedEntity], key: SortKey) {
    match key {
        SortKey::Distance => list.sort_by(|a, b| match (a.distance_value, b.distance_value) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::Score => list.sort_by(|a, b| b.score.cmp(&a.score)),
        SortKey::Name => list.sort_by_cached_key(|e| e.entity.name().unwrap_or_default().to_lowercase()),
    }
}
