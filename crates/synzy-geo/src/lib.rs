//! # synzy-geo
//!
//! Pure enrichment for institution listings: haversine distance from an
//! origin, a composite quality score with display tiers, and the orderings
//! the listing offers. Nothing here performs I/O.

pub mod city;
pub mod distance;
pub mod enrich;
pub mod error;
pub mod score;

pub use city::CityPreset;
pub use distance::{
    Coordinates, EARTH_RADIUS_KM, distance_km, enrich_with_distance, extract_coordinates,
    format_distance,
};
pub use enrich::{EnrichedEntity, SortKey, enrich, sort_entities};
pub use error::GeoError;
pub use score::{ScoreTier, score, score_display};
