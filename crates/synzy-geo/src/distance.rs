//! Great-circle distance and coordinate extraction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use synzy_core::Entity;
use synzy_core::entity::value_as_f64;

use crate::error::GeoError;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lon"`.
impl FromStr for Coordinates {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GeoError::InvalidCoordinates(s.to_string());
        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid());
        }
        Ok(Self::new(latitude, longitude))
    }
}

/// Haversine distance in kilometres. NaN inputs give NaN.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Human-readable distance: metres below 1 km, one decimal below 10 km,
/// whole kilometres beyond.
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round())
    } else if km < 10.0 {
        // Round half up before formatting; `{:.1}` alone rounds half to even.
        format!("{:.1} Km", (km * 10.0).round() / 10.0)
    } else {
        format!("{} Km", km.round())
    }
}

/// Location of an entity, looked up in order:
/// `coordinates`, `location` (objects only), flat `lat`/`lng`, flat
/// `latitude`/`longitude`. The first shape present decides; an incomplete
/// one yields `None` without trying the next.
#[must_use]
pub fn extract_coordinates(entity: &Entity) -> Option<Coordinates> {
    if let Some(nested) = entity.get("coordinates").filter(|v| !v.is_null()) {
        return nested.as_object().and_then(from_nested);
    }
    if let Some(location) = entity.get_object("location") {
        return from_nested(location);
    }
    if let (Some(lat), Some(lng)) = (entity.get_f64("lat"), entity.get_f64("lng")) {
        return Some(Coordinates::new(lat, lng));
    }
    if let (Some(lat), Some(lon)) = (entity.get_f64("latitude"), entity.get_f64("longitude")) {
        return Some(Coordinates::new(lat, lon));
    }
    None
}

fn from_nested(map: &Map<String, Value>) -> Option<Coordinates> {
    let first = |keys: &[&str]| keys.iter().find_map(|k| map.get(*k).and_then(value_as_f64));
    Some(Coordinates::new(
        first(&["latitude", "lat"])?,
        first(&["longitude", "lng", "lon"])?,
    ))
}

/// Annotate every locatable entity with `distance` (formatted) and
/// `distanceValue` (km). Without an origin the list is returned as is.
#[must_use]
pub fn enrich_with_distance(entities: Vec<Entity>, origin: Option<Coordinates>) -> Vec<Entity> {
    let Some(origin) = origin else {
        return entities;
    };
    entities
        .into_iter()
        .map(|mut entity| {
            if let Some(at) = extract_coordinates(&entity) {
                let km = origin.distance_to(&at);
                entity.insert("distance", format_distance(km));
                entity.insert("distanceValue", km);
            }
            entity
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn entity(v: Value) -> Entity {
        Entity::from_value(v).expect("entity")
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected * 0.001;
        assert!(
            (actual - expected).abs() <= tolerance,
            "{actual} not within 0.1% of {expected}"
        );
    }

    #[test]
    fn same_point_is_zero() {
        assert_eq!(distance_km(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(distance_km(12.9716, 77.5946, 12.9716, 77.5946), 0.0);
    }

    #[rstest]
    #[case::bangalore_mumbai((12.9716, 77.5946), (19.0760, 72.8777), 845.318)]
    #[case::delhi_mumbai((28.7041, 77.1025), (19.0760, 72.8777), 1153.241)]
    #[case::london_paris((51.5074, -0.1278), (48.8566, 2.3522), 343.556)]
    fn matches_reference_distances(
        #[case] a: (f64, f64),
        #[case] b: (f64, f64),
        #[case] expected: f64,
    ) {
        assert_close(distance_km(a.0, a.1, b.0, b.1), expected);
        assert_close(distance_km(b.0, b.1, a.0, a.1), expected);
    }

    #[test]
    fn nan_propagates() {
        assert!(distance_km(f64::NAN, 0.0, 1.0, 1.0).is_nan());
    }

    #[rstest]
    #[case(0.0, "0m")]
    #[case(0.5, "500m")]
    #[case(0.9996, "1000m")]
    #[case(1.0, "1.0 Km")]
    #[case(1.25, "1.3 Km")]
    #[case(9.94, "9.9 Km")]
    #[case(10.0, "10 Km")]
    #[case(845.318, "845 Km")]
    fn formats_by_magnitude(#[case] km: f64, #[case] expected: &str) {
        assert_eq!(format_distance(km), expected);
    }

    #[rstest]
    #[case::nested(json!({ "coordinates": { "latitude": 1.5, "longitude": 2.5 } }))]
    #[case::nested_short(json!({ "coordinates": { "lat": 1.5, "lon": 2.5 } }))]
    #[case::location(json!({ "location": { "lat": 1.5, "lng": 2.5 } }))]
    #[case::flat_short(json!({ "lat": 1.5, "lng": 2.5 }))]
    #[case::flat_long(json!({ "latitude": "1.5", "longitude": "2.5" }))]
    fn extracts_every_shape(#[case] raw: Value) {
        assert_eq!(extract_coordinates(&entity(raw)), Some(Coordinates::new(1.5, 2.5)));
    }

    #[test]
    fn first_present_shape_wins() {
        let e = entity(json!({ "coordinates": { "lat": 1.0 }, "lat": 5.0, "lng": 6.0 }));
        assert_eq!(extract_coordinates(&e), None);
    }

    #[test]
    fn string_location_is_skipped() {
        let e = entity(json!({ "location": "Indiranagar", "lat": 5.0, "lng": 6.0 }));
        assert_eq!(extract_coordinates(&e), Some(Coordinates::new(5.0, 6.0)));
    }

    #[test]
    fn enrichment_without_origin_is_identity() {
        let list = vec![entity(json!({ "lat": 1.0, "lng": 2.0 }))];
        assert_eq!(enrich_with_distance(list.clone(), None), list);
    }

    #[test]
    fn enrichment_skips_unlocatable_entities() {
        let list = vec![
            entity(json!({ "name": "near", "lat": 12.9716, "lng": 77.5946 })),
            entity(json!({ "name": "nowhere" })),
        ];
        let out = enrich_with_distance(list, Some(Coordinates::new(12.9716, 77.5946)));
        assert_eq!(out[0].get_str("distance"), Some("0m"));
        assert_eq!(out[0].get_f64("distanceValue"), Some(0.0));
        assert_eq!(out[1].get("distance"), None);
    }

    #[rstest]
    #[case("12.9716,77.5946", Ok(Coordinates::new(12.9716, 77.5946)))]
    #[case(" 0 , 0 ", Ok(Coordinates::new(0.0, 0.0)))]
    #[case("91,0", Err(GeoError::InvalidCoordinates("91,0".into())))]
    #[case("north", Err(GeoError::InvalidCoordinates("north".into())))]
    fn parses_origin(#[case] raw: &str, #[case] expected: Result<Coordinates, GeoError>) {
        assert_eq!(raw.parse::<Coordinates>(), expected);
    }
}
