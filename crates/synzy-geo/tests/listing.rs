use pretty_assertions::assert_eq;
use serde_json::json;
use synzy_core::Entity;
use synzy_geo::{CityPreset, SortKey, enrich, enrich_with_distance, sort_entities};

fn campus(name: &str, city: CityPreset, rank: u32) -> Entity {
    let at = city.coordinates();
    Entity::from_value(json!({
        "_id": name.to_lowercase(),
        "name": name,
        "location": { "latitude": at.latitude, "longitude": at.longitude },
        "rank": rank,
    }))
    .expect("entity")
}

#[test]
fn nearest_campus_from_city_preset() {
    let listing = vec![
        campus("Delhi Campus", CityPreset::Delhi, 3),
        campus("Pune Campus", CityPreset::Pune, 40),
        campus("Chennai Campus", CityPreset::Chennai, 1),
    ];

    let origin: CityPreset = "mumbai".parse().expect("preset");
    let mut enriched = enrich(listing, Some(origin.coordinates()));
    sort_entities(&mut enriched, SortKey::Distance);

    let order: Vec<&str> = enriched.iter().filter_map(|e| e.entity.name()).collect();
    assert_eq!(order, vec!["Pune Campus", "Chennai Campus", "Delhi Campus"]);
    assert_eq!(enriched[0].distance.as_deref(), Some("120 Km"));

    sort_entities(&mut enriched, SortKey::Score);
    assert_eq!(enriched[0].entity.name(), Some("Chennai Campus"));
    assert_eq!(enriched[0].score, 100);
}

#[test]
fn distance_only_enrichment_leaves_score_fields_out() {
    let listing = vec![campus("Pune Campus", CityPreset::Pune, 40)];
    let out = enrich_with_distance(listing, Some(CityPreset::Pune.coordinates()));
    assert_eq!(out[0].get_str("distance"), Some("0m"));
    assert_eq!(out[0].get("score"), None);
}
