//! Distance and ranking defaults for list views.

use serde::{Deserialize, Serialize};

fn default_sort() -> String {
    "distance".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeoConfig {
    /// City preset used as the origin when none is given (e.g. "Bangalore").
    #[serde(default)]
    pub default_city: String,

    /// Default sort order: `distance`, `score` or `name`.
    #[serde(default = "default_sort")]
    pub sort: String,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            default_city: String::new(),
            sort: default_sort(),
        }
    }
}

impl GeoConfig {
    #[must_use]
    pub fn default_city(&self) -> Option<&str> {
        Some(self.default_city.trim()).filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeoConfig::default();
        assert_eq!(config.sort, "distance");
        assert!(config.default_city().is_none());
    }

    #[test]
    fn blank_city_is_unset() {
        let config = GeoConfig {
            default_city: "  ".into(),
            ..GeoConfig::default()
        };
        assert!(config.default_city().is_none());
    }
}
