use std::fmt;
use std::str::FromStr;

use crate::distance::Coordinates;
use crate::error::GeoError;

/// Manual origins offered when device location is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CityPreset {
    Bangalore,
    Mumbai,
    Delhi,
    Chennai,
    Hyderabad,
    Pune,
}

impl CityPreset {
    pub const ALL: [Self; 6] = [
        Self::Bangalore,
        Self::Mumbai,
        Self::Delhi,
        Self::Chennai,
        Self::Hyderabad,
        Self::Pune,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bangalore => "Bangalore",
            Self::Mumbai => "Mumbai",
            Self::Delhi => "Delhi",
            Self::Chennai => "Chennai",
            Self::Hyderabad => "Hyderabad",
            Self::Pune => "Pune",
        }
    }

    #[must_use]
    pub const fn coordinates(self) -> Coordinates {
        match self {
            Self::Bangalore => Coordinates::new(12.9716, 77.5946),
            Self::Mumbai => Coordinates::new(19.0760, 72.8777),
            Self::Delhi => Coordinates::new(28.7041, 77.1025),
            Self::Chennai => Coordinates::new(13.0827, 80.2707),
            Self::Hyderabad => Coordinates::new(17.3850, 78.4867),
            Self::Pune => Coordinates::new(18.5204, 73.8567),
        }
    }
}

impl fmt::Display for CityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CityPreset {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GeoError::UnknownCity(s.to_string()))
    }
}
