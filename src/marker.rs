//! Geodetic marker description
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [GeodeticMarker] identifies the observation site
#[derive(Default, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodeticMarker {
    /// Marker name
    pub name: String,
    /// Marker number, usually a DOMES number
    pub number: Option<String>,
    /// Marker type, like "GEODETIC" or "NON_GEODETIC"
    pub marker_type: Option<String>,
}

impl GeodeticMarker {
    /// Builds a new [GeodeticMarker] with given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
    /// Copies and returns [GeodeticMarker] with given number
    pub fn with_number(&self, number: &str) -> Self {
        let mut s = self.clone();
        s.number = Some(number.to_string());
        s
    }
    /// Copies and returns [GeodeticMarker] with given type
    pub fn with_marker_type(&self, marker_type: &str) -> Self {
        let mut s = self.clone();
        s.marker_type = Some(marker_type.to_string());
        s
    }
}
