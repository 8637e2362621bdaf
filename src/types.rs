//! `RINEX` types description
use crate::{constellation::SatelliteSystem, error::ParsingError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes the `RINEX` file types this library decodes
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// Describes Observation Data (OBS),
    /// Phase & Pseudo range measurements
    #[default]
    ObservationData,
    /// Describes Navigation Data (NAV):
    /// broadcast ephemerides
    NavigationData,
    /// Describes Meteorological data (MET)
    MeteoData,
    /// Clock Data (CLK)
    ClockData,
}

impl std::fmt::Display for Type {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::ObservationData => write!(fmt, "OBSERVATION DATA"),
            Self::NavigationData => write!(fmt, "NAVIGATION DATA"),
            Self::MeteoData => write!(fmt, "METEOROLOGICAL DATA"),
            Self::ClockData => write!(fmt, "CLOCK DATA"),
        }
    }
}

impl Type {
    /// Identifies the file type from the letter found in the
    /// "RINEX VERSION / TYPE" line. RINEX-2 navigation files
    /// imply their satellite system through this letter.
    pub fn from_letter(c: char) -> Result<(Self, Option<SatelliteSystem>), ParsingError> {
        match c {
            'O' => Ok((Self::ObservationData, None)),
            'N' => Ok((Self::NavigationData, None)),
            'G' => Ok((Self::NavigationData, Some(SatelliteSystem::Glonass))),
            'H' => Ok((Self::NavigationData, Some(SatelliteSystem::SBAS))),
            'E' => Ok((Self::NavigationData, Some(SatelliteSystem::Galileo))),
            'M' => Ok((Self::MeteoData, None)),
            'C' => Ok((Self::ClockData, None)),
            c => Err(ParsingError::RinexType(c.to_string())),
        }
    }
    /// Returns the letter that identifies this type
    pub fn letter(&self) -> char {
        match self {
            Self::ObservationData => 'O',
            Self::NavigationData => 'N',
            Self::MeteoData => 'M',
            Self::ClockData => 'C',
        }
    }
}
