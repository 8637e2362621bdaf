//! GNSS constellations
use hifitime::TimeScale;

use crate::{error::ParsingError, version::Version};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes the satellite systems a RINEX stream may refer to
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SatelliteSystem {
    /// `GPS` american constellation,
    #[default]
    GPS,
    /// `Glonass` russian constellation
    Glonass,
    /// `Galileo` european constellation
    Galileo,
    /// `QZSS` japanese constellation
    QZSS,
    /// `BeiDou` chinese constellation
    BeiDou,
    /// Indian constellation, formerly IRNSS
    NavIC,
    /// Geostationary augmentation systems
    SBAS,
    /// `Mixed` for Mixed constellations
    /// RINEX files description
    Mixed,
}

/// All satellite systems that may carry observations, `Mixed` excluded
pub const SATELLITE_SYSTEMS: [SatelliteSystem; 7] = [
    SatelliteSystem::GPS,
    SatelliteSystem::Glonass,
    SatelliteSystem::Galileo,
    SatelliteSystem::QZSS,
    SatelliteSystem::BeiDou,
    SatelliteSystem::NavIC,
    SatelliteSystem::SBAS,
];

impl SatelliteSystem {
    /// Returns the standard one letter RINEX abbreviation
    pub fn abbreviation(&self) -> char {
        match self {
            Self::GPS => 'G',
            Self::Glonass => 'R',
            Self::Galileo => 'E',
            Self::QZSS => 'J',
            Self::BeiDou => 'C',
            Self::NavIC => 'I',
            Self::SBAS => 'S',
            Self::Mixed => 'M',
        }
    }
    /// Identifies a [SatelliteSystem] from its one letter RINEX abbreviation
    pub fn from_abbreviation(c: char) -> Result<Self, ParsingError> {
        match c {
            'G' => Ok(Self::GPS),
            'R' => Ok(Self::Glonass),
            'E' => Ok(Self::Galileo),
            'J' => Ok(Self::QZSS),
            'C' => Ok(Self::BeiDou),
            'I' => Ok(Self::NavIC),
            'S' => Ok(Self::SBAS),
            'M' => Ok(Self::Mixed),
            c => Err(ParsingError::SatelliteSystem(c.to_string())),
        }
    }
    /// Returns a readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::GPS => "GPS",
            Self::Glonass => "GLONASS",
            Self::Galileo => "Galileo",
            Self::QZSS => "QZSS",
            Self::BeiDou => "BeiDou",
            Self::NavIC => "NavIC",
            Self::SBAS => "SBAS",
            Self::Mixed => "Mixed",
        }
    }
    /// Returns the [TimeScale] this system expresses its epochs in.
    /// `Mixed` files are expressed in GPST unless stated otherwise.
    pub fn timescale(&self) -> TimeScale {
        match self {
            Self::Galileo => TimeScale::GST,
            Self::BeiDou => TimeScale::BDT,
            Self::Glonass => TimeScale::UTC,
            _ => TimeScale::GPST,
        }
    }
    /// Number of physical lines a broadcast ephemeris record spans
    /// (epoch line included), for given revision.
    pub fn nav_record_lines(&self, version: Version) -> usize {
        match self {
            Self::Glonass => {
                if version >= Version::new(3, 5) {
                    5
                } else {
                    4
                }
            },
            Self::SBAS => 4,
            _ => 8,
        }
    }
    pub(crate) fn is_mixed(&self) -> bool {
        *self == Self::Mixed
    }
}

impl std::fmt::Display for SatelliteSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::LowerHex for SatelliteSystem {
    /// {:x} formats Self as its single letter code
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for SatelliteSystem {
    type Err = ParsingError;
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let s = string.trim();
        if s.len() == 1 {
            let c = s.chars().next().unwrap_or(' ');
            return Self::from_abbreviation(c.to_ascii_uppercase());
        }
        let lower = s.to_lowercase();
        match lower.as_str() {
            "gps" => Ok(Self::GPS),
            "glo" | "glonass" => Ok(Self::Glonass),
            "gal" | "galileo" => Ok(Self::Galileo),
            "qzs" | "qzss" => Ok(Self::QZSS),
            "bds" | "beidou" => Ok(Self::BeiDou),
            "irn" | "irnss" | "navic" => Ok(Self::NavIC),
            "sbas" | "geo" => Ok(Self::SBAS),
            "mixed" => Ok(Self::Mixed),
            _ => Err(ParsingError::SatelliteSystem(string.to_string())),
        }
    }
}
