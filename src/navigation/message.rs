//! RINEX-4 frame and message types
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParsingError;

/// RINEX-4 frame class, found right after the '>' marker
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NavFrameType {
    /// Ephemeris frame
    Ephemeris,
    /// System time offset frame
    SystemTimeOffset,
    /// Earth orientation parameters frame
    EarthOrientation,
    /// Ionospheric model frame
    IonosphericModel,
}

impl std::str::FromStr for NavFrameType {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "EPH" => Ok(Self::Ephemeris),
            "STO" => Ok(Self::SystemTimeOffset),
            "EOP" => Ok(Self::EarthOrientation),
            "ION" => Ok(Self::IonosphericModel),
            _ => Err(ParsingError::NavFrame(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for NavFrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Ephemeris => write!(f, "EPH"),
            Self::SystemTimeOffset => write!(f, "STO"),
            Self::EarthOrientation => write!(f, "EOP"),
            Self::IonosphericModel => write!(f, "ION"),
        }
    }
}

/// Navigation message carried by a RINEX-4 frame.
/// RINEX-2 and RINEX-3 only carry legacy messages.
#[derive(Default, Debug, Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NavMessageType {
    /// Legacy NAV message
    #[default]
    LNAV,
    /// Glonass FDMA message
    FDMA,
    /// Galileo FNAV message
    FNAV,
    /// Galileo INAV message
    INAV,
    /// BeiDou D1 NAV message
    D1,
    /// BeiDou D2 NAV message
    D2,
    /// SBAS NAV message
    SBAS,
    /// GPS / QZSS Civilian NAV message
    CNAV,
    /// BeiDou CNV1 message
    CNV1,
    /// GPS / QZSS / BeiDou CNV2 message
    CNV2,
    /// BeiDou CNV3 message
    CNV3,
}

impl NavMessageType {
    /// True for messages that share the RINEX-3 record layout,
    /// which is what [super::Ephemeris] models.
    pub fn is_legacy(&self) -> bool {
        matches!(
            self,
            Self::LNAV | Self::FDMA | Self::FNAV | Self::INAV | Self::D1 | Self::D2 | Self::SBAS
        )
    }
}

impl std::str::FromStr for NavMessageType {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().to_uppercase();
        match c.as_str() {
            "LNAV" => Ok(Self::LNAV),
            "FDMA" => Ok(Self::FDMA),
            "FNAV" => Ok(Self::FNAV),
            "INAV" => Ok(Self::INAV),
            "D1" => Ok(Self::D1),
            "D2" => Ok(Self::D2),
            "SBAS" => Ok(Self::SBAS),
            "CNAV" => Ok(Self::CNAV),
            "CNV1" => Ok(Self::CNV1),
            "CNV2" => Ok(Self::CNV2),
            "CNV3" => Ok(Self::CNV3),
            _ => Err(ParsingError::NavFrame(c)),
        }
    }
}

impl std::fmt::Display for NavMessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::LNAV => write!(f, "LNAV"),
            Self::FNAV => write!(f, "FNAV"),
            Self::INAV => write!(f, "INAV"),
            Self::FDMA => write!(f, "FDMA"),
            Self::D1 => write!(f, "D1"),
            Self::D2 => write!(f, "D2"),
            Self::SBAS => write!(f, "SBAS"),
            Self::CNAV => write!(f, "CNAV"),
            Self::CNV1 => write!(f, "CNV1"),
            Self::CNV2 => write!(f, "CNV2"),
            Self::CNV3 => write!(f, "CNV3"),
        }
    }
}
