use num_traits::FromPrimitive;
use std::str::FromStr;

use crate::error::ParsingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `EpochFlag` validates an epoch,
/// or describes possible events that occurred
#[derive(Copy, Clone, Debug, Default, FromPrimitive)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EpochFlag {
    /// Epoch is sane
    #[default]
    Ok = 0,
    /// Power failure since previous epoch
    PowerFailure = 1,
    /// Antenna is being moved at current epoch
    AntennaBeingMoved = 2,
    /// Site has changed, receiver has moved since last epoch
    NewSiteOccupation = 3,
    /// Header information follows this epoch
    HeaderInformationFollows = 4,
    /// External event - significant event in this epoch
    ExternalEvent = 5,
    /// Cycle slip records follow
    CycleSlip = 6,
}

impl EpochFlag {
    /// Returns True if self is a valid epoch
    pub fn is_ok(self) -> bool {
        self == EpochFlag::Ok
    }
    /// Returns true for event flags, which announce a block
    /// of special records rather than observations
    pub fn is_event(self) -> bool {
        matches!(
            self,
            Self::AntennaBeingMoved
                | Self::NewSiteOccupation
                | Self::HeaderInformationFollows
                | Self::ExternalEvent
        )
    }
}

impl FromStr for EpochFlag {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::Ok);
        }
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(Self::from_u8)
            .ok_or_else(|| ParsingError::EpochFlag(s.to_string()))
    }
}

impl std::fmt::Display for EpochFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
