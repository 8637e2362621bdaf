use super::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the data comes from, as stated by long filenames
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataSource {
    /// Source of data is hardware (radio) receiver.
    /// It can also represent a sensor in case of meteo observations.
    Receiver,
    /// Other stream source, like RTCM
    Stream,
    /// Unknown data source
    #[default]
    Unknown,
}

impl std::str::FromStr for DataSource {
    type Err = Error;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        match content {
            "R" => Ok(Self::Receiver),
            "S" => Ok(Self::Stream),
            "U" => Ok(Self::Unknown),
            _ => Err(Error::NonStandardFileName),
        }
    }
}

impl DataSource {
    pub(crate) fn to_char(self) -> char {
        match self {
            Self::Receiver => 'R',
            Self::Stream => 'S',
            Self::Unknown => 'U',
        }
    }
}
