use super::Error;
use hifitime::{Duration, Unit, DAYS_PER_YEAR};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Period of production: how much time one file covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PPU {
    /// 24h of data, the most common
    #[default]
    Daily,
    /// 15' of data, high rate files
    QuarterHour,
    /// 1h of data
    Hourly,
    /// 1 year of data
    Yearly,
    /// Period this library does not know of
    Unspecified,
}

/// Filename codes, unspecified periods excluded
const CODES: [(&str, PPU); 4] = [
    ("15M", PPU::QuarterHour),
    ("01H", PPU::Hourly),
    ("01D", PPU::Daily),
    ("01Y", PPU::Yearly),
];

impl PPU {
    /// Returns the [Duration] one file covers
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::QuarterHour => Some(15 * Unit::Minute),
            Self::Hourly => Some(1 * Unit::Hour),
            Self::Daily => Some(1 * Unit::Day),
            Self::Yearly => Some(DAYS_PER_YEAR * Unit::Day),
            Self::Unspecified => None,
        }
    }
}

impl From<Duration> for PPU {
    /// Smallest period covering `dt`. Anything shorter than 5'
    /// or longer than a day (and less than a year) is unspecified.
    fn from(dt: Duration) -> Self {
        if dt >= DAYS_PER_YEAR * Unit::Day {
            return Self::Yearly;
        }
        if dt <= 5 * Unit::Minute || dt > 1 * Unit::Day {
            return Self::Unspecified;
        }
        [Self::QuarterHour, Self::Hourly, Self::Daily]
            .into_iter()
            .find(|ppu| ppu.duration().is_some_and(|period| dt <= period))
            .unwrap_or(Self::Unspecified)
    }
}

impl std::fmt::Display for PPU {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code = CODES
            .iter()
            .find(|(_, ppu)| ppu == self)
            .map(|(code, _)| *code)
            .unwrap_or("00U");
        f.write_str(code)
    }
}

impl std::str::FromStr for PPU {
    type Err = Error;
    /// Unknown codes are accepted, as [PPU::Unspecified]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CODES
            .iter()
            .find(|(code, _)| *code == s)
            .map(|(_, ppu)| *ppu)
            .unwrap_or(Self::Unspecified))
    }
}
