//! Describes `leap` second information, contained in `header`
use hifitime::TimeScale;

use crate::{
    epoch::parse_time_system,
    error::ParsingError,
    fields::{field, parse_int, parse_opt_int},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `Leap` to describe leap seconds.
/// GLO = UTC = GPS - ΔtLS
/// GPS = UTC + ΔtLS
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leap {
    /// current number
    pub leap: u32,
    /// ΔtLS : "future or past leap second(s)",
    /// actual number of leap seconds between GPS/GAL and GLO,
    /// or BDS and UTC.
    pub delta_tls: Option<u32>,
    /// weeks counter
    pub week: Option<u32>,
    /// days counter
    pub day: Option<u32>,
    /// [TimeScale] these figures refer to
    pub timescale: Option<TimeScale>,
}

impl Leap {
    /// Builds a new `Leap` object to describe leap seconds
    pub fn new(leap: u32) -> Self {
        Self {
            leap,
            ..Default::default()
        }
    }
    /// Parses the "LEAP SECONDS" value field: 4I6, A3.
    /// Only the first value is mandatory.
    pub(crate) fn parse(content: &str) -> Result<Self, ParsingError> {
        Ok(Self {
            leap: parse_int(field(content, 0, 6))?,
            delta_tls: parse_opt_int(field(content, 6, 6))?,
            week: parse_opt_int(field(content, 12, 6))?,
            day: parse_opt_int(field(content, 18, 6))?,
            timescale: parse_time_system(field(content, 24, 3)),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn basic_format() {
        let leap = Leap::parse("    18").unwrap();
        assert_eq!(leap, Leap::new(18));
    }
    #[test]
    fn standard_format() {
        let leap = Leap::parse("    18    18  2185     7").unwrap();
        assert_eq!(leap.leap, 18);
        assert_eq!(leap.delta_tls, Some(18));
        assert_eq!(leap.week, Some(2185));
        assert_eq!(leap.day, Some(7));
        assert_eq!(leap.timescale, None);
    }
    #[test]
    fn parse_with_timescale() {
        let leap = Leap::parse("    18    18  2185     7GPS").unwrap();
        assert_eq!(leap.week, Some(2185));
        assert_eq!(leap.timescale, Some(TimeScale::GPST));
    }
    #[test]
    fn invalid() {
        assert!(Leap::parse("    1x").is_err());
    }
}
