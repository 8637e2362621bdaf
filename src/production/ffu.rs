use super::Error;
use hifitime::{Duration, Unit, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// FFU describes the sampling rate of Observation files
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FFU {
    /// Sample rate
    pub val: u32,
    /// Period unit
    pub unit: Unit,
}

impl From<Duration> for FFU {
    fn from(dt: Duration) -> Self {
        let total_seconds = dt.to_seconds();
        if dt < SECONDS_PER_MINUTE * Unit::Second {
            Self {
                val: total_seconds.round() as u32,
                unit: Unit::Second,
            }
        } else if dt < 1.0 * Unit::Hour {
            Self {
                val: (total_seconds / SECONDS_PER_MINUTE).round() as u32,
                unit: Unit::Minute,
            }
        } else if dt < 1.0 * Unit::Day {
            Self {
                val: (total_seconds / SECONDS_PER_HOUR).round() as u32,
                unit: Unit::Hour,
            }
        } else {
            Self {
                val: (total_seconds / SECONDS_PER_DAY).round() as u32,
                unit: Unit::Day,
            }
        }
    }
}

impl FFU {
    /// Returns the sampling period
    pub fn duration(&self) -> Duration {
        f64::from(self.val) * self.unit
    }
}

impl Default for FFU {
    fn default() -> Self {
        Self {
            val: 30,
            unit: Unit::Second,
        }
    }
}

impl std::fmt::Display for FFU {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let unit = match self.unit {
            Unit::Minute => 'M',
            Unit::Hour => 'H',
            Unit::Day => 'D',
            _ => 'S',
        };
        write!(f, "{:02}{}", self.val, unit)
    }
}

impl std::str::FromStr for FFU {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 || !s.is_ascii() {
            return Err(Error::InvalidFFU);
        }
        let val = s[..2].parse::<u32>().map_err(|_| Error::InvalidFFU)?;
        let unit = match s.chars().nth(2) {
            Some('S') => Unit::Second,
            Some('M') => Unit::Minute,
            Some('H') => Unit::Hour,
            Some('D') => Unit::Day,
            _ => return Err(Error::InvalidFFU),
        };
        Ok(Self { val, unit })
    }
}

#[cfg(test)]
mod test {
    use super::FFU;
    use hifitime::{Duration, Unit, SECONDS_PER_DAY};
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("30S", 30, Unit::Second)]
    #[case("01M", 1, Unit::Minute)]
    #[case("15M", 15, Unit::Minute)]
    #[case("01H", 1, Unit::Hour)]
    #[case("04H", 4, Unit::Hour)]
    #[case("01D", 1, Unit::Day)]
    #[case("07D", 7, Unit::Day)]
    fn ffu_parsing(#[case] desc: &str, #[case] val: u32, #[case] unit: Unit) {
        let ffu = FFU::from_str(desc).unwrap();
        assert_eq!(ffu, FFU { val, unit });
        assert_eq!(ffu.to_string(), desc);
    }

    #[test]
    fn invalid_ffu() {
        for desc in ["30", "30X", "ABS", "030S"] {
            assert!(FFU::from_str(desc).is_err(), "\"{}\" should not parse", desc);
        }
    }

    #[test]
    fn ffu_cast() {
        for (duration, expected) in [
            (Duration::from_seconds(30.0), FFU::default()),
            (
                Duration::from_seconds(60.0),
                FFU {
                    val: 1,
                    unit: Unit::Minute,
                },
            ),
            (
                Duration::from_seconds(3600.0),
                FFU {
                    val: 1,
                    unit: Unit::Hour,
                },
            ),
            (
                Duration::from_seconds(SECONDS_PER_DAY),
                FFU {
                    val: 1,
                    unit: Unit::Day,
                },
            ),
        ] {
            assert_eq!(FFU::from(duration), expected);
            assert_eq!(expected.duration(), duration);
        }
    }
}
