//! Clock RINEX module
use std::str::FromStr;

use hifitime::{Epoch, TimeScale};

use crate::{
    epoch::parse_in_timescale,
    error::ParsingError,
    fields::{field, parse_float, parse_int, tail},
    prn::PRN,
    version::Version,
};

mod decoder;
mod header;

pub use decoder::ClockDecoder;
pub use header::{HeaderFields, SolutionStation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clock data types
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockDataType {
    /// Data analysis results for receiver clocks
    /// derived from a set of network receivers and satellites
    #[default]
    AR,
    /// Data analysis results for satellites clocks
    AS,
    /// Calibration measurement for a single GNSS receiver
    CR,
    /// Discontinuity measurements for a single GNSS receiver
    DR,
    /// Monitor measurement for broadcast satellite clocks
    MS,
}

impl std::fmt::Display for ClockDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::AR => f.write_str("AR"),
            Self::AS => f.write_str("AS"),
            Self::CR => f.write_str("CR"),
            Self::DR => f.write_str("DR"),
            Self::MS => f.write_str("MS"),
        }
    }
}

impl FromStr for ClockDataType {
    type Err = ParsingError;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        match content.trim() {
            "AR" => Ok(Self::AR),
            "AS" => Ok(Self::AS),
            "CR" => Ok(Self::CR),
            "DR" => Ok(Self::DR),
            "MS" => Ok(Self::MS),
            other => Err(ParsingError::RecordType(other.to_string())),
        }
    }
}

/// One clock solution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockRecord {
    /// Type of this solution
    pub data_type: ClockDataType,
    /// Receiver or satellite name
    pub name: String,
    /// Solution epoch
    pub time: Epoch,
    /// Bias (s), then its sigma, rate, rate sigma, acceleration
    /// and acceleration sigma when provided
    pub values: Vec<f64>,
}

impl ClockRecord {
    /// Returns the satellite this solution applies to,
    /// when it describes a satellite clock
    pub fn prn(&self) -> Option<PRN> {
        match self.data_type {
            ClockDataType::AS => PRN::from_str(&self.name).ok(),
            _ => None,
        }
    }
    /// Clock bias (s)
    pub fn bias(&self) -> Option<f64> {
        self.values.first().copied()
    }
}

/// Values carried by the epoch line
const EPOCH_LINE_VALUES: usize = 2;
/// Values carried by each continuation line
const CONTINUATION_VALUES: usize = 4;

/// Name fields are 9 characters wide from revision 3.04, 4 before
pub(crate) fn name_width(version: Version) -> usize {
    if version >= Version::new(3, 4) {
        9
    } else {
        4
    }
}

/// Returns the number of values this epoch line announces:
/// A2,1X,A4 (A9),1X,I4,4I3,F10.6,I3
pub(crate) fn parse_count(version: Version, line: &str) -> Result<usize, ParsingError> {
    let offset = name_width(version) + 4 + 26;
    parse_int(field(line, offset, 3))
}

/// Number of continuation lines for given number of values
pub(crate) fn continuation_lines(count: usize) -> usize {
    count
        .saturating_sub(EPOCH_LINE_VALUES)
        .div_ceil(CONTINUATION_VALUES)
}

/// Parses one record, `lines` being the epoch line and its continuations
pub(crate) fn parse_record(
    version: Version,
    ts: TimeScale,
    lines: &[String],
) -> Result<ClockRecord, ParsingError> {
    let first = lines.first().ok_or(ParsingError::TruncatedRecord)?;
    let width = name_width(version);

    let data_type = ClockDataType::from_str(field(first, 0, 2))?;
    let name = field(first, 3, width).trim().to_string();
    let time = parse_in_timescale(field(first, width + 4, 26), ts)?;
    let count = parse_count(version, first)?;

    let mut values = Vec::with_capacity(count);
    let items = lines
        .iter()
        .enumerate()
        .flat_map(|(nth, line)| {
            let content = if nth == 0 {
                tail(line, width + 33)
            } else {
                line.as_str()
            };
            content.split_ascii_whitespace()
        })
        .take(count);
    for item in items {
        values.push(parse_float(item)?);
    }
    if values.len() < count {
        return Err(ParsingError::TruncatedRecord);
    }

    Ok(ClockRecord {
        data_type,
        name,
        time,
        values,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(2, 0)]
    #[case(3, 1)]
    #[case(6, 1)]
    fn continuations(#[case] count: usize, #[case] expected: usize) {
        assert_eq!(continuation_lines(count), expected);
    }

    #[test]
    fn v2_records() {
        let lines =
            ["AS R18  2019 01 08 10 00  0.000000  2    0.294804625338E-04  0.835484069663E-11"
                .to_string()];
        let record = parse_record(Version::new(3, 0), TimeScale::GPST, &lines).unwrap();
        assert_eq!(record.data_type, ClockDataType::AS);
        assert_eq!(record.name, "R18");
        assert_eq!(record.prn().unwrap().to_string(), "R18");
        assert_eq!(
            record.time,
            Epoch::from_str("2019-01-08T10:00:00 GPST").unwrap()
        );
        assert_eq!(record.values, vec![0.294804625338E-04, 0.835484069663E-11]);

        let lines = ["AR PIE1 2019 01 08 00 04  0.000000  1   -0.434275035628E-03".to_string()];
        let record = parse_record(Version::new(2, 0), TimeScale::GPST, &lines).unwrap();
        assert_eq!(record.name, "PIE1");
        assert!(record.prn().is_none());
        assert_eq!(record.bias(), Some(-0.434275035628E-03));
    }

    #[test]
    fn v304_record() {
        let lines = [
            "AR ABMF00GLP 2017 03 11 00 00  0.000000  4    2.186858694570E-04  6.290218608560E-11"
                .to_string(),
            "    1.000000000000E-08  2.000000000000E-12".to_string(),
        ];
        let version = Version::new(3, 4);
        assert_eq!(parse_count(version, &lines[0]).unwrap(), 4);
        let record = parse_record(version, TimeScale::GPST, &lines).unwrap();
        assert_eq!(record.name, "ABMF00GLP");
        assert_eq!(
            record.time,
            Epoch::from_str("2017-03-11T00:00:00 GPST").unwrap()
        );
        assert_eq!(
            record.values,
            vec![
                2.186858694570E-04,
                6.290218608560E-11,
                1.0E-08,
                2.0E-12
            ]
        );
    }

    #[test]
    fn truncated_record() {
        let lines = ["AR PIE1 2019 01 08 00 04  0.000000  2   -0.434275035628E-03".to_string()];
        assert_eq!(
            parse_record(Version::new(2, 0), TimeScale::GPST, &lines),
            Err(ParsingError::TruncatedRecord)
        );
    }
}
