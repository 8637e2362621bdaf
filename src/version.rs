//! `RINEX` revision description
use crate::error::ParsingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Latest revision this library knows of
pub const SUPPORTED_VERSION: Version = Version { major: 4, minor: 2 };

/// Version is used to describe RINEX standards revisions.
/// The minor number is expressed in hundredths, like RINEX does:
/// "2.1" and "2.10" both describe `Version { major: 2, minor: 10 }`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Version {
    /// Version major number
    pub major: u8,
    /// Version minor number
    pub minor: u8,
}

impl Default for Version {
    fn default() -> Self {
        Self { major: 3, minor: 4 }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

impl From<Version> for (u8, u8) {
    fn from(v: Version) -> Self {
        (v.major, v.minor)
    }
}

impl std::str::FromStr for Version {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() {
            return Err(ParsingError::Version(s.to_string()));
        }
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, ""),
        };
        let major = major
            .parse::<u8>()
            .map_err(|_| ParsingError::Version(s.to_string()))?;
        let minor = match minor.len() {
            0 => 0,
            1 => {
                minor
                    .parse::<u8>()
                    .map_err(|_| ParsingError::Version(s.to_string()))?
                    * 10
            },
            _ => minor[..2]
                .parse::<u8>()
                .map_err(|_| ParsingError::Version(s.to_string()))?,
        };
        Ok(Self { major, minor })
    }
}

impl Version {
    /// Builds a new `Version` object
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
    /// Returns this revision as a float number, like RINEX headers print it
    pub fn as_f64(&self) -> f64 {
        self.major as f64 + self.minor as f64 / 100.0
    }
    /// Returns true if this version is supported
    pub fn is_supported(&self) -> bool {
        *self <= SUPPORTED_VERSION
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn version_parsing() {
        for (desc, major, minor) in [
            ("1", 1, 0),
            ("2.1", 2, 10),
            ("2.10", 2, 10),
            ("2.11", 2, 11),
            ("3.0", 3, 0),
            ("3.03", 3, 3),
            ("3.04", 3, 4),
            ("3.05", 3, 5),
            ("4.00", 4, 0),
        ] {
            let version = Version::from_str(desc).unwrap();
            assert_eq!(version, Version::new(major, minor), "failed for \"{}\"", desc);
        }
        assert!(Version::from_str("a.b").is_err());
        assert!(Version::from_str("").is_err());
    }
    #[test]
    fn version_ordering() {
        assert!(Version::new(3, 5) > Version::new(3, 4));
        assert!(Version::new(2, 11) < Version::new(3, 0));
        assert!(Version::new(4, 0).is_supported());
        assert!(!Version::new(5, 0).is_supported());
        assert_eq!(Version::new(3, 3).to_string(), "3.03");
        assert_eq!(Version::new(2, 11).to_string(), "2.11");
    }
}
