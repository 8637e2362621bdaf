//! Satellite identification
use crate::{constellation::SatelliteSystem, error::ParsingError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest satellite number we accept, for any system
pub const MAX_PRN: u8 = 60;

/// [PRN] identifies one satellite: a [SatelliteSystem] and its number.
/// [PRN]s sort by their "XNN" textual form, so G01 < G12 < R01.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PRN {
    /// Satellite system this vehicle belongs to
    pub system: SatelliteSystem,
    /// Satellite number, within 1..=60
    pub number: u8,
}

impl PRN {
    /// Builds a new [PRN], number is checked against [MAX_PRN]
    pub fn new(system: SatelliteSystem, number: u8) -> Result<Self, ParsingError> {
        if number == 0 || number > MAX_PRN {
            return Err(ParsingError::PRNRange(number));
        }
        Ok(Self { system, number })
    }
    /// Parses a RINEX-2 token, where the system letter may be omitted:
    /// `"12"`, `" 5"`, `"G12"` or `" 12"`. Missing letters are replaced by `implied`.
    pub fn from_v2_token(token: &str, implied: SatelliteSystem) -> Result<Self, ParsingError> {
        let trimmed = token.trim();
        match trimmed.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => trimmed.parse(),
            Some(_) => {
                let number = trimmed
                    .parse::<u8>()
                    .map_err(|_| ParsingError::PRN(token.to_string()))?;
                Self::new(implied, number)
            },
            None => Err(ParsingError::PRN(token.to_string())),
        }
    }
    /// Returns the [hifitime::TimeScale] this satellite expresses its epochs in
    pub fn timescale(&self) -> hifitime::TimeScale {
        self.system.timescale()
    }
}

impl std::str::FromStr for PRN {
    type Err = ParsingError;
    /// Parses the standard "XNN" format. Blank padded numbers ("G 5") are tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 3 || !s.is_ascii() {
            return Err(ParsingError::PRN(s.to_string()));
        }
        let letter = s.chars().next().ok_or_else(|| ParsingError::PRN(s.to_string()))?;
        let system = SatelliteSystem::from_abbreviation(letter)?;
        if system.is_mixed() {
            return Err(ParsingError::PRN(s.to_string()));
        }
        let number = s[1..]
            .trim()
            .parse::<u8>()
            .map_err(|_| ParsingError::PRN(s.to_string()))?;
        Self::new(system, number)
    }
}

impl std::fmt::Display for PRN {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:x}{:02}", self.system, self.number)
    }
}

impl PartialOrd for PRN {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PRN {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.system.abbreviation(), self.number)
            .cmp(&(other.system.abbreviation(), other.number))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;
    use std::str::FromStr;

    #[rstest]
    #[case("G01", SatelliteSystem::GPS, 1)]
    #[case("G12", SatelliteSystem::GPS, 12)]
    #[case("R24", SatelliteSystem::Glonass, 24)]
    #[case("E36", SatelliteSystem::Galileo, 36)]
    #[case("C60", SatelliteSystem::BeiDou, 60)]
    #[case("J02", SatelliteSystem::QZSS, 2)]
    #[case("I09", SatelliteSystem::NavIC, 9)]
    #[case("S23", SatelliteSystem::SBAS, 23)]
    #[case("G 5", SatelliteSystem::GPS, 5)]
    fn parsing(#[case] token: &str, #[case] system: SatelliteSystem, #[case] number: u8) {
        let prn = PRN::from_str(token).unwrap();
        assert_eq!(prn.system, system);
        assert_eq!(prn.number, number);
    }

    #[rstest]
    #[case("G00")]
    #[case("G61")]
    #[case("G99")]
    #[case("X01")]
    #[case("M01")]
    #[case("G1")]
    #[case("G1A")]
    #[case("")]
    fn invalid(#[case] token: &str) {
        assert!(PRN::from_str(token).is_err(), "\"{}\" should not parse", token);
    }

    #[test]
    fn injective() {
        let mut seen = std::collections::HashSet::new();
        for letter in ['G', 'R', 'E', 'J', 'C', 'I', 'S'] {
            for number in 1..=MAX_PRN {
                let token = format!("{}{:02}", letter, number);
                let prn = PRN::from_str(&token).unwrap();
                assert_eq!(prn.to_string(), token);
                assert!(seen.insert(prn), "{} parsed twice", token);
            }
        }
    }

    #[test]
    fn v2_tokens() {
        let prn = PRN::from_v2_token(" 5", SatelliteSystem::GPS).unwrap();
        assert_eq!(prn.to_string(), "G05");
        let prn = PRN::from_v2_token("12", SatelliteSystem::Glonass).unwrap();
        assert_eq!(prn.to_string(), "R12");
        let prn = PRN::from_v2_token("E11", SatelliteSystem::GPS).unwrap();
        assert_eq!(prn.to_string(), "E11");
        assert!(PRN::from_v2_token("  ", SatelliteSystem::GPS).is_err());
        assert!(PRN::from_v2_token("75", SatelliteSystem::GPS).is_err());
    }

    #[test]
    fn ordering() {
        let mut prns: Vec<PRN> = ["R01", "G12", "C05", "G01", "E03", "S20"]
            .iter()
            .map(|s| PRN::from_str(s).unwrap())
            .collect();
        prns.sort();
        let sorted: Vec<String> = prns.iter().map(|p| p.to_string()).collect();
        assert_eq!(sorted, vec!["C05", "E03", "G01", "G12", "R01", "S20"]);
    }
}
