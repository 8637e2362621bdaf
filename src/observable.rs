use crate::error::ParsingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Observable describes one GNSS observation code, like "C1C" or RINEX-2 "L1".
/// Its position in the header table defines where the measurement sits in a record.
#[derive(Debug, Clone, PartialEq, PartialOrd, Hash, Ord, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Observable {
    /// Carrier phase observation
    Phase(String),
    /// Doppler shift observation
    Doppler(String),
    /// SSI observation
    SSI(String),
    /// Pseudo range observation
    PseudoRange(String),
    /// Receiver channel number (RINEX-3 "X" codes)
    Channel(String),
}

impl Default for Observable {
    fn default() -> Self {
        Self::Phase("L1C".to_string())
    }
}

impl Observable {
    pub fn is_phase_observable(&self) -> bool {
        matches!(self, Self::Phase(_))
    }
    pub fn is_pseudorange_observable(&self) -> bool {
        matches!(self, Self::PseudoRange(_))
    }
    pub fn is_doppler_observable(&self) -> bool {
        matches!(self, Self::Doppler(_))
    }
    pub fn is_ssi_observable(&self) -> bool {
        matches!(self, Self::SSI(_))
    }
    /// Returns the code, as it appears in the header
    pub fn code(&self) -> &str {
        match self {
            Self::Phase(c)
            | Self::Doppler(c)
            | Self::SSI(c)
            | Self::PseudoRange(c)
            | Self::Channel(c) => c,
        }
    }
}

impl std::fmt::Display for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Observable {
    type Err = ParsingError;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let content = content.trim().to_uppercase();
        let len = content.len();
        if !(2..=3).contains(&len) || !content.is_ascii() {
            return Err(ParsingError::Observable(content));
        }
        if content.starts_with('L') {
            Ok(Self::Phase(content))
        } else if content.starts_with('C') || content.starts_with('P') {
            Ok(Self::PseudoRange(content))
        } else if content.starts_with('S') {
            Ok(Self::SSI(content))
        } else if content.starts_with('D') {
            Ok(Self::Doppler(content))
        } else if content.starts_with('X') {
            Ok(Self::Channel(content))
        } else {
            Err(ParsingError::Observable(content))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn default_observable() {
        let default = Observable::default();
        assert_eq!(default, Observable::from_str("L1C").unwrap());
        assert_eq!(default, Observable::Phase(String::from("L1C")));
        assert!(default.is_phase_observable());
    }
    #[test]
    fn physics() {
        assert!(Observable::from_str("L1").unwrap().is_phase_observable());
        assert!(Observable::from_str("L6X").unwrap().is_phase_observable());
        assert!(Observable::from_str("C1").unwrap().is_pseudorange_observable());
        assert!(Observable::from_str("P2").unwrap().is_pseudorange_observable());
        assert!(Observable::from_str("c5q").unwrap().is_pseudorange_observable());
        assert!(Observable::from_str("D1").unwrap().is_doppler_observable());
        assert!(Observable::from_str("S7I").unwrap().is_ssi_observable());
        assert_eq!(
            Observable::from_str("X1").unwrap(),
            Observable::Channel("X1".to_string())
        );
        assert_eq!(Observable::from_str("C5Q").unwrap().to_string(), "C5Q");
    }
    #[test]
    fn invalid() {
        for desc in ["", "L", "C1CX", "Z1C", "Q1"] {
            assert!(Observable::from_str(desc).is_err(), "\"{}\" should fail", desc);
        }
    }
}
