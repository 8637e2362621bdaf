//! Meteo observable codes
use crate::error::ParsingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Meteo Observables
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeteoObservable {
    /// Pressure observation in [mbar]
    Pressure,
    /// Dry temperature measurement in [°C]
    #[default]
    Temperature,
    /// Relative humidity measurement in [%]
    HumidityRate,
    /// Wet Zenith Path delay in [mm]
    ZenithWetDelay,
    /// Zenith path delay, dry component, in [mm]
    ZenithDryDelay,
    /// Total zenith path delay (dry + wet), in [mm]
    ZenithTotalDelay,
    /// Wind azimuth, from where the wind blows, in [°]
    WindAzimuth,
    /// Wind speed, in [m.s^-1]
    WindSpeed,
    /// Rain Increment, i.e., rain accumulation
    /// since previous measurement, [10th of mm]
    RainIncrement,
    /// Hail Indicator non zero, hail detected
    /// since last measurement
    HailIndicator,
}

impl std::fmt::Display for MeteoObservable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pressure => "PR".fmt(f),
            Self::Temperature => "TD".fmt(f),
            Self::HumidityRate => "HR".fmt(f),
            Self::ZenithWetDelay => "ZW".fmt(f),
            Self::ZenithDryDelay => "ZD".fmt(f),
            Self::ZenithTotalDelay => "ZT".fmt(f),
            Self::WindAzimuth => "WD".fmt(f),
            Self::WindSpeed => "WS".fmt(f),
            Self::RainIncrement => "RI".fmt(f),
            Self::HailIndicator => "HI".fmt(f),
        }
    }
}

impl std::str::FromStr for MeteoObservable {
    type Err = ParsingError;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        match content.trim() {
            "PR" => Ok(Self::Pressure),
            "TD" => Ok(Self::Temperature),
            "HR" => Ok(Self::HumidityRate),
            "ZW" => Ok(Self::ZenithWetDelay),
            "ZD" => Ok(Self::ZenithDryDelay),
            "ZT" => Ok(Self::ZenithTotalDelay),
            "WD" => Ok(Self::WindAzimuth),
            "WS" => Ok(Self::WindSpeed),
            "RI" => Ok(Self::RainIncrement),
            "HI" => Ok(Self::HailIndicator),
            other => Err(ParsingError::Observable(other.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn parser() {
        for code in ["PR", "TD", "HR", "ZW", "ZD", "ZT", "WD", "WS", "RI", "HI"] {
            let obs = MeteoObservable::from_str(code).unwrap();
            assert_eq!(obs.to_string(), code);
        }
        assert_eq!(
            MeteoObservable::from_str(" WS").unwrap(),
            MeteoObservable::WindSpeed
        );
        assert!(MeteoObservable::from_str("XX").is_err());
    }
}
