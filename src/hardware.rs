//! Hardware: receiver, antenna informations
use crate::{
    error::ParsingError,
    fields::{field, parse_opt_float},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GNSS receiver description
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Receiver {
    /// Receiver (hardware) model
    pub model: String,
    /// Receiver (hardware) identification info
    pub sn: String,
    /// Receiver embedded software info
    pub firmware: String,
}

impl Receiver {
    /// Sets desired model
    pub fn with_model(&self, m: &str) -> Self {
        let mut s = self.clone();
        s.model = m.to_string();
        s
    }
    /// Sets desired Serial Number
    pub fn with_serial_number(&self, sn: &str) -> Self {
        let mut s = self.clone();
        s.sn = sn.to_string();
        s
    }
    /// Sets desired firmware version
    pub fn with_firmware(&self, firmware: &str) -> Self {
        let mut s = self.clone();
        s.firmware = firmware.to_string();
        s
    }
    /// Parses "REC # / TYPE / VERS": 3A20
    pub(crate) fn parse(content: &str) -> Self {
        Self {
            sn: field(content, 0, 20).trim().to_string(),
            model: field(content, 20, 20).trim().to_string(),
            firmware: field(content, 40, 20).trim().to_string(),
        }
    }
}

/// Antenna description
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Antenna {
    /// Hardware model / make descriptor
    pub model: String,
    /// Serial number / identification number
    pub sn: String,
    /// Optionnal `h` eccentricity (height component),
    /// referenced to base/reference point, in meter
    pub height: Option<f64>,
    /// Optionnal `eastern` eccentricity (eastern component),
    /// referenced to base/reference point, in meter
    pub eastern: Option<f64>,
    /// Optionnal `northern` eccentricity (northern component),
    /// referenced to base/reference point, in meter
    pub northern: Option<f64>,
}

impl Antenna {
    /// Sets desired model
    pub fn with_model(&self, m: &str) -> Self {
        let mut s = self.clone();
        s.model = m.to_string();
        s
    }
    /// Sets desired Serial Number
    pub fn with_serial_number(&self, sn: &str) -> Self {
        let mut s = self.clone();
        s.sn = sn.to_string();
        s
    }
    /// Sets antenna `h` eccentricity component
    pub fn with_height(&self, h: f64) -> Self {
        let mut s = self.clone();
        s.height = Some(h);
        s
    }
    /// Sets antenna `eastern` coordinates component
    pub fn with_eastern_component(&self, e: f64) -> Self {
        let mut s = self.clone();
        s.eastern = Some(e);
        s
    }
    /// Sets antenna `northern` coordinates component
    pub fn with_northern_component(&self, n: f64) -> Self {
        let mut s = self.clone();
        s.northern = Some(n);
        s
    }
    /// Parses "ANT # / TYPE": 2A20
    pub(crate) fn parse(content: &str) -> Self {
        Self {
            sn: field(content, 0, 20).trim().to_string(),
            model: field(content, 20, 20).trim().to_string(),
            ..Default::default()
        }
    }
    /// Parses "ANTENNA: DELTA H/E/N": 3F14.4
    pub(crate) fn parse_eccentricities(&mut self, content: &str) -> Result<(), ParsingError> {
        self.height = parse_opt_float(field(content, 0, 14))?;
        self.eastern = parse_opt_float(field(content, 14, 14))?;
        self.northern = parse_opt_float(field(content, 28, 14))?;
        Ok(())
    }
}
