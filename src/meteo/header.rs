//! Meteo RINEX specific header fields
use std::str::FromStr;

use crate::{
    error::ParsingError,
    fields::{field, parse_opt_float, parse_opt_int, tail},
    meteo::MeteoObservable,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Meteo sensor description
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sensor {
    /// Physics measured by this sensor
    pub observable: MeteoObservable,
    /// Model
    pub model: String,
    /// Sensor type
    pub sensor_type: String,
    /// Sensor accuracy, in measurement unit
    pub accuracy: Option<f64>,
    /// Possible sensor location (ECEF) and height (m)
    pub position: Option<(f64, f64, f64, f64)>,
}

/// Meteo specific `header` fields
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderFields {
    /// Observables, in record order
    pub codes: Vec<MeteoObservable>,
    /// Sensors description
    pub sensors: Vec<Sensor>,
}

impl HeaderFields {
    /// Parses "# / TYPES OF OBSERV": I6,9(4X,A2).
    /// A count restarts the list, a blank count continues it.
    pub(crate) fn parse_codes(&mut self, content: &str) -> Result<(), ParsingError> {
        if parse_opt_int::<usize>(field(content, 0, 6))?.is_some() {
            self.codes.clear();
        }
        for code in tail(content, 6).split_ascii_whitespace() {
            self.codes.push(MeteoObservable::from_str(code)?);
        }
        Ok(())
    }

    fn sensor_mut(&mut self, observable: MeteoObservable) -> &mut Sensor {
        let index = match self.sensors.iter().position(|s| s.observable == observable) {
            Some(index) => index,
            None => {
                self.sensors.push(Sensor {
                    observable,
                    ..Default::default()
                });
                self.sensors.len() - 1
            },
        };
        &mut self.sensors[index]
    }

    /// Parses "SENSOR MOD/TYPE/ACC": A20,A20,6X,F7.1,4X,A2
    pub(crate) fn parse_sensor(&mut self, content: &str) -> Result<(), ParsingError> {
        let observable = MeteoObservable::from_str(field(content, 57, 2))?;
        let accuracy = parse_opt_float(field(content, 46, 7))?;
        let sensor = self.sensor_mut(observable);
        sensor.model = field(content, 0, 20).trim().to_string();
        sensor.sensor_type = field(content, 20, 20).trim().to_string();
        sensor.accuracy = accuracy;
        Ok(())
    }

    /// Parses "SENSOR POS XYZ/H": 3F14.4,1F14.4,1X,A2
    pub(crate) fn parse_sensor_position(&mut self, content: &str) -> Result<(), ParsingError> {
        let observable = MeteoObservable::from_str(field(content, 57, 2))?;
        let mut coords = [0.0_f64; 4];
        for (i, coord) in coords.iter_mut().enumerate() {
            *coord = parse_opt_float(field(content, 14 * i, 14))?.unwrap_or(0.0);
        }
        let sensor = self.sensor_mut(observable);
        sensor.position = Some((coords[0], coords[1], coords[2], coords[3]));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn sensors() {
        let mut fields = HeaderFields::default();
        fields
            .parse_codes("     4    PR    TD    HR    ZW")
            .unwrap();
        assert_eq!(fields.codes.len(), 4);
        fields
            .parse_sensor("PAROSCIENTIFIC      740-16B                       0.2    PR")
            .unwrap();
        fields
            .parse_sensor_position("  4789028.4701   176610.0133  4195017.0310        0.0000 PR")
            .unwrap();
        assert_eq!(fields.sensors.len(), 1);
        let sensor = &fields.sensors[0];
        assert_eq!(sensor.observable, MeteoObservable::Pressure);
        assert_eq!(sensor.model, "PAROSCIENTIFIC");
        assert_eq!(sensor.sensor_type, "740-16B");
        assert_eq!(sensor.accuracy, Some(0.2));
        assert_eq!(
            sensor.position,
            Some((4789028.4701, 176610.0133, 4195017.0310, 0.0))
        );
    }
}
