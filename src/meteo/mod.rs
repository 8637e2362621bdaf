//! Meteo RINEX module
use std::collections::HashMap;

use hifitime::{Epoch, TimeScale};

use crate::{
    epoch::parse_in_timescale,
    error::ParsingError,
    fields::{field, parse_opt_float, tail},
    version::Version,
};

mod decoder;
mod header;
mod observable;

pub use decoder::MeteoDecoder;
pub use header::{HeaderFields, Sensor};
pub use observable::MeteoObservable;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Values carried by the epoch line
const EPOCH_LINE_VALUES: usize = 8;
/// Values carried by each continuation line
const CONTINUATION_VALUES: usize = 10;
/// F7.1
const VALUE_WIDTH: usize = 7;

/// Sensors sampled at the same instant
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeteoRecord {
    /// Sampling instant
    pub time: Epoch,
    /// Sampled values. Blank fields are not reported.
    pub values: HashMap<MeteoObservable, f64>,
}

impl MeteoRecord {
    /// Returns the value sampled for given observable, if any
    pub fn get(&self, observable: &MeteoObservable) -> Option<f64> {
        self.values.get(observable).copied()
    }
}

/// Width of the epoch descriptor: two digit years in RINEX-2
fn epoch_width(version: Version) -> usize {
    if version.major < 3 {
        18
    } else {
        20
    }
}

/// Indentation of continuation lines
fn continuation_indent(version: Version) -> usize {
    if version.major < 3 {
        4
    } else {
        6
    }
}

/// Number of physical lines one record spans, for given number of observables
pub(crate) fn record_lines(num_codes: usize) -> usize {
    if num_codes <= EPOCH_LINE_VALUES {
        1
    } else {
        1 + (num_codes - EPOCH_LINE_VALUES).div_ceil(CONTINUATION_VALUES)
    }
}

/// Parses one record, `lines` being the epoch line and its continuations.
/// Meteo epochs are expressed in GPST.
pub(crate) fn parse_record(
    version: Version,
    codes: &[MeteoObservable],
    lines: &[String],
) -> Result<MeteoRecord, ParsingError> {
    let first = lines.first().ok_or(ParsingError::TruncatedRecord)?;
    let width = epoch_width(version);
    let time = parse_in_timescale(field(first, 0, width), TimeScale::GPST)?;

    let mut values = HashMap::with_capacity(codes.len());
    let mut codes = codes.iter();

    for (nth, line) in lines.iter().enumerate() {
        let (content, count) = if nth == 0 {
            (tail(line, width), EPOCH_LINE_VALUES)
        } else {
            (tail(line, continuation_indent(version)), CONTINUATION_VALUES)
        };
        for i in 0..count {
            let code = match codes.next() {
                Some(code) => code,
                None => break,
            };
            if let Some(value) = parse_opt_float(field(content, i * VALUE_WIDTH, VALUE_WIDTH))? {
                values.insert(*code, value);
            }
        }
    }

    Ok(MeteoRecord { time, values })
}
