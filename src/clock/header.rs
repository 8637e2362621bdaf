//! Clock RINEX specific header fields
use std::str::FromStr;

use hifitime::TimeScale;

use crate::{
    clock::ClockDataType,
    epoch::parse_time_system,
    error::ParsingError,
    fields::{field, parse_opt_int, tail},
    prn::PRN,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Station (or receiver) contributing to the clock solution
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolutionStation {
    /// Station name
    pub name: String,
    /// DOMES number
    pub domes: String,
    /// ECEF coordinates, in millimeters
    pub coordinates: (i64, i64, i64),
}

/// Clock specific `header` fields
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderFields {
    /// Data types found in this file
    pub codes: Vec<ClockDataType>,
    /// Possible analysis center: (3 letter code, full name)
    pub analysis_center: Option<(String, String)>,
    /// Possible station this file describes: (name, DOMES)
    pub station: Option<(String, String)>,
    /// Possible external reference clock of the station
    pub station_clock_ref: Option<String>,
    /// Possible reference clock of the analysis
    pub analysis_clock_ref: Option<String>,
    /// Possible terrestrial reference frame
    pub reference_frame: Option<String>,
    /// Stations contributing to the solution
    pub solution_stations: Vec<SolutionStation>,
    /// Satellites contributing to the solution
    pub satellites: Vec<PRN>,
    /// Possible [TimeScale] clock epochs are expressed in
    pub timescale: Option<TimeScale>,
}

impl HeaderFields {
    /// Name fields are 9 characters wide from revision 3.04, 4 before
    fn name_width(long_names: bool) -> usize {
        if long_names {
            9
        } else {
            4
        }
    }

    /// Parses "# / TYPES OF DATA": I6,9(4X,A2)
    pub(crate) fn parse_codes(&mut self, content: &str) -> Result<(), ParsingError> {
        if parse_opt_int::<usize>(field(content, 0, 6))?.is_some() {
            self.codes.clear();
        }
        for code in tail(content, 6).split_ascii_whitespace() {
            self.codes.push(ClockDataType::from_str(code)?);
        }
        Ok(())
    }

    /// Parses "ANALYSIS CENTER": A3,2X,A55
    pub(crate) fn parse_analysis_center(&mut self, content: &str) {
        self.analysis_center = Some((
            field(content, 0, 3).trim().to_string(),
            tail(content, 5).trim().to_string(),
        ));
    }

    /// Parses "STATION NAME / NUM": A4 (A9),1X,A20
    pub(crate) fn parse_station(&mut self, content: &str, long_names: bool) {
        let width = Self::name_width(long_names);
        self.station = Some((
            field(content, 0, width).trim().to_string(),
            field(content, width + 1, 20).trim().to_string(),
        ));
    }

    /// Parses "# OF SOLN STA / TRF": I6,4X,A50
    pub(crate) fn parse_reference_frame(&mut self, content: &str) {
        let trf = tail(content, 10).trim();
        if !trf.is_empty() {
            self.reference_frame = Some(trf.to_string());
        }
    }

    /// Parses "SOLN STA NAME / NUM": A4 (A9),1X,A20,I11,1X,I11,1X,I11
    pub(crate) fn parse_solution_station(&mut self, content: &str, long_names: bool) -> Result<(), ParsingError> {
        let width = Self::name_width(long_names);
        let offset = width + 21;
        self.solution_stations.push(SolutionStation {
            name: field(content, 0, width).trim().to_string(),
            domes: field(content, width + 1, 20).trim().to_string(),
            coordinates: (
                parse_opt_int(field(content, offset, 11))?.unwrap_or(0),
                parse_opt_int(field(content, offset + 12, 11))?.unwrap_or(0),
                parse_opt_int(field(content, offset + 24, 11))?.unwrap_or(0),
            ),
        });
        Ok(())
    }

    /// Parses "PRN LIST": 15(A3,1X), possibly repeated
    pub(crate) fn parse_prn_list(&mut self, content: &str) -> Result<(), ParsingError> {
        for token in content.split_ascii_whitespace() {
            self.satellites.push(PRN::from_str(token)?);
        }
        Ok(())
    }

    /// Parses "TIME SYSTEM ID": 3X,A3
    pub(crate) fn parse_timescale(&mut self, content: &str) {
        self.timescale = parse_time_system(field(content, 3, 3));
    }
}
