//! Observation record decoding, RINEX-2 and RINEX-3/4 layouts
use std::collections::{BTreeMap, HashMap};
use std::io::BufRead;
use std::str::FromStr;

use hifitime::{Epoch, TimeScale};
use log::debug;

use crate::{
    constellation::SatelliteSystem,
    epoch::{parse_in_timescale, EpochFlag},
    error::{Error, ParsingError},
    fields::{column, field, parse_flag, parse_int, parse_opt_float},
    header::Header,
    observable::Observable,
    observation::{LliFlags, Obs, ObsEpoch, SatObs, SNR},
    prn::PRN,
    scanner::LineScanner,
};

/// Observation field: F14.3, LLI digit, SNR digit
const FIELD_WIDTH: usize = 16;
const VALUE_WIDTH: usize = 14;
/// RINEX-2 packs that many fields per line
const V2_FIELDS_PER_LINE: usize = 5;
/// RINEX-2 epoch lines list that many satellites per line
const V2_SATS_PER_LINE: usize = 12;
/// RINEX-2 satellite list starts here, on continuation lines too
const V2_SAT_LIST_OFFSET: usize = 32;

/// Parsed epoch descriptor
#[derive(Debug, Clone, PartialEq)]
struct EpochLine {
    time: Epoch,
    flag: EpochFlag,
    num_sat: u16,
    clock_offset: Option<f64>,
}

/// Everything the record decoder needs from the [Header]
#[derive(Debug, Clone)]
pub(crate) struct ObsParser {
    /// RINEX-2 layout
    v2: bool,
    timescale: TimeScale,
    /// System of RINEX-2 satellites that omit their letter
    implied: SatelliteSystem,
    codes: BTreeMap<SatelliteSystem, Vec<Observable>>,
}

impl ObsParser {
    pub fn new(header: &Header) -> Self {
        Self {
            v2: header.version.major < 3,
            timescale: header.timescale(),
            implied: header.implied_system(),
            codes: header
                .obs
                .as_ref()
                .map(|obs| obs.codes.clone())
                .unwrap_or_default(),
        }
    }

    /// Decodes the next epoch. `last` is the previous epoch timestamp,
    /// reused by event epochs that leave their date blank.
    pub fn decode<R: BufRead>(
        &self,
        scanner: &mut LineScanner<R>,
        last: Option<Epoch>,
    ) -> Result<Option<ObsEpoch>, Error> {
        let line = loop {
            match scanner.next_line()? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Ok(None),
            }
        };

        let descriptor = if self.v2 {
            self.parse_v2_epoch_line(&line, last)
        } else {
            self.parse_v3_epoch_line(&line, last)
        }
        .map_err(|e| Error::at(scanner.line_number(), e))?;

        let mut epoch = ObsEpoch {
            time: descriptor.time,
            flag: descriptor.flag,
            num_sat: descriptor.num_sat,
            sats: Vec::with_capacity(descriptor.num_sat as usize),
            clock_offset: descriptor.clock_offset,
            events: Vec::new(),
        };

        if descriptor.flag.is_event() {
            for _ in 0..descriptor.num_sat {
                let line = next_record_line(scanner)?;
                epoch.events.push(line);
            }
            debug!(
                "{} ({}): skipped {} special records",
                epoch.time,
                epoch.flag,
                epoch.events.len()
            );
            return Ok(Some(epoch));
        }

        if self.v2 {
            let prns = self.parse_v2_sat_list(scanner, &line, descriptor.num_sat as usize)?;
            for prn in prns {
                let sat = self.decode_v2_sat(scanner, prn, descriptor.flag)?;
                epoch.sats.push(sat);
            }
        } else {
            for _ in 0..descriptor.num_sat {
                let line = next_record_line(scanner)?;
                let sat = self
                    .parse_v3_sat(&line, descriptor.flag)
                    .map_err(|e| Error::at(scanner.line_number(), e))?;
                epoch.sats.push(sat);
            }
        }
        Ok(Some(epoch))
    }

    /// "> yyyy mm dd hh mm ss.sssssss  F nnn      clock_offset"
    fn parse_v3_epoch_line(
        &self,
        line: &str,
        last: Option<Epoch>,
    ) -> Result<EpochLine, ParsingError> {
        if column(line, 0) != Some('>') {
            return Err(ParsingError::EpochLine);
        }
        let flag = EpochFlag::from_str(field(line, 31, 1))?;
        let num_sat = parse_num_sat(field(line, 32, 3))?;
        let time = self.parse_date(field(line, 2, 27), flag, last)?;
        let clock_offset = parse_opt_float(field(line, 41, 15))?;
        Ok(EpochLine {
            time,
            flag,
            num_sat,
            clock_offset,
        })
    }

    /// " yy mm dd hh mm ss.sssssss  F nn" followed by the satellite list
    /// and the clock offset, in columns 68 to 80.
    fn parse_v2_epoch_line(
        &self,
        line: &str,
        last: Option<Epoch>,
    ) -> Result<EpochLine, ParsingError> {
        let flag = EpochFlag::from_str(field(line, 28, 1))?;
        let num_sat = parse_num_sat(field(line, 29, 3))?;
        let time = self.parse_date(field(line, 1, 25), flag, last)?;
        let clock_offset = parse_opt_float(field(line, 68, 12))?;
        Ok(EpochLine {
            time,
            flag,
            num_sat,
            clock_offset,
        })
    }

    fn parse_date(
        &self,
        content: &str,
        flag: EpochFlag,
        last: Option<Epoch>,
    ) -> Result<Epoch, ParsingError> {
        if content.trim().is_empty() && flag.is_event() {
            if let Some(last) = last {
                return Ok(last);
            }
        }
        parse_in_timescale(content, self.timescale)
    }

    /// Collects the RINEX-2 satellite list, which wraps every 12 satellites
    fn parse_v2_sat_list<R: BufRead>(
        &self,
        scanner: &mut LineScanner<R>,
        first: &str,
        num_sat: usize,
    ) -> Result<Vec<PRN>, Error> {
        let mut prns = Vec::with_capacity(num_sat);
        let mut line = first.to_string();
        while prns.len() < num_sat {
            if !prns.is_empty() {
                line = next_record_line(scanner)?;
            }
            let line_number = scanner.line_number();
            let count = (num_sat - prns.len()).min(V2_SATS_PER_LINE);
            for i in 0..count {
                let token = field(&line, V2_SAT_LIST_OFFSET + 3 * i, 3);
                let prn = PRN::from_v2_token(token, self.implied)
                    .map_err(|e| Error::at(line_number, e))?;
                prns.push(prn);
            }
        }
        Ok(prns)
    }

    fn codes(&self, system: SatelliteSystem) -> Result<&Vec<Observable>, ParsingError> {
        self.codes
            .get(&system)
            .ok_or(ParsingError::MissingObsTypes(system))
    }

    /// RINEX-2: 5 fields per line, as many lines as needed
    fn decode_v2_sat<R: BufRead>(
        &self,
        scanner: &mut LineScanner<R>,
        prn: PRN,
        flag: EpochFlag,
    ) -> Result<SatObs, Error> {
        let codes = self
            .codes(prn.system)
            .map_err(|e| Error::at(scanner.line_number(), e))?;
        let mut obs = HashMap::with_capacity(codes.len());
        let mut line = String::new();
        for (i, code) in codes.iter().enumerate() {
            let slot = i % V2_FIELDS_PER_LINE;
            if slot == 0 {
                line = next_record_line(scanner)?;
            }
            let value = parse_obs(&line, slot * FIELD_WIDTH, flag)
                .map_err(|e| Error::at(scanner.line_number(), e))?;
            obs.insert(code.clone(), value);
        }
        Ok(SatObs { prn, obs })
    }

    /// RINEX-3: one line per satellite, which identifies itself
    fn parse_v3_sat(&self, line: &str, flag: EpochFlag) -> Result<SatObs, ParsingError> {
        let prn = PRN::from_str(field(line, 0, 3))?;
        let codes = self.codes(prn.system)?;
        let mut obs = HashMap::with_capacity(codes.len());
        for (i, code) in codes.iter().enumerate() {
            let value = parse_obs(line, 3 + i * FIELD_WIDTH, flag)?;
            obs.insert(code.clone(), value);
        }
        Ok(SatObs { prn, obs })
    }
}

fn parse_num_sat(content: &str) -> Result<u16, ParsingError> {
    parse_int::<u16>(content).map_err(|_| ParsingError::NumSat(content.trim().to_string()))
}

/// Within a record, every line matters: even a blank one.
fn next_record_line<R: BufRead>(scanner: &mut LineScanner<R>) -> Result<String, Error> {
    match scanner.next_line()? {
        Some(line) => Ok(line),
        None => Err(Error::at(
            scanner.line_number(),
            ParsingError::TruncatedRecord,
        )),
    }
}

/// Parses one 16 column field. Blank means zero.
/// A power failure raises [LliFlags::LOCK_LOSS] whatever the printed digit.
fn parse_obs(line: &str, start: usize, flag: EpochFlag) -> Result<Obs, ParsingError> {
    let value = parse_opt_float(field(line, start, VALUE_WIDTH))?.unwrap_or(0.0);
    let mut lli = LliFlags::from_digit(parse_flag(field(line, start + VALUE_WIDTH, 1))?);
    let snr = SNR::from_digit(parse_flag(field(line, start + VALUE_WIDTH + 1, 1))?);
    if flag == EpochFlag::PowerFailure {
        lli |= LliFlags::LOCK_LOSS;
    }
    Ok(Obs { value, lli, snr })
}
