//! Observation RINEX specific header fields
use std::collections::BTreeMap;
use std::str::FromStr;

use hifitime::{Epoch, TimeScale};

use crate::{
    constellation::{SatelliteSystem, SATELLITE_SYSTEMS},
    epoch::{from_gregorian, parse_seconds, parse_time_system},
    error::ParsingError,
    fields::{column, field, parse_int, parse_opt_int, tail},
    observable::Observable,
    prn::PRN,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Observation specific `header` fields
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderFields {
    /// Observables per satellite system. Order matters:
    /// it defines where each measurement sits in a record.
    pub codes: BTreeMap<SatelliteSystem, Vec<Observable>>,
    /// Possible time of first observation
    pub timeof_first_obs: Option<Epoch>,
    /// Possible time of last observation
    pub timeof_last_obs: Option<Epoch>,
    /// GLONASS frequency channels
    pub glonass_slots: BTreeMap<PRN, i8>,
    /// True when receiver clock offsets were applied to
    /// epochs, code and phase measurements
    pub clock_offset_applied: bool,
    /// Possible number of satellites found in this file
    pub num_satellites: Option<u16>,
    /// Possible unit of signal strength observations, like "DBHZ"
    pub signal_strength_unit: Option<String>,
}

/// Tracks multi line observable declarations while parsing the header
#[derive(Debug, Default)]
pub(crate) struct CodesState {
    /// Systems the last declaration applies to
    current: Vec<SatelliteSystem>,
    /// Declared table length, per system
    declared: BTreeMap<SatelliteSystem, usize>,
}

impl HeaderFields {
    /// Copies and returns [HeaderFields] with given observables for this system
    pub fn with_codes(&self, system: SatelliteSystem, codes: &[&str]) -> Result<Self, ParsingError> {
        let mut s = self.clone();
        let codes = codes
            .iter()
            .map(|c| Observable::from_str(c))
            .collect::<Result<Vec<_>, _>>()?;
        s.codes.insert(system, codes);
        Ok(s)
    }
    /// Copies and returns [HeaderFields] with time of first observation
    pub fn with_timeof_first_obs(&self, epoch: Epoch) -> Self {
        let mut s = self.clone();
        s.timeof_first_obs = Some(epoch);
        s
    }
    /// Copies and returns [HeaderFields] with time of last observation
    pub fn with_timeof_last_obs(&self, epoch: Epoch) -> Self {
        let mut s = self.clone();
        s.timeof_last_obs = Some(epoch);
        s
    }
    /// Copies and returns [HeaderFields] with given GLONASS channel
    pub fn with_glonass_slot(&self, prn: PRN, channel: i8) -> Self {
        let mut s = self.clone();
        s.glonass_slots.insert(prn, channel);
        s
    }

    /// Parses "SYS / # / OBS TYPES": A1,2X,I3,13(1X,A3).
    /// A blank system letter continues the previous declaration.
    pub(crate) fn parse_sys_obs_types(
        &mut self,
        content: &str,
        state: &mut CodesState,
    ) -> Result<(), ParsingError> {
        match column(content, 0) {
            Some(c) if c != ' ' => {
                let system = SatelliteSystem::from_abbreviation(c)?;
                let declared = parse_opt_int::<usize>(field(content, 3, 3))?;
                self.start_codes(&[system], declared, state);
            },
            _ => {
                if state.current.is_empty() {
                    return Err(ParsingError::UndefinedSatelliteSystem);
                }
            },
        }
        self.append_codes(tail(content, 6), state)
    }

    /// Parses RINEX-2 "# / TYPES OF OBSERV": I6,9(4X,A2).
    /// Observables apply to the header system, every system for `Mixed` files.
    /// A blank count continues the previous declaration.
    pub(crate) fn parse_v2_obs_types(
        &mut self,
        content: &str,
        constellation: Option<SatelliteSystem>,
        state: &mut CodesState,
    ) -> Result<(), ParsingError> {
        let declared = parse_opt_int::<usize>(field(content, 0, 6))?;
        if declared.is_some() || state.current.is_empty() {
            match constellation.unwrap_or_default() {
                SatelliteSystem::Mixed => self.start_codes(&SATELLITE_SYSTEMS, declared, state),
                system => self.start_codes(&[system], declared, state),
            }
        }
        self.append_codes(tail(content, 6), state)
    }

    fn start_codes(
        &mut self,
        systems: &[SatelliteSystem],
        declared: Option<usize>,
        state: &mut CodesState,
    ) {
        state.current = systems.to_vec();
        for system in systems {
            self.codes.insert(*system, Vec::new());
            match declared {
                Some(declared) => {
                    state.declared.insert(*system, declared);
                },
                None => {
                    state.declared.remove(system);
                },
            }
        }
    }

    fn append_codes(&mut self, content: &str, state: &CodesState) -> Result<(), ParsingError> {
        for code in content.split_ascii_whitespace() {
            let observable = Observable::from_str(code)?;
            for system in state.current.iter() {
                self.codes
                    .entry(*system)
                    .or_default()
                    .push(observable.clone());
            }
        }
        Ok(())
    }

    /// Verifies every observable table matches its declared length
    pub(crate) fn validate_codes(&self, state: &CodesState) -> Result<(), ParsingError> {
        for (system, declared) in state.declared.iter() {
            let found = self.codes.get(system).map(|codes| codes.len()).unwrap_or(0);
            if found != *declared {
                return Err(ParsingError::ObsTypesCount {
                    system: *system,
                    declared: *declared,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Parses "GLONASS SLOT / FRQ #": I3,1X,8(A3,1X,I2,1X).
    /// Continuation lines leave the count blank.
    pub(crate) fn parse_glonass_slots(&mut self, content: &str) -> Result<(), ParsingError> {
        let mut offset = 4;
        while offset < content.len() {
            let prn = field(content, offset, 3);
            if !prn.trim().is_empty() {
                let prn = PRN::from_str(prn)?;
                let channel = parse_int::<i8>(field(content, offset + 3, 3))?;
                self.glonass_slots.insert(prn, channel);
            }
            offset += 7;
        }
        Ok(())
    }

    /// Parses "TIME OF FIRST OBS" and "TIME OF LAST OBS": 5I6,F13.7,5X,A3.
    /// The time system defaults to `default_ts` when omitted.
    pub(crate) fn parse_time_of_obs(
        content: &str,
        default_ts: TimeScale,
    ) -> Result<Epoch, ParsingError> {
        let y = parse_int::<i32>(field(content, 0, 6))?;
        let m = parse_int::<u8>(field(content, 6, 6))?;
        let d = parse_int::<u8>(field(content, 12, 6))?;
        let hh = parse_int::<u8>(field(content, 18, 6))?;
        let mm = parse_int::<u8>(field(content, 24, 6))?;
        let (ss, ns) = parse_seconds(field(content, 30, 13))?;
        let ts = parse_time_system(field(content, 48, 3)).unwrap_or(default_ts);
        from_gregorian(y, m, d, hh, mm, ss, ns, ts)
    }

    /// Returns the observables of given system
    pub fn codes(&self, system: SatelliteSystem) -> Option<&Vec<Observable>> {
        self.codes.get(&system)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sys_obs_types_continuation() {
        let mut fields = HeaderFields::default();
        let mut state = CodesState::default();
        for line in [
            "G   18 C1C L1C D1C S1C C2W L2W D2W S2W C2L L2L D2L S2L C5Q",
            "       L5Q D5Q S5Q C1L L1L",
            "E    8 C1C L1C D1C S1C C5Q L5Q D5Q S5Q",
        ] {
            fields.parse_sys_obs_types(line, &mut state).unwrap();
        }
        fields.validate_codes(&state).unwrap();
        let gps = fields.codes(SatelliteSystem::GPS).unwrap();
        assert_eq!(gps.len(), 18);
        assert_eq!(gps[0].code(), "C1C");
        assert_eq!(gps[13].code(), "L5Q");
        assert_eq!(gps[17].code(), "L1L");
        assert_eq!(fields.codes(SatelliteSystem::Galileo).unwrap().len(), 8);
    }

    #[test]
    fn sys_obs_types_count_mismatch() {
        let mut fields = HeaderFields::default();
        let mut state = CodesState::default();
        fields
            .parse_sys_obs_types("R    4 C1C L1C S1C", &mut state)
            .unwrap();
        assert_eq!(
            fields.validate_codes(&state),
            Err(ParsingError::ObsTypesCount {
                system: SatelliteSystem::Glonass,
                declared: 4,
                found: 3,
            })
        );
    }

    #[test]
    fn orphan_continuation() {
        let mut fields = HeaderFields::default();
        let mut state = CodesState::default();
        assert!(fields
            .parse_sys_obs_types("       L5Q D5Q", &mut state)
            .is_err());
    }

    #[test]
    fn v2_mixed_types() {
        let mut fields = HeaderFields::default();
        let mut state = CodesState::default();
        fields
            .parse_v2_obs_types(
                "    11    L1    L2    C1    C2    P1    P2    D1    D2    S1",
                Some(SatelliteSystem::Mixed),
                &mut state,
            )
            .unwrap();
        fields
            .parse_v2_obs_types("          S2    C5", Some(SatelliteSystem::Mixed), &mut state)
            .unwrap();
        fields.validate_codes(&state).unwrap();
        for system in SATELLITE_SYSTEMS {
            let codes = fields.codes(system).unwrap();
            assert_eq!(codes.len(), 11);
            assert_eq!(codes[10].code(), "C5");
        }
    }

    #[test]
    fn v2_gps_types() {
        let mut fields = HeaderFields::default();
        let mut state = CodesState::default();
        fields
            .parse_v2_obs_types("     4    L1    L2    C1    P2", None, &mut state)
            .unwrap();
        fields.validate_codes(&state).unwrap();
        assert_eq!(fields.codes.len(), 1);
        assert_eq!(fields.codes(SatelliteSystem::GPS).unwrap().len(), 4);
    }

    #[test]
    fn glonass_slots() {
        let mut fields = HeaderFields::default();
        fields
            .parse_glonass_slots(" 22 R01  1 R02 -4 R03  5 R04  6 R05  1 R06 -4 R07  5 R08  6")
            .unwrap();
        fields
            .parse_glonass_slots("    R09 -2 R10 -7")
            .unwrap();
        assert_eq!(fields.glonass_slots.len(), 10);
        assert_eq!(
            fields.glonass_slots.get(&PRN::from_str("R02").unwrap()),
            Some(&-4)
        );
        assert_eq!(
            fields.glonass_slots.get(&PRN::from_str("R10").unwrap()),
            Some(&-7)
        );
    }

    #[test]
    fn time_of_first_obs() {
        let e = HeaderFields::parse_time_of_obs(
            "  2018    11     6    19     0    0.0000000     GPS",
            TimeScale::UTC,
        )
        .unwrap();
        assert_eq!(e, Epoch::from_str("2018-11-06T19:00:00 GPST").unwrap());
        let e = HeaderFields::parse_time_of_obs(
            "  2021    01    01    00    00    0.0000000",
            TimeScale::GST,
        )
        .unwrap();
        assert_eq!(e.time_scale, TimeScale::GST);
    }
}
