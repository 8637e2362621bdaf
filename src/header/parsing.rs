//! Header section decoding
use std::io::BufRead;
use std::str::FromStr;

use hifitime::Duration;
use log::{debug, warn};

use crate::{
    constellation::SatelliteSystem,
    epoch::parse_datetime,
    error::{Error, ParsingError},
    fields::{column, field, parse_float, parse_opt_float, parse_opt_int},
    hardware::{Antenna, Receiver},
    header::{Header, HeaderConfig, Label, Provenance, ION_ALPHA_KIND, ION_BETA_KIND},
    leap::Leap,
    marker::GeodeticMarker,
    observation::CodesState,
    observation::HeaderFields as ObservationHeader,
    scanner::LineScanner,
    types::Type,
    version::Version,
};

const VERSION_TYPE_LABEL: &str = "RINEX VERSION / TYPE";

impl Header {
    /// Parses a [Header] from given reader, consuming it
    /// up to and including the "END OF HEADER" line.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut scanner = LineScanner::new(reader);
        Self::decode(&mut scanner)
    }

    /// Decodes the header section. When the first line is not
    /// "RINEX VERSION / TYPE", [Error::NoHeader] is returned and nothing is consumed.
    pub(crate) fn decode<R: BufRead>(scanner: &mut LineScanner<R>) -> Result<Self, Error> {
        let first = match scanner.peek_line()? {
            Some(line) if line.contains(VERSION_TYPE_LABEL) => line.to_string(),
            _ => return Err(Error::NoHeader),
        };
        scanner.next_line()?;

        let mut header = Self::parse_version_type(&first).map_err(|e| Error::at(1, e))?;
        let config = HeaderConfig::new(header.rinex_type, header.version);
        let mut codes_state = CodesState::default();

        loop {
            if scanner.line_number() >= config.max_lines {
                return Err(Error::MissingEndOfHeader);
            }
            let line = match scanner.next_line()? {
                Some(line) => line,
                None => return Err(Error::MissingEndOfHeader),
            };
            let line_number = scanner.line_number();

            if line.len() < config.value_width || !line.is_char_boundary(config.value_width) {
                debug!("header line {}: not a header record", line_number);
                continue;
            }

            let (content, marker) = line.split_at(config.value_width);
            let marker = marker.trim();

            let label = match config.label(marker) {
                Some(label) => label,
                None => {
                    warn!("header line {}: unknown label \"{}\"", line_number, marker);
                    continue;
                },
            };

            if label == Label::EndOfHeader {
                break;
            }

            header
                .apply(label, content, &mut codes_state)
                .map_err(|e| Error::at(line_number, e))?;
        }

        if let Some(obs) = &header.obs {
            obs.validate_codes(&codes_state)
                .map_err(|e| Error::at(scanner.line_number(), e))?;
        }

        Ok(header)
    }

    /// Parses "RINEX VERSION / TYPE". The type letter sits in column 20
    /// (21 for Clock from 3.04), the satellite system in column 40 (42 for Clock 3.04).
    fn parse_version_type(line: &str) -> Result<Self, ParsingError> {
        let version = field(line, 0, 20)
            .split_ascii_whitespace()
            .next()
            .ok_or_else(|| ParsingError::Version(String::new()))?;
        let version = Version::from_str(version)?;
        if !version.is_supported() {
            return Err(ParsingError::Version(version.to_string()));
        }

        let (letter, shifted) = match column(line, 20) {
            Some(' ') | None => (column(line, 21).unwrap_or(' '), true),
            Some(c) => (c, false),
        };
        let (rinex_type, implied) = Type::from_letter(letter)?;

        let system_col = if shifted { 42 } else { 40 };
        let system = match column(line, system_col) {
            Some(' ') | None => None,
            Some(c) => Some(SatelliteSystem::from_abbreviation(c)?),
        };

        let constellation = match rinex_type {
            Type::NavigationData => {
                if version.major < 3 {
                    Some(implied.unwrap_or(SatelliteSystem::GPS))
                } else {
                    implied.or(system)
                }
            },
            Type::ObservationData => Some(system.unwrap_or(SatelliteSystem::GPS)),
            Type::MeteoData => None,
            Type::ClockData => system,
        };

        Ok(Self::new(version, rinex_type, constellation))
    }

    /// Applies one header record to self
    fn apply(
        &mut self,
        label: Label,
        content: &str,
        codes_state: &mut CodesState,
    ) -> Result<(), ParsingError> {
        match label {
            Label::EndOfHeader => {},
            Label::Comment => {
                self.comments.push(content.trim().to_string());
            },
            Label::ProgramRunByDate => {
                let date = field(content, 40, 20).trim();
                let creation_date = match parse_datetime(date) {
                    Ok(e) => Some(e),
                    Err(e) => {
                        warn!("creation date: {}", e);
                        None
                    },
                };
                self.provenance.push(Provenance {
                    program: field(content, 0, 20).trim().to_string(),
                    run_by: field(content, 20, 20).trim().to_string(),
                    date: date.to_string(),
                    creation_date,
                });
            },
            Label::LeapSeconds => {
                self.leap = Some(Leap::parse(content)?);
            },
            Label::Doi => {
                self.doi = Some(content.trim().to_string());
            },
            Label::License => {
                self.license = Some(content.trim().to_string());
            },
            Label::StationInformation => {
                self.station_url = Some(content.trim().to_string());
            },
            Label::MergedFile => {
                if let Some(nav) = &mut self.nav {
                    nav.merged_files = parse_opt_int(field(content, 0, 9))?;
                }
            },
            Label::MarkerName => {
                let name = field(content, 0, 60).trim();
                match &mut self.geodetic_marker {
                    Some(marker) => marker.name = name.to_string(),
                    None => self.geodetic_marker = Some(GeodeticMarker::new(name)),
                }
            },
            Label::MarkerNumber => {
                let number = field(content, 0, 20).trim();
                let marker = self.geodetic_marker.take().unwrap_or_default();
                self.geodetic_marker = Some(marker.with_number(number));
            },
            Label::MarkerType => {
                let marker_type = field(content, 0, 20).trim();
                let marker = self.geodetic_marker.take().unwrap_or_default();
                self.geodetic_marker = Some(marker.with_marker_type(marker_type));
            },
            Label::ObserverAgency => {
                let observer = field(content, 0, 20).trim();
                let agency = field(content, 20, 40).trim();
                if !observer.is_empty() {
                    self.observer = Some(observer.to_string());
                }
                if !agency.is_empty() {
                    self.agency = Some(agency.to_string());
                }
            },
            Label::Receiver => {
                self.rcvr = Some(Receiver::parse(content));
            },
            Label::AntennaType => {
                let antenna = Antenna::parse(content);
                match &mut self.rcvr_antenna {
                    Some(ant) => {
                        ant.sn = antenna.sn;
                        ant.model = antenna.model;
                    },
                    None => self.rcvr_antenna = Some(antenna),
                }
            },
            Label::ApproxPosition => {
                let x = parse_float(field(content, 0, 14))?;
                let y = parse_float(field(content, 14, 14))?;
                let z = parse_float(field(content, 28, 14))?;
                self.ground_position = Some((x, y, z));
            },
            Label::AntennaDeltaHEN => {
                self.rcvr_antenna
                    .get_or_insert_with(Antenna::default)
                    .parse_eccentricities(content)?;
            },
            Label::Interval => {
                if let Some(interval) = parse_opt_float(field(content, 0, 10))? {
                    if interval > 0.0 {
                        self.sampling_interval = Some(Duration::from_seconds(interval));
                    }
                }
            },
            Label::SysObsTypes => {
                self.obs_mut().parse_sys_obs_types(content, codes_state)?;
            },
            Label::TypesOfObs => match self.rinex_type {
                Type::MeteoData => {
                    if let Some(meteo) = &mut self.meteo {
                        meteo.parse_codes(content)?;
                    }
                },
                _ => {
                    let constellation = self.constellation;
                    self.obs_mut()
                        .parse_v2_obs_types(content, constellation, codes_state)?;
                },
            },
            Label::SignalStrengthUnit => {
                let unit = field(content, 0, 20).trim();
                if !unit.is_empty() {
                    self.obs_mut().signal_strength_unit = Some(unit.to_string());
                }
            },
            Label::TimeOfFirstObs => {
                let ts = self.constellation.unwrap_or_default().timescale();
                let epoch = ObservationHeader::parse_time_of_obs(content, ts)?;
                self.obs_mut().timeof_first_obs = Some(epoch);
            },
            Label::TimeOfLastObs => {
                let ts = self.constellation.unwrap_or_default().timescale();
                let epoch = ObservationHeader::parse_time_of_obs(content, ts)?;
                self.obs_mut().timeof_last_obs = Some(epoch);
            },
            Label::GlonassSlotFreq => {
                self.obs_mut().parse_glonass_slots(content)?;
            },
            Label::RcvClockOffsApplied => {
                let applied = parse_opt_int::<u8>(field(content, 0, 6))?;
                self.obs_mut().clock_offset_applied = applied == Some(1);
            },
            Label::NumSatellites => {
                self.obs_mut().num_satellites = parse_opt_int(field(content, 0, 6))?;
            },
            Label::IonAlpha | Label::IonBeta => {
                let kind = if label == Label::IonAlpha {
                    ION_ALPHA_KIND
                } else {
                    ION_BETA_KIND
                };
                if let Some(nav) = &mut self.nav {
                    nav.parse_v2_ionospheric(content, kind)?;
                }
            },
            Label::DeltaUtc => {
                if let Some(nav) = &mut self.nav {
                    nav.parse_delta_utc(content)?;
                }
            },
            Label::CorrToSystemTime => {
                if let Some(nav) = &mut self.nav {
                    nav.parse_corr_to_system_time(content)?;
                }
            },
            Label::IonosphericCorr => {
                if let Some(nav) = &mut self.nav {
                    nav.parse_ionospheric(content)?;
                }
            },
            Label::TimeSystemCorr => {
                if let Some(nav) = &mut self.nav {
                    nav.parse_time_system_corr(content)?;
                }
            },
            Label::SensorModTypeAcc => {
                if let Some(meteo) = &mut self.meteo {
                    meteo.parse_sensor(content)?;
                }
            },
            Label::SensorPosition => {
                if let Some(meteo) = &mut self.meteo {
                    meteo.parse_sensor_position(content)?;
                }
            },
            Label::AnalysisCenter
            | Label::TypesOfData
            | Label::StationNameNum
            | Label::StationClkRef
            | Label::AnalysisClkRef
            | Label::NumSolnStations
            | Label::SolnStationNameNum
            | Label::NumSolnSatellites
            | Label::PrnList
            | Label::TimeSystemId => {
                let long_names = self.version >= Version::new(3, 4);
                if let Some(clock) = &mut self.clock {
                    match label {
                        Label::AnalysisCenter => clock.parse_analysis_center(content),
                        Label::TypesOfData => clock.parse_codes(content)?,
                        Label::StationNameNum => clock.parse_station(content, long_names),
                        Label::StationClkRef => {
                            clock.station_clock_ref = Some(content.trim().to_string());
                        },
                        Label::AnalysisClkRef => {
                            clock.analysis_clock_ref = Some(content.trim().to_string());
                        },
                        Label::NumSolnStations => clock.parse_reference_frame(content),
                        Label::SolnStationNameNum => {
                            clock.parse_solution_station(content, long_names)?
                        },
                        Label::PrnList => clock.parse_prn_list(content)?,
                        Label::TimeSystemId => clock.parse_timescale(content),
                        _ => {},
                    }
                }
            },
            Label::Ignored => {
                debug!("header: ignored record \"{}\"", content.trim_end());
            },
        }
        Ok(())
    }

    fn obs_mut(&mut self) -> &mut ObservationHeader {
        self.obs.get_or_insert_with(ObservationHeader::default)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::observable::Observable;
    use hifitime::{Epoch, TimeScale};
    use std::io::Cursor;

    #[test]
    fn version_type() {
        let header = Header::parse_version_type(
            "     3.03           OBSERVATION DATA    M                   RINEX VERSION / TYPE",
        )
        .unwrap();
        assert_eq!(header.version, Version::new(3, 3));
        assert_eq!(header.rinex_type, Type::ObservationData);
        assert_eq!(header.constellation, Some(SatelliteSystem::Mixed));

        let header = Header::parse_version_type(
            "     2.10           N: GPS NAV DATA                         RINEX VERSION / TYPE",
        )
        .unwrap();
        assert_eq!(header.version, Version::new(2, 10));
        assert_eq!(header.rinex_type, Type::NavigationData);
        assert_eq!(header.constellation, Some(SatelliteSystem::GPS));

        let header = Header::parse_version_type(
            "     2.01           GLONASS NAV DATA                        RINEX VERSION / TYPE",
        )
        .unwrap();
        assert_eq!(header.constellation, Some(SatelliteSystem::Glonass));

        let header = Header::parse_version_type(
            "     3.04           N: GNSS NAV DATA    E: GALILEO          RINEX VERSION / TYPE",
        )
        .unwrap();
        assert_eq!(header.constellation, Some(SatelliteSystem::Galileo));

        let header = Header::parse_version_type(
            "     2.11           OBSERVATION DATA                        RINEX VERSION / TYPE",
        )
        .unwrap();
        assert_eq!(header.constellation, Some(SatelliteSystem::GPS));

        let header = Header::parse_version_type(
            "     3.04            C                    G                    RINEX VERSION / TYPE",
        )
        .unwrap();
        assert_eq!(header.rinex_type, Type::ClockData);
        assert_eq!(header.constellation, Some(SatelliteSystem::GPS));
    }

    #[test]
    fn invalid_version_type() {
        assert!(Header::parse_version_type(
            "     3.03           X                   M                   RINEX VERSION / TYPE"
        )
        .is_err());
        assert!(Header::parse_version_type(
            "     5.00           OBSERVATION DATA    M                   RINEX VERSION / TYPE"
        )
        .is_err());
    }

    #[test]
    fn no_header() {
        let content = "> 2018 11 06 19 00  0.0000000  0 31\n";
        let mut scanner = LineScanner::new(Cursor::new(content));
        let err = Header::decode(&mut scanner).unwrap_err();
        assert!(err.is_no_header());
        // nothing was consumed
        assert_eq!(scanner.line_number(), 0);
        assert_eq!(
            scanner.next_line().unwrap().as_deref(),
            Some("> 2018 11 06 19 00  0.0000000  0 31")
        );
    }

    #[test]
    fn missing_end_of_header() {
        let content = "     3.03           OBSERVATION DATA    M                   RINEX VERSION / TYPE
G    4 C1C L1C D1C S1C                                      SYS / # / OBS TYPES
";
        let err = Header::parse(Cursor::new(content)).unwrap_err();
        assert!(matches!(err, Error::MissingEndOfHeader));
    }

    #[test]
    fn observation_header() {
        let content = "     2.11           OBSERVATION DATA    M (MIXED)           RINEX VERSION / TYPE
teqc  2016Nov7      NOAA/NOS/NGS/CORS   20170707 04:06:33UTCPGM / RUN BY / DATE
ASPA                                                        MARKER NAME
50503S006                                                   MARKER NUMBER
Unknown             Unknown                                 OBSERVER / AGENCY
5635K51040          TRIMBLE NETR9       5.14                REC # / TYPE / VERS
1552019152          TRM57971.00     NONE                    ANT # / TYPE
 -6100258.8690  -996506.1670 -1567978.8630                  APPROX POSITION XYZ
        0.0000        0.0000        0.0000                  ANTENNA: DELTA H/E/N
     1     1                                                WAVELENGTH FACT L1/2
     4    L1    L2    C1    P2                              # / TYPES OF OBSERV
    30.0000                                                 INTERVAL
    18                                                      LEAP SECONDS
this is a comment                                           COMMENT
  2017     7     6     0     0    0.0000000     GPS         TIME OF FIRST OBS
  2017     7     6    23    59   30.0000000     GPS         TIME OF LAST OBS
                                                            END OF HEADER
";
        let header = Header::parse(Cursor::new(content)).unwrap();
        assert_eq!(header.version, Version::new(2, 11));
        assert_eq!(header.constellation, Some(SatelliteSystem::Mixed));
        assert_eq!(header.provenance.len(), 1);
        assert_eq!(header.provenance[0].program, "teqc  2016Nov7");
        assert_eq!(header.provenance[0].run_by, "NOAA/NOS/NGS/CORS");
        // "04:06:33UTC" is not an understood layout
        assert!(header.provenance[0].creation_date.is_none());

        let marker = header.geodetic_marker.as_ref().unwrap();
        assert_eq!(marker.name, "ASPA");
        assert_eq!(marker.number.as_deref(), Some("50503S006"));

        let rcvr = header.rcvr.as_ref().unwrap();
        assert_eq!(rcvr.sn, "5635K51040");
        assert_eq!(rcvr.model, "TRIMBLE NETR9");
        assert_eq!(rcvr.firmware, "5.14");

        let antenna = header.rcvr_antenna.as_ref().unwrap();
        assert_eq!(antenna.model, "TRM57971.00     NONE");
        assert_eq!(antenna.height, Some(0.0));

        assert_eq!(
            header.ground_position,
            Some((-6100258.8690, -996506.1670, -1567978.8630))
        );
        assert_eq!(header.sampling_interval, Some(Duration::from_seconds(30.0)));
        assert_eq!(header.leap.as_ref().map(|l| l.leap), Some(18));
        assert_eq!(header.comments, vec!["this is a comment".to_string()]);

        let obs = header.obs.as_ref().unwrap();
        let gps = obs.codes(SatelliteSystem::GPS).unwrap();
        assert_eq!(gps.len(), 4);
        assert_eq!(gps[3], Observable::PseudoRange("P2".to_string()));
        assert_eq!(
            obs.timeof_first_obs,
            Some(Epoch::from_str("2017-07-06T00:00:00 GPST").unwrap())
        );
        assert_eq!(header.timescale(), TimeScale::GPST);
    }
}
