//! RINEX file Header
use hifitime::{Duration, Epoch, TimeScale};

use crate::{
    clock::HeaderFields as ClockHeader,
    constellation::SatelliteSystem,
    hardware::{Antenna, Receiver},
    leap::Leap,
    marker::GeodeticMarker,
    meteo::HeaderFields as MeteoHeader,
    navigation::HeaderFields as NavigationHeader,
    observation::HeaderFields as ObservationHeader,
    types::Type,
    version::Version,
};

mod formatting;
mod labels;
mod parsing;

pub(crate) use labels::{HeaderConfig, Label, DELTA_UTC_KIND, ION_ALPHA_KIND, ION_BETA_KIND};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One "PGM / RUN BY / DATE" line. Files that went through several
/// programs carry several of them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Provenance {
    /// Software name
    pub program: String,
    /// Software operator or agency
    pub run_by: String,
    /// Creation date, as found in the header
    pub date: String,
    /// Creation date, when it could be interpreted
    pub creation_date: Option<Epoch>,
}

/// Describes `RINEX` file header
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// RINEX [Version]
    pub version: Version,
    /// RINEX [Type]
    pub rinex_type: Type,
    /// [SatelliteSystem] describing this entire file.
    pub constellation: Option<SatelliteSystem>,
    /// Comments from this section
    pub comments: Vec<String>,
    /// Production chain, oldest first
    pub provenance: Vec<Provenance>,
    /// Name of observer / operator
    pub observer: Option<String>,
    /// Production Agency
    pub agency: Option<String>,
    /// Possible [GeodeticMarker]
    pub geodetic_marker: Option<GeodeticMarker>,
    /// Possible [Receiver] information
    pub rcvr: Option<Receiver>,
    /// Possible information about Receiver [Antenna]
    pub rcvr_antenna: Option<Antenna>,
    /// Station approximate coordinates (ECEF, m)
    pub ground_position: Option<(f64, f64, f64)>,
    /// Possible [Leap] seconds counter
    pub leap: Option<Leap>,
    /// Possible sampling interval
    pub sampling_interval: Option<Duration>,
    /// Possible file license
    pub license: Option<String>,
    /// Possible Digital Object Identifier
    pub doi: Option<String>,
    /// Possible station / agency URL
    pub station_url: Option<String>,
    /// Observation RINEX specific fields
    pub obs: Option<ObservationHeader>,
    /// Navigation RINEX specific fields
    pub nav: Option<NavigationHeader>,
    /// Meteo RINEX specific fields
    pub meteo: Option<MeteoHeader>,
    /// Clock RINEX specific fields
    pub clock: Option<ClockHeader>,
}

impl Header {
    /// Builds a [Header] for given [Type], with empty type dependent fields
    pub fn new(version: Version, rinex_type: Type, constellation: Option<SatelliteSystem>) -> Self {
        Self {
            version,
            rinex_type,
            constellation,
            comments: Vec::new(),
            provenance: Vec::new(),
            observer: None,
            agency: None,
            geodetic_marker: None,
            rcvr: None,
            rcvr_antenna: None,
            ground_position: None,
            leap: None,
            sampling_interval: None,
            license: None,
            doi: None,
            station_url: None,
            obs: match rinex_type {
                Type::ObservationData => Some(ObservationHeader::default()),
                _ => None,
            },
            nav: match rinex_type {
                Type::NavigationData => Some(NavigationHeader::default()),
                _ => None,
            },
            meteo: match rinex_type {
                Type::MeteoData => Some(MeteoHeader::default()),
                _ => None,
            },
            clock: match rinex_type {
                Type::ClockData => Some(ClockHeader::default()),
                _ => None,
            },
        }
    }
    /// Builds a basic Observation [Header]
    pub fn basic_obs() -> Self {
        Self::new(Version::default(), Type::ObservationData, Some(SatelliteSystem::Mixed))
    }
    /// Builds a basic Navigation [Header]
    pub fn basic_nav() -> Self {
        Self::new(Version::default(), Type::NavigationData, Some(SatelliteSystem::Mixed))
    }
    /// Copies and returns [Header] with specific RINEX [Version]
    pub fn with_version(&self, version: Version) -> Self {
        let mut s = self.clone();
        s.version = version;
        s
    }
    /// Copies and returns [Header] with [SatelliteSystem]
    pub fn with_constellation(&self, c: SatelliteSystem) -> Self {
        let mut s = self.clone();
        s.constellation = Some(c);
        s
    }
    /// Copies and returns [Header] with one more [Provenance]
    pub fn with_provenance(&self, program: &str, run_by: &str, date: &str) -> Self {
        let mut s = self.clone();
        s.provenance.push(Provenance {
            program: program.to_string(),
            run_by: run_by.to_string(),
            date: date.to_string(),
            creation_date: crate::epoch::parse_datetime(date).ok(),
        });
        s
    }
    /// Copies and returns [Header] with observer and agency
    pub fn with_observer_agency(&self, observer: &str, agency: &str) -> Self {
        let mut s = self.clone();
        s.observer = Some(observer.to_string());
        s.agency = Some(agency.to_string());
        s
    }
    /// Copies and returns [Header] with [GeodeticMarker]
    pub fn with_geodetic_marker(&self, marker: GeodeticMarker) -> Self {
        let mut s = self.clone();
        s.geodetic_marker = Some(marker);
        s
    }
    /// Copies and returns [Header] with [Receiver]
    pub fn with_receiver(&self, rcvr: Receiver) -> Self {
        let mut s = self.clone();
        s.rcvr = Some(rcvr);
        s
    }
    /// Copies and returns [Header] with receiver [Antenna]
    pub fn with_receiver_antenna(&self, antenna: Antenna) -> Self {
        let mut s = self.clone();
        s.rcvr_antenna = Some(antenna);
        s
    }
    /// Copies and returns [Header] with approximate station position
    pub fn with_ground_position(&self, position: (f64, f64, f64)) -> Self {
        let mut s = self.clone();
        s.ground_position = Some(position);
        s
    }
    /// Copies and returns [Header] with sampling interval
    pub fn with_sampling_interval(&self, interval: Duration) -> Self {
        let mut s = self.clone();
        s.sampling_interval = Some(interval);
        s
    }
    /// Copies and returns [Header] with leap seconds
    pub fn with_leap(&self, leap: Leap) -> Self {
        let mut s = self.clone();
        s.leap = Some(leap);
        s
    }
    /// Copies and returns [Header] with one more comment
    pub fn with_comment(&self, comment: &str) -> Self {
        let mut s = self.clone();
        s.comments.push(comment.to_string());
        s
    }
    /// Copies and returns [Header] with Observation specific fields
    pub fn with_observation_fields(&self, fields: ObservationHeader) -> Self {
        let mut s = self.clone();
        s.obs = Some(fields);
        s
    }
    /// Returns the [TimeScale] body epochs are expressed in
    pub fn timescale(&self) -> TimeScale {
        if let Some(obs) = &self.obs {
            if let Some(t) = obs.timeof_first_obs {
                return t.time_scale;
            }
        }
        if let Some(clock) = &self.clock {
            if let Some(ts) = clock.timescale {
                return ts;
            }
        }
        match self.constellation {
            Some(c) => c.timescale(),
            None => TimeScale::GPST,
        }
    }
    /// Returns the [SatelliteSystem] implied for records
    /// that do not identify their system (RINEX-2): GPS unless stated otherwise
    pub(crate) fn implied_system(&self) -> SatelliteSystem {
        match self.constellation {
            Some(SatelliteSystem::Mixed) | None => SatelliteSystem::GPS,
            Some(c) => c,
        }
    }
}
