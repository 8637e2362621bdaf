//! Observation RINEX module
use std::collections::HashMap;

use hifitime::Epoch;

use crate::{epoch::EpochFlag, observable::Observable, prn::PRN};

mod decoder;
mod header;
mod lli;
mod parsing;
mod snr;

pub use decoder::ObsDecoder;
pub use header::HeaderFields;
pub use lli::LliFlags;
pub use snr::SNR;

pub(crate) use header::CodesState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One measurement
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obs {
    /// Measured value, zero when blank
    pub value: f64,
    /// Lock loss indication
    pub lli: LliFlags,
    /// Signal strength indication
    pub snr: SNR,
}

impl Obs {
    /// Blank fields decode to zero: the signal was not actually observed
    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }
}

/// Measurements of one satellite, at one epoch
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatObs {
    /// Satellite
    pub prn: PRN,
    /// One entry per observable the header declares for this system,
    /// zero valued when absent from the record.
    pub obs: HashMap<Observable, Obs>,
}

impl SatObs {
    /// Returns the measurement for given observable
    pub fn get(&self, observable: &Observable) -> Option<&Obs> {
        self.obs.get(observable)
    }
}

/// Observation epoch
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObsEpoch {
    /// Sampling instant
    pub time: Epoch,
    /// [EpochFlag]
    pub flag: EpochFlag,
    /// Number of satellites, or number of special records for event flags
    pub num_sat: u16,
    /// Satellites, in record order
    pub sats: Vec<SatObs>,
    /// Receiver clock offset (s)
    pub clock_offset: Option<f64>,
    /// Raw special records that follow an event flag (2 to 5)
    pub events: Vec<String>,
}

impl ObsEpoch {
    /// Returns measurements of given satellite
    pub fn sat(&self, prn: &PRN) -> Option<&SatObs> {
        self.sats.iter().find(|sat| sat.prn == *prn)
    }
    /// Returns true when this epoch only carries special records
    pub fn is_event(&self) -> bool {
        self.flag.is_event()
    }
}
