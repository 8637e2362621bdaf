//! Stream statistics
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use hifitime::{Duration, Epoch};
use itertools::Itertools;
use log::debug;

use crate::{
    constellation::SatelliteSystem,
    error::Error,
    navigation::{Ephemeris, NavDecoder},
    observable::Observable,
    observation::{ObsDecoder, ObsEpoch},
    prn::PRN,
};

/// Number of successive gaps the sampling interval is estimated from
const MAX_GAPS: usize = 10;

/// Observation stream statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObsStats {
    /// Number of data epochs
    pub epochs: usize,
    /// First data epoch
    pub first_epoch: Option<Epoch>,
    /// Last data epoch
    pub last_epoch: Option<Epoch>,
    /// Non zero measurements, per satellite and observable
    pub counts: BTreeMap<PRN, BTreeMap<Observable, usize>>,
    gaps: Vec<Duration>,
}

impl ObsStats {
    /// Accounts for a new epoch. Event epochs are ignored.
    pub fn update(&mut self, epoch: &ObsEpoch) {
        if epoch.is_event() {
            return;
        }
        if let Some(last) = self.last_epoch {
            if self.gaps.len() < MAX_GAPS {
                self.gaps.push(epoch.time - last);
            }
        } else {
            self.first_epoch = Some(epoch.time);
        }
        self.last_epoch = Some(epoch.time);
        self.epochs += 1;

        for sat in &epoch.sats {
            let counts = self.counts.entry(sat.prn).or_default();
            for (observable, obs) in &sat.obs {
                if !obs.is_zero() {
                    *counts.entry(observable.clone()).or_insert(0) += 1;
                }
            }
        }
    }

    /// Runs through the whole stream
    pub fn from_decoder<R: BufRead>(decoder: ObsDecoder<R>) -> Result<Self, Error> {
        let mut stats = Self::default();
        for epoch in decoder {
            stats.update(&epoch?);
        }
        debug!(
            "{} epochs from {:?} to {:?}",
            stats.epochs, stats.first_epoch, stats.last_epoch
        );
        Ok(stats)
    }

    /// Median of the first gaps between data epochs.
    /// With an even number of gaps, the upper middle one.
    pub fn sampling_interval(&self) -> Option<Duration> {
        let len = self.gaps.len();
        self.gaps.iter().copied().sorted().nth(len / 2)
    }

    /// Satellites encountered, sorted
    pub fn satellites(&self) -> Vec<PRN> {
        self.counts.keys().copied().collect()
    }

    /// Number of non zero measurements of `observable` for `prn`
    pub fn count(&self, prn: &PRN, observable: &Observable) -> usize {
        self.counts
            .get(prn)
            .and_then(|counts| counts.get(observable))
            .copied()
            .unwrap_or(0)
    }
}

/// Navigation stream statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavStats {
    /// Number of ephemerides
    pub ephemerides: usize,
    /// Satellite systems encountered
    pub systems: BTreeSet<SatelliteSystem>,
    /// Satellites encountered
    pub satellites: BTreeSet<PRN>,
    /// Earliest time of clock
    pub first_toc: Option<Epoch>,
    /// Latest time of clock
    pub last_toc: Option<Epoch>,
}

impl NavStats {
    /// Accounts for a new [Ephemeris]
    pub fn update(&mut self, ephemeris: &Ephemeris) {
        let toc = ephemeris.toc();
        self.ephemerides += 1;
        self.systems.insert(ephemeris.prn().system);
        self.satellites.insert(ephemeris.prn());
        self.first_toc = Some(match self.first_toc {
            Some(first) if first <= toc => first,
            _ => toc,
        });
        self.last_toc = Some(match self.last_toc {
            Some(last) if last >= toc => last,
            _ => toc,
        });
    }

    /// Runs through the whole stream. Orbits are not needed here,
    /// so the decoder is switched to fast mode.
    pub fn from_decoder<R: BufRead>(decoder: NavDecoder<R>) -> Result<Self, Error> {
        let mut stats = Self::default();
        for ephemeris in decoder.fast_mode(true) {
            stats.update(&ephemeris?);
        }
        debug!(
            "{} ephemerides, {} satellites",
            stats.ephemerides,
            stats.satellites.len()
        );
        Ok(stats)
    }
}
