//! Comparison of two Observation streams
use std::io::BufRead;

use hifitime::Epoch;
use itertools::{EitherOrBoth, Itertools};
use log::{info, warn};

use crate::{
    error::Error,
    header::Header,
    observable::Observable,
    observation::{ObsDecoder, SatObs},
    prn::PRN,
    sync::{SyncEpochs, Synchronizer},
};

/// Stream a discrepancy applies to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// One difference between two synchronized epochs
#[derive(Debug, Clone, PartialEq)]
pub enum Discrepancy {
    /// Satellite is only present on one side
    MissingSatellite {
        time: Epoch,
        prn: PRN,
        /// Side lacking this satellite
        missing: Side,
    },
    /// Observable is only present on one side
    MissingObservable {
        time: Epoch,
        prn: PRN,
        observable: Observable,
        /// Side lacking this observable
        missing: Side,
    },
    /// Values differ by more than the tolerance
    Value {
        time: Epoch,
        prn: PRN,
        observable: Observable,
        a: f64,
        b: f64,
    },
}

impl std::fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::MissingSatellite { time, prn, missing } => {
                write!(f, "{}: {} missing in {}", time, prn, missing)
            },
            Self::MissingObservable {
                time,
                prn,
                observable,
                missing,
            } => write!(f, "{}: {} {} missing in {}", time, prn, observable, missing),
            Self::Value {
                time,
                prn,
                observable,
                a,
                b,
            } => write!(
                f,
                "{}: {} {} differs: {} / {} (delta={})",
                time,
                prn,
                observable,
                a,
                b,
                a - b
            ),
        }
    }
}

/// Outcome of [diff]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffReport {
    /// Header fields that differ
    pub header: Vec<String>,
    /// Number of epochs both streams share
    pub epochs: usize,
    /// Every discrepancy, in stream order
    pub discrepancies: Vec<Discrepancy>,
}

impl DiffReport {
    /// True when both streams agree, headers excluded
    pub fn is_identical(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Lists the names of the [Header] fields that differ
pub fn diff_headers(a: &Header, b: &Header) -> Vec<String> {
    let mut fields = Vec::<String>::new();
    if a.version != b.version {
        fields.push("version".to_string());
    }
    if a.rinex_type != b.rinex_type {
        fields.push("rinex_type".to_string());
    }
    if a.constellation != b.constellation {
        fields.push("constellation".to_string());
    }
    if a.geodetic_marker != b.geodetic_marker {
        fields.push("geodetic_marker".to_string());
    }
    if a.observer != b.observer || a.agency != b.agency {
        fields.push("observer_agency".to_string());
    }
    if a.rcvr != b.rcvr {
        fields.push("receiver".to_string());
    }
    if a.rcvr_antenna != b.rcvr_antenna {
        fields.push("antenna".to_string());
    }
    if a.ground_position != b.ground_position {
        fields.push("ground_position".to_string());
    }
    if a.sampling_interval != b.sampling_interval {
        fields.push("sampling_interval".to_string());
    }
    if a.leap != b.leap {
        fields.push("leap".to_string());
    }
    match (&a.obs, &b.obs) {
        (Some(obs_a), Some(obs_b)) => {
            if obs_a.codes != obs_b.codes {
                fields.push("observables".to_string());
            }
            if obs_a.timeof_first_obs != obs_b.timeof_first_obs {
                fields.push("timeof_first_obs".to_string());
            }
            if obs_a.timeof_last_obs != obs_b.timeof_last_obs {
                fields.push("timeof_last_obs".to_string());
            }
        },
        (None, None) => {},
        _ => fields.push("observation_fields".to_string()),
    }
    fields
}

fn diff_sat(time: Epoch, a: &SatObs, b: &SatObs, tolerance: f64) -> Vec<Discrepancy> {
    let mut ret = Vec::new();
    let observables_a = a.obs.keys().sorted();
    let observables_b = b.obs.keys().sorted();
    for pair in observables_a.merge_join_by(observables_b, |oa, ob| oa.cmp(ob)) {
        match pair {
            EitherOrBoth::Both(observable, _) => {
                let (va, vb) = (a.obs[observable].value, b.obs[observable].value);
                if (va - vb).abs() > tolerance {
                    ret.push(Discrepancy::Value {
                        time,
                        prn: a.prn,
                        observable: observable.clone(),
                        a: va,
                        b: vb,
                    });
                }
            },
            EitherOrBoth::Left(observable) => ret.push(Discrepancy::MissingObservable {
                time,
                prn: a.prn,
                observable: observable.clone(),
                missing: Side::B,
            }),
            EitherOrBoth::Right(observable) => ret.push(Discrepancy::MissingObservable {
                time,
                prn: a.prn,
                observable: observable.clone(),
                missing: Side::A,
            }),
        }
    }
    ret
}

/// Compares one pair of synchronized epochs.
/// Values differing by more than `tolerance` (absolute) are reported.
pub fn diff_epochs(epochs: &SyncEpochs, tolerance: f64) -> Vec<Discrepancy> {
    let time = epochs.a.time;
    let sats_a = epochs.a.sats.iter().sorted_by_key(|sat| sat.prn);
    let sats_b = epochs.b.sats.iter().sorted_by_key(|sat| sat.prn);
    sats_a
        .merge_join_by(sats_b, |sa, sb| sa.prn.cmp(&sb.prn))
        .flat_map(|pair| match pair {
            EitherOrBoth::Both(sa, sb) => diff_sat(time, sa, sb, tolerance),
            EitherOrBoth::Left(sa) => vec![Discrepancy::MissingSatellite {
                time,
                prn: sa.prn,
                missing: Side::B,
            }],
            EitherOrBoth::Right(sb) => vec![Discrepancy::MissingSatellite {
                time,
                prn: sb.prn,
                missing: Side::A,
            }],
        })
        .collect()
}

/// Compares two Observation streams, epoch by epoch.
/// Discrepancies are logged and collected, but do not stop the comparison.
/// The first decoding error aborts it.
pub fn diff<A: BufRead, B: BufRead>(
    a: ObsDecoder<A>,
    b: ObsDecoder<B>,
    tolerance: f64,
) -> Result<DiffReport, Error> {
    let mut report = DiffReport {
        header: diff_headers(a.header(), b.header()),
        ..Default::default()
    };
    for field in &report.header {
        warn!("header: {} differs", field);
    }

    let mut sync = Synchronizer::new(a, b);
    while sync.sync() {
        if let Some(epochs) = sync.epochs() {
            report.epochs += 1;
            for discrepancy in diff_epochs(epochs, tolerance) {
                warn!("{}", discrepancy);
                report.discrepancies.push(discrepancy);
            }
        }
    }
    if let Some(e) = sync.take_err() {
        return Err(e);
    }

    info!(
        "{} epochs compared, {} discrepancies",
        report.epochs,
        report.discrepancies.len()
    );
    Ok(report)
}
