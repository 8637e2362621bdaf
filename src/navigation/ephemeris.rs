//! Broadcast ephemerides
use hifitime::Epoch;

use crate::{
    constellation::SatelliteSystem,
    error::{ParsingError, ValidationError},
    navigation::record::RecordLayout,
    prn::PRN,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keplerian parameters and their harmonic corrections,
/// shared by GPS, QZSS, Galileo, BeiDou and NavIC.
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeplerOrbit {
    /// Issue of data: IODE (GPS, QZSS), IODnav (Galileo), AODE (BeiDou), IODEC (NavIC)
    pub iode: f64,
    /// Amplitude of sine harmonic correction term of the orbit radius (m)
    pub crs: f64,
    /// Mean motion difference from computed value (rad.s⁻¹)
    pub dn: f64,
    /// Mean anomaly at reference time (rad)
    pub m0: f64,
    /// Amplitude of cosine harmonic correction term of the argument of latitude (rad)
    pub cuc: f64,
    /// Eccentricity
    pub e: f64,
    /// Amplitude of sine harmonic correction term of the argument of latitude (rad)
    pub cus: f64,
    /// Square root of the semi major axis (m^1/2)
    pub sqrt_a: f64,
    /// Time of ephemeris, in seconds of week
    pub toe: f64,
    /// Amplitude of cosine harmonic correction term of the angle of inclination (rad)
    pub cic: f64,
    /// Longitude of ascending node at weekly epoch (rad)
    pub omega0: f64,
    /// Amplitude of sine harmonic correction term of the angle of inclination (rad)
    pub cis: f64,
    /// Inclination angle at reference time (rad)
    pub i0: f64,
    /// Amplitude of cosine harmonic correction term of the orbit radius (m)
    pub crc: f64,
    /// Argument of perigee (rad)
    pub omega: f64,
    /// Rate of right ascension (rad.s⁻¹)
    pub omega_dot: f64,
    /// Rate of inclination angle (rad.s⁻¹)
    pub idot: f64,
}

impl KeplerOrbit {
    /// Broadcast orbit lines 1 to 4, followed by IDOT (line 5, first slot)
    fn parse(layout: &RecordLayout, lines: &[String]) -> Result<Self, ParsingError> {
        let [iode, crs, dn, m0] = layout.line(lines, 1)?;
        let [cuc, e, cus, sqrt_a] = layout.line(lines, 2)?;
        let [toe, cic, omega0, cis] = layout.line(lines, 3)?;
        let [i0, crc, omega, omega_dot] = layout.line(lines, 4)?;
        Ok(Self {
            iode,
            crs,
            dn,
            m0,
            cuc,
            e,
            cus,
            sqrt_a,
            toe,
            cic,
            omega0,
            cis,
            i0,
            crc,
            omega,
            omega_dot,
            idot: layout.float(lines, 5, 0)?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..1.0).contains(&self.e) {
            return Err(ValidationError::Eccentricity(self.e));
        }
        if self.sqrt_a <= 0.0 {
            return Err(ValidationError::SqrtSemiMajorAxis(self.sqrt_a));
        }
        Ok(())
    }
}

/// GPS and QZSS legacy parameters
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsOrbit {
    pub kepler: KeplerOrbit,
    /// Codes on L2 channel
    pub l2_codes: u32,
    /// GPS week, continuous
    pub week: u32,
    /// L2 P data flag
    pub l2p_flag: bool,
    /// SV accuracy (m)
    pub ura: f64,
    /// SV health bits
    pub health: u32,
    /// Total group delay (s)
    pub tgd: f64,
    /// Issue of data, clock
    pub iodc: f64,
    /// Transmission time of message, in seconds of week
    pub transmission_time: f64,
    /// Fit interval (hours). QZSS only states whether it exceeds 2 hours.
    pub fit_interval: f64,
}

/// Galileo INAV / FNAV parameters
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GalileoOrbit {
    pub kepler: KeplerOrbit,
    /// Data sources bitmask (INAV, FNAV, clock reference)
    pub data_sources: u32,
    /// GAL week, aligned to GPS week
    pub week: u32,
    /// Signal in space accuracy (m)
    pub sisa: f64,
    /// SV health bits
    pub health: u32,
    /// E5a/E1 broadcast group delay (s)
    pub bgd_e5a_e1: f64,
    /// E5b/E1 broadcast group delay (s)
    pub bgd_e5b_e1: f64,
    /// Transmission time of message, in seconds of week
    pub transmission_time: f64,
}

/// BeiDou D1 / D2 parameters
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BeiDouOrbit {
    pub kepler: KeplerOrbit,
    /// BDT week
    pub week: u32,
    /// SV accuracy (m)
    pub accuracy: f64,
    /// Autonomous satellite health flag
    pub sat_h1: u32,
    /// B1/B3 group delay (s)
    pub tgd1: f64,
    /// B2/B3 group delay (s)
    pub tgd2: f64,
    /// Transmission time of message, in seconds of week
    pub transmission_time: f64,
    /// Age of data, clock
    pub aodc: f64,
}

/// NavIC (IRNSS) parameters
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavICOrbit {
    pub kepler: KeplerOrbit,
    /// IRN week, aligned to GPS week
    pub week: u32,
    /// User range accuracy (m)
    pub ura: f64,
    /// SV health
    pub health: u32,
    /// Total group delay (s)
    pub tgd: f64,
    /// Transmission time of message, in seconds of week
    pub transmission_time: f64,
}

/// Glonass FDMA parameters: state vector rather than Kepler elements.
/// Clock terms are -τn (bias), +γn (relative frequency bias)
/// and the message frame time, in seconds of UTC week.
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlonassOrbit {
    /// Position (km)
    pub position: (f64, f64, f64),
    /// Velocity (km.s⁻¹)
    pub velocity: (f64, f64, f64),
    /// Acceleration (km.s⁻²)
    pub acceleration: (f64, f64, f64),
    /// Health, 0 means OK
    pub health: u32,
    /// Frequency channel (-7..=13)
    pub channel: i8,
    /// Age of operation information (days)
    pub age: u32,
    /// Status flags, from revision 3.05
    pub status: Option<u32>,
    /// L1/L2 group delay difference (s), from revision 3.05
    pub l1_l2_delay: Option<f64>,
    /// User range accuracy index, from revision 3.05
    pub urai: Option<u32>,
    /// Health flags, from revision 3.05
    pub health_flags: Option<u32>,
}

/// SBAS parameters. Clock terms are aGf0, aGf1 and the transmission time.
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SbasOrbit {
    /// Position (km)
    pub position: (f64, f64, f64),
    /// Velocity (km.s⁻¹)
    pub velocity: (f64, f64, f64),
    /// Acceleration (km.s⁻²)
    pub acceleration: (f64, f64, f64),
    /// Health
    pub health: u32,
    /// User range accuracy (m)
    pub ura: f64,
    /// Issue of data, navigation
    pub iodn: u32,
}

/// System dependent part of an [Ephemeris]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BroadcastOrbit {
    GPS(GpsOrbit),
    QZSS(GpsOrbit),
    Galileo(GalileoOrbit),
    BeiDou(BeiDouOrbit),
    NavIC(NavICOrbit),
    Glonass(GlonassOrbit),
    SBAS(SbasOrbit),
}

impl BroadcastOrbit {
    /// Zeroed parameters, for given system
    fn empty(system: SatelliteSystem) -> Result<Self, ParsingError> {
        match system {
            SatelliteSystem::GPS => Ok(Self::GPS(GpsOrbit::default())),
            SatelliteSystem::QZSS => Ok(Self::QZSS(GpsOrbit::default())),
            SatelliteSystem::Galileo => Ok(Self::Galileo(GalileoOrbit::default())),
            SatelliteSystem::BeiDou => Ok(Self::BeiDou(BeiDouOrbit::default())),
            SatelliteSystem::NavIC => Ok(Self::NavIC(NavICOrbit::default())),
            SatelliteSystem::Glonass => Ok(Self::Glonass(GlonassOrbit::default())),
            SatelliteSystem::SBAS => Ok(Self::SBAS(SbasOrbit::default())),
            SatelliteSystem::Mixed => Err(ParsingError::UndefinedSatelliteSystem),
        }
    }

    /// [SatelliteSystem] these parameters describe
    pub fn system(&self) -> SatelliteSystem {
        match self {
            Self::GPS(_) => SatelliteSystem::GPS,
            Self::QZSS(_) => SatelliteSystem::QZSS,
            Self::Galileo(_) => SatelliteSystem::Galileo,
            Self::BeiDou(_) => SatelliteSystem::BeiDou,
            Self::NavIC(_) => SatelliteSystem::NavIC,
            Self::Glonass(_) => SatelliteSystem::Glonass,
            Self::SBAS(_) => SatelliteSystem::SBAS,
        }
    }

    /// Returns Keplerian parameters, if this is not a state vector description
    pub fn kepler(&self) -> Option<&KeplerOrbit> {
        match self {
            Self::GPS(orbit) | Self::QZSS(orbit) => Some(&orbit.kepler),
            Self::Galileo(orbit) => Some(&orbit.kepler),
            Self::BeiDou(orbit) => Some(&orbit.kepler),
            Self::NavIC(orbit) => Some(&orbit.kepler),
            Self::Glonass(_) | Self::SBAS(_) => None,
        }
    }
}

fn parse_gps(layout: &RecordLayout, lines: &[String]) -> Result<GpsOrbit, ParsingError> {
    let [_, l2_codes, week, l2p_flag] = layout.line(lines, 5)?;
    let [ura, health, tgd, iodc] = layout.line(lines, 6)?;
    let [transmission_time, fit_interval, _, _] = layout.line(lines, 7)?;
    Ok(GpsOrbit {
        kepler: KeplerOrbit::parse(layout, lines)?,
        l2_codes: l2_codes as u32,
        week: week as u32,
        l2p_flag: l2p_flag != 0.0,
        ura,
        health: health as u32,
        tgd,
        iodc,
        transmission_time,
        fit_interval,
    })
}

fn parse_galileo(layout: &RecordLayout, lines: &[String]) -> Result<GalileoOrbit, ParsingError> {
    let [_, data_sources, week, _] = layout.line(lines, 5)?;
    let [sisa, health, bgd_e5a_e1, bgd_e5b_e1] = layout.line(lines, 6)?;
    Ok(GalileoOrbit {
        kepler: KeplerOrbit::parse(layout, lines)?,
        data_sources: data_sources as u32,
        week: week as u32,
        sisa,
        health: health as u32,
        bgd_e5a_e1,
        bgd_e5b_e1,
        transmission_time: layout.float(lines, 7, 0)?,
    })
}

fn parse_beidou(layout: &RecordLayout, lines: &[String]) -> Result<BeiDouOrbit, ParsingError> {
    let [_, _, week, _] = layout.line(lines, 5)?;
    let [accuracy, sat_h1, tgd1, tgd2] = layout.line(lines, 6)?;
    let [transmission_time, aodc, _, _] = layout.line(lines, 7)?;
    Ok(BeiDouOrbit {
        kepler: KeplerOrbit::parse(layout, lines)?,
        week: week as u32,
        accuracy,
        sat_h1: sat_h1 as u32,
        tgd1,
        tgd2,
        transmission_time,
        aodc,
    })
}

fn parse_navic(layout: &RecordLayout, lines: &[String]) -> Result<NavICOrbit, ParsingError> {
    let [_, _, week, _] = layout.line(lines, 5)?;
    let [ura, health, tgd, _] = layout.line(lines, 6)?;
    Ok(NavICOrbit {
        kepler: KeplerOrbit::parse(layout, lines)?,
        week: week as u32,
        ura,
        health: health as u32,
        tgd,
        transmission_time: layout.float(lines, 7, 0)?,
    })
}

/// State vector lines, shared by Glonass and SBAS:
/// returns position, velocity, acceleration and the 4th slot of each line.
#[allow(clippy::type_complexity)]
fn parse_state_vector(
    layout: &RecordLayout,
    lines: &[String],
) -> Result<((f64, f64, f64), (f64, f64, f64), (f64, f64, f64), [f64; 3]), ParsingError> {
    let [x, vx, ax, a] = layout.line(lines, 1)?;
    let [y, vy, ay, b] = layout.line(lines, 2)?;
    let [z, vz, az, c] = layout.line(lines, 3)?;
    Ok(((x, y, z), (vx, vy, vz), (ax, ay, az), [a, b, c]))
}

fn parse_glonass(layout: &RecordLayout, lines: &[String]) -> Result<GlonassOrbit, ParsingError> {
    let (position, velocity, acceleration, [health, channel, age]) =
        parse_state_vector(layout, lines)?;
    let mut orbit = GlonassOrbit {
        position,
        velocity,
        acceleration,
        health: health as u32,
        channel: channel as i8,
        age: age as u32,
        ..Default::default()
    };
    if layout.lines > 4 {
        let [status, delay, urai, flags] = layout.line(lines, 4)?;
        orbit.status = Some(status as u32);
        orbit.l1_l2_delay = Some(delay);
        orbit.urai = Some(urai as u32);
        orbit.health_flags = Some(flags as u32);
    }
    Ok(orbit)
}

fn parse_sbas(layout: &RecordLayout, lines: &[String]) -> Result<SbasOrbit, ParsingError> {
    let (position, velocity, acceleration, [health, ura, iodn]) =
        parse_state_vector(layout, lines)?;
    Ok(SbasOrbit {
        position,
        velocity,
        acceleration,
        health: health as u32,
        ura,
        iodn: iodn as u32,
    })
}

/// Broadcast ephemeris of one satellite, at one time of clock
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ephemeris {
    /// Satellite
    pub prn: PRN,
    /// Time of clock, expressed in the satellite [hifitime::TimeScale]
    pub toc: Epoch,
    /// Clock bias (s). -τn for Glonass, aGf0 for SBAS.
    pub clock_bias: f64,
    /// Clock drift (s.s⁻¹). +γn for Glonass, aGf1 for SBAS.
    pub clock_drift: f64,
    /// Clock drift rate (s.s⁻²). Message frame time for Glonass,
    /// transmission time for SBAS.
    pub clock_drift_rate: f64,
    /// System dependent parameters
    pub orbit: BroadcastOrbit,
}

impl Ephemeris {
    /// Builds an [Ephemeris] that only identifies its satellite and time of clock,
    /// every other parameter being zero. Such an ephemeris does not [Self::validate].
    pub fn identity(prn: PRN, toc: Epoch) -> Result<Self, ParsingError> {
        Ok(Self {
            prn,
            toc,
            clock_bias: 0.0,
            clock_drift: 0.0,
            clock_drift_rate: 0.0,
            orbit: BroadcastOrbit::empty(prn.system)?,
        })
    }

    /// Decodes a complete record: `lines` holds the epoch line followed
    /// by the broadcast orbit lines. Missing trailing lines read as zeros.
    pub(crate) fn parse(
        layout: &RecordLayout,
        prn: PRN,
        toc: Epoch,
        lines: &[String],
    ) -> Result<Self, ParsingError> {
        let (clock_bias, clock_drift, clock_drift_rate) = layout.clock(lines)?;
        let orbit = match prn.system {
            SatelliteSystem::GPS => BroadcastOrbit::GPS(parse_gps(layout, lines)?),
            SatelliteSystem::QZSS => BroadcastOrbit::QZSS(parse_gps(layout, lines)?),
            SatelliteSystem::Galileo => BroadcastOrbit::Galileo(parse_galileo(layout, lines)?),
            SatelliteSystem::BeiDou => BroadcastOrbit::BeiDou(parse_beidou(layout, lines)?),
            SatelliteSystem::NavIC => BroadcastOrbit::NavIC(parse_navic(layout, lines)?),
            SatelliteSystem::Glonass => BroadcastOrbit::Glonass(parse_glonass(layout, lines)?),
            SatelliteSystem::SBAS => BroadcastOrbit::SBAS(parse_sbas(layout, lines)?),
            SatelliteSystem::Mixed => return Err(ParsingError::UndefinedSatelliteSystem),
        };
        Ok(Self {
            prn,
            toc,
            clock_bias,
            clock_drift,
            clock_drift_rate,
            orbit,
        })
    }

    /// Satellite this ephemeris describes
    pub fn prn(&self) -> PRN {
        self.prn
    }

    /// Time of clock
    pub fn toc(&self) -> Epoch {
        self.toc
    }

    /// Returns (bias, drift, drift rate) of the onboard clock
    pub fn sv_clock(&self) -> (f64, f64, f64) {
        (self.clock_bias, self.clock_drift, self.clock_drift_rate)
    }

    /// Checks this ephemeris is self consistent
    pub fn validate(&self) -> Result<(), ValidationError> {
        let expected = self.orbit.system();
        if self.prn.system != expected {
            return Err(ValidationError::SystemMismatch {
                prn: self.prn,
                expected,
            });
        }
        match &self.orbit {
            BroadcastOrbit::Glonass(GlonassOrbit { position, .. })
            | BroadcastOrbit::SBAS(SbasOrbit { position, .. }) => {
                if *position == (0.0, 0.0, 0.0) {
                    return Err(ValidationError::NullPosition);
                }
                Ok(())
            },
            orbit => match orbit.kepler() {
                Some(kepler) => kepler.validate(),
                None => Ok(()),
            },
        }
    }
}
