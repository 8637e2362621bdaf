//! Observation header formatting
use std::io::{BufWriter, Write};

use hifitime::Epoch;
use log::warn;

use crate::{
    constellation::SatelliteSystem,
    epoch::{decompose, time_system_code},
    error::FormattingError,
    fmt_comment, fmt_rinex,
    header::Header,
    observation::HeaderFields as ObservationHeader,
    types::Type,
};

impl Header {
    /// Formats this Observation [Header] into [Write]able interface, using efficient buffering.
    /// The layout mirrors what [Header::parse] expects, so both are inverse of each other.
    pub fn format<W: Write>(&self, w: &mut BufWriter<W>) -> Result<(), FormattingError> {
        let obs = match (&self.rinex_type, &self.obs) {
            (Type::ObservationData, Some(obs)) => obs,
            _ => return Err(FormattingError::NotObservation),
        };

        self.format_rinex_version(w)?;
        for prov in self.provenance.iter() {
            writeln!(
                w,
                "{}",
                fmt_rinex(
                    &format!("{:<20}{:<20}{:<20}", prov.program, prov.run_by, prov.date),
                    "PGM / RUN BY / DATE"
                )
            )?;
        }
        for comment in self.comments.iter() {
            writeln!(w, "{}", fmt_comment(comment))?;
        }

        self.format_marker(w)?;
        self.format_hardware(w)?;

        if let Some((x, y, z)) = self.ground_position {
            writeln!(
                w,
                "{}",
                fmt_rinex(
                    &format!("{:14.4}{:14.4}{:14.4}", x, y, z),
                    "APPROX POSITION XYZ"
                )
            )?;
        }
        if let Some(ant) = &self.rcvr_antenna {
            if ant.height.is_some() || ant.eastern.is_some() || ant.northern.is_some() {
                writeln!(
                    w,
                    "{}",
                    fmt_rinex(
                        &format!(
                            "{:14.4}{:14.4}{:14.4}",
                            ant.height.unwrap_or(0.0),
                            ant.eastern.unwrap_or(0.0),
                            ant.northern.unwrap_or(0.0)
                        ),
                        "ANTENNA: DELTA H/E/N"
                    )
                )?;
            }
        }

        self.format_observables(obs, w)?;

        if let Some(unit) = &obs.signal_strength_unit {
            writeln!(w, "{}", fmt_rinex(unit, "SIGNAL STRENGTH UNIT"))?;
        }
        if let Some(interval) = self.sampling_interval {
            writeln!(
                w,
                "{}",
                fmt_rinex(&format!("{:10.3}", interval.to_seconds()), "INTERVAL")
            )?;
        }
        if let Some(t) = obs.timeof_first_obs {
            writeln!(w, "{}", fmt_rinex(&fmt_time_of_obs(t), "TIME OF FIRST OBS"))?;
        }
        if let Some(t) = obs.timeof_last_obs {
            writeln!(w, "{}", fmt_rinex(&fmt_time_of_obs(t), "TIME OF LAST OBS"))?;
        }

        self.format_glonass_slots(obs, w)?;

        if let Some(leap) = &self.leap {
            let mut content = format!("{:6}", leap.leap);
            if let Some(delta) = leap.delta_tls {
                content.push_str(&format!(
                    "{:6}{:6}{:6}",
                    delta,
                    leap.week.unwrap_or(0),
                    leap.day.unwrap_or(0)
                ));
                if let Some(ts) = leap.timescale {
                    content.push_str(time_system_code(ts));
                }
            }
            writeln!(w, "{}", fmt_rinex(&content, "LEAP SECONDS"))?;
        }
        if let Some(num_sat) = obs.num_satellites {
            writeln!(w, "{}", fmt_rinex(&format!("{:6}", num_sat), "# OF SATELLITES"))?;
        }
        if obs.clock_offset_applied {
            writeln!(w, "{}", fmt_rinex(&format!("{:6}", 1), "RCV CLOCK OFFS APPL"))?;
        }

        writeln!(w, "{}", fmt_rinex("", "END OF HEADER"))?;
        Ok(())
    }

    /// Formats "RINEX VERSION / TYPE"
    fn format_rinex_version<W: Write>(&self, w: &mut BufWriter<W>) -> Result<(), FormattingError> {
        let system = match self.constellation {
            Some(c) => format!("{:x}", c),
            None => String::new(),
        };
        writeln!(
            w,
            "{}",
            fmt_rinex(
                &format!(
                    "{:9.2}{:11}{:<20}{:<20}",
                    self.version.as_f64(),
                    "",
                    "OBSERVATION DATA",
                    system
                ),
                "RINEX VERSION / TYPE"
            )
        )?;
        Ok(())
    }

    fn format_marker<W: Write>(&self, w: &mut BufWriter<W>) -> Result<(), FormattingError> {
        if let Some(marker) = &self.geodetic_marker {
            writeln!(w, "{}", fmt_rinex(&marker.name, "MARKER NAME"))?;
            if let Some(number) = &marker.number {
                writeln!(w, "{}", fmt_rinex(number, "MARKER NUMBER"))?;
            }
            if let Some(marker_type) = &marker.marker_type {
                writeln!(w, "{}", fmt_rinex(marker_type, "MARKER TYPE"))?;
            }
        }
        if self.observer.is_some() || self.agency.is_some() {
            writeln!(
                w,
                "{}",
                fmt_rinex(
                    &format!(
                        "{:<20}{:<40}",
                        self.observer.as_deref().unwrap_or(""),
                        self.agency.as_deref().unwrap_or("")
                    ),
                    "OBSERVER / AGENCY"
                )
            )?;
        }
        Ok(())
    }

    fn format_hardware<W: Write>(&self, w: &mut BufWriter<W>) -> Result<(), FormattingError> {
        if let Some(rcvr) = &self.rcvr {
            writeln!(
                w,
                "{}",
                fmt_rinex(
                    &format!("{:<20}{:<20}{:<20}", rcvr.sn, rcvr.model, rcvr.firmware),
                    "REC # / TYPE / VERS"
                )
            )?;
        }
        if let Some(ant) = &self.rcvr_antenna {
            writeln!(
                w,
                "{}",
                fmt_rinex(&format!("{:<20}{:<20}", ant.sn, ant.model), "ANT # / TYPE")
            )?;
        }
        Ok(())
    }

    /// Formats "SYS / # / OBS TYPES" (RINEX-3) or "# / TYPES OF OBSERV" (RINEX-2)
    fn format_observables<W: Write>(
        &self,
        obs: &ObservationHeader,
        w: &mut BufWriter<W>,
    ) -> Result<(), FormattingError> {
        if self.version.major < 3 {
            // one table for the whole file
            let codes = match self.constellation {
                Some(SatelliteSystem::Mixed) | None => obs
                    .codes
                    .get(&SatelliteSystem::GPS)
                    .or_else(|| obs.codes.values().next()),
                Some(c) => obs.codes.get(&c),
            };
            let codes = match codes {
                Some(codes) => codes,
                None => return Ok(()),
            };
            for (system, table) in obs.codes.iter() {
                if table != codes {
                    warn!(
                        "{} observables differ from the single RINEX-2 table: not formatted",
                        system
                    );
                }
            }
            for (nth, chunk) in codes.chunks(9).enumerate() {
                let mut content = if nth == 0 {
                    format!("{:6}", codes.len())
                } else {
                    format!("{:6}", "")
                };
                for code in chunk {
                    content.push_str(&format!("{:>6}", code.to_string()));
                }
                writeln!(w, "{}", fmt_rinex(&content, "# / TYPES OF OBSERV"))?;
            }
        } else {
            for (system, codes) in obs.codes.iter() {
                for (nth, chunk) in codes.chunks(13).enumerate() {
                    let mut content = if nth == 0 {
                        format!("{:x}  {:3}", system, codes.len())
                    } else {
                        format!("{:6}", "")
                    };
                    for code in chunk {
                        content.push_str(&format!(" {:3}", code.to_string()));
                    }
                    writeln!(w, "{}", fmt_rinex(&content, "SYS / # / OBS TYPES"))?;
                }
            }
        }
        Ok(())
    }

    /// Formats "GLONASS SLOT / FRQ #", 8 satellites per line
    fn format_glonass_slots<W: Write>(
        &self,
        obs: &ObservationHeader,
        w: &mut BufWriter<W>,
    ) -> Result<(), FormattingError> {
        if obs.glonass_slots.is_empty() {
            return Ok(());
        }
        let slots = obs.glonass_slots.iter().collect::<Vec<_>>();
        for (nth, chunk) in slots.chunks(8).enumerate() {
            let mut content = if nth == 0 {
                format!("{:3} ", slots.len())
            } else {
                format!("{:4}", "")
            };
            for (prn, channel) in chunk {
                content.push_str(&format!("{} {:2} ", prn, channel));
            }
            writeln!(w, "{}", fmt_rinex(&content, "GLONASS SLOT / FRQ #"))?;
        }
        Ok(())
    }
}

/// Formats "TIME OF FIRST OBS" and "TIME OF LAST OBS" content
fn fmt_time_of_obs(t: Epoch) -> String {
    let (y, m, d, hh, mm, ss, ns) = decompose(t);
    format!(
        "{:6}{:6}{:6}{:6}{:6}{:13.7}     {:<3}",
        y,
        m,
        d,
        hh,
        mm,
        ss as f64 + ns as f64 * 1.0E-9,
        time_system_code(t.time_scale)
    )
}
