//! Navigation RINEX specific header fields
use crate::{
    error::ParsingError,
    fields::{column, field, parse_float, parse_int, parse_opt_int},
    header::DELTA_UTC_KIND,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ionospheric model coefficients, broadcast by one system
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IonosphericCorrection {
    /// Correction type, like "GPSA", "GPSB", "GAL" or "BDSA"
    pub kind: String,
    /// Model coefficients (alpha or beta terms for Klobuchar, ai0..ai2 for NeQuick)
    pub params: [f64; 4],
    /// Possible transmission time mark
    pub time_mark: Option<char>,
    /// Possible identifier of the broadcasting satellite
    pub sv_id: Option<u8>,
}

/// System time offset model: ΔT = a0 + a1 * (t - tref)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSystemCorrection {
    /// Correction type, like "GPUT" or "GAGP"
    pub kind: String,
    /// Offset (s)
    pub a0: f64,
    /// Drift (s.s⁻¹)
    pub a1: f64,
    /// Reference time, in seconds of week
    pub ref_time: u32,
    /// Reference week
    pub ref_week: u32,
    /// Possible source of this correction
    pub source: Option<String>,
    /// Possible UTC realization identifier
    pub utc_id: Option<u8>,
}

/// Navigation specific `header` fields
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderFields {
    /// Ionospheric models
    pub ionospheric_corrections: Vec<IonosphericCorrection>,
    /// Time system offsets
    pub time_corrections: Vec<TimeSystemCorrection>,
    /// Possible number of merged files
    pub merged_files: Option<u32>,
}

impl HeaderFields {
    /// Parses RINEX-2 "ION ALPHA" and "ION BETA": 2X,4D12.4
    pub(crate) fn parse_v2_ionospheric(&mut self, content: &str, kind: &str) -> Result<(), ParsingError> {
        let mut params = [0.0_f64; 4];
        for (i, param) in params.iter_mut().enumerate() {
            *param = parse_float(field(content, 2 + 12 * i, 12))?;
        }
        self.ionospheric_corrections.push(IonosphericCorrection {
            kind: kind.to_string(),
            params,
            time_mark: None,
            sv_id: None,
        });
        Ok(())
    }

    /// Parses "IONOSPHERIC CORR": A4,1X,4D12.4,1X,A1,1X,I2
    pub(crate) fn parse_ionospheric(&mut self, content: &str) -> Result<(), ParsingError> {
        let mut params = [0.0_f64; 4];
        for (i, param) in params.iter_mut().enumerate() {
            *param = parse_float(field(content, 5 + 12 * i, 12))?;
        }
        self.ionospheric_corrections.push(IonosphericCorrection {
            kind: field(content, 0, 4).trim().to_string(),
            params,
            time_mark: column(content, 54).filter(|c| *c != ' '),
            sv_id: parse_opt_int(field(content, 56, 2))?,
        });
        Ok(())
    }

    /// Parses RINEX-2 "DELTA-UTC: A0,A1,T,W": 3X,2D19.12,2I9
    pub(crate) fn parse_delta_utc(&mut self, content: &str) -> Result<(), ParsingError> {
        self.time_corrections.push(TimeSystemCorrection {
            kind: DELTA_UTC_KIND.to_string(),
            a0: parse_float(field(content, 3, 19))?,
            a1: parse_float(field(content, 22, 19))?,
            ref_time: parse_int(field(content, 41, 9))?,
            ref_week: parse_int(field(content, 50, 9))?,
            source: None,
            utc_id: None,
        });
        Ok(())
    }

    /// Parses RINEX-2 GLONASS "CORR TO SYSTEM TIME": 3I6,3X,D19.12.
    /// The reference date is dropped, -τc is kept as a0.
    pub(crate) fn parse_corr_to_system_time(&mut self, content: &str) -> Result<(), ParsingError> {
        self.time_corrections.push(TimeSystemCorrection {
            kind: "GLUT".to_string(),
            a0: parse_float(field(content, 21, 19))?,
            ..Default::default()
        });
        Ok(())
    }

    /// Parses "TIME SYSTEM CORR": A4,1X,D17.10,D16.9,1X,I6,1X,I4,1X,A5,1X,I2
    pub(crate) fn parse_time_system_corr(&mut self, content: &str) -> Result<(), ParsingError> {
        let source = field(content, 51, 5).trim();
        self.time_corrections.push(TimeSystemCorrection {
            kind: field(content, 0, 4).trim().to_string(),
            a0: parse_float(field(content, 5, 17))?,
            a1: parse_float(field(content, 22, 16))?,
            ref_time: parse_int(field(content, 38, 7))?,
            ref_week: parse_int(field(content, 45, 5))?,
            source: if source.is_empty() {
                None
            } else {
                Some(source.to_string())
            },
            utc_id: parse_opt_int(field(content, 57, 2))?,
        });
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn v2_ionospheric() {
        let mut fields = HeaderFields::default();
        fields
            .parse_v2_ionospheric("    0.1676D-07  0.2235D-07 -0.1192D-06 -0.1192D-06", "ALPHA")
            .unwrap();
        let ion = &fields.ionospheric_corrections[0];
        assert_eq!(ion.kind, "ALPHA");
        assert_eq!(ion.params, [0.1676E-07, 0.2235E-07, -0.1192E-06, -0.1192E-06]);
    }
    #[test]
    fn v3_ionospheric() {
        let mut fields = HeaderFields::default();
        fields
            .parse_ionospheric("GPSA   7.4506E-09 -1.4901E-08 -5.9605E-08  1.1921E-07")
            .unwrap();
        fields
            .parse_ionospheric("GAL    2.5000E+01  0.0000E+00  0.0000E+00  0.0000E+00")
            .unwrap();
        assert_eq!(fields.ionospheric_corrections.len(), 2);
        assert_eq!(fields.ionospheric_corrections[0].kind, "GPSA");
        assert_eq!(fields.ionospheric_corrections[0].params[1], -1.4901E-08);
        assert_eq!(fields.ionospheric_corrections[1].params[0], 25.0);
    }
    #[test]
    fn delta_utc() {
        let mut fields = HeaderFields::default();
        fields
            .parse_delta_utc("    0.133179128170D-06 0.107469588780D-12   552960     1025")
            .unwrap();
        let corr = &fields.time_corrections[0];
        assert_eq!(corr.a0, 0.133179128170E-06);
        assert_eq!(corr.a1, 0.107469588780E-12);
        assert_eq!(corr.ref_time, 552960);
        assert_eq!(corr.ref_week, 1025);
    }
    #[test]
    fn time_system_corr() {
        let mut fields = HeaderFields::default();
        fields
            .parse_time_system_corr("GPUT -3.7252902985E-09-1.509903313E-14 319488 2167 ")
            .unwrap();
        let corr = &fields.time_corrections[0];
        assert_eq!(corr.kind, "GPUT");
        assert_eq!(corr.a0, -3.7252902985E-09);
        assert_eq!(corr.a1, -1.509903313E-14);
        assert_eq!(corr.ref_time, 319488);
        assert_eq!(corr.ref_week, 2167);
        assert_eq!(corr.source, None);
    }
}
