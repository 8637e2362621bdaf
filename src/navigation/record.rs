//! Fixed column layout of broadcast ephemeris records
use crate::{
    error::ParsingError,
    fields::{field, parse_float},
    version::Version,
};

/// [RecordLayout] locates the 19 column floats of a broadcast record.
/// Line 0 is the epoch line: satellite, time of clock then 3 clock terms.
/// The following lines each carry 4 parameters, RINEX-2 lines
/// being shifted one column to the left.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct RecordLayout {
    /// First parameter offset, on broadcast orbit lines
    pub start: usize,
    /// Parameter width
    pub width: usize,
    /// Left shift applied to every offset
    pub shift: usize,
    /// Number of physical lines, epoch line included
    pub lines: usize,
}

impl RecordLayout {
    pub fn new(version: Version, lines: usize) -> Self {
        Self {
            start: 4,
            width: 19,
            shift: if version.major < 3 { 1 } else { 0 },
            lines,
        }
    }

    /// Offset of the k-th parameter of a line (0..=3).
    /// On the epoch line, slot 0 is the time of clock.
    pub fn offset(&self, k: usize) -> usize {
        self.start - self.shift + self.width * k
    }

    /// Width of the satellite identifier on the epoch line
    pub fn prn_width(&self) -> usize {
        3 - self.shift
    }

    /// Returns the time of clock field of the epoch line
    pub fn toc<'a>(&self, line: &'a str) -> &'a str {
        field(line, self.offset(0), self.width)
    }

    /// Parses parameter `k` of line `nth`. Missing lines or blank fields read as zero.
    pub fn float(&self, lines: &[String], nth: usize, k: usize) -> Result<f64, ParsingError> {
        match lines.get(nth) {
            Some(line) => parse_float(field(line, self.offset(k), self.width)),
            None => Ok(0.0),
        }
    }

    /// Returns the 4 parameters of line `nth`
    pub fn line(&self, lines: &[String], nth: usize) -> Result<[f64; 4], ParsingError> {
        let mut ret = [0.0_f64; 4];
        for (k, value) in ret.iter_mut().enumerate() {
            *value = self.float(lines, nth, k)?;
        }
        Ok(ret)
    }

    /// Returns the 3 clock terms of the epoch line
    pub fn clock(&self, lines: &[String]) -> Result<(f64, f64, f64), ParsingError> {
        Ok((
            self.float(lines, 0, 1)?,
            self.float(lines, 0, 2)?,
            self.float(lines, 0, 3)?,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn offsets() {
        let v3 = RecordLayout::new(Version::new(3, 4), 8);
        assert_eq!(v3.offset(0), 4);
        assert_eq!(v3.offset(1), 23);
        assert_eq!(v3.offset(3), 61);
        assert_eq!(v3.prn_width(), 3);

        let v2 = RecordLayout::new(Version::new(2, 11), 8);
        assert_eq!(v2.offset(0), 3);
        assert_eq!(v2.offset(1), 22);
        assert_eq!(v2.offset(3), 60);
        assert_eq!(v2.prn_width(), 2);
    }
    #[test]
    fn parameters() {
        let layout = RecordLayout::new(Version::new(3, 4), 8);
        let lines = vec![
            "G12 2020 06 17 02 00 00-3.120955079794E-04-2.046363078989E-12 0.000000000000E+00"
                .to_string(),
            "     6.200000000000E+01-5.271875000000E+01 4.716625522612E-09"
                .to_string(),
        ];
        assert_eq!(layout.toc(&lines[0]), "2020 06 17 02 00 00");
        assert_eq!(
            layout.clock(&lines).unwrap(),
            (-3.120955079794E-04, -2.046363078989E-12, 0.0)
        );
        assert_eq!(
            layout.line(&lines, 1).unwrap(),
            [62.0, -52.71875, 4.716625522612E-09, 0.0]
        );
        assert_eq!(layout.line(&lines, 5).unwrap(), [0.0; 4]);
    }
}
