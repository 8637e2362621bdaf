//! Observation record stream
use std::io::BufRead;
use std::path::Path;

use hifitime::Epoch;
use log::trace;

use crate::{
    error::Error,
    header::Header,
    observation::{parsing::ObsParser, ObsEpoch},
    reader::BufferedReader,
    scanner::LineScanner,
    types::Type,
};

/// [ObsDecoder] decodes one [ObsEpoch] at a time from an Observation
/// RINEX stream, RINEX-2 and RINEX-3/4 alike. Memory usage does not
/// grow with the stream: only the current epoch is kept around.
///
/// ```no_run
/// use rinex_stream::prelude::*;
/// let mut decoder = ObsDecoder::from_file("ACOR00ESP_R_20213550000_01D_30S_MO.rnx")
///     .unwrap();
/// while decoder.next_epoch() {
///     let epoch = decoder.epoch().unwrap();
///     for sat in epoch.sats.iter() {
///         // one entry per observable
///         let _ = sat.obs.len();
///     }
/// }
/// assert!(decoder.err().is_none());
/// ```
#[derive(Debug)]
pub struct ObsDecoder<R: BufRead> {
    scanner: LineScanner<R>,
    header: Header,
    parser: ObsParser,
    last_time: Option<Epoch>,
    epoch: Option<ObsEpoch>,
    err: Option<Error>,
    done: bool,
}

impl ObsDecoder<BufferedReader> {
    /// Opens a local Observation RINEX file, possibly gzip compressed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufferedReader::new(path)?;
        Self::new(reader)
    }
}

impl<R: BufRead> ObsDecoder<R> {
    /// Builds an [ObsDecoder], the header is parsed right away
    pub fn new(reader: R) -> Result<Self, Error> {
        let mut scanner = LineScanner::new(reader);
        let header = Header::decode(&mut scanner)?;
        Self::build(scanner, header)
    }

    /// Builds an [ObsDecoder] for a stream that does not start with a header,
    /// typically the continuation of a stream whose [Header] was decoded earlier.
    pub fn with_header(reader: R, header: Header) -> Result<Self, Error> {
        Self::build(LineScanner::new(reader), header)
    }

    fn build(scanner: LineScanner<R>, header: Header) -> Result<Self, Error> {
        if header.rinex_type != Type::ObservationData {
            return Err(Error::UnexpectedType {
                expected: Type::ObservationData,
                found: header.rinex_type,
            });
        }
        let parser = ObsParser::new(&header);
        Ok(Self {
            scanner,
            header,
            parser,
            last_time: None,
            epoch: None,
            err: None,
            done: false,
        })
    }

    /// Returns the [Header] of this stream
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Decodes the next epoch. Returns false at the end of the stream
    /// or on the first error, which is then exposed by [Self::err].
    pub fn next_epoch(&mut self) -> bool {
        if self.done {
            return false;
        }
        match self.parser.decode(&mut self.scanner, self.last_time) {
            Ok(Some(epoch)) => {
                trace!("{} ({}): {} sats", epoch.time, epoch.flag, epoch.sats.len());
                self.last_time = Some(epoch.time);
                self.epoch = Some(epoch);
                true
            },
            Ok(None) => {
                self.done = true;
                false
            },
            Err(e) => {
                self.epoch = None;
                self.err = Some(e);
                self.done = true;
                false
            },
        }
    }

    /// Returns the last decoded epoch
    pub fn epoch(&self) -> Option<&ObsEpoch> {
        self.epoch.as_ref()
    }

    /// Takes ownership of the last decoded epoch
    pub fn take_epoch(&mut self) -> Option<ObsEpoch> {
        self.epoch.take()
    }

    /// Returns the error that terminated this stream, if any.
    /// Reaching the end of the stream is not an error.
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// Number of lines consumed so far, header included
    pub fn line_number(&self) -> usize {
        self.scanner.line_number()
    }
}

impl<R: BufRead> Iterator for ObsDecoder<R> {
    type Item = Result<ObsEpoch, Error>;
    /// Yields epochs, then the terminal error (if any) once
    fn next(&mut self) -> Option<Self::Item> {
        if self.next_epoch() {
            self.take_epoch().map(Ok)
        } else {
            self.err.take().map(Err)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        constellation::SatelliteSystem, epoch::EpochFlag, error::ParsingError, prn::PRN,
    };
    use std::io::Cursor;
    use std::str::FromStr;

    const HEADER: &str = "     3.04           OBSERVATION DATA    M                   RINEX VERSION / TYPE
G    2 C1C L1C                                              SYS / # / OBS TYPES
R    1 C1C                                                  SYS / # / OBS TYPES
  2021    12    21     0     0    0.0000000     GPS         TIME OF FIRST OBS
                                                            END OF HEADER
";

    #[test]
    fn mixed_stream() {
        let content = format!(
            "{}{}",
            HEADER,
            "> 2021 12 21 00 00  0.0000000  0  2
G01  20243517.560 4 106380411.89347
R02  21243517.560 5
> 2021 12 21 00 00 30.0000000  0  1
G01  20243518.560 4 106380416.89347
"
        );
        let mut decoder = ObsDecoder::new(Cursor::new(content)).unwrap();
        assert_eq!(
            decoder.header().constellation,
            Some(SatelliteSystem::Mixed)
        );
        assert_eq!(decoder.line_number(), 5);

        assert!(decoder.next_epoch());
        let epoch = decoder.epoch().unwrap();
        assert_eq!(
            epoch.time,
            Epoch::from_str("2021-12-21T00:00:00 GPST").unwrap()
        );
        assert_eq!(epoch.sats.len(), 2);
        let r02 = epoch.sat(&PRN::from_str("R02").unwrap()).unwrap();
        assert_eq!(r02.obs.len(), 1);

        assert!(decoder.next_epoch());
        let epoch = decoder.take_epoch().unwrap();
        assert_eq!(
            epoch.time,
            Epoch::from_str("2021-12-21T00:00:30 GPST").unwrap()
        );
        assert!(decoder.epoch().is_none());

        assert!(!decoder.next_epoch());
        assert!(decoder.err().is_none());
        assert!(!decoder.next_epoch());
    }

    #[test]
    fn malformed_num_sat() {
        let content = format!(
            "{}{}",
            HEADER,
            "> 2021 12 21 00 00  0.0000000  0  1
G01  20243517.560 4 106380411.89347
> 2021 12 21 00 00 30.0000000  0 x1
G01  20243518.560 4 106380416.89347
"
        );
        let results = ObsDecoder::new(Cursor::new(content))
            .unwrap()
            .collect::<Vec<_>>();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(Error::Parsing { line, source }) => {
                assert_eq!(*line, 8);
                assert_eq!(*source, ParsingError::NumSat("x1".to_string()));
            },
            _ => panic!("expecting a parsing error"),
        }
    }

    #[test]
    fn headerless_stream() {
        let header = ObsDecoder::new(Cursor::new(HEADER))
            .unwrap()
            .header()
            .clone();

        let body = "> 2021 12 21 00 01  0.0000000  4  1
 *** receiver restarted ***                                 COMMENT
> 2021 12 21 00 01 30.0000000  0  1
G05  20243517.560
";
        let mut decoder = ObsDecoder::with_header(Cursor::new(body), header).unwrap();
        assert!(decoder.next_epoch());
        let event = decoder.take_epoch().unwrap();
        assert_eq!(event.flag, EpochFlag::HeaderInformationFollows);
        assert_eq!(event.events.len(), 1);

        assert!(decoder.next_epoch());
        let epoch = decoder.epoch().unwrap();
        assert_eq!(epoch.sats[0].prn, PRN::from_str("G05").unwrap());
        assert!(!decoder.next_epoch());
    }

    #[test]
    fn no_header() {
        let body = "> 2021 12 21 00 01  0.0000000  0  1\n";
        match ObsDecoder::new(Cursor::new(body)) {
            Err(e) => assert!(e.is_no_header()),
            Ok(_) => panic!("should have failed"),
        }
    }
}
