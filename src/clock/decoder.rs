//! Clock record stream
use std::io::BufRead;
use std::path::Path;

use hifitime::TimeScale;
use log::trace;

use crate::{
    clock::{continuation_lines, parse_count, parse_record, ClockRecord},
    error::{Error, ParsingError},
    header::Header,
    reader::BufferedReader,
    scanner::LineScanner,
    types::Type,
};

/// [ClockDecoder] decodes one [ClockRecord] at a time
/// from a Clock RINEX stream.
#[derive(Debug)]
pub struct ClockDecoder<R: BufRead> {
    scanner: LineScanner<R>,
    header: Header,
    timescale: TimeScale,
    record: Option<ClockRecord>,
    err: Option<Error>,
    done: bool,
}

impl ClockDecoder<BufferedReader> {
    /// Opens a local Clock RINEX file, possibly gzip compressed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufferedReader::new(path)?;
        Self::new(reader)
    }
}

impl<R: BufRead> ClockDecoder<R> {
    /// Builds a [ClockDecoder], the header is parsed right away
    pub fn new(reader: R) -> Result<Self, Error> {
        let mut scanner = LineScanner::new(reader);
        let header = Header::decode(&mut scanner)?;
        if header.rinex_type != Type::ClockData {
            return Err(Error::UnexpectedType {
                expected: Type::ClockData,
                found: header.rinex_type,
            });
        }
        let timescale = header
            .clock
            .as_ref()
            .and_then(|clock| clock.timescale)
            .unwrap_or(TimeScale::GPST);
        Ok(Self {
            scanner,
            header,
            timescale,
            record: None,
            err: None,
            done: false,
        })
    }

    /// Returns the [Header] of this stream
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Decodes the next record. Returns false at the end of the stream
    /// or on the first error, which is then exposed by [Self::err].
    pub fn next_record(&mut self) -> bool {
        if self.done {
            return false;
        }
        match self.decode() {
            Ok(Some(record)) => {
                trace!("clock record {} {}", record.name, record.time);
                self.record = Some(record);
                true
            },
            Ok(None) => {
                self.done = true;
                false
            },
            Err(e) => {
                self.err = Some(e);
                self.done = true;
                false
            },
        }
    }

    fn decode(&mut self) -> Result<Option<ClockRecord>, Error> {
        let first = loop {
            match self.scanner.next_line()? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Ok(None),
            }
        };
        let version = self.header.version;
        let count =
            parse_count(version, &first).map_err(|e| Error::at(self.scanner.line_number(), e))?;

        let mut lines = vec![first];
        for _ in 0..continuation_lines(count) {
            match self.scanner.next_line()? {
                Some(line) => lines.push(line),
                None => {
                    return Err(Error::at(
                        self.scanner.line_number(),
                        ParsingError::TruncatedRecord,
                    ))
                },
            }
        }
        parse_record(version, self.timescale, &lines)
            .map(Some)
            .map_err(|e| Error::at(self.scanner.line_number(), e))
    }

    /// Returns the last decoded record
    pub fn record(&self) -> Option<&ClockRecord> {
        self.record.as_ref()
    }

    /// Takes ownership of the last decoded record
    pub fn take_record(&mut self) -> Option<ClockRecord> {
        self.record.take()
    }

    /// Returns the error that terminated this stream, if any
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }
}

impl<R: BufRead> Iterator for ClockDecoder<R> {
    type Item = Result<ClockRecord, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.next_record() {
            self.take_record().map(Ok)
        } else {
            self.err.take().map(Err)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::clock::ClockDataType;
    use std::io::Cursor;

    const CONTENT: &str = "     3.00           C                                       RINEX VERSION / TYPE
CCLOCK              IGSACC @ GA MIT                         PGM / RUN BY / DATE
     2    AR    AS                                          # / TYPES OF DATA
IGS  IGS-ACC: GA MIT                                        ANALYSIS CENTER
   GPS                                                      TIME SYSTEM ID
     1    IGS14                                             # OF SOLN STA / TRF
ABMF 97103M001            2919786071 -5383745076  1774604697SOLN STA NAME / NUM
     2                                                      # OF SOLN SATS
G01 G02                                                     PRN LIST
                                                            END OF HEADER
AR ABMF 2019 01 08 00 00  0.000000  2   -0.331415119107E-07  0.350626190546E-10
AS G01  2019 01 08 00 00  0.000000  4    0.294804625338E-04  0.835484069663E-11
    1.000000000000E-08  2.000000000000E-12
AS G02  2019 01 08 00 00  0.000000  1   -0.364887538519E-03
";

    #[test]
    fn clock_stream() {
        let mut decoder = ClockDecoder::new(Cursor::new(CONTENT)).unwrap();
        let clock = decoder.header().clock.as_ref().unwrap();
        assert_eq!(clock.codes, vec![ClockDataType::AR, ClockDataType::AS]);
        assert_eq!(clock.reference_frame.as_deref(), Some("IGS14"));
        assert_eq!(clock.solution_stations.len(), 1);
        assert_eq!(clock.satellites.len(), 2);
        assert_eq!(clock.timescale, Some(TimeScale::GPST));

        assert!(decoder.next_record());
        assert_eq!(decoder.record().unwrap().name, "ABMF");
        assert!(decoder.next_record());
        let record = decoder.take_record().unwrap();
        assert_eq!(record.values.len(), 4);
        assert_eq!(record.values[3], 2.0E-12);
        assert!(decoder.next_record());
        assert_eq!(decoder.record().unwrap().name, "G02");
        assert!(!decoder.next_record());
        assert!(decoder.err().is_none());
    }

    #[test]
    fn truncated_stream() {
        let content = CONTENT.replace("    1.000000000000E-08  2.000000000000E-12\n", "");
        let content = content.replace(
            "AS G02  2019 01 08 00 00  0.000000  1   -0.364887538519E-03\n",
            "",
        );
        let decoder = ClockDecoder::new(Cursor::new(content)).unwrap();
        let results = decoder.collect::<Vec<_>>();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.parsing_error(), Some(&ParsingError::TruncatedRecord));
    }
}
