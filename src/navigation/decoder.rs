//! Navigation record stream
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use log::{debug, trace};

use crate::{
    constellation::SatelliteSystem,
    epoch::parse_in_timescale,
    error::{Error, ParsingError},
    fields::{column, field},
    header::Header,
    navigation::{Ephemeris, NavFrameType, NavMessageType, RecordLayout},
    prn::PRN,
    reader::BufferedReader,
    scanner::LineScanner,
    types::Type,
    version::Version,
};

/// [NavDecoder] decodes one [Ephemeris] at a time from a Navigation RINEX stream.
/// RINEX-4 frames that do not describe a legacy ephemeris are skipped.
#[derive(Debug)]
pub struct NavDecoder<R: BufRead> {
    scanner: LineScanner<R>,
    header: Header,
    /// System of RINEX-2 records, which omit their letter
    implied: SatelliteSystem,
    fast: bool,
    ephemeris: Option<Ephemeris>,
    err: Option<Error>,
    done: bool,
}

impl NavDecoder<BufferedReader> {
    /// Opens a local Navigation RINEX file, possibly gzip compressed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufferedReader::new(path)?;
        Self::new(reader)
    }
}

impl<R: BufRead> NavDecoder<R> {
    /// Builds a [NavDecoder], the header is parsed right away
    pub fn new(reader: R) -> Result<Self, Error> {
        let mut scanner = LineScanner::new(reader);
        let header = Header::decode(&mut scanner)?;
        if header.rinex_type != Type::NavigationData {
            return Err(Error::UnexpectedType {
                expected: Type::NavigationData,
                found: header.rinex_type,
            });
        }
        Ok(Self {
            scanner,
            implied: header.implied_system(),
            header,
            fast: false,
            ephemeris: None,
            err: None,
            done: false,
        })
    }

    /// In fast mode, only the satellite and time of clock are decoded,
    /// the broadcast orbit lines being skipped. Other parameters are zero.
    pub fn fast_mode(mut self, fast: bool) -> Self {
        self.fast = fast;
        self
    }

    /// Returns the [Header] of this stream
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Decodes the next ephemeris. Returns false at the end of the stream
    /// or on the first error, which is then exposed by [Self::err].
    pub fn next_ephemeris(&mut self) -> bool {
        if self.done {
            return false;
        }
        match self.decode() {
            Ok(Some(eph)) => {
                trace!("{} {}", eph.prn, eph.toc);
                self.ephemeris = Some(eph);
                true
            },
            Ok(None) => {
                self.done = true;
                false
            },
            Err(e) => {
                self.ephemeris = None;
                self.err = Some(e);
                self.done = true;
                false
            },
        }
    }

    /// Returns the last decoded ephemeris
    pub fn ephemeris(&self) -> Option<&Ephemeris> {
        self.ephemeris.as_ref()
    }

    /// Takes ownership of the last decoded ephemeris
    pub fn take_ephemeris(&mut self) -> Option<Ephemeris> {
        self.ephemeris.take()
    }

    /// Returns the error that terminated this stream, if any.
    /// Reaching the end of the stream is not an error.
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    fn version(&self) -> Version {
        self.header.version
    }

    /// Next non blank line
    fn next_content_line(&mut self) -> Result<Option<String>, Error> {
        loop {
            match self.scanner.next_line()? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Some(line)),
                None => return Ok(None),
            }
        }
    }

    fn decode(&mut self) -> Result<Option<Ephemeris>, Error> {
        if self.version().major > 3 {
            if !self.next_eph_frame()? {
                return Ok(None);
            }
        }
        let line = match self.next_content_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        let line_number = self.scanner.line_number();
        let (prn, toc, layout) = self
            .parse_epoch_line(&line)
            .map_err(|e| Error::at(line_number, e))?;

        if self.fast {
            let expected = layout.lines - 1;
            if self.scanner.skip(expected)? < expected {
                return Err(Error::at(
                    self.scanner.line_number(),
                    ParsingError::TruncatedRecord,
                ));
            }
            return Ephemeris::identity(prn, toc)
                .map(Some)
                .map_err(|e| Error::at(line_number, e));
        }

        let mut lines = Vec::with_capacity(layout.lines);
        lines.push(line);
        while lines.len() < layout.lines {
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
        Ephemeris::parse(&layout, prn, toc, &lines)
            .map(Some)
            .map_err(|e| Error::at(self.scanner.line_number(), e))
    }

    /// Identifies the satellite, its time of clock and the record layout
    fn parse_epoch_line(
        &self,
        line: &str,
    ) -> Result<(PRN, hifitime::Epoch, RecordLayout), ParsingError> {
        let version = self.version();
        let prn = if version.major < 3 {
            PRN::from_v2_token(field(line, 0, 2), self.implied)?
        } else {
            PRN::from_str(field(line, 0, 3))?
        };
        let layout = RecordLayout::new(version, prn.system.nav_record_lines(version));
        let toc = parse_in_timescale(layout.toc(line), prn.timescale())?;
        Ok((prn, toc, layout))
    }

    /// RINEX-4: moves to the next "> EPH" frame carrying a legacy message.
    /// Other frames are skipped, up to the next frame marker.
    /// Returns false on EOF.
    fn next_eph_frame(&mut self) -> Result<bool, Error> {
        loop {
            let line = match self.next_content_line()? {
                Some(line) => line,
                None => return Ok(false),
            };
            let line_number = self.scanner.line_number();
            if column(&line, 0) != Some('>') {
                return Err(Error::at(
                    line_number,
                    ParsingError::NavFrame(line.trim().to_string()),
                ));
            }
            let mut items = line[1..].split_ascii_whitespace();
            let frame = NavFrameType::from_str(items.next().unwrap_or(""))
                .map_err(|e| Error::at(line_number, e))?;

            let message = match frame {
                NavFrameType::Ephemeris => {
                    let _sv = items.next();
                    Some(
                        NavMessageType::from_str(items.next().unwrap_or(""))
                            .map_err(|e| Error::at(line_number, e))?,
                    )
                },
                _ => None,
            };

            match message {
                Some(msg) if msg.is_legacy() => return Ok(true),
                _ => {
                    let skipped = self.skip_frame()?;
                    debug!(
                        "line {}: skipped \"{}\" frame ({} lines)",
                        line_number,
                        line.trim(),
                        skipped
                    );
                },
            }
        }
    }

    /// Consumes lines up to the next frame marker, which is not consumed
    fn skip_frame(&mut self) -> Result<usize, Error> {
        let mut skipped = 0;
        loop {
            match self.scanner.peek_line()? {
                Some(line) if !line.starts_with('>') => {
                    self.scanner.next_line()?;
                    skipped += 1;
                },
                _ => return Ok(skipped),
            }
        }
    }
}

impl<R: BufRead> Iterator for NavDecoder<R> {
    type Item = Result<Ephemeris, Error>;
    /// Yields ephemerides, then the terminal error (if any) once
    fn next(&mut self) -> Option<Self::Item> {
        if self.next_ephemeris() {
            self.take_ephemeris().map(Ok)
        } else {
            self.err.take().map(Err)
        }
    }
}
