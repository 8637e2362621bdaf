//! Meteo record stream
use std::io::BufRead;
use std::path::Path;

use log::trace;

use crate::{
    error::{Error, ParsingError},
    header::Header,
    meteo::{parse_record, record_lines, MeteoObservable, MeteoRecord},
    reader::BufferedReader,
    scanner::LineScanner,
    types::Type,
};

/// [MeteoDecoder] decodes one [MeteoRecord] at a time
/// from a Meteo RINEX stream.
#[derive(Debug)]
pub struct MeteoDecoder<R: BufRead> {
    scanner: LineScanner<R>,
    header: Header,
    codes: Vec<MeteoObservable>,
    record: Option<MeteoRecord>,
    err: Option<Error>,
    done: bool,
}

impl MeteoDecoder<BufferedReader> {
    /// Opens a local Meteo RINEX file, possibly gzip compressed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufferedReader::new(path)?;
        Self::new(reader)
    }
}

impl<R: BufRead> MeteoDecoder<R> {
    /// Builds a [MeteoDecoder], the header is parsed right away
    pub fn new(reader: R) -> Result<Self, Error> {
        let mut scanner = LineScanner::new(reader);
        let header = Header::decode(&mut scanner)?;
        if header.rinex_type != Type::MeteoData {
            return Err(Error::UnexpectedType {
                expected: Type::MeteoData,
                found: header.rinex_type,
            });
        }
        let codes = header
            .meteo
            .as_ref()
            .map(|meteo| meteo.codes.clone())
            .unwrap_or_default();
        Ok(Self {
            scanner,
            header,
            codes,
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
                trace!("meteo record {}", record.time);
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

    fn decode(&mut self) -> Result<Option<MeteoRecord>, Error> {
        let first = loop {
            match self.scanner.next_line()? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Ok(None),
            }
        };
        let mut lines = Vec::with_capacity(2);
        lines.push(first);
        for _ in 1..record_lines(self.codes.len()) {
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
        parse_record(self.header.version, &self.codes, &lines)
            .map(Some)
            .map_err(|e| Error::at(self.scanner.line_number(), e))
    }

    /// Returns the last decoded record
    pub fn record(&self) -> Option<&MeteoRecord> {
        self.record.as_ref()
    }

    /// Takes ownership of the last decoded record
    pub fn take_record(&mut self) -> Option<MeteoRecord> {
        self.record.take()
    }

    /// Returns the error that terminated this stream, if any.
    /// Reaching the end of the stream is not an error.
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }
}

impl<R: BufRead> Iterator for MeteoDecoder<R> {
    type Item = Result<MeteoRecord, Error>;
    /// Yields records, then the terminal error (if any) once.
    /// The error is moved out: [MeteoDecoder::err] no longer reports it.
    fn next(&mut self) -> Option<Self::Item> {
        if self.next_record() {
            self.take_record().map(Ok)
        } else {
            self.err.take().map(Err)
        }
    }
}
