//! Generic Buffered Reader
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

/// [BufferedReader] opens local files, transparently decompressing
/// gzip files (".gz" extension) when the `flate2` feature is enabled.
/// Hatanaka compressed files must be expanded with [crate::hatanaka::Hatanaka] first.
#[derive(Debug)]
pub enum BufferedReader {
    /// Readable `RINEX`
    PlainFile(BufReader<File>),
    /// gzip compressed RINEX
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    GzFile(BufReader<GzDecoder<File>>),
}

impl BufferedReader {
    pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<BufferedReader> {
        let path = path.as_ref();
        let f = File::open(path)?;
        let gzip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);
        if gzip {
            #[cfg(feature = "flate2")]
            {
                Ok(Self::GzFile(BufReader::new(GzDecoder::new(f))))
            }
            #[cfg(not(feature = "flate2"))]
            {
                Err(std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    "gzip compressed data requires the flate2 feature",
                ))
            }
        } else {
            Ok(Self::PlainFile(BufReader::new(f)))
        }
    }
}

impl Read for BufferedReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::PlainFile(h) => h.read(buf),
            #[cfg(feature = "flate2")]
            Self::GzFile(h) => h.read(buf),
        }
    }
}

impl std::io::BufRead for BufferedReader {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        match self {
            Self::PlainFile(h) => h.fill_buf(),
            #[cfg(feature = "flate2")]
            Self::GzFile(h) => h.fill_buf(),
        }
    }
    fn consume(&mut self, s: usize) {
        match self {
            Self::PlainFile(h) => h.consume(s),
            #[cfg(feature = "flate2")]
            Self::GzFile(h) => h.consume(s),
        }
    }
}
