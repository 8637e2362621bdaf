//! Epoch synchronization of two Observation streams
use std::io::BufRead;

use log::trace;

use crate::{
    error::Error,
    observation::{ObsDecoder, ObsEpoch},
};

/// Two epochs sharing the same timestamp, one per stream
#[derive(Debug, Clone, PartialEq)]
pub struct SyncEpochs {
    /// Epoch of the first stream
    pub a: ObsEpoch,
    /// Epoch of the second stream
    pub b: ObsEpoch,
}

/// [Synchronizer] walks two [ObsDecoder]s side by side and exposes
/// the epochs both streams share. Streams must be in chronological order:
/// this is a two pointer merge join. Event epochs (flags 2 to 5) do not take part.
/// ```no_run
/// use rinex_stream::prelude::*;
/// let a = ObsDecoder::from_file("ESBC00DNK_R_20201770000_01D_30S_MO.rnx").unwrap();
/// let b = ObsDecoder::from_file("MOJN00DNK_R_20201770000_01D_30S_MO.rnx").unwrap();
/// let mut sync = Synchronizer::new(a, b);
/// while sync.sync() {
///     let epochs = sync.epochs().unwrap();
///     assert_eq!(epochs.a.time, epochs.b.time);
/// }
/// assert!(sync.err().is_none());
/// ```
#[derive(Debug)]
pub struct Synchronizer<A: BufRead, B: BufRead> {
    a: ObsDecoder<A>,
    b: ObsDecoder<B>,
    epochs: Option<SyncEpochs>,
    err: Option<Error>,
    done: bool,
}

/// Next epoch that carries observations
fn next_data_epoch<R: BufRead>(decoder: &mut ObsDecoder<R>) -> Result<Option<ObsEpoch>, Error> {
    for item in decoder.by_ref() {
        let epoch = item?;
        if !epoch.is_event() {
            return Ok(Some(epoch));
        }
        trace!("{} ({}): not synchronized", epoch.time, epoch.flag);
    }
    Ok(None)
}

impl<A: BufRead, B: BufRead> Synchronizer<A, B> {
    pub fn new(a: ObsDecoder<A>, b: ObsDecoder<B>) -> Self {
        Self {
            a,
            b,
            epochs: None,
            err: None,
            done: false,
        }
    }

    /// Returns both decoders, to access their headers
    pub fn decoders(&self) -> (&ObsDecoder<A>, &ObsDecoder<B>) {
        (&self.a, &self.b)
    }

    /// Advances to the next pair of epochs sharing the same timestamp.
    /// Returns false once either stream is exhausted, or on the first error.
    pub fn sync(&mut self) -> bool {
        if self.done {
            return false;
        }
        match self.merge() {
            Ok(Some(epochs)) => {
                self.epochs = Some(epochs);
                true
            },
            Ok(None) => {
                self.epochs = None;
                self.done = true;
                false
            },
            Err(e) => {
                self.epochs = None;
                self.err = Some(e);
                self.done = true;
                false
            },
        }
    }

    fn merge(&mut self) -> Result<Option<SyncEpochs>, Error> {
        let mut a = match next_data_epoch(&mut self.a)? {
            Some(a) => a,
            None => return Ok(None),
        };
        let mut b = match next_data_epoch(&mut self.b)? {
            Some(b) => b,
            None => return Ok(None),
        };
        loop {
            if a.time < b.time {
                trace!("{}: only in first stream", a.time);
                a = match next_data_epoch(&mut self.a)? {
                    Some(a) => a,
                    None => return Ok(None),
                };
            } else if b.time < a.time {
                trace!("{}: only in second stream", b.time);
                b = match next_data_epoch(&mut self.b)? {
                    Some(b) => b,
                    None => return Ok(None),
                };
            } else {
                return Ok(Some(SyncEpochs { a, b }));
            }
        }
    }

    /// Returns the current pair of epochs
    pub fn epochs(&self) -> Option<&SyncEpochs> {
        self.epochs.as_ref()
    }

    /// Returns the error that terminated synchronization, if any
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// Takes ownership of the error that terminated synchronization
    pub fn take_err(&mut self) -> Option<Error> {
        self.err.take()
    }
}

impl<A: BufRead, B: BufRead> Iterator for Synchronizer<A, B> {
    type Item = SyncEpochs;
    /// Yields epoch pairs. Errors are not yielded: check [Synchronizer::err] afterwards.
    fn next(&mut self) -> Option<Self::Item> {
        if self.sync() {
            self.epochs.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hifitime::Epoch;
    use std::io::Cursor;
    use std::str::FromStr;

    const HEADER: &str = "     3.04           OBSERVATION DATA    G                   RINEX VERSION / TYPE
G    1 C1C                                                  SYS / # / OBS TYPES
                                                            END OF HEADER
";

    fn stream(seconds: &[u32]) -> String {
        let mut content = HEADER.to_string();
        for s in seconds {
            content.push_str(&format!(
                "> 2021 01 01 00 {:02} {:02}.0000000  0  1\nG01  20243517.560\n",
                s / 60,
                s % 60
            ));
        }
        content
    }

    fn decoder(content: String) -> ObsDecoder<Cursor<String>> {
        ObsDecoder::new(Cursor::new(content)).unwrap()
    }

    fn t(seconds: u32) -> Epoch {
        Epoch::from_str(&format!(
            "2021-01-01T00:{:02}:{:02} GPST",
            seconds / 60,
            seconds % 60
        ))
        .unwrap()
    }

    #[test]
    fn identical_streams() {
        let times = [0, 30, 60, 90];
        let sync = Synchronizer::new(decoder(stream(&times)), decoder(stream(&times)));
        let pairs = sync.collect::<Vec<_>>();
        assert_eq!(pairs.len(), 4);
        for (pair, s) in pairs.iter().zip(times.iter()) {
            assert_eq!(pair.a.time, t(*s));
            assert_eq!(pair.b.time, t(*s));
        }
    }

    #[test]
    fn late_start() {
        let sync = Synchronizer::new(
            decoder(stream(&[0, 30, 60, 90, 120])),
            decoder(stream(&[60, 90, 150])),
        );
        let times = sync.map(|pair| pair.a.time).collect::<Vec<_>>();
        assert_eq!(times, vec![t(60), t(90)]);
    }

    #[test]
    fn events_are_skipped() {
        let mut a = stream(&[0]);
        a.push_str("> 2021 01 01 00 00 30.0000000  5  0\n");
        a.push_str(&stream(&[30])[HEADER.len()..]);
        let mut sync = Synchronizer::new(decoder(a), decoder(stream(&[0, 30])));
        assert!(sync.sync());
        assert!(sync.sync());
        let epochs = sync.epochs().unwrap();
        assert_eq!(epochs.a.time, t(30));
        assert!(!epochs.a.is_event());
        assert!(!sync.sync());
        assert!(sync.err().is_none());
    }

    #[test]
    fn decoding_error() {
        let mut a = stream(&[0]);
        a.push_str("> 2021 01 01 00 00 30.0000000  0 xx\n");
        let mut sync = Synchronizer::new(decoder(a), decoder(stream(&[0, 30])));
        assert!(sync.sync());
        assert!(!sync.sync());
        assert!(sync.err().is_some());
        assert!(sync.epochs().is_none());
    }
}
