#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::type_complexity)]

//! Streaming RINEX decoder.
//!
//! Observation, Navigation, Meteo and Clock RINEX streams are decoded
//! one record at a time: the header is parsed when the decoder is built,
//! then each call to `next_*()` decodes the following record.
//! Memory usage does not depend on the stream length.
//!
//! ```no_run
//! use rinex_stream::prelude::*;
//!
//! let mut decoder = NavDecoder::from_file("AMEL00NLD_R_20210010000_01D_MN.rnx")
//!     .unwrap();
//! while decoder.next_ephemeris() {
//!     let eph = decoder.ephemeris().unwrap();
//!     println!("{} {}", eph.prn(), eph.toc());
//! }
//! if let Some(e) = decoder.err() {
//!     panic!("decoding error: {}", e);
//! }
//! ```
//!
//! Decoders trace their progress through the [log] facade: install
//! the logger of your choice to see them.

#[macro_use]
extern crate num_derive;

#[macro_use]
extern crate lazy_static;

pub mod clock;
pub mod constellation;
pub mod diff;
pub mod hardware;
pub mod hatanaka;
pub mod header;
pub mod marker;
pub mod meteo;
pub mod navigation;
pub mod observation;
pub mod prn;
pub mod production;
pub mod stats;
pub mod sync;
pub mod types;
pub mod version;

mod epoch;
mod error;
mod fields;
mod leap;
mod observable;
mod reader;
mod scanner;

#[cfg(test)]
mod tests;

pub use epoch::EpochFlag;
pub use error::{Error, FormattingError, ParsingError, ValidationError};
pub use leap::Leap;
pub use observable::Observable;
pub use reader::BufferedReader;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        clock::{ClockDecoder, ClockRecord},
        constellation::SatelliteSystem,
        diff::DiffReport,
        epoch::EpochFlag,
        error::{Error, FormattingError, ParsingError, ValidationError},
        header::Header,
        leap::Leap,
        meteo::{MeteoDecoder, MeteoRecord},
        navigation::{BroadcastOrbit, Ephemeris, NavDecoder},
        observable::Observable,
        observation::{ObsDecoder, ObsEpoch, SatObs},
        prn::PRN,
        production::ProductionAttributes,
        stats::{NavStats, ObsStats},
        sync::{SyncEpochs, Synchronizer},
        types::Type as RinexType,
        version::Version,
    };

    pub use crate::hardware::{Antenna, Receiver};
    pub use crate::marker::GeodeticMarker;

    // pub re-export
    pub use hifitime::{Duration, Epoch, TimeScale};
}

/// Formats one header line: content is padded to 60 columns,
/// followed by the label. Lengthy content wraps over several lines.
/// Wrapping counts characters, never splitting a multi-byte one.
pub(crate) fn fmt_rinex(content: &str, marker: &str) -> String {
    let chars = content.chars().collect::<Vec<_>>();
    if chars.len() < 60 {
        format!("{:<padding$}{}", content, marker, padding = 60)
    } else {
        chars
            .chunks(60)
            .map(|chunk| {
                let chunk = chunk.iter().collect::<String>();
                format!("{:<padding$}{}", chunk, marker, padding = 60)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Formats a comment
pub(crate) fn fmt_comment(content: &str) -> String {
    fmt_rinex(content, "COMMENT")
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn fmt_comments_singleline() {
        for desc in [
            "test",
            "just a basic comment",
            "just another lengthy comment blahblabblah",
        ] {
            let comment = fmt_comment(desc);
            assert_eq!(comment.len(), 67);
            assert_eq!(
                comment.find("COMMENT"),
                Some(60),
                "comment marker should located @ 60"
            );
            assert!(comment.starts_with(desc));
        }
    }
    #[test]
    fn fmt_wrapped_comments() {
        for desc in ["just trying to form a very lengthy comment that will overflow since it does not fit in a single line",
            "just trying to form a very very lengthy comment that will overflow since it does fit on three very meaningful lines. Imazdmazdpoakzdpoakzpdokpokddddddddddddddddddaaaaaaaaaaaaaaaaaaaaaaa"] {
            let nb_lines = desc.len().div_ceil(60);
            let comments = fmt_comment(desc);
            assert_eq!(comments.lines().count(), nb_lines);
            for line in comments.lines() {
                assert_eq!(line.find("COMMENT"), Some(60));
            }
        }
    }
    #[test]
    fn fmt_header_line() {
        let line = fmt_rinex("     3.04           OBSERVATION DATA    M", "RINEX VERSION / TYPE");
        assert_eq!(line.len(), 80);
        assert!(line.ends_with("RINEX VERSION / TYPE"));
    }
}
