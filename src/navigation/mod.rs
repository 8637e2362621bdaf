//! Navigation RINEX module
mod decoder;
mod ephemeris;
mod header;
mod message;
mod record;

pub use decoder::NavDecoder;
pub use ephemeris::{
    BeiDouOrbit, BroadcastOrbit, Ephemeris, GalileoOrbit, GlonassOrbit, GpsOrbit, KeplerOrbit,
    NavICOrbit, SbasOrbit,
};
pub use header::{HeaderFields, IonosphericCorrection, TimeSystemCorrection};
pub use message::{NavFrameType, NavMessageType};

pub(crate) use record::RecordLayout;
