use thiserror::Error;

use crate::{constellation::SatelliteSystem, prn::PRN, types::Type as RinexType};

/// Errors that may rise in Parsing process
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("invalid rinex version \"{0}\"")]
    Version(String),
    #[error("unknown rinex type \"{0}\"")]
    RinexType(String),
    #[error("unknown satellite system \"{0}\"")]
    SatelliteSystem(String),
    #[error("invalid satellite identifier \"{0}\"")]
    PRN(String),
    #[error("satellite number {0} out of range")]
    PRNRange(u8),
    #[error("invalid float number \"{0}\"")]
    Float(String),
    #[error("invalid integer number \"{0}\"")]
    Integer(String),
    #[error("invalid datetime \"{0}\"")]
    Datetime(String),
    #[error("invalid epoch flag \"{0}\"")]
    EpochFlag(String),
    #[error("invalid number of satellites \"{0}\"")]
    NumSat(String),
    #[error("invalid epoch line")]
    EpochLine,
    #[error("record ends prematurely")]
    TruncatedRecord,
    #[error("no observation types defined for {0}")]
    MissingObsTypes(SatelliteSystem),
    #[error("{system}: {declared} observation types declared, {found} found")]
    ObsTypesCount {
        system: SatelliteSystem,
        declared: usize,
        found: usize,
    },
    #[error("invalid observable \"{0}\"")]
    Observable(String),
    #[error("invalid navigation frame \"{0}\"")]
    NavFrame(String),
    #[error("satellite system is not defined")]
    UndefinedSatelliteSystem,
    #[error("invalid record type \"{0}\"")]
    RecordType(String),
}

/// Errors that may rise while decoding a RINEX stream
#[derive(Error, Debug)]
pub enum Error {
    /// First line does not carry "RINEX VERSION / TYPE".
    /// This is not necessarily fatal: headerless streams
    /// may be decoded with a previously obtained [Header](crate::header::Header).
    #[error("no header")]
    NoHeader,
    #[error("header terminated without END OF HEADER")]
    MissingEndOfHeader,
    #[error("expecting {expected} data, got {found}")]
    UnexpectedType { expected: RinexType, found: RinexType },
    #[error("line {line}: {source}")]
    Parsing {
        line: usize,
        #[source]
        source: ParsingError,
    },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{program} exited with {status}")]
    Hatanaka { program: String, status: String },
    #[error("not a hatanaka filename: \"{0}\"")]
    HatanakaName(String),
}

impl Error {
    /// Returns true if this error is the "no header" condition.
    pub fn is_no_header(&self) -> bool {
        matches!(self, Self::NoHeader)
    }
    /// Returns the underlying [ParsingError], if any
    pub fn parsing_error(&self) -> Option<&ParsingError> {
        match self {
            Self::Parsing { source, .. } => Some(source),
            _ => None,
        }
    }
    pub(crate) fn at(line: usize, source: ParsingError) -> Self {
        Self::Parsing { line, source }
    }
}

/// Inconsistencies [Ephemeris::validate](crate::navigation::Ephemeris::validate) may find
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{prn} does not belong to {expected}")]
    SystemMismatch { prn: PRN, expected: SatelliteSystem },
    #[error("invalid eccentricity {0}")]
    Eccentricity(f64),
    #[error("invalid square root of semi major axis {0}")]
    SqrtSemiMajorAxis(f64),
    #[error("null position vector")]
    NullPosition,
}

/// Errors that may rise in Formatting process
#[derive(Error, Debug)]
pub enum FormattingError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("only Observation headers can be formatted")]
    NotObservation,
}
