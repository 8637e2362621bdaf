//! Header label vocabulary, one table per file type
use crate::{types::Type, version::Version};

/// Header labels this library knows of
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Label {
    EndOfHeader,
    Comment,
    ProgramRunByDate,
    LeapSeconds,
    Doi,
    License,
    StationInformation,
    MergedFile,
    MarkerName,
    MarkerNumber,
    MarkerType,
    ObserverAgency,
    Receiver,
    AntennaType,
    ApproxPosition,
    AntennaDeltaHEN,
    SysObsTypes,
    TypesOfObs,
    SignalStrengthUnit,
    Interval,
    TimeOfFirstObs,
    TimeOfLastObs,
    GlonassSlotFreq,
    RcvClockOffsApplied,
    NumSatellites,
    IonAlpha,
    IonBeta,
    DeltaUtc,
    CorrToSystemTime,
    IonosphericCorr,
    TimeSystemCorr,
    SensorModTypeAcc,
    SensorPosition,
    AnalysisCenter,
    TypesOfData,
    StationNameNum,
    StationClkRef,
    AnalysisClkRef,
    NumSolnStations,
    SolnStationNameNum,
    NumSolnSatellites,
    PrnList,
    TimeSystemId,
    /// Recognized, but not interpreted
    Ignored,
}

type LabelTable = &'static [(&'static str, Label)];

const COMMON_LABELS: LabelTable = &[
    ("END OF HEADER", Label::EndOfHeader),
    ("COMMENT", Label::Comment),
    ("PGM / RUN BY / DATE", Label::ProgramRunByDate),
    ("LEAP SECONDS", Label::LeapSeconds),
    ("DOI", Label::Doi),
    ("LICENSE OF USE", Label::License),
    ("STATION INFORMATION", Label::StationInformation),
];

const OBSERVATION_LABELS: LabelTable = &[
    ("MARKER NAME", Label::MarkerName),
    ("MARKER NUMBER", Label::MarkerNumber),
    ("MARKER TYPE", Label::MarkerType),
    ("OBSERVER / AGENCY", Label::ObserverAgency),
    ("REC # / TYPE / VERS", Label::Receiver),
    ("ANT # / TYPE", Label::AntennaType),
    ("APPROX POSITION XYZ", Label::ApproxPosition),
    ("ANTENNA: DELTA H/E/N", Label::AntennaDeltaHEN),
    ("SYS / # / OBS TYPES", Label::SysObsTypes),
    ("# / TYPES OF OBSERV", Label::TypesOfObs),
    ("SIGNAL STRENGTH UNIT", Label::SignalStrengthUnit),
    ("INTERVAL", Label::Interval),
    ("TIME OF FIRST OBS", Label::TimeOfFirstObs),
    ("TIME OF LAST OBS", Label::TimeOfLastObs),
    ("GLONASS SLOT / FRQ #", Label::GlonassSlotFreq),
    ("RCV CLOCK OFFS APPL", Label::RcvClockOffsApplied),
    ("# OF SATELLITES", Label::NumSatellites),
    ("WAVELENGTH FACT L1/2", Label::Ignored),
    ("SYS / PHASE SHIFT", Label::Ignored),
    ("SYS / PHASE SHIFTS", Label::Ignored),
    ("GLONASS COD/PHS/BIS", Label::Ignored),
    ("SYS / DCBS APPLIED", Label::Ignored),
    ("SYS / PCVS APPLIED", Label::Ignored),
    ("SYS / SCALE FACTOR", Label::Ignored),
    ("PRN / # OF OBS", Label::Ignored),
    ("ANTENNA: DELTA X/Y/Z", Label::Ignored),
    ("ANTENNA: PHASECENTER", Label::Ignored),
    ("ANTENNA: B.SIGHT XYZ", Label::Ignored),
    ("ANTENNA: ZERODIR AZI", Label::Ignored),
    ("ANTENNA: ZERODIR XYZ", Label::Ignored),
    ("CENTER OF MASS: XYZ", Label::Ignored),
];

const NAVIGATION_LABELS: LabelTable = &[
    ("ION ALPHA", Label::IonAlpha),
    ("ION BETA", Label::IonBeta),
    ("DELTA-UTC: A0,A1,T,W", Label::DeltaUtc),
    ("CORR TO SYSTEM TIME", Label::CorrToSystemTime),
    ("IONOSPHERIC CORR", Label::IonosphericCorr),
    ("TIME SYSTEM CORR", Label::TimeSystemCorr),
    ("MERGED FILE", Label::MergedFile),
];

/// RINEX-2 labels carry no correction kind: "ION ALPHA" and "ION BETA"
/// are stored the way RINEX-3 "IONOSPHERIC CORR" names them
pub(crate) const ION_ALPHA_KIND: &str = "GPSA";
pub(crate) const ION_BETA_KIND: &str = "GPSB";
/// "DELTA-UTC: A0,A1,T,W" is the GPS to UTC correction
pub(crate) const DELTA_UTC_KIND: &str = "GPUT";

const METEO_LABELS: LabelTable = &[
    ("MARKER NAME", Label::MarkerName),
    ("MARKER NUMBER", Label::MarkerNumber),
    ("# / TYPES OF OBSERV", Label::TypesOfObs),
    ("SENSOR MOD/TYPE/ACC", Label::SensorModTypeAcc),
    ("SENSOR POS XYZ/H", Label::SensorPosition),
];

const CLOCK_LABELS: LabelTable = &[
    ("ANALYSIS CENTER", Label::AnalysisCenter),
    ("# / TYPES OF DATA", Label::TypesOfData),
    ("STATION NAME / NUM", Label::StationNameNum),
    ("STATION CLK REF", Label::StationClkRef),
    ("ANALYSIS CLK REF", Label::AnalysisClkRef),
    ("# OF SOLN STA / TRF", Label::NumSolnStations),
    ("SOLN STA NAME / NUM", Label::SolnStationNameNum),
    ("# OF SOLN SATS", Label::NumSolnSatellites),
    ("PRN LIST", Label::PrnList),
    ("TIME SYSTEM ID", Label::TimeSystemId),
    ("LEAP SECONDS GNSS", Label::Ignored),
    ("SYS / # / OBS TYPES", Label::Ignored),
    ("SYS / DCBS APPLIED", Label::Ignored),
    ("SYS / PCVS APPLIED", Label::Ignored),
];

/// [HeaderConfig] drives the header decoder for one file type
#[derive(Debug, Copy, Clone)]
pub(crate) struct HeaderConfig {
    /// Width of the value field, the label follows
    pub value_width: usize,
    /// Header must terminate within that many lines
    pub max_lines: usize,
    labels: LabelTable,
}

impl HeaderConfig {
    pub fn new(rinex_type: Type, version: Version) -> Self {
        match rinex_type {
            Type::ObservationData => Self {
                value_width: 60,
                max_lines: 900,
                labels: OBSERVATION_LABELS,
            },
            Type::NavigationData => Self {
                value_width: 60,
                max_lines: 300,
                labels: NAVIGATION_LABELS,
            },
            Type::MeteoData => Self {
                value_width: 60,
                max_lines: 300,
                labels: METEO_LABELS,
            },
            Type::ClockData => Self {
                value_width: if version >= Version::new(3, 4) { 65 } else { 60 },
                max_lines: 900,
                labels: CLOCK_LABELS,
            },
        }
    }
    /// Identifies given (trimmed) label, by exact match
    pub fn label(&self, label: &str) -> Option<Label> {
        COMMON_LABELS
            .iter()
            .chain(self.labels.iter())
            .find(|(name, _)| *name == label)
            .map(|(_, label)| *label)
    }
}
