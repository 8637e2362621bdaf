//! File naming conventions.
//!
//! RINEX files produced by the IGS network follow two naming conventions:
//! the RINEX-2 short form `ssssdddf[mm].yyT` and the RINEX-3 long form
//! `SSSSMRCCC_S_YYYYDDDHHMM_PPP[_FFF]_TT.rnx`. Both describe the station,
//! the production time and the file content. [ProductionAttributes] parses
//! and builds them.
use regex::Regex;
use thiserror::Error;

use crate::{constellation::SatelliteSystem, types::Type as RinexType};

mod ffu;
mod ppu;
mod source;

pub use ffu::FFU;
pub use ppu::PPU;
pub use source::DataSource;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq)]
/// File Production errors
pub enum Error {
    #[error("filename does not follow naming conventions")]
    NonStandardFileName,
    #[error("invalid ffu format")]
    InvalidFFU,
}

lazy_static! {
    /// `ssssdddf[mm].yyT[.Z|.gz]`
    static ref SHORT_FILENAME: Regex =
        Regex::new(r"^([A-Z0-9]{4})(\d{3})([0A-X])(\d{2})?\.(\d{2})([A-Z])(\.Z|\.GZ)?$")
            .unwrap();
    /// `SSSSMRCCC_S_YYYYDDDHHMM_PPP[_FFF]_TT.rnx|crx[.gz]`
    static ref LONG_FILENAME: Regex = Regex::new(
        r"^([A-Z0-9]{4})(\d)(\d)([A-Z]{3})_([RSU])_(\d{4})(\d{3})(\d{2})(\d{2})_(\d{2}[A-Z])(?:_(\d{2}[A-Z]))?_([A-Z])([A-Z])\.(RNX|CRX)(\.GZ)?$"
    )
    .unwrap();
}

/// File production attributes, as described by standard filenames.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductionAttributes {
    /// Station name, 4 characters, which is usually the geodetic marker name
    pub name: String,
    /// Year of production
    pub year: u32,
    /// Production Day of Year (DOY), starting at 1
    pub doy: u32,
    /// Hour of day the file starts at
    pub hour: u8,
    /// Minute the file starts at
    pub minute: u8,
    /// File periodicity
    pub period: PPU,
    /// File content
    pub rinex_type: RinexType,
    /// Satellite system, when the name states one
    pub constellation: Option<SatelliteSystem>,
    /// Hatanaka compressed Observations
    pub hatanaka: bool,
    /// Gzip compressed
    pub gzip: bool,
    /// Detailed production attributes only exist in long filenames.
    pub details: Option<DetailedProductionAttributes>,
}

/// Attributes only long filenames describe
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetailedProductionAttributes {
    /// Monument or marker number
    pub monument: u8,
    /// Receiver number
    pub receiver: u8,
    /// Agency Country Code
    pub country: String,
    /// Data source
    pub data_src: DataSource,
    /// FFU gives information on Observation sampling rate.
    /// Navigation files do not have one.
    pub ffu: Option<FFU>,
}

impl Default for ProductionAttributes {
    fn default() -> Self {
        Self {
            name: "XXXX".to_string(),
            year: 2000,
            doy: 1,
            hour: 0,
            minute: 0,
            period: PPU::Daily,
            rinex_type: RinexType::ObservationData,
            constellation: None,
            hatanaka: false,
            gzip: false,
            details: None,
        }
    }
}

/// RINEX-2 two digit years
fn full_year(yy: u32) -> u32 {
    if yy < 80 {
        yy + 2000
    } else {
        yy + 1900
    }
}

fn parse_u32(s: &str) -> Result<u32, Error> {
    s.parse::<u32>().map_err(|_| Error::NonStandardFileName)
}

fn parse_u8(s: &str) -> Result<u8, Error> {
    s.parse::<u8>().map_err(|_| Error::NonStandardFileName)
}

/// Content letters of long filenames
fn long_type(c: char) -> Result<RinexType, Error> {
    match c {
        'O' => Ok(RinexType::ObservationData),
        'N' => Ok(RinexType::NavigationData),
        'M' => Ok(RinexType::MeteoData),
        'C' => Ok(RinexType::ClockData),
        _ => Err(Error::NonStandardFileName),
    }
}

impl ProductionAttributes {
    /// Builds new [ProductionAttributes] for a daily file
    pub fn new(name: &str, year: u32, doy: u32, rinex_type: RinexType) -> Self {
        Self {
            name: name.to_uppercase(),
            year,
            doy,
            rinex_type,
            ..Default::default()
        }
    }

    /// Copies and attaches [DetailedProductionAttributes],
    /// so the long filename may be generated
    pub fn with_details(&self, details: DetailedProductionAttributes) -> Self {
        let mut s = self.clone();
        s.details = Some(details);
        s
    }

    fn parse_short(fname: &str) -> Result<Self, Error> {
        let caps = SHORT_FILENAME
            .captures(fname)
            .ok_or(Error::NonStandardFileName)?;

        let session = caps[3].chars().next().ok_or(Error::NonStandardFileName)?;
        let minute = match caps.get(4) {
            Some(mm) => parse_u8(mm.as_str())?,
            None => 0,
        };
        let (hour, period) = match session {
            '0' => (0, PPU::Daily),
            c => {
                let hour = (c as u8) - b'A';
                if caps.get(4).is_some() {
                    (hour, PPU::QuarterHour)
                } else {
                    (hour, PPU::Hourly)
                }
            },
        };

        let letter = caps[6].chars().next().ok_or(Error::NonStandardFileName)?;
        let (rinex_type, constellation, hatanaka) = match letter {
            'D' => (RinexType::ObservationData, None, true),
            c => {
                let (rinex_type, constellation) =
                    RinexType::from_letter(c).map_err(|_| Error::NonStandardFileName)?;
                (rinex_type, constellation, false)
            },
        };

        Ok(Self {
            name: caps[1].to_string(),
            year: full_year(parse_u32(&caps[5])?),
            doy: parse_u32(&caps[2])?,
            hour,
            minute,
            period,
            rinex_type,
            constellation,
            hatanaka,
            gzip: caps.get(7).is_some(),
            details: None,
        })
    }

    fn parse_long(fname: &str) -> Result<Self, Error> {
        let caps = LONG_FILENAME
            .captures(fname)
            .ok_or(Error::NonStandardFileName)?;

        let system = caps[12].chars().next().ok_or(Error::NonStandardFileName)?;
        let content = caps[13].chars().next().ok_or(Error::NonStandardFileName)?;

        Ok(Self {
            name: caps[1].to_string(),
            year: parse_u32(&caps[6])?,
            doy: parse_u32(&caps[7])?,
            hour: parse_u8(&caps[8])?,
            minute: parse_u8(&caps[9])?,
            period: caps[10].parse::<PPU>()?,
            rinex_type: long_type(content)?,
            constellation: Some(
                SatelliteSystem::from_abbreviation(system)
                    .map_err(|_| Error::NonStandardFileName)?,
            ),
            hatanaka: &caps[14] == "CRX",
            gzip: caps.get(15).is_some(),
            details: Some(DetailedProductionAttributes {
                monument: parse_u8(&caps[2])?,
                receiver: parse_u8(&caps[3])?,
                country: caps[4].to_string(),
                data_src: caps[5].parse::<DataSource>()?,
                ffu: match caps.get(11) {
                    Some(ffu) => Some(ffu.as_str().parse::<FFU>()?),
                    None => None,
                },
            }),
        })
    }

    /// Generates the RINEX-2 short filename
    pub fn short_filename(&self) -> String {
        let session = match self.period {
            PPU::Hourly | PPU::QuarterHour => (b'a' + self.hour.min(23)) as char,
            _ => '0',
        };
        let minutes = if self.period == PPU::QuarterHour {
            format!("{:02}", self.minute)
        } else {
            String::new()
        };
        let letter = if self.hatanaka {
            'd'
        } else {
            match (self.rinex_type, self.constellation) {
                (RinexType::NavigationData, Some(SatelliteSystem::Glonass)) => 'g',
                (RinexType::NavigationData, Some(SatelliteSystem::SBAS)) => 'h',
                (RinexType::NavigationData, Some(SatelliteSystem::Galileo)) => 'e',
                (rinex_type, _) => rinex_type.letter().to_ascii_lowercase(),
            }
        };
        let mut fname = format!(
            "{}{:03}{}{}.{:02}{}",
            self.name.to_lowercase(),
            self.doy,
            session,
            minutes,
            self.year % 100,
            letter
        );
        if self.gzip {
            fname.push_str(".gz");
        }
        fname
    }

    /// Generates the RINEX-3 long filename, default details
    /// being used when none are attached.
    pub fn long_filename(&self) -> String {
        let details = self.details.clone().unwrap_or_default();
        let mut fname = format!(
            "{}{}{}{}_{}_{:04}{:03}{:02}{:02}_{}",
            self.name.to_uppercase(),
            details.monument,
            details.receiver,
            details.country,
            details.data_src.to_char(),
            self.year,
            self.doy,
            self.hour,
            self.minute,
            self.period,
        );
        if let Some(ffu) = details.ffu {
            fname.push_str(&format!("_{}", ffu));
        }
        let content = match self.rinex_type {
            RinexType::ObservationData => 'O',
            RinexType::NavigationData => 'N',
            RinexType::MeteoData => 'M',
            RinexType::ClockData => 'C',
        };
        fname.push_str(&format!(
            "_{}{}",
            self.constellation.unwrap_or(SatelliteSystem::Mixed).abbreviation(),
            content
        ));
        fname.push_str(if self.hatanaka { ".crx" } else { ".rnx" });
        if self.gzip {
            fname.push_str(".gz");
        }
        fname
    }

    /// Generates the filename: long when [DetailedProductionAttributes] are known
    pub fn filename(&self) -> String {
        if self.details.is_some() {
            self.long_filename()
        } else {
            self.short_filename()
        }
    }
}

impl std::str::FromStr for ProductionAttributes {
    type Err = Error;
    /// Parses either form. A leading directory is ignored.
    fn from_str(fname: &str) -> Result<Self, Self::Err> {
        let fname = fname.rsplit('/').next().unwrap_or(fname).to_uppercase();
        if fname.contains('_') {
            Self::parse_long(&fname)
        } else {
            Self::parse_short(&fname)
        }
    }
}

impl std::fmt::Display for ProductionAttributes {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.filename())
    }
}
