use hifitime::{Duration, Epoch, TimeScale};

use crate::error::ParsingError;

mod flag;
pub use flag::EpochFlag;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Old RINEX problem: YY is encoded on two digits
pub(crate) fn expand_year(y: i32) -> i32 {
    if y < 100 {
        if y < 80 {
            y + 2000
        } else {
            y + 1900
        }
    } else {
        y
    }
}

/// Parses "ss.sssssss" into integer seconds and nanoseconds,
/// without going through a float conversion.
pub(crate) fn parse_seconds(content: &str) -> Result<(u8, u32), ParsingError> {
    let content = content.trim();
    let err = || ParsingError::Datetime(content.to_string());
    let (secs, frac) = match content.split_once('.') {
        Some((secs, frac)) => (secs, frac),
        None => (content, ""),
    };
    let secs = if secs.is_empty() {
        0
    } else {
        secs.parse::<u8>().map_err(|_| err())?
    };
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(err());
    }
    let mut nanos = 0_u32;
    for (i, c) in frac.chars().take(9).enumerate() {
        nanos += (c as u32 - '0' as u32) * 10_u32.pow(8 - i as u32);
    }
    Ok((secs, nanos))
}

/// Builds an [Epoch] from calendar fields expressed in given [TimeScale]
pub(crate) fn from_gregorian(
    y: i32,
    m: u8,
    d: u8,
    hh: u8,
    mm: u8,
    ss: u8,
    ns: u32,
    ts: TimeScale,
) -> Result<Epoch, ParsingError> {
    Epoch::maybe_from_gregorian(y, m, d, hh, mm, ss, ns, ts).map_err(|_| {
        ParsingError::Datetime(format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}",
            y, m, d, hh, mm, ss, ns
        ))
    })
}

/// Parses "yyyy mm dd hh mm ss.sssssss" (or two digit years)
/// as a datetime expressed in given [TimeScale]
pub(crate) fn parse_in_timescale(content: &str, ts: TimeScale) -> Result<Epoch, ParsingError> {
    let items: Vec<&str> = content.split_ascii_whitespace().collect();
    if items.len() < 6 {
        return Err(ParsingError::Datetime(content.trim().to_string()));
    }
    let err = || ParsingError::Datetime(content.trim().to_string());
    let y = items[0].parse::<i32>().map_err(|_| err())?;
    let m = items[1].parse::<u8>().map_err(|_| err())?;
    let d = items[2].parse::<u8>().map_err(|_| err())?;
    let hh = items[3].parse::<u8>().map_err(|_| err())?;
    let mm = items[4].parse::<u8>().map_err(|_| err())?;
    let (ss, ns) = parse_seconds(items[5])?;
    from_gregorian(expand_year(y), m, d, hh, mm, ss, ns, ts)
}

/// Parses the creation date of "PGM / RUN BY / DATE", which comes in several flavors:
/// - `yyyymmdd hhmmss zone`, zone being optional
/// - `yyyy-mm-dd hh:mm[:ss]`
/// - RINEX-2 `dd-Mon-yy hh:mm[:ss]`
pub(crate) fn parse_datetime(content: &str) -> Result<Epoch, ParsingError> {
    let content = content.trim();
    let err = || ParsingError::Datetime(content.to_string());
    let mut items = content.split_ascii_whitespace();
    let date = items.next().ok_or_else(err)?;
    let time = items.next().unwrap_or("000000");
    let zone = items.next().unwrap_or("UTC");

    let ts = match zone {
        "GPS" => TimeScale::GPST,
        "GAL" => TimeScale::GST,
        "BDT" => TimeScale::BDT,
        "TAI" => TimeScale::TAI,
        // LCL and the likes cannot be resolved
        _ => TimeScale::UTC,
    };

    let (y, m, d) = if date.len() == 8 && date.chars().all(|c| c.is_ascii_digit()) {
        (
            date[0..4].parse::<i32>().map_err(|_| err())?,
            date[4..6].parse::<u8>().map_err(|_| err())?,
            date[6..8].parse::<u8>().map_err(|_| err())?,
        )
    } else {
        let parts: Vec<&str> = date.split('-').collect();
        if parts.len() != 3 {
            return Err(err());
        }
        if parts[0].len() == 4 {
            (
                parts[0].parse::<i32>().map_err(|_| err())?,
                parts[1].parse::<u8>().map_err(|_| err())?,
                parts[2].parse::<u8>().map_err(|_| err())?,
            )
        } else {
            let month = parts[1].to_uppercase();
            let m = MONTHS
                .iter()
                .position(|name| *name == month)
                .ok_or_else(err)? as u8
                + 1;
            let y = parts[2].parse::<i32>().map_err(|_| err())?;
            (
                expand_year(y),
                m,
                parts[0].parse::<u8>().map_err(|_| err())?,
            )
        }
    };

    let (hh, mm, ss) = if time.contains(':') {
        let parts: Vec<&str> = time.split(':').collect();
        let hh = parts.first().ok_or_else(err)?.parse::<u8>().map_err(|_| err())?;
        let mm = parts.get(1).ok_or_else(err)?.parse::<u8>().map_err(|_| err())?;
        let ss = match parts.get(2) {
            Some(ss) => ss.parse::<u8>().map_err(|_| err())?,
            None => 0,
        };
        (hh, mm, ss)
    } else if time.len() == 6 && time.chars().all(|c| c.is_ascii_digit()) {
        (
            time[0..2].parse::<u8>().map_err(|_| err())?,
            time[2..4].parse::<u8>().map_err(|_| err())?,
            time[4..6].parse::<u8>().map_err(|_| err())?,
        )
    } else {
        return Err(err());
    };

    from_gregorian(y, m, d, hh, mm, ss, 0, ts)
}

/// Decomposes an [Epoch] into calendar fields, expressed
/// in the [TimeScale] it is defined in.
pub(crate) fn decompose(e: Epoch) -> (i32, u8, u8, u8, u8, u8, u32) {
    match e.time_scale {
        TimeScale::UTC => e.to_gregorian_utc(),
        TimeScale::GPST | TimeScale::GST => {
            (e - Duration::from_seconds(19.0)).to_gregorian_tai()
        },
        TimeScale::BDT => (e - Duration::from_seconds(33.0)).to_gregorian_tai(),
        _ => e.to_gregorian_tai(),
    }
}

/// Identifies the [TimeScale] a RINEX time system code refers to
pub(crate) fn parse_time_system(code: &str) -> Option<TimeScale> {
    match code.trim() {
        "GPS" | "QZS" | "IRN" | "SBA" => Some(TimeScale::GPST),
        "GAL" => Some(TimeScale::GST),
        "BDT" | "BDS" => Some(TimeScale::BDT),
        "GLO" | "UTC" => Some(TimeScale::UTC),
        "TAI" => Some(TimeScale::TAI),
        _ => None,
    }
}

/// Returns the RINEX time system code for given [TimeScale]
pub(crate) fn time_system_code(ts: TimeScale) -> &'static str {
    match ts {
        TimeScale::GST => "GAL",
        TimeScale::BDT => "BDT",
        TimeScale::UTC => "GLO",
        TimeScale::TAI => "TAI",
        _ => "GPS",
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;
    use std::str::FromStr;

    #[rstest]
    #[case("0.0000000", 0, 0)]
    #[case("30.0000000", 30, 0)]
    #[case(" 5.1234567", 5, 123_456_700)]
    #[case("59.5", 59, 500_000_000)]
    #[case("12", 12, 0)]
    fn seconds(#[case] content: &str, #[case] secs: u8, #[case] nanos: u32) {
        assert_eq!(parse_seconds(content).unwrap(), (secs, nanos));
    }

    #[test]
    fn obs_v3_datetime() {
        let e = parse_in_timescale("2018 11 06 19 00  0.0000000", TimeScale::GPST).unwrap();
        assert_eq!(e.time_scale, TimeScale::GPST);
        assert_eq!(e, Epoch::from_str("2018-11-06T19:00:00 GPST").unwrap());
        assert_eq!(decompose(e), (2018, 11, 6, 19, 0, 0, 0));
    }

    #[test]
    fn two_digit_years() {
        let e = parse_in_timescale("20  6 17  2  0  0.0", TimeScale::GPST).unwrap();
        assert_eq!(e, Epoch::from_str("2020-06-17T02:00:00 GPST").unwrap());
        let e = parse_in_timescale("99 12 31 23 59 30.0", TimeScale::UTC).unwrap();
        assert_eq!(decompose(e), (1999, 12, 31, 23, 59, 30, 0));
    }

    #[test]
    fn decompositions() {
        for (desc, expected) in [
            ("2020-06-17T02:00:00 GPST", (2020, 6, 17, 2, 0, 0, 0)),
            ("2021-01-01T00:00:00 GST", (2021, 1, 1, 0, 0, 0, 0)),
            ("2022-03-04T05:06:07 BDT", (2022, 3, 4, 5, 6, 7, 0)),
            ("2019-05-06T00:15:00 UTC", (2019, 5, 6, 0, 15, 0, 0)),
        ] {
            let e = Epoch::from_str(desc).unwrap();
            assert_eq!(decompose(e), expected, "failed for {}", desc);
        }
    }

    #[test]
    fn invalid_datetime() {
        assert!(parse_in_timescale("2018 11 06 19 00", TimeScale::GPST).is_err());
        assert!(parse_in_timescale("2018 13 06 19 00  0.0", TimeScale::GPST).is_err());
        assert!(parse_in_timescale("2018 1a 06 19 00  0.0", TimeScale::GPST).is_err());
    }

    #[rstest]
    #[case("20181106 190000 UTC", "2018-11-06T19:00:00 UTC")]
    #[case("20181106 190000 LCL", "2018-11-06T19:00:00 UTC")]
    #[case("20181106 190000", "2018-11-06T19:00:00 UTC")]
    #[case("06-Nov-18 19:00", "2018-11-06T19:00:00 UTC")]
    #[case("6-NOV-18 19:00:12", "2018-11-06T19:00:12 UTC")]
    #[case("2018-11-06 19:00:00", "2018-11-06T19:00:00 UTC")]
    fn creation_dates(#[case] content: &str, #[case] expected: &str) {
        let e = parse_datetime(content).unwrap();
        assert_eq!(e, Epoch::from_str(expected).unwrap());
    }

    #[test]
    fn invalid_creation_dates() {
        for desc in ["", "yesterday", "06-Foo-18 19:00", "20181106 19h00"] {
            assert!(parse_datetime(desc).is_err(), "\"{}\" should not parse", desc);
        }
    }

    #[test]
    fn time_systems() {
        for code in ["GPS", "GAL", "BDT", "GLO", "TAI"] {
            let ts = parse_time_system(code).unwrap();
            assert_eq!(time_system_code(ts), code);
        }
        assert_eq!(parse_time_system("QZS"), Some(TimeScale::GPST));
        assert_eq!(parse_time_system("???"), None);
    }
}
