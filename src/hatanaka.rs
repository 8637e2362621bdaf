//! Hatanaka compressed Observations.
//!
//! Compact RINEX (CRINEX) files are not decoded in process: they are
//! converted by the `CRX2RNX` / `RNX2CRX` executables, which are run
//! as external programs. Converted files are written next to their input,
//! named after it following the usual conventions.
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::Error;

/// Replaces the last `n` characters of `name`
fn with_suffix(name: &str, n: usize, suffix: &str) -> String {
    format!("{}{}", &name[..name.len() - n], suffix)
}

/// Two digit year followed by the type letter, as in `.21d`
fn short_extension(name: &str, letter: char) -> bool {
    let bytes = name.as_bytes();
    let len = bytes.len();
    len > 4
        && bytes[len - 4] == b'.'
        && bytes[len - 3].is_ascii_digit()
        && bytes[len - 2].is_ascii_digit()
        && bytes[len - 1].to_ascii_lowercase() == letter as u8
}

/// Returns the name of the file `CRX2RNX` produces from `name`:
/// `.crx` becomes `.rnx` and `yyd` becomes `yyo`. Case is preserved.
pub fn decompressed_name(name: &str) -> Result<String, Error> {
    if name.ends_with(".crx") {
        Ok(with_suffix(name, 3, "rnx"))
    } else if name.ends_with(".CRX") {
        Ok(with_suffix(name, 3, "RNX"))
    } else if short_extension(name, 'd') {
        let upper = name.ends_with('D');
        Ok(with_suffix(name, 1, if upper { "O" } else { "o" }))
    } else {
        Err(Error::HatanakaName(name.to_string()))
    }
}

/// Returns the name of the file `RNX2CRX` produces from `name`:
/// `.rnx` becomes `.crx` and `yyo` becomes `yyd`. Case is preserved.
pub fn compressed_name(name: &str) -> Result<String, Error> {
    if name.ends_with(".rnx") {
        Ok(with_suffix(name, 3, "crx"))
    } else if name.ends_with(".RNX") {
        Ok(with_suffix(name, 3, "CRX"))
    } else if short_extension(name, 'o') {
        let upper = name.ends_with('O');
        Ok(with_suffix(name, 1, if upper { "D" } else { "d" }))
    } else {
        Err(Error::HatanakaName(name.to_string()))
    }
}

/// [Hatanaka] runs the external compression tools.
/// ```no_run
/// use rinex_stream::hatanaka::Hatanaka;
/// let hatanaka = Hatanaka::default()
///     .with_crx2rnx("/opt/rnxcmp/bin/CRX2RNX");
/// let rnx = hatanaka.decompress("MOJN00DNK_R_20201770000_01D_30S_MO.crx")
///     .unwrap();
/// assert!(rnx.ends_with("MOJN00DNK_R_20201770000_01D_30S_MO.rnx"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Hatanaka {
    crx2rnx: PathBuf,
    rnx2crx: PathBuf,
}

impl Default for Hatanaka {
    /// Both programs are looked up in `$PATH`
    fn default() -> Self {
        Self {
            crx2rnx: PathBuf::from("CRX2RNX"),
            rnx2crx: PathBuf::from("RNX2CRX"),
        }
    }
}

impl Hatanaka {
    /// Copies and returns [Hatanaka] with given `CRX2RNX` location
    pub fn with_crx2rnx<P: AsRef<Path>>(&self, path: P) -> Self {
        let mut s = self.clone();
        s.crx2rnx = path.as_ref().to_path_buf();
        s
    }
    /// Copies and returns [Hatanaka] with given `RNX2CRX` location
    pub fn with_rnx2crx<P: AsRef<Path>>(&self, path: P) -> Self {
        let mut s = self.clone();
        s.rnx2crx = path.as_ref().to_path_buf();
        s
    }

    /// Decompresses the CRINEX file at `path`, returns the path
    /// of the RINEX file that was generated.
    pub fn decompress<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf, Error> {
        let path = path.as_ref();
        let output = output_path(path, decompressed_name)?;
        run(&self.crx2rnx, path)?;
        Ok(output)
    }

    /// Compresses the RINEX Observation file at `path`, returns the path
    /// of the CRINEX file that was generated.
    pub fn compress<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf, Error> {
        let path = path.as_ref();
        let output = output_path(path, compressed_name)?;
        run(&self.rnx2crx, path)?;
        Ok(output)
    }
}

fn output_path(
    path: &Path,
    rename: fn(&str) -> Result<String, Error>,
) -> Result<PathBuf, Error> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::HatanakaName(path.to_string_lossy().to_string()))?;
    Ok(path.with_file_name(rename(name)?))
}

/// Runs `program` on `input`, overwriting any previous output
fn run(program: &Path, input: &Path) -> Result<(), Error> {
    debug!("{} {} -f", program.display(), input.display());
    let status = Command::new(program).arg(input).arg("-f").status()?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::Hatanaka {
            program: program.display().to_string(),
            status: status.to_string(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ACOR00ESP_R_20213550000_01D_30S_MO.crx", "ACOR00ESP_R_20213550000_01D_30S_MO.rnx")]
    #[case("ACOR00ESP_R_20213550000_01D_30S_MO.CRX", "ACOR00ESP_R_20213550000_01D_30S_MO.RNX")]
    #[case("AJAC3550.21D", "AJAC3550.21O")]
    #[case("barq071q.19d", "barq071q.19o")]
    fn names(#[case] compressed: &str, #[case] plain: &str) {
        assert_eq!(decompressed_name(compressed).unwrap(), plain);
        assert_eq!(compressed_name(plain).unwrap(), compressed);
    }

    #[test]
    fn invalid_names() {
        for name in ["AJAC3550.21N", "test.txt", "d", "MOJN00DNK_R_20201770000_01D_30S_MO.crx.gz"] {
            assert!(decompressed_name(name).is_err(), "\"{}\"", name);
        }
        assert!(matches!(
            compressed_name("AJAC3550.21D"),
            Err(Error::HatanakaName(_))
        ));
    }

    #[test]
    fn output_paths() {
        let path = Path::new("/data/ESBC00DNK_R_20201770000_01D_30S_MO.crx");
        assert_eq!(
            output_path(path, decompressed_name).unwrap(),
            PathBuf::from("/data/ESBC00DNK_R_20201770000_01D_30S_MO.rnx")
        );
    }

    #[test]
    fn missing_executable() {
        let hatanaka = Hatanaka::default().with_crx2rnx("/nonexistent/CRX2RNX");
        match hatanaka.decompress("AJAC3550.21D") {
            Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected {:?}", other),
        }
    }
}
