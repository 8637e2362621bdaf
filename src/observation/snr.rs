//! Signal strength indication
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Signal to noise ratio description, generally closely tied
/// to raw GNSS signal observations.
#[derive(Default, PartialOrd, Ord, PartialEq, Eq, Hash, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SNR {
    /// SNR ~= 0 dB/Hz, or unknown
    #[default]
    DbHz0,
    /// SNR < 12 dB/Hz
    DbHz12,
    /// 12 dB/Hz <= SNR < 17 dB/Hz
    DbHz12_17,
    /// 18 dB/Hz <= SNR < 23 dB/Hz
    DbHz18_23,
    /// 24 dB/Hz <= SNR < 29 dB/Hz
    DbHz24_29,
    /// 30 dB/Hz <= SNR < 35 dB/Hz
    DbHz30_35,
    /// 36 dB/Hz <= SNR < 41 dB/Hz
    DbHz36_41,
    /// 42 dB/Hz <= SNR < 47 dB/Hz
    DbHz42_47,
    /// 48 dB/Hz <= SNR < 53 dB/Hz
    DbHz48_53,
    /// SNR >= 54 dB/Hz
    DbHz54,
}

impl SNR {
    /// Interprets the SNR digit. Anything above 9 saturates.
    pub fn from_digit(digit: u8) -> Self {
        match digit {
            0 => Self::DbHz0,
            1 => Self::DbHz12,
            2 => Self::DbHz12_17,
            3 => Self::DbHz18_23,
            4 => Self::DbHz24_29,
            5 => Self::DbHz30_35,
            6 => Self::DbHz36_41,
            7 => Self::DbHz42_47,
            8 => Self::DbHz48_53,
            _ => Self::DbHz54,
        }
    }
    /// Returns the RINEX digit
    pub fn digit(&self) -> u8 {
        *self as u8
    }
    pub fn strong(&self) -> bool {
        *self >= Self::DbHz30_35
    }
    pub fn weak(&self) -> bool {
        *self < Self::DbHz30_35
    }
}

impl std::fmt::LowerHex for SNR {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.digit())
    }
}

impl std::fmt::LowerExp for SNR {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let descriptor = match self {
            Self::DbHz0 => "<< 12 dB",
            Self::DbHz12 => "< 12 dB",
            Self::DbHz12_17 => "[12, 17[ dB",
            Self::DbHz18_23 => "[18, 23[ dB",
            Self::DbHz24_29 => "[24, 29[ dB",
            Self::DbHz30_35 => "[30, 35[ dB",
            Self::DbHz36_41 => "[36, 41[ dB",
            Self::DbHz42_47 => "[42, 47[ dB",
            Self::DbHz48_53 => "[48, 53[ dB",
            Self::DbHz54 => "> 54 dB",
        };
        f.write_str(descriptor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn snr_digits() {
        for digit in 0..10 {
            assert_eq!(SNR::from_digit(digit).digit(), digit);
        }
        assert_eq!(SNR::from_digit(0), SNR::default());
        assert!(SNR::from_digit(7).strong());
        assert!(SNR::from_digit(4).weak());
        assert_eq!(format!("{:x}", SNR::DbHz42_47), "7");
        assert_eq!(format!("{:e}", SNR::DbHz54), "> 54 dB");
    }
}
