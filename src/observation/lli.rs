//! Lost of Lock Indication (LLI) for phase tracking
use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct LliFlags: u8 {
        /// Lock lost between previous observation and current observation,
        /// cycle slip is possible. Also raised on every measurement
        /// of an epoch that follows a power failure.
        const LOCK_LOSS = 0x01;
        /// Half cycle slip marker
        const HALF_CYCLE_SLIP = 0x02;
        /// Observing under anti spoofing,
        /// might suffer from decreased SNR - decreased signal quality
        const UNDER_ANTI_SPOOFING = 0x04;
    }
}

impl Default for LliFlags {
    /// Ok or unknown status
    fn default() -> Self {
        Self::empty()
    }
}

impl LliFlags {
    /// Interprets the LLI digit. Unknown bits are dropped.
    pub fn from_digit(digit: u8) -> Self {
        Self::from_bits_truncate(digit)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn lli_digits() {
        assert_eq!(LliFlags::from_digit(0), LliFlags::default());
        assert!(LliFlags::from_digit(1).contains(LliFlags::LOCK_LOSS));
        let lli = LliFlags::from_digit(5);
        assert!(lli.contains(LliFlags::LOCK_LOSS));
        assert!(lli.contains(LliFlags::UNDER_ANTI_SPOOFING));
        assert!(!lli.contains(LliFlags::HALF_CYCLE_SLIP));
        assert_eq!(LliFlags::from_digit(9).bits(), 1);
    }
}
