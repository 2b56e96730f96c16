use std::fmt::Display;

use fraction::Fraction;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TupletError {
    #[error("Tuplet ratio can not contain zero: {written}:{sounding}")]
    ZeroRatio { written: u32, sounding: u32 },
}
pub type TupletResult<T> = Result<T, TupletError>;

/// Identifies a tuplet bracket held by the bracket provider.
#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize,
)]
pub struct TupletId(pub u32);

/// How many written units are played in the time of how many sounding
/// units. A triplet is `3:2`.
#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize,
)]
pub struct TupletRatio {
    written: u32,
    sounding: u32,
}
impl TupletRatio {
    pub fn new(written: u32, sounding: u32) -> TupletResult<Self> {
        if written == 0 || sounding == 0 {
            return Err(TupletError::ZeroRatio { written, sounding });
        }
        Ok(Self { written, sounding })
    }
    pub fn triplet() -> Self {
        Self {
            written: 3,
            sounding: 2,
        }
    }
    pub fn written(&self) -> u32 {
        self.written
    }
    pub fn sounding(&self) -> u32 {
        self.sounding
    }
    /// Multiplier from written to sounding length.
    pub fn as_fraction(&self) -> Fraction {
        Fraction::new(self.sounding as u64, self.written as u64)
    }
}
impl Display for TupletRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.written, self.sounding)
    }
}

/// Marks an element as lying under a tuplet bracket.
#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize,
)]
pub struct TupletMembership {
    pub bracket: TupletId,
    pub ratio: TupletRatio,
}
impl TupletMembership {
    pub fn new(bracket: TupletId, ratio: TupletRatio) -> Self {
        Self { bracket, ratio }
    }
}

#[cfg(test)]
mod tests {
    use fraction::Fraction;

    use super::{TupletError, TupletRatio};

    #[test]
    fn ratio() {
        let triplet = TupletRatio::new(3, 2).unwrap();
        assert_eq!(triplet, TupletRatio::triplet());
        assert_eq!(triplet.as_fraction(), Fraction::new(2_u64, 3_u64));
        assert_eq!(triplet.to_string(), "3:2");
        assert_eq!(
            TupletRatio::new(0, 2),
            Err(TupletError::ZeroRatio {
                written: 0,
                sounding: 2
            })
        );
    }
}
