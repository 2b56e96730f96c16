use serde::{Deserialize, Serialize};

use crate::primitives::Ticks;

/// Rounds raw times to the nearest multiple of a unit.
///
/// Halves are rounded up. Unit of 0 or 1 leaves times untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantizer {
    unit: Ticks,
}
impl Quantizer {
    pub fn new(unit: Ticks) -> Self {
        Self { unit }
    }
    pub fn unit(&self) -> Ticks {
        self.unit
    }

    /// # Example
    /// ```
    /// # use score_segment::segment::quantizer::Quantizer;
    /// let q = Quantizer::new(12);
    /// assert_eq!(q.quantize(17), 12);
    /// assert_eq!(q.quantize(18), 24);
    /// assert_eq!(q.quantize(0), 0);
    /// ```
    pub fn quantize(&self, time: Ticks) -> Ticks {
        if self.unit <= 1 {
            return time;
        }
        let remainder = time % self.unit;
        let floor = time - remainder;
        match remainder >= self.unit - remainder {
            true => floor.saturating_add(self.unit),
            false => floor,
        }
    }
}
impl Default for Quantizer {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::Quantizer;

    #[test]
    fn quantize() {
        let q = Quantizer::new(12);
        assert_eq!(q.quantize(5), 0);
        assert_eq!(q.quantize(6), 12);
        assert_eq!(q.quantize(95), 96);
        assert_eq!(Quantizer::new(4).quantize(u64::MAX), u64::MAX);
        assert_eq!(Quantizer::new(0).quantize(7), 7);
        assert_eq!(Quantizer::default().quantize(7), 7);
    }
}
