use serde::{Deserialize, Serialize};

use crate::{primitives::Ticks, segment::quantizer::Quantizer};

/// Clock resolution and grouping grid of a segment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub ticks_per_crotchet: Ticks,
    /// Grid used by quantized chord grouping.
    pub quantize_unit: Ticks,
}
impl Settings {
    pub fn new(ticks_per_crotchet: Ticks, quantize_unit: Ticks) -> Self {
        Self {
            ticks_per_crotchet,
            quantize_unit,
        }
    }
    pub fn with_ticks_per_crotchet(mut self, ticks: Ticks) -> Self {
        self.ticks_per_crotchet = ticks;
        self
    }
    pub fn with_quantize_unit(mut self, unit: Ticks) -> Self {
        self.quantize_unit = unit;
        self
    }
    pub fn quantizer(&self) -> Quantizer {
        Quantizer::new(self.quantize_unit)
    }
}
impl Default for Settings {
    /// Crotchet of 96 ticks, quantized to demisemiquavers.
    fn default() -> Self {
        Self::new(96, 12)
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;

    #[test]
    fn settings() {
        let settings = Settings::default();
        assert_eq!(settings.ticks_per_crotchet, 96);
        assert_eq!(settings.quantizer().unit(), 12);
        let settings = settings.with_quantize_unit(24).with_ticks_per_crotchet(960);
        assert_eq!(settings, Settings::new(960, 24));
    }
}
