use std::fmt::Display;

use serde::{Deserialize, Serialize};

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// MIDI pitch of a note. Middle C is 60.
#[derive(
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    Serialize,
    Deserialize,
)]
pub struct Pitch {
    midi: u8,
}
impl Pitch {
    pub fn from_midi(midi: u8) -> Self {
        Self { midi }
    }
    pub fn midi(&self) -> u8 {
        self.midi
    }
    /// Octave in scientific notation: 60 is in octave 4.
    fn octave(&self) -> i8 {
        (self.midi / 12) as i8 - 1
    }
}
impl From<u8> for Pitch {
    fn from(midi: u8) -> Self {
        Self::from_midi(midi)
    }
}
impl Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", NAMES[(self.midi % 12) as usize], self.octave())
    }
}

#[cfg(test)]
mod tests {
    use super::Pitch;

    #[test]
    fn pitch_names() {
        assert_eq!(Pitch::from_midi(60).to_string(), "C4");
        assert_eq!(Pitch::from_midi(61).to_string(), "C#4");
        assert_eq!(Pitch::from_midi(0).to_string(), "C-1");
        assert_eq!(Pitch::from_midi(69).to_string(), "A4");
    }

    #[test]
    fn ordered_by_midi() {
        assert!(Pitch::from_midi(59) < Pitch::from_midi(60));
        assert_eq!(Pitch::from(64).midi(), 64);
    }
}
