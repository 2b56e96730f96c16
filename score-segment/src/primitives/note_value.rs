//! Tools for turning durations in ticks into written note values.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Ticks;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum NoteValueError {
    #[error(
        "Duration {duration} can not be written with {ticks_per_crotchet} \
        ticks per crotchet"
    )]
    Unrepresentable {
        duration: Ticks,
        ticks_per_crotchet: Ticks,
    },
}
pub type NoteValueResult<T> = Result<T, NoteValueError>;

static MAX_DOTS: u8 = 2;

/// Written note types, from the shortest to the longest.
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
pub enum NoteType {
    HemiDemiSemiQuaver,
    DemiSemiQuaver,
    SemiQuaver,
    Quaver,
    Crotchet,
    Minim,
    Semibreve,
    Breve,
}
impl NoteType {
    pub const ALL: [NoteType; 8] = [
        Self::HemiDemiSemiQuaver,
        Self::DemiSemiQuaver,
        Self::SemiQuaver,
        Self::Quaver,
        Self::Crotchet,
        Self::Minim,
        Self::Semibreve,
        Self::Breve,
    ];

    /// Length without dots.
    ///
    /// `ticks_per_crotchet` is expected to be divisible by 16, otherwise
    /// the shortest types are truncated.
    pub fn duration(&self, ticks_per_crotchet: Ticks) -> Ticks {
        let crotchet = Self::Crotchet as u32;
        let this = *self as u32;
        if this >= crotchet {
            ticks_per_crotchet << (this - crotchet)
        } else {
            ticks_per_crotchet >> (crotchet - this)
        }
    }
}
impl Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::HemiDemiSemiQuaver => "hemidemisemiquaver",
            Self::DemiSemiQuaver => "demisemiquaver",
            Self::SemiQuaver => "semiquaver",
            Self::Quaver => "quaver",
            Self::Crotchet => "crotchet",
            Self::Minim => "minim",
            Self::Semibreve => "semibreve",
            Self::Breve => "breve",
        };
        write!(f, "{}", name)
    }
}

#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize,
)]
pub struct NoteValue {
    pub note_type: NoteType,
    pub dots: u8,
}
impl NoteValue {
    pub fn new(note_type: NoteType, dots: u8) -> Self {
        Self { note_type, dots }
    }

    /// Each dot adds a half of the previous addition.
    pub fn duration(&self, ticks_per_crotchet: Ticks) -> Ticks {
        let base = self.note_type.duration(ticks_per_crotchet);
        (0..=self.dots as u32)
            .map(|dot| base >> dot)
            .sum()
    }

    /// Find the single note value (with up to two dots) of exactly
    /// given duration.
    ///
    /// # Example
    /// ```
    /// # use score_segment::primitives::{NoteType, NoteValue};
    /// assert_eq!(
    ///     NoteValue::from_duration(144, 96).unwrap(),
    ///     NoteValue::new(NoteType::Crotchet, 1)
    /// );
    /// assert!(NoteValue::from_duration(100, 96).is_err());
    /// ```
    pub fn from_duration(
        duration: Ticks,
        ticks_per_crotchet: Ticks,
    ) -> NoteValueResult<Self> {
        NoteType::ALL
            .iter()
            .rev()
            .flat_map(|nt| (0..=MAX_DOTS).map(move |dots| Self::new(*nt, dots)))
            .find(|value| {
                duration > 0 && value.duration(ticks_per_crotchet) == duration
            })
            .ok_or(NoteValueError::Unrepresentable {
                duration,
                ticks_per_crotchet,
            })
    }
}
impl Display for NoteValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.dots {
            0 => write!(f, "{}", self.note_type),
            1 => write!(f, "dotted {}", self.note_type),
            n => write!(f, "{}-dotted {}", n, self.note_type),
        }
    }
}

/// Split duration into plain (undotted) note values, that can be tied
/// together to sound as the given duration.
///
/// # Returns
///
/// Note values, started from the longest, down to the shortest.
///
/// # Example
///
/// ```
/// # use score_segment::primitives::{split_duration, NoteType, NoteValue};
/// assert_eq!(
///     split_duration(13 * 24, 96).unwrap(),
///     vec![
///         NoteValue::new(NoteType::Minim, 0),
///         NoteValue::new(NoteType::Crotchet, 0),
///         NoteValue::new(NoteType::SemiQuaver, 0),
///     ]
/// );
/// ```
pub fn split_duration(
    duration: Ticks,
    ticks_per_crotchet: Ticks,
) -> NoteValueResult<Vec<NoteValue>> {
    let mut values = Vec::new();
    let mut rest = duration;
    for note_type in NoteType::ALL.iter().rev() {
        let length = note_type.duration(ticks_per_crotchet);
        if length == 0 {
            continue;
        }
        while rest >= length {
            values.push(NoteValue::new(*note_type, 0));
            rest -= length;
        }
    }
    match rest {
        0 => Ok(values),
        _ => Err(NoteValueError::Unrepresentable {
            duration,
            ticks_per_crotchet,
        }),
    }
}
