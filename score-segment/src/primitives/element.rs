//! A smallest piece of music, that is held by a segment.
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{NoteValue, NoteValueResult, Pitch, Properties, TupletMembership};

/// Canonical discrete clock of the segment.
pub type Ticks = u64;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseKindError {
    #[error("Element kind can not be empty")]
    Empty,
}

/// Type tag of an element.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub enum ElementKind {
    Note,
    Rest,
    Clef,
    Key,
    TimeSignature,
    Text,
    Other(String),
}
impl ElementKind {
    /// Secondary order among elements starting at the same time.
    ///
    /// Clefs and keys come before the notes they affect.
    pub fn default_sub_ordering(&self) -> i32 {
        match self {
            Self::Clef => -5,
            Self::Key => -4,
            Self::TimeSignature => -3,
            Self::Text => -1,
            Self::Note | Self::Rest | Self::Other(_) => 0,
        }
    }
}
impl Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Note => write!(f, "note"),
            Self::Rest => write!(f, "rest"),
            Self::Clef => write!(f, "clef"),
            Self::Key => write!(f, "key"),
            Self::TimeSignature => write!(f, "timesignature"),
            Self::Text => write!(f, "text"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}
impl FromStr for ElementKind {
    type Err = ParseKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(ParseKindError::Empty),
            "note" => Ok(Self::Note),
            "rest" => Ok(Self::Rest),
            "clef" => Ok(Self::Clef),
            "key" => Ok(Self::Key),
            "timesignature" => Ok(Self::TimeSignature),
            "text" => Ok(Self::Text),
            x => Ok(Self::Other(x.to_string())),
        }
    }
}

/// `forward` starts a tie to the next note of the same pitch,
/// `backward` continues a tie from the previous one.
#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize,
)]
pub struct TieFlags {
    pub forward: bool,
    pub backward: bool,
}
impl TieFlags {
    pub fn start() -> Self {
        Self {
            forward: true,
            backward: false,
        }
    }
    pub fn continuation() -> Self {
        Self {
            forward: false,
            backward: true,
        }
    }
    /// Middle of a chain: tied from the previous and to the next note.
    pub fn both() -> Self {
        Self {
            forward: true,
            backward: true,
        }
    }
}

/// Role of a note in a tie chain.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TieRole {
    NotTied,
    TieStart,
    TieContinuation,
}

/// Position of an element in the total order of a segment.
///
/// Compared by absolute time first, then by sub-ordering.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct OrderKey {
    pub absolute_time: Ticks,
    pub sub_ordering: i32,
}

/// Single timed event of a segment: note, rest, clef etc.
///
/// Pitch and ties have a meaning only for notes. Algorithms of the crate
/// ignore them on every other kind.
#[derive(Debug, PartialEq, Clone)]
pub struct Element {
    absolute_time: Ticks,
    sub_ordering: i32,
    duration: Ticks,
    kind: ElementKind,
    pitch: Option<Pitch>,
    ties: TieFlags,
    tuplet: Option<TupletMembership>,
    properties: Properties,
    layout_x: f64,
    layout_y: f64,
}
impl Element {
    pub fn new(kind: ElementKind, absolute_time: Ticks, duration: Ticks) -> Self {
        Self {
            absolute_time,
            sub_ordering: kind.default_sub_ordering(),
            duration,
            kind,
            pitch: None,
            ties: TieFlags::default(),
            tuplet: None,
            properties: Properties::new(),
            layout_x: 0.0,
            layout_y: 0.0,
        }
    }
    pub fn note(absolute_time: Ticks, duration: Ticks, pitch: Pitch) -> Self {
        let mut note = Self::new(ElementKind::Note, absolute_time, duration);
        note.pitch = Some(pitch);
        note
    }
    pub fn rest(absolute_time: Ticks, duration: Ticks) -> Self {
        Self::new(ElementKind::Rest, absolute_time, duration)
    }

    pub fn with_ties(mut self, ties: TieFlags) -> Self {
        self.ties = ties;
        self
    }
    pub fn with_tuplet(mut self, tuplet: TupletMembership) -> Self {
        self.tuplet = Some(tuplet);
        self
    }
    pub fn with_sub_ordering(mut self, sub_ordering: i32) -> Self {
        self.sub_ordering = sub_ordering;
        self
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }
    pub fn is_note(&self) -> bool {
        self.kind == ElementKind::Note
    }
    pub fn is_rest(&self) -> bool {
        self.kind == ElementKind::Rest
    }
    pub fn absolute_time(&self) -> Ticks {
        self.absolute_time
    }
    pub fn sub_ordering(&self) -> i32 {
        self.sub_ordering
    }
    pub fn order_key(&self) -> OrderKey {
        OrderKey {
            absolute_time: self.absolute_time,
            sub_ordering: self.sub_ordering,
        }
    }
    pub fn duration(&self) -> Ticks {
        self.duration
    }
    pub fn end_time(&self) -> Ticks {
        self.absolute_time.saturating_add(self.duration)
    }
    pub fn pitch(&self) -> Option<Pitch> {
        self.pitch
    }
    pub fn ties(&self) -> TieFlags {
        self.ties
    }
    pub fn tuplet(&self) -> Option<TupletMembership> {
        self.tuplet
    }
    pub fn properties(&self) -> &Properties {
        &self.properties
    }
    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }
    pub fn layout_x(&self) -> f64 {
        self.layout_x
    }
    pub fn layout_y(&self) -> f64 {
        self.layout_y
    }

    /// Decide role of the element in a tie chain.
    ///
    /// A note tied both ways is a continuation: its sound was already
    /// started by an earlier note.
    pub fn tie_role(&self) -> TieRole {
        if !self.is_note() {
            return TieRole::NotTied;
        }
        match (self.ties.forward, self.ties.backward) {
            (_, true) => TieRole::TieContinuation,
            (true, false) => TieRole::TieStart,
            (false, false) => TieRole::NotTied,
        }
    }

    /// Written note value of the nominal duration.
    pub fn note_value(&self, ticks_per_crotchet: Ticks) -> NoteValueResult<NoteValue> {
        NoteValue::from_duration(self.duration, ticks_per_crotchet)
    }

    // Changing time or sub-ordering of an element, that is already in
    // a segment, is safe only through `ElementList::update`.
    pub fn set_absolute_time(&mut self, absolute_time: Ticks) -> &mut Self {
        self.absolute_time = absolute_time;
        self
    }
    pub fn set_sub_ordering(&mut self, sub_ordering: i32) -> &mut Self {
        self.sub_ordering = sub_ordering;
        self
    }
    pub fn set_duration(&mut self, duration: Ticks) -> &mut Self {
        self.duration = duration;
        self
    }
    pub fn set_note_value(
        &mut self,
        value: NoteValue,
        ticks_per_crotchet: Ticks,
    ) -> &mut Self {
        self.duration = value.duration(ticks_per_crotchet);
        self
    }
    pub fn set_pitch(&mut self, pitch: Option<Pitch>) -> &mut Self {
        self.pitch = pitch;
        self
    }
    pub fn set_ties(&mut self, ties: TieFlags) -> &mut Self {
        self.ties = ties;
        self
    }
    pub fn set_tuplet(&mut self, tuplet: Option<TupletMembership>) -> &mut Self {
        self.tuplet = tuplet;
        self
    }
    pub fn set_layout(&mut self, x: f64, y: f64) -> &mut Self {
        self.layout_x = x;
        self.layout_y = y;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Element, ElementKind, ParseKindError, TieFlags, TieRole};
    use crate::primitives::{NoteType, NoteValue, Pitch};

    #[test]
    fn tie_roles() {
        let c = Pitch::from_midi(60);
        assert_eq!(Element::note(0, 96, c).tie_role(), TieRole::NotTied);
        assert_eq!(
            Element::note(0, 96, c).with_ties(TieFlags::start()).tie_role(),
            TieRole::TieStart
        );
        assert_eq!(
            Element::note(0, 96, c)
                .with_ties(TieFlags::continuation())
                .tie_role(),
            TieRole::TieContinuation
        );
        assert_eq!(
            Element::note(0, 96, c).with_ties(TieFlags::both()).tie_role(),
            TieRole::TieContinuation
        );
        assert_eq!(
            Element::rest(0, 96).with_ties(TieFlags::start()).tie_role(),
            TieRole::NotTied
        );
    }

    #[test]
    fn kinds() {
        assert_eq!("note".parse::<ElementKind>(), Ok(ElementKind::Note));
        assert_eq!(
            "crescendo".parse::<ElementKind>(),
            Ok(ElementKind::Other("crescendo".to_string()))
        );
        assert_eq!("".parse::<ElementKind>(), Err(ParseKindError::Empty));
        assert_eq!(ElementKind::TimeSignature.to_string(), "timesignature");
        let clef = Element::new(ElementKind::Clef, 0, 0);
        let note = Element::note(0, 96, Pitch::from_midi(60));
        assert!(clef.order_key() < note.order_key());
    }

    #[test]
    fn note_values() {
        let mut note = Element::note(0, 72, Pitch::from_midi(60));
        assert_eq!(
            note.note_value(96),
            Ok(NoteValue::new(NoteType::Quaver, 1))
        );
        note.set_note_value(NoteValue::new(NoteType::Minim, 0), 96);
        assert_eq!(note.duration(), 192);
        assert_eq!(note.end_time(), 192);
    }
}
