//! Elements, from which a segment is constructed.
//!
//! Editing commands build `Element`s (notes, rests, clefs...) and insert
//! them into an `ElementList`. Durations are in integer ticks, while
//! everything that can become fractional (tuplets) is held by `Length`.

pub mod element;
pub mod length;
pub mod note_value;
pub mod pitch;
pub mod properties;
pub mod tuplet;

pub use element::{
    Element, ElementKind, OrderKey, ParseKindError, Ticks, TieFlags, TieRole,
};
pub use length::Length;
pub use note_value::{
    split_duration, NoteType, NoteValue, NoteValueError, NoteValueResult,
};
pub use pitch::Pitch;
pub use properties::{
    Properties, PropertyError, PropertyResult, PropertyValue,
};
pub use tuplet::{
    TupletError, TupletId, TupletMembership, TupletRatio, TupletResult,
};
