//! Element storage and duration resolution for one segment of a score.
//!
//! - [`segment::ElementList`] keeps musical elements sorted by time and
//!   sub-ordering, and gives out stable handles.
//! - [`segment::find_containing_set`] finds runs of related elements.
//! - [`segment::Chord`] groups simultaneous notes.
//! - [`segment::PerformanceHelper`] computes how long notes really sound,
//!   following ties and tuplets.

pub mod primitives;
pub mod segment;
pub mod settings;

pub use segment::{
    Chord, ElementId, ElementList, ElementRange, PerformanceHelper,
    SegmentError, SegmentResult,
};
pub use settings::Settings;
