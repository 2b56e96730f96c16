//! Ordered collection of the elements of one segment.
//!
//! `ElementList` owns its elements. Callers never hold them: they hold
//! `ElementId` handles, that stay valid while their element is in the
//! list, and stop resolving after it is erased.
//!
//! Everything that returns a position returns `Option<ElementId>`, where
//! `None` stands for the end of the collection.
//!
//! # Example
//! ```
//! use score_segment::primitives::{Element, ElementKind, Pitch};
//! use score_segment::segment::ElementList;
//!
//! let mut list = ElementList::new();
//! let rest = list.insert(Element::rest(96, 96));
//! let c = list.insert(Element::note(0, 96, Pitch::from_midi(60)));
//! let e = list.insert(Element::note(0, 96, Pitch::from_midi(64)));
//! let ids: Vec<_> = list.iter().map(|(id, _)| id).collect();
//! assert_eq!(ids, vec![c, e, rest]);
//! assert_eq!(list.find_next(&ElementKind::Rest, c), Some(rest));
//! assert_eq!(list.find_previous(&ElementKind::Note, c), None);
//!
//! list.erase(e);
//! assert!(!list.contains(e));
//! assert_eq!(list.next(c), Some(rest));
//! ```

use std::{
    collections::BTreeMap,
    ops::Bound::{Excluded, Unbounded},
};

use derivative::Derivative;
use log::debug;

use crate::{
    primitives::{Element, ElementKind, NoteValue, OrderKey, Ticks},
    settings::Settings,
};

pub mod chord;
pub mod containing_set;
pub mod display;
pub mod performance;
pub mod quantizer;
pub mod tuplets;

pub use chord::Chord;
pub use containing_set::{find_containing_set, ElementRange};
pub use display::DisplayItem;
pub use performance::PerformanceHelper;
pub use quantizer::Quantizer;
pub use tuplets::{ElementTuplets, TupletBracket, TupletBrackets, TupletLookup};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SegmentError {
    #[error("Handle {0:?} does not refer to an element of the segment")]
    StaleHandle(ElementId),
    #[error("Element {0:?} has no display item")]
    NoDisplayItem(ElementId),
}
pub type SegmentResult<T> = Result<T, SegmentError>;

/// Position handle of an element in `ElementList`.
///
/// Survives insertions and erasures of other elements. Once its own
/// element is erased, the handle resolves to nothing, even if the slot
/// is reused.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct ElementId {
    index: usize,
    generation: u32,
}

/// Order key plus insertion number, so equal elements keep the order
/// in which they were inserted.
type SortKey = (OrderKey, u64);

#[derive(Derivative)]
#[derivative(Debug)]
struct Entry {
    element: Element,
    key: SortKey,
    #[derivative(Debug = "ignore")]
    display: Option<Box<dyn DisplayItem>>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Sorted multi-collection of elements of one segment.
///
/// Sorted by absolute time, then by sub-ordering, then by insertion
/// order. Elements with equal keys coexist (chords).
#[derive(Debug)]
pub struct ElementList {
    slots: Vec<Slot>,
    free: Vec<usize>,
    order: BTreeMap<SortKey, ElementId>,
    next_seq: u64,
    settings: Settings,
    quantizer: Quantizer,
}
impl Default for ElementList {
    fn default() -> Self {
        Self::new()
    }
}
impl ElementList {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: BTreeMap::new(),
            next_seq: 0,
            quantizer: settings.quantizer(),
            settings,
        }
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    pub fn contains(&self, id: ElementId) -> bool {
        self.entry(id).is_some()
    }
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.entry(id).map(|entry| &entry.element)
    }
    pub fn quantized_time(&self, id: ElementId) -> Option<Ticks> {
        self.get(id)
            .map(|element| self.quantizer.quantize(element.absolute_time()))
    }

    /// Insert element, keeping the order.
    ///
    /// An element equal in order to the present ones is placed after
    /// them.
    pub fn insert(&mut self, element: Element) -> ElementId {
        let key = (element.order_key(), self.next_seq);
        self.next_seq += 1;
        debug!(
            "insert {} at {} (sub-ordering {})",
            element.kind(),
            key.0.absolute_time,
            key.0.sub_ordering
        );
        let entry = Entry {
            element,
            key,
            display: None,
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.entry = Some(entry);
                ElementId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                ElementId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };
        self.order.insert(key, id);
        id
    }

    /// Remove element from the list, releasing its display item.
    ///
    /// Only `id` is invalidated. Erasing by a stale handle does nothing.
    pub fn erase(&mut self, id: ElementId) -> Option<Element> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.order.remove(&entry.key);
        let Entry {
            element, display, ..
        } = entry;
        if let Some(display) = display {
            debug!("release display item of {:?}", id);
            drop(display);
        }
        debug!("erase {} at {}", element.kind(), element.absolute_time());
        Some(element)
    }

    /// Erase everything. All handles become stale.
    pub fn clear(&mut self) {
        let ids: Vec<ElementId> = self.order.values().copied().collect();
        for id in ids {
            self.erase(id);
        }
    }

    /// Modify element in place.
    ///
    /// If time or sub-ordering were changed, the element is moved to its
    /// new place, as if it was erased and inserted again, but `id` stays
    /// valid.
    pub fn update<R>(
        &mut self,
        id: ElementId,
        modify: impl FnOnce(&mut Element) -> R,
    ) -> SegmentResult<R> {
        let next_seq = self.next_seq;
        let entry = self.entry_mut(id).ok_or(SegmentError::StaleHandle(id))?;
        let result = modify(&mut entry.element);
        let new_key = entry.element.order_key();
        if new_key != entry.key.0 {
            let old = entry.key;
            entry.key = (new_key, next_seq);
            let fresh = entry.key;
            self.next_seq += 1;
            self.order.remove(&old);
            self.order.insert(fresh, id);
            debug!(
                "move {:?} from {} to {}",
                id, old.0.absolute_time, new_key.absolute_time
            );
        }
        Ok(result)
    }

    pub fn reposition(
        &mut self,
        id: ElementId,
        absolute_time: Ticks,
    ) -> SegmentResult<()> {
        self.update(id, |element| {
            element.set_absolute_time(absolute_time);
        })
    }

    /// Set nominal duration from the written note value.
    pub fn set_note_value(
        &mut self,
        id: ElementId,
        value: NoteValue,
    ) -> SegmentResult<()> {
        let ticks_per_crotchet = self.settings.ticks_per_crotchet;
        self.update(id, |element| {
            element.set_note_value(value, ticks_per_crotchet);
        })
    }

    pub fn begin(&self) -> Option<ElementId> {
        self.order.values().next().copied()
    }
    pub fn last(&self) -> Option<ElementId> {
        self.order.values().next_back().copied()
    }
    pub fn next(&self, id: ElementId) -> Option<ElementId> {
        let key = self.entry(id)?.key;
        self.order
            .range((Excluded(key), Unbounded))
            .next()
            .map(|(_, id)| *id)
    }
    pub fn prev(&self, id: ElementId) -> Option<ElementId> {
        let key = self.entry(id)?.key;
        self.order.range(..key).next_back().map(|(_, id)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        self.order
            .values()
            .filter_map(move |id| Some((*id, self.get(*id)?)))
    }

    /// Iterate from `id` (inclusive) to the end.
    pub fn iter_from(
        &self,
        id: ElementId,
    ) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        self.entry(id)
            .map(|entry| entry.key)
            .into_iter()
            .flat_map(move |key| self.order.range(key..))
            .filter_map(move |(_, id)| Some((*id, self.get(*id)?)))
    }

    /// Iterate half-open `[first, last)`, where `None` is the end.
    pub fn iter_range(
        &self,
        first: Option<ElementId>,
        last: Option<ElementId>,
    ) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        ElementRange { first, last }
            .ids(self)
            .filter_map(move |id| Some((id, self.get(id)?)))
    }

    /// Nearest element of `kind` after `from`.
    pub fn find_next(
        &self,
        kind: &ElementKind,
        from: ElementId,
    ) -> Option<ElementId> {
        self.iter_from(from)
            .skip(1)
            .find(|(_, element)| element.kind() == kind)
            .map(|(id, _)| id)
    }

    /// Nearest element of `kind` before `from`. Never wraps around.
    pub fn find_previous(
        &self,
        kind: &ElementKind,
        from: ElementId,
    ) -> Option<ElementId> {
        let key = self.entry(from)?.key;
        self.order
            .range(..key)
            .rev()
            .filter_map(|(_, id)| Some((*id, self.get(*id)?)))
            .find(|(_, element)| element.kind() == kind)
            .map(|(id, _)| id)
    }

    /// True if a chord built from `id` has some other note above `id`
    /// in pitch order, i.e. `id` can not be treated as the end of its
    /// chord.
    pub fn has_succeeding_chord_elements(&self, id: ElementId) -> bool {
        let chord = Chord::new(self, id, false);
        let rank = chord.as_slice().iter().position(|note| *note == id);
        rank.map_or(false, |rank| rank + 1 < chord.len())
    }

    fn entry(&self, id: ElementId) -> Option<&Entry> {
        let slot = self.slots.get(id.index)?;
        match slot.generation == id.generation {
            true => slot.entry.as_ref(),
            false => None,
        }
    }
    fn entry_mut(&mut self, id: ElementId) -> Option<&mut Entry> {
        let slot = self.slots.get_mut(id.index)?;
        match slot.generation == id.generation {
            true => slot.entry.as_mut(),
            false => None,
        }
    }
}
