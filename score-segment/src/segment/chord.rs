//! Groups of notes sounding at the same time.

use crate::primitives::Element;

use super::{containing_set::find_containing_set, ElementId, ElementList};

/// Notes of a segment sharing one absolute time.
///
/// Built from any one of its notes and sorted by ascending pitch.
/// It borrows the list, so it can not outlive the next edit.
///
/// If the seed is not a note, the chord is empty. If no other note
/// shares its time, the chord holds only the seed.
#[derive(Debug, Clone)]
pub struct Chord<'a> {
    list: &'a ElementList,
    notes: Vec<ElementId>,
    initial: Option<ElementId>,
    last: Option<ElementId>,
    longest: Option<ElementId>,
    shortest: Option<ElementId>,
}
impl<'a> Chord<'a> {
    /// # Parameters
    /// * `note_in_chord`: any note of the chord.
    /// * `quantized`: compare times, quantized by the list quantizer,
    ///   instead of raw ones.
    ///
    /// # Example
    /// ```
    /// use score_segment::primitives::{Element, Pitch};
    /// use score_segment::segment::{Chord, ElementList};
    ///
    /// let mut list = ElementList::new();
    /// let g = list.insert(Element::note(0, 96, Pitch::from_midi(67)));
    /// let c = list.insert(Element::note(0, 192, Pitch::from_midi(60)));
    /// let e = list.insert(Element::note(0, 48, Pitch::from_midi(64)));
    /// list.insert(Element::rest(96, 96));
    ///
    /// let chord = Chord::new(&list, e, false);
    /// assert_eq!(chord.as_slice(), &[c, e, g]);
    /// assert_eq!(chord.lowest_note(), Some(c));
    /// assert_eq!(chord.highest_note(), Some(g));
    /// assert_eq!(chord.initial_note(), Some(g));
    /// assert_eq!(chord.final_note(), Some(e));
    /// assert_eq!(chord.longest_note(), Some(c));
    /// assert_eq!(chord.shortest_note(), Some(e));
    /// ```
    pub fn new(
        list: &'a ElementList,
        note_in_chord: ElementId,
        quantized: bool,
    ) -> Self {
        let quantizer = *list.quantizer();
        let time = |element: &Element| match quantized {
            true => quantizer.quantize(element.absolute_time()),
            false => element.absolute_time(),
        };
        let range = find_containing_set(
            list,
            Some(note_in_chord),
            |anchor: &Element, candidate: &Element| {
                anchor.is_note()
                    && candidate.is_note()
                    && time(anchor) == time(candidate)
            },
        );

        let mut notes: Vec<ElementId> = range.ids(list).collect();
        let (initial, last) = (notes.first().copied(), notes.last().copied());
        notes.sort_by_key(|id| list.get(*id).and_then(|note| note.pitch()));

        let mut chord = Self {
            list,
            notes,
            initial,
            last,
            longest: None,
            shortest: None,
        };
        chord.find_extremes();
        chord
    }

    /// First of equal durations wins.
    fn find_extremes(&mut self) {
        let mut longest: Option<(ElementId, u64)> = None;
        let mut shortest: Option<(ElementId, u64)> = None;
        for id in self.notes.iter().copied() {
            let Some(note) = self.list.get(id) else {
                continue;
            };
            let duration = note.duration();
            if longest.map_or(true, |(_, max)| duration > max) {
                longest = Some((id, duration));
            }
            if shortest.map_or(true, |(_, min)| duration < min) {
                shortest = Some((id, duration));
            }
        }
        self.longest = longest.map(|(id, _)| id);
        self.shortest = shortest.map(|(id, _)| id);
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
    pub fn contains(&self, id: ElementId) -> bool {
        self.notes.contains(&id)
    }
    /// Notes in ascending pitch order.
    pub fn as_slice(&self) -> &[ElementId] {
        &self.notes
    }
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.notes.iter().copied()
    }
    /// Notes with their elements, in ascending pitch order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.notes
            .iter()
            .filter_map(|id| Some((*id, self.list.get(*id)?)))
    }

    /// First note of the chord in list order (not pitch order).
    pub fn initial_note(&self) -> Option<ElementId> {
        self.initial
    }
    /// Last note of the chord in list order (not pitch order).
    pub fn final_note(&self) -> Option<ElementId> {
        self.last
    }
    pub fn longest_note(&self) -> Option<ElementId> {
        self.longest
    }
    pub fn shortest_note(&self) -> Option<ElementId> {
        self.shortest
    }
    pub fn highest_note(&self) -> Option<ElementId> {
        self.notes.last().copied()
    }
    pub fn lowest_note(&self) -> Option<ElementId> {
        self.notes.first().copied()
    }
}
impl<'c, 'a> IntoIterator for &'c Chord<'a> {
    type Item = &'c ElementId;
    type IntoIter = std::slice::Iter<'c, ElementId>;
    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
