//! Real sounding durations of notes: ties and tuplets resolved.
//!
//! A tie chain sounds as one note. The first note of the chain reports
//! the duration of the whole chain, every continuation reports zero, so
//! summing durations over a segment never counts a tied span twice.
//!
//! Ties are followed by pitch. A tied note without pitch may join with
//! any other pitchless tie, so don't create tied notes without pitches.

use log::{trace, warn};

use crate::primitives::{Element, Length, Pitch, Ticks, TieRole};

use super::{
    containing_set::find_containing_set,
    tuplets::{ElementTuplets, TupletLookup},
    ElementId, ElementList,
};

/// Performance queries over a segment.
#[derive(Debug)]
pub struct PerformanceHelper<'a, L = ElementTuplets> {
    list: &'a ElementList,
    tuplets: L,
}
impl<'a> PerformanceHelper<'a, ElementTuplets> {
    /// Tuplet ratios are taken from elements themselves.
    pub fn new(list: &'a ElementList) -> Self {
        Self::with_tuplets(list, ElementTuplets)
    }
}
impl<'a, L: TupletLookup> PerformanceHelper<'a, L> {
    pub fn with_tuplets(list: &'a ElementList, tuplets: L) -> Self {
        Self { list, tuplets }
    }

    /// Nominal duration, rescaled by the enclosing tuplet bracket.
    pub fn duration_with_tupling(&self, id: ElementId) -> Length {
        let Some(element) = self.list.get(id) else {
            return Length::zero();
        };
        let length = Length::from_ticks(element.duration());
        match self.tuplets.ratio_at(self.list, id) {
            Some(ratio) => length.scaled(ratio),
            None => length,
        }
    }

    /// Duration of the element as it sounds.
    ///
    /// - Not tied note, or not a note at all: own duration, with tupling.
    /// - First note of a tie chain: sum of the whole chain.
    /// - Continuation of a tie chain: zero.
    ///
    /// # Example
    /// ```
    /// use score_segment::primitives::{Element, Length, Pitch, TieFlags};
    /// use score_segment::segment::{ElementList, PerformanceHelper};
    ///
    /// let c = Pitch::from_midi(60);
    /// let mut list = ElementList::new();
    /// let a = list.insert(Element::note(0, 96, c).with_ties(TieFlags::start()));
    /// let b = list.insert(
    ///     Element::note(96, 96, c).with_ties(TieFlags::continuation()),
    /// );
    /// let rest = list.insert(Element::rest(192, 96));
    ///
    /// let helper = PerformanceHelper::new(&list);
    /// assert_eq!(helper.sounding_duration(a), Length::from_ticks(192));
    /// assert_eq!(helper.sounding_duration(b), Length::zero());
    /// assert_eq!(helper.sounding_duration(rest), Length::from_ticks(96));
    /// ```
    pub fn sounding_duration(&self, id: ElementId) -> Length {
        let Some(element) = self.list.get(id) else {
            return Length::zero();
        };
        match element.tie_role() {
            TieRole::NotTied => self.duration_with_tupling(id),
            TieRole::TieContinuation => Length::zero(),
            TieRole::TieStart => self.tied_duration(id, element),
        }
    }

    /// Time the element stops sounding, if it is in the list.
    pub fn sounding_end(&self, id: ElementId) -> Option<Length> {
        let start = Length::from_ticks(self.list.get(id)?.absolute_time());
        Some(start + self.sounding_duration(id))
    }

    /// Sounding durations of all notes in list order, tied continuations
    /// included with zero.
    pub fn sounding_durations(
        &self,
    ) -> impl Iterator<Item = (ElementId, Length)> + '_ {
        self.list
            .iter()
            .filter(|(_, element)| element.is_note())
            .map(|(id, _)| (id, self.sounding_duration(id)))
    }

    fn tied_duration(&self, start: ElementId, element: &Element) -> Length {
        let pitch = element.pitch();
        if pitch.is_none() {
            warn!("tied note {:?} has no pitch, its tie may be resolved wrong", start);
        }
        let mut total = self.duration_with_tupling(start);
        let mut current = start;
        let mut chain_length = 1;
        while let Some(next) = self.find_continuation(current, pitch) {
            total += self.duration_with_tupling(next);
            chain_length += 1;
            trace!("tie from {:?} continues at {:?}, total {}", start, next, total);
            current = next;
        }
        if chain_length == 1 {
            warn!("tie from {:?} has no continuation", start);
        }
        total
    }

    /// Look at the notes starting next after `current`, and find one,
    /// that continues the tie.
    fn find_continuation(
        &self,
        current: ElementId,
        pitch: Option<Pitch>,
    ) -> Option<ElementId> {
        let onset = self.next_onset(current)?;
        let group = find_containing_set(
            self.list,
            Some(onset),
            |anchor: &Element, candidate: &Element| {
                anchor.is_note()
                    && candidate.is_note()
                    && anchor.absolute_time() == candidate.absolute_time()
            },
        );
        group.ids(self.list).find(|id| {
            self.list.get(*id).map_or(false, |note| {
                note.tie_role() == TieRole::TieContinuation
                    && note.pitch() == pitch
            })
        })
    }

    /// First note after `current`, that starts later than it.
    fn next_onset(&self, current: ElementId) -> Option<ElementId> {
        let time: Ticks = self.list.get(current)?.absolute_time();
        self.list
            .iter_from(current)
            .skip(1)
            .find(|(_, element)| {
                element.is_note() && element.absolute_time() > time
            })
            .map(|(id, _)| id)
    }
}
