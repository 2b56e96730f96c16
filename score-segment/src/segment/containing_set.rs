//! Search of the maximal run of related elements around a position.

use log::trace;

use crate::primitives::Element;

use super::{ElementId, ElementList};

/// Half-open run `[first, last)` of an `ElementList`.
///
/// `None` on either side is the end of the list, so `[end, end)` is
/// `ElementRange { first: None, last: None }`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ElementRange {
    pub first: Option<ElementId>,
    pub last: Option<ElementId>,
}
impl ElementRange {
    pub fn empty() -> Self {
        Self {
            first: None,
            last: None,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.first == self.last
    }

    /// Handles of the run, in list order.
    pub fn ids<'a>(
        &self,
        list: &'a ElementList,
    ) -> impl Iterator<Item = ElementId> + 'a {
        let last = self.last;
        let mut current = match self.is_empty() {
            true => None,
            false => self.first,
        };
        std::iter::from_fn(move || {
            let id = current?;
            current = list.next(id).filter(|next| Some(*next) != last);
            Some(id)
        })
    }
    pub fn len(&self, list: &ElementList) -> usize {
        self.ids(list).count()
    }
}

/// Find the run of elements around `position`, related by `related`.
///
/// `related` is called as `related(anchor, candidate)`.
///
/// At first, the list is scanned backwards. Each preceding element is
/// compared with the last one included (so the anchor drifts along the
/// run), until the relation fails or the start of the list is reached.
/// The element reached becomes `first`. Then, the list is scanned
/// forward from `first`, comparing every element with `first`, and the
/// first element not related becomes `last`.
///
/// For end position (or stale handle) returns `[end, end)`.
///
/// # Example
/// ```
/// use score_segment::primitives::{Element, Pitch};
/// use score_segment::segment::{find_containing_set, ElementList};
///
/// let mut list = ElementList::new();
/// let a = list.insert(Element::note(0, 96, Pitch::from_midi(60)));
/// let b = list.insert(Element::note(0, 96, Pitch::from_midi(64)));
/// let c = list.insert(Element::note(96, 96, Pitch::from_midi(67)));
/// let same_time =
///     |x: &Element, y: &Element| x.absolute_time() == y.absolute_time();
///
/// let run = find_containing_set(&list, Some(b), same_time);
/// assert_eq!(run.first, Some(a));
/// assert_eq!(run.last, Some(c));
/// assert_eq!(run.ids(&list).collect::<Vec<_>>(), vec![a, b]);
/// ```
pub fn find_containing_set<F>(
    list: &ElementList,
    position: Option<ElementId>,
    mut related: F,
) -> ElementRange
where
    F: FnMut(&Element, &Element) -> bool,
{
    let (mut anchor, mut anchor_element) =
        match position.and_then(|id| Some((id, list.get(id)?))) {
            Some(found) => found,
            None => return ElementRange::empty(),
        };

    while let Some(candidate) = list.prev(anchor) {
        let Some(candidate_element) = list.get(candidate) else {
            break;
        };
        if !related(anchor_element, candidate_element) {
            break;
        }
        anchor = candidate;
        anchor_element = candidate_element;
    }
    let first = anchor;
    trace!("containing set starts at {:?}", first);

    let mut last = Some(first);
    while let Some(candidate) = last {
        let Some(candidate_element) = list.get(candidate) else {
            break;
        };
        if !related(anchor_element, candidate_element) {
            break;
        }
        last = list.next(candidate);
    }
    ElementRange {
        first: Some(first),
        last,
    }
}
