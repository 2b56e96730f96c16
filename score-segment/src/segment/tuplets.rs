//! Read-only access to tuplet brackets enclosing elements.

use std::collections::HashMap;

use crate::primitives::{TupletId, TupletRatio};

use super::{ElementId, ElementList};

/// Answers, whether an element lies under a tuplet bracket, and with
/// which ratio.
pub trait TupletLookup {
    fn ratio_at(&self, list: &ElementList, id: ElementId) -> Option<TupletRatio>;
}
impl<T: TupletLookup + ?Sized> TupletLookup for &T {
    fn ratio_at(&self, list: &ElementList, id: ElementId) -> Option<TupletRatio> {
        (**self).ratio_at(list, id)
    }
}

/// Uses the ratio each element carries in its own membership.
#[derive(Debug, Default, Clone, Copy)]
pub struct ElementTuplets;
impl TupletLookup for ElementTuplets {
    fn ratio_at(&self, list: &ElementList, id: ElementId) -> Option<TupletRatio> {
        Some(list.get(id)?.tuplet()?.ratio)
    }
}

/// Bracket over a span of a segment.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct TupletBracket {
    pub start: ElementId,
    /// Number of written units under the bracket.
    pub units: u32,
    pub ratio: TupletRatio,
}
impl TupletBracket {
    pub fn new(start: ElementId, units: u32, ratio: TupletRatio) -> Self {
        Self {
            start,
            units,
            ratio,
        }
    }
}

/// Brackets of a segment by their ids.
///
/// Elements refer to brackets by `TupletMembership::bracket`. If a
/// bracket is unknown here, the ratio stored in the membership is used.
#[derive(Debug, Default, Clone)]
pub struct TupletBrackets {
    brackets: HashMap<TupletId, TupletBracket>,
    next_id: u32,
}
impl TupletBrackets {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add(&mut self, bracket: TupletBracket) -> TupletId {
        let id = TupletId(self.next_id);
        self.next_id += 1;
        log::debug!("add tuplet bracket {:?} of ratio {}", id, bracket.ratio);
        self.brackets.insert(id, bracket);
        id
    }
    pub fn get(&self, id: TupletId) -> Option<&TupletBracket> {
        self.brackets.get(&id)
    }
    pub fn remove(&mut self, id: TupletId) -> Option<TupletBracket> {
        self.brackets.remove(&id)
    }
    pub fn len(&self) -> usize {
        self.brackets.len()
    }
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}
impl TupletLookup for TupletBrackets {
    fn ratio_at(&self, list: &ElementList, id: ElementId) -> Option<TupletRatio> {
        let membership = list.get(id)?.tuplet()?;
        match self.brackets.get(&membership.bracket) {
            Some(bracket) => Some(bracket.ratio),
            None => Some(membership.ratio),
        }
    }
}
