//! Display objects attached to elements.
//!
//! Renderers give each laid out element an on-screen item. The list
//! takes ownership of it, and drops it together with the element.

use super::{ElementId, ElementList, SegmentError, SegmentResult};

/// On-screen representation of an element (a canvas item).
pub trait DisplayItem: Send + Sync {
    fn move_to(&mut self, x: f64, y: f64);
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl ElementList {
    /// Attach display item, placing it at element layout coordinates
    /// plus the given offset.
    ///
    /// # Returns
    /// Previously attached item, if any.
    pub fn set_display_item(
        &mut self,
        id: ElementId,
        mut item: Box<dyn DisplayItem>,
        dx: f64,
        dy: f64,
    ) -> SegmentResult<Option<Box<dyn DisplayItem>>> {
        let entry = self.entry_mut(id).ok_or(SegmentError::StaleHandle(id))?;
        item.move_to(
            entry.element.layout_x() + dx,
            entry.element.layout_y() + dy,
        );
        Ok(entry.display.replace(item))
    }
    pub fn display_item(&self, id: ElementId) -> Option<&dyn DisplayItem> {
        self.entry(id)?.display.as_deref()
    }
    pub fn take_display_item(
        &mut self,
        id: ElementId,
    ) -> Option<Box<dyn DisplayItem>> {
        self.entry_mut(id)?.display.take()
    }

    /// X of the display item, as it is actually placed.
    pub fn effective_x(&self, id: ElementId) -> SegmentResult<f64> {
        self.displayed(id).map(|item| item.x())
    }
    pub fn effective_y(&self, id: ElementId) -> SegmentResult<f64> {
        self.displayed(id).map(|item| item.y())
    }

    fn displayed(&self, id: ElementId) -> SegmentResult<&dyn DisplayItem> {
        self.entry(id)
            .ok_or(SegmentError::StaleHandle(id))?
            .display
            .as_deref()
            .ok_or(SegmentError::NoDisplayItem(id))
    }
}
