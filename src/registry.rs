use egui::Pos2;
use log::{debug, info};

use crate::element::DesignElement;
use crate::error::{DesignerError, DesignerResult};
use crate::id_generator::ElementId;
use crate::layer::LayerEntry;

/// Ordered arena of live design elements plus the single selected id.
///
/// Insertion order is render order and layer order: the last element is the
/// top layer. The registry is the only authority on whether an element still
/// exists.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: Vec<DesignElement>,
    selected: Option<ElementId>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element as the top layer and select it
    pub fn add(&mut self, element: DesignElement) -> &[DesignElement] {
        let id = element.id();
        info!("➕ Added {} {}", element.kind(), id);
        self.elements.push(element);
        self.selected = Some(id);
        &self.elements
    }

    /// Remove an element; unknown ids are ignored.
    ///
    /// Returns the removed element so callers can drop any cached state.
    pub fn remove(&mut self, id: ElementId) -> Option<DesignElement> {
        let index = match self.index_of(id) {
            Ok(index) => index,
            Err(err) => {
                debug!("remove ignored: {}", err);
                return None;
            }
        };

        let removed = self.elements.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        info!("🗑️ Removed {} {}", removed.kind(), id);
        Some(removed)
    }

    /// Select an element; unknown ids are ignored. Never changes order.
    pub fn select(&mut self, id: ElementId) {
        match self.index_of(id) {
            Ok(_) => self.selected = Some(id),
            Err(err) => debug!("select ignored: {}", err),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&DesignElement> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_ok()
    }

    pub fn get(&self, id: ElementId) -> Option<&DesignElement> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut DesignElement> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }

    /// Elements in insertion (bottom to top) order
    pub fn elements(&self) -> &[DesignElement] {
        &self.elements
    }

    /// Layer panel rows in insertion order
    pub fn list(&self) -> Vec<LayerEntry> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, element)| LayerEntry::new(index, element, self.selected))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Topmost element under `pos` in design-surface coordinates
    pub fn element_at(&self, pos: Pos2) -> Option<&DesignElement> {
        self.elements.iter().rev().find(|element| element.hit_test(pos))
    }

    /// Elements in on-screen stacking order, with `raised` drawn above all others
    pub fn paint_order(&self, raised: Option<ElementId>) -> Vec<&DesignElement> {
        let mut order: Vec<&DesignElement> = self
            .elements
            .iter()
            .filter(|element| Some(element.id()) != raised)
            .collect();
        if let Some(top) = raised.and_then(|id| self.get(id)) {
            order.push(top);
        }
        order
    }

    fn index_of(&self, id: ElementId) -> DesignerResult<usize> {
        self.elements
            .iter()
            .position(|element| element.id() == id)
            .ok_or(DesignerError::ElementNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;
    use crate::id_generator::IdGenerator;
    use egui::Vec2;

    const SURFACE: Vec2 = Vec2::new(400.0, 500.0);

    #[test]
    fn test_paint_order_raises_dragged_element() {
        let mut ids = IdGenerator::new();
        let mut registry = ElementRegistry::new();
        let a = ids.generate_id();
        let b = ids.generate_id();
        registry.add(factory::create_emoji(a, "🚀", SURFACE));
        registry.add(factory::create_emoji(b, "🔥", SURFACE));

        let order: Vec<_> = registry.paint_order(Some(a)).iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![b, a]);

        // Registry order itself is untouched
        let order: Vec<_> = registry.elements().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_element_at_prefers_top_layer() {
        let mut ids = IdGenerator::new();
        let mut registry = ElementRegistry::new();
        let a = ids.generate_id();
        let b = ids.generate_id();
        registry.add(factory::create_emoji(a, "🚀", SURFACE));
        registry.add(factory::create_emoji(b, "🔥", SURFACE));

        let center = Pos2::new(200.0, 250.0);
        assert_eq!(registry.element_at(center).map(|e| e.id()), Some(b));
        assert!(registry.element_at(Pos2::new(0.0, 0.0)).is_none());
    }
}
