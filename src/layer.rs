use crate::element::{DesignElement, ElementKind};
use crate::id_generator::ElementId;

/// One row of the layer panel.
///
/// Rows are rebuilt from registry order every time, so labels always read
/// `"<Kind> <position>"` with 1-based positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerEntry {
    pub id: ElementId,
    pub kind: ElementKind,
    pub label: String,
    pub selected: bool,
}

impl LayerEntry {
    pub(crate) fn new(index: usize, element: &DesignElement, selected: Option<ElementId>) -> Self {
        Self {
            id: element.id(),
            kind: element.kind(),
            label: format!("{} {}", element.kind().label(), index + 1),
            selected: selected == Some(element.id()),
        }
    }
}
