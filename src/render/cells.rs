use super::template::{ElementId, Generation, SvgTemplate, PIXEL_CLASS};

/// Memoized lookup of the pixel cells of a template instance.
///
/// The lookup is keyed by the template generation: once a new instance is
/// rendered the stored cells belong to a discarded instance and are resolved again.
#[derive(Debug, Default)]
pub struct CellCache {
    generation: Option<Generation>,
    cells: Vec<ElementId>,
}

impl CellCache {
    /// The pixel cells of `template`, in wiring order
    pub fn resolve(&mut self, template: &SvgTemplate) -> &[ElementId] {
        if self.generation != Some(template.generation()) {
            self.cells = template.query_class(PIXEL_CLASS);
            self.generation = Some(template.generation());
        }
        &self.cells
    }

    /// The stored cells, if they were resolved for `template`
    pub fn cached(&self, template: &SvgTemplate) -> Option<&[ElementId]> {
        (self.generation == Some(template.generation())).then_some(self.cells.as_slice())
    }

    pub fn invalidate(&mut self) {
        self.generation = None;
        self.cells.clear();
    }

    pub fn is_resolved(&self) -> bool {
        self.generation.is_some()
    }
}
