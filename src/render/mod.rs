mod cells;
mod template;

pub use cells::CellCache;
pub use template::{ElementId, Generation, SvgTemplate, PIXEL_CLASS};
