use crate::color::{css_rgb, CssColor};
use crate::layout::{PixelRect, StarLayout};
use smart_leds::RGB8;
use std::fmt::Write;

/// Stroke width used for the outline and every pixel cell
const STROKE_WIDTH: f64 = 0.25;

/// Class marking the colorable cells of a template
pub const PIXEL_CLASS: &str = "pixel";

/// Identifies one rendered template instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub(crate) const FIRST: Generation = Generation(0);

    pub(crate) fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// Index of an element inside a template instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementId(usize);

#[derive(Clone, Debug, PartialEq)]
enum Element {
    Background { fill: CssColor },
    Outline { path: String },
    Pixel { index: usize, rect: PixelRect, fill: Option<RGB8> },
}

impl Element {
    fn has_class(&self, class: &str) -> bool {
        matches!(self, Element::Pixel { .. }) && class == PIXEL_CLASS
    }
}

/// One rendered instance of the star template.
///
/// Colors applied to cells live on the instance: rendering again produces a new
/// instance with a new generation and every cell back at its default fill.
#[derive(Clone, Debug)]
pub struct SvgTemplate {
    generation: Generation,
    width: f64,
    height: f64,
    elements: Vec<Element>,
}

impl SvgTemplate {
    /// Build the template for the first `cells` pixels of the layout
    pub fn build(generation: Generation, layout: &StarLayout, cells: usize, background: &CssColor) -> Self {
        let mut elements = vec![
            Element::Background { fill: background.clone() },
            Element::Outline { path: layout.outline.clone() },
        ];
        elements.extend(
            layout.pixels.iter().take(cells).enumerate().map(|(index, rect)| Element::Pixel {
                index,
                rect: *rect,
                fill: None,
            }),
        );
        Self { generation, width: layout.width, height: layout.height, elements }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn pixel_count(&self) -> usize {
        self.elements.iter().filter(|element| matches!(element, Element::Pixel { .. })).count()
    }

    /// All elements carrying `class`, in document order
    pub fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.has_class(class))
            .map(|(id, _)| ElementId(id))
            .collect()
    }

    /// Override the fill of a pixel cell; `None` restores the default fill.
    ///
    /// Ids that don't point at a pixel cell are ignored.
    pub fn set_fill(&mut self, id: ElementId, color: Option<RGB8>) {
        if let Some(Element::Pixel { fill, .. }) = self.elements.get_mut(id.0) {
            *fill = color;
        }
    }

    pub fn fill(&self, id: ElementId) -> Option<RGB8> {
        match self.elements.get(id.0) {
            Some(Element::Pixel { fill, .. }) => *fill,
            _ => None,
        }
    }

    /// Serialize the instance as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let (width, height) = (self.width, self.height);
        let mut svg = String::new();
        // Writing into a String can't fail.
        let _ = writeln!(
            svg,
            r#"<svg width="{width}mm" height="{height}mm" version="1.1" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">"#
        );
        for element in &self.elements {
            let _ = match element {
                Element::Background { fill } => {
                    writeln!(svg, r#"  <rect class="background" width="{width}" height="{height}" fill="{fill}"/>"#)
                }
                Element::Outline { path } => writeln!(
                    svg,
                    r#"  <path fill="none" stroke="black" stroke-width="{STROKE_WIDTH}" d="{path}"/>"#
                ),
                Element::Pixel { index, rect, fill } => {
                    let style = fill.map(|color| format!(r#" style="fill:{}""#, css_rgb(color))).unwrap_or_default();
                    writeln!(
                        svg,
                        r#"  <rect class="{PIXEL_CLASS}" fill="white" stroke="black" stroke-width="{STROKE_WIDTH}" id="rect_{index:03}" width="{}" height="{}" x="{}" y="{}"{style}/>"#,
                        rect.width, rect.height, rect.x, rect.y
                    )
                }
            };
        }
        svg.push_str("</svg>\n");
        svg
    }
}
