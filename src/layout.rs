use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The star layout shipped with the crate: canvas size, outline and 180 pixel cells
const EMBEDDED_LAYOUT: &str = include_str!("../assets/star-layout.json");

static STAR_LAYOUT: Lazy<StarLayout> =
    Lazy::new(|| StarLayout::from_json(EMBEDDED_LAYOUT).expect("embedded star layout is corrupted"));

/// Position and size of one pixel cell, in drawing units (mm)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The fixed geometry of a star element.
///
/// Pixel order is significant: index `n` is the `n`-th LED along the data line.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StarLayout {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// SVG path data for the star outline
    pub outline: String,
    pub pixels: Vec<PixelRect>,
}

impl StarLayout {
    /// The layout embedded in the crate, parsed once per process
    pub fn embedded() -> &'static StarLayout {
        &STAR_LAYOUT
    }

    /// Parse a layout from its JSON representation
    pub fn from_json(content: &str) -> Result<Self, LayoutError> {
        let layout: Self = serde_json::from_str(content)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load a layout from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0) {
            return Err(LayoutError::InvalidCanvas(self.width, self.height));
        }
        if !is_path_data(&self.outline) {
            return Err(LayoutError::InvalidOutline);
        }
        if self.pixels.is_empty() {
            return Err(LayoutError::NoPixels);
        }
        for (index, pixel) in self.pixels.iter().enumerate() {
            let finite = [pixel.x, pixel.y, pixel.width, pixel.height].iter().all(|v| v.is_finite());
            if !finite || pixel.width <= 0.0 || pixel.height <= 0.0 {
                return Err(LayoutError::InvalidPixel(index));
            }
        }
        Ok(())
    }
}

// Path commands, numbers and separators only, so the outline can be written
// into an SVG attribute verbatim.
fn is_path_data(outline: &str) -> bool {
    outline.chars().all(|c| {
        c.is_ascii_digit()
            || c.is_ascii_whitespace()
            || matches!(c, '.' | ',' | '-' | '+' | 'e' | 'E')
            || "MmLlHhVvCcSsQqTtAaZz".contains(c)
    })
}

/// Errors that can occur when loading a layout
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("failed to parse layout: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid canvas size {0}x{1}")]
    InvalidCanvas(f64, f64),

    #[error("outline is not valid SVG path data")]
    InvalidOutline,

    #[error("layout has no pixels")]
    NoPixels,

    #[error("pixel {0} has an invalid position or size")]
    InvalidPixel(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn embedded_layout() {
        let layout = StarLayout::embedded();
        assert_eq!(layout.len(), 180);
        assert_eq!((layout.width, layout.height), (210.0, 297.0));
        assert!(layout.outline.starts_with("m190.46"));

        let first = layout.pixels[0];
        assert_eq!((first.x, first.y), (108.30149, 167.11479));
        let last = layout.pixels[179];
        assert_eq!((last.x, last.y), (109.30453, 131.5968));
    }

    #[test]
    fn custom_layout() {
        let content = r#"{"width": 10, "height": 10, "outline": "m0 0z",
            "pixels": [{"x": 1, "y": 2, "width": 3, "height": 4}]}"#;
        let layout = StarLayout::from_json(content).expect("failed to parse");
        assert_eq!(layout.pixels, vec![PixelRect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 }]);
    }

    #[test]
    fn empty_layout() {
        let content = r#"{"width": 10, "height": 10, "outline": "", "pixels": []}"#;
        assert!(matches!(StarLayout::from_json(content), Err(LayoutError::NoPixels)));
    }

    #[test]
    fn zero_sized_pixel() {
        let content = r#"{"width": 10, "height": 10, "outline": "",
            "pixels": [{"x": 1, "y": 2, "width": 3, "height": 4}, {"x": 1, "y": 2, "width": 0, "height": 4}]}"#;
        assert!(matches!(StarLayout::from_json(content), Err(LayoutError::InvalidPixel(1))));
    }

    #[rstest]
    #[case("m0 0\"/><script>alert(1)</script><path d=\"")]
    #[case("m0 0 url(#x)")]
    #[case("m0 0 <z")]
    fn outline_with_markup(#[case] outline: &str) {
        let content = serde_json::json!({
            "width": 10, "height": 10, "outline": outline,
            "pixels": [{"x": 1, "y": 2, "width": 3, "height": 4}],
        })
        .to_string();
        assert!(matches!(StarLayout::from_json(&content), Err(LayoutError::InvalidOutline)));
    }

    #[test]
    fn outline_path_commands() {
        let content = r#"{"width": 10, "height": 10, "outline": "M1.5,2e-1 L+3 4 c1 1 2 2 3 3 A1 1 0 0 1 5 5 Z",
            "pixels": [{"x": 1, "y": 2, "width": 3, "height": 4}]}"#;
        assert!(StarLayout::from_json(content).is_ok());
    }

    #[test]
    fn malformed_layout() {
        assert!(matches!(StarLayout::from_json("{"), Err(LayoutError::Parse(_))));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(StarLayout::load("/nonexistent/star.json"), Err(LayoutError::Io(_))));
    }
}
