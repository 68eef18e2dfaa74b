use serde::{Deserialize, Serialize};
use smart_leds::RGB8;
use std::fmt;
use std::str::FromStr;

/// A color as handed over by the simulator: three channel intensities in `[0, 1]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel to `[0, 255]`.
    ///
    /// Channels outside `[0, 1]` are clamped first and NaN maps to 0.
    pub fn to_rgb8(self) -> RGB8 {
        RGB8::new(channel_to_u8(self.r), channel_to_u8(self.g), channel_to_u8(self.b))
    }
}

impl From<Rgb> for RGB8 {
    fn from(color: Rgb) -> Self {
        color.to_rgb8()
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// CSS functional notation for an 8 bit color, e.g. `rgb(255,0,0)`
pub fn css_rgb(color: RGB8) -> String {
    format!("rgb({},{},{})", color.r, color.g, color.b)
}

/// A CSS color token used for the element background.
///
/// Only tokens that can be written into an SVG attribute verbatim are accepted:
/// hex colors, named colors and the `rgb`/`rgba`/`hsl`/`hsla` functional forms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CssColor(String);

impl CssColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CssColor {
    fn default() -> Self {
        Self("#363".into())
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CssColor {
    type Err = ColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let value = input.trim();
        if is_hex_color(value) || is_named_color(value) || is_functional_color(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(ColorError::Invalid(input.to_string()))
        }
    }
}

impl TryFrom<String> for CssColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CssColor> for String {
    fn from(color: CssColor) -> Self {
        color.0
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// CSS color keywords, sorted
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black", "blanchedalmond", "blue",
    "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse", "chocolate", "coral", "cornflowerblue",
    "cornsilk", "crimson", "currentcolor", "cyan", "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen",
    "darkgrey", "darkkhaki", "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen", "fuchsia",
    "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow", "grey", "honeydew", "hotpink",
    "indianred", "indigo", "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink",
    "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue",
    "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine", "mediumblue",
    "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite", "navy", "oldlace",
    "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise",
    "palevioletred", "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple",
    "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna",
    "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan", "teal",
    "thistle", "tomato", "transparent", "turquoise", "violet", "wheat", "white", "whitesmoke", "yellow",
    "yellowgreen",
];

fn is_named_color(value: &str) -> bool {
    NAMED_COLORS.binary_search(&value.to_ascii_lowercase().as_str()).is_ok()
}

fn is_functional_color(value: &str) -> bool {
    let Some(arguments) = ["rgba(", "rgb(", "hsla(", "hsl("].iter().find_map(|prefix| value.strip_prefix(*prefix))
    else {
        return false;
    };
    let Some(arguments) = arguments.strip_suffix(')') else {
        return false;
    };
    !arguments.trim().is_empty()
        && arguments.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ' ' | '%' | '-' | '/'))
}

/// Errors that can occur when parsing colors
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid css color '{0}'")]
    Invalid(String),
}
