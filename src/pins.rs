use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Drawing units per millimetre (96 dpi)
pub const MM_TO_PIX: f64 = 3.7795275591;

/// Distance between two header pins, in millimetres
pub const PIN_SPACING_MM: f64 = 2.54;

/// Horizontal center of the pin header, in millimetres
const HEADER_CENTER_MM: f64 = 50.0;

/// Vertical position of the pin header, in millimetres
const HEADER_Y_MM: f64 = 50.0;

/// The connectors of the element, in header order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, IntoStaticStr, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PinName {
    Gnd,
    Vcc,
    Din,
    Dout,
}

impl PinName {
    /// Offset from the header center, in pin spacings
    fn offset(self) -> f64 {
        match self {
            Self::Gnd => -1.5,
            Self::Vcc => -0.5,
            Self::Din => 0.5,
            Self::Dout => 1.5,
        }
    }

    fn signals(self) -> Vec<PinSignal> {
        match self {
            Self::Gnd | Self::Vcc => vec![PinSignal::Power { signal: self }],
            // Data pins are left for the host to interpret.
            Self::Din | Self::Dout => Vec::new(),
        }
    }
}

/// The role a pin plays for the host
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PinSignal {
    Power { signal: PinName },
}

/// A connection point the host can attach wires to
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementPin {
    pub name: PinName,
    pub x: f64,
    pub y: f64,
    pub signals: Vec<PinSignal>,
}

/// The four connectors of the star, positioned in drawing units
pub fn pin_info() -> Vec<ElementPin> {
    let pitch = PIN_SPACING_MM * MM_TO_PIX;
    let cx = HEADER_CENTER_MM * MM_TO_PIX;
    let y = HEADER_Y_MM * MM_TO_PIX;
    PinName::iter()
        .map(|name| ElementPin { name, x: cx + name.offset() * pitch, y, signals: name.signals() })
        .collect()
}
