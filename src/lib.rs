//! A star-shaped arrangement of addressable LED pixels for hardware simulators.
//!
//! [`NeopixelStar`] renders a fixed star layout of 180 pixel cells as SVG, lets the
//! host paint individual pixels as it decodes the LED data line, exposes the
//! element's connectors and can run a built-in color animation driven by the
//! host's redraw loop.

pub mod animation;
pub mod color;
pub mod config;
pub mod layout;
pub mod pins;
pub mod render;
mod widget;

pub use animation::{FrameHandle, FrameQueue, FrameScheduler, PollableState, StopSignal};
pub use color::{CssColor, Rgb};
pub use config::{ConfigError, StarConfig};
pub use layout::{LayoutError, StarLayout};
pub use pins::{pin_info, ElementPin, PinName, PinSignal};
pub use widget::NeopixelStar;
