use crate::color::CssColor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Properties of a star element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
pub struct StarConfig {
    /// How many of the laid out cells are wired up
    pub pixels: usize,

    /// Distance between pixels.
    ///
    /// The layout is fixed, so this value is stored but doesn't move any cell.
    pub pixel_spacing: f32,

    /// Background color of the element
    #[cfg_attr(feature = "json-schema", schemars(with = "String"))]
    pub background: CssColor,

    /// Whether the element runs its built-in color animation
    pub animation: bool,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self { pixels: 16, pixel_spacing: 0.0, background: CssColor::default(), animation: false }
    }
}

impl StarConfig {
    /// Parse a configuration from YAML
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pixels == 0 {
            return Err(ConfigError::InvalidPixelCount);
        }
        if !self.pixel_spacing.is_finite() || self.pixel_spacing < 0.0 {
            return Err(ConfigError::InvalidPixelSpacing(self.pixel_spacing));
        }
        Ok(())
    }
}

/// Errors that can occur when loading a configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("pixel count must be at least 1")]
    InvalidPixelCount,

    #[error("invalid pixel spacing {0}")]
    InvalidPixelSpacing(f32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = StarConfig::from_yaml("{}").expect("failed to parse");
        assert_eq!(config, StarConfig::default());
        assert_eq!(config.pixels, 16);
        assert_eq!(config.background.as_str(), "#363");
        assert!(!config.animation);
    }

    #[test]
    fn camel_case_keys() {
        let content = "
pixels: 180
pixelSpacing: 2.5
background: '#123456'
animation: true
";
        let config = StarConfig::from_yaml(content).expect("failed to parse");
        assert_eq!(config.pixels, 180);
        assert_eq!(config.pixel_spacing, 2.5);
        assert_eq!(config.background.as_str(), "#123456");
        assert!(config.animation);
    }

    #[test]
    fn invalid_background() {
        let result = StarConfig::from_yaml("background: 'url(x)'");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn unknown_key() {
        assert!(matches!(StarConfig::from_yaml("radius: 3"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn zero_pixels() {
        assert!(matches!(StarConfig::from_yaml("pixels: 0"), Err(ConfigError::InvalidPixelCount)));
    }

    #[test]
    fn negative_spacing() {
        assert!(matches!(StarConfig::from_yaml("pixelSpacing: -1"), Err(ConfigError::InvalidPixelSpacing(_))));
    }

    #[test]
    fn load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create file");
        file.write_all(b"pixels: 3\nanimation: true\n").expect("failed to write");
        let config = StarConfig::load(file.path()).expect("failed to load");
        assert_eq!(config.pixels, 3);
        assert!(config.animation);
    }

    #[test]
    fn story_config() {
        let config = StarConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/story.yaml")).expect("failed to load");
        assert_eq!(config.pixels, 180);
        assert!(config.animation);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(StarConfig::load("/nonexistent/star.yaml"), Err(ConfigError::Io(_))));
    }
}
