use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    raster::{Color, Resample},
};

/// Main configuration for the KalaKini Booth
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Strip appearance (geometry is fixed and not configurable)
    pub strip: StripConfig,

    /// Capture handling
    pub capture: CaptureConfig,

    /// Live overlay settings
    pub overlay: OverlayConfig,

    /// Download settings
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.strip.validate()?;
        self.capture.validate()?;
        self.overlay.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Strip appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Fill behind and around every photo
    pub background: Color,

    /// Outline drawn around each photo slot
    pub border_color: Color,

    /// Branding line near the bottom of the strip
    pub caption: String,

    pub caption_color: Color,

    /// Caption font size in pixels
    pub caption_size: f32,

    /// Filter used to scale photos into their slots
    pub resample: Resample,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            border_color: Color::CORAL,
            caption: "✨ KalaKini Booth ✨".to_string(),
            caption_color: Color::CORAL,
            caption_size: 20.0,
            resample: Resample::Lanczos3,
        }
    }
}

impl StripConfig {
    fn validate(&self) -> Result<()> {
        if !(6.0..=96.0).contains(&self.caption_size) {
            return Err(ConfigError::InvalidValue {
                key: "strip.caption_size".to_string(),
                value: self.caption_size.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Capture handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// JPEG quality (1-100) of the intermediate capture encoding
    pub jpeg_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { jpeg_quality: 95 }
    }
}

impl CaptureConfig {
    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::InvalidValue {
                key: "capture.jpeg_quality".to_string(),
                value: self.jpeg_quality.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Live overlay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// How often the driver advances the animator (milliseconds)
    pub tick_ms: u64,

    /// Fixed RNG seed for reproducible particle placement
    pub seed: Option<u64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            seed: None,
        }
    }
}

impl OverlayConfig {
    fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "overlay.tick_ms".to_string(),
                value: self.tick_ms.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory strips are written into
    pub directory: PathBuf,

    /// Prefix of generated file names
    pub filename_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            filename_prefix: "kalakini-booth".to_string(),
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        let prefix = &self.filename_prefix;
        if prefix.is_empty() || prefix.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                key: "output.filename_prefix".to_string(),
                value: prefix.clone()
            }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.overlay.seed = Some(42);
        original_config.strip.border_color = Color::rgb(1, 2, 3);

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(loaded_config.strip.border_color, Color::rgb(1, 2, 3));
        assert_eq!(loaded_config.strip.caption, original_config.strip.caption);
        assert_eq!(loaded_config.capture.jpeg_quality, 95);
        assert_eq!(loaded_config.overlay.seed, Some(42));
        assert_eq!(loaded_config.output.filename_prefix, "kalakini-booth");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[strip]\nborder_color = \"#000000\"\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.strip.border_color, Color::BLACK);
        assert_eq!(config.strip.background, Color::WHITE);
        assert_eq!(config.overlay.tick_ms, 16);
    }

    #[test]
    fn test_bad_color_fails_to_parse() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.toml");
        std::fs::write(&file_path, "[strip]\nborder_color = \"coral\"\n").unwrap();

        assert!(Config::from_file(&file_path).is_err());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::default();
        config.capture.jpeg_quality = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.overlay.tick_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.filename_prefix = "a/b".to_string();
        assert!(config.validate().is_err());

        for size in [0.0, 4.0, 200.0, f32::NAN] {
            let mut config = Config::default();
            config.strip.caption_size = size;
            assert!(config.validate().is_err(), "caption size {}", size);
        }
    }
}
