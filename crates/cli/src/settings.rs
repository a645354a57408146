use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use face_overlay_core::overlay::domain::overlay_style::{Color, FillMode, OverlayStyle};
use face_overlay_core::shared::constants::{
    DEFAULT_CONFIDENCE, DEFAULT_OUTLINE_THICKNESS, DEFAULT_OVERLAY_COLOR, MAX_OUTLINE_THICKNESS,
};
use face_overlay_core::shared::display_surface::SurfaceMeasurement;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("confidence must be between 0.0 and 1.0, got {0}")]
    Confidence(f32),
    #[error("outline thickness must be between 1 and {max}, got {0}", max = MAX_OUTLINE_THICKNESS)]
    OutlineThickness(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxStyle {
    Fill,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub confidence: f32,
    pub color: [u8; 4],
    pub box_style: BoxStyle,
    pub outline_thickness: u32,
    pub surface_measurement: SurfaceMeasurement,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            color: DEFAULT_OVERLAY_COLOR,
            box_style: BoxStyle::Fill,
            outline_thickness: DEFAULT_OUTLINE_THICKNESS,
            surface_measurement: SurfaceMeasurement::Independent,
        }
    }
}

impl Settings {
    /// `<config_dir>/FaceOverlay/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("FaceOverlay").join("settings.json"))
    }

    /// Loads settings from an explicit file, which must exist and parse, or
    /// from the default location, where a missing or broken file falls back
    /// to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let Some(path) = Self::default_path().filter(|p| p.exists()) else {
            return Ok(Self::default());
        };
        match Self::load_from(&path) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                log::warn!("Ignoring settings file: {e}");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(SettingsError::Confidence(self.confidence));
        }
        if self.box_style == BoxStyle::Outline
            && !(1..=MAX_OUTLINE_THICKNESS).contains(&self.outline_thickness)
        {
            return Err(SettingsError::OutlineThickness(self.outline_thickness));
        }
        Ok(())
    }

    pub fn overlay_style(&self) -> OverlayStyle {
        let fill = match self.box_style {
            BoxStyle::Fill => FillMode::Fill,
            BoxStyle::Outline => FillMode::Outline {
                thickness: self.outline_thickness,
            },
        };
        OverlayStyle::default()
            .with_color(Color(self.color))
            .with_fill(fill)
    }
}
