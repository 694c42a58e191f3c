//! Configuration for floorview
//!
//! Paths, the affine mapping and overlay colors are read once at startup.
//! View state (pan/zoom) is never persisted.

use std::path::PathBuf;

use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::iced::Color;
use serde::{Deserialize, Serialize};

use crate::domain::AffineParams;
use crate::error::ConfigError;

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl OverlayColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl From<OverlayColor> for Color {
    fn from(c: OverlayColor) -> Self {
        Color::from_rgb(c.r, c.g, c.b)
    }
}

/// Raw affine mapping as stored on disk; validated by [`FloorviewConfig::affine_params`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineConfig {
    /// CAD origin x
    pub x0: f64,
    /// CAD origin y
    pub y0: f64,
    /// Pixels per CAD unit
    pub scale: f64,
    /// Screen margin, x
    pub offset_x: f64,
    /// Screen margin, y
    pub offset_y: f64,
}

impl Default for AffineConfig {
    fn default() -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            scale: 20.0,
            offset_x: 50.0,
            offset_y: 50.0,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, CosmicConfigEntry)]
#[version = 1]
pub struct FloorviewConfig {
    /// Background floorplan image
    pub floorplan_path: PathBuf,
    /// Route document, watched for changes
    pub route_path: PathBuf,
    /// CAD to pixel mapping
    pub affine: AffineConfig,
    /// Path polyline color
    #[serde(default = "default_path_color")]
    pub path_color: OverlayColor,
    /// Current-position marker fill
    #[serde(default = "default_current_color")]
    pub current_color: OverlayColor,
    /// Node marker fill
    #[serde(default = "default_node_color")]
    pub node_color: OverlayColor,
}

fn default_path_color() -> OverlayColor {
    OverlayColor::rgb(1.0, 1.0, 0.0) // Yellow
}

fn default_current_color() -> OverlayColor {
    OverlayColor::rgb(1.0, 0.0, 0.0) // Red
}

fn default_node_color() -> OverlayColor {
    // #2e7d32
    OverlayColor::rgb(0.18, 0.49, 0.196)
}

impl FloorviewConfig {
    /// Configuration ID for cosmic-config
    pub const ID: &'static str = "io.github.floorview.Floorview";

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match cosmic_config::Config::new(Self::ID, Self::VERSION) {
            Ok(config) => match Self::get_entry(&config) {
                Ok(entry) => entry,
                Err((errs, entry)) => {
                    log::warn!("Error loading config, using defaults: {:?}", errs);
                    entry
                }
            },
            Err(err) => {
                log::warn!("Could not create config handler: {:?}", err);
                Self::default()
            }
        }
    }

    /// Validated affine parameters
    pub fn affine_params(&self) -> Result<AffineParams, ConfigError> {
        let a = &self.affine;
        AffineParams::new(a.x0, a.y0, a.scale, a.offset_x, a.offset_y)
    }
}

impl Default for FloorviewConfig {
    fn default() -> Self {
        Self {
            // Files are looked up in the working directory
            floorplan_path: PathBuf::from("floorplan.png"),
            route_path: PathBuf::from("route.json"),
            affine: AffineConfig::default(),
            path_color: default_path_color(),
            current_color: default_current_color(),
            node_color: default_node_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CadPoint, PixelPoint};

    #[test]
    fn test_default_affine_is_valid() {
        let params = FloorviewConfig::default().affine_params().unwrap();
        assert_eq!(params.map(CadPoint::new(1.0, 1.0)), PixelPoint::new(70.0, 30.0));
    }

    #[test]
    fn test_non_positive_scale_is_rejected() {
        let mut config = FloorviewConfig::default();
        config.affine.scale = 0.0;
        assert!(matches!(
            config.affine_params(),
            Err(ConfigError::NonPositiveScale(_))
        ));

        config.affine.scale = -20.0;
        assert!(config.affine_params().is_err());
    }

    #[test]
    fn test_color_conversion() {
        let c: Color = default_current_color().into();
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 0.0, 0.0, 1.0));
        let node: Color = default_node_color().into();
        assert_eq!((node.r, node.g, node.b), (0.18, 0.49, 0.196));
    }
}
