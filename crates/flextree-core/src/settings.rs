//! Tunable constants of the layout engine.

use crate::constraints::smallest_minimum;
use crate::snap::{NEARBY_RADIUS, SNAP_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default universal resize floor in canvas pixels.
pub const RESIZE_FLOOR: f64 = 20.0;

/// Errors from loading engine settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Thresholds used by snapping and resizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Distance within which a guide engages.
    pub snap_threshold: f64,
    /// Only siblings with centers this close are considered; `None` considers all.
    pub nearby_radius: Option<f64>,
    /// Smallest size a raw resize may produce before category limits apply.
    pub resize_floor: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD,
            nearby_radius: Some(NEARBY_RADIUS),
            resize_floor: RESIZE_FLOOR,
        }
    }
}

impl EngineSettings {
    /// Tolerance for matching a sibling's width or height.
    pub fn size_snap_tolerance(&self) -> f64 {
        self.snap_threshold * 2.0
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if !self.snap_threshold.is_finite() || self.snap_threshold <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "snapThreshold must be positive, got {}",
                self.snap_threshold
            )));
        }
        let max_floor = smallest_minimum() as f64;
        if !(1.0..=max_floor).contains(&self.resize_floor) {
            return Err(SettingsError::Invalid(format!(
                "resizeFloor must be between 1 and {max_floor}, got {}",
                self.resize_floor
            )));
        }
        if let Some(radius) = self.nearby_radius {
            if radius.is_nan() || radius < self.snap_threshold {
                return Err(SettingsError::Invalid(format!(
                    "nearbyRadius ({radius}) must not be smaller than snapThreshold ({})",
                    self.snap_threshold
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        if let Err(e) = settings.validate() {
            log::warn!("Rejected engine settings: {e}");
            return Err(e);
        }
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::debug!("Loaded engine settings from {}", path.display());
        Ok(settings)
    }
}
