use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tensiometer_common::{DEFAULT_DENSITY_KG_M3, FALLBACK_SCALE_MM_PER_PX};

use crate::detection::DetectorConfig;
use crate::error::{MeasurementError, Result};

/// Everything an analysis run can be tuned with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub detector: DetectorConfig,
    /// Density used when the user leaves the field empty or invalid
    pub default_density_kg_m3: f64,
    /// Millimeters per pixel used without a pipette reference
    pub fallback_scale_mm_per_px: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            default_density_kg_m3: DEFAULT_DENSITY_KG_M3,
            fallback_scale_mm_per_px: FALLBACK_SCALE_MM_PER_PX,
        }
    }
}

impl AnalysisConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            MeasurementError::InvalidConfig(format!("{}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&text)?;
        debug!("Loaded analysis config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| MeasurementError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.detector.validate()?;
        for (name, value) in [
            ("default_density_kg_m3", self.default_density_kg_m3),
            ("fallback_scale_mm_per_px", self.fallback_scale_mm_per_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MeasurementError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
