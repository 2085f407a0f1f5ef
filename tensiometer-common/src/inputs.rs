use serde::{Deserialize, Serialize};

/// User-supplied measurement parameters
///
/// Both fields are optional. Absent values fall back to defaults at the
/// point of use (density to water, scale to the fixed fallback).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInputs {
    pub pipet_diameter_mm: Option<f64>,
    pub density_kg_m3: Option<f64>,
}

impl MeasurementInputs {
    pub fn new(pipet_diameter_mm: Option<f64>, density_kg_m3: Option<f64>) -> Self {
        Self {
            pipet_diameter_mm: pipet_diameter_mm.filter(|v| is_positive(*v)),
            density_kg_m3: density_kg_m3.filter(|v| is_positive(*v)),
        }
    }

    /// Parse the two text fields as typed by the user
    ///
    /// Never fails: empty, non-numeric or non-positive text becomes None.
    pub fn parse(pipet_diameter: &str, density: &str) -> Self {
        Self {
            pipet_diameter_mm: parse_positive(pipet_diameter),
            density_kg_m3: parse_positive(density),
        }
    }

    pub fn density_or(&self, default: f64) -> f64 {
        self.density_kg_m3.unwrap_or(default)
    }
}

/// Lenient parse of a strictly positive, finite real number
pub fn parse_positive(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| is_positive(*v))
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
