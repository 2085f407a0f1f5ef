// Surface tension estimate
// Simplified linear model: gamma = rho * g * de * h, not a Young-Laplace fit

use serde::{Deserialize, Serialize};
use tensiometer_common::{DropletDimensions, GRAVITY_M_S2};

/// Literal shown to the user whenever the measurement cannot be completed
pub const MEASUREMENT_FAILED: &str = "Measurement failed";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensionEstimate {
    pub newtons_per_meter: f64,
    pub millinewtons_per_meter: f64,
    pub density_kg_m3: f64,
}

impl TensionEstimate {
    pub fn message(&self) -> String {
        format_tension(self.millinewtons_per_meter)
    }
}

/// Surface tension in N/m from the droplet size in millimeters
pub fn surface_tension_n_per_m(width_mm: f64, height_mm: f64, density_kg_m3: f64) -> f64 {
    let de = width_mm / 1000.0;
    let h = height_mm / 1000.0;
    density_kg_m3 * GRAVITY_M_S2 * de * h
}

pub fn estimate(dims: &DropletDimensions, density_kg_m3: f64) -> TensionEstimate {
    let newtons_per_meter = surface_tension_n_per_m(dims.width_mm, dims.height_mm, density_kg_m3);
    TensionEstimate {
        newtons_per_meter,
        millinewtons_per_meter: newtons_per_meter * 1000.0,
        density_kg_m3,
    }
}

pub fn format_tension(millinewtons_per_meter: f64) -> String {
    format!("Surface Tension: {:.1} mN/m", millinewtons_per_meter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensiometer_common::{BoundingExtent, DEFAULT_DENSITY_KG_M3};

    fn dims(width_mm: f64, height_mm: f64) -> DropletDimensions {
        DropletDimensions {
            width_mm,
            height_mm,
            scale_mm_per_px: 0.01,
            extent: BoundingExtent {
                min_x: 0.0,
                max_x: 0.0,
                min_y: 0.0,
                max_y: 0.0,
            },
        }
    }

    #[test]
    fn test_reference_values() {
        let n_per_m = surface_tension_n_per_m(2.0, 1.5, DEFAULT_DENSITY_KG_M3);
        assert!((n_per_m - 0.029430).abs() < 1e-12);

        let est = estimate(&dims(2.0, 1.5), DEFAULT_DENSITY_KG_M3);
        assert_eq!(est.message(), "Surface Tension: 29.4 mN/m");
    }

    #[test]
    fn test_zero_geometry_formats_zero() {
        let est = estimate(&dims(0.0, 0.0), DEFAULT_DENSITY_KG_M3);
        assert_eq!(est.newtons_per_meter, 0.0);
        assert_eq!(est.message(), "Surface Tension: 0.0 mN/m");
    }

    #[test]
    fn test_density_scales_linearly() {
        let water = estimate(&dims(3.0, 2.0), 1000.0);
        let mercury = estimate(&dims(3.0, 2.0), 13534.0);
        let ratio = mercury.newtons_per_meter / water.newtons_per_meter;
        assert!((ratio - 13.534).abs() < 1e-9);
    }

    #[test]
    fn test_format_one_decimal() {
        assert_eq!(format_tension(72.8349), "Surface Tension: 72.8 mN/m");
        assert_eq!(format_tension(5.0), "Surface Tension: 5.0 mN/m");
    }
}
