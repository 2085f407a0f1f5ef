//! One-shot droplet analysis.
//!
//! Stages run strictly forward: image → contour → bounding extent →
//! physical dimensions → surface tension. Nothing is retained between
//! calls, so a single [`Analyzer`] can be shared across threads.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tensiometer_common::{Contour, DropletDimensions, MeasurementInputs};

use crate::config::AnalysisConfig;
use crate::detection::{ContourBackend, ContourDetector};
use crate::error::Result;
use crate::geometry;
use crate::ingest::RawImage;
use crate::tension::{self, TensionEstimate, MEASUREMENT_FAILED};

/// Full record of a successful measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub image_width: u32,
    pub image_height: u32,
    pub inputs: MeasurementInputs,
    pub contour_points: usize,
    pub dimensions: DropletDimensions,
    pub tension: TensionEstimate,
    pub message: String,
}

/// Measurement together with the contour it was taken from
#[derive(Debug, Clone)]
pub struct Traced {
    pub measurement: Measurement,
    pub contour: Contour,
}

#[derive(Debug)]
pub struct Analyzer {
    config: AnalysisConfig,
    detector: ContourDetector,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            detector: ContourDetector::new(config.detector),
            config,
        }
    }

    pub fn with_backend<B: ContourBackend + 'static>(config: AnalysisConfig, backend: B) -> Self {
        Self {
            detector: ContourDetector::with_backend(config.detector, backend),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the pipeline and return the formatted result
    pub fn analyze(&self, image: &RawImage, pipet_input: &str, density_input: &str) -> Result<String> {
        let inputs = MeasurementInputs::parse(pipet_input, density_input);
        Ok(self.measure(image, &inputs)?.message)
    }

    /// Like [`Analyzer::analyze`] but always yields the text to show the user
    pub fn analyze_or_message(&self, image: &RawImage, pipet_input: &str, density_input: &str) -> String {
        match self.analyze(image, pipet_input, density_input) {
            Ok(message) => message,
            Err(e) => {
                warn!("Droplet measurement failed: {}", e);
                MEASUREMENT_FAILED.to_string()
            }
        }
    }

    pub fn measure(&self, image: &RawImage, inputs: &MeasurementInputs) -> Result<Measurement> {
        Ok(self.trace(image, inputs)?.measurement)
    }

    /// Measure and keep the selected contour for overlays and exports
    pub fn trace(&self, image: &RawImage, inputs: &MeasurementInputs) -> Result<Traced> {
        let contour = self.detector.detect(image)?;
        let measurement = self.measure_contour(&contour, image.width(), image.height(), inputs)?;
        Ok(Traced { measurement, contour })
    }

    /// Geometry and tension stages for an already selected contour
    pub fn measure_contour(
        &self,
        contour: &Contour,
        image_width: u32,
        image_height: u32,
        inputs: &MeasurementInputs,
    ) -> Result<Measurement> {
        let dimensions = geometry::droplet_dimensions_with_fallback(
            contour,
            image_width,
            image_height,
            inputs.pipet_diameter_mm,
            self.config.fallback_scale_mm_per_px,
        )?;

        let density = inputs.density_or(self.config.default_density_kg_m3);
        let tension = tension::estimate(&dimensions, density);
        let message = tension.message();
        debug!("{} (rho = {} kg/m³)", message, density);

        Ok(Measurement {
            image_width,
            image_height,
            inputs: *inputs,
            contour_points: contour.point_count(),
            dimensions,
            tension,
            message,
        })
    }
}

/// Analyze with the default configuration
pub fn analyze(image: &RawImage, pipet_input: &str, density_input: &str) -> Result<String> {
    Analyzer::default().analyze(image, pipet_input, density_input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeasurementError;
    use image::{GrayImage, Luma};
    use tensiometer_common::NormalizedPoint;

    #[test]
    fn test_featureless_frame_fails() {
        let raw = RawImage::from_gray(GrayImage::from_pixel(50, 50, Luma([200]))).unwrap();
        let analyzer = Analyzer::default();

        assert!(matches!(
            analyzer.analyze(&raw, "1.0", "1000"),
            Err(MeasurementError::NoContourFound)
        ));
        assert_eq!(analyzer.analyze_or_message(&raw, "1.0", "1000"), "Measurement failed");
    }

    #[test]
    fn test_degenerate_contour_on_fallback_scale() {
        let contour = Contour::new(vec![NormalizedPoint::new(0.4, 0.6); 4]);
        let m = Analyzer::default()
            .measure_contour(&contour, 300, 200, &MeasurementInputs::parse("", ""))
            .unwrap();

        assert_eq!(m.message, "Surface Tension: 0.0 mN/m");
        assert_eq!(m.contour_points, 4);
    }

    #[test]
    fn test_density_fallback_used() {
        let contour = Contour::new(vec![NormalizedPoint::new(0.0, 0.0), NormalizedPoint::new(0.5, 0.5)]);
        let analyzer = Analyzer::default();

        for density in ["", "abc", "0", "-12"] {
            let m = analyzer
                .measure_contour(&contour, 400, 300, &MeasurementInputs::parse("", density))
                .unwrap();
            assert_eq!(m.tension.density_kg_m3, 1000.0);
            assert_eq!(m.dimensions.scale_mm_per_px, 0.01);
        }
    }

    #[test]
    fn test_configured_defaults_apply() {
        let config = AnalysisConfig {
            default_density_kg_m3: 800.0,
            fallback_scale_mm_per_px: 0.02,
            ..AnalysisConfig::default()
        };
        let contour = Contour::new(vec![NormalizedPoint::new(0.0, 0.0), NormalizedPoint::new(0.5, 0.25)]);
        let m = Analyzer::new(config)
            .measure_contour(&contour, 200, 200, &MeasurementInputs::default())
            .unwrap();

        assert_eq!(m.tension.density_kg_m3, 800.0);
        assert!((m.dimensions.width_mm - 2.0).abs() < 1e-12);
        assert!((m.dimensions.height_mm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_analyzer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }
}
