// Droplet contour detection
// Binarizes the frame with an Otsu threshold and follows the outer borders of
// the resulting blobs to find the droplet silhouette

use image::{GrayImage, Luma};
use imageproc::contours::find_contours;
use imageproc::contrast::otsu_level;
use imageproc::filter::gaussian_blur_f32;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use tensiometer_common::{Contour, NormalizedPoint, Polarity};
use thiserror::Error;

use crate::error::{MeasurementError, Result};
use crate::ingest::RawImage;

#[cfg(feature = "opencv")]
mod opencv_backend;
#[cfg(feature = "opencv")]
pub use opencv_backend::OpenCvBackend;

/// Contour detector settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Contrast multiplier applied around mid-grey before thresholding
    pub contrast_adjustment: f32,
    /// Subject is darker than the background
    pub dark_on_light: bool,
    /// Gaussian blur sigma in pixels, 0 disables the blur
    pub blur_sigma: f32,
    /// Smallest intensity range that still counts as having a subject
    pub min_contrast: u8,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            contrast_adjustment: 1.0,
            dark_on_light: true,
            blur_sigma: 1.0,
            min_contrast: 1,
        }
    }
}

impl DetectorConfig {
    pub fn polarity(&self) -> Polarity {
        Polarity::from_dark_on_light(self.dark_on_light)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.contrast_adjustment.is_finite() || self.contrast_adjustment <= 0.0 {
            return Err(MeasurementError::InvalidConfig(format!(
                "contrast_adjustment must be positive, got {}",
                self.contrast_adjustment
            )));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma < 0.0 {
            return Err(MeasurementError::InvalidConfig(format!(
                "blur_sigma must be zero or positive, got {}",
                self.blur_sigma
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("{backend} contour backend failed: {message}")]
pub struct BackendError {
    pub backend: &'static str,
    pub message: String,
}

/// Border-following implementation over a binary image
///
/// Non-zero pixels are foreground. Implementations return the pixel
/// points of every top-level (non-nested) border, in discovery order.
pub trait ContourBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn find_top_level(&self, binary: &GrayImage) -> std::result::Result<Vec<Vec<(u32, u32)>>, BackendError>;
}

/// Suzuki-Abe border following from imageproc
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageprocBackend;

impl ContourBackend for ImageprocBackend {
    fn name(&self) -> &'static str {
        "imageproc"
    }

    fn find_top_level(&self, binary: &GrayImage) -> std::result::Result<Vec<Vec<(u32, u32)>>, BackendError> {
        let contours = find_contours::<i32>(binary);

        let top_level = contours
            .into_iter()
            .filter(|c| c.parent.is_none())
            .map(|c| {
                c.points
                    .iter()
                    .map(|p| (p.x.max(0) as u32, p.y.max(0) as u32))
                    .collect()
            })
            .collect();

        Ok(top_level)
    }
}

/// Finds the droplet silhouette in a frame
pub struct ContourDetector {
    config: DetectorConfig,
    backend: Box<dyn ContourBackend>,
}

impl fmt::Debug for ContourDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContourDetector")
            .field("config", &self.config)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Default for ContourDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl ContourDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_backend(config, ImageprocBackend)
    }

    pub fn with_backend<B: ContourBackend + 'static>(config: DetectorConfig, backend: B) -> Self {
        Self {
            config,
            backend: Box::new(backend),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// All top-level contours of the frame, in normalized coordinates
    ///
    /// A featureless frame yields an empty list. Backend failures are
    /// logged and reported as `NoContourFound`.
    pub fn detect_all(&self, image: &RawImage) -> Result<Vec<Contour>> {
        let (width, height) = (image.width(), image.height());
        let prepared = preprocess(image.gray(), &self.config);

        let (lo, hi) = intensity_range(&prepared);
        if hi.saturating_sub(lo) < self.config.min_contrast {
            debug!("Frame is featureless (intensity {}..={}), no contours", lo, hi);
            return Ok(Vec::new());
        }

        let (binary, level) = binarize(&prepared, self.config.polarity());
        debug!(
            "Otsu level {} ({}), tracing borders with {} backend",
            level,
            self.config.polarity(),
            self.backend.name()
        );

        let borders = self.backend.find_top_level(&binary).map_err(|e| {
            warn!("Contour detection failed: {}", e);
            MeasurementError::NoContourFound
        })?;

        let contours: Vec<Contour> = borders
            .into_iter()
            .map(|points| {
                Contour::new(
                    points
                        .into_iter()
                        .map(|(x, y)| NormalizedPoint::from_pixel(x, y, width, height))
                        .collect(),
                )
            })
            .collect();

        debug!("Found {} top-level contour(s)", contours.len());
        Ok(contours)
    }

    /// The contour most likely to be the droplet
    pub fn detect(&self, image: &RawImage) -> Result<Contour> {
        let mut contours = self.detect_all(image)?;
        let idx = select_droplet(&contours).ok_or(MeasurementError::NoContourFound)?;
        debug!(
            "Selected contour {} with {} points",
            idx,
            contours[idx].point_count()
        );
        Ok(contours.swap_remove(idx))
    }
}

/// Index of the contour with the most points
///
/// Point count stands in for "largest boundary". Ties keep the earliest
/// contour.
pub fn select_droplet(contours: &[Contour]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for (idx, contour) in contours.iter().enumerate() {
        let count = contour.point_count();
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((idx, count)),
        }
    }

    best.map(|(idx, _)| idx)
}

/// Contrast stretch around mid-grey followed by an optional Gaussian blur
pub fn preprocess(gray: &GrayImage, config: &DetectorConfig) -> GrayImage {
    let mut adjusted = gray.clone();

    let k = config.contrast_adjustment;
    if (k - 1.0).abs() > f32::EPSILON {
        for p in adjusted.pixels_mut() {
            let v = (p[0] as f32 - 127.5) * k + 127.5;
            *p = Luma([v.round().clamp(0.0, 255.0) as u8]);
        }
    }

    if config.blur_sigma > 0.0 {
        gaussian_blur_f32(&adjusted, config.blur_sigma)
    } else {
        adjusted
    }
}

/// Global Otsu threshold. Foreground pixels become 255.
pub fn binarize(gray: &GrayImage, polarity: Polarity) -> (GrayImage, u8) {
    let level = otsu_level(gray);

    let binary = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        let foreground = match polarity {
            Polarity::DarkOnLight => v <= level,
            Polarity::LightOnDark => v > level,
        };
        if foreground {
            Luma([255])
        } else {
            Luma([0])
        }
    });

    (binary, level)
}

fn intensity_range(gray: &GrayImage) -> (u8, u8) {
    gray.pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])))
}
