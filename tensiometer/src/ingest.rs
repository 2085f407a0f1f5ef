// Image ingestion
// Turns a camera frame or file into the grayscale buffer the detector works on

use image::{DynamicImage, GrayImage, RgbImage};
use log::debug;
use std::path::Path;

use crate::error::{MeasurementError, Result};

/// A decoded still image, borrowed by the pipeline for one analysis
#[derive(Debug, Clone)]
pub struct RawImage {
    gray: GrayImage,
    color: RgbImage,
}

impl RawImage {
    /// Decode an encoded image (PNG, JPEG, ...) from memory
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(MeasurementError::DecodeFailure("input image data is empty".into()));
        }
        let image = image::load_from_memory(bytes)?;
        Self::from_dynamic(image)
    }

    /// Read and decode an image file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| {
            MeasurementError::DecodeFailure(format!("{}: {}", path.display(), e))
        })?;
        Self::from_dynamic(image)
    }

    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        check_dimensions(image.width(), image.height())?;
        debug!("Ingested {}x{} frame ({:?})", image.width(), image.height(), image.color());

        Ok(Self {
            gray: image.to_luma8(),
            color: image.to_rgb8(),
        })
    }

    pub fn from_gray(gray: GrayImage) -> Result<Self> {
        check_dimensions(gray.width(), gray.height())?;
        let color = DynamicImage::ImageLuma8(gray.clone()).to_rgb8();
        Ok(Self { gray, color })
    }

    pub fn width(&self) -> u32 {
        self.gray.width()
    }

    pub fn height(&self) -> u32 {
        self.gray.height()
    }

    pub fn gray(&self) -> &GrayImage {
        &self.gray
    }

    pub fn color(&self) -> &RgbImage {
        &self.color
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(MeasurementError::DecodeFailure(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }
    Ok(())
}
