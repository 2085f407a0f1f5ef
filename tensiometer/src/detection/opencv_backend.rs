// OpenCV border following with RETR_EXTERNAL, only outer borders are returned

use image::GrayImage;
use opencv::{
    core::{Mat, Point, Vector},
    imgproc::{find_contours, CHAIN_APPROX_NONE, RETR_EXTERNAL},
    prelude::*,
};

use super::{BackendError, ContourBackend};

/// Outer borders via `cv::findContours`
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCvBackend;

impl ContourBackend for OpenCvBackend {
    fn name(&self) -> &'static str {
        "opencv"
    }

    fn find_top_level(&self, binary: &GrayImage) -> Result<Vec<Vec<(u32, u32)>>, BackendError> {
        trace_external(binary).map_err(|e| BackendError {
            backend: "opencv",
            message: e.to_string(),
        })
    }
}

fn trace_external(binary: &GrayImage) -> opencv::Result<Vec<Vec<(u32, u32)>>> {
    let mat = Mat::from_slice(binary.as_raw())?;
    let mat = mat.reshape(1, binary.height() as i32)?.try_clone()?;

    let mut contours = Vector::<Vector<Point>>::new();
    find_contours(
        &mat,
        &mut contours,
        RETR_EXTERNAL,
        CHAIN_APPROX_NONE,
        Point::new(0, 0),
    )?;

    let mut borders = Vec::with_capacity(contours.len());
    for contour in contours.iter() {
        borders.push(
            contour
                .iter()
                .map(|pt| (pt.x.max(0) as u32, pt.y.max(0) as u32))
                .collect(),
        );
    }

    Ok(borders)
}
