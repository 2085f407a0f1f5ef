//! Synthetic pendant-drop renderer
//!
//! Draws a pipette tip hanging from the top edge of the frame with a droplet
//! attached to it, as a flat two-tone silhouette:
//! - Pipette: filled rectangle, `pipette_width` wide, from row 0 down to `pipette_length`
//! - Droplet: filled ellipse centred at (`center_x`, `center_y`) with radii `droplet_rx`, `droplet_ry`
//!
//! The geometry is known exactly, which makes the images usable as test fixtures
//! for the measurement pipeline.

use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

/// Intensity of the lit backdrop
pub const BACKGROUND_LEVEL: u8 = 235;
/// Intensity of the liquid and pipette silhouette
pub const SUBJECT_LEVEL: u8 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropSpec {
    pub width: u32,
    pub height: u32,
    pub pipette_width: u32,
    pub pipette_length: u32,
    pub droplet_rx: u32,
    pub droplet_ry: u32,
    pub center_x: u32,
    pub center_y: u32,
    /// Dark silhouette on a light backdrop (the usual shadowgraph setup)
    pub dark_on_light: bool,
}

impl Default for DropSpec {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            pipette_width: 40,
            pipette_length: 150,
            droplet_rx: 60,
            droplet_ry: 70,
            center_x: 200,
            center_y: 210,
            dark_on_light: true,
        }
    }
}

impl DropSpec {
    /// A droplet with no pipette in frame
    pub fn droplet_only(width: u32, height: u32, rx: u32, ry: u32) -> Self {
        Self {
            width,
            height,
            pipette_width: 0,
            pipette_length: 0,
            droplet_rx: rx,
            droplet_ry: ry,
            center_x: width / 2,
            center_y: height / 2,
            dark_on_light: true,
        }
    }

    /// Pixel extent of the silhouette as (min_x, max_x, min_y, max_y), inclusive
    pub fn silhouette_extent(&self) -> (u32, u32, u32, u32) {
        let mut min_x = self.center_x.saturating_sub(self.droplet_rx);
        let mut max_x = self.center_x + self.droplet_rx;
        let mut min_y = self.center_y.saturating_sub(self.droplet_ry);
        let max_y = self.center_y + self.droplet_ry;

        if self.has_pipette() {
            let (left, right) = self.pipette_columns();
            min_x = min_x.min(left);
            max_x = max_x.max(right);
            min_y = 0;
        }

        (min_x, max_x, min_y, max_y)
    }

    fn has_pipette(&self) -> bool {
        self.pipette_width > 0 && self.pipette_length > 0
    }

    fn pipette_columns(&self) -> (u32, u32) {
        let left = self.center_x.saturating_sub(self.pipette_width / 2);
        (left, left + self.pipette_width - 1)
    }

    fn levels(&self) -> (u8, u8) {
        if self.dark_on_light {
            (BACKGROUND_LEVEL, SUBJECT_LEVEL)
        } else {
            (SUBJECT_LEVEL, BACKGROUND_LEVEL)
        }
    }
}

/// Render the silhouette described by `spec`
pub fn render(spec: &DropSpec) -> GrayImage {
    let (background, subject) = spec.levels();
    let mut img = GrayImage::from_pixel(spec.width, spec.height, Luma([background]));

    if spec.has_pipette() {
        let (left, _) = spec.pipette_columns();
        draw_filled_rect_mut(
            &mut img,
            Rect::at(left as i32, 0).of_size(spec.pipette_width, spec.pipette_length),
            Luma([subject]),
        );
    }

    draw_filled_ellipse_mut(
        &mut img,
        (spec.center_x as i32, spec.center_y as i32),
        spec.droplet_rx as i32,
        spec.droplet_ry as i32,
        Luma([subject]),
    );

    img
}

/// A frame with no features at all
pub fn uniform(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([value]))
}
