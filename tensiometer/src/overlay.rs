// Debug visualization of the selected droplet contour

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use tensiometer_common::{BoundingExtent, Contour};

const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const EXTENT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Copy of `source` with the contour in green and its extent in red
pub fn draw_overlay(source: &RgbImage, contour: &Contour, extent: &BoundingExtent) -> RgbImage {
    let mut canvas = source.clone();
    let (width, height) = canvas.dimensions();

    let n = contour.points.len();
    for i in 0..n {
        let (x1, y1) = contour.points[i].to_pixel(width, height);
        let (x2, y2) = contour.points[(i + 1) % n].to_pixel(width, height);
        draw_line_segment_mut(
            &mut canvas,
            (x1 as f32, y1 as f32),
            (x2 as f32, y2 as f32),
            CONTOUR_COLOR,
        );
    }

    let left = (extent.min_x * width as f64).round() as i32;
    let top = (extent.min_y * height as f64).round() as i32;
    let (w_px, h_px) = extent.pixel_size(width, height);
    // hollow rect spans of_size pixels, so add one to cover the max edge
    let rect = Rect::at(left, top).of_size(w_px.round() as u32 + 1, h_px.round() as u32 + 1);
    draw_hollow_rect_mut(&mut canvas, rect, EXTENT_COLOR);

    canvas
}
