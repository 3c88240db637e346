//! Hand scaling and rotation about a pivot
//!
//! Coordinates are screen coordinates (y grows downward). A positive angle
//! turns a hand clockwise as seen on screen:
//!
//! ```text
//! x' = x·cosθ − y·sinθ
//! y' = x·sinθ + y·cosθ
//! ```
//!
//! which is also the matrix `tiny_skia::Transform::from_rotate` builds.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tiny_skia::{ColorU8, FilterQuality, Pixmap, PixmapPaint, Transform};

use super::element::ClockElement;
use super::geometry::{ElementOffset, PivotSpec};
use crate::config::clock as consts;

/// Desired hand length in pixels.
pub fn target_length(element: ClockElement, radius: f32, scale_override: f32) -> f32 {
    radius * element.base_scale_factor() * scale_override
}

/// Pure geometry of one scaled and rotated hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandGeometry {
    pub scaled_width: u32,
    pub scaled_height: u32,
    /// Pivot in scaled, unrotated coordinates.
    pub pivot: (f32, f32),
    pub angle: f32,
    /// Floored top-left of the rotated bounding box, relative to the scaled image.
    pub min_corner: (f32, f32),
    pub rotated_width: u32,
    pub rotated_height: u32,
    /// Pivot inside the rotated, expanded image.
    pub rotated_pivot: (f32, f32),
}

impl HandGeometry {
    pub fn compute(source: (u32, u32), target_length: f32, pivot: PivotSpec, angle: f32) -> Self {
        let (src_w, src_h) = source;
        let longest = src_w.max(src_h).max(1) as f32;
        let factor = target_length / longest;
        let scaled_width = ((src_w as f32 * factor).round() as u32).max(1);
        let scaled_height = ((src_h as f32 * factor).round() as u32).max(1);
        let pivot_point = pivot.resolve(scaled_width, scaled_height);

        let (w, h) = (scaled_width as f32, scaled_height as f32);
        let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for corner in corners {
            let (x, y) = rotate_about(corner, pivot_point, angle);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let min_corner = (min_x.floor(), min_y.floor());
        let rotated_width = ((max_x.ceil() - min_corner.0) as u32).max(1);
        let rotated_height = ((max_y.ceil() - min_corner.1) as u32).max(1);

        Self {
            scaled_width,
            scaled_height,
            pivot: pivot_point,
            angle,
            min_corner,
            rotated_width,
            rotated_height,
            rotated_pivot: (pivot_point.0 - min_corner.0, pivot_point.1 - min_corner.1),
        }
    }

    /// Where a point of the scaled, unrotated hand lands in the rotated image.
    pub fn map_local(&self, point: (f32, f32)) -> (f32, f32) {
        let (x, y) = rotate_about(point, self.pivot, self.angle);
        (x - self.min_corner.0, y - self.min_corner.1)
    }

    /// Top-left position that puts the pivot on `anchor`.
    pub fn top_left(&self, anchor: (f32, f32)) -> (f32, f32) {
        (anchor.0 - self.rotated_pivot.0, anchor.1 - self.rotated_pivot.1)
    }

    /// Pivot that keeps the hand where `offset` currently displays it, once
    /// the offset is reset to zero.
    pub fn baked_pivot(&self, offset: ElementOffset) -> PivotSpec {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let (dx, dy) = (offset.dx as f32, offset.dy as f32);
        let local_x = -dx * cos - dy * sin;
        let local_y = dx * sin - dy * cos;

        let clamp = |v: f32| v.clamp(consts::MIN_BAKED_RATIO, consts::MAX_BAKED_RATIO);
        PivotSpec::Ratio(
            clamp((self.pivot.0 + local_x) / self.scaled_width as f32),
            clamp((self.pivot.1 + local_y) / self.scaled_height as f32),
        )
    }
}

fn rotate_about(point: (f32, f32), pivot: (f32, f32), angle: f32) -> (f32, f32) {
    let (sin, cos) = angle.to_radians().sin_cos();
    let (x, y) = (point.0 - pivot.0, point.1 - pivot.1);
    (pivot.0 + x * cos - y * sin, pivot.1 + x * sin + y * cos)
}

/// A rasterized hand with the geometry used to produce it.
#[derive(Debug, Clone)]
pub struct TransformedHand {
    pub image: RgbaImage,
    pub geometry: HandGeometry,
}

impl TransformedHand {
    pub fn top_left(&self, anchor: (f32, f32)) -> (f32, f32) {
        self.geometry.top_left(anchor)
    }
}

/// Scale `source` so its longest side is `length`, then rotate it.
///
/// Returns `None` only when the rotated canvas cannot be allocated.
pub fn transform_hand(source: &RgbaImage, length: f32, pivot: PivotSpec, angle: f32) -> Option<TransformedHand> {
    let geometry = HandGeometry::compute(source.dimensions(), length, pivot, angle);
    let image = rotate_hand(source, &geometry)?;
    Some(TransformedHand { image, geometry })
}

/// Rasterize `source` per `geometry` onto a transparent, expanded canvas.
pub fn rotate_hand(source: &RgbaImage, geometry: &HandGeometry) -> Option<RgbaImage> {
    let (w, h) = (geometry.scaled_width, geometry.scaled_height);
    let scaled;
    let scaled_ref = if source.dimensions() == (w, h) {
        source
    } else {
        scaled = imageops::resize(source, w, h, FilterType::Lanczos3);
        &scaled
    };

    let mut src = Pixmap::new(w, h)?;
    for (dst, px) in src.pixels_mut().iter_mut().zip(scaled_ref.pixels()) {
        let [r, g, b, a] = px.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    let mut out = Pixmap::new(geometry.rotated_width, geometry.rotated_height)?;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    let transform = Transform::from_rotate_at(geometry.angle, geometry.pivot.0, geometry.pivot.1)
        .post_translate(-geometry.min_corner.0, -geometry.min_corner.1);
    out.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);

    let mut image = RgbaImage::new(geometry.rotated_width, geometry.rotated_height);
    for (dst, px) in image.pixels_mut().zip(out.pixels()) {
        let c = px.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Some(image)
}
