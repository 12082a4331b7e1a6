//! Raster primitives on top of `image::RgbaImage`.
//!
//! Shapes are rasterised by pixel centre with no antialiasing and write their
//! color straight into the canvas, alpha included. Layers are combined with
//! [`composite`], a straight-alpha source-over.

use crate::models::Rect;
use image::{GrayImage, Luma, Rgba, RgbaImage};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A fillable outline. Boxes are inclusive, like the draw calls that produce them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Rect(Rect),
    RoundedRect(Rect, i32),
    Ellipse(Rect),
}

impl Shape {
    fn bounds(&self) -> Rect {
        match *self {
            Shape::Rect(r) | Shape::RoundedRect(r, _) | Shape::Ellipse(r) => r,
        }
    }

    /// Whether the centre of pixel `(x, y)` falls inside the shape.
    fn covers(&self, x: i32, y: i32) -> bool {
        let b = self.bounds();
        if x < b.x0 || x > b.x1 || y < b.y0 || y > b.y1 {
            return false;
        }
        // Continuous extent of the box: an inclusive pixel range [x0, x1] spans x0..x1 + 1.
        let (left, top) = (b.x0 as f32, b.y0 as f32);
        let (right, bottom) = ((b.x1 + 1) as f32, (b.y1 + 1) as f32);
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

        match *self {
            Shape::Rect(_) => true,
            Shape::RoundedRect(_, radius) => {
                let r = (radius as f32)
                    .min((right - left) / 2.0)
                    .min((bottom - top) / 2.0)
                    .max(0.0);
                let qx = px.clamp(left + r, right - r);
                let qy = py.clamp(top + r, bottom - r);
                let (dx, dy) = (px - qx, py - qy);
                dx * dx + dy * dy <= r * r
            }
            Shape::Ellipse(_) => {
                let (rx, ry) = ((right - left) / 2.0, (bottom - top) / 2.0);
                let dx = (px - (left + rx)) / rx;
                let dy = (py - (top + ry)) / ry;
                dx * dx + dy * dy <= 1.0
            }
        }
    }
}

/// Paint every pixel the shape covers with `color`, replacing what was there.
/// Parts outside the canvas are skipped.
pub fn fill(canvas: &mut RgbaImage, shape: Shape, color: Rgba<u8>) {
    let b = shape.bounds();
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    for y in b.y0.max(0)..=b.y1.min(h - 1) {
        for x in b.x0.max(0)..=b.x1.min(w - 1) {
            if shape.covers(x, y) {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Radial gradient mask: 0 at the centre pixel and `sqrt(2) * distance` on a
/// 256 pixel reference grid, rescaled to `size`. It saturates at 255 only
/// towards the corners, so the edge midpoints sit near 181.
pub fn radial_mask(size: u32) -> GrayImage {
    let c = (size / 2) as f32;
    let grid = 256.0 / size as f32;
    GrayImage::from_fn(size, size, |x, y| {
        let (dx, dy) = (x as f32 - c, y as f32 - c);
        let d = ((dx * dx + dy * dy) * 2.0).sqrt() * grid;
        Luma([d.min(255.0) as u8])
    })
}

/// Per-channel interpolation from `a` (mask 0) to `b` (mask 255).
pub fn mix(a: Rgba<u8>, b: Rgba<u8>, mask: u8) -> Rgba<u8> {
    let m = u32::from(mask);
    Rgba(std::array::from_fn(|i| {
        ((u32::from(a[i]) * (255 - m) + u32::from(b[i]) * m + 127) / 255) as u8
    }))
}

/// A disc of the given diameter shaded from `inner` at the centre to `outer`
/// at the rim. Pixels outside the inscribed circle are fully transparent,
/// pixels inside carry `alpha`.
pub fn gradient_disc(diameter: u32, inner: Rgba<u8>, outer: Rgba<u8>, alpha: u8) -> RgbaImage {
    let mask = radial_mask(diameter);
    let last = diameter as i32 - 1;
    let circle = Shape::Ellipse(Rect::new(0, 0, last, last));
    RgbaImage::from_fn(diameter, diameter, |x, y| {
        if circle.covers(x as i32, y as i32) {
            let mut px = mix(inner, outer, mask.get_pixel(x, y)[0]);
            px[3] = alpha;
            px
        } else {
            TRANSPARENT
        }
    })
}

/// Source-over of a single pixel. Results are rounded, so an opaque
/// destination stays exactly opaque.
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }
    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0 * (1.0 - sa);
    let out_a = sa + da;
    if out_a <= 0.0 {
        return TRANSPARENT;
    }
    let channel = |i: usize| {
        ((f32::from(src[i]) * sa + f32::from(dst[i]) * da) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba([channel(0), channel(1), channel(2), (out_a * 255.0).round() as u8])
}

/// Composite `top` over `bottom` with its top-left corner at `(x, y)`.
/// Parts of `top` that fall outside `bottom` are dropped.
pub fn composite(bottom: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    let (bw, bh) = (i64::from(bottom.width()), i64::from(bottom.height()));
    for (tx, ty, src) in top.enumerate_pixels() {
        let (bx, by) = (x + i64::from(tx), y + i64::from(ty));
        if bx < 0 || by < 0 || bx >= bw || by >= bh {
            continue;
        }
        let dst = bottom.get_pixel_mut(bx as u32, by as u32);
        *dst = over(*dst, *src);
    }
}

/// Rotate `img` by `degrees` counter-clockwise about its centre, keeping its
/// size. Exposed areas are transparent; sampling is bicubic on premultiplied
/// color so transparent neighbours do not darken the edges.
pub fn rotate_about_center(img: &RgbaImage, degrees: f32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
    let (sin, cos) = degrees.to_radians().sin_cos();

    RgbaImage::from_fn(w, h, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let sx = cos * dx - sin * dy + cx;
        let sy = sin * dx + cos * dy + cy;
        sample_bicubic(img, sx - 0.5, sy - 0.5)
    })
}

fn cubic_weight(t: f32) -> f32 {
    const A: f32 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}

/// Sample at continuous pixel-index coordinates. Out-of-bounds taps are transparent.
fn sample_bicubic(img: &RgbaImage, fx: f32, fy: f32) -> Rgba<u8> {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let (ix, iy) = (fx.floor() as i64, fy.floor() as i64);
    if ix + 2 < 0 || iy + 2 < 0 || ix - 1 >= w || iy - 1 >= h {
        return TRANSPARENT;
    }
    let (tx, ty) = (fx - ix as f32, fy - iy as f32);

    let mut acc = [0.0f32; 4];
    for j in -1..=2 {
        let py = iy + j;
        if py < 0 || py >= h {
            continue;
        }
        let wy = cubic_weight(j as f32 - ty);
        for i in -1..=2 {
            let px = ix + i;
            if px < 0 || px >= w {
                continue;
            }
            let weight = wy * cubic_weight(i as f32 - tx);
            let p = img.get_pixel(px as u32, py as u32);
            let a = f32::from(p[3]);
            acc[0] += weight * f32::from(p[0]) * a;
            acc[1] += weight * f32::from(p[1]) * a;
            acc[2] += weight * f32::from(p[2]) * a;
            acc[3] += weight * a;
        }
    }

    let alpha = acc[3].round().clamp(0.0, 255.0);
    if alpha <= 0.0 {
        return TRANSPARENT;
    }
    let channel = |c: f32| (c / acc[3]).round().clamp(0.0, 255.0) as u8;
    Rgba([channel(acc[0]), channel(acc[1]), channel(acc[2]), alpha as u8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

    fn inside_inscribed_circle(d: u32, x: u32, y: u32) -> bool {
        let r = d as f32 / 2.0;
        let (dx, dy) = (x as f32 + 0.5 - r, y as f32 + 0.5 - r);
        dx * dx + dy * dy <= r * r
    }

    #[test]
    fn rect_fill_is_inclusive_and_clipped() {
        let mut canvas = RgbaImage::new(8, 8);
        fill(&mut canvas, Shape::Rect(Rect::new(5, 5, 20, 6)), RED);

        assert_eq!(*canvas.get_pixel(5, 5), RED);
        assert_eq!(*canvas.get_pixel(7, 6), RED);
        assert_eq!(*canvas.get_pixel(7, 7), TRANSPARENT);
        assert_eq!(*canvas.get_pixel(4, 5), TRANSPARENT);
    }

    #[test]
    fn shapes_fully_off_canvas_draw_nothing() {
        let mut canvas = RgbaImage::new(4, 4);
        fill(&mut canvas, Shape::Ellipse(Rect::new(-20, -20, -10, -10)), RED);
        fill(&mut canvas, Shape::Rect(Rect::new(10, 0, 12, 3)), RED);
        assert!(canvas.pixels().all(|p| *p == TRANSPARENT));
    }

    #[test]
    fn rounded_rect_cuts_corners() {
        let mut canvas = RgbaImage::new(40, 20);
        fill(&mut canvas, Shape::RoundedRect(Rect::new(0, 0, 39, 19), 10), RED);

        assert_eq!(*canvas.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(*canvas.get_pixel(39, 19), TRANSPARENT);
        assert_eq!(*canvas.get_pixel(0, 10), RED);
        assert_eq!(*canvas.get_pixel(20, 0), RED);
    }

    #[test]
    fn oversized_radius_is_clamped() {
        let mut canvas = RgbaImage::new(10, 4);
        fill(&mut canvas, Shape::RoundedRect(Rect::new(0, 0, 9, 3), 50), RED);
        assert_eq!(*canvas.get_pixel(5, 2), RED);
        assert_eq!(*canvas.get_pixel(0, 0), TRANSPARENT);
    }

    #[test]
    fn translucent_fill_replaces_pixels() {
        let mut canvas = RgbaImage::from_pixel(2, 2, GREEN);
        let glass = Rgba([255, 255, 255, 34]);
        fill(&mut canvas, Shape::Rect(Rect::new(0, 0, 0, 0)), glass);

        assert_eq!(*canvas.get_pixel(0, 0), glass);
        assert_eq!(*canvas.get_pixel(1, 1), GREEN);
    }

    #[test]
    fn over_mixes_translucent_source() {
        let p = over(GREEN, Rgba([255, 0, 0, 128]));
        assert_eq!(p[3], 255);
        assert!(p[0] > 100 && p[1] > 100, "expected a red/green mix, got {p:?}");

        assert_eq!(over(GREEN, TRANSPARENT), GREEN);
        assert_eq!(over(TRANSPARENT, Rgba([1, 2, 3, 90])), Rgba([1, 2, 3, 90]));
    }

    #[test]
    fn over_keeps_opaque_destination_opaque() {
        for a in 1..=255u8 {
            assert_eq!(over(GREEN, Rgba([200, 10, 40, a]))[3], 255, "source alpha {a}");
        }
    }

    #[test]
    fn radial_mask_grows_from_centre() {
        let mask = radial_mask(64);
        assert_eq!(mask.get_pixel(32, 32)[0], 0);
        assert_eq!(mask.get_pixel(0, 32)[0], 181);
        assert_eq!(mask.get_pixel(0, 0)[0], 255);
        assert!(mask.get_pixel(40, 32)[0] < mask.get_pixel(50, 32)[0]);
    }

    #[test]
    fn radial_mask_saturates_only_towards_corners() {
        let mask = radial_mask(256);
        assert_eq!(mask.get_pixel(128, 128)[0], 0);
        assert_eq!(mask.get_pixel(0, 128)[0], 181);
        assert_eq!(mask.get_pixel(64, 128)[0], 90);
        assert_eq!(mask.get_pixel(96, 96)[0], 64);
        assert_eq!(mask.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn ember_disc_rim_stays_short_of_outer() {
        let orange = Rgba([0xF9, 0x73, 0x16, 0xFF]);
        let disc = gradient_disc(125, Rgba([0xEF, 0x44, 0x44, 0xFF]), orange, 255);
        let rim = *disc.get_pixel(1, 62);
        assert_eq!(rim[3], 255);
        // About 70% of the way from inner green (0x44) to outer green (0x73).
        assert!(rim[1] > 0x60 && rim[1] < 0x70, "rim {rim:?}");
        assert!(rim != orange);
    }

    #[test]
    fn mix_hits_both_ends() {
        assert_eq!(mix(RED, GREEN, 0), RED);
        assert_eq!(mix(RED, GREEN, 255), GREEN);
        assert_eq!(mix(RED, GREEN, 128), Rgba([127, 128, 0, 255]));
    }

    #[test]
    fn gradient_disc_clips_to_circle() {
        for d in [1, 2, 3, 7, 16, 33, 64, 119, 125] {
            let disc = gradient_disc(d, RED, GREEN, 200);
            assert_eq!(disc.dimensions(), (d, d));

            for (x, y, p) in disc.enumerate_pixels() {
                if inside_inscribed_circle(d, x, y) {
                    assert_eq!(p[3], 200, "d={d} ({x}, {y}) should be inside");
                } else {
                    assert_eq!(p[3], 0, "d={d} ({x}, {y}) should be clipped");
                }
            }
        }
    }

    #[test]
    fn gradient_disc_centre_is_inner_color() {
        for d in 1..=64 {
            let disc = gradient_disc(d, RED, GREEN, 255);
            assert_eq!(*disc.get_pixel(d / 2, d / 2), RED, "d={d}");
        }
    }

    #[test]
    fn gradient_disc_rim_leans_outer() {
        let disc = gradient_disc(101, RED, GREEN, 255);
        let rim = disc.get_pixel(1, 50);
        assert!(rim[1] > rim[0], "rim should be mostly green, got {rim:?}");
    }

    #[test]
    fn empty_disc_is_empty() {
        let disc = gradient_disc(0, RED, GREEN, 255);
        assert_eq!(disc.dimensions(), (0, 0));
    }

    #[test]
    fn composite_respects_offset() {
        let mut bottom = RgbaImage::from_pixel(4, 4, GREEN);
        let top = RgbaImage::from_pixel(2, 2, RED);
        composite(&mut bottom, &top, 3, -1);

        assert_eq!(*bottom.get_pixel(3, 0), RED);
        assert_eq!(*bottom.get_pixel(3, 1), GREEN);
        assert_eq!(*bottom.get_pixel(2, 0), GREEN);
    }

    #[test]
    fn blur_softens_an_edge() {
        let mut img = RgbaImage::new(32, 32);
        fill(&mut img, Shape::Rect(Rect::new(8, 8, 23, 23)), RED);
        let blurred = image::imageops::blur(&img, 2.0);

        assert_eq!(blurred.dimensions(), (32, 32));
        let edge = blurred.get_pixel(7, 16)[3];
        assert!(edge > 0 && edge < 255, "edge alpha {edge}");
        assert_eq!(blurred.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let mut img = RgbaImage::new(16, 16);
        fill(&mut img, Shape::Ellipse(Rect::new(2, 3, 12, 9)), RED);
        fill(&mut img, Shape::Rect(Rect::new(4, 4, 6, 14)), Rgba([10, 20, 30, 140]));

        assert_eq!(rotate_about_center(&img, 0.0), img);
    }

    #[test]
    fn rotation_exposes_transparent_corners() {
        let img = RgbaImage::from_pixel(64, 64, RED);
        let rotated = rotate_about_center(&img, 12.0);

        assert_eq!(rotated.dimensions(), (64, 64));
        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            assert_eq!(rotated.get_pixel(x, y)[3], 0, "corner ({x}, {y})");
        }
        assert_eq!(*rotated.get_pixel(32, 32), RED);
    }

    #[test]
    fn rotation_is_counter_clockwise() {
        // A bar to the right of the centre should swing upwards.
        let mut img = RgbaImage::new(64, 64);
        fill(&mut img, Shape::Rect(Rect::new(33, 31, 63, 32)), RED);
        let rotated = rotate_about_center(&img, 30.0);

        assert!(rotated.get_pixel(56, 18)[3] > 128);
        assert_eq!(rotated.get_pixel(56, 45)[3], 0);
    }
}
