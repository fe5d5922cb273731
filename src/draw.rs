//! Raster drawing primitives for the icon generator
//!
//! Everything here operates directly on an `RgbaImage` canvas. Shapes are
//! composited with source-over alpha blending; the rounded-rectangle mask is
//! the one exception, which replaces the alpha channel outright to clip the
//! corners.

use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Composite a single pixel onto the canvas with source-over blending.
/// Out-of-bounds coordinates are ignored.
pub fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }

    let dst = img.get_pixel_mut(x as u32, y as u32);
    let src_a = color[3] as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    for c in 0..3 {
        let blended = (color[c] as f32 * src_a + dst[c] as f32 * dst_a * (1.0 - src_a)) / out_a;
        dst[c] = blended.round() as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// Draw a filled circle centered at `(cx, cy)` with a one-pixel anti-aliased
/// edge. The coverage at the edge scales the source alpha.
pub fn fill_circle(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let min_x = (cx - radius - 1.0).floor() as i64;
    let max_x = (cx + radius + 1.0).ceil() as i64;
    let min_y = (cy - radius - 1.0).floor() as i64;
    let max_y = (cy + radius + 1.0).ceil() as i64;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let distance = (dx * dx + dy * dy).sqrt();

            let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let alpha = (color[3] as f32 * coverage) as u8;
                blend_pixel(img, x, y, Rgba([color[0], color[1], color[2], alpha]));
            }
        }
    }
}

/// Draw a circle outline of the given stroke width, centered on the radius.
pub fn stroke_circle(
    img: &mut RgbaImage,
    cx: f32,
    cy: f32,
    radius: f32,
    width: f32,
    color: Rgba<u8>,
) {
    let outer = radius + width / 2.0;
    let min_x = (cx - outer - 1.0).floor() as i64;
    let max_x = (cx + outer + 1.0).ceil() as i64;
    let min_y = (cy - outer - 1.0).floor() as i64;
    let max_y = (cy + outer + 1.0).ceil() as i64;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let distance = (dx * dx + dy * dy).sqrt();

            let coverage = (width / 2.0 + 0.5 - (distance - radius).abs()).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let alpha = (color[3] as f32 * coverage) as u8;
                blend_pixel(img, x, y, Rgba([color[0], color[1], color[2], alpha]));
            }
        }
    }
}

/// Fill a closed polygon with even-odd scanline rasterization. Vertices are
/// given in order; the closing edge back to the first vertex is implied.
pub fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }

    let min_y = points
        .iter()
        .map(|p| p.1)
        .fold(f32::INFINITY, f32::min)
        .floor()
        .max(0.0) as i64;
    let max_y = points
        .iter()
        .map(|p| p.1)
        .fold(f32::NEG_INFINITY, f32::max)
        .ceil()
        .min(img.height() as f32) as i64;

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());

    for y in min_y..max_y {
        let scan_y = y as f32 + 0.5;
        crossings.clear();

        for i in 0..points.len() {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % points.len()];
            // Half-open interval so shared vertices count once
            if (y0 <= scan_y && scan_y < y1) || (y1 <= scan_y && scan_y < y0) {
                crossings.push(x0 + (scan_y - y0) / (y1 - y0) * (x1 - x0));
            }
        }

        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap());

        for pair in crossings.chunks_exact(2) {
            let start = pair[0].round().max(0.0) as i64;
            let end = pair[1].round().min(img.width() as f32) as i64;
            for x in start..end {
                blend_pixel(img, x, y, color);
            }
        }
    }
}

/// Build a rounded-rectangle alpha mask covering the full canvas, opaque
/// everywhere except the four clipped corners. A one-pixel anti-aliased band
/// softens each corner arc.
pub fn rounded_rect_mask(size: u32, corner_radius: u32) -> GrayImage {
    let mut mask = GrayImage::from_pixel(size, size, Luma([255]));
    if corner_radius == 0 {
        return mask;
    }

    let r = corner_radius as f32;
    let far = size as f32 - r;

    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            // Nearest corner-arc center, if this pixel lies in a corner square
            let cx = if px < r {
                r
            } else if px > far {
                far
            } else {
                continue;
            };
            let cy = if py < r {
                r
            } else if py > far {
                far
            } else {
                continue;
            };

            let dx = px - cx;
            let dy = py - cy;
            let distance = (dx * dx + dy * dy).sqrt();

            let value = if distance <= r - 1.0 {
                255
            } else if distance < r {
                ((r - distance) * 255.0) as u8
            } else {
                0
            };
            mask.put_pixel(x, y, Luma([value]));
        }
    }

    mask
}

/// Replace the canvas alpha channel with the mask. This clips rather than
/// blends: fully masked pixels become fully transparent regardless of what was
/// drawn there.
pub fn apply_alpha_mask(img: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(img.dimensions(), mask.dimensions());

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        pixel[3] = mask.get_pixel(x, y)[0];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_pixel_over_opaque_stays_opaque() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([100, 0, 0, 255]));

        blend_pixel(&mut img, 1, 1, Rgba([255, 255, 255, 128]));

        let pixel = img.get_pixel(1, 1);
        assert_eq!(pixel[3], 255, "alpha must stay opaque under source-over");
        assert!(pixel[0] > 100, "red channel should move toward white");
        assert!(pixel[1] > 0, "green channel should move toward white");
    }

    #[test]
    fn test_blend_pixel_out_of_bounds_is_ignored() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        blend_pixel(&mut img, -1, 0, Rgba([255, 255, 255, 255]));
        blend_pixel(&mut img, 0, 5, Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_fill_circle_covers_center_not_corners() {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        fill_circle(&mut img, 10.0, 10.0, 5.0, Rgba([255, 255, 255, 255]));

        assert_eq!(*img.get_pixel(10, 10), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(19, 19), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_stroke_circle_leaves_interior_untouched() {
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
        stroke_circle(&mut img, 20.0, 20.0, 15.0, 3.0, Rgba([255, 255, 255, 255]));

        // On the ring
        assert!(img.get_pixel(35, 20)[0] > 200);
        // Well inside the ring
        assert_eq!(*img.get_pixel(20, 20), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_fill_polygon_square() {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let square = [(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)];
        fill_polygon(&mut img, &square, Rgba([255, 255, 255, 255]));

        assert_eq!(*img.get_pixel(10, 10), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(2, 2), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(18, 10), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_fill_polygon_degenerate_is_noop() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        fill_polygon(
            &mut img,
            &[(1.0, 1.0), (2.0, 2.0)],
            Rgba([255, 255, 255, 255]),
        );
        assert_eq!(*img.get_pixel(1, 1), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_rounded_rect_mask_corners_and_center() {
        let mask = rounded_rect_mask(100, 20);

        assert_eq!(mask.get_pixel(0, 0)[0], 0);
        assert_eq!(mask.get_pixel(99, 0)[0], 0);
        assert_eq!(mask.get_pixel(0, 99)[0], 0);
        assert_eq!(mask.get_pixel(99, 99)[0], 0);
        assert_eq!(mask.get_pixel(50, 50)[0], 255);
        // Edge midpoints are outside the corner squares
        assert_eq!(mask.get_pixel(50, 0)[0], 255);
        assert_eq!(mask.get_pixel(0, 50)[0], 255);
    }

    #[test]
    fn test_rounded_rect_mask_zero_radius_is_fully_opaque() {
        let mask = rounded_rect_mask(8, 0);
        assert!(mask.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_apply_alpha_mask_replaces_alpha() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([50, 60, 70, 255]));
        let mask = rounded_rect_mask(10, 2);
        apply_alpha_mask(&mut img, &mask);

        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(5, 5)[3], 255);
        // Color channels untouched
        assert_eq!(img.get_pixel(0, 0)[0], 50);
    }
}
