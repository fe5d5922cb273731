use crate::draw::{
    apply_alpha_mask, fill_circle, fill_polygon, rounded_rect_mask, stroke_circle,
};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::FilterType,
    ColorType, DynamicImage, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    f32::consts::PI,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Gradient color stops, top to bottom: royal purple, vibrant purple, soft
/// lavender.
pub const GRADIENT_STOPS: [[u8; 3]; 3] = [[123, 44, 191], [157, 78, 221], [199, 125, 255]];

/// Android launcher densities and their launcher icon pixel sizes.
pub const ANDROID_DENSITIES: [(&str, u32); 5] = [
    ("mdpi", 48),
    ("hdpi", 72),
    ("xhdpi", 96),
    ("xxhdpi", 144),
    ("xxxhdpi", 192),
];

/// Relative path of the full-resolution base icon.
pub const BASE_ICON_PATH: &str = "assets/images/app_icon.png";

/// Generate the icon raster at the given edge length.
///
/// The result is always exactly `size x size`. The procedure is deterministic:
/// a two-segment vertical gradient, a rounded-rectangle alpha clip, then the
/// decorative overlay pass (glow rings, core disc, sparkle star with inner
/// glow, corner dots).
pub fn generate(size: u32) -> RgbaImage {
    let mut img = RgbaImage::new(size, size);

    fill_gradient(&mut img);

    let mask = rounded_rect_mask(size, size / 5);
    apply_alpha_mask(&mut img, &mask);

    draw_decorations(&mut img);

    img
}

/// Fill every row with a color interpolated along the vertical axis: stops 0
/// to 1 over the top half, stops 1 to 2 over the bottom half.
fn fill_gradient(img: &mut RgbaImage) {
    let size = img.height();

    for y in 0..size {
        let ratio = y as f32 / size as f32;
        let (from, to, t) = if ratio < 0.5 {
            (GRADIENT_STOPS[0], GRADIENT_STOPS[1], ratio * 2.0)
        } else {
            (GRADIENT_STOPS[1], GRADIENT_STOPS[2], (ratio - 0.5) * 2.0)
        };

        let color = Rgba([
            lerp_channel(from[0], to[0], t),
            lerp_channel(from[1], to[1], t),
            lerp_channel(from[2], to[2], t),
            255,
        ]);

        for x in 0..img.width() {
            img.put_pixel(x, y, color);
        }
    }
}

// Truncating interpolation, one channel at a time
fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 * (1.0 - t) + to as f32 * t) as u8
}

/// Vertex set of the 8-point sparkle star: outer radius on even vertices,
/// inner radius on odd ones, at 45-degree steps.
pub fn star_points(cx: f32, cy: f32, outer: f32, inner: f32) -> Vec<(f32, f32)> {
    (0..8)
        .map(|i| {
            let angle = i as f32 * PI / 4.0;
            let radius = if i % 2 == 0 { outer } else { inner };
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

/// Composite the decorative overlays onto the clipped gradient canvas. All
/// shapes are centered on the image center except the four corner dots.
fn draw_decorations(img: &mut RgbaImage) {
    let size = img.width() as f32;
    let center = size / 2.0;

    // Outer glow: ten rings widening by 3px each, fading out
    let glow_radius = size * 0.4;
    for i in 0..10u32 {
        let alpha = (50 - i * 5) as u8;
        let offset = (i * 3) as f32;
        stroke_circle(
            img,
            center,
            center,
            glow_radius + offset,
            3.0,
            Rgba([255, 255, 255, alpha]),
        );
    }

    // Core disc with a lighter outline
    let disc_radius = size * 0.35;
    fill_circle(img, center, center, disc_radius, Rgba([255, 255, 255, 30]));
    stroke_circle(
        img,
        center,
        center,
        disc_radius,
        4.0,
        Rgba([255, 255, 255, 100]),
    );

    // Sparkle star
    let points = star_points(center, center, size * 0.2, size * 0.08);
    fill_polygon(img, &points, Rgba([255, 255, 255, 255]));

    // Inner glow: shifted gold copies of the star at decreasing opacity
    for i in 0..3u32 {
        let offset = (i * 2) as f32;
        let shifted: Vec<(f32, f32)> = points
            .iter()
            .enumerate()
            .map(|(idx, &(x, y))| {
                if idx % 2 == 0 {
                    (x - offset, y - offset)
                } else {
                    (x + offset, y + offset)
                }
            })
            .collect();
        let alpha = (150 - i * 30) as u8;
        fill_polygon(img, &shifted, Rgba([255, 215, 0, alpha]));
    }

    // Corner accent dots
    let inset = size * 0.1;
    let corners = [
        (inset, inset),
        (size - inset, inset),
        (inset, size - inset),
        (size - inset, size - inset),
    ];
    for (cx, cy) in corners {
        fill_circle(img, cx, cy, 15.0, Rgba([255, 255, 255, 80]));
    }
}

/// Generate the base icon and all Android density variants under `output`.
pub fn generate_icons(size: u32, output: &Path) -> Result<()> {
    println!("Generating app icon ({size}x{size})...");
    let base = generate(size);

    let base_path = output.join(BASE_ICON_PATH);
    save_png(&base, &base_path)?;
    println!("✓ Generated base icon: {}", base_path.display());

    let base = DynamicImage::ImageRgba8(base);
    for (density, target_size) in ANDROID_DENSITIES {
        let resized = base
            .resize_exact(target_size, target_size, FilterType::Lanczos3)
            .into_rgba8();
        let path = mipmap_path(output, density);
        save_png(&resized, &path)?;
        println!(
            "  ✓ Generated {density} icon ({target_size}x{target_size}): {}",
            path.display()
        );
    }

    println!("\n✅ All icons generated successfully!");
    Ok(())
}

/// Launcher icon path for one density bucket.
pub fn mipmap_path(output: &Path, density: &str) -> PathBuf {
    output
        .join("android")
        .join("app")
        .join("src")
        .join("main")
        .join("res")
        .join(format!("mipmap-{density}"))
        .join("ic_launcher.png")
}

// Encode as PNG with best compression and adaptive filtering
fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Can't create output directory {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let encoder =
        PngEncoder::new_with_quality(&mut writer, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .with_context(|| format!("Failed to encode PNG {}", path.display()))?;
    writer.flush()?;

    Ok(())
}
