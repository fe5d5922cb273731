use image::io::Reader as ImageReader;

/// Inspect a generated icon PNG and report whether the expected visual
/// structure is present: clipped corners, opaque purple gradient, and a bright
/// sparkle at the center.
fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/images/app_icon.png".to_string());

    let img = ImageReader::open(&path)
        .expect("Failed to open image")
        .decode()
        .expect("Failed to decode image");

    let rgba_img = img.to_rgba8();
    let width = img.width();
    let height = img.height();

    println!("Checking icon: {path}");
    println!("Image dimensions: {width}x{height}");

    let mut passed = 0;
    let mut total = 0;

    // Corners must be clipped by the rounded-rectangle mask
    total += 1;
    let corners = [
        (0, 0),
        (width - 1, 0),
        (0, height - 1),
        (width - 1, height - 1),
    ];
    let clipped = corners
        .iter()
        .filter(|&&(x, y)| rgba_img.get_pixel(x, y)[3] == 0)
        .count();
    println!("\nCorner transparency: {clipped}/4 corners fully transparent");
    if clipped == 4 {
        passed += 1;
    }

    // Center must be opaque and bright (the sparkle star sits there)
    total += 1;
    let center = rgba_img.get_pixel(width / 2, height / 2);
    println!(
        "Center pixel: RGBA [{}, {}, {}, {}]",
        center[0], center[1], center[2], center[3]
    );
    if center[3] == 255 && center[0] > 180 {
        passed += 1;
    }

    // Gradient: sample the top and bottom rows away from any decoration and
    // check the purple hue (blue dominant over green, red in between)
    total += 1;
    let top = rgba_img.get_pixel(width / 2, 0);
    let bottom = rgba_img.get_pixel(width / 2, height - 1);
    let purple = |p: &image::Rgba<u8>| p[2] > p[1] && p[0] > p[1];
    println!(
        "Top row:    RGBA [{}, {}, {}, {}]",
        top[0], top[1], top[2], top[3]
    );
    println!(
        "Bottom row: RGBA [{}, {}, {}, {}]",
        bottom[0], bottom[1], bottom[2], bottom[3]
    );
    let brightens = bottom[0] > top[0] && bottom[1] > top[1] && bottom[2] > top[2];
    if purple(top) && purple(bottom) && brightens {
        passed += 1;
    }

    println!("\n{passed} of {total} checks passed");
    if passed == total {
        println!("✓ Icon looks as expected");
    } else {
        println!("⚠ Icon may not have been generated correctly");
    }
}
