use image::{Rgba, RgbaImage};

/// Composite the page buffer for display.
///
/// The background is drawn over white at the top-left corner without
/// scaling, then the page is multiplied onto it channel by channel, so white
/// ink lets the background show through and black ink stays black. Without a
/// background the page is returned unchanged.
pub fn composite(page: &RgbaImage, background: Option<&RgbaImage>) -> RgbaImage {
    let Some(background) = background else {
        return page.clone();
    };

    let mut out = RgbaImage::new(page.width(), page.height());
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let base = if x < background.width() && y < background.height() {
            over_white(*background.get_pixel(x, y))
        } else {
            [255, 255, 255]
        };
        let ink = page.get_pixel(x, y).0;
        let multiply = |b: u8, s: u8| ((u16::from(b) * u16::from(s) + 127) / 255) as u8;
        *pixel = Rgba([
            multiply(base[0], ink[0]),
            multiply(base[1], ink[1]),
            multiply(base[2], ink[2]),
            255,
        ]);
    }
    out
}

fn over_white(pixel: Rgba<u8>) -> [u8; 3] {
    let alpha = u16::from(pixel.0[3]);
    let channel = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
    [channel(pixel.0[0]), channel(pixel.0[1]), channel(pixel.0[2])]
}
