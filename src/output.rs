//! Image output: gamma correction and PNG export.

use image::{ImageBuffer, Rgb, RgbImage};
use log::info;

/// Convert the linear-light buffer to 8-bit with the render gamma and
/// write it out as PNG.
pub fn save_image_as_png(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    gamma: f32,
) -> image::ImageResult<()> {
    let exponent = 1.0 / gamma;
    let u8_image: RgbImage = ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([
            to_8bit(pixel[0], exponent),
            to_8bit(pixel[1], exponent),
            to_8bit(pixel[2], exponent),
        ])
    });

    u8_image.save(output_path)?;
    info!("Image saved as {}", output_path);
    Ok(())
}

/// Clamp to [0, 1], apply the gamma exponent, scale to [0, 255].
fn to_8bit(channel: f32, exponent: f32) -> u8 {
    (channel.clamp(0.0, 1.0).powf(exponent) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_clamps_and_applies_gamma() {
        // gamma 2 halves the exponent: 0.25^0.5 = 0.5
        assert_eq!(to_8bit(0.25, 0.5), 128);
        assert_eq!(to_8bit(-1.0, 0.5), 0);
        assert_eq!(to_8bit(7.5, 0.5), 255);
        assert_eq!(to_8bit(1.0, 1.0), 255);
        assert_eq!(to_8bit(0.0, 1.0), 0);
    }
}
