//! Raster transparency via color-keying.
//!
//! The fallback path for transparent PNG/WEBP output: render with solid
//! colors first, then knock out every sufficiently light pixel. This is
//! color-keying, not semantic transparency: any pixel brighter than the
//! threshold on all three channels becomes transparent, whether or not it
//! was part of the intended background. The behavior is part of the output
//! contract and must not be replaced with alpha compositing.

use image::RgbaImage;

/// Brightness threshold per channel. A pixel is keyed out only when R, G and
/// B are each strictly greater than this value; a channel at exactly 240
/// keeps the pixel opaque.
pub const KEY_THRESHOLD: u8 = 240;

/// Zeroes the alpha of every pixel whose R, G and B all exceed
/// [`KEY_THRESHOLD`]. All other pixels are untouched. Never fails.
pub fn key_out_light_pixels(mut image: RgbaImage) -> RgbaImage {
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r > KEY_THRESHOLD && g > KEY_THRESHOLD && b > KEY_THRESHOLD {
            pixel.0[3] = 0;
        }
    }
    image
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn white_pixels_become_transparent() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let keyed = key_out_light_pixels(image);
        assert_eq!(keyed.get_pixel(0, 0).0, [255, 255, 255, 0]);
    }

    #[test]
    fn black_pixels_are_untouched() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let keyed = key_out_light_pixels(image);
        assert_eq!(keyed.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        let at_threshold = key_out_light_pixels(RgbaImage::from_pixel(
            1,
            1,
            Rgba([240, 240, 240, 255]),
        ));
        assert_eq!(
            at_threshold.get_pixel(0, 0).0[3],
            255,
            "exactly 240 stays opaque"
        );

        let above_threshold = key_out_light_pixels(RgbaImage::from_pixel(
            1,
            1,
            Rgba([241, 241, 241, 255]),
        ));
        assert_eq!(above_threshold.get_pixel(0, 0).0[3], 0, "241 is keyed out");
    }

    #[test]
    fn all_channels_must_exceed_the_threshold() {
        // A light-but-yellow pixel: blue stays below the threshold.
        let keyed = key_out_light_pixels(RgbaImage::from_pixel(
            1,
            1,
            Rgba([255, 255, 120, 255]),
        ));
        assert_eq!(keyed.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn mixed_image_only_keys_light_pixels() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        image.put_pixel(1, 0, Rgba([10, 10, 10, 255]));

        let keyed = key_out_light_pixels(image);
        assert_eq!(keyed.get_pixel(0, 0).0[3], 0);
        assert_eq!(keyed.get_pixel(1, 0).0, [10, 10, 10, 255]);
    }

    #[test]
    fn non_alpha_channels_are_preserved() {
        let keyed = key_out_light_pixels(RgbaImage::from_pixel(
            1,
            1,
            Rgba([250, 245, 241, 200]),
        ));
        // Only alpha changes; the color stays for straight-alpha consumers.
        assert_eq!(keyed.get_pixel(0, 0).0, [250, 245, 241, 0]);
    }
}
