//! Format adaptation: rendered artifact to response envelope.
//!
//! Converts a raster buffer or SVG markup into the `data`/`dataUrl` pair a
//! result carries. Raster containers hold the same base64 data URL under both
//! keys; the vector container keeps raw markup under `data` and its base64
//! wrapping under `dataUrl`.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use crate::encode::{EncodeError, parse_hex_color};
use crate::request::{OutputContainer, OutputFormat, RenderOptions};

/// Basename used when the caller proposes no filename.
pub const DEFAULT_BASENAME: &str = "qr-code";

// ============================================================================
// Artifact and Envelope
// ============================================================================

/// A rendered artifact before format adaptation.
#[derive(Debug, Clone)]
pub enum Artifact {
    /// An RGBA pixel buffer for the raster containers.
    Raster(RgbaImage),
    /// SVG markup text.
    Vector(String),
}

/// The adapter's output: the artifact fields of a successful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub data: String,
    pub data_url: String,
    pub format: OutputFormat,
}

/// Wraps a rendered artifact into the resolved container's envelope.
pub fn into_envelope(artifact: Artifact, options: &RenderOptions) -> Result<Envelope, EncodeError> {
    match artifact {
        Artifact::Raster(image) => {
            let bytes = encode_raster_bytes(&image, options)?;
            let url = data_url(options.output_container.mime_type(), &bytes);
            Ok(Envelope {
                data: url.clone(),
                data_url: url,
                format: options.output_container.format(),
            })
        }
        Artifact::Vector(markup) => {
            let url = data_url(OutputContainer::Svg.mime_type(), markup.as_bytes());
            Ok(Envelope {
                data: markup,
                data_url: url,
                format: OutputFormat::Svg,
            })
        }
    }
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

// ============================================================================
// Raster container encoding
// ============================================================================

/// Encodes an RGBA buffer into the container's byte format.
fn encode_raster_bytes(image: &RgbaImage, options: &RenderOptions) -> Result<Vec<u8>, EncodeError> {
    let mut cursor = Cursor::new(Vec::new());
    match options.output_container {
        OutputContainer::Jpeg => {
            // JPEG has no alpha channel: flatten onto the resolved light
            // color before encoding. The quality knob only exists here; the
            // WEBP encoder below is lossless.
            let background = parse_hex_color(&options.color.light)?;
            let flattened = flatten_onto(image, background);
            let quality = (options.quality * 100.0).round().clamp(1.0, 100.0) as u8;
            JpegEncoder::new_with_quality(&mut cursor, quality).encode_image(&flattened)?;
        }
        OutputContainer::Webp => {
            DynamicImage::ImageRgba8(image.clone()).write_to(&mut cursor, ImageFormat::WebP)?;
        }
        // Vector containers never reach the raster encoder; PNG doubles as
        // the fallback container.
        OutputContainer::Png | OutputContainer::Svg => {
            DynamicImage::ImageRgba8(image.clone()).write_to(&mut cursor, ImageFormat::Png)?;
        }
    }
    Ok(cursor.into_inner())
}

/// Alpha-blends an RGBA buffer onto an opaque background color.
fn flatten_onto(image: &RgbaImage, background: Rgba<u8>) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let blend = |src: u8, dst: u8| -> u8 {
            ((src as u16 * a as u16 + dst as u16 * (255 - a as u16)) / 255) as u8
        };
        out.put_pixel(
            x,
            y,
            Rgb([
                blend(r, background.0[0]),
                blend(g, background.0[1]),
                blend(b, background.0[2]),
            ]),
        );
    }
    out
}

// ============================================================================
// Filename proposal
// ============================================================================

/// Proposes a download filename with the extension of the resolved format.
///
/// A known image extension on the caller's name is replaced (so a
/// ScalableVector request for `code.png` yields `code.svg`); anything else is
/// kept as part of the basename. Character sanitization is the caller's
/// concern.
pub fn propose_filename(requested: Option<&str>, format: OutputFormat) -> String {
    let base = requested
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_BASENAME);
    format!("{}.{}", strip_known_extension(base), format.extension())
}

fn strip_known_extension(name: &str) -> &str {
    const KNOWN: [&str; 5] = ["png", "jpg", "jpeg", "webp", "svg"];
    if let Some((stem, extension)) = name.rsplit_once('.') {
        if !stem.is_empty() && KNOWN.contains(&extension.to_ascii_lowercase().as_str()) {
            return stem;
        }
    }
    name
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ErrorCorrection, ResolvedColor};

    fn options(container: OutputContainer) -> RenderOptions {
        RenderOptions {
            width: 8,
            height: 8,
            margin: 0,
            error_correction_level: ErrorCorrection::Medium,
            output_container: container,
            quality: 0.92,
            transparent: false,
            color: ResolvedColor {
                dark: "#000000".into(),
                light: "#ffffff".into(),
            },
        }
    }

    fn checkerboard() -> RgbaImage {
        RgbaImage::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    fn decode_payload(url: &str) -> Vec<u8> {
        let payload = url.split_once(";base64,").expect("data URL shape").1;
        BASE64.decode(payload).expect("valid base64")
    }

    #[test]
    fn png_envelope_duplicates_the_data_url() {
        let envelope =
            into_envelope(Artifact::Raster(checkerboard()), &options(OutputContainer::Png))
                .unwrap();
        assert!(envelope.data.starts_with("data:image/png;base64,"));
        assert_eq!(envelope.data, envelope.data_url);
        assert_eq!(envelope.format, OutputFormat::Png);

        let bytes = decode_payload(&envelope.data_url);
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "PNG magic bytes");
    }

    #[test]
    fn jpeg_envelope_carries_jpeg_bytes() {
        let envelope =
            into_envelope(Artifact::Raster(checkerboard()), &options(OutputContainer::Jpeg))
                .unwrap();
        assert!(envelope.data_url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(envelope.format, OutputFormat::Jpg);

        let bytes = decode_payload(&envelope.data_url);
        assert_eq!(&bytes[..2], b"\xff\xd8", "JPEG SOI marker");
    }

    #[test]
    fn webp_envelope_carries_riff_bytes() {
        let envelope =
            into_envelope(Artifact::Raster(checkerboard()), &options(OutputContainer::Webp))
                .unwrap();
        assert!(envelope.data_url.starts_with("data:image/webp;base64,"));

        let bytes = decode_payload(&envelope.data_url);
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn vector_envelope_keeps_raw_markup_under_data() {
        let markup = "<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>".to_string();
        let envelope =
            into_envelope(Artifact::Vector(markup.clone()), &options(OutputContainer::Svg))
                .unwrap();
        assert_eq!(envelope.data, markup);
        assert!(envelope.data_url.starts_with("data:image/svg+xml;base64,"));
        assert_eq!(decode_payload(&envelope.data_url), markup.as_bytes());
    }

    #[test]
    fn jpeg_flattens_transparency_onto_light() {
        let transparent = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        let mut opts = options(OutputContainer::Jpeg);
        opts.color.light = "#ff0000".into();

        let envelope = into_envelope(Artifact::Raster(transparent), &opts).unwrap();
        let bytes = decode_payload(&envelope.data_url);
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        let pixel = decoded.get_pixel(0, 0);
        assert!(
            pixel.0[0] > 200 && pixel.0[1] < 60 && pixel.0[2] < 60,
            "transparent pixels flatten onto the light color, got {:?}",
            pixel.0
        );
    }

    #[test]
    fn filename_defaults_when_absent() {
        assert_eq!(propose_filename(None, OutputFormat::Png), "qr-code.png");
        assert_eq!(propose_filename(Some("   "), OutputFormat::Svg), "qr-code.svg");
    }

    #[test]
    fn filename_replaces_known_image_extensions() {
        assert_eq!(propose_filename(Some("code.png"), OutputFormat::Svg), "code.svg");
        assert_eq!(propose_filename(Some("Photo.JPEG"), OutputFormat::Webp), "Photo.webp");
        assert_eq!(propose_filename(Some("plain"), OutputFormat::Jpg), "plain.jpg");
    }

    #[test]
    fn filename_keeps_unknown_extensions_in_the_basename() {
        assert_eq!(
            propose_filename(Some("release.v2"), OutputFormat::Png),
            "release.v2.png"
        );
    }
}
