//! Symbol encoding: the rendering primitive behind the pipeline.
//!
//! The QR math itself (version/mask selection, Reed-Solomon) lives in the
//! `qrcode` crate; this module wraps it behind the [`SymbolEncoder`] trait so
//! the pipeline can be exercised against a fake encoder in tests. The
//! default implementation is [`QrEncoder`].

use std::fmt::Write as _;

use image::{Rgba, RgbaImage, imageops};
use palette::Srgb;
use qrcode::QrCode;
use thiserror::Error;

use crate::request::ErrorCorrection;

// ============================================================================
// EncodeError
// ============================================================================

/// Failures raised by the encoding primitive or a downstream codec.
///
/// These are the only errors allowed to turn a generation into a
/// `success: false` result; every other pipeline stage degrades gracefully.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The `qrcode` crate rejected the input, e.g. data too large for any
    /// symbol version at the requested error correction level.
    #[error("QR encoding failed: {0}")]
    Symbol(#[from] qrcode::types::QrError),

    /// A color string could not be parsed as a hex color.
    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    /// An image codec failed while writing the container bytes.
    #[error("image encoding failed: {0}")]
    Codec(#[from] image::ImageError),
}

// ============================================================================
// Specs
// ============================================================================

/// Parameters for a raster render.
///
/// Colors are hex strings straight from the resolved options; parsing
/// happens inside the encoder, so a malformed color surfaces here rather
/// than at validation (deliberately permissive, see `validate`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSpec {
    /// Output edge length in pixels; the result is exactly this size.
    pub width: u32,
    /// Quiet zone in modules.
    pub margin: u32,
    pub error_correction_level: ErrorCorrection,
    /// Module color as a hex string.
    pub dark: String,
    /// Background color as a hex string.
    pub light: String,
    /// Render the background fully transparent in one pass.
    pub transparent_light: bool,
}

/// Parameters for a vector render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorSpec {
    /// Nominal edge length written to the markup's width/height attributes.
    pub width: u32,
    /// Quiet zone in modules.
    pub margin: u32,
    pub error_correction_level: ErrorCorrection,
    pub dark: String,
    pub light: String,
}

// ============================================================================
// SymbolEncoder
// ============================================================================

/// The encoding primitive consumed by the pipeline.
///
/// Implementations must produce square raster output of exactly
/// `spec.width` pixels, and vector output whose background is a single
/// solid `<rect>` preceding the module `<path>` (the shape the vector
/// transparency transform relies on).
pub trait SymbolEncoder {
    /// Renders the payload as an RGBA pixel buffer.
    fn encode_raster(&self, data: &str, spec: &RasterSpec) -> Result<RgbaImage, EncodeError>;

    /// Renders the payload as SVG markup.
    fn encode_vector(&self, data: &str, spec: &VectorSpec) -> Result<String, EncodeError>;
}

/// Default [`SymbolEncoder`] over the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl SymbolEncoder for QrEncoder {
    fn encode_raster(&self, data: &str, spec: &RasterSpec) -> Result<RgbaImage, EncodeError> {
        let dark = parse_hex_color(&spec.dark)?;
        let mut light = parse_hex_color(&spec.light)?;
        if spec.transparent_light {
            light.0[3] = 0;
        }

        let code =
            QrCode::with_error_correction_level(data.as_bytes(), spec.error_correction_level.into())?;
        let colors = code.to_colors();
        let modules = code.width() as u32;
        let grid = modules + 2 * spec.margin;

        // Rasterize at an integer module scale, then snap to the exact
        // requested edge. Nearest-neighbor keeps module edges crisp.
        let scale = (spec.width / grid).max(1);
        let edge = grid * scale;
        let mut image = RgbaImage::from_pixel(edge, edge, light);
        for (i, color) in colors.iter().enumerate() {
            if *color == qrcode::Color::Dark {
                let x = (i as u32 % modules + spec.margin) * scale;
                let y = (i as u32 / modules + spec.margin) * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        image.put_pixel(x + dx, y + dy, dark);
                    }
                }
            }
        }

        if edge != spec.width {
            image = imageops::resize(
                &image,
                spec.width,
                spec.width,
                imageops::FilterType::Nearest,
            );
        }
        Ok(image)
    }

    fn encode_vector(&self, data: &str, spec: &VectorSpec) -> Result<String, EncodeError> {
        // Normalizing through the same parser keeps vector color handling as
        // strict as raster handling, and pins whites to the #ffffff form the
        // transparency transform recognizes.
        let dark = normalize_hex_color(&spec.dark)?;
        let light = normalize_hex_color(&spec.light)?;

        let code =
            QrCode::with_error_correction_level(data.as_bytes(), spec.error_correction_level.into())?;
        let colors = code.to_colors();
        let modules = code.width() as u32;
        let grid = modules + 2 * spec.margin;

        let mut path = String::new();
        for (i, color) in colors.iter().enumerate() {
            if *color == qrcode::Color::Dark {
                let x = i as u32 % modules + spec.margin;
                let y = i as u32 / modules + spec.margin;
                // write! to a String cannot fail
                let _ = write!(path, "M{x} {y}h1v1h-1z");
            }
        }

        Ok(format!(
            concat!(
                "<?xml version=\"1.0\" standalone=\"yes\"?>",
                "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" ",
                "width=\"{w}\" height=\"{w}\" viewBox=\"0 0 {g} {g}\" ",
                "shape-rendering=\"crispEdges\">",
                "<rect x=\"0\" y=\"0\" width=\"{g}\" height=\"{g}\" fill=\"{light}\"/>",
                "<path d=\"{path}\" fill=\"{dark}\"/>",
                "</svg>"
            ),
            w = spec.width,
            g = grid,
            light = light,
            path = path,
            dark = dark,
        ))
    }
}

// ============================================================================
// Color parsing
// ============================================================================

/// Parses a hex color string (`#rgb` or `#rrggbb`, `#` optional) into an
/// opaque RGBA pixel.
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>, EncodeError> {
    let rgb: Srgb<u8> = value
        .trim()
        .parse()
        .map_err(|e: palette::rgb::FromHexError| EncodeError::InvalidColor {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
    Ok(Rgba([rgb.red, rgb.green, rgb.blue, 255]))
}

/// Parses and re-serializes a hex color into canonical `#rrggbb` form.
fn normalize_hex_color(value: &str) -> Result<String, EncodeError> {
    let rgba = parse_hex_color(value)?;
    Ok(format!(
        "#{:02x}{:02x}{:02x}",
        rgba.0[0], rgba.0[1], rgba.0[2]
    ))
}

// ============================================================================
// Tests
// ============================================================================
