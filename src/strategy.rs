//! Mode strategy resolution.
//!
//! [`resolve`] turns a [`Mode`] plus sparse [`RequestOptions`] into fully
//! resolved [`RenderOptions`]. Merge order is global defaults, then mode
//! defaults, then user overrides, with the color pair merged key-wise. The
//! HighQuality adjustments are applied after user overrides because they are
//! floors, not replacements.

use crate::request::{
    ErrorCorrection, Mode, OutputContainer, OutputFormat, RenderOptions, RequestOptions,
    ResolvedColor,
};

/// Global default edge length in pixels.
pub const DEFAULT_WIDTH: u32 = 256;

/// Global default quiet zone in modules.
pub const DEFAULT_MARGIN: u32 = 4;

/// Global default lossy-encoder quality.
pub const DEFAULT_QUALITY: f32 = 0.92;

/// Global default module color.
pub const DEFAULT_DARK: &str = "#000000";

/// Global default background color.
pub const DEFAULT_LIGHT: &str = "#ffffff";

/// Edge-length floor enforced by [`Mode::HighQuality`].
pub const HIGH_QUALITY_MIN_WIDTH: u32 = 512;

/// Margin floor enforced by [`Mode::HighQuality`].
pub const HIGH_QUALITY_MIN_MARGIN: u32 = 4;

/// Quality floor enforced by [`Mode::HighQuality`] for lossy containers.
pub const HIGH_QUALITY_MIN_QUALITY: f32 = 0.95;

/// Resolves a mode and sparse overrides into concrete rendering options.
///
/// The result always has `width == height`. When both `width` and `height`
/// are supplied, `width` wins as the square edge.
pub fn resolve(mode: Mode, options: &RequestOptions) -> RenderOptions {
    // Global defaults, then the per-mode error correction default.
    let default_level = match mode {
        Mode::HighQuality => ErrorCorrection::High,
        _ => ErrorCorrection::Medium,
    };

    // User overrides.
    let edge = options
        .width
        .or(options.height)
        .unwrap_or(DEFAULT_WIDTH);
    let mut width = edge;
    let mut margin = options.margin.unwrap_or(DEFAULT_MARGIN);
    let mut quality = options.quality.unwrap_or(DEFAULT_QUALITY);
    let level = options.error_correction_level.unwrap_or(default_level);
    let transparent = options.transparent.unwrap_or(false);

    // Color pair merged key-wise, never wholesale.
    let color = ResolvedColor {
        dark: options
            .color
            .dark
            .clone()
            .unwrap_or_else(|| DEFAULT_DARK.to_string()),
        light: options
            .color
            .light
            .clone()
            .unwrap_or_else(|| DEFAULT_LIGHT.to_string()),
    };

    // ScalableVector always renders markup, whatever container was asked for.
    let output_container = match mode {
        Mode::ScalableVector => OutputContainer::Svg,
        _ => options.output_container.unwrap_or(OutputContainer::Png),
    };

    // HighQuality floors; a caller asking for more keeps their higher value.
    // Error correction is already High unless the caller overrode it, and
    // High is the ceiling of the level ordering anyway.
    if mode == Mode::HighQuality {
        width = width.max(HIGH_QUALITY_MIN_WIDTH);
        margin = margin.max(HIGH_QUALITY_MIN_MARGIN);
        if output_container.is_lossy() {
            quality = quality.max(HIGH_QUALITY_MIN_QUALITY);
        }
    }

    RenderOptions {
        width,
        height: width,
        margin,
        error_correction_level: level,
        output_container,
        quality,
        transparent,
        color,
    }
}

/// Output formats a mode can produce.
///
/// ScalableVector is closed over SVG; every other mode supports all four
/// formats.
pub fn supported_formats(mode: Mode) -> &'static [OutputFormat] {
    match mode {
        Mode::ScalableVector => &[OutputFormat::Svg],
        _ => &[
            OutputFormat::Png,
            OutputFormat::Jpg,
            OutputFormat::Webp,
            OutputFormat::Svg,
        ],
    }
}

// ============================================================================
// Tests
// ============================================================================
