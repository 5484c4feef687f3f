//! Request-side data model for QR generation.
//!
//! A [`GenerationRequest`] pairs the payload to encode with a [`Mode`] and a
//! sparse [`RequestOptions`] override set. Requests arrive from the web layer
//! as camelCase JSON, so every type here is serde-serializable in that shape.

use serde::{Deserialize, Serialize};

// ============================================================================
// Mode
// ============================================================================

/// Generation mode. Each mode is a fixed policy that selects defaults and a
/// rendering path; it carries no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Two-color raster output with stock defaults.
    Basic,
    /// Same resolution path as [`Basic`](Mode::Basic), offered separately so
    /// callers can signal that custom colors are the point of the request.
    Colored,
    /// Always produces SVG markup, regardless of the requested container.
    ScalableVector,
    /// Raises error correction, dimensions, margin and quality to print-grade
    /// floors.
    HighQuality,
}

impl Mode {
    /// All modes, in declaration order.
    pub const ALL: [Mode; 4] = [
        Mode::Basic,
        Mode::Colored,
        Mode::ScalableVector,
        Mode::HighQuality,
    ];
}

// ============================================================================
// ErrorCorrection
// ============================================================================

/// QR error correction level, trading data capacity for damage resilience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// ~7% recovery.
    #[serde(rename = "L")]
    Low,
    /// ~15% recovery.
    #[serde(rename = "M")]
    Medium,
    /// ~25% recovery.
    #[serde(rename = "Q")]
    Quartile,
    /// ~30% recovery.
    #[serde(rename = "H")]
    High,
}

impl ErrorCorrection {
    /// Nominal percentage of codewords that can be restored.
    pub fn recovery_percent(&self) -> u8 {
        match self {
            ErrorCorrection::Low => 7,
            ErrorCorrection::Medium => 15,
            ErrorCorrection::Quartile => 25,
            ErrorCorrection::High => 30,
        }
    }
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

// ============================================================================
// Containers and formats
// ============================================================================

/// The file container wrapping the rendered symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputContainer {
    Png,
    Jpeg,
    Webp,
    Svg,
}

impl OutputContainer {
    /// MIME type used in data URLs and HTTP responses.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputContainer::Png => "image/png",
            OutputContainer::Jpeg => "image/jpeg",
            OutputContainer::Webp => "image/webp",
            OutputContainer::Svg => "image/svg+xml",
        }
    }

    /// The display format this container maps to, 1:1.
    pub fn format(&self) -> OutputFormat {
        match self {
            OutputContainer::Png => OutputFormat::Png,
            OutputContainer::Jpeg => OutputFormat::Jpg,
            OutputContainer::Webp => OutputFormat::Webp,
            OutputContainer::Svg => OutputFormat::Svg,
        }
    }

    /// Containers whose encoders take a quality setting.
    pub fn is_lossy(&self) -> bool {
        matches!(self, OutputContainer::Jpeg | OutputContainer::Webp)
    }

    /// True for vector containers; false for pixel rasters.
    pub fn is_vector(&self) -> bool {
        matches!(self, OutputContainer::Svg)
    }
}

/// Display format reported on results and used for filename extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    Png,
    Jpg,
    Webp,
    Svg,
}

impl OutputFormat {
    /// Filename extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Webp => "webp",
            OutputFormat::Svg => "svg",
        }
    }
}

// ============================================================================
// Options
// ============================================================================

/// Sparse foreground/background color overrides.
///
/// Merged key-wise over the mode defaults: supplying only `dark` keeps the
/// default `light`, and vice versa. Values are hex color strings; syntax is
/// deliberately not validated here (malformed colors surface as encode
/// errors instead of validation errors).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ColorOptions {
    /// Module (foreground) color, e.g. `"#000000"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,

    /// Background color, e.g. `"#ffffff"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
}

/// Sparse per-request option overrides.
///
/// Absent fields take mode defaults during resolution and are not range
/// checked by validation. Output is always square; when both `width` and
/// `height` are supplied, `width` wins as the square edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestOptions {
    /// Edge length in pixels, 64–2048.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Edge length in pixels, 64–2048. Output stays square.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Quiet-zone width in modules, 0–20.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<u32>,

    /// Error correction level override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_correction_level: Option<ErrorCorrection>,

    /// Container format override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_container: Option<OutputContainer>,

    /// Lossy-encoder quality, 0.1–1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<f32>,

    /// Request an alpha-transparent background where the container allows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,

    /// Color overrides, merged key-wise over defaults.
    pub color: ColorOptions,
}

// ============================================================================
// GenerationRequest
// ============================================================================

/// A single QR generation request.
///
/// Owned by the caller for its lifetime; the pipeline borrows it during
/// [`generate`](crate::Generator::generate) and retains nothing afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Payload to encode. Non-empty, at most 4296 characters.
    pub data: String,

    /// Generation mode.
    pub mode: Mode,

    /// Sparse option overrides.
    #[serde(default)]
    pub options: RequestOptions,

    /// Proposed download filename. The pipeline only adjusts the extension;
    /// path/charset sanitization is the caller's concern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl GenerationRequest {
    /// Creates a request with default options and no filename.
    pub fn new(data: impl Into<String>, mode: Mode) -> Self {
        Self {
            data: data.into(),
            mode,
            options: RequestOptions::default(),
            filename: None,
        }
    }

    /// Sets the option overrides.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the proposed filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

// ============================================================================
// RenderOptions (fully resolved)
// ============================================================================

/// Fully resolved colors; no optional fields remain after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColor {
    pub dark: String,
    pub light: String,
}

/// Fully resolved rendering options produced by [`resolve`](crate::resolve).
/// `width == height` always.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub error_correction_level: ErrorCorrection,
    pub output_container: OutputContainer,
    pub quality: f32,
    pub transparent: bool,
    pub color: ResolvedColor,
}

// ============================================================================
// Tests
// ============================================================================
