//! Result-side data model: what the pipeline hands back to consumers.
//!
//! A [`GenerationResult`] is constructed once per request and never mutated
//! afterwards; UI layers only read it or convert the artifact to a different
//! container. It is the sole contract exposed to consumers.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::request::{ErrorCorrection, OutputFormat};

// ============================================================================
// SizePx
// ============================================================================

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a square size.
    pub fn square(edge: u32) -> Self {
        Self::new(edge, edge)
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Data-segment encoding mode, classified from the payload's character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    /// ASCII digits only.
    Numeric,
    /// Digits, uppercase letters, space and `$%*+-./:`.
    Alphanumeric,
    /// Anything else.
    Byte,
}

/// A single described data segment. The extractor always describes the whole
/// payload as one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrSegment {
    pub data: String,
    pub mode: SegmentMode,
    pub num_bits: u32,
}

/// Best-effort descriptive metadata attached to successful results.
///
/// The version is an estimate for display purposes; it need not match the
/// version the encoding primitive actually selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrMetadata {
    pub version: u32,
    pub error_correction_level: ErrorCorrection,
    pub segments: Vec<QrSegment>,
}

// ============================================================================
// GenerationResult
// ============================================================================

/// The outcome of a single generation request.
///
/// On success, `data` and `data_url` are set: for raster containers both hold
/// the same base64 data URL; for SVG, `data` is the raw markup and `data_url`
/// its base64 wrapping. On failure, `error` carries a message suitable for
/// direct display and the artifact fields are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,

    /// Proposed download filename with the extension of the resolved format.
    pub filename: String,

    pub format: OutputFormat,

    /// Rendered pixel dimensions; always square, equal to the resolved
    /// effective width. Zero on failure.
    pub size: SizePx,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<QrMetadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Unix timestamp in milliseconds at construction.
    pub timestamp: u64,
}

impl GenerationResult {
    /// Builds a failed result carrying a display-ready message.
    pub fn failure(
        filename: impl Into<String>,
        format: OutputFormat,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            data_url: None,
            filename: filename.into(),
            format,
            size: SizePx::default(),
            metadata: None,
            error: Some(message.into()),
            timestamp: unix_millis(),
        }
    }
}

/// Milliseconds since the Unix epoch; zero if the clock is before it.
pub(crate) fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ============================================================================
// Tests
// ============================================================================
