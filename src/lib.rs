//! qrsmith: QR code rendering pipeline
//!
//! This crate turns a generation request (payload, mode, sparse options)
//! into a displayable QR artifact: a base64 data URL for the raster
//! containers (PNG, JPEG, WEBP) or markup text plus its data-URL wrapping
//! for SVG, with optional background transparency.
//!
//! # Example
//!
//! ```
//! use qrsmith::{GenerationRequest, Generator, Mode, RequestOptions};
//!
//! let generator = Generator::new();
//!
//! let result = generator.generate(&GenerationRequest::new(
//!     "https://example.com",
//!     Mode::Basic,
//! ));
//! assert!(result.success);
//!
//! // Transparent, print-grade output:
//! let request = GenerationRequest::new("https://example.com", Mode::HighQuality)
//!     .with_options(RequestOptions {
//!         transparent: Some(true),
//!         ..Default::default()
//!     });
//! let result = generator.generate(&request);
//! assert_eq!(result.size.width, 512);
//! ```
//!
//! # Pipeline
//!
//! Each request flows validate → resolve → encode → transparency → format:
//!
//! 1. [`validate`] accumulates every range/length violation up front.
//! 2. [`resolve`] merges global defaults, mode defaults and user overrides
//!    into concrete [`RenderOptions`].
//! 3. A [`SymbolEncoder`] (by default [`QrEncoder`], backed by the `qrcode`
//!    crate) renders the symbol as pixels or markup.
//! 4. The transparency transforms knock out the background where
//!    requested; they are best-effort and never fatal.
//! 5. The format adapter wraps the artifact into the [`GenerationResult`]
//!    envelope.
//!
//! Failures never escape as panics or `Err`: [`Generator::generate`] always
//! returns a [`GenerationResult`], with `success: false` and a display-ready
//! message when something went wrong. Batches are processed sequentially
//! with per-item isolation.

mod encode;
mod format;
mod generator;
mod metadata;
mod request;
mod result;
mod strategy;
mod transparency;
mod validate;

pub use encode::{EncodeError, QrEncoder, RasterSpec, SymbolEncoder, VectorSpec};
pub use format::{Artifact, DEFAULT_BASENAME, Envelope, propose_filename};
pub use generator::Generator;
pub use metadata::{classify, estimate_version, extract as extract_metadata};
pub use request::{
    ColorOptions, ErrorCorrection, GenerationRequest, Mode, OutputContainer, OutputFormat,
    RenderOptions, RequestOptions, ResolvedColor,
};
pub use result::{GenerationResult, QrMetadata, QrSegment, SegmentMode, SizePx};
pub use strategy::{resolve, supported_formats};
pub use transparency::{KEY_THRESHOLD, key_out_light_pixels, make_transparent};
pub use validate::{MAX_DATA_LEN, Validation, validate};
