//! The generation engine: validate, resolve, encode, post-process, wrap.
//!
//! [`Generator`] owns the encoding primitive and drives one request through
//! the full pipeline. `generate` never panics and never returns `Err`; every
//! failure becomes a `success: false` result so downstream consumers have a
//! single handling path.

use crate::encode::{EncodeError, QrEncoder, RasterSpec, SymbolEncoder, VectorSpec};
use crate::format::{Artifact, Envelope, into_envelope, propose_filename};
use crate::metadata;
use crate::request::{GenerationRequest, OutputContainer, RenderOptions};
use crate::result::{GenerationResult, SizePx, unix_millis};
use crate::strategy::resolve;
use crate::transparency::{key_out_light_pixels, make_transparent};
use crate::validate::validate;

// ============================================================================
// Generator
// ============================================================================

/// The QR generation engine.
///
/// Holds no mutable state: the encoder and the default-options tables are
/// read-only after construction, so a `Generator` can be shared across
/// threads freely when its encoder can.
///
/// # Example
///
/// ```
/// use qrsmith::{Generator, GenerationRequest, Mode};
///
/// let generator = Generator::new();
/// let result = generator.generate(&GenerationRequest::new("https://example.com", Mode::Basic));
/// assert!(result.success);
/// assert!(result.data_url.unwrap().starts_with("data:image/png;base64,"));
/// ```
pub struct Generator<E: SymbolEncoder = QrEncoder> {
    encoder: E,
}

impl Generator<QrEncoder> {
    /// Creates a generator backed by the default `qrcode`-based encoder.
    pub fn new() -> Self {
        Self { encoder: QrEncoder }
    }
}

impl Default for Generator<QrEncoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SymbolEncoder> Generator<E> {
    /// Creates a generator with an injected encoding primitive.
    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    /// Generates a single artifact. Never panics; validation and encoding
    /// failures surface as a `success: false` result carrying a
    /// display-ready message.
    pub fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let resolved = resolve(request.mode, &request.options);
        let format = resolved.output_container.format();
        let filename = propose_filename(request.filename.as_deref(), format);

        let validation = validate(request);
        if !validation.is_valid {
            return GenerationResult::failure(filename, format, validation.errors.join("; "));
        }

        match self.render(&request.data, &resolved) {
            Ok(envelope) => GenerationResult {
                success: true,
                data: Some(envelope.data),
                data_url: Some(envelope.data_url),
                filename,
                format: envelope.format,
                size: SizePx::square(resolved.width),
                metadata: metadata::extract(&request.data, resolved.error_correction_level),
                error: None,
                timestamp: unix_millis(),
            },
            Err(err) => GenerationResult::failure(
                filename,
                format,
                format!("QR generation failed: {err}"),
            ),
        }
    }

    /// Generates a batch, strictly sequentially. The output has the same
    /// length and order as the input; a failed item never prevents its
    /// siblings from being attempted.
    pub fn generate_batch(&self, requests: &[GenerationRequest]) -> Vec<GenerationResult> {
        requests
            .iter()
            .map(|request| self.generate(request))
            .collect()
    }

    fn render(&self, data: &str, options: &RenderOptions) -> Result<Envelope, EncodeError> {
        if options.output_container.is_vector() {
            self.render_vector(data, options)
        } else {
            self.render_raster(data, options)
        }
    }

    fn render_vector(&self, data: &str, options: &RenderOptions) -> Result<Envelope, EncodeError> {
        let spec = VectorSpec {
            width: options.width,
            margin: options.margin,
            error_correction_level: options.error_correction_level,
            dark: options.color.dark.clone(),
            light: options.color.light.clone(),
        };
        let mut markup = self.encoder.encode_vector(data, &spec)?;
        if options.transparent {
            markup = make_transparent(&markup);
        }
        into_envelope(Artifact::Vector(markup), options)
    }

    fn render_raster(&self, data: &str, options: &RenderOptions) -> Result<Envelope, EncodeError> {
        // JPEG has no alpha channel; the transparent flag is silently
        // ignored for that container.
        let transparent =
            options.transparent && options.output_container != OutputContainer::Jpeg;

        let solid = RasterSpec {
            width: options.width,
            margin: options.margin,
            error_correction_level: options.error_correction_level,
            dark: options.color.dark.clone(),
            light: options.color.light.clone(),
            transparent_light: false,
        };

        let image = if transparent {
            let one_pass = RasterSpec {
                transparent_light: true,
                ..solid.clone()
            };
            match self.encoder.encode_raster(data, &one_pass) {
                Ok(image) => image,
                Err(err) => {
                    // Transparency is best-effort: fall back to color-keying
                    // the solid render. A solid-render failure is a real
                    // encoding error and propagates.
                    tracing::warn!(
                        error = %err,
                        "one-pass transparent render failed, color-keying the solid render"
                    );
                    key_out_light_pixels(self.encoder.encode_raster(data, &solid)?)
                }
            }
        } else {
            self.encoder.encode_raster(data, &solid)?
        };

        into_envelope(Artifact::Raster(image), options)
    }
}

// ============================================================================
// Tests
// ============================================================================
