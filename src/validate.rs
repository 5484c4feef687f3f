//! Request validation.
//!
//! [`validate`] is a pure function over its input: it accumulates every
//! applicable violation instead of stopping at the first, so a caller can fix
//! everything in one round-trip. Fields absent from the options take mode
//! defaults later and are not checked here.

use std::ops::RangeInclusive;

use crate::request::GenerationRequest;

/// Maximum payload length: the practical byte-mode capacity ceiling for the
/// QR symbol family.
pub const MAX_DATA_LEN: usize = 4296;

/// Allowed edge length in pixels.
pub const DIMENSION_RANGE: RangeInclusive<u32> = 64..=2048;

/// Allowed quiet-zone width in modules.
pub const MARGIN_RANGE: RangeInclusive<u32> = 0..=20;

/// Allowed lossy-encoder quality.
pub const QUALITY_RANGE: RangeInclusive<f32> = 0.1..=1.0;

/// Outcome of validating a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl Validation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validates a generation request without rendering anything.
///
/// Checks, in order: payload presence, payload length, and the numeric range
/// of each supplied option. Mode validity is a static guarantee of the
/// [`Mode`](crate::Mode) enum, and color values are passed through unchecked;
/// a malformed color surfaces later as an encode error.
pub fn validate(request: &GenerationRequest) -> Validation {
    let mut errors = Vec::new();

    if request.data.trim().is_empty() {
        errors.push("data must be a non-empty string".to_string());
    } else if request.data.len() > MAX_DATA_LEN {
        errors.push(format!(
            "data exceeds the maximum length: {} > {}",
            request.data.len(),
            MAX_DATA_LEN
        ));
    }

    let options = &request.options;
    if let Some(width) = options.width {
        check_range("width", width, DIMENSION_RANGE, &mut errors);
    }
    if let Some(height) = options.height {
        check_range("height", height, DIMENSION_RANGE, &mut errors);
    }
    if let Some(margin) = options.margin {
        check_range("margin", margin, MARGIN_RANGE, &mut errors);
    }
    if let Some(quality) = options.quality {
        if !QUALITY_RANGE.contains(&quality) {
            errors.push(format!(
                "quality must be between {} and {}, got {}",
                QUALITY_RANGE.start(),
                QUALITY_RANGE.end(),
                quality
            ));
        }
    }

    Validation::from_errors(errors)
}

fn check_range(field: &str, value: u32, range: RangeInclusive<u32>, errors: &mut Vec<String>) {
    if !range.contains(&value) {
        errors.push(format!(
            "{} must be between {} and {}, got {}",
            field,
            range.start(),
            range.end(),
            value
        ));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{GenerationRequest, Mode, RequestOptions};

    fn request_with(options: RequestOptions) -> GenerationRequest {
        GenerationRequest::new("hello", Mode::Basic).with_options(options)
    }

    #[test]
    fn valid_request_passes() {
        let validation = validate(&GenerationRequest::new("hello", Mode::Basic));
        assert!(validation.is_valid);
        assert!(validation.errors.is_empty());
    }

    #[test]
    fn empty_data_fails() {
        let validation = validate(&GenerationRequest::new("", Mode::Basic));
        assert!(!validation.is_valid);
        assert_eq!(validation.errors, vec!["data must be a non-empty string"]);
    }

    #[test]
    fn whitespace_only_data_fails() {
        let validation = validate(&GenerationRequest::new("   \n\t", Mode::Basic));
        assert!(!validation.is_valid);
    }

    #[test]
    fn data_at_length_limit_passes() {
        let validation = validate(&GenerationRequest::new("a".repeat(4296), Mode::Basic));
        assert!(validation.is_valid, "exactly 4296 characters must validate");
    }

    #[test]
    fn data_over_length_limit_fails_with_both_numbers() {
        let validation = validate(&GenerationRequest::new("a".repeat(4297), Mode::Basic));
        assert!(!validation.is_valid);
        let message = &validation.errors[0];
        assert!(message.contains("4297"), "message names the actual length");
        assert!(message.contains("4296"), "message names the limit");
    }

    #[test]
    fn width_out_of_range_fails_naming_bounds() {
        let validation = validate(&request_with(RequestOptions {
            width: Some(32),
            ..Default::default()
        }));
        assert!(!validation.is_valid);
        let message = &validation.errors[0];
        assert!(message.contains("width"));
        assert!(message.contains("64"));
        assert!(message.contains("2048"));
        assert!(message.contains("32"));
    }

    #[test]
    fn dimension_bounds_are_inclusive() {
        for edge in [64, 2048] {
            let validation = validate(&request_with(RequestOptions {
                width: Some(edge),
                height: Some(edge),
                ..Default::default()
            }));
            assert!(validation.is_valid, "edge {edge} is within range");
        }
    }

    #[test]
    fn margin_out_of_range_fails() {
        let validation = validate(&request_with(RequestOptions {
            margin: Some(21),
            ..Default::default()
        }));
        assert!(!validation.is_valid);
        assert!(validation.errors[0].contains("margin"));
    }

    #[test]
    fn quality_out_of_range_fails() {
        for quality in [0.05_f32, 1.5] {
            let validation = validate(&request_with(RequestOptions {
                quality: Some(quality),
                ..Default::default()
            }));
            assert!(!validation.is_valid, "quality {quality} is out of range");
            assert!(validation.errors[0].contains("quality"));
        }
    }

    #[test]
    fn absent_options_are_not_checked() {
        // No width/margin/quality supplied: nothing to range check.
        let validation = validate(&request_with(RequestOptions::default()));
        assert!(validation.is_valid);
    }

    #[test]
    fn all_violations_accumulate() {
        let mut request = request_with(RequestOptions {
            width: Some(10_000),
            margin: Some(99),
            quality: Some(2.0),
            ..Default::default()
        });
        request.data = String::new();

        let validation = validate(&request);
        assert_eq!(validation.errors.len(), 4, "every violation is reported");
    }

    #[test]
    fn color_strings_are_not_validated() {
        let validation = validate(&request_with(RequestOptions {
            color: crate::request::ColorOptions {
                dark: Some("not-a-color".into()),
                light: Some("#zzz".into()),
            },
            ..Default::default()
        }));
        assert!(validation.is_valid, "color syntax is a pass-through");
    }
}
