//! Best-effort descriptive metadata.
//!
//! Estimates the symbol version from the payload length and classifies the
//! payload's data-segment mode. The figures are for display only (the
//! encoding primitive picks its own version) and extraction can never fail
//! a generation.

use crate::request::ErrorCorrection;
use crate::result::{QrMetadata, QrSegment, SegmentMode};

/// Cumulative byte-mode capacity per symbol version (1–10) at low error
/// correction. Payloads beyond the table fall back to the linear estimate.
const BYTE_CAPACITY: [usize; 10] = [17, 32, 53, 78, 106, 134, 154, 192, 230, 271];

/// Highest symbol version in the family.
const MAX_VERSION: u32 = 40;

/// Characters the alphanumeric segment mode can carry, besides digits and
/// uppercase letters.
const ALPHANUMERIC_EXTRAS: &str = " $%*+-./:";

/// Describes a payload; `None` only when there is nothing to describe.
///
/// Total function: never panics, never fails the surrounding generation.
pub fn extract(data: &str, level: ErrorCorrection) -> Option<QrMetadata> {
    if data.is_empty() {
        return None;
    }

    let mode = classify(data);
    Some(QrMetadata {
        version: estimate_version(data.len()),
        error_correction_level: level,
        segments: vec![QrSegment {
            data: data.to_string(),
            mode,
            num_bits: segment_bits(data.len(), mode),
        }],
    })
}

/// Estimates the symbol version for a payload of the given byte length:
/// table lookup through version 10, then `ceil(len / 40)` capped at 40.
pub fn estimate_version(len: usize) -> u32 {
    for (index, capacity) in BYTE_CAPACITY.iter().enumerate() {
        if len <= *capacity {
            return index as u32 + 1;
        }
    }
    (len.div_ceil(40) as u32).min(MAX_VERSION)
}

/// Classifies the whole payload as one data segment.
pub fn classify(data: &str) -> SegmentMode {
    if data.chars().all(|c| c.is_ascii_digit()) {
        SegmentMode::Numeric
    } else if data
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase() || ALPHANUMERIC_EXTRAS.contains(c))
    {
        SegmentMode::Alphanumeric
    } else {
        SegmentMode::Byte
    }
}

/// Bit count of a segment's data payload under the standard packing rules.
pub fn segment_bits(len: usize, mode: SegmentMode) -> u32 {
    let len = len as u32;
    match mode {
        // 10 bits per 3 digits; 4 or 7 bits for a 1- or 2-digit remainder.
        SegmentMode::Numeric => {
            let remainder = match len % 3 {
                1 => 4,
                2 => 7,
                _ => 0,
            };
            len / 3 * 10 + remainder
        }
        // 11 bits per character pair, 6 for an odd leftover.
        SegmentMode::Alphanumeric => len / 2 * 11 + (len % 2) * 6,
        SegmentMode::Byte => len * 8,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_has_no_metadata() {
        assert!(extract("", ErrorCorrection::Medium).is_none());
    }

    #[test]
    fn whole_payload_is_one_segment() {
        let metadata = extract("HELLO-123", ErrorCorrection::Quartile).unwrap();
        assert_eq!(metadata.segments.len(), 1);
        assert_eq!(metadata.segments[0].data, "HELLO-123");
        assert_eq!(metadata.error_correction_level, ErrorCorrection::Quartile);
    }

    #[test]
    fn digits_classify_numeric() {
        assert_eq!(classify("0123456789"), SegmentMode::Numeric);
    }

    #[test]
    fn uppercase_alphanumeric_charset() {
        assert_eq!(classify("HELLO WORLD"), SegmentMode::Alphanumeric);
        assert_eq!(classify("PRICE: $19.99 +5%"), SegmentMode::Alphanumeric);
    }

    #[test]
    fn lowercase_falls_back_to_byte() {
        assert_eq!(classify("Hello World"), SegmentMode::Byte);
        assert_eq!(classify("hello"), SegmentMode::Byte);
    }

    #[test]
    fn symbols_outside_the_charset_are_byte() {
        assert_eq!(classify("A&B"), SegmentMode::Byte);
        assert_eq!(classify("HTTPS://EXAMPLE.COM?Q=1"), SegmentMode::Byte);
    }

    #[test]
    fn version_table_boundaries() {
        assert_eq!(estimate_version(1), 1);
        assert_eq!(estimate_version(17), 1);
        assert_eq!(estimate_version(18), 2);
        assert_eq!(estimate_version(271), 10);
    }

    #[test]
    fn version_extrapolates_beyond_the_table() {
        assert_eq!(estimate_version(1000), 25);
        assert_eq!(estimate_version(4296), 40, "capped at version 40");
    }

    #[test]
    fn numeric_bit_counts() {
        assert_eq!(segment_bits(3, SegmentMode::Numeric), 10);
        assert_eq!(segment_bits(4, SegmentMode::Numeric), 14);
        assert_eq!(segment_bits(5, SegmentMode::Numeric), 17);
        assert_eq!(segment_bits(6, SegmentMode::Numeric), 20);
    }

    #[test]
    fn alphanumeric_bit_counts() {
        assert_eq!(segment_bits(2, SegmentMode::Alphanumeric), 11);
        assert_eq!(segment_bits(3, SegmentMode::Alphanumeric), 17);
    }

    #[test]
    fn byte_bit_counts() {
        assert_eq!(segment_bits(4, SegmentMode::Byte), 32);
    }
}
