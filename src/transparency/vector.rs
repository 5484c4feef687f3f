//! Vector transparency via markup text substitution.
//!
//! Operates on serialized SVG text, not a parsed tree: the encoder emits the
//! background as a single white-filled `<rect>` ahead of the module
//! `<path>`, so removing white-filled shapes and neutralizing any leftover
//! white `fill` attributes yields a transparent background. A transform in
//! the text domain keeps the output byte-comparable across runs.

/// Fill values treated as the white background family (case-insensitive,
/// internal whitespace ignored).
const WHITE_FILLS: [&str; 4] = ["white", "#ffffff", "#fff", "rgb(255,255,255)"];

/// Makes an SVG artifact's background transparent.
///
/// Removes every `<rect>` or `<path>` element whose `fill` is a white-family
/// value and rewrites any remaining white-family `fill` attribute to
/// `fill="none"`. A no-op when nothing matches; never fails, and
/// unexpected markup passes through with unmatched regions untouched.
pub fn make_transparent(markup: &str) -> String {
    rewrite_white_fills(&strip_white_shapes(markup))
}

fn is_white_fill(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    WHITE_FILLS.contains(&normalized.as_str())
}

/// Removes white-filled `<rect>`/`<path>` elements, self-closing or paired.
fn strip_white_shapes(markup: &str) -> String {
    let mut result = String::with_capacity(markup.len());
    let mut remaining = markup;

    loop {
        let next = ["<rect", "<path"]
            .iter()
            .filter_map(|tag| remaining.find(tag).map(|at| (at, *tag)))
            .min_by_key(|(at, _)| *at);
        let Some((start, tag)) = next else {
            break;
        };

        result.push_str(&remaining[..start]);
        let rest = &remaining[start..];

        let Some(open_end) = rest.find('>') else {
            // Unterminated tag; pass the remainder through untouched.
            result.push_str(rest);
            return result;
        };
        let open_tag = &rest[..=open_end];

        let span = if open_tag.ends_with("/>") {
            open_end + 1
        } else {
            let close = format!("</{}>", &tag[1..]);
            match rest.find(&close) {
                Some(at) => at + close.len(),
                None => open_end + 1,
            }
        };

        if !fill_value(open_tag).is_some_and(is_white_fill) {
            result.push_str(&rest[..span]);
        }
        remaining = &rest[span..];
    }

    result.push_str(remaining);
    result
}

/// Extracts the value of a double-quoted `fill` attribute from an open tag.
fn fill_value(open_tag: &str) -> Option<&str> {
    let at = open_tag.find("fill=\"")?;
    let value = &open_tag[at + "fill=\"".len()..];
    let end = value.find('"')?;
    Some(&value[..end])
}

/// Rewrites every remaining white-family `fill="..."` value to `none`.
fn rewrite_white_fills(markup: &str) -> String {
    let mut result = String::with_capacity(markup.len());
    let pattern = "fill=\"";
    let mut remaining = markup;

    while let Some(start) = remaining.find(pattern) {
        result.push_str(&remaining[..start + pattern.len()]);
        remaining = &remaining[start + pattern.len()..];

        if let Some(end) = remaining.find('"') {
            let value = &remaining[..end];
            if is_white_fill(value) {
                result.push_str("none");
            } else {
                result.push_str(value);
            }
            remaining = &remaining[end..];
        }
    }

    result.push_str(remaining);
    result
}

// ============================================================================
// Tests
// ============================================================================
