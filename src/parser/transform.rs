//! Parsing of the SVG `transform` attribute

use crate::geometry::Affine;

use super::lexer::numbers;

/// Parse a `transform` attribute into an affine matrix.
///
/// Only the `matrix(a, b, c, d, e, f)` form is understood. Absent or empty
/// input, any other transform function, and a matrix with fewer than six
/// numbers all yield the identity. Never fails.
pub fn parse_transform(transform: Option<&str>) -> Affine {
    let Some(text) = transform.filter(|t| !t.is_empty()) else {
        return Affine::IDENTITY;
    };

    if !text.to_ascii_lowercase().contains("matrix") {
        log::debug!("unsupported transform '{}', using identity", text);
        return Affine::IDENTITY;
    }

    let values: Vec<f64> = numbers(text).take(6).collect();
    match values[..] {
        [a, b, c, d, e, f] => Affine::new(a, b, c, d, e, f),
        _ => {
            log::debug!("malformed matrix '{}', using identity", text);
            Affine::IDENTITY
        }
    }
}
