//! Text-to-number coercion for form inputs.
//!
//! Coercion never rejects input: text without a numeric prefix becomes `NaN`
//! and is forwarded to the prediction service, which decides validity.

use shared::{
    domain::{NumericField, NUMERIC_FIELD_COUNT},
    protocol::PredictionRequest,
};

use crate::form::FormState;

const INFINITY_LITERAL: &str = "Infinity";

/// Converts raw input text to `f64`, independent of locale.
///
/// Leading whitespace is skipped and the longest numeric prefix is parsed
/// (`"12px"` is `12.0`, `"1e"` is `1.0`). Text with no numeric prefix,
/// including the empty string, yields `NaN`.
pub fn coerce_number(raw: &str) -> f64 {
    let text = raw.trim_start();
    let prefix_len = numeric_prefix_len(text);
    if prefix_len == 0 {
        return f64::NAN;
    }

    let prefix = &text[..prefix_len];
    let unsigned = prefix.trim_start_matches(|c: char| c == '+' || c == '-');
    if unsigned == INFINITY_LITERAL {
        return if prefix.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    prefix.parse::<f64>().unwrap_or(f64::NAN)
}

/// Builds the wire payload from the current form, coercing every numeric field.
pub fn build_request(form: &FormState) -> PredictionRequest {
    let mut values = [f64::NAN; NUMERIC_FIELD_COUNT];
    for field in NumericField::ALL {
        values[field.index()] = coerce_number(form.value(field));
    }
    PredictionRequest::from_values(values, form.ocean_proximity())
}

fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    if text[pos..].starts_with(INFINITY_LITERAL) {
        return pos + INFINITY_LITERAL.len();
    }

    let integer_digits = count_digits(&bytes[pos..]);
    pos += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[pos + 1..]);
        if integer_digits > 0 || fraction_digits > 0 {
            pos += 1 + fraction_digits;
        }
    }

    if integer_digits == 0 && fraction_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exponent_pos = pos + 1;
        if matches!(bytes.get(exponent_pos), Some(b'+' | b'-')) {
            exponent_pos += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent_pos..]);
        if exponent_digits > 0 {
            pos = exponent_pos + exponent_digits;
        }
    }

    pos
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
