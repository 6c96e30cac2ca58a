//! Byte-level encoding of identity attributes
//!
//! Strings are written as a 2-byte big-endian length followed by modified
//! UTF-8, the layout a JVM-side `writeUTF` produces, so identities computed
//! here agree with ones computed next to the monitored runtime.

use super::error::IdentityError;

/// Largest encoded string a 2-byte length prefix can describe
pub const MAX_ENCODED_LEN: usize = u16::MAX as usize;

/// Modified UTF-8: NUL becomes `C0 80` and supplementary characters are
/// written as two 3-byte surrogate encodings.
pub fn modified_utf8(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for unit in value.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | ((unit >> 6) & 0x1F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | ((unit >> 12) & 0x0F) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

/// Append `value` as a length-prefixed modified UTF-8 string
pub fn write_utf(out: &mut Vec<u8>, field: &str, value: &str) -> Result<(), IdentityError> {
    let encoded = modified_utf8(value);
    let len = u16::try_from(encoded.len()).map_err(|_| {
        IdentityError::UnsupportedAttribute(format!(
            "{field} encodes to {} bytes, limit is {MAX_ENCODED_LEN}",
            encoded.len()
        ))
    })?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&encoded);
    Ok(())
}

/// Render items as `[a, b, c]`
pub fn bracketed<I, T>(items: I, render: impl Fn(T) -> String) -> String
where
    I: IntoIterator<Item = T>,
{
    let parts: Vec<String> = items.into_iter().map(render).collect();
    format!("[{}]", parts.join(", "))
}

/// JVM-style floating point text: integral values keep a `.0`, very small or
/// large magnitudes use `E` notation.
pub fn jvm_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    let magnitude = value.abs();
    if (1e-3..1e7).contains(&magnitude) {
        with_fraction(format!("{value}"))
    } else {
        scientific(format!("{value:e}"))
    }
}

pub fn jvm_float(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    let magnitude = value.abs();
    if (1e-3..1e7).contains(&magnitude) {
        with_fraction(format!("{value}"))
    } else {
        scientific(format!("{value:e}"))
    }
}

fn with_fraction(mut text: String) -> String {
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// `1.5e-5` -> `1.5E-5`, `1e7` -> `1.0E7`
fn scientific(text: String) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) => format!("{}E{exponent}", with_fraction(mantissa.to_string())),
        None => text,
    }
}
