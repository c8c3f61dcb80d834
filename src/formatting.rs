// src/formatting.rs

/// Formats `value` like C `printf("%.*E")` / `"%.*e"`.
///
/// Rust's `{:e}` writes exponents as `e-5`; report lines and plot titles use
/// the conventional signed, two-digit form (`1.23450000E-05`).
pub fn format_sci(value: f64, precision: usize, uppercase: bool) -> String {
    if value.is_nan() {
        return if uppercase { "NAN" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        let s = if value > 0.0 { "inf" } else { "-inf" };
        return if uppercase { s.to_uppercase() } else { s.to_string() };
    }

    let formatted = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = match formatted.split_once('e') {
        Some(parts) => parts,
        None => return formatted,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    let marker = if uppercase { 'E' } else { 'e' };
    format!("{mantissa}{marker}{sign}{:02}", exponent.abs())
}

/// Formats `value` like C `printf("%.*f")`, so non-finite values read
/// `nan`, `inf` and `-inf`.
pub fn format_fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    format!("{:.*}", precision, value)
}


// src/formatting.rs
