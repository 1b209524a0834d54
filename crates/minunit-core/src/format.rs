//! Number rendering for diagnostic messages.

/// Render `value` like C's `%.<precision>g`.
///
/// The shorter of fixed and scientific notation is chosen the way `%g` does:
/// scientific when the decimal exponent is below -4 or at least `precision`.
/// Trailing zeros in the fraction are dropped, and a scientific exponent is
/// signed with at least two digits (`1e-13`, `1.5e+20`).
#[must_use]
pub fn format_significant(value: f64, precision: usize) -> String {
    let precision = precision.max(1);

    if value.is_nan() {
        return String::from("nan");
    }
    if value.is_infinite() {
        return String::from(if value < 0.0 { "-inf" } else { "inf" });
    }
    if value == 0.0 {
        return String::from(if value.is_sign_negative() { "-0" } else { "0" });
    }

    // Rounding to `precision` digits may carry into the exponent (9.99.. -> 1e1),
    // so read the exponent back from the rounded scientific form.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    let precision = precision as i32;
    if exponent < -4 || exponent >= precision {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
