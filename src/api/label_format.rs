use std::sync::Arc;

/// Formatter turning a tick value into its label text.
pub type LabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

const SIGNIFICANT_DIGITS: i32 = 6;

/// Formats `value` like C's `%g`: six significant digits, trailing zeros
/// removed, scientific notation below `1e-4` and from `1e6` upwards.
#[must_use]
pub fn format_label_default(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }

    // the exponent after rounding to the significant digits decides the style
    let scientific = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        );
    }

    let decimals = (SIGNIFICANT_DIGITS - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_owned()
}

/// Default formatter as a shareable closure.
#[must_use]
pub fn default_label_formatter() -> LabelFormatterFn {
    Arc::new(format_label_default)
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::format_label_default;

    #[test]
    fn fixed_notation_trims_trailing_zeros() {
        assert_eq!(format_label_default(10.0), "10");
        assert_eq!(format_label_default(0.5), "0.5");
        assert_eq!(format_label_default(-2.25), "-2.25");
        assert_eq!(format_label_default(123456.0), "123456");
        assert_eq!(format_label_default(0.0001), "0.0001");
    }

    #[test]
    fn rounds_to_six_significant_digits() {
        assert_eq!(format_label_default(3.14159265), "3.14159");
        assert_eq!(format_label_default(0.1 + 0.2), "0.3");
    }

    #[test]
    fn scientific_notation_outside_fixed_range() {
        assert_eq!(format_label_default(1_000_000.0), "1e+06");
        assert_eq!(format_label_default(1234567.0), "1.23457e+06");
        assert_eq!(format_label_default(0.00001), "1e-05");
        assert_eq!(format_label_default(-2.5e-150), "-2.5e-150");
    }

    #[test]
    fn zero_and_non_finite_values() {
        assert_eq!(format_label_default(0.0), "0");
        assert_eq!(format_label_default(-0.0), "0");
        assert_eq!(format_label_default(f64::INFINITY), "inf");
        assert_eq!(format_label_default(f64::NAN), "nan");
    }
}
