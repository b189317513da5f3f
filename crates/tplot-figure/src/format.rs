//! Text formatting helpers for tick labels and padded text

/// Format a number like C's `%.{precision}g`
///
/// Uses scientific notation when the exponent is below -4 or at least
/// `precision`, and strips trailing zeros in both forms.
#[must_use]
pub fn format_general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    let precision = i32::try_from(precision).unwrap_or(i32::MAX);
    if exponent < -4 || exponent >= precision {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(precision - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Keep at most `max_chars` characters
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(index, _)| &text[..index])
}

/// Centre `text` in `width` cells, with the same odd-padding rule as Python's
/// `str.center`
#[must_use]
pub fn center(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    pad(text, left, margin - left, fill)
}

#[must_use]
pub fn ljust(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    pad(text, 0, width.saturating_sub(len), fill)
}

#[must_use]
pub fn rjust(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    pad(text, width.saturating_sub(len), 0, fill)
}

fn pad(text: &str, left: usize, right: usize, fill: char) -> String {
    let mut out = String::with_capacity(text.len() + left + right);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_general_fixed() {
        assert_eq!(format_general(0.0, 2), "0");
        assert_eq!(format_general(0.5, 2), "0.5");
        assert_eq!(format_general(2.0, 2), "2");
        assert_eq!(format_general(10.0, 2), "10");
        assert_eq!(format_general(20.0, 2), "20");
        assert_eq!(format_general(-2.5, 2), "-2.5");
        assert_eq!(format_general(1.26, 2), "1.3");
        assert_eq!(format_general(0.00012, 2), "0.00012");
        assert_eq!(format_general(9.96, 2), "10");
    }

    #[test]
    fn test_format_general_scientific() {
        assert_eq!(format_general(100.0, 2), "1e+02");
        assert_eq!(format_general(1234.0, 2), "1.2e+03");
        assert_eq!(format_general(99.6, 2), "1e+02");
        assert_eq!(format_general(0.000012, 2), "1.2e-05");
        assert_eq!(format_general(-3.0e10, 2), "-3e+10");
        assert_eq!(format_general(1.5e-300, 2), "1.5e-300");
    }

    #[test]
    fn test_format_general_precision() {
        assert_eq!(format_general(1234.0, 4), "1234");
        assert_eq!(format_general(3.14159, 3), "3.14");
        assert_eq!(format_general(f64::INFINITY, 2), "inf");
    }

    #[test]
    fn test_center_matches_python_padding() {
        // "abc".center(6, "-") == "-abc--" ; "ab".center(5, "-") == "--ab-"
        assert_eq!(center("abc", 6, '-'), "-abc--");
        assert_eq!(center("ab", 5, '-'), "--ab-");
        assert_eq!(center("Legend", 10, '-'), "--Legend--");
        assert_eq!(center("toolong", 3, ' '), "toolong");
    }

    #[test]
    fn test_justify() {
        assert_eq!(ljust("0", 4, ' '), "0   ");
        assert_eq!(rjust("2", 4, ' '), "   2");
        assert_eq!(rjust("1.5", 2, ' '), "1.5");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Temperature", 4), "Temp");
        assert_eq!(truncate("hé", 5), "hé");
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("x", 0), "");
    }

    proptest! {
        #[test]
        fn center_fills_width(text in "[a-z]{0,10}", width in 0usize..20) {
            let centred = center(&text, width, ' ');
            prop_assert_eq!(centred.chars().count(), width.max(text.len()));
            prop_assert!(centred.contains(text.as_str()));
        }

        #[test]
        fn format_general_round_trips_to_two_digits(value in -1.0e6f64..1.0e6) {
            let text = format_general(value, 2);
            let parsed: f64 = text.parse().unwrap();
            let tolerance = value.abs() * 0.05 + 1e-300;
            prop_assert!((parsed - value).abs() <= tolerance, "{} -> {}", value, text);
        }
    }
}
