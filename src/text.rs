//! Formatting numbers and lists for report prose

use std::fmt::Display;

/// Round to the two most significant digits and group thousands with commas.
///
/// `12345` becomes `"12,000"`, `987` becomes `"990"`, `7` stays `"7"`.
/// Values under 100 keep up to three significant digits before the final
/// rounding to an integer, so `42.37` becomes `"42"`. Exact halves round to
/// even. Applying it to its own (ungrouped) output gives the same string.
pub fn num_round(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }

    let x = if x > 100.0 {
        round_to(x, 2 - int_digits(x))
    } else if x < 100.0 {
        round_to(x, 3 - int_digits(x))
    } else {
        round_to(x, -1)
    };

    // integral after rounding, so `{:.0}` prints it exactly at any magnitude
    let rounded = round_half_even(x);
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    group_digits(&format!("{rounded:.0}"))
}

/// Comma-grouped integer: `1234567` becomes `"1,234,567"`
pub fn group_thousands(n: i64) -> String {
    group_digits(&n.to_string())
}

fn group_digits(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", number),
    };
    let mut out = String::with_capacity(number.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"Derby (40%), Matlock (30%), Winster (20%)."` from parallel lists.
///
/// Only the first `limit` pairs are kept; extra names or values without a
/// partner are dropped.
pub fn written_list_with_values<N: Display, V: Display>(
    names: &[N],
    values: &[V],
    limit: usize,
) -> String {
    let pairs: Vec<String> = names
        .iter()
        .zip(values)
        .take(limit)
        .map(|(name, value)| format!("{name} ({value})"))
        .collect();
    format!("{}.", pairs.join(", "))
}

/// `"a, b and c"`
pub fn written_list<T: Display>(items: &[T]) -> String {
    written_list_with(items, |item| item.to_string())
}

/// [`written_list`] with each item formatted by `f` first
pub fn written_list_with<T, F>(items: &[T], f: F) -> String
where
    F: Fn(&T) -> String,
{
    let mut words: Vec<String> = items.iter().map(f).collect();
    match words.pop() {
        None => String::new(),
        Some(last) if words.is_empty() => last,
        Some(last) => format!("{} and {}", words.join(", "), last),
    }
}

/// Length of the integer part as written, minus sign included
fn int_digits(x: f64) -> i32 {
    let int = x.trunc();
    if int.abs() < 1e18 {
        return (int as i64).to_string().len() as i32;
    }
    let sign = i32::from(int < 0.0);
    int.abs().log10().floor() as i32 + 1 + sign
}

/// Round to `places` decimals; negative places round to tens, hundreds, ...
fn round_to(x: f64, places: i32) -> f64 {
    if places >= 0 {
        let scale = 10f64.powi(places);
        round_half_even(x * scale) / scale
    } else {
        let scale = 10f64.powi(-places);
        round_half_even(x / scale) * scale
    }
}

fn round_half_even(v: f64) -> f64 {
    if (v - v.trunc()).abs() == 0.5 {
        2.0 * (v / 2.0).round()
    } else {
        v.round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_num_round_examples() {
        assert_eq!(num_round(12345.0), "12,000");
        assert_eq!(num_round(987.0), "990");
        assert_eq!(num_round(7.0), "7");
        assert_eq!(num_round(100.0), "100");
        assert_eq!(num_round(1_234_567.0), "1,200,000");
        assert_eq!(num_round(42.37), "42");
        assert_eq!(num_round(0.4), "0");
        assert_eq!(num_round(99.6), "100");
    }

    #[test]
    fn test_num_round_halves_go_to_even() {
        assert_eq!(num_round(125.0), "120");
        assert_eq!(num_round(135.0), "140");
        assert_eq!(num_round(2.5), "2");
    }

    #[test]
    fn test_num_round_negative() {
        // the minus sign counts as a digit, so one less significant figure survives
        assert_eq!(num_round(-12345.0), "-12,000");
        assert_eq!(num_round(-7.0), "-7");
    }

    #[test]
    fn test_num_round_beyond_i64() {
        assert_eq!(num_round(1e20), "100,000,000,000,000,000,000");
        assert_eq!(num_round(1e19), "10,000,000,000,000,000,000");
        assert_eq!(num_round(-1e19), "-10,000,000,000,000,000,000");
        assert_eq!(num_round(1.234e21), "1,200,000,000,000,000,000,000");
        assert_eq!(num_round(-0.4), "0");
    }

    #[test]
    fn test_num_round_is_idempotent() {
        for x in [0.0, 3.2, 7.0, 55.5, 100.0, 101.0, 987.0, 12345.0, 6_543_210.0] {
            let once = num_round(x);
            let value: f64 = once.replace(',', "").parse().unwrap();
            assert_eq!(num_round(value), once, "input {x}");
        }
    }

    #[test]
    fn test_num_round_non_finite() {
        assert_eq!(num_round(f64::NAN), "NaN");
        assert_eq!(num_round(f64::INFINITY), "inf");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
        assert_eq!(group_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_written_list_with_values() {
        let names = ["Derby", "Matlock", "Winster", "Bakewell"];
        let values = ["40%", "30%", "20%", "10%"];
        assert_eq!(
            written_list_with_values(&names, &values, 3),
            "Derby (40%), Matlock (30%), Winster (20%)."
        );
        assert_eq!(written_list_with_values(&names[..1], &[4], 3), "Derby (4).");
        assert_eq!(written_list_with_values::<&str, &str>(&[], &[], 3), ".");
    }

    #[test]
    fn test_written_list() {
        assert_eq!(written_list(&["a", "b", "c"]), "a, b and c");
        assert_eq!(written_list(&["a", "b"]), "a and b");
        assert_eq!(written_list(&["a"]), "a");
        assert_eq!(written_list::<&str>(&[]), "");
        assert_eq!(written_list(&[1, 2, 3]), "1, 2 and 3");
    }

    #[test]
    fn test_written_list_with_preprocessing() {
        let shares = [40, 25];
        assert_eq!(
            written_list_with(&shares, |s| format!("{s}%")),
            "40% and 25%"
        );
    }
}
