//! Low-level numeric extraction from free-form listing text.
//!
//! Platforms wrap numbers in arbitrary prose ("Рейтинг 4,6 из 5",
//! "324 отзыва"), use a comma as the decimal separator, and sometimes omit
//! the value entirely. These helpers scan bytes directly rather than pulling
//! `regex` into the hot path; see [`crate::extract`] for how they compose
//! into card extraction.

/// Extracts the first decimal number from `text`.
///
/// Tolerates a comma or dot as the decimal separator and any surrounding
/// non-numeric characters: `"4,6"` → 4.6, `"Рейтинг 4.8 из 5"` → 4.8.
/// Returns `None` when `text` contains no digits.
#[must_use]
pub(crate) fn first_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < len && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let mut number = text[start..i].to_owned();

            // One fractional part, with either separator.
            if i + 1 < len && (bytes[i] == b'.' || bytes[i] == b',') && bytes[i + 1].is_ascii_digit()
            {
                i += 1;
                let frac_start = i;
                while i < len && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                number.push('.');
                number.push_str(&text[frac_start..i]);
            }

            return number.parse::<f64>().ok();
        }
        i += 1;
    }
    None
}

/// Extracts the first unsigned integer from `text`: `"324 отзыва"` → 324.
///
/// Returns `None` when `text` contains no digits (or the run of digits does
/// not fit in a `u32`).
#[must_use]
pub(crate) fn first_uint(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < len && bytes[i].is_ascii_digit() {
                i += 1;
            }
            return text[start..i].parse::<u32>().ok();
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // first_float
    // -----------------------------------------------------------------------

    #[test]
    fn float_comma_separator() {
        assert_eq!(first_float("4,6"), Some(4.6));
    }

    #[test]
    fn float_dot_separator() {
        assert_eq!(first_float("4.8"), Some(4.8));
    }

    #[test]
    fn float_with_surrounding_prose() {
        assert_eq!(first_float("Рейтинг 4,6 из 5"), Some(4.6));
    }

    #[test]
    fn float_bare_integer() {
        assert_eq!(first_float("Оценка 5"), Some(5.0));
    }

    #[test]
    fn float_first_number_wins() {
        assert_eq!(first_float("3 из 5"), Some(3.0));
    }

    #[test]
    fn float_no_digits_returns_none() {
        assert_eq!(first_float("нет оценки"), None);
    }

    #[test]
    fn float_trailing_separator_is_not_fraction() {
        // "4." with nothing after the dot: the integer part alone.
        assert_eq!(first_float("4."), Some(4.0));
    }

    // -----------------------------------------------------------------------
    // first_uint
    // -----------------------------------------------------------------------

    #[test]
    fn uint_with_suffix_text() {
        assert_eq!(first_uint("324 отзыва"), Some(324));
    }

    #[test]
    fn uint_embedded_in_text() {
        assert_eq!(first_uint("Отзывы (17)"), Some(17));
    }

    #[test]
    fn uint_no_digits_returns_none() {
        assert_eq!(first_uint("Отзывы"), None);
    }

    #[test]
    fn uint_zero() {
        assert_eq!(first_uint("0 отзывов"), Some(0));
    }
}
