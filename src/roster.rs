use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    Ok(Vec<u32>),
    Invalid(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassSizeError {
    Invalid,
    AboveLimit(u32),
}

/// Reads a trimmed token in full as a number and keeps it only when it is a
/// whole value. `"3.0"`, `"1e2"` and `"0x10"` qualify; `"3.5"`, `"12abc"`,
/// `"-"` and `"inf"` do not.
fn whole_value(token: &str) -> Option<f64> {
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        if hex.is_empty() {
            return None;
        }
        let mut value = 0.0_f64;
        for c in hex.chars() {
            value = value * 16.0 + f64::from(c.to_digit(16)?);
        }
        return Some(value);
    }

    let value = token.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0).then_some(value)
}

/// Splits roll-number input on runs of commas and newlines, trims each
/// token and drops the empty ones.
pub fn tokenize(raw: &str) -> Vec<&str> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses the present-student list for a class of `class_size`.
///
/// Out-of-range whole numbers are dropped without complaint. A single token
/// that is not a whole number rejects the entire input, and every such token
/// is reported in input order.
pub fn parse(raw: &str, class_size: u32) -> ParseResult {
    let mut present = BTreeSet::new();
    let mut invalid: Vec<String> = Vec::new();

    for token in tokenize(raw) {
        match whole_value(token) {
            Some(v) if v >= 1.0 && v <= f64::from(class_size) => {
                present.insert(v as u32);
            }
            Some(_) => {}
            None => invalid.push(token.to_string()),
        }
    }

    if !invalid.is_empty() {
        return ParseResult::Invalid(invalid);
    }
    ParseResult::Ok(present.into_iter().collect())
}

/// Parses a class size typed into the setup field. Empty, non-numeric,
/// fractional, zero and negative values are `Invalid`; whole values above
/// `max_class_size` are `AboveLimit`.
pub fn parse_class_size(raw: &str, max_class_size: u32) -> Result<u32, ClassSizeError> {
    let size = whole_value(raw.trim())
        .filter(|v| *v >= 1.0)
        .ok_or(ClassSizeError::Invalid)?;
    if size > f64::from(max_class_size) {
        return Err(ClassSizeError::AboveLimit(max_class_size));
    }
    Ok(size as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(tokens: &[&str]) -> ParseResult {
        ParseResult::Invalid(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn ordering_and_duplicates_do_not_matter() {
        let expected = ParseResult::Ok(vec![1, 2, 3]);
        assert_eq!(parse("3,1,2", 3), expected);
        assert_eq!(parse("1,2,3", 3), expected);
        assert_eq!(parse("1,1,2,2,3", 10), expected);
    }

    #[test]
    fn out_of_range_values_are_dropped_silently() {
        assert_eq!(parse("1,2,99", 5), ParseResult::Ok(vec![1, 2]));
        assert_eq!(parse("0,-3,4", 5), ParseResult::Ok(vec![4]));
        assert_eq!(parse("99999999999999999999,2", 5), ParseResult::Ok(vec![2]));
    }

    #[test]
    fn non_integral_tokens_reject_the_whole_input() {
        assert_eq!(parse("1,2,abc", 5), invalid(&["abc"]));
        assert_eq!(parse("3.5", 5), invalid(&["3.5"]));
        assert_eq!(parse("12abc, x, 2, x", 20), invalid(&["12abc", "x", "x"]));
    }

    #[test]
    fn sign_only_and_punctuation_tokens_are_invalid() {
        assert_eq!(
            parse("-, +, ., .5, 1 2, inf, 0x", 5),
            invalid(&["-", "+", ".", ".5", "1 2", "inf", "0x"])
        );
    }

    #[test]
    fn whole_fractions_are_accepted() {
        assert_eq!(parse("3.0, 4., +5", 5), ParseResult::Ok(vec![3, 4, 5]));
    }

    #[test]
    fn exponent_and_hex_tokens_are_whole_numbers() {
        assert_eq!(parse("1e2, 2", 5), ParseResult::Ok(vec![2]));
        assert_eq!(parse("2E0", 5), ParseResult::Ok(vec![2]));
        assert_eq!(parse("0x10, 2", 20), ParseResult::Ok(vec![2, 16]));
        assert_eq!(parse("0X3, 1.5e1", 20), ParseResult::Ok(vec![3, 15]));
        assert_eq!(parse("0xZZ", 20), invalid(&["0xZZ"]));
        assert_eq!(parse("2.5e0", 20), invalid(&["2.5e0"]));
        assert_eq!(parse("-0x2", 20), invalid(&["-0x2"]));
    }

    #[test]
    fn splits_on_comma_and_newline_runs() {
        let parsed = parse("1,,2\n\n3,\r\n 4 ,\n", 10);
        assert_eq!(parsed, ParseResult::Ok(vec![1, 2, 3, 4]));
        assert_eq!(tokenize(" , \n ,"), Vec::<&str>::new());
    }

    #[test]
    fn mixed_case_from_the_report_walkthrough() {
        assert_eq!(parse("2,4,4,6", 5), ParseResult::Ok(vec![2, 4]));
    }

    #[test]
    fn class_size_requires_positive_whole_number() {
        assert_eq!(parse_class_size("30", 1000), Ok(30));
        assert_eq!(parse_class_size(" 7 ", 1000), Ok(7));
        assert_eq!(parse_class_size("3e1", 1000), Ok(30));
        assert_eq!(parse_class_size("", 1000), Err(ClassSizeError::Invalid));
        assert_eq!(parse_class_size("abc", 1000), Err(ClassSizeError::Invalid));
        assert_eq!(parse_class_size("0", 1000), Err(ClassSizeError::Invalid));
        assert_eq!(parse_class_size("-4", 1000), Err(ClassSizeError::Invalid));
        assert_eq!(parse_class_size("2.5", 1000), Err(ClassSizeError::Invalid));
    }

    #[test]
    fn class_size_above_the_cap_names_the_cap() {
        let above = Err(ClassSizeError::AboveLimit(1000));
        assert_eq!(parse_class_size("1001", 1000), above);
        assert_eq!(parse_class_size("1e30", 1000), above);
        assert_eq!(parse_class_size("1000", 1000), Ok(1000));
    }
}
