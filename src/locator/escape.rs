//! XPath string literal escaping.

/// Converts a literal string into an XPath string literal.
///
/// - No apostrophe: wrapped in single quotes.
/// - Apostrophe but no double quote: wrapped in double quotes.
/// - Both: split on `'` and rebuilt with `concat()`, with a `"'"`
///   segment between every piece.
///
/// Existing locator strings depend on this exact output. Empty pieces are
/// kept, so a leading or trailing apostrophe yields an empty `''` segment;
/// the older Java escaper dropped trailing empty pieces and lost the final
/// apostrophe.
///
/// # Example
///
/// ```
/// use mobile_keywords::locator::escape_xpath_value;
///
/// assert_eq!(escape_xpath_value("foo"), "'foo'");
/// assert_eq!(escape_xpath_value("fo'o"), "\"fo'o\"");
/// assert_eq!(escape_xpath_value("f'o\"o"), "concat('f', \"'\", 'o\"o')");
/// ```
#[must_use]
pub fn escape_xpath_value(value: &str) -> String {
    let has_apos = value.contains('\'');

    if has_apos && value.contains('"') {
        let parts: Vec<&str> = value.split('\'').collect();
        return format!("concat('{}')", parts.join("', \"'\", '"));
    }
    if has_apos {
        return format!("\"{value}\"");
    }
    format!("'{value}'")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_plain_value_single_quoted() {
        assert_eq!(escape_xpath_value("foo"), "'foo'");
    }

    #[test]
    fn test_apostrophe_double_quoted() {
        assert_eq!(escape_xpath_value("fo'o"), "\"fo'o\"");
    }

    #[test]
    fn test_double_quote_single_quoted() {
        assert_eq!(escape_xpath_value("fo\"o"), "'fo\"o'");
    }

    #[test]
    fn test_both_quotes_use_concat() {
        assert_eq!(
            escape_xpath_value("f'o\"o"),
            "concat('f', \"'\", 'o\"o')"
        );
    }

    #[test]
    fn test_many_apostrophes() {
        assert_eq!(
            escape_xpath_value("a'b'c'\"d"),
            "concat('a', \"'\", 'b', \"'\", 'c', \"'\", '\"d')"
        );
    }

    #[test]
    fn test_trailing_apostrophe_keeps_empty_segment() {
        assert_eq!(escape_xpath_value("x\"y'"), "concat('x\"y', \"'\", '')");
        assert_eq!(escape_xpath_value("'x\""), "concat('', \"'\", 'x\"')");
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(escape_xpath_value(""), "''");
    }

    proptest! {
        #[test]
        fn prop_without_apostrophe_is_single_quoted(value in "[^']*") {
            prop_assert_eq!(escape_xpath_value(&value), format!("'{value}'"));
        }

        #[test]
        fn prop_concat_has_one_separator_per_apostrophe(value in "[a-z'\"]*'[a-z'\"]*\"[a-z'\"]*") {
            let escaped = escape_xpath_value(&value);
            prop_assert!(escaped.starts_with("concat('"));
            let apostrophes = value.matches('\'').count();
            prop_assert_eq!(escaped.matches("\"'\"").count(), apostrophes);
        }
    }
}
