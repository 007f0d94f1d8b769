use compact_str::CompactString;

pub type Ident = CompactString;

/// Checks `text` against `[a-zA-Z_][a-zA-Z0-9_]*`.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if is_identifier_start(c) => chars.all(is_identifier_continue),
        _ => false,
    }
}

pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits a comma separated list, trimming every item. An empty input yields a
/// single empty item.
pub fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_identifiers() {
        for name in ["a", "_", "_tmp", "counter2", "Max_Value"] {
            assert!(is_identifier(name), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_non_identifiers() {
        for name in ["", "1a", "a b", "a-b", "é", "a[0]", " a"] {
            assert!(!is_identifier(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn split_list_trims_items() {
        let items: Vec<_> = split_list(" a, b ,c").collect();
        assert_eq!(items, ["a", "b", "c"]);
        let items: Vec<_> = split_list("").collect();
        assert_eq!(items, [""]);
    }

    proptest! {
        #[test]
        fn identifier_grammar(name in "[a-zA-Z_][a-zA-Z0-9_]{0,16}") {
            prop_assert!(is_identifier(&name));
        }

        #[test]
        fn leading_digit_is_rejected(name in "[0-9][a-zA-Z0-9_]{0,16}") {
            prop_assert!(!is_identifier(&name));
        }
    }
}
