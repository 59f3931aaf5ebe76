/// Sanitize a subject name into a filesystem-safe file stem.
///
/// The input is trimmed, then every character outside Unicode letters/digits,
/// `_`, `-`, `.`, and the plain space is replaced with `_`. Cyrillic names pass
/// through unchanged. The transform is idempotent, so a collision between two
/// sanitized names stays stable across runs.
pub fn safe_file_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn keeps_cyrillic_and_basic_punctuation() {
        assert_eq!(safe_file_name("Иванов Иван"), "Иванов Иван");
        assert_eq!(safe_file_name("Петров П.П."), "Петров П.П.");
        assert_eq!(safe_file_name("a-b_c.d e"), "a-b_c.d e");
    }

    #[test]
    fn replaces_path_separators_and_symbols() {
        assert_eq!(safe_file_name("a/b\\c"), "a_b_c");
        assert_eq!(safe_file_name("имя?*:|"), "имя____");
    }

    #[test]
    fn trims_before_sanitizing() {
        assert_eq!(safe_file_name("  Тест  "), "Тест");
    }

    proptest! {
        #[test]
        fn idempotent(name in "\\PC{0,40}") {
            let once = safe_file_name(&name);
            prop_assert_eq!(safe_file_name(&once), once);
        }

        #[test]
        fn output_has_no_reserved_characters(name in "\\PC{0,40}") {
            let safe = safe_file_name(&name);
            let all_allowed = safe
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '));
            prop_assert!(all_allowed);
        }
    }
}
