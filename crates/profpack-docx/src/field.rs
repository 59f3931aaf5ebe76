//! Blank-field heuristics.
//!
//! Template authors mark fillable slots implicitly: an underlined run of
//! spaces, a long run of plain spaces (when the underline lives on the
//! paragraph style instead of the run), or a run of underscores. The
//! classifier works on a run's text and underline flag alone so it can be
//! tested against synthetic runs without any document structure.

/// No-break space used to pad filled values; Word collapses plain spaces.
pub const FILLER: char = '\u{00A0}';

/// Does this run look like an unfilled field slot?
///
/// True when any of:
/// - underlined with blank text at least 2 chars wide (a 1-char blank is a
///   separator, not a field);
/// - blank text at least 8 chars wide, underlined or not;
/// - 5 or more underscore characters anywhere in the text.
pub fn is_blank_field_run(text: &str, underlined: bool) -> bool {
    let width = text.chars().count();
    let blank = text.trim().is_empty();
    if underlined && blank && width >= 2 {
        return true;
    }
    if blank && width >= 8 {
        return true;
    }
    text.chars().filter(|c| *c == '_').count() >= 5
}

/// `value` padded with no-break spaces up to `width` characters.
///
/// A value already `width` or longer is returned as-is: the field grows and
/// is never truncated.
pub fn pad_to_length(value: &str, width: usize) -> String {
    let value_width = value.chars().count();
    let mut out = String::with_capacity(value.len() + width.saturating_sub(value_width));
    out.push_str(value);
    out.extend(std::iter::repeat_n(FILLER, width.saturating_sub(value_width)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn underlined_blank_runs_are_fields() {
        assert!(is_blank_field_run("  ", true));
        assert!(is_blank_field_run("          ", true));
        // A single space is a separator even when underlined.
        assert!(!is_blank_field_run(" ", true));
        assert!(!is_blank_field_run("", true));
    }

    #[test]
    fn long_blank_runs_are_fields_without_underline() {
        assert!(is_blank_field_run("        ", false));
        assert!(!is_blank_field_run("       ", false));
    }

    #[test]
    fn underscore_runs_are_fields() {
        assert!(is_blank_field_run("_____", false));
        assert!(is_blank_field_run("__ __ _", false));
        assert!(!is_blank_field_run("____", false));
    }

    #[test]
    fn text_bearing_runs_are_not_fields() {
        assert!(!is_blank_field_run("Ф.И.О.:", true));
        assert!(!is_blank_field_run("Иванов", false));
    }

    #[test]
    fn padding_preserves_total_width() {
        let filled = pad_to_length("Иванов", 10);
        assert_eq!(filled.chars().count(), 10);
        assert!(filled.starts_with("Иванов"));
        assert!(filled.ends_with(&FILLER.to_string().repeat(4)));
    }

    #[test]
    fn long_values_are_not_truncated() {
        assert_eq!(pad_to_length("Петров П.П.", 10), "Петров П.П.");
    }

    proptest! {
        #[test]
        fn padded_width_is_max_of_value_and_field(value in "\\PC{0,20}", width in 0usize..32) {
            let padded = pad_to_length(&value, width);
            prop_assert_eq!(
                padded.chars().count(),
                value.chars().count().max(width)
            );
            prop_assert!(padded.starts_with(&value));
        }

        #[test]
        fn five_underscores_always_classify(prefix in "[a-z ]{0,6}", suffix in "[a-z ]{0,6}") {
            let text = format!("{prefix}_____{suffix}");
            prop_assert!(is_blank_field_run(&text, false));
        }
    }
}
