//! Conversions between the admin forms' free text and stored list fields.

/// One entry per non-blank line. Used for `keyLearnings` and `focusAreas`.
pub fn lines_to_list(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_lines(items: &[String]) -> String {
    items.join("\n")
}

/// Comma-separated entries, each trimmed. Used for service `features`.
pub fn comma_list(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',').map(|item| item.trim().to_string()).collect()
}

pub fn join_comma(items: &[String]) -> String {
    items.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_drop_blank_entries() {
        let text = "Owned the billing service\n\n   \nRan on-call rotations\n";
        assert_eq!(
            lines_to_list(text),
            vec!["Owned the billing service", "Ran on-call rotations"]
        );
    }

    #[test]
    fn test_lines_keep_inner_whitespace() {
        assert_eq!(lines_to_list("  indented"), vec!["  indented"]);
    }

    #[test]
    fn test_empty_text_gives_empty_list() {
        assert!(lines_to_list("").is_empty());
        assert!(comma_list("").is_empty());
    }

    #[test]
    fn test_comma_list_trims() {
        assert_eq!(
            comma_list("Auth , Rate limiting,Docs"),
            vec!["Auth", "Rate limiting", "Docs"]
        );
    }

    #[test]
    fn test_joins_match_form_display() {
        let items = vec!["Rust".to_string(), "Go".to_string()];
        assert_eq!(join_comma(&items), "Rust, Go");
        assert_eq!(join_lines(&items), "Rust\nGo");
        assert_eq!(comma_list(&join_comma(&items)), items);
        assert_eq!(lines_to_list(&join_lines(&items)), items);
    }
}
