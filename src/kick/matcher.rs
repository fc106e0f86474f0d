//! Keyword matching logic.
//!
//! # Responsibilities
//! - Case-insensitive substring search of kick reasons
//! - Ordered, first-match-wins scanning of the keyword list
//!
//! The first keyword in list order that occurs anywhere in the reason is the
//! match, even when a later keyword is longer or more specific.

/// Return the first keyword, in list order, contained in `reason`.
pub fn first_match<'a>(keywords: &'a [String], reason: &str) -> Option<&'a str> {
    let reason = reason.to_lowercase();
    keywords
        .iter()
        .find(|keyword| !keyword.is_empty() && reason.contains(&keyword.to_lowercase()))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive() {
        let list = keywords(&["AFK'd"]);
        assert_eq!(first_match(&list, "You were afk'D too long"), Some("AFK'd"));
        assert_eq!(first_match(&list, "YOU WERE AFK'D"), Some("AFK'd"));
    }

    #[test]
    fn test_substring_containment() {
        let list = keywords(&["ban"]);
        assert_eq!(first_match(&list, "You are banned"), Some("ban"));
        assert_eq!(first_match(&list, "Server restarting"), None);
    }

    #[test]
    fn test_first_in_list_order_wins() {
        // "cheating" appears earlier in the reason, "banned" earlier in the list.
        let list = keywords(&["banned", "cheating"]);
        assert_eq!(
            first_match(&list, "Cheating detected, you are banned"),
            Some("banned")
        );

        let list = keywords(&["ban", "banned for cheating"]);
        assert_eq!(first_match(&list, "You were banned for cheating"), Some("ban"));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(first_match(&[], "banned"), None);
        assert_eq!(first_match(&keywords(&["banned"]), ""), None);
        assert_eq!(first_match(&keywords(&["", "x"]), "abc"), None);
    }
}
