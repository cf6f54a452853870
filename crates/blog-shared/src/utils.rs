//! Utility functions

use crate::constants::SUMMARY_LENGTH;

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let visible: String = local.chars().take(if local.chars().count() <= 2 { 1 } else { 2 }).collect();
        format!("{}***{}", visible, domain)
    } else {
        "***".to_string()
    }
}

/// Short plain preview of an article body: the first `SUMMARY_LENGTH`
/// characters followed by an ellipsis. Counts chars, not bytes.
pub fn summarize(content: &str) -> String {
    let preview: String = content.chars().take(SUMMARY_LENGTH).collect();
    format!("{}...", preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("admin@example.com"), "ad***@example.com");
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_summarize_multibyte() {
        let content = "博".repeat(150);
        let summary = summarize(&content);
        assert_eq!(summary.chars().count(), SUMMARY_LENGTH + 3);
        assert!(summary.ends_with("..."));
    }
}
