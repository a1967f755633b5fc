//! Repository name checks
//!
//! Names are validated before any request is sent or any folder is touched.
//! Checks run in order and stop at the first failing rule.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::ValidationError;

/// GitHub's limit on repository name length
pub const MAX_NAME_LEN: usize = 100;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap())
}

/// Check a name for repository creation
pub fn validate_repo_name(name: &str) -> Result<(), ValidationError> {
    if !name_pattern().is_match(name) {
        return Err(ValidationError::InvalidCharacters);
    }
    if name.starts_with('-') {
        return Err(ValidationError::LeadingHyphen);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong { max: MAX_NAME_LEN });
    }
    Ok(())
}

/// Check a name for deletion. The name doubles as a local folder that gets
/// removed recursively, so anything that could escape the working directory
/// is refused.
pub fn validate_delete_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty);
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ValidationError::UnsafePath);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_typical_names() {
        for name in ["repo", "my-repo_1.0", "A", "a.b.c", "_private", "x-"] {
            assert_eq!(validate_repo_name(name), Ok(()), "{}", name);
        }
    }

    #[test]
    fn test_accepts_max_length() {
        let name = "a".repeat(MAX_NAME_LEN);
        assert_eq!(validate_repo_name(&name), Ok(()));
    }

    #[test]
    fn test_rejects_too_long() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            validate_repo_name(&name),
            Err(ValidationError::TooLong { max: 100 })
        );
    }

    #[test]
    fn test_rejects_invalid_characters() {
        for name in ["my repo", "repo!", "naïve", "a/b", ""] {
            assert_eq!(
                validate_repo_name(name),
                Err(ValidationError::InvalidCharacters),
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_rejects_leading_hyphen() {
        assert_eq!(
            validate_repo_name("-repo"),
            Err(ValidationError::LeadingHyphen)
        );
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // Both bad characters and a leading hyphen
        assert_eq!(
            validate_repo_name("-bad name"),
            Err(ValidationError::InvalidCharacters)
        );
        // Leading hyphen and too long
        let name = format!("-{}", "a".repeat(MAX_NAME_LEN));
        assert_eq!(validate_repo_name(&name), Err(ValidationError::LeadingHyphen));
    }

    #[test]
    fn test_rejection_messages_name_the_rule() {
        assert!(ValidationError::InvalidCharacters
            .to_string()
            .contains("invalid characters"));
        assert!(ValidationError::LeadingHyphen.to_string().contains("hyphen"));
        assert!(ValidationError::TooLong { max: 100 }
            .to_string()
            .contains("max 100"));
    }

    #[test]
    fn test_delete_rejects_unsafe_names() {
        assert_eq!(validate_delete_name(""), Err(ValidationError::Empty));
        for name in ["..", ".", "a/b", "a\\b"] {
            assert_eq!(
                validate_delete_name(name),
                Err(ValidationError::UnsafePath),
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_delete_accepts_plain_name() {
        assert_eq!(validate_delete_name("my-repo_1.0"), Ok(()));
        assert_eq!(validate_delete_name("..hidden"), Ok(()));
    }
}
