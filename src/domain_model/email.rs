use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Same pattern for syntax validation (full match) and mention scanning
// (unanchored). Kept in one place so the two can never drift apart.
const EMAIL_PATTERN: &str = r"[\w\-.]+@[\w\-]+(?:\.\w+)+";

static EMAIL_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^(?:{EMAIL_PATTERN})$")).expect("email syntax pattern"));

static EMAIL_SCAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email scan pattern"));

/// Pure syntax predicate. The service layer never re-checks this; an `Email`
/// value can only be constructed from a string that passed it.
pub fn is_valid_email_syntax(s: &str) -> bool {
    EMAIL_SYNTAX.is_match(s)
}

#[derive(Debug, thiserror::Error)]
#[error("invalid email address: {0:?}")]
pub struct InvalidEmail(pub String);

/// User identifier: a syntax-validated email address.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct Email(String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = InvalidEmail;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_valid_email_syntax(s) {
            Ok(Email(s.to_string()))
        } else {
            Err(InvalidEmail(s.to_string()))
        }
    }
}

/// Every email-shaped substring of `text`, registration status unchecked.
pub fn scan_mentions(text: &str) -> Vec<Email> {
    EMAIL_SCAN
        .find_iter(text)
        .map(|m| Email(m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email_syntax("a@x.com"));
        assert!(is_valid_email_syntax("first.last@sub.example.co"));
        assert!(is_valid_email_syntax("user-name@ex-ample.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email_syntax(""));
        assert!(!is_valid_email_syntax("no-at-sign.com"));
        assert!(!is_valid_email_syntax("a@nodot"));
        assert!(!is_valid_email_syntax("a b@x.com"));
        assert!(!is_valid_email_syntax("a@x.com extra"));
    }

    #[test]
    fn parse_round_trips() {
        let email: Email = "a@x.com".parse().unwrap();
        assert_eq!(email.as_str(), "a@x.com");
        assert!("not an email".parse::<Email>().is_err());
    }

    #[test]
    fn scans_mentions_out_of_free_text() {
        let found = scan_mentions("ping t@x.com and u@y.org, thanks");
        let found: Vec<&str> = found.iter().map(Email::as_str).collect();
        assert_eq!(found, vec!["t@x.com", "u@y.org"]);
    }

    #[test]
    fn scan_stops_at_trailing_punctuation() {
        let found = scan_mentions("see t@x.com.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].as_str(), "t@x.com");
    }

    #[test]
    fn scan_of_plain_text_is_empty() {
        assert!(scan_mentions("hello world").is_empty());
    }
}
