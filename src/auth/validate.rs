/// Shape check for the login form's email field: exactly one `@`, a
/// non-empty local part, a domain with an interior dot, and no whitespace
/// anywhere.
pub fn valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.chars().any(char::is_whitespace) {
        return false;
    }
    // The dot must have at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(valid_email("ada@example.com"));
        assert!(valid_email("first.last@sub.example.co.uk"));
        assert!(valid_email("a@b.c"));
    }

    #[test]
    fn rejects_missing_or_repeated_at_sign() {
        assert!(!valid_email("example.com"));
        assert!(!valid_email("a@b@c.com"));
        assert!(!valid_email("@example.com"));
    }

    #[test]
    fn rejects_whitespace() {
        assert!(!valid_email("a da@example.com"));
        assert!(!valid_email("ada@exa mple.com"));
    }

    #[test]
    fn rejects_domains_without_an_interior_dot() {
        assert!(!valid_email("ada@example"));
        assert!(!valid_email("ada@.com"));
        assert!(!valid_email("ada@example."));
    }

    #[test]
    fn consecutive_dots_are_tolerated() {
        // Matches the historical form behavior.
        assert!(valid_email("ada@example..com"));
    }

    #[test]
    fn password_needs_eight_characters() {
        assert!(!valid_password("short"));
        assert!(!valid_password("1234567"));
        assert!(valid_password("12345678"));
        assert!(valid_password("correct horse battery"));
    }
}
