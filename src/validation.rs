use regex::Regex;

pub fn is_valid_username(username: &str) -> bool {
    let re = Regex::new(r"^[a-zA-Z0-9_]{5,}$").unwrap();
    re.is_match(username)
}

/// At least 8 characters with an uppercase letter, a digit and a special
/// character.
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

pub fn is_valid_email(email: &str) -> bool {
    let re = Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_{|}~-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)+$")
        .unwrap();
    re.is_match(email)
}

/// Mobile numbers are exactly 10 digits.
pub fn is_valid_mobile(mobile: i64) -> bool {
    (1_000_000_000..=9_999_999_999).contains(&mobile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_common_shapes() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name+tag+sorting@example.com"));
        assert!(is_valid_email("user@sub.example.com"));
        assert!(is_valid_email("user@domain.co.in"));
    }

    #[test]
    fn email_rejects_malformed() {
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@missingusername.com"));
        assert!(!is_valid_email("username@.com"));
        assert!(!is_valid_email("username@com"));
        assert!(!is_valid_email("username@com."));
    }

    #[test]
    fn mobile_must_be_ten_digits() {
        assert!(is_valid_mobile(1234567890));
        assert!(is_valid_mobile(9876543210));
        assert!(!is_valid_mobile(123456789));
        assert!(!is_valid_mobile(12345678901));
        assert!(!is_valid_mobile(0));
        assert!(!is_valid_mobile(-1234567890));
    }

    #[test]
    fn username_rules() {
        assert!(is_valid_username("alice_01"));
        assert!(!is_valid_username("bob"));
        assert!(!is_valid_username("has space"));
    }

    #[test]
    fn password_rules() {
        assert!(is_valid_password("Str0ng!pass"));
        assert!(!is_valid_password("weakpass"));
        assert!(!is_valid_password("NoDigitsHere!"));
        assert!(!is_valid_password("noupper123!"));
    }
}
