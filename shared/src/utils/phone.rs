//! Phone number utilities

/// Characters stripped from user-supplied phone numbers before validation
const FORMATTING_CHARS: [char; 4] = [' ', '-', '(', ')'];

/// Normalize a phone number by removing spaces, hyphens and parentheses,
/// then trimming surrounding whitespace.
///
/// Idempotent: `normalize_phone_number(&normalize_phone_number(s))` equals
/// `normalize_phone_number(s)`.
pub fn normalize_phone_number(phone: &str) -> String {
    let stripped: String = phone
        .chars()
        .filter(|c| !FORMATTING_CHARS.contains(c))
        .collect();
    stripped.trim().to_string()
}

/// Mask a phone number for logs, revealing only the first 4 characters
/// (e.g. `+237********`).
pub fn mask_phone_number(phone: &str) -> String {
    let len = phone.chars().count();
    if phone.trim().is_empty() || len < 4 {
        return "***".to_string();
    }

    let visible: String = phone.chars().take(4).collect();
    format!("{}{}", visible, "*".repeat(len - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+237 6 12 34 56 78"), "+237612345678");
        assert_eq!(normalize_phone_number("+237-612-345-678"), "+237612345678");
        assert_eq!(normalize_phone_number("(+33) 6 12 34 56 78"), "+33612345678");
        assert_eq!(normalize_phone_number("\t+237612345678\n"), "+237612345678");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["+237 612-345 678", " (+1) 415 555 2671 ", "abc", "", "\t"] {
            let once = normalize_phone_number(raw);
            assert_eq!(normalize_phone_number(&once), once);
        }
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+237612345678"), "+237*********");
        assert_eq!(mask_phone_number("+33612345678"), "+336********");
        assert_eq!(mask_phone_number("+237"), "+237");
        assert_eq!(mask_phone_number("+23"), "***");
        assert_eq!(mask_phone_number("   "), "***");
    }
}
