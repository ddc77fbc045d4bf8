//! Cryptographically secure OTP generation.

use rand::{rngs::OsRng, Rng};

use crate::domain::value_objects::{OtpCode, OtpLength, MAX_CODE_LENGTH, MIN_CODE_LENGTH};

/// Generates a numeric code of exactly `length` digits.
///
/// Draws uniformly from `[10^(length-1), 10^length - 1]` using the OS CSPRNG.
///
/// # Panics
///
/// Panics when `length` is outside `4..=10`. The length is a service
/// constant, never user input; use [`OtpLength::new`] to validate a
/// configured value up front.
pub fn generate(length: usize) -> OtpCode {
    assert!(
        (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length),
        "OTP length must be between {} and {} digits, got {}",
        MIN_CODE_LENGTH,
        MAX_CODE_LENGTH,
        length
    );

    let low = 10u64.pow(length as u32 - 1);
    let high = 10u64.pow(length as u32) - 1;
    let number = OsRng.gen_range(low..=high);

    OtpCode::from_stored(format!("{:0width$}", number, width = length))
}

/// Generates a code of an already validated length
pub fn generate_with(length: OtpLength) -> OtpCode {
    generate(length.get())
}

/// Checks that `code` has exactly `expected_length` ASCII digits
pub fn is_valid_format(code: &str, expected_length: usize) -> bool {
    code.len() == expected_length && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_every_supported_length() {
        for length in MIN_CODE_LENGTH..=MAX_CODE_LENGTH {
            let low = 10u64.pow(length as u32 - 1);
            let high = 10u64.pow(length as u32) - 1;

            for _ in 0..50 {
                let code = generate(length);
                assert_eq!(code.len(), length);
                assert!(is_valid_format(code.as_str(), length));

                let value: u64 = code.as_str().parse().unwrap();
                assert!((low..=high).contains(&value), "{} out of range for length {}", value, length);
            }
        }
    }

    #[test]
    fn test_generate_is_random() {
        let codes: HashSet<String> = (0..1000)
            .map(|_| generate(6).as_str().to_string())
            .collect();
        // 1000 draws from 900000 values: collisions are possible but rare
        assert!(codes.len() >= 990, "only {} unique codes out of 1000", codes.len());
    }

    #[test]
    #[should_panic(expected = "OTP length must be between 4 and 10")]
    fn test_generate_rejects_short_length() {
        generate(3);
    }

    #[test]
    #[should_panic(expected = "OTP length must be between 4 and 10")]
    fn test_generate_rejects_long_length() {
        generate(11);
    }

    #[test]
    fn test_is_valid_format() {
        assert!(is_valid_format("123456", 6));
        assert!(is_valid_format("0000", 4));
        assert!(!is_valid_format("12345", 6));
        assert!(!is_valid_format("1234567", 6));
        assert!(!is_valid_format("12345a", 6));
        assert!(!is_valid_format(" 12345", 6));
        assert!(!is_valid_format("", 6));
        // Non-ASCII digits do not count
        assert!(!is_valid_format("１２３４５６", 6));
    }
}
