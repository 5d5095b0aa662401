use base64ct::{Base64, Encoding};

/// Card network, classified from the leading digits of the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Humo,
    Maestro,
    Unknown,
}

impl CardNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::Mastercard => "Mastercard",
            CardNetwork::Humo => "Humo",
            CardNetwork::Maestro => "Maestro",
            CardNetwork::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error decoding a stored (obscured) card number.
///
/// The stored form is written by [`obscure_number`]; failing to decode it
/// means the record is corrupt, which callers treat as a data-integrity
/// failure rather than user error.
#[derive(Debug, thiserror::Error)]
pub enum CardDecodeError {
    #[error("stored card number is not valid base64")]
    Base64,
    #[error("stored card number is not valid utf-8")]
    Utf8,
}

/// Strip the separators users type into card numbers (spaces and dashes).
pub fn clean_number(number: &str) -> String {
    number.replace([' ', '-'], "")
}

/// Luhn mod-10 check over the cleaned number.
///
/// Rejects anything outside 13..=19 digits or containing non-digits; never
/// errors on malformed input.
pub fn validate_number(number: &str) -> bool {
    let number = clean_number(number);

    if number.len() < 13 || number.len() > 19 {
        return false;
    }
    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let mut sum = 0u32;
    let mut alternate = false;
    for b in number.bytes().rev() {
        let mut digit = u32::from(b - b'0');
        if alternate {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        alternate = !alternate;
    }

    sum % 10 == 0
}

/// Classify the network from the leading digit, first match wins.
///
/// A nine-leading number only counts as Humo at exactly 16 digits;
/// otherwise it falls through to the remaining checks.
pub fn network_of(number: &str) -> CardNetwork {
    let number = clean_number(number);

    if number.starts_with('4') {
        CardNetwork::Visa
    } else if number.starts_with('5') {
        CardNetwork::Mastercard
    } else if number.starts_with('9') && number.len() == 16 {
        CardNetwork::Humo
    } else if number.starts_with('6') {
        CardNetwork::Maestro
    } else {
        CardNetwork::Unknown
    }
}

/// Group the cleaned number into space-separated blocks of four for display,
/// keeping a trailing partial block as-is.
pub fn format_number(number: &str) -> String {
    let number = clean_number(number);
    let chars: Vec<char> = number.chars().collect();
    chars
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reversible at-rest encoding of a card number.
///
/// This is base64 of the cleaned digits, not encryption: it only keeps the
/// plaintext out of direct comparisons and casual reads of the card table.
pub fn obscure_number(number: &str) -> String {
    let number = clean_number(number);
    Base64::encode_string(number.as_bytes())
}

/// Decode a stored card number back to its digits.
pub fn reveal_number(stored: &str) -> Result<String, CardDecodeError> {
    let bytes = Base64::decode_vec(stored).map_err(|_| CardDecodeError::Base64)?;
    String::from_utf8(bytes).map_err(|_| CardDecodeError::Utf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    /// Append the Luhn check digit to a digit string.
    fn with_check_digit(partial: &str) -> String {
        let mut sum = 0u32;
        let mut alternate = true; // check digit position is not doubled
        for b in partial.bytes().rev() {
            let mut digit = u32::from(b - b'0');
            if alternate {
                digit *= 2;
                if digit > 9 {
                    digit -= 9;
                }
            }
            sum += digit;
            alternate = !alternate;
        }
        format!("{}{}", partial, (10 - sum % 10) % 10)
    }

    #[test]
    fn test_validate_known_numbers() {
        assert!(validate_number("4532015112830366"));
        assert!(validate_number("4532 0151 1283 0366"));
        assert!(validate_number("4532-0151-1283-0366"));
        assert!(!validate_number("4532015112830367"));
    }

    #[test]
    fn test_validate_random_generated_numbers() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let partial: String = (0..15).map(|_| rng.gen_range(0..=9).to_string()).collect();
            let number = with_check_digit(&partial);
            assert!(validate_number(&number), "{} should pass Luhn", number);
        }
    }

    #[test]
    fn test_validate_rejects_digit_substitution() {
        let number = with_check_digit("453201511283036");
        for pos in 0..number.len() {
            let original = number.as_bytes()[pos] - b'0';
            let substituted = (original + 1) % 10;
            let mut flipped = number.clone().into_bytes();
            flipped[pos] = b'0' + substituted;
            let flipped = String::from_utf8(flipped).unwrap();
            // A single-digit substitution always changes the mod-10 sum
            assert!(!validate_number(&flipped), "{} should fail Luhn", flipped);
        }
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(!validate_number("453201511283")); // 12 digits
        assert!(validate_number(&with_check_digit("453201511283"))); // 13 digits
        assert!(validate_number(&with_check_digit("453201511283036612"))); // 19 digits
        assert!(!validate_number(&with_check_digit("4532015112830366121"))); // 20 digits
    }

    #[test]
    fn test_validate_rejects_non_digits() {
        assert!(!validate_number("4532a15112830366"));
        assert!(!validate_number("453201511283036x"));
    }

    #[test]
    fn test_network_visa_any_length() {
        assert_eq!(network_of("4532015112830366"), CardNetwork::Visa);
        assert_eq!(network_of("4532015112830"), CardNetwork::Visa);
        assert_eq!(network_of("4532015112830366123"), CardNetwork::Visa);
    }

    #[test]
    fn test_network_mastercard() {
        assert_eq!(network_of("5425233430109903"), CardNetwork::Mastercard);
    }

    #[test]
    fn test_network_humo_requires_sixteen_digits() {
        assert_eq!(network_of("9860123412341234"), CardNetwork::Humo);
        // Nine-leading but not 16 digits falls through past Humo
        assert_eq!(network_of("986012341234123"), CardNetwork::Unknown);
        assert_eq!(network_of("98601234123412345"), CardNetwork::Unknown);
    }

    #[test]
    fn test_network_maestro() {
        assert_eq!(network_of("6759649826438453"), CardNetwork::Maestro);
    }

    #[test]
    fn test_network_unknown() {
        assert_eq!(network_of("371449635398431"), CardNetwork::Unknown);
        assert_eq!(network_of(""), CardNetwork::Unknown);
    }

    #[test]
    fn test_network_strips_formatting() {
        assert_eq!(network_of("4532 0151 1283 0366"), CardNetwork::Visa);
    }

    #[test]
    fn test_format_sixteen_digits() {
        assert_eq!(format_number("4532015112830366"), "4532 0151 1283 0366");
    }

    #[test]
    fn test_format_other_lengths() {
        assert_eq!(format_number("4532015112830"), "4532 0151 1283 0");
        assert_eq!(format_number("453201511283036612"), "4532 0151 1283 0366 12");
        assert_eq!(format_number("123"), "123");
        assert_eq!(format_number(""), "");
    }

    #[test]
    fn test_format_idempotent_after_clean() {
        let once = format_number("4532015112830366");
        assert_eq!(format_number(&once), once);
    }

    #[test]
    fn test_obscure_reveal_round_trip() {
        for number in ["4532015112830366", "9860123412341234", "453201511283036612"] {
            let stored = obscure_number(number);
            assert_ne!(stored, number);
            assert_eq!(reveal_number(&stored).unwrap(), number);
        }
    }

    #[test]
    fn test_obscure_cleans_before_encoding() {
        assert_eq!(
            obscure_number("4532 0151 1283 0366"),
            obscure_number("4532015112830366")
        );
    }

    #[test]
    fn test_reveal_rejects_corrupt_base64() {
        let err = reveal_number("not!!valid@@base64").unwrap_err();
        assert!(matches!(err, CardDecodeError::Base64));
    }

    #[test]
    fn test_reveal_rejects_invalid_utf8() {
        let stored = Base64::encode_string(&[0xff, 0xfe, 0x30, 0x31]);
        let err = reveal_number(&stored).unwrap_err();
        assert!(matches!(err, CardDecodeError::Utf8));
    }
}
