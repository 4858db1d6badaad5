//! # GS1 Check Digit
//!
//! The mod-10 check digit shared by GLN-13, GTIN and SSCC keys.
//!
//! Starting from the rightmost payload digit, digits are weighted 3, 1, 3, 1,
//! and so on. The check digit is `(10 - (sum mod 10)) mod 10`.
//!
//! GLN-13 keys carry a 12-digit payload, which is the only length this
//! module accepts. The typed entry point [`check_digit`] takes `&[u8; 12]`;
//! [`check_digit_str`] returns `None` for anything that is not exactly 12
//! ASCII digits.

/// Compute the check digit for a 12-digit payload.
///
/// Each element must be a digit value in `0..=9` (not an ASCII byte).
pub fn check_digit(payload: &[u8; 12]) -> u8 {
    debug_assert!(payload.iter().all(|d| *d <= 9), "payload must hold digit values");

    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| {
            let weight = if i % 2 == 0 { 3 } else { 1 };
            u32::from(*d) * weight
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

/// Compute the check digit for a 12-character ASCII digit string.
///
/// Returns `None` when `payload` is not exactly 12 ASCII digits.
pub fn check_digit_str(payload: &str) -> Option<char> {
    let digits = parse_payload(payload)?;
    Some(char::from(b'0' + check_digit(&digits)))
}

/// True when `gln` is 13 ASCII digits whose last digit is the check digit
/// of the first 12.
pub fn verify_gln13(gln: &str) -> bool {
    if gln.len() != 13 || !gln.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (payload, last) = gln.split_at(12);
    check_digit_str(payload).is_some_and(|expected| last.starts_with(expected))
}

fn parse_payload(payload: &str) -> Option<[u8; 12]> {
    let bytes = payload.as_bytes();
    if bytes.len() != 12 {
        return None;
    }
    let mut digits = [0u8; 12];
    for (slot, b) in digits.iter_mut().zip(bytes) {
        if !b.is_ascii_digit() {
            return None;
        }
        *slot = b - b'0';
    }
    Some(digits)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The check digit is always a single decimal digit.
        #[test]
        fn check_digit_is_single_digit(payload in "[0-9]{12}") {
            let c = check_digit_str(&payload).unwrap();
            prop_assert!(c.is_ascii_digit());
        }

        /// Same payload, same digit.
        #[test]
        fn check_digit_deterministic(payload in "[0-9]{12}") {
            prop_assert_eq!(check_digit_str(&payload), check_digit_str(&payload));
        }

        /// Appending the computed digit always yields a verifiable GLN-13.
        #[test]
        fn appended_digit_verifies(payload in "[0-9]{12}") {
            let c = check_digit_str(&payload).unwrap();
            let full = format!("{payload}{c}");
            prop_assert!(verify_gln13(&full));
        }

        /// Changing any single payload digit changes the check digit.
        #[test]
        fn single_digit_substitution_detected(
            payload in "[0-9]{12}",
            pos in 0usize..12,
            delta in 1u8..10,
        ) {
            let mut bytes = payload.clone().into_bytes();
            bytes[pos] = b'0' + (bytes[pos] - b'0' + delta) % 10;
            let altered = String::from_utf8(bytes).unwrap();
            prop_assert_ne!(check_digit_str(&payload), check_digit_str(&altered));
        }
    }
}
