//! ISO/IEC 7064 MOD97-10 checksum engine.
//!
//! IBANs embed two check digits computed over a numeric transliteration of
//! the account number: digits map to themselves, letters (case-insensitive)
//! map to `10..=35`, and the decimal digit groups are concatenated in order.
//! A full IBAN is verified by moving its first four characters (country code
//! and check digits) to the end, transliterating, and checking that the
//! resulting integer is congruent to 1 mod 97.
//!
//! The transliteration of a 34-character IBAN runs to ~53 decimal digits, so
//! [`numerify`] produces a [`BigUint`]. The validation paths never allocate
//! one, though: [`mod97`] folds the remainder digit group by digit group.

use num_bigint::BigUint;

use crate::error::IbanError;

/// Numeric transliteration value of one character, per the IBAN alphabet:
/// `'0'..='9'` map to 0–9, `'a'..='z'` and `'A'..='Z'` to 10–35.
fn char_value(character: char) -> Option<u32> {
    match character {
        '0'..='9' => Some(character as u32 - '0' as u32),
        'a'..='z' => Some(character as u32 - 'a' as u32 + 10),
        'A'..='Z' => Some(character as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Convert `text` into its digits-only numeric form.
///
/// The empty string numerifies to zero. Any character outside the IBAN
/// alphabet is an [`IbanError::InvalidCharacter`].
pub fn numerify(text: &str) -> Result<BigUint, IbanError> {
    let mut numeric = BigUint::default();
    for character in text.chars() {
        let value = char_value(character).ok_or(IbanError::InvalidCharacter { character })?;
        numeric = if value < 10 {
            numeric * 10u32 + value
        } else {
            numeric * 100u32 + value
        };
    }
    Ok(numeric)
}

/// Remainder mod 97 of the numeric form of `text`, computed incrementally
/// (Horner's method) without materializing the big integer.
pub fn mod97(text: &str) -> Result<u32, IbanError> {
    let mut remainder = 0u32;
    for character in text.chars() {
        let value = char_value(character).ok_or(IbanError::InvalidCharacter { character })?;
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }
    Ok(remainder)
}

/// Compute the two check digits for a BBAN and country code.
///
/// Per ISO 7064 the check-digit field is logically moved behind the rest of
/// the number, so the BBAN and country code are transliterated first:
/// `98 - (numerify(bban + country) * 100) mod 97`, zero-padded to two digits.
pub fn check_digits(bban: &str, country_code: &str) -> Result<String, IbanError> {
    let remainder = mod97(&format!("{bban}{country_code}"))?;
    let digits = 98 - (remainder * 100) % 97;
    Ok(format!("{digits:02}"))
}

/// Whether a full numeric rearrangement (compact IBAN with its first four
/// characters moved to the end, then numerified) verifies.
pub fn verify(numeric: &BigUint) -> bool {
    numeric % 97u32 == BigUint::from(1u32)
}
