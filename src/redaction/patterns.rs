// file: src/redaction/patterns.rs
// description: compiled regex patterns for PII detection
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // US phone formats, optionally with country code or parenthesized area
    // code. Rust regex has no lookarounds, so false positives (years,
    // plain metrics) are filtered in the scanner instead.
    pub static ref PHONE_NUMBER: Regex = Regex::new(
        r"(?:\+?1[\s.\-]?)?(?:\(\d{3}\)|\d{3})[\s.\-]?\d{3}[\s.\-]?\d{4}"
    ).expect("PHONE_NUMBER regex is valid");

    pub static ref SSN: Regex = Regex::new(
        r"\b\d{3}[\-\s]?\d{2}[\-\s]?\d{4}\b"
    ).expect("SSN regex is valid");

    pub static ref CREDIT_CARD: Regex = Regex::new(
        r"\b\d{4}[\s\-]?\d{4}[\s\-]?\d{4}[\s\-]?\d{4}\b"
    ).expect("CREDIT_CARD regex is valid");
}

/// Luhn checksum; used to separate real card numbers from arbitrary
/// 16-digit runs.
pub fn luhn_check(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 2 {
        return false;
    }

    let mut checksum = 0;
    for (position, &digit) in digits.iter().rev().skip(1).enumerate() {
        let mut digit = digit;
        if position % 2 == 0 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        checksum += digit;
    }

    (checksum + digits[digits.len() - 1]) % 10 == 0
}

/// SSN area-number rules: never 000, 666, or 900-999.
pub fn looks_like_ssn(candidate: &str) -> bool {
    let digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 9 {
        return false;
    }

    let area: u32 = digits[..3].parse().unwrap_or(0);
    area != 0 && area != 666 && area < 900
}
