//! Natural ("human") ordering of file names
//!
//! A name is split on digit/non-digit boundaries into an alternating run of
//! text and number tokens, always starting with a (possibly empty) text
//! token. Text compares case-insensitively, numbers by value, so
//! `img2.png` sorts before `img10.png`.

use std::cmp::Ordering;

/// A digit run compared by numeric value without overflowing.
///
/// Digits are stored as ASCII whatever script they were written in. Leading
/// zeros are stripped, then a longer run is larger and equal-length runs
/// compare lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Numeric(String);

impl Numeric {
    fn new(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Numeric(trimmed.to_string())
    }
}

impl Ord for Numeric {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Token {
    Text(String),
    Number(Numeric),
}

/// Sort key for natural ordering.
///
/// Keys that tie on their tokens (`img01` vs `img1`, `A` vs `a`) fall back
/// to the raw name, so distinct names never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey {
    tokens: Vec<Token>,
    raw: String,
}

impl NaturalKey {
    pub fn new(name: &str) -> Self {
        Self {
            tokens: tokenize(name),
            raw: name.to_string(),
        }
    }
}

/// Compare two names in natural order
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalKey::new(a).cmp(&NaturalKey::new(b))
}

/// Code points of the digit zero in scripts whose decimal digits run
/// contiguously from it
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, // ASCII
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic
    0x07C0, // NKo
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0A66, // Gurmukhi
    0x0AE6, // Gujarati
    0x0B66, // Oriya
    0x0BE6, // Tamil
    0x0C66, // Telugu
    0x0CE6, // Kannada
    0x0D66, // Malayalam
    0x0E50, // Thai
    0x0ED0, // Lao
    0x0F20, // Tibetan
    0x1040, // Myanmar
    0x17E0, // Khmer
    0x1810, // Mongolian
    0xFF10, // Fullwidth
];

/// The ASCII digit with the same value as `ch`, for decimal digits only.
///
/// Numeric characters without a decimal value (`½`, `Ⅻ`, `²`) stay text.
fn decimal_digit(ch: char) -> Option<char> {
    if ch.is_ascii_digit() {
        return Some(ch);
    }
    if !ch.is_numeric() {
        return None;
    }
    let code = u32::from(ch);
    DECIMAL_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .and_then(|&zero| char::from_digit(code - zero, 10))
}

fn tokenize(name: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut digits = String::new();

    for ch in name.chars() {
        if let Some(digit) = decimal_digit(ch) {
            if digits.is_empty() {
                tokens.push(Token::Text(std::mem::take(&mut text).to_lowercase()));
            }
            digits.push(digit);
        } else {
            if !digits.is_empty() {
                tokens.push(Token::Number(Numeric::new(&digits)));
                digits.clear();
            }
            text.push(ch);
        }
    }

    if !digits.is_empty() {
        tokens.push(Token::Number(Numeric::new(&digits)));
    } else {
        tokens.push(Token::Text(text.to_lowercase()));
    }

    tokens
}
