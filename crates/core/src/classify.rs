//! Token classification and the concatenation transform
//!
//! Every token is sorted into exactly one bucket (odd numbers, even numbers,
//! alphabets, special characters) in a single order-preserving pass. Numeric
//! tokens also feed a running sum, and the alphabetic tokens are folded into
//! `concat_string` once the pass is done.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Output of a single classification run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub odd_numbers: Vec<String>,
    pub even_numbers: Vec<String>,
    pub alphabets: Vec<String>,
    pub special_characters: Vec<String>,
    pub sum: String,
    pub concat_string: String,
}

/// Bucket a single token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Odd,
    Even,
    Alphabetic,
    Special,
}

/// Integer view of a numeric token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeric {
    /// Integer part, truncated toward zero
    pub value: BigInt,
    /// Parity of the integer part, exact for literals of any length
    pub even: bool,
}

/// Parse a plain decimal literal
///
/// Accepts an optional leading `+`/`-`, decimal digits and at most one decimal
/// point, with at least one digit overall ("5", "-4", "3.9", ".5", "7.").
/// Whitespace, exponents, radix prefixes and `Infinity` are rejected.
pub fn parse_numeric(token: &str) -> Option<Numeric> {
    let (negative, unsigned) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integer) || !all_digits(fraction) {
        return None;
    }

    // An empty integer part (".5") truncates to zero.
    let magnitude = BigInt::parse_bytes(integer.as_bytes(), 10).unwrap_or_default();
    let value = if negative { -magnitude } else { magnitude };

    let even = integer
        .bytes()
        .last()
        .map_or(true, |digit| (digit - b'0') % 2 == 0);

    Some(Numeric { value, even })
}

/// Returns true for one or more ASCII letters and nothing else
pub fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Decide which bucket a token goes to
///
/// Special characters are the catch-all: anything that is neither numeric nor
/// purely alphabetic lands there, mixed tokens like "a1" and "" included.
pub fn categorize(token: &str) -> Category {
    if let Some(numeric) = parse_numeric(token) {
        if numeric.even {
            Category::Even
        } else {
            Category::Odd
        }
    } else if is_alphabetic(token) {
        Category::Alphabetic
    } else {
        Category::Special
    }
}

/// Classify an ordered sequence of tokens
///
/// Pure and total: the input is never mutated and every token ends up in
/// exactly one bucket, in input order.
pub fn classify<S: AsRef<str>>(tokens: &[S]) -> ClassificationResult {
    let mut result = ClassificationResult::default();
    let mut sum = BigInt::default();

    for token in tokens {
        let token = token.as_ref();

        match parse_numeric(token) {
            Some(Numeric { value, even }) => {
                sum += value;
                if even {
                    result.even_numbers.push(token.to_string());
                } else {
                    result.odd_numbers.push(token.to_string());
                }
            }
            None if is_alphabetic(token) => result.alphabets.push(token.to_ascii_uppercase()),
            None => result.special_characters.push(token.to_string()),
        }
    }

    result.sum = sum.to_string();
    result.concat_string = concat_alphabets(&result.alphabets);

    result
}

/// Join the alphabetic tokens, reverse them and alternate the case
///
/// Even positions (0-based) of the reversed sequence are upper-cased, odd
/// positions lower-cased. No alphabets yields an empty string.
pub fn concat_alphabets<S: AsRef<str>>(alphabets: &[S]) -> String {
    alphabets
        .iter()
        .flat_map(|word| word.as_ref().chars())
        .rev()
        .enumerate()
        .map(|(idx, c)| {
            if idx % 2 == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}
