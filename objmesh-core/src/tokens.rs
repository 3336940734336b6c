/// Numeric field parsing for OBJ records
use nom::{character::complete::i64 as signed_integer, number::complete::float, IResult};

use crate::builder::ParseMode;

/// A field that did not parse in strict mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenError {
    pub token: String,
    pub expected: &'static str,
}

impl TokenError {
    fn new(token: &str, expected: &'static str) -> Self {
        Self {
            token: token.to_string(),
            expected,
        }
    }

    pub fn describe(&self) -> String {
        format!("expected {}, found {:?}", self.expected, self.token)
    }
}

fn parse_float(input: &str) -> IResult<&str, f32> {
    float(input)
}

fn parse_integer(input: &str) -> IResult<&str, i64> {
    signed_integer(input)
}

/// Parse a floating point field.
///
/// Lenient mode reads the longest numeric prefix and falls back to zero,
/// the way `strtof` does. Strict mode requires the whole field to be a
/// number.
pub(crate) fn float_token(token: &str, mode: ParseMode) -> Result<f32, TokenError> {
    match (parse_float(token), mode) {
        (Ok((_, value)), ParseMode::Lenient) => Ok(value),
        (Err(_), ParseMode::Lenient) => Ok(0.0),
        (Ok(("", value)), ParseMode::Strict) => Ok(value),
        _ => Err(TokenError::new(token, "a number")),
    }
}

/// Parse a face index field with the same prefix rules as `atoi`.
/// An empty field means "absent" and reads as zero in both modes.
pub(crate) fn index_token(token: &str, mode: ParseMode) -> Result<i64, TokenError> {
    if token.is_empty() {
        return Ok(0);
    }
    match (parse_integer(token), mode) {
        (Ok((_, value)), ParseMode::Lenient) => Ok(value),
        (Err(_), ParseMode::Lenient) => Ok(0),
        (Ok(("", value)), ParseMode::Strict) => Ok(value),
        _ => Err(TokenError::new(token, "an integer index")),
    }
}
