//! Numeric literals.
//!
//! Three surface forms are accepted, tried in this order:
//!
//! | radix   | forms                          |
//! |---------|--------------------------------|
//! | binary  | `%00000001`, `00000001B`       |
//! | decimal | `1` .. `9999999`, `01D`        |
//! | hex     | `01H` .. `FFFFH`, `$01` .. `$FFFF` |
//!
//! The first form that matches the whole token wins.

use std::fmt;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Binary,
    Decimal,
    Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub value: u16,
    pub radix: Radix,
}

impl Literal {
    pub fn parse(token: &str) -> Result<Literal, Error> {
        if let Some(value) = binary(token) {
            return Ok(Literal {
                value,
                radix: Radix::Binary,
            });
        }
        if let Some(digits) = decimal(token) {
            // at most 7 digits, so u32 cannot overflow
            let value = digits
                .parse::<u32>()
                .map_err(|_| Error::MalformedLiteral(token.to_string()))?;
            let value =
                u16::try_from(value).map_err(|_| Error::OperandOutOfRange(token.to_string()))?;
            return Ok(Literal {
                value,
                radix: Radix::Decimal,
            });
        }
        if let Some(value) = hex(token) {
            return Ok(Literal {
                value,
                radix: Radix::Hex,
            });
        }
        Err(Error::MalformedLiteral(token.to_string()))
    }
}

/// Parses a literal and keeps only its value.
pub fn parse_number(token: &str) -> Result<u16, Error> {
    Literal::parse(token).map(|lit| lit.value)
}

fn all(s: &str, pred: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(pred)
}

fn is_bin(c: char) -> bool {
    c == '0' || c == '1'
}

fn is_hex(c: char) -> bool {
    c.is_ascii_digit() || ('A'..='F').contains(&c)
}

fn binary(token: &str) -> Option<u16> {
    let digits = token
        .strip_prefix('%')
        .or_else(|| token.strip_suffix('B'))?;
    if digits.len() == 8 && all(digits, is_bin) {
        u16::from_str_radix(digits, 2).ok()
    } else {
        None
    }
}

fn decimal(token: &str) -> Option<&str> {
    let digits = token.strip_suffix('D').unwrap_or(token);
    if (1..=7).contains(&digits.len()) && all(digits, |c| c.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

fn hex(token: &str) -> Option<u16> {
    let digits = token
        .strip_prefix('$')
        .or_else(|| token.strip_suffix('H'))?;
    if (2..=4).contains(&digits.len()) && all(digits, is_hex) {
        u16::from_str_radix(digits, 16).ok()
    } else {
        None
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.radix {
            Radix::Binary => write!(f, "%{:08b}", self.value),
            Radix::Decimal => write!(f, "{}", self.value),
            Radix::Hex if self.value <= 0xFF => write!(f, "${:02X}", self.value),
            Radix::Hex => write!(f, "${:04X}", self.value),
        }
    }
}
