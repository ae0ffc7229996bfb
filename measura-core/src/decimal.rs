//! Arbitrary precision decimals using dashu
//!
//! A `Decimal` is an unscaled `IBig` together with a base-10 scale:
//! `value = unscaled * 10^-scale`. Addition, subtraction and multiplication
//! are exact. Division is the only inexact operation and always rounds
//! half-to-even at an explicit scale.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for decimal operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error("Invalid decimal format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// Exact decimal number with an explicit scale
///
/// Equality and ordering are numeric: `1.0 == 1.00`. The scale is still
/// observable through [`Decimal::scale`] and [`fmt::Display`].
#[derive(Debug, Clone)]
pub struct Decimal {
    unscaled: IBig,
    scale: u32,
}

fn pow10(exp: u32) -> IBig {
    IBig::from(10u8).pow(exp as usize)
}

fn abs(n: &IBig) -> IBig {
    if *n < IBig::ZERO {
        -n.clone()
    } else {
        n.clone()
    }
}

/// Integer quotient `num / den` rounded half-to-even. `den` must be non-zero.
fn div_round_half_even(num: &IBig, den: &IBig) -> IBig {
    let quotient = num / den;
    let remainder = num - &quotient * den;
    if remainder == IBig::ZERO {
        return quotient;
    }

    let twice_remainder = abs(&remainder) * IBig::from(2u8);
    let away = match twice_remainder.cmp(&abs(den)) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => &quotient % IBig::from(2u8) != IBig::ZERO,
    };
    if !away {
        return quotient;
    }

    let negative = (*num < IBig::ZERO) != (*den < IBig::ZERO);
    if negative {
        quotient - IBig::ONE
    } else {
        quotient + IBig::ONE
    }
}

impl Decimal {
    // ========== Construction ==========

    pub fn zero() -> Self {
        Self { unscaled: IBig::ZERO, scale: 0 }
    }

    pub fn one() -> Self {
        Self { unscaled: IBig::ONE, scale: 0 }
    }

    /// Create from an unscaled integer and a scale
    pub fn from_parts(unscaled: IBig, scale: u32) -> Self {
        Self { unscaled, scale }
    }

    pub fn from_i64(n: i64) -> Self {
        Self { unscaled: IBig::from(n), scale: 0 }
    }

    // ========== Accessors ==========

    pub fn unscaled(&self) -> &IBig {
        &self.unscaled
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled == IBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled < IBig::ZERO
    }

    // ========== Scale ==========

    /// Unscaled value at a scale that is not below the current one
    fn unscaled_at(&self, scale: u32) -> IBig {
        debug_assert!(scale >= self.scale);
        &self.unscaled * pow10(scale - self.scale)
    }

    // ========== Basic Arithmetic ==========

    /// Exact addition at the larger of the two scales
    pub fn add(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        Self { unscaled: self.unscaled_at(scale) + other.unscaled_at(scale), scale }
    }

    /// Exact subtraction at the larger of the two scales
    pub fn sub(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        Self { unscaled: self.unscaled_at(scale) - other.unscaled_at(scale), scale }
    }

    /// Exact multiplication; scales add
    pub fn mul(&self, other: &Self) -> Self {
        Self { unscaled: &self.unscaled * &other.unscaled, scale: self.scale + other.scale }
    }

    /// Division rounded half-to-even at the dividend's own scale
    pub fn checked_div(&self, divisor: &Self) -> Result<Self, DecimalError> {
        self.div_half_even(divisor, self.scale)
    }

    /// Division rounded half-to-even at `scale`
    pub fn div_half_even(&self, divisor: &Self, scale: u32) -> Result<Self, DecimalError> {
        if divisor.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }

        // (a / 10^sa) / (b / 10^sb) * 10^s = a * 10^(sb + s - sa) / b
        let shift = i64::from(divisor.scale) + i64::from(scale) - i64::from(self.scale);
        let (num, den) = if shift >= 0 {
            (&self.unscaled * pow10(shift as u32), divisor.unscaled.clone())
        } else {
            (self.unscaled.clone(), &divisor.unscaled * pow10((-shift) as u32))
        };

        Ok(Self { unscaled: div_round_half_even(&num, &den), scale })
    }

    pub fn neg(&self) -> Self {
        Self { unscaled: -self.unscaled.clone(), scale: self.scale }
    }
}

// ========== Trait Implementations ==========

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

/// Parses plain decimal notation: `"123"`, `"-0.50"`, `".5"`, `"+7."`
impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse_error = || DecimalError::ParseError(s.to_string());

        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(parse_error());
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(parse_error());
        }

        let digits = format!("{}{}", int_part, frac_part);
        let magnitude: IBig = digits.parse().map_err(|_| parse_error())?;
        let scale = u32::try_from(frac_part.len()).map_err(|_| parse_error())?;

        let unscaled = if negative { -magnitude } else { magnitude };
        Ok(Self { unscaled, scale })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = abs(&self.unscaled).to_string();
        let sign = if self.is_negative() { "-" } else { "" };
        let scale = self.scale as usize;

        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }

        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.unscaled_at(scale).cmp(&other.unscaled_at(scale))
    }
}
