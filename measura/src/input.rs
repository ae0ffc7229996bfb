//! Keypad input accumulator
//!
//! Digits are appended one at a time, either to the integer part or, once a
//! decimal point has been entered, to the fraction. The accumulator also has
//! a compact binary encoding used for state restoration:
//!
//! ```text
//! varint((len << 1) | negative)   LEB128
//! magnitude                       len bytes, little endian
//! flags                           scale in bits 0..7, decimal entered in bit 7
//! ```

use dashu_int::{IBig, Sign, UBig};
use measura_core::Decimal;
use thiserror::Error;

/// Largest scale the flag byte can carry
pub const MAX_SCALE: u32 = 0x7f;

const DECIMAL_FLAG: u8 = 0x80;

/// Errors raised by digit entry and state decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid digit: {0} (expected 0-9)")]
    InvalidDigit(u8),

    #[error("input already has {MAX_SCALE} fractional digits")]
    ScaleLimit,

    #[error("malformed input state: {0}")]
    MalformedState(&'static str),
}

/// The value being typed on the keypad
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserInput {
    value: Decimal,
    decimal_entered: bool,
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &Decimal {
        &self.value
    }

    pub fn is_decimal_entered(&self) -> bool {
        self.decimal_entered
    }

    /// Append one digit (0-9)
    pub fn append_digit(&mut self, digit: u8) -> Result<(), InputError> {
        if digit > 9 {
            return Err(InputError::InvalidDigit(digit));
        }
        let digit_value = IBig::from(digit);

        self.value = if self.decimal_entered {
            let scale = self.value.scale() + 1;
            if scale > MAX_SCALE {
                return Err(InputError::ScaleLimit);
            }
            self.value.add(&Decimal::from_parts(digit_value, scale))
        } else {
            self.value
                .mul(&Decimal::from_i64(10))
                .add(&Decimal::from_parts(digit_value, 0))
        };
        Ok(())
    }

    /// Mark that a decimal point has been entered; repeated calls do nothing
    pub fn append_decimal_point(&mut self) {
        self.decimal_entered = true;
    }

    pub fn clear(&mut self) {
        self.value = Decimal::zero();
        self.decimal_entered = false;
    }

    // ========== State Encoding ==========

    pub fn encode(&self) -> Vec<u8> {
        let (sign, magnitude) = self.value.unscaled().clone().into_parts();
        let magnitude = magnitude.to_le_bytes();
        let magnitude: &[u8] = &magnitude;

        let negative = u64::from(sign == Sign::Negative);
        let header = ((magnitude.len() as u64) << 1) | negative;

        let mut out = Vec::with_capacity(magnitude.len() + 3);
        write_varint(&mut out, header);
        out.extend_from_slice(magnitude);

        // scale never exceeds MAX_SCALE: append_digit and decode both cap it
        let mut flags = self.value.scale().min(MAX_SCALE) as u8;
        if self.decimal_entered {
            flags |= DECIMAL_FLAG;
        }
        out.push(flags);
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, InputError> {
        let (header, used) = read_varint(bytes)?;
        let negative = header & 1 == 1;
        let len = usize::try_from(header >> 1)
            .map_err(|_| InputError::MalformedState("magnitude length overflows"))?;

        let rest = &bytes[used..];
        if rest.len() <= len {
            return Err(InputError::MalformedState("truncated"));
        }
        if rest.len() > len + 1 {
            return Err(InputError::MalformedState("trailing bytes"));
        }

        let magnitude = IBig::from(UBig::from_le_bytes(&rest[..len]));
        let unscaled = if negative { -magnitude } else { magnitude };

        let flags = rest[len];
        let scale = u32::from(flags & !DECIMAL_FLAG);
        let decimal_entered = flags & DECIMAL_FLAG != 0;

        Ok(Self {
            value: Decimal::from_parts(unscaled, scale),
            decimal_entered,
        })
    }
}

fn write_varint(out: &mut Vec<u8>, mut n: u64) {
    loop {
        let byte = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Returns the value and the number of bytes consumed
fn read_varint(bytes: &[u8]) -> Result<(u64, usize), InputError> {
    let mut value = 0u64;
    for (i, byte) in bytes.iter().enumerate().take(10) {
        let chunk = u64::from(byte & 0x7f);
        let shift = 7 * i as u32;
        if shift == 63 && chunk > 1 {
            return Err(InputError::MalformedState("varint overflows"));
        }
        value |= chunk << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if bytes.len() >= 10 {
        Err(InputError::MalformedState("varint overflows"))
    } else {
        Err(InputError::MalformedState("truncated"))
    }
}
