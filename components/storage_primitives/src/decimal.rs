//! Base-10 view of `f64` values.
//!
//! A float is read through its shortest round-trip decimal representation
//! (what `Display` prints), so `0.1` is treated as exactly one tenth rather
//! than the nearest binary fraction. Both fractional construction and
//! two-digit rendering go through this view.

use crate::error::{Result, StorageSizeError};

/// Sign and digits of a finite float, split at the decimal point.
///
/// `integer` is never empty and `fraction` carries no trailing zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecimalRepr {
    negative: bool,
    integer: String,
    fraction: String,
}

impl DecimalRepr {
    /// Returns `None` for NaN and infinities
    pub(crate) fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        // Display for f64 never uses exponent notation
        let text = value.abs().to_string();
        let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

        Some(Self {
            negative: value.is_sign_negative() && value != 0.0,
            integer: integer.to_string(),
            fraction: fraction.trim_end_matches('0').to_string(),
        })
    }

    /// Multiply by an integer factor, requiring a whole-number result.
    ///
    /// `value` and `unit` only feed the error message.
    pub(crate) fn times_exact(&self, factor: i64, value: f64, unit: &'static str) -> Result<i64> {
        let mantissa = self
            .integer
            .bytes()
            .chain(self.fraction.bytes())
            .try_fold(0i128, |acc, digit| {
                acc.checked_mul(10)?.checked_add(i128::from(digit - b'0'))
            })
            .ok_or(StorageSizeError::Overflow)?;

        let product = mantissa
            .checked_mul(i128::from(factor))
            .ok_or(StorageSizeError::Overflow)?;

        let whole = match u32::try_from(self.fraction.len())
            .ok()
            .and_then(|scale| 10i128.checked_pow(scale))
        {
            Some(divisor) if product % divisor == 0 => product / divisor,
            _ if product == 0 => 0,
            _ => return Err(StorageSizeError::Precision { value, unit }),
        };

        let signed = if self.negative { -whole } else { whole };
        i64::try_from(signed).map_err(|_| StorageSizeError::Overflow)
    }

    /// Round half up (away from zero) to `places` fraction digits.
    ///
    /// Returns the sign, integer digits and exactly `places` fraction digits.
    /// A result that rounds to zero is never negative.
    pub(crate) fn round_half_up(&self, places: usize) -> (bool, String, String) {
        let mut fraction = self.fraction.clone();
        if fraction.len() < places + 1 {
            fraction.extend(std::iter::repeat('0').take(places + 1 - fraction.len()));
        }

        let round_up = fraction.as_bytes()[places] >= b'5';
        let mut digits: Vec<u8> = self
            .integer
            .bytes()
            .chain(fraction.bytes().take(places))
            .collect();

        if round_up {
            let mut carry = true;
            for digit in digits.iter_mut().rev() {
                if *digit == b'9' {
                    *digit = b'0';
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                digits.insert(0, b'1');
            }
        }

        let split = digits.len() - places;
        let is_zero = digits.iter().all(|digit| *digit == b'0');
        let integer = String::from_utf8_lossy(&digits[..split]).into_owned();
        let fraction = String::from_utf8_lossy(&digits[split..]).into_owned();

        (self.negative && !is_zero, integer, fraction)
    }
}
