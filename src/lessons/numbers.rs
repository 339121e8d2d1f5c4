//! Lesson 4: integer and float methods.

use crate::error::{LessonError, Result};
use crate::report::Report;

// =============================================================================
// Integer methods
// =============================================================================

/// Bits needed to represent `|n|`, without sign or leading zeros.
pub fn int_bit_length(n: i64) -> u32 {
    64 - n.unsigned_abs().leading_zeros()
}

/// Two-byte big-endian encoding. Only `0..=65535` fits.
pub fn int_to_bytes(n: i64) -> Result<[u8; 2]> {
    u16::try_from(n)
        .map(u16::to_be_bytes)
        .map_err(|_| LessonError::Overflow {
            operation: "int_to_bytes",
        })
}

/// Big-endian decode of up to eight bytes.
pub fn int_from_bytes(bytes: &[u8]) -> Result<u64> {
    if bytes.len() > 8 {
        return Err(LessonError::Overflow {
            operation: "int_from_bytes",
        });
    }
    Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

// =============================================================================
// Float methods
// =============================================================================

pub fn float_is_integer(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0
}

const FRACTION_BITS: u32 = 52;
const FRACTION_MASK: u64 = (1 << FRACTION_BITS) - 1;
const EXPONENT_BIAS: i32 = 1023;

/// Splits a finite float into `mantissa * 2^exponent`.
fn decompose(x: f64) -> (u64, i32) {
    let bits = x.to_bits();
    let biased = ((bits >> FRACTION_BITS) & 0x7ff) as i32;
    let fraction = bits & FRACTION_MASK;
    if biased == 0 {
        (fraction, 1 - EXPONENT_BIAS - FRACTION_BITS as i32)
    } else {
        (
            fraction | (1 << FRACTION_BITS),
            biased - EXPONENT_BIAS - FRACTION_BITS as i32,
        )
    }
}

/// Exact `(numerator, denominator)` in lowest terms with a positive
/// denominator. Ratios that do not fit in `i128` overflow.
pub fn float_as_ratio(x: f64) -> Result<(i128, i128)> {
    if !x.is_finite() {
        return Err(LessonError::NonFinite(x));
    }
    if x == 0.0 {
        return Ok((0, 1));
    }
    let overflow = LessonError::Overflow {
        operation: "float_as_ratio",
    };
    let (mut mantissa, mut exponent) = decompose(x);
    if exponent < 0 {
        let shift = mantissa.trailing_zeros().min(exponent.unsigned_abs());
        mantissa >>= shift;
        exponent += shift as i32;
    }
    let sign = if x < 0.0 { -1 } else { 1 };
    if exponent >= 0 {
        if exponent > 127 - 53 {
            return Err(overflow);
        }
        Ok((sign * ((mantissa as i128) << exponent), 1))
    } else {
        let shift = exponent.unsigned_abs();
        if shift > 126 {
            return Err(overflow);
        }
        Ok((sign * mantissa as i128, 1i128 << shift))
    }
}

/// Hexadecimal form `[-]0x1.<13 hex digits>p<exp>`; subnormals are written
/// as `0x0.<digits>p-1022`.
pub fn float_to_hex(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    let sign = if x.is_sign_negative() { "-" } else { "" };
    if x.is_infinite() {
        return format!("{sign}inf");
    }
    if x == 0.0 {
        return format!("{sign}0x0.0p+0");
    }
    let bits = x.to_bits();
    let biased = ((bits >> FRACTION_BITS) & 0x7ff) as i32;
    let fraction = bits & FRACTION_MASK;
    if biased == 0 {
        format!("{sign}0x0.{fraction:013x}p-1022")
    } else {
        format!("{sign}0x1.{fraction:013x}p{:+}", biased - EXPONENT_BIAS)
    }
}

/// Parses what [`float_to_hex`] writes, plus the looser forms `1.8p1`,
/// `0xAp-2` and `inf`/`nan`. Digits past 64 bits of precision are dropped.
pub fn float_from_hex(text: &str) -> Result<f64> {
    let invalid = || LessonError::InvalidHexFloat(text.to_string());
    let trimmed = text.trim().to_ascii_lowercase();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(&trimmed)),
    };
    let sign = if negative { -1.0 } else { 1.0 };

    match rest {
        "inf" | "infinity" => return Ok(sign * f64::INFINITY),
        "nan" => return Ok(f64::NAN),
        _ => {}
    }

    let body = rest.strip_prefix("0x").unwrap_or(rest);
    let (digits, mut exponent) = match body.split_once('p') {
        Some((digits, exp)) => (digits, exp.parse::<i64>().map_err(|_| invalid())?),
        None => (body, 0),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }

    let mut mantissa: u64 = 0;
    for (c, fractional) in int_part
        .chars()
        .map(|c| (c, false))
        .chain(frac_part.chars().map(|c| (c, true)))
    {
        let digit = c.to_digit(16).ok_or_else(invalid)? as u64;
        if mantissa >> 60 == 0 {
            mantissa = (mantissa << 4) | digit;
            if fractional {
                exponent = exponent.saturating_sub(4);
            }
        } else if !fractional {
            exponent = exponent.saturating_add(4);
        }
    }

    let value = sign * scale_by_pow2(mantissa as f64, exponent);
    if value.is_infinite() {
        return Err(LessonError::Overflow {
            operation: "float_from_hex",
        });
    }
    Ok(value)
}

/// `x * 2^e` in steps small enough that each power of two is exact.
fn scale_by_pow2(mut x: f64, e: i64) -> f64 {
    // A 64-bit mantissa is already infinite or zero past this range.
    let mut e = e.clamp(-2200, 2200) as i32;
    while e > 1000 {
        x *= 2f64.powi(1000);
        e -= 1000;
    }
    while e < -1000 {
        x *= 2f64.powi(-1000);
        e += 1000;
    }
    x * 2f64.powi(e)
}

// =============================================================================
// Common numeric behaviors
// =============================================================================

pub fn absolute_number(n: f64) -> f64 {
    n.abs()
}

/// Rounds to `digits` decimal places, ties to even.
pub fn rounded_number(n: f64, digits: i32) -> f64 {
    if !n.is_finite() {
        return n;
    }
    let factor = 10f64.powi(digits);
    if factor == 0.0 {
        return 0.0f64.copysign(n);
    }
    let scaled = n * factor;
    if !scaled.is_finite() {
        return n;
    }
    scaled.round_ties_even() / factor
}

pub fn power(base: i64, exp: u32) -> Option<i64> {
    base.checked_pow(exp)
}

/// Floor division: the remainder takes the sign of the divisor.
pub fn quotient_and_remainder(a: i64, b: i64) -> Result<(i64, i64)> {
    if b == 0 {
        return Err(LessonError::ZeroDivision);
    }
    let overflow = || LessonError::Overflow {
        operation: "quotient_and_remainder",
    };
    let q = a.checked_div(b).ok_or_else(overflow)?;
    let r = a.checked_rem(b).ok_or_else(overflow)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Ok((q - 1, r + b))
    } else {
        Ok((q, r))
    }
}

pub fn is_truthy_number(n: f64) -> bool {
    n != 0.0
}

pub fn walkthrough(report: &mut Report) {
    report.section("Number methods");

    report.check("bit_length(10) = 4", int_bit_length(10) == 4);
    let round_trip = int_to_bytes(10).and_then(|b| int_from_bytes(&b));
    report.check("10 -> bytes -> 10", matches!(round_trip, Ok(10)));
    report.check("int_to_bytes(70000) overflows", int_to_bytes(70_000).is_err());

    report.check("10.0 is integer, 10.5 is not", float_is_integer(10.0) && !float_is_integer(10.5));
    report.check("0.5 as ratio = 1/2", matches!(float_as_ratio(0.5), Ok((1, 2))));

    let hex = float_to_hex(10.5);
    report.show("hex(10.5)", &hex);
    report.check("hex round trip of 10.5", matches!(float_from_hex(&hex), Ok(x) if x == 10.5));

    report.check("abs(-10) = 10", absolute_number(-10.0) == 10.0);
    report.check("round(10.567, 2) = 10.57", rounded_number(10.567, 2) == 10.57);
    report.check("2^3 = 8", power(2, 3) == Some(8));
    report.check("divmod(10, 3) = (3, 1)", matches!(quotient_and_remainder(10, 3), Ok((3, 1))));
    report.check("divmod(-7, 2) = (-4, 1)", matches!(quotient_and_remainder(-7, 2), Ok((-4, 1))));
    report.check("0 and 0.0 are falsy", !is_truthy_number(0.0) && is_truthy_number(-3.0));
}
