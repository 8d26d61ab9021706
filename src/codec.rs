// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Conversion between half precision encodings and native `f32`.

use crate::float_info::FloatInfo;
use crate::format::{Carrier, FormatDescriptor};
use crate::util::tracing_wrappers::*;

const HALF: FormatDescriptor<u16> = u16::FORMAT;
const SINGLE: FormatDescriptor<u32> = u32::FORMAT;

/// Low single precision mantissa bits with no half precision counterpart.
const MANTISSA_SHIFT: u32 = SINGLE.mantissa_bits - HALF.mantissa_bits;

/// Single precision bias minus half precision bias, 112.
const BIAS_DIFF: i32 = HALF.exponent_bias - SINGLE.exponent_bias;

/// Exponent of the smallest normal half value, -14.
const HALF_MIN_EXPONENT: i32 = 1 + HALF.exponent_bias;

/// Finite magnitudes above this round to half infinity. 65504 is the largest
/// finite half value.
pub const HALF_OVERFLOW_THRESHOLD: f32 = 65519.0;

pub const HALF_CANONICAL_NAN: u16 = HALF.exponent_mask | HALF.mantissa_mask;
pub const SINGLE_CANONICAL_NAN: u32 = SINGLE.exponent_mask | (1 << (SINGLE.mantissa_bits - 1));

/// Expands a half precision encoding to the single precision encoding of the
/// same value. Exact for every input except NaN payloads, which collapse to
/// [`SINGLE_CANONICAL_NAN`] with the sign kept.
/// ```
/// use ff::codec::half_to_single;
/// assert_eq!(half_to_single(0x3c00), 0x3f80_0000);
/// assert_eq!(half_to_single(0x0001), 0x3380_0000);
/// ```
pub fn half_to_single(half: u16) -> u32 {
    let info = FloatInfo::from_bits(half);
    let sign = u32::from(half & HALF.sign_mask)
        << (SINGLE.sign_bit_position - HALF.sign_bit_position);
    if info.is_infinite() {
        return sign | SINGLE.exponent_mask;
    } else if info.is_nan() {
        return sign | SINGLE_CANONICAL_NAN;
    } else if info.is_zero() {
        return sign;
    }

    let abs_bits = half & !HALF.sign_mask;
    let mut mantissa = abs_bits & HALF.mantissa_mask;
    let mut exponent = i32::from(abs_bits >> HALF.mantissa_bits);
    if exponent == 0 {
        // Normalize so that the leading one becomes the implicit bit.
        let implicit_bit = 1 << HALF.mantissa_bits;
        let mut e = 0;
        mantissa <<= 1;
        while mantissa & implicit_bit == 0 {
            mantissa <<= 1;
            e += 1;
        }
        mantissa &= HALF.mantissa_mask;
        exponent = BIAS_DIFF - e;
    } else {
        exponent += BIAS_DIFF;
    }

    sign | ((exponent as u32) << SINGLE.mantissa_bits) | (u32::from(mantissa) << MANTISSA_SHIFT)
}

/// Rounds `single` to the nearest half precision value, ties to even.
/// ```
/// use ff::codec::single_to_half;
/// assert_eq!(single_to_half(1.0), 0x3c00);
/// assert_eq!(single_to_half(-65504.0), 0xfbff);
/// assert_eq!(single_to_half(65520.0), 0x7c00);
/// ```
pub fn single_to_half(single: f32) -> u16 {
    let magnitude = if single.is_infinite() {
        HALF.exponent_mask
    } else if single.is_nan() {
        HALF_CANONICAL_NAN
    } else {
        finite_magnitude_to_half(single.abs())
    };
    if single.is_sign_negative() {
        magnitude | HALF.sign_mask
    } else {
        magnitude
    }
}

fn finite_magnitude_to_half(abs: f32) -> u16 {
    if abs > HALF_OVERFLOW_THRESHOLD {
        trace!(abs, "overflow to half infinity");
        return HALF.exponent_mask;
    }
    let info = FloatInfo::<u32>::from_native(abs);
    // Single precision subnormals are all below 2^-126.
    if info.is_zero() || info.is_denorm() {
        return 0;
    }

    let exponent = info.exponent_field() as i32 + SINGLE.exponent_bias;
    let mantissa = info.mantissa_field();
    let rounded = if exponent < HALF_MIN_EXPONENT {
        // Rounding only looks at the 11-bit significand, the low single
        // precision mantissa bits are discarded first.
        let significand = (mantissa >> MANTISSA_SHIFT) | (1 << HALF.mantissa_bits);
        let exp_shift = exponent.abs_diff(HALF.exponent_bias) + 1;
        if exp_shift > HALF.mantissa_bits {
            trace!(abs, "underflow to half zero");
            return 0;
        }
        round_shift_rte(significand, exp_shift)
    } else {
        // Rounding the combined exponent and mantissa lets a carry out of the
        // mantissa bump the exponent.
        let half_exponent = (exponent - HALF.exponent_bias) as u32;
        round_shift_rte((half_exponent << SINGLE.mantissa_bits) | mantissa, MANTISSA_SHIFT)
    };
    rounded as u16
}

/// Shifts `bits` right by `shift` (at least 1), rounding to nearest with
/// ties to even.
#[inline]
fn round_shift_rte(bits: u32, shift: u32) -> u32 {
    let kept = bits >> shift;
    let round_bit = 1 << (shift - 1);
    if (bits & round_bit) == 0 {
        return kept;
    }
    let above_halfway = (bits & (round_bit - 1)) != 0;
    if above_halfway || (kept & 1) != 0 {
        kept + 1
    } else {
        kept
    }
}
