// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;

use crate::error::{Error, Result};
use crate::format::{Carrier, FormatDescriptor, Width};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Zero,
    Subnormal,
    Normal,
    Infinite,
    NaN,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Zero => "zero",
            Classification::Subnormal => "denormal",
            Classification::Normal => "normal",
            Classification::Infinite => "infinity",
            Classification::NaN => "NaN",
        };
        f.write_str(name)
    }
}

/// View over the raw encoding of a float of width `T`.
///
/// The sign, exponent and mantissa fields are recomputed from the raw bits
/// on every call.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct FloatInfo<T: Carrier> {
    bits: T,
}

impl<T: Carrier> FloatInfo<T> {
    const FORMAT: FormatDescriptor<T> = T::FORMAT;

    #[inline(always)]
    pub fn from_bits(bits: T) -> Self {
        Self { bits }
    }

    /// Encodes a native value. For half precision this rounds the `f32` to
    /// nearest, ties to even.
    #[inline]
    pub fn from_native(value: T::Native) -> Self {
        Self::from_bits(T::from_native(value))
    }

    #[inline(always)]
    pub fn to_bits(self) -> T {
        self.bits
    }

    /// Decodes to the native type. Lossless for every width.
    #[inline]
    pub fn to_native(self) -> T::Native {
        self.bits.to_native()
    }

    pub fn width(self) -> Width {
        T::WIDTH
    }

    pub fn sign_bit(self) -> u8 {
        let sign = (self.bits & Self::FORMAT.sign_mask) >> Self::FORMAT.sign_bit_position as usize;
        if sign.is_zero() { 0 } else { 1 }
    }

    /// The exponent field as stored, still biased.
    pub fn exponent_field(self) -> T {
        (self.bits & Self::FORMAT.exponent_mask) >> Self::FORMAT.mantissa_bits as usize
    }

    pub fn mantissa_field(self) -> T {
        self.bits & Self::FORMAT.mantissa_mask
    }

    /// True for both +0 and -0.
    pub fn is_zero(self) -> bool {
        self.bits.is_zero() || self.bits == Self::FORMAT.sign_mask
    }

    pub fn is_denorm(self) -> bool {
        (self.bits & Self::FORMAT.exponent_mask).is_zero()
            && !(self.bits & Self::FORMAT.mantissa_mask).is_zero()
    }

    pub fn is_infinite(self) -> bool {
        (self.bits & !Self::FORMAT.sign_mask) == Self::FORMAT.exponent_mask
    }

    // Checks both fields instead of negating `is_infinite`.
    pub fn is_nan(self) -> bool {
        !(self.bits & Self::FORMAT.mantissa_mask).is_zero()
            && (self.bits & Self::FORMAT.exponent_mask) == Self::FORMAT.exponent_mask
    }

    pub fn classify(self) -> Classification {
        if self.is_zero() {
            Classification::Zero
        } else if self.is_denorm() {
            Classification::Subnormal
        } else if self.is_infinite() {
            Classification::Infinite
        } else if self.is_nan() {
            Classification::NaN
        } else {
            Classification::Normal
        }
    }

    pub fn decompose(self) -> Decomposition {
        Decomposition {
            width: T::WIDTH,
            sign: self.sign_bit(),
            exponent_field: self.exponent_field().as_(),
            mantissa_field: self.mantissa_field().as_(),
            classification: self.classify(),
        }
    }
}

impl<T: Carrier> fmt::Debug for FloatInfo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatInfo")
            .field("width", &T::WIDTH)
            .field("bits", &format_args!("{:#x}", self.bits))
            .finish()
    }
}

/// Fields of a raw encoding, widened to `u64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposition {
    pub width: Width,
    pub sign: u8,
    pub exponent_field: u64,
    pub mantissa_field: u64,
    pub classification: Classification,
}

/// Splits a raw encoding whose width is only known at run time.
/// ```
/// use ff::float_info::{decompose, Classification};
/// use ff::format::Width;
///
/// let d = decompose(0x3c00, Width::Half)?;
/// assert_eq!((d.sign, d.exponent_field, d.mantissa_field), (0, 15, 0));
/// assert_eq!(d.classification, Classification::Normal);
/// assert!(decompose(0x1_0000, Width::Half).is_err());
/// # Ok::<(), ff::error::Error>(())
/// ```
pub fn decompose(raw: u64, width: Width) -> Result<Decomposition> {
    let too_wide = || Error::EncodingTooWide { raw, width };
    Ok(match width {
        Width::Half => {
            FloatInfo::from_bits(u16::try_from(raw).map_err(|_| too_wide())?).decompose()
        }
        Width::Single => {
            FloatInfo::from_bits(u32::try_from(raw).map_err(|_| too_wide())?).decompose()
        }
        Width::Double => FloatInfo::from_bits(raw).decompose(),
    })
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    fn class_count<T: Carrier>(info: FloatInfo<T>) -> usize {
        [
            info.is_zero(),
            info.is_denorm(),
            info.is_infinite(),
            info.is_nan(),
        ]
        .into_iter()
        .filter(|&b| b)
        .count()
    }

    #[test]
    fn fields_half() {
        let info = FloatInfo::from_bits(0xbc01u16);
        assert_eq!(info.sign_bit(), 1);
        assert_eq!(info.exponent_field(), 0xf);
        assert_eq!(info.mantissa_field(), 1);
        assert_eq!(info.classify(), Classification::Normal);
    }

    #[test]
    fn fields_single() {
        let info = FloatInfo::<u32>::from_native(-1.5);
        assert_eq!(info.to_bits(), 0xbfc0_0000);
        assert_eq!(info.sign_bit(), 1);
        assert_eq!(info.exponent_field(), 127);
        assert_eq!(info.mantissa_field(), 0x40_0000);
    }

    #[test]
    fn fields_double() {
        let info = FloatInfo::<u64>::from_native(0.75);
        assert_eq!(info.sign_bit(), 0);
        assert_eq!(info.exponent_field(), 1022);
        assert_eq!(info.mantissa_field(), 1 << 51);
        assert_eq!(info.to_native(), 0.75);
    }

    #[test]
    fn zeros() {
        assert!(FloatInfo::from_bits(0u16).is_zero());
        assert!(FloatInfo::from_bits(0x8000u16).is_zero());
        assert!(FloatInfo::from_bits(0x8000_0000u32).is_zero());
        assert!(FloatInfo::from_bits(0x8000_0000_0000_0000u64).is_zero());
        assert!(!FloatInfo::from_bits(1u16).is_zero());
        assert!(!FloatInfo::from_bits(0x8001u16).is_zero());
    }

    #[test]
    fn denormals() {
        assert!(FloatInfo::from_bits(0x0001u16).is_denorm());
        assert!(FloatInfo::from_bits(0x83ffu16).is_denorm());
        assert!(!FloatInfo::from_bits(0x0400u16).is_denorm());
        assert!(!FloatInfo::from_bits(0x0000u16).is_denorm());
        assert!(FloatInfo::from_bits(0x007f_ffffu32).is_denorm());
        assert!(!FloatInfo::from_bits(0x0080_0000u32).is_denorm());
        assert!(FloatInfo::from_bits(1u64).is_denorm());
        assert!(!FloatInfo::from_bits(0x0010_0000_0000_0000u64).is_denorm());
    }

    #[test]
    fn infinities_and_nans() {
        assert!(FloatInfo::from_bits(0x7c00u16).is_infinite());
        assert!(FloatInfo::from_bits(0xfc00u16).is_infinite());
        assert!(!FloatInfo::from_bits(0x7c00u16).is_nan());
        assert!(FloatInfo::from_bits(0x7c01u16).is_nan());
        assert!(FloatInfo::from_bits(0xfe00u16).is_nan());
        assert!(!FloatInfo::from_bits(0x7c01u16).is_infinite());
        assert!(FloatInfo::<u32>::from_native(f32::NEG_INFINITY).is_infinite());
        assert!(FloatInfo::<u32>::from_native(f32::NAN).is_nan());
        assert!(FloatInfo::<u64>::from_native(f64::INFINITY).is_infinite());
        assert!(FloatInfo::<u64>::from_native(f64::NAN).is_nan());
    }

    #[test]
    fn classification_is_exclusive_half() {
        for bits in 0..=u16::MAX {
            let info = FloatInfo::from_bits(bits);
            assert!(class_count(info) <= 1, "{info:?}");
            assert_eq!(
                info.classify() == Classification::Normal,
                class_count(info) == 0
            );
        }
    }

    #[test]
    fn classification_matches_std() {
        arbtest::arbtest(|u| {
            let bits: u32 = u.arbitrary()?;
            let info = FloatInfo::from_bits(bits);
            let native = f32::from_bits(bits);
            assert!(class_count(info) <= 1);
            let expected = match native.classify() {
                std::num::FpCategory::Zero => Classification::Zero,
                std::num::FpCategory::Subnormal => Classification::Subnormal,
                std::num::FpCategory::Normal => Classification::Normal,
                std::num::FpCategory::Infinite => Classification::Infinite,
                std::num::FpCategory::Nan => Classification::NaN,
            };
            assert_eq!(info.classify(), expected);

            let bits: u64 = u.arbitrary()?;
            let info = FloatInfo::from_bits(bits);
            assert!(class_count(info) <= 1);
            assert_eq!(info.is_nan(), f64::from_bits(bits).is_nan());
            assert_eq!(info.is_infinite(), f64::from_bits(bits).is_infinite());
            assert_eq!(info.is_denorm(), f64::from_bits(bits).is_subnormal());
            Ok(())
        });
    }

    #[test]
    fn decompose_by_width() {
        let d = decompose(0xfc00, Width::Half).unwrap();
        assert_eq!(
            d,
            Decomposition {
                width: Width::Half,
                sign: 1,
                exponent_field: 0x1f,
                mantissa_field: 0,
                classification: Classification::Infinite,
            }
        );
        let d = decompose(0x0000_0001, Width::Single).unwrap();
        assert_eq!(d.classification, Classification::Subnormal);
        let d = decompose(0x7ff8_0000_0000_0000, Width::Double).unwrap();
        assert_eq!(d.classification, Classification::NaN);
        assert_eq!(d.exponent_field, 0x7ff);
        assert_eq!(d.mantissa_field, 1 << 51);
    }

    #[test]
    fn decompose_rejects_wide_raw() {
        assert_eq!(
            decompose(0x1_0000, Width::Half),
            Err(Error::EncodingTooWide {
                raw: 0x1_0000,
                width: Width::Half
            })
        );
        assert!(decompose(0x1_0000_0000, Width::Single).is_err());
        assert!(decompose(u64::MAX, Width::Double).is_ok());
    }
}
