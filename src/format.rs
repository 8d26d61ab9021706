// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Bit layouts of the supported IEEE 754 binary encodings.

use std::fmt;

use num_derive::FromPrimitive;
use num_traits::{AsPrimitive, Float, FromPrimitive, PrimInt, Unsigned};

use crate::bitcast::BitCast;
use crate::codec::{half_to_single, single_to_half};
use crate::error::Error;

/// Size in bits of a supported encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Width {
    Half = 16,
    Single = 32,
    Double = 64,
}

impl Width {
    pub fn bits(self) -> u32 {
        self as u32
    }

    pub fn precision_name(self) -> &'static str {
        match self {
            Width::Half => "half precision",
            Width::Single => "single precision",
            Width::Double => "double precision",
        }
    }

    /// Layout constants of this width, with masks widened to `u64`.
    pub fn descriptor(self) -> FormatDescriptor<u64> {
        match self {
            Width::Half => u16::FORMAT.widen(),
            Width::Single => u32::FORMAT.widen(),
            Width::Double => u64::FORMAT,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

impl TryFrom<u32> for Width {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Width, Error> {
        Width::from_u32(bits).ok_or(Error::UnsupportedWidth(bits))
    }
}

/// Field boundaries of one binary encoding.
///
/// `exponent_bias` is stored negated (`-15` for half precision) so that it
/// can be added to a biased exponent field to recover the true exponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatDescriptor<T> {
    pub mantissa_bits: u32,
    pub exponent_bits: u32,
    pub sign_bit_position: u32,
    pub mantissa_mask: T,
    pub exponent_mask: T,
    pub sign_mask: T,
    pub exponent_bias: i32,
}

impl<T: Carrier> FormatDescriptor<T> {
    pub fn widen(self) -> FormatDescriptor<u64> {
        FormatDescriptor {
            mantissa_bits: self.mantissa_bits,
            exponent_bits: self.exponent_bits,
            sign_bit_position: self.sign_bit_position,
            mantissa_mask: self.mantissa_mask.as_(),
            exponent_mask: self.exponent_mask.as_(),
            sign_mask: self.sign_mask.as_(),
            exponent_bias: self.exponent_bias,
        }
    }
}

macro_rules! descriptor {
    ($carrier:ty, mantissa: $m:expr, exponent: $e:expr) => {
        FormatDescriptor::<$carrier> {
            mantissa_bits: $m,
            exponent_bits: $e,
            sign_bit_position: $m + $e,
            mantissa_mask: (1 << $m) - 1,
            exponent_mask: ((1 << $e) - 1) << $m,
            sign_mask: 1 << ($m + $e),
            exponent_bias: -((1 << ($e - 1)) - 1),
        }
    };
}

/// Unsigned integer type holding the raw encoding of one width.
///
/// Only `u16`, `u32` and `u64` implement this, so pairing a float with a
/// carrier of the wrong size does not type check.
pub trait Carrier:
    PrimInt
    + Unsigned
    + AsPrimitive<u64>
    + fmt::Debug
    + fmt::LowerHex
    + fmt::Binary
    + Send
    + Sync
    + 'static
{
    /// Platform float used to compute with and print values of this width.
    /// Half precision has no native type and goes through `f32`.
    type Native: Float
        + Into<f64>
        + fmt::Debug
        + fmt::Display
        + fmt::LowerExp
        + hexfloat2::SupportedFloat;

    const WIDTH: Width;
    const FORMAT: FormatDescriptor<Self>;

    fn from_native(value: Self::Native) -> Self;
    fn to_native(self) -> Self::Native;
    fn native_from_f64(value: f64) -> Self::Native;
}

impl Carrier for u16 {
    type Native = f32;

    const WIDTH: Width = Width::Half;
    const FORMAT: FormatDescriptor<u16> = descriptor!(u16, mantissa: 10, exponent: 5);

    fn from_native(value: f32) -> u16 {
        single_to_half(value)
    }

    fn to_native(self) -> f32 {
        f32::from_raw(half_to_single(self))
    }

    fn native_from_f64(value: f64) -> f32 {
        value as f32
    }
}

impl Carrier for u32 {
    type Native = f32;

    const WIDTH: Width = Width::Single;
    const FORMAT: FormatDescriptor<u32> = descriptor!(u32, mantissa: 23, exponent: 8);

    fn from_native(value: f32) -> u32 {
        value.to_raw()
    }

    fn to_native(self) -> f32 {
        f32::from_raw(self)
    }

    fn native_from_f64(value: f64) -> f32 {
        value as f32
    }
}

impl Carrier for u64 {
    type Native = f64;

    const WIDTH: Width = Width::Double;
    const FORMAT: FormatDescriptor<u64> = descriptor!(u64, mantissa: 52, exponent: 11);

    fn from_native(value: f64) -> u64 {
        value.to_raw()
    }

    fn to_native(self) -> f64 {
        f64::from_raw(self)
    }

    fn native_from_f64(value: f64) -> f64 {
        value
    }
}
