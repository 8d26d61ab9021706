// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Human-readable dumps of float encodings.

use std::fmt;

use num_traits::Float;

use crate::float_info::{Classification, FloatInfo};
use crate::format::Carrier;
use crate::util::tracing_wrappers::*;

/// Formats `value` in IEEE hexadecimal-significand notation.
pub fn hexfloat<F: Float + hexfloat2::SupportedFloat>(value: F) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        format!("{sign}inf")
    } else {
        hexfloat2::format(value)
    }
}

/// Prints the width and class, the raw encoding in hex, the sign, exponent
/// and mantissa fields in binary, and finally the value in decimal,
/// hexfloat and scientific notation.
impl<T: Carrier> fmt::Display for FloatInfo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = T::FORMAT;
        write!(f, "{} {}", T::WIDTH, T::WIDTH.precision_name())?;
        match self.classify() {
            class @ (Classification::Subnormal | Classification::Infinite | Classification::NaN) => {
                writeln!(f, " {class}")?
            }
            Classification::Zero | Classification::Normal => writeln!(f)?,
        }
        writeln!(f, "Hex: {:#x}", self.to_bits())?;
        writeln!(
            f,
            "Bits: {} {:0exp_width$b} {:0mant_width$b}",
            self.sign_bit(),
            self.exponent_field(),
            self.mantissa_field(),
            exp_width = format.exponent_bits as usize,
            mant_width = format.mantissa_bits as usize,
        )?;
        let value = self.to_native();
        write!(f, "Float: {value}, {}, {value:e}", hexfloat(value))
    }
}

/// A value seen at every supported width: as a double, rounded to single,
/// and that single rounded to half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakdown {
    pub double: FloatInfo<u64>,
    pub single: FloatInfo<u32>,
    pub half: FloatInfo<u16>,
}

impl Breakdown {
    pub fn new(value: f64) -> Breakdown {
        let single = value as f32;
        let breakdown = Breakdown {
            double: FloatInfo::from_native(value),
            single: FloatInfo::from_native(single),
            half: FloatInfo::from_native(single),
        };
        trace!(?breakdown);
        breakdown
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}\n\n{}", self.double, self.single, self.half)
    }
}
