// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use num_traits::Num;

use crate::error::{Error, Result};
use crate::format::Carrier;
use crate::util::tracing_wrappers::*;

/// Textual forms accepted by [`parse_native`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputForm {
    /// `0x3c00`: the raw encoding itself.
    HexInteger,
    /// `0x1.8p3`
    HexFloat,
    /// `1.5`, `-2e-3`, `inf`, `nan`
    Decimal,
}

impl InputForm {
    pub fn detect(text: &str) -> InputForm {
        let text = text.trim();
        match text.strip_prefix("0x") {
            Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()) => {
                InputForm::HexInteger
            }
            _ => {
                let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
                if unsigned.starts_with("0x") || unsigned.starts_with("0X") {
                    InputForm::HexFloat
                } else {
                    InputForm::Decimal
                }
            }
        }
    }
}

/// Parses `text` as a value of width `T`, returning it as the native type.
///
/// A hex integer is taken as a raw encoding of width `T`, so for half
/// precision `0x3c00` yields `1.0`.
/// ```
/// use ff::parse::parse_native;
/// assert_eq!(parse_native::<u16>("0x3c00")?, 1.0f32);
/// assert_eq!(parse_native::<u32>("0x1.8p1")?, 3.0f32);
/// assert_eq!(parse_native::<u64>("-2.5e-1")?, -0.25f64);
/// assert!(parse_native::<u16>("0x10000").is_err());
/// # Ok::<(), ff::error::Error>(())
/// ```
pub fn parse_native<T: Carrier>(text: &str) -> Result<T::Native> {
    let text = text.trim();
    let form = InputForm::detect(text);
    debug!(?form, text, "parsing");
    match form {
        InputForm::HexInteger => {
            let digits = &text[2..];
            let raw = <T as Num>::from_str_radix(digits, 16).map_err(|_| Error::HexOutOfRange {
                digits: digits.to_string(),
                width: T::WIDTH,
            })?;
            Ok(raw.to_native())
        }
        InputForm::HexFloat => {
            let (negative, unsigned) = match text.as_bytes()[0] {
                b'-' => (true, &text[1..]),
                b'+' => (false, &text[1..]),
                _ => (false, text),
            };
            // The hexfloat parser only knows the lowercase prefix.
            let normalized = format!("0x{}", &unsigned[2..]);
            let value: f64 = hexfloat2::parse(&normalized)
                .map_err(|_| Error::InvalidNumber(text.to_string()))?;
            Ok(T::native_from_f64(if negative { -value } else { value }))
        }
        InputForm::Decimal => text
            .parse::<f64>()
            .map(T::native_from_f64)
            .map_err(|_| Error::InvalidNumber(text.to_string())),
    }
}
