// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Reinterpretation between native floats and their raw encodings.

/// A native float with an unsigned integer type of exactly the same size.
pub trait BitCast: Copy {
    type Raw: Copy;

    fn to_raw(self) -> Self::Raw;
    fn from_raw(raw: Self::Raw) -> Self;
}

macro_rules! impl_bitcast {
    ($native:ty, $raw:ty) => {
        const _: () = assert!(std::mem::size_of::<$native>() == std::mem::size_of::<$raw>());

        impl BitCast for $native {
            type Raw = $raw;

            #[inline(always)]
            fn to_raw(self) -> $raw {
                self.to_bits()
            }

            #[inline(always)]
            fn from_raw(raw: $raw) -> $native {
                <$native>::from_bits(raw)
            }
        }
    };
}

impl_bitcast!(f32, u32);
impl_bitcast!(f64, u64);

/// Returns the native float whose encoding is `raw`.
/// ```
/// assert_eq!(ff::bitcast::bitcast::<f32>(0x3f80_0000), 1.0);
/// assert_eq!(ff::bitcast::bitcast::<f64>(0xc000_0000_0000_0000), -2.0);
/// ```
#[inline(always)]
pub fn bitcast<F: BitCast>(raw: F::Raw) -> F {
    F::from_raw(raw)
}

/// Returns the raw encoding of `value`.
/// ```
/// assert_eq!(ff::bitcast::bits_of(-0.0f32), 0x8000_0000);
/// ```
#[inline(always)]
pub fn bits_of<F: BitCast>(value: F) -> F::Raw {
    value.to_raw()
}
