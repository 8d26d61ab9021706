// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use thiserror::Error;

use crate::format::Width;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidNumber(String),
    #[error("Hex value 0x{digits} does not fit a {width} encoding")]
    HexOutOfRange { digits: String, width: Width },
    #[error("Unsupported encoding width: {0} bits, expected 16, 32 or 64")]
    UnsupportedWidth(u32),
    #[error("Raw encoding {raw:#x} has bits set above a {width} encoding")]
    EncodingTooWide { raw: u64, width: Width },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
