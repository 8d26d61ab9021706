// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![deny(unsafe_code)]
pub mod bitcast;
pub mod codec;
pub mod error;
pub mod float_info;
pub mod format;
pub mod parse;
pub mod report;
mod util;
