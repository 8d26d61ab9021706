// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#[allow(unused)]
#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[allow(unused)]
#[cfg(not(feature = "tracing"))]
pub(crate) use {debug, trace};
