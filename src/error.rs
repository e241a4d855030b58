// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types for the seam carver.
//!
//! Every failure is detected at a component boundary, before any
//! energy or seam work is done, so a carve either completes or leaves
//! the caller's image exactly as it was.

use failure::Fail;

#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// The grid has no rows or no columns.
    #[fail(display = "invalid image shape: {}x{}", width, height)]
    InvalidShape { width: u32, height: u32 },

    /// The relative scale is not in (0, 1].
    #[fail(display = "scale {} is outside (0, 1]", _0)]
    InvalidScale(f64),

    /// The requested size is zero or larger than the image.
    #[fail(
        display = "cannot carve {} pixels down to {}; the target must be between 1 and {}",
        original, target, original
    )]
    InvalidTarget { target: u32, original: u32 },

    /// A seam that does not describe exactly one in-bounds pixel per row.
    #[fail(
        display = "malformed seam: {} entries for {} rows, {} columns",
        length, height, width
    )]
    MalformedSeam {
        length: usize,
        width: u32,
        height: u32,
    },

    #[fail(display = "buffer holds {} cells, map needs {}", actual, expected)]
    SizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
