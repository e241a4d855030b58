// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! Repeatedly find the cheapest vertical seam and cut it out, until
//! the image is as narrow as requested.  Making an image shorter is
//! the same job done on the image turned on its side: transpose, carve
//! columns, transpose back.

use crate::config::{target_for_scale, Axis, CarveOptions};
use crate::error::{Error, Result};
use crate::seamfinder::{SeamFinder, SobelSeams};
use crate::twodmap::{PixelGrid, TwoDimensionalMap};
use itertools::izip;
use tracing::{debug, trace};

/// Which pixels survive a seam removal: `true` to keep, `false` to
/// drop.  The only way to build one is from a valid seam, so every row
/// holds exactly one `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalMask {
    keep: TwoDimensionalMap<bool>,
}

impl RemovalMask {
    /// Mark the pixels of `seam` for removal from a `width` by `height`
    /// image.  The seam needs one in-bounds x coordinate per row.
    pub fn from_seam(width: u32, height: u32, seam: &[u32]) -> Result<Self> {
        if width == 0 || seam.len() != height as usize || seam.iter().any(|x| *x >= width) {
            return Err(Error::MalformedSeam {
                length: seam.len(),
                width,
                height,
            });
        }
        let mut keep = TwoDimensionalMap::from_fn(width, height, |_, _| true);
        for (y, x) in seam.iter().enumerate() {
            keep[(*x, y as u32)] = false;
        }
        Ok(RemovalMask { keep })
    }

    pub fn keeps(&self, x: u32, y: u32) -> bool {
        self.keep[(x, y)]
    }

    /// Copy out the kept pixels of each row, closing up the gap.  The
    /// result is one column narrower.
    pub fn apply(&self, image: &PixelGrid) -> Result<PixelGrid> {
        let (width, height) = self.keep.dimensions();
        if image.dimensions() != (width, height) {
            return Err(Error::SizeMismatch {
                expected: width as usize * height as usize,
                actual: image.as_slice().len(),
            });
        }
        let pixels = izip!(image.rows(), self.keep.rows())
            .flat_map(|(row, keep)| {
                izip!(row, keep)
                    .filter(|(_, keep)| **keep)
                    .map(|(pixel, _)| *pixel)
            })
            .collect();
        TwoDimensionalMap::from_vec(width - 1, height, pixels)
    }
}

fn check_shape(image: &PixelGrid) -> Result<()> {
    if image.is_empty() {
        let (width, height) = image.dimensions();
        return Err(Error::InvalidShape { width, height });
    }
    Ok(())
}

/// Cut one pixel out of every row, at the x coordinate the seam names
/// for that row.
pub fn remove_seam(image: &PixelGrid, seam: &[u32]) -> Result<PixelGrid> {
    check_shape(image)?;
    let (width, height) = image.dimensions();
    RemovalMask::from_seam(width, height, seam)?.apply(image)
}

// It isn't necessary at this point to be generic over the seam finder,
// but it leaves room for energy functions other than Sobel.

/// Shrinks images by removing seams picked by a `SeamFinder`.
#[derive(Debug, Default, Clone)]
pub struct SeamCarver<F = SobelSeams> {
    finder: F,
}

impl SeamCarver<SobelSeams> {
    /// A carver using Sobel energy.
    pub fn new() -> Self {
        SeamCarver {
            finder: SobelSeams,
        }
    }
}

impl<F: SeamFinder> SeamCarver<F> {
    pub fn with_finder(finder: F) -> Self {
        SeamCarver { finder }
    }

    fn carve_once(&self, image: &PixelGrid) -> Result<PixelGrid> {
        let seam = self.finder.find_vertical_seam(image)?;
        remove_seam(image, &seam)
    }

    // This is absurdly inefficient, as the entire energy map and
    // energy seam digraph is recalculated every time.  It should be
    // possible to find the span of columns affected by the carve and
    // recalculate only those.

    /// Remove vertical seams until the image is `target` pixels wide.
    /// The caller's image is never touched; a failure part way through
    /// simply discards the scratch copy.
    pub fn carve_columns(&self, image: &PixelGrid, target: u32) -> Result<PixelGrid> {
        check_shape(image)?;
        let (width, height) = image.dimensions();
        if target == 0 || target > width {
            return Err(Error::InvalidTarget {
                target,
                original: width,
            });
        }

        debug!(width, height, target, "carving columns");
        let mut scratch = image.clone();
        while scratch.width() > target {
            scratch = self.carve_once(&scratch)?;
            trace!(width = scratch.width(), height, "removed seam");
        }
        debug!(seams = width - target, "carving complete");
        Ok(scratch)
    }

    /// Remove horizontal seams until the image is `target` pixels tall.
    pub fn carve_rows(&self, image: &PixelGrid, target: u32) -> Result<PixelGrid> {
        // Checked here so a bad shape is reported the right way up.
        check_shape(image)?;
        let (_, height) = image.dimensions();
        if target == 0 || target > height {
            return Err(Error::InvalidTarget {
                target,
                original: height,
            });
        }
        self.carve_columns(&image.transpose(), target)
            .map(|carved| carved.transpose())
    }

    /// Shrink the image along one axis to `floor(scale * size)`.
    pub fn carve(&self, image: &PixelGrid, options: &CarveOptions) -> Result<PixelGrid> {
        check_shape(image)?;
        let (width, height) = image.dimensions();
        match options.axis() {
            Axis::Columns => self.carve_columns(image, target_for_scale(width, options.scale())?),
            Axis::Rows => self.carve_rows(image, target_for_scale(height, options.scale())?),
        }
    }
}

/// Carve an image with Sobel energy.
pub fn seamcarve(image: &PixelGrid, options: &CarveOptions) -> Result<PixelGrid> {
    SeamCarver::new().carve(image, options)
}
