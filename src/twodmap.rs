// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Two-dimensional maps
//!
//! Every intermediate product of the carver (pixels, energies,
//! cumulative costs, removal masks) is a dense, row-major field of
//! `width * height` cells.  This module holds that one layout, plus
//! the conversions between the pixel field and the `image` crate.

use crate::error::{Error, Result};
use image::{ImageBuffer, Rgb, RgbImage};
use std::ops::{Index, IndexMut};

/// Defines the basic two-dimensional map: an addressable field
/// containing one of several possible objects during processing: an
/// RGB triple for the image, an `f64` for the energy map, a cost and
/// parent pair for the seam digraph, or a keep flag for the removal
/// mask.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P> {
    width: u32,
    height: u32,
    data: Vec<P>,
}

/// An image as a field of 8-bit RGB samples.
pub type PixelGrid = TwoDimensionalMap<[u8; 3]>;

/// The per-pixel importance of an image.
pub type EnergyGrid = TwoDimensionalMap<f64>;

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map filled with the content type's default.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }
}

impl<P> TwoDimensionalMap<P> {
    /// Wrap an existing row-major buffer.  The buffer must hold exactly
    /// `width * height` cells.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    /// Build a map by calling `f(x, y)` for every cell, row by row.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        TwoDimensionalMap {
            width,
            height,
            data,
        }
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  This
    // particular variant is the same one used in image.rs.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height), in the same order as `image::GenericImageView`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// A single row, as a contiguous slice.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[P]> {
        // chunks() refuses a zero chunk size; a zero-width map has no
        // cells to hand out anyway.
        self.data.chunks(self.width.max(1) as usize)
    }

    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.data
    }
}

impl<P: Copy> TwoDimensionalMap<P> {
    /// Swap the axes: the cell at `(x, y)` moves to `(y, x)`.  Whatever
    /// the cell holds (all three channels of a pixel, say) travels with
    /// it unchanged.
    pub fn transpose(&self) -> Self {
        TwoDimensionalMap::from_fn(self.height, self.width, |x, y| self[(y, x)])
    }
}

impl<P> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

impl PixelGrid {
    /// Copy an 8-bit RGB image into a pixel grid.
    pub fn from_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        TwoDimensionalMap::from_fn(width, height, |x, y| image.get_pixel(x, y).0)
    }

    /// Turn the grid back into something the `image` crate can encode.
    pub fn into_image(self) -> RgbImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| Rgb(self[(x, y)]))
    }
}
