// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given an image, calculate the energy map: for every pixel, the sum
//! over the red, green and blue channels of the absolute responses of
//! two Sobel kernels, one for horizontal edges and one for vertical
//! edges.  That is six absolute terms per pixel, so energies are never
//! negative.
//!
//! Pixels beyond the border are read from the nearest edge pixel.  For
//! a 3x3 kernel that is the same as mirroring the image about its
//! edge, and it works on images as small as a single pixel.

use crate::error::{Error, Result};
use crate::twodmap::{EnergyGrid, PixelGrid, TwoDimensionalMap};
use image::{GrayImage, ImageBuffer, Luma};
#[cfg(not(feature = "threaded"))]
use itertools::iproduct;

// Responds to horizontal edges (changes going down the image).
const FILTER_DU: [[f64; 3]; 3] = [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]];

// Responds to vertical edges (changes going across the image).
const FILTER_DV: [[f64; 3]; 3] = [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]];

// (Image, x, y) -> Energy
//
// The summation order is fixed, so the sequential and threaded
// passes agree to the bit.
fn energy_at(pixels: &PixelGrid, x: u32, y: u32) -> f64 {
    let (mw, mh) = (pixels.width() - 1, pixels.height() - 1);
    let xs = [cq!(x == 0, 0, x - 1), x, cq!(x >= mw, mw, x + 1)];
    let ys = [cq!(y == 0, 0, y - 1), y, cq!(y >= mh, mh, y + 1)];

    (0..3)
        .map(|channel| {
            let (mut du, mut dv) = (0.0, 0.0);
            for (ky, &sy) in ys.iter().enumerate() {
                for (kx, &sx) in xs.iter().enumerate() {
                    let sample = f64::from(pixels[(sx, sy)][channel]);
                    du += FILTER_DU[ky][kx] * sample;
                    dv += FILTER_DV[ky][kx] * sample;
                }
            }
            du.abs() + dv.abs()
        })
        .sum()
}

/// Compute the energy of every pixel in an image.
pub fn calculate_energy(pixels: &PixelGrid) -> Result<EnergyGrid> {
    if pixels.is_empty() {
        let (width, height) = pixels.dimensions();
        return Err(Error::InvalidShape { width, height });
    }
    fill_energy(pixels)
}

#[cfg(not(feature = "threaded"))]
fn fill_energy(pixels: &PixelGrid) -> Result<EnergyGrid> {
    let (width, height) = pixels.dimensions();
    let energy = iproduct!(0..height, 0..width)
        .map(|(y, x)| energy_at(pixels, x, y))
        .collect();
    TwoDimensionalMap::from_vec(width, height, energy)
}

// The trick here is to divvy up the height into bands, breaking the
// target into chunks_mut and handing each band to its own thread.
// Every cell depends only on the (read-only) pixels, so the bands
// never need to talk to one another.
#[cfg(feature = "threaded")]
fn fill_energy(pixels: &PixelGrid) -> Result<EnergyGrid> {
    let (width, height) = pixels.dimensions();
    let mut energy: EnergyGrid = TwoDimensionalMap::new(width, height);
    let threads = num_cpus::get().max(1);
    let band_rows = (height as usize + threads - 1) / threads;
    let band_len = band_rows * width as usize;

    crossbeam::scope(|scope| {
        for (band, cells) in energy.as_mut_slice().chunks_mut(band_len).enumerate() {
            scope.spawn(move |_| {
                let first = band * band_len;
                for (offset, cell) in cells.iter_mut().enumerate() {
                    let index = first + offset;
                    let (x, y) = (index % width as usize, index / width as usize);
                    *cell = energy_at(pixels, x as u32, y as u32);
                }
            });
        }
    })
    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
    Ok(energy)
}

/// Render an energy map as a grayscale image, scaled so that the
/// highest energy is white.  A map with no energy at all is black.
pub fn energy_to_image(energy: &EnergyGrid) -> GrayImage {
    let factor = energy.as_slice().iter().cloned().fold(0.0, f64::max);
    let (width, height) = energy.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let scaled = cq!(factor > 0.0, energy[(x, y)] * 255.0 / factor, 0.0);
        Luma([num_traits::cast(scaled.round()).unwrap_or(u8::MAX)])
    })
}
