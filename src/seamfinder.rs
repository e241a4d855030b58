// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through an energy map
//!
//! A seam runs from the top row to the bottom row, one pixel per row,
//! moving at most one column left or right at each step.  The search
//! is the usual dynamic program: each cell's cumulative cost is its
//! own energy plus the cheapest of the (up to) three cells above it,
//! and each cell remembers which of those it came from so the seam can
//! be walked back up from the cheapest cell in the bottom row.

use crate::energy::calculate_energy;
use crate::error::{Error, Result};
use crate::twodmap::{EnergyGrid, PixelGrid, TwoDimensionalMap};

/// One x coordinate per row, top to bottom.
pub type Seam = Vec<u32>;

/// A cell of the seam digraph: the cheapest cumulative energy of any
/// seam ending here, and the column in the row above it came from.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct EnergyAndBackPointer {
    pub energy: f64,
    pub parent: u32,
}

/// The cumulative cost map together with its backtrack table.
pub type CostMap = TwoDimensionalMap<EnergyAndBackPointer>;

/// This trait defines how we will get seams out of an image.  It's a
/// primitive interface, just enough to make room for other energy
/// functions than the Sobel one.
pub trait SeamFinder {
    /// Request a top-to-bottom seam: one x coordinate per row.
    fn find_vertical_seam(&self, image: &PixelGrid) -> Result<Seam>;

    /// Request a left-to-right seam: one y coordinate per column.
    /// Rather than write the whole thing again sideways, look at the
    /// image turned on its side.
    fn find_horizontal_seam(&self, image: &PixelGrid) -> Result<Seam> {
        self.find_vertical_seam(&image.transpose())
    }
}

/// The basic seam engine: Sobel energy, then the dynamic program.
#[derive(Debug, Default, Copy, Clone)]
pub struct SobelSeams;

impl SeamFinder for SobelSeams {
    fn find_vertical_seam(&self, image: &PixelGrid) -> Result<Seam> {
        find_seam(&calculate_energy(image)?)
    }
}

/// Return the candidate with the smallest cost.  When several
/// candidates tie, the first one offered wins; offering candidates
/// left to right therefore prefers the lowest column.  Seams are only
/// reproducible if this rule never changes.
pub fn first_minimum<I, F>(candidates: I, cost: F) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
    F: Fn(u32) -> f64,
{
    candidates
        .into_iter()
        .fold(None, |best: Option<(u32, f64)>, candidate| {
            let energy = cost(candidate);
            match best {
                Some((_, least)) if least <= energy => best,
                _ => Some((candidate, energy)),
            }
        })
        .map(|(candidate, _)| candidate)
}

/// Run the forward pass of the dynamic program over an energy map.
pub fn cumulative_costs(energy: &EnergyGrid) -> Result<CostMap> {
    let (width, height) = energy.dimensions();
    if energy.is_empty() {
        return Err(Error::InvalidShape { width, height });
    }
    let mut target: CostMap = TwoDimensionalMap::new(width, height);

    // Populate the first row with their native energies.
    for x in 0..width {
        target[(x, 0)] = EnergyAndBackPointer {
            energy: energy[(x, 0)],
            parent: x,
        };
    }

    let maxwidth = width - 1;
    // For every subsequent row, populate the target cell with the sum
    // of the *lowest adjacent upper energy* and the *x coordinate of
    // that energy*
    for y in 1..height {
        for x in 0..width {
            let range = cq!(x == 0, 0, x - 1)..=cq!(x == maxwidth, maxwidth, x + 1);
            let parent_x = first_minimum(range, |px| target[(px, y - 1)].energy).unwrap_or(x);
            target[(x, y)] = EnergyAndBackPointer {
                energy: energy[(x, y)] + target[(parent_x, y - 1)].energy,
                parent: parent_x,
            };
        }
    }
    Ok(target)
}

/// Walk the backtrack table up from the cheapest cell in the bottom
/// row, returning the x coordinate of the seam in every row.
pub fn seam_from_costs(costs: &CostMap) -> Result<Seam> {
    let (width, height) = costs.dimensions();
    let bottom = height.checked_sub(1).map(|y| costs.row(y));
    let mut seam_col = bottom
        .and_then(|row| first_minimum(0..width, |x| row[x as usize].energy))
        .ok_or(Error::InvalidShape { width, height })?;

    // Working backwards, generate a vec of x coordinates that that map to
    // the seam, reverse and return.
    let mut seam: Seam = (0..height)
        .rev()
        .map(|y| {
            let here = seam_col;
            seam_col = costs[(here, y)].parent;
            here
        })
        .collect();
    seam.reverse();
    Ok(seam)
}

/// Given an energy map, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the seam to be removed.
pub fn find_seam(energy: &EnergyGrid) -> Result<Seam> {
    seam_from_costs(&cumulative_costs(energy)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENERGY_DATA: [f64; 20] = [
        9.0, 9.0, 0.0, 9.0, 9.0, 9.0, 1.0, 9.0, 8.0, 9.0, 9.0, 9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0,
        0.0, 9.0,
    ];

    fn energies() -> EnergyGrid {
        TwoDimensionalMap::from_vec(5, 4, ENERGY_DATA.to_vec()).unwrap()
    }

    // A deterministic but irregular field, so the properties below get
    // exercised on something other than hand-picked values.
    fn scrambled(width: u32, height: u32) -> EnergyGrid {
        let mut state: u32 = 0x2545_f491;
        TwoDimensionalMap::from_fn(width, height, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            f64::from(state % 1000)
        })
    }

    #[test]
    fn energy_grid_to_vertical_seam() {
        assert_eq!(find_seam(&energies()).unwrap(), vec![2, 3, 4, 3]);
    }

    #[test]
    fn energy_grid_to_horizontal_seam() {
        assert_eq!(find_seam(&energies().transpose()).unwrap(), vec![0, 1, 0, 1, 2]);
    }

    #[test]
    fn first_row_of_costs_is_the_energy() {
        let energy = energies();
        let costs = cumulative_costs(&energy).unwrap();
        for x in 0..5 {
            assert_eq!(costs[(x, 0)].energy, energy[(x, 0)]);
        }
        let last: Vec<f64> = costs.row(3).iter().map(|c| c.energy).collect();
        assert_eq!(last, vec![19.0, 19.0, 19.0, 8.0, 17.0]);
    }

    #[test]
    fn ties_go_to_the_leftmost_candidate() {
        assert_eq!(first_minimum(vec![4, 5, 6], |_| 1.0), Some(4));
        assert_eq!(first_minimum(vec![0, 1, 2], |c| [3.0, 1.0, 1.0][c as usize]), Some(1));
        assert_eq!(first_minimum(Vec::new(), |_| 0.0), None);

        // Both outer parents of the middle cell cost nothing.
        let energy = TwoDimensionalMap::from_vec(3, 2, vec![0.0, 5.0, 0.0, 9.0, 0.0, 9.0]).unwrap();
        let costs = cumulative_costs(&energy).unwrap();
        assert_eq!(costs[(1, 1)].parent, 0);
        assert_eq!(find_seam(&energy).unwrap(), vec![0, 1]);
    }

    #[test]
    fn flat_energy_picks_the_leftmost_seam() {
        let energy: EnergyGrid = TwoDimensionalMap::new(4, 3);
        assert_eq!(find_seam(&energy).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn costs_never_fall_below_local_energy() {
        let energy = scrambled(9, 7);
        let costs = cumulative_costs(&energy).unwrap();
        for y in 0..7 {
            for x in 0..9 {
                assert!(costs[(x, y)].energy >= energy[(x, y)]);
            }
        }
    }

    #[test]
    fn seams_are_connected_and_in_bounds() {
        let energy = scrambled(11, 8);
        let seam = find_seam(&energy).unwrap();
        assert_eq!(seam.len(), 8);
        assert!(seam.iter().all(|x| *x < 11));
        assert!(seam.windows(2).all(|w| (w[0] as i64 - w[1] as i64).abs() <= 1));
        assert_eq!(find_seam(&energy).unwrap(), seam);
    }

    #[test]
    fn seam_cost_is_the_bottom_minimum() {
        let energy = scrambled(6, 6);
        let costs = cumulative_costs(&energy).unwrap();
        let seam = seam_from_costs(&costs).unwrap();
        let total: f64 = seam
            .iter()
            .enumerate()
            .map(|(y, x)| energy[(*x, y as u32)])
            .sum();
        let least = costs.row(5).iter().map(|c| c.energy).fold(f64::INFINITY, f64::min);
        assert_eq!(total, least);
    }

    #[test]
    fn single_column_and_single_row() {
        let column = TwoDimensionalMap::from_vec(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(find_seam(&column).unwrap(), vec![0, 0, 0]);
        let row = TwoDimensionalMap::from_vec(3, 1, vec![2.0, 1.0, 1.0]).unwrap();
        assert_eq!(find_seam(&row).unwrap(), vec![1]);
    }

    #[test]
    fn empty_maps_are_rejected() {
        let energy: EnergyGrid = TwoDimensionalMap::new(3, 0);
        assert_eq!(
            find_seam(&energy),
            Err(Error::InvalidShape {
                width: 3,
                height: 0
            })
        );
    }

    #[test]
    fn sobel_finder_goes_around_a_bright_pixel() {
        let mut image = PixelGrid::from_fn(4, 4, |_, _| [50, 50, 50]);
        image[(2, 2)] = [250, 250, 250];
        let seam = SobelSeams.find_vertical_seam(&image).unwrap();
        assert_ne!(seam[2], 2);
        assert_eq!(seam, vec![0, 0, 0, 0]);
    }

    #[test]
    fn horizontal_seams_come_from_the_transpose() {
        let image = PixelGrid::from_fn(5, 3, |x, y| [(x * 40) as u8, (y * 60) as u8, 0]);
        let horizontal = SobelSeams.find_horizontal_seam(&image).unwrap();
        assert_eq!(horizontal.len(), 5);
        assert!(horizontal.iter().all(|y| *y < 3));
        assert_eq!(
            horizontal,
            SobelSeams.find_vertical_seam(&image.transpose()).unwrap()
        );
    }
}
