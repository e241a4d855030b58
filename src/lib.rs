// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing by seam carving.
//!
//! An image shrinks one pixel at a time along an axis by repeatedly
//! removing the connected path of least visual importance.
//!
//! ```no_run
//! use seamcarve::{seamcarve, Axis, CarveOptions, PixelGrid};
//!
//! let image = image::open("tower.png").unwrap().to_rgb8();
//! let options = CarveOptions::new(Axis::Columns, 0.75).unwrap();
//! let carved = seamcarve(&PixelGrid::from_image(&image), &options).unwrap();
//! carved.into_image().save("tower-narrow.png").unwrap();
//! ```

/// My ternary expression handler.  Rust's ifs are already
/// expressions, but `cargo fmt` spreads them over five lines, and the
/// edge-clamping tables of the kernel and the seam search read much
/// better one per line.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

pub mod config;
pub mod energy;
pub mod error;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use config::{target_for_scale, Axis, CarveOptions};
pub use energy::{calculate_energy, energy_to_image};
pub use error::{Error, Result};
pub use seamcarver::{remove_seam, seamcarve, RemovalMask, SeamCarver};
pub use seamfinder::{cumulative_costs, find_seam, seam_from_costs, Seam, SeamFinder, SobelSeams};
pub use twodmap::{EnergyGrid, PixelGrid, TwoDimensionalMap};
