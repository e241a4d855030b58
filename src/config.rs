// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving parameters
//!
//! The carver has exactly two knobs: which axis to shrink, and what
//! fraction of that axis to keep.  The kernel weights are constants.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Which dimension of the image loses pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// Remove vertical seams, making the image narrower.
    Columns,
    /// Remove horizontal seams, making the image shorter.
    Rows,
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "columns" | "cols" | "width" => Ok(Axis::Columns),
            "rows" | "height" => Ok(Axis::Rows),
            _ => Err(format!("unknown axis '{}': expected columns or rows", s)),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Axis::Columns => "columns",
            Axis::Rows => "rows",
        })
    }
}

/// A validated pair of axis and relative scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CarveOptions {
    axis: Axis,
    scale: f64,
}

impl CarveOptions {
    pub fn new(axis: Axis, scale: f64) -> Result<Self> {
        check_scale(scale)?;
        Ok(CarveOptions { axis, scale })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for CarveOptions {
    fn default() -> Self {
        CarveOptions {
            axis: Axis::Columns,
            scale: 0.9,
        }
    }
}

// The negated comparison also turns away NaN.
fn check_scale(scale: f64) -> Result<()> {
    if !(scale > 0.0 && scale <= 1.0) {
        return Err(Error::InvalidScale(scale));
    }
    Ok(())
}

/// How many rows or columns survive when `original` of them are scaled
/// by `scale`.  Fractions are dropped, and a result of zero is an error
/// rather than an empty image.
pub fn target_for_scale(original: u32, scale: f64) -> Result<u32> {
    check_scale(scale)?;
    let target = (scale * f64::from(original)).floor() as u32;
    if target == 0 {
        return Err(Error::InvalidTarget { target, original });
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_parses_and_prints() {
        assert_eq!("columns".parse::<Axis>(), Ok(Axis::Columns));
        assert_eq!("Rows".parse::<Axis>(), Ok(Axis::Rows));
        assert!("diagonal".parse::<Axis>().is_err());
        assert_eq!(Axis::Rows.to_string(), "rows");
    }

    #[test]
    fn scale_must_be_in_the_half_open_unit_interval() {
        assert!(CarveOptions::new(Axis::Columns, 1.0).is_ok());
        assert!(CarveOptions::new(Axis::Rows, 0.01).is_ok());
        assert_eq!(
            CarveOptions::new(Axis::Columns, 0.0),
            Err(Error::InvalidScale(0.0))
        );
        assert_eq!(
            CarveOptions::new(Axis::Columns, 1.5),
            Err(Error::InvalidScale(1.5))
        );
        assert!(CarveOptions::new(Axis::Columns, std::f64::NAN).is_err());
        assert!(CarveOptions::new(Axis::Columns, -0.5).is_err());
    }

    #[test]
    fn targets_are_floored() {
        assert_eq!(target_for_scale(5, 0.8), Ok(4));
        assert_eq!(target_for_scale(10, 0.9), Ok(9));
        assert_eq!(target_for_scale(7, 0.5), Ok(3));
        assert_eq!(target_for_scale(7, 1.0), Ok(7));
    }

    #[test]
    fn a_target_of_nothing_is_refused() {
        assert_eq!(
            target_for_scale(5, 0.1),
            Err(Error::InvalidTarget {
                target: 0,
                original: 5
            })
        );
    }

    #[test]
    fn defaults_keep_most_of_the_width() {
        let options = CarveOptions::default();
        assert_eq!(options.axis(), Axis::Columns);
        assert_eq!(options.scale(), 0.9);
    }
}
