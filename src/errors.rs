// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The ways a carve can go wrong.
//!
//! None of these are retryable: the carver is deterministic, so the
//! same input will fail the same way.  The pipeline functions return
//! `failure::Error` so a failing energy function comes back to the
//! caller exactly as it was raised; use `downcast_ref::<CarveError>()`
//! to tell the carver's own failures apart.

use failure::Fail;
use std::fmt;

/// Which dimension of the image a reduction applies to.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Dimension {
    Width,
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
        })
    }
}

#[derive(Debug, Fail, PartialEq)]
pub enum CarveError {
    /// More seams were requested than the dimension has pixels.
    #[fail(
        display = "cannot reduce {} of {} pixels by {} pixels",
        dimension, available, requested
    )]
    InvalidReductionAmount {
        dimension: Dimension,
        requested: u32,
        available: u32,
    },

    /// A seam or energy field doesn't fit the image it was applied to.
    #[fail(display = "dimension mismatch: {}", _0)]
    DimensionMismatch(String),

    #[fail(display = "image has no pixels to carve")]
    EmptyInput,

    /// The energy function produced something other than a finite,
    /// non-negative number.
    #[fail(
        display = "energy at ({}, {}) is {}, not a finite non-negative value",
        x, y, value
    )]
    InvalidEnergy { x: u32, y: u32, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_amounts() {
        let err = CarveError::InvalidReductionAmount {
            dimension: Dimension::Height,
            requested: 12,
            available: 10,
        };
        assert_eq!(
            err.to_string(),
            "cannot reduce height of 10 pixels by 12 pixels"
        );
        assert_eq!(
            CarveError::EmptyInput.to_string(),
            "image has no pixels to carve"
        );
    }
}
