// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cumulative cost matrix
//!
//! For every pixel, the cheapest total energy of any seam that starts
//! on the left edge and ends at that pixel.  The left column is just
//! the energy; every column after it is built from the one before:
//!
//! ```text
//!                     ⎧ M(x−1,y−1)
//! M(x,y) = e(x,y) + min⎨ M(x−1,y)
//!                     ⎩ M(x−1,y+1)
//! ```
//!
//! Neighbours off the top or bottom edge are [`UNREACHABLE`].  Columns
//! must be built strictly left to right, but within a column no cell
//! depends on any other, so with the `threaded` feature each column is
//! chopped into runs of rows and handed to worker threads.

use crate::cq;
use crate::energy::EnergyField;
use crate::errors::CarveError;
use crate::twodmap::TwoDimensionalMap;

/// Cumulative seam costs, addressed `(x, y)`.
pub type CostMatrix = TwoDimensionalMap<f64>;

/// Stands in for a neighbour that doesn't exist.  Larger than any
/// achievable sum, but finite, so comparisons never meet an infinity.
pub const UNREACHABLE: f64 = std::f64::MAX;

// The cheapest way into row `y` of a column, given the column before.
#[inline]
fn cheapest_predecessor(previous: &[f64], y: usize) -> f64 {
    let up = cq!(y == 0, UNREACHABLE, previous[y - 1]);
    let left = previous[y];
    let down = cq!(y + 1 >= previous.len(), UNREACHABLE, previous[y + 1]);
    left.min(up).min(down)
}

// Fill rows `offset..offset + current.len()` of one column.
fn fill_rows(previous: &[f64], energy: &[f64], current: &mut [f64], offset: usize) {
    for (i, cell) in current.iter_mut().enumerate() {
        let y = offset + i;
        *cell = energy[y] + cheapest_predecessor(previous, y);
    }
}

#[cfg(not(feature = "threaded"))]
fn fill_column(previous: &[f64], energy: &[f64], current: &mut [f64]) {
    fill_rows(previous, energy, current, 0);
}

// Each worker gets a contiguous run of rows, all reading the same
// finished column to the left.  Short columns aren't worth a thread.
#[cfg(feature = "threaded")]
fn fill_column(previous: &[f64], energy: &[f64], current: &mut [f64]) {
    const MIN_ROWS_PER_WORKER: usize = 256;

    let workers = num_cpus::get().max(1);
    let chunk = std::cmp::max((current.len() + workers - 1) / workers, MIN_ROWS_PER_WORKER);
    if chunk >= current.len() {
        return fill_rows(previous, energy, current, 0);
    }

    let scoped = crossbeam::scope(|scope| {
        for (i, rows) in current.chunks_mut(chunk).enumerate() {
            scope.spawn(move |_| fill_rows(previous, energy, rows, i * chunk));
        }
    });
    // A worker can only panic on an out-of-bounds index; let the
    // panic carry on up.
    if let Err(panic) = scoped {
        std::panic::resume_unwind(panic);
    }
}

/// Build the cost matrix for an energy field.  Fails only if the field
/// has no pixels.
pub fn calculate_cost(energy: &EnergyField) -> Result<CostMatrix, CarveError> {
    if energy.is_empty() {
        return Err(CarveError::EmptyInput);
    }
    let (width, height) = energy.dimensions();
    let mut costs = CostMatrix::new(width, height);

    // The left edge is seeded directly from the energy.
    for y in 0..height {
        costs[(0, y)] = energy[(0, y)];
    }

    for x in 1..width {
        let (previous, current) = costs.column_pair_mut(x);
        fill_column(previous, energy.column(x), current);
    }
    Ok(costs)
}
