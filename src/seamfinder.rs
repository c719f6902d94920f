// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Backtracking the cost matrix into a seam.
//!
//! The cheapest seam ends at the cheapest cell of the right-hand
//! column.  From there we walk back to the left edge, each step moving
//! to whichever of the three neighbouring cells in the previous column
//! is cheapest.
//!
//! Ties are broken deterministically, and the choice is observable:
//! at the right edge the topmost minimum wins, and while walking back
//! we prefer moving up, then staying level, then moving down.

use crate::costmatrix::CostMatrix;
use crate::cq;
use crate::energy::EnergyField;
use crate::errors::CarveError;
use itertools::Itertools;

/// An address in the image.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Point { x, y }
    }
}

/// One point per column, left to right; `seam[x].x == x`.
pub type Seam = Vec<Point>;

#[derive(Debug, PartialEq, Copy, Clone)]
enum Step {
    Up,
    Level,
    Down,
}

// Given the previous column and our current row, which way did the
// cheapest path come in?  The order of these comparisons is the
// tie-break.  Rows off the edge are never candidates, whatever the
// costs beside them hold (infinities and NaNs included).
fn step_back(previous: &[f64], y: usize) -> Step {
    let left = previous[y];
    let up = cq!(y == 0, None, Some(previous[y - 1]));
    let down = cq!(y + 1 >= previous.len(), None, Some(previous[y + 1]));
    let no_worse = |cost: f64, other: Option<f64>| other.map_or(true, |o| cost <= o);

    match (up, down) {
        (Some(u), _) if u <= left && no_worse(u, down) => Step::Up,
        (_, Some(d)) if !(left <= d && no_worse(left, up)) => Step::Down,
        _ => Step::Level,
    }
}

/// Find the lowest-cost left-to-right seam in a cost matrix.
pub fn find_seam(costs: &CostMatrix) -> Result<Seam, CarveError> {
    if costs.is_empty() {
        return Err(CarveError::EmptyInput);
    }
    let width = costs.width();

    // position_min_by reports the first of several equal minima.
    let mut seam_row = costs
        .column(width - 1)
        .iter()
        .position_min_by(|a, b| a.total_cmp(b))
        .ok_or(CarveError::EmptyInput)?;

    let mut seam = vec![Point::default(); width as usize];
    seam[width as usize - 1] = Point::new(width - 1, seam_row as u32);

    // Working backwards, fill in the row for each earlier column.
    for x in (0..width - 1).rev() {
        seam_row = match step_back(costs.column(x), seam_row) {
            Step::Up => seam_row - 1,
            Step::Level => seam_row,
            Step::Down => seam_row + 1,
        };
        seam[x as usize] = Point::new(x, seam_row as u32);
    }
    Ok(seam)
}

/// The total energy of the pixels along a seam.
pub fn seam_cost(energy: &EnergyField, seam: &[Point]) -> f64 {
    seam.iter().map(|p| energy[(p.x, p.y)]).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costmatrix::calculate_cost;
    use crate::twodmap::TwoDimensionalMap;

    fn field(columns: &[Vec<f64>]) -> EnergyField {
        TwoDimensionalMap::from_columns(columns).unwrap()
    }

    fn points(rows: &[u32]) -> Seam {
        rows.iter()
            .enumerate()
            .map(|(x, y)| Point::new(x as u32, *y))
            .collect()
    }

    #[test]
    fn uniform_field_takes_the_top_row() {
        let energy = field(&[vec![1.0; 3], vec![1.0; 3], vec![1.0; 3]]);
        let seam = find_seam(&calculate_cost(&energy).unwrap()).unwrap();
        assert_eq!(seam, points(&[0, 0, 0]));
    }

    #[test]
    fn seam_zigzags_through_the_valley() {
        let energy = field(&[
            vec![1.0, 9.0, 1.0],
            vec![9.0, 1.0, 9.0],
            vec![1.0, 9.0, 1.0],
        ]);
        let seam = find_seam(&calculate_cost(&energy).unwrap()).unwrap();
        // Rows 0 and 2 tie at both ends; the top one wins at the right
        // edge and "up" wins on the way back.
        assert_eq!(seam, points(&[0, 1, 0]));
        assert_eq!(seam_cost(&energy, &seam), 3.0);
    }

    #[test]
    fn backtracking_prefers_up_then_level() {
        let energy = field(&[
            vec![1.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
            vec![5.0, 0.0, 5.0],
        ]);
        let seam = find_seam(&calculate_cost(&energy).unwrap()).unwrap();
        assert_eq!(seam, points(&[0, 0, 1]));
    }

    #[test]
    fn backtracking_moves_down_only_when_cheaper() {
        let costs = field(&[vec![5.0, 5.0, 1.0], vec![9.0, 2.0, 9.0]]);
        assert_eq!(find_seam(&costs).unwrap(), points(&[2, 1]));
        let costs = field(&[vec![5.0, 1.0, 1.0], vec![9.0, 2.0, 9.0]]);
        assert_eq!(find_seam(&costs).unwrap(), points(&[1, 1]));
    }

    #[test]
    fn rightmost_minimum_is_the_first_one() {
        let costs = field(&[vec![0.0, 0.0, 0.0, 0.0], vec![4.0, 2.0, 3.0, 2.0]]);
        assert_eq!(find_seam(&costs).unwrap()[1], Point::new(1, 1));
    }

    #[test]
    fn single_row_seam_is_straight() {
        let energy = field(&[vec![4.0], vec![5.0], vec![6.0]]);
        let seam = find_seam(&calculate_cost(&energy).unwrap()).unwrap();
        assert_eq!(seam, points(&[0, 0, 0]));
    }

    #[test]
    fn seams_are_connected() {
        let columns: Vec<Vec<f64>> = (0..9u32)
            .map(|x| (0..7u32).map(|y| ((x * 7 + y * 3) % 5) as f64).collect())
            .collect();
        let seam = find_seam(&calculate_cost(&field(&columns)).unwrap()).unwrap();
        assert_eq!(seam.len(), 9);
        for (x, pair) in seam.windows(2).enumerate() {
            assert_eq!(pair[0].x, x as u32);
            assert_eq!(pair[1].x, pair[0].x + 1);
            assert!((pair[0].y as i64 - pair[1].y as i64).abs() <= 1);
            assert!(pair[1].y < 7);
        }
    }

    fn assert_connected(seam: &[Point], height: u32) {
        for (x, p) in seam.iter().enumerate() {
            assert_eq!(p.x, x as u32);
            assert!(p.y < height);
        }
        for pair in seam.windows(2) {
            assert!((pair[0].y as i64 - pair[1].y as i64).abs() <= 1);
        }
    }

    #[test]
    fn overflowing_costs_stay_inside_the_matrix() {
        // Finite energies whose running sums overflow to infinity.
        let energy = field(&[vec![1e308, 1e308], vec![1e308, 1e308], vec![1e308, 1e308]]);
        let seam = find_seam(&calculate_cost(&energy).unwrap()).unwrap();
        assert_eq!(seam, points(&[0, 0, 0]));
    }

    #[test]
    fn infinite_costs_stay_inside_the_matrix() {
        let inf = std::f64::INFINITY;
        let costs = field(&[vec![inf, inf], vec![0.0, 0.0]]);
        assert_eq!(find_seam(&costs).unwrap(), points(&[0, 0]));
        let costs = field(&[vec![inf, inf, inf], vec![inf, inf, inf], vec![9.0, 9.0, 0.0]]);
        assert_connected(&find_seam(&costs).unwrap(), 3);
    }

    #[test]
    fn nan_costs_stay_inside_the_matrix() {
        let nan = std::f64::NAN;
        let costs = field(&[vec![nan, nan, nan], vec![0.0, 5.0, 5.0]]);
        assert_connected(&find_seam(&costs).unwrap(), 3);
        let costs = field(&[vec![nan, nan, nan], vec![5.0, 5.0, 0.0]]);
        assert_connected(&find_seam(&costs).unwrap(), 3);
    }

    #[test]
    fn empty_matrix_has_no_seam() {
        assert_eq!(find_seam(&CostMatrix::new(0, 3)), Err(CarveError::EmptyInput));
    }
}
