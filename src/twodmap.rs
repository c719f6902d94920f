// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A flat, addressable two-dimensional field.
//!
//! Both the energy field and the cumulative cost matrix are plain
//! rectangles of scalars.  They're stored column-major: the carver
//! walks the image left to right, one column at a time, and each
//! column only ever reads the one before it.  Keeping a column
//! contiguous means a column can be handed out as a slice (or split
//! into `chunks_mut` for the threaded build) without any index
//! gymnastics.

use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field of `P`, indexed by `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: u32,
    height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map, every cell holding `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Build a map from a list of columns, left to right, each listed
    /// top to bottom.  Returns `None` if the columns are ragged.
    pub fn from_columns(columns: &[Vec<P>]) -> Option<Self> {
        let height = columns.first().map_or(0, |c| c.len());
        if columns.iter().any(|c| c.len() != height) {
            return None;
        }
        Some(TwoDimensionalMap {
            width: columns.len() as u32,
            height: height as u32,
            data: columns.iter().flatten().copied().collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True if the map has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (x as usize) * (self.height as usize) + (y as usize)
    }

    /// Get the value at a single address
    pub fn get_pt(&self, x: u32, y: u32) -> P {
        self.data[self.get_index(x, y)]
    }

    /// Set a value at a single address
    pub fn put_pt(&mut self, x: u32, y: u32, e: P) {
        let index = self.get_index(x, y);
        self.data[index] = e;
    }

    /// One whole column, top to bottom.
    pub fn column(&self, x: u32) -> &[P] {
        let start = self.get_index(x, 0);
        &self.data[start..start + self.height as usize]
    }

    /// Column `x - 1` for reading and column `x` for writing, at the
    /// same time.  `x` must be at least 1.
    pub fn column_pair_mut(&mut self, x: u32) -> (&[P], &mut [P]) {
        let height = self.height as usize;
        let start = self.get_index(x, 0);
        let (before, after) = self.data.split_at_mut(start);
        (&before[start - height..], &mut after[..height])
    }

    /// Every column, left to right.
    pub fn columns(&self) -> impl Iterator<Item = &[P]> {
        // chunks() refuses a zero size; an empty map has no columns anyway.
        self.data.chunks(std::cmp::max(self.height as usize, 1))
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}
