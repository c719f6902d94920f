// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image reduction by seam carving.
//!
//! ```no_run
//! let image = image::open("tower.png").unwrap().to_rgba8();
//! let narrower = seamcarve::reduce_width(&image, 40).unwrap();
//! let shorter = seamcarve::reduce_height(&narrower, 20).unwrap();
//! shorter.save("tower-small.png").unwrap();
//! ```

mod ternary;

pub mod costmatrix;
pub mod energy;
pub mod errors;
pub mod render;
pub mod seamcarver;
pub mod seamfinder;
pub mod seamremover;
pub mod twodmap;

pub use costmatrix::{calculate_cost, CostMatrix};
pub use energy::{energy_map, DualGradientEnergy, EnergyField, EnergyFunction, SobelEnergy};
pub use errors::{CarveError, Dimension};
pub use seamcarver::{reduce_height, reduce_width, SeamCarver};
pub use seamfinder::{find_seam, seam_cost, Point, Seam};
pub use seamremover::remove_seam;
