// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! Every seam removed changes the energy landscape, so each carve runs
//! the whole pipeline from scratch: energy, cost, seam, removal, and
//! then again on the result.
//!
//! Only horizontal seams (one pixel per column) are ever found.  To
//! take columns off instead, the image is turned a quarter turn
//! clockwise, carved for height, and turned back.

use crate::costmatrix::calculate_cost;
use crate::energy::{energy_map, EnergyFunction, SobelEnergy};
use crate::errors::{CarveError, Dimension};
use crate::seamfinder::find_seam;
use crate::seamremover::remove_seam;
use image::imageops::{rotate270, rotate90};
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};
use tracing::{debug, info};

/// The working image type: whatever goes in, an owned buffer of the
/// same pixel type comes out.
pub type Carved<P, S> = ImageBuffer<P, Vec<S>>;

/// A seam carver, holding the energy function it will carve by.
#[derive(Debug, Default, Clone)]
pub struct SeamCarver<E> {
    energy: E,
}

impl<E> SeamCarver<E> {
    /// Creates a new SeamCarver that measures importance with `energy`.
    pub fn new(energy: E) -> Self {
        Self { energy }
    }

    /// The energy function in use.
    pub fn energy_function(&self) -> &E {
        &self.energy
    }

    /// Remove `n` horizontal seams, making the image `n` pixels
    /// shorter.  Fails without doing any work if the image isn't at
    /// least `n` pixels high.
    pub fn reduce_height<I, P, S>(&self, image: &I, n: u32) -> Result<Carved<P, S>, failure::Error>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
        E: EnergyFunction<Carved<P, S>>,
    {
        let (width, height) = image.dimensions();
        if n > height {
            return Err(CarveError::InvalidReductionAmount {
                dimension: Dimension::Height,
                requested: n,
                available: height,
            }
            .into());
        }
        info!(width, height, seams = n, "reducing height");

        let mut scratch: Carved<P, S> = ImageBuffer::new(width, height);
        for (x, y, pixel) in image.pixels() {
            scratch.put_pixel(x, y, pixel);
        }

        for i in 0..n {
            scratch = self.carve_once(&scratch)?;
            debug!(
                seam = i + 1,
                width = scratch.width(),
                height = scratch.height(),
                "carved"
            );
        }
        Ok(scratch)
    }

    /// Remove `n` vertical seams, making the image `n` pixels
    /// narrower.  This is exactly [`reduce_height`](Self::reduce_height)
    /// on the image turned 90° clockwise, turned back 90°
    /// anticlockwise afterwards.
    pub fn reduce_width<I, P, S>(&self, image: &I, n: u32) -> Result<Carved<P, S>, failure::Error>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
        E: EnergyFunction<Carved<P, S>>,
    {
        let width = image.width();
        if n > width {
            return Err(CarveError::InvalidReductionAmount {
                dimension: Dimension::Width,
                requested: n,
                available: width,
            }
            .into());
        }
        let turned = self.reduce_height(&rotate90(image), n)?;
        Ok(rotate270(&turned))
    }

    // One iteration.  Nothing survives it but the new image.
    fn carve_once<P, S>(&self, image: &Carved<P, S>) -> Result<Carved<P, S>, failure::Error>
    where
        P: Pixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
        E: EnergyFunction<Carved<P, S>>,
    {
        let energy = energy_map(image, &self.energy)?;
        let costs = calculate_cost(&energy)?;
        let seam = find_seam(&costs)?;
        Ok(remove_seam(image, &seam)?)
    }
}

/// Carve `n` rows out of an image using [`SobelEnergy`].
pub fn reduce_height<I, P, S>(image: &I, n: u32) -> Result<Carved<P, S>, failure::Error>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    SeamCarver::new(SobelEnergy).reduce_height(image, n)
}

/// Carve `n` columns out of an image using [`SobelEnergy`].
pub fn reduce_width<I, P, S>(image: &I, n: u32) -> Result<Carved<P, S>, failure::Error>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    SeamCarver::new(SobelEnergy).reduce_width(image, n)
}
