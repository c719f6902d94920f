// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The carver doesn't care how "importance" is measured, only that it
//! gets back one non-negative scalar per pixel, higher meaning more
//! worth keeping.  Anything implementing [`EnergyFunction`] will do,
//! including a plain function or closure with the right signature.
//!
//! Two strategies are supplied.  [`SobelEnergy`] is the classic
//! grayscale-then-edge-detect filter and the default.
//! [`DualGradientEnergy`] is the older, simpler squared difference of
//! each pixel's neighbours, as described in [Avidan & Shamir (2007)].

use crate::cq;
use crate::errors::CarveError;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, Pixel, Primitive};
use itertools::iproduct;
use num_traits::NumCast;

/// One scalar of importance per pixel, addressed `(x, y)`.
pub type EnergyField = TwoDimensionalMap<f64>;

/// The capability the carver needs: Image -> EnergyField.
pub trait EnergyFunction<I> {
    /// Compute the energy of every pixel in `image`.  The returned
    /// field must have the image's dimensions.
    fn energy(&self, image: &I) -> Result<EnergyField, failure::Error>;
}

impl<I, F> EnergyFunction<I> for F
where
    F: Fn(&I) -> Result<EnergyField, failure::Error>,
{
    fn energy(&self, image: &I) -> Result<EnergyField, failure::Error> {
        self(image)
    }
}

/// Run an energy function over an image.  Empty images are refused
/// before the function ever sees them.  A field that doesn't match the
/// image, or that holds anything but finite non-negative values, is
/// refused after.
pub fn energy_map<I, E>(image: &I, energy: &E) -> Result<EnergyField, failure::Error>
where
    I: GenericImageView,
    E: EnergyFunction<I> + ?Sized,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CarveError::EmptyInput.into());
    }
    let field = energy.energy(image)?;
    if field.dimensions() != (width, height) {
        return Err(CarveError::DimensionMismatch(format!(
            "energy field is {}x{} but the image is {}x{}",
            field.width(),
            field.height(),
            width,
            height
        ))
        .into());
    }
    let (w, h) = field.dimensions();
    if let Some((x, y)) = iproduct!(0..w, 0..h).find(|&(x, y)| {
        let e = field[(x, y)];
        !e.is_finite() || e < 0.0
    }) {
        let value = field[(x, y)];
        return Err(CarveError::InvalidEnergy { x, y, value }.into());
    }
    Ok(field)
}

// Pixel -> raw luma channel, in the subpixel's own units.
#[inline]
fn lumachannel<P: Pixel>(p: &P) -> f64 {
    NumCast::from(p.to_luma()[0]).unwrap_or(0.0)
}

// Pixel -> luma, scaled so that the subpixel's full range maps to [0, 1].
#[inline]
fn unit_luma<P: Pixel>(p: &P) -> f64 {
    let max: f64 = NumCast::from(<P::Subpixel as Primitive>::DEFAULT_MAX_VALUE).unwrap_or(1.0);
    lumachannel(p) / max
}

fn luma_map<I, F>(image: &I, luma: F) -> TwoDimensionalMap<f64>
where
    I: GenericImageView,
    F: Fn(&I::Pixel) -> f64,
{
    let (width, height) = image.dimensions();
    let mut map = TwoDimensionalMap::new(width, height);
    for (x, y) in iproduct!(0..width, 0..height) {
        map[(x, y)] = luma(&image.get_pixel(x, y));
    }
    map
}

/// Grayscale followed by a 3x3 Sobel operator.  Luma is normalised to
/// [0, 1], pixels beyond the border repeat the border, and the
/// gradient magnitude is clamped to [0, 1], so the field always lies
/// in [0, 1] whatever the subpixel type.
#[derive(Debug, Default, Copy, Clone)]
pub struct SobelEnergy;

impl SobelEnergy {
    fn field(luma: &TwoDimensionalMap<f64>) -> EnergyField {
        let (width, height) = luma.dimensions();
        let mut emap = EnergyField::new(width, height);
        if emap.is_empty() {
            return emap;
        }
        let (mw, mh) = (width - 1, height - 1);

        for (x, y) in iproduct!(0..width, 0..height) {
            let (xl, xr) = (cq!(x == 0, x, x - 1), cq!(x >= mw, x, x + 1));
            let (yu, yd) = (cq!(y == 0, y, y - 1), cq!(y >= mh, y, y + 1));
            let p = |px, py| luma[(px, py)];

            //      -1  0  1          -1 -2 -1
            // gx = -2  0  2     gy =  0  0  0
            //      -1  0  1           1  2  1
            let gx = (p(xr, yu) + 2.0 * p(xr, y) + p(xr, yd))
                - (p(xl, yu) + 2.0 * p(xl, y) + p(xl, yd));
            let gy = (p(xl, yd) + 2.0 * p(x, yd) + p(xr, yd))
                - (p(xl, yu) + 2.0 * p(x, yu) + p(xr, yu));
            emap[(x, y)] = (gx * gx + gy * gy).sqrt().min(1.0);
        }
        emap
    }
}

impl<I: GenericImageView> EnergyFunction<I> for SobelEnergy {
    fn energy(&self, image: &I) -> Result<EnergyField, failure::Error> {
        Ok(SobelEnergy::field(&luma_map(image, unit_luma::<I::Pixel>)))
    }
}

/// The squared luma difference between each pixel's left and right
/// neighbours, plus the same for its upper and lower neighbours.  Edge
/// pixels stand in for their own missing neighbour.  Values are in the
/// subpixel's units, squared.
//
//        |Δx|² = (L(x-1,y) - L(x+1,y))²
//        |Δy|² = (L(x,y-1) - L(x,y+1))²
//       e(x,y) = |Δx|² + |Δy|²
#[derive(Debug, Default, Copy, Clone)]
pub struct DualGradientEnergy;

impl DualGradientEnergy {
    fn field(luma: &TwoDimensionalMap<f64>) -> EnergyField {
        let (width, height) = luma.dimensions();
        let mut emap = EnergyField::new(width, height);
        if emap.is_empty() {
            return emap;
        }
        let (mw, mh) = (width - 1, height - 1);

        let energy_of_pair = |a: f64, b: f64| (a - b) * (a - b);
        for (x, y) in iproduct!(0..width, 0..height) {
            let current = luma[(x, y)];
            let (left, right, up, down) = (
                cq!(x == 0, current, luma[(x - 1, y)]),
                cq!(x >= mw, current, luma[(x + 1, y)]),
                cq!(y == 0, current, luma[(x, y - 1)]),
                cq!(y >= mh, current, luma[(x, y + 1)]),
            );
            emap[(x, y)] = energy_of_pair(left, right) + energy_of_pair(up, down);
        }
        emap
    }
}

impl<I: GenericImageView> EnergyFunction<I> for DualGradientEnergy {
    fn energy(&self, image: &I) -> Result<EnergyField, failure::Error> {
        Ok(DualGradientEnergy::field(&luma_map(image, lumachannel::<I::Pixel>)))
    }
}
