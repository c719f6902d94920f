// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pictures of the carver's intermediate products, for debugging and
//! for the curious.

use crate::energy::EnergyField;
use crate::seamfinder::Point;
use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Pixel, Primitive};
use itertools::iproduct;

/// Render an energy field as a grayscale image, the most energetic
/// pixel in white.  A field with no energy at all comes out black.
pub fn energy_to_image(energy: &EnergyField) -> GrayImage {
    let (width, height) = energy.dimensions();
    let factor = energy.columns().flatten().cloned().fold(0.0, f64::max);
    let mut out = GrayImage::new(width, height);
    if factor <= 0.0 {
        return out;
    }
    for (x, y) in iproduct!(0..width, 0..height) {
        let c = (energy[(x, y)] / factor * 255.0).round().max(0.0).min(255.0);
        out.put_pixel(x, y, Luma([c as u8]));
    }
    out
}

/// Paint a seam onto a copy of an image.  Points outside the image are
/// skipped.
pub fn draw_seam<I, P, S>(image: &I, seam: &[Point], colour: P) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let mut out: ImageBuffer<P, Vec<S>> = ImageBuffer::new(width, height);
    for (x, y, pixel) in image.pixels() {
        out.put_pixel(x, y, pixel);
    }
    for p in seam.iter().filter(|p| p.x < width && p.y < height) {
        out.put_pixel(p.x, p.y, colour);
    }
    out
}
