// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cutting a seam out of an image.

use crate::errors::CarveError;
use crate::seamfinder::Point;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};

// A seam from the finder always fits; one that doesn't means something
// upstream is broken, so say so rather than clamping.
fn check_seam(seam: &[Point], width: u32, height: u32) -> Result<(), CarveError> {
    if seam.len() != width as usize {
        return Err(CarveError::DimensionMismatch(format!(
            "seam has {} points but the image is {} pixels wide",
            seam.len(),
            width
        )));
    }
    match seam
        .iter()
        .enumerate()
        .find(|(x, p)| p.x as usize != *x || p.y >= height)
    {
        Some((x, p)) => Err(CarveError::DimensionMismatch(format!(
            "seam point {} is ({}, {}), outside column {} of an image {} pixels high",
            x, p.x, p.y, x, height
        ))),
        None => Ok(()),
    }
}

/// Given an image and a left-to-right seam, return a copy of the image
/// one row shorter, with the seam's pixels gone.  In each column, the
/// pixels above the seam stay put and the ones below it move up one.
pub fn remove_seam<I, P, S>(image: &I, seam: &[Point]) -> Result<ImageBuffer<P, Vec<S>>, CarveError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CarveError::EmptyInput);
    }
    check_seam(seam, width, height)?;

    let mut imgbuf: ImageBuffer<P, Vec<S>> = ImageBuffer::new(width, height - 1);
    for point in seam {
        let x = point.x;
        for y in (0..height).filter(|y| *y != point.y) {
            let target = if y < point.y { y } else { y - 1 };
            imgbuf.put_pixel(x, target, image.get_pixel(x, y));
        }
    }
    Ok(imgbuf)
}
