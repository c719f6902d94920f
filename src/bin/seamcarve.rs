use seamcarve::render::{draw_seam, energy_to_image};
use seamcarve::{
    calculate_cost, energy_map, find_seam, seam_cost, DualGradientEnergy, EnergyFunction,
    SeamCarver, SobelEnergy,
};

#[macro_use]
extern crate clap;

use clap::{App, Arg};
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Primitive, Rgb, Rgba};
use tracing::{info, Level};

// Narrow first, then shorten.
fn carve<P, S, E>(
    image: &ImageBuffer<P, Vec<S>>,
    carver: &SeamCarver<E>,
    columns: u32,
    rows: u32,
) -> Result<ImageBuffer<P, Vec<S>>, failure::Error>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
    E: EnergyFunction<ImageBuffer<P, Vec<S>>>,
{
    let narrowed = carver.reduce_width(image, columns)?;
    carver.reduce_height(&narrowed, rows)
}

// Optional pictures of the input: its energy, and its cheapest
// left-to-right seam.
struct Pictures<'a> {
    energy: Option<&'a str>,
    seam: Option<&'a str>,
}

// Writes the energy picture; hands back the input with its cheapest
// seam painted in `colour` for the caller to save.
fn draw<P, S, E>(
    image: &ImageBuffer<P, Vec<S>>,
    carver: &SeamCarver<E>,
    pictures: &Pictures,
    colour: P,
) -> Result<Option<ImageBuffer<P, Vec<S>>>, failure::Error>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
    E: EnergyFunction<ImageBuffer<P, Vec<S>>>,
{
    if pictures.energy.is_none() && pictures.seam.is_none() {
        return Ok(None);
    }
    let energy = energy_map(image, carver.energy_function())?;
    if let Some(path) = pictures.energy {
        energy_to_image(&energy).save(path)?;
    }
    if pictures.seam.is_none() {
        return Ok(None);
    }
    let seam = find_seam(&calculate_cost(&energy)?)?;
    info!(cost = seam_cost(&energy, &seam), "cheapest seam");
    Ok(Some(draw_seam(image, &seam, colour)))
}

fn run<E>(
    image: DynamicImage,
    energy: E,
    columns: u32,
    rows: u32,
    pictures: &Pictures,
) -> Result<DynamicImage, failure::Error>
where
    E: EnergyFunction<image::RgbImage> + EnergyFunction<image::RgbaImage>,
{
    let carver = SeamCarver::new(energy);
    if image.color().has_alpha() {
        let image = image.to_rgba8();
        if let (Some(path), Some(marked)) =
            (pictures.seam, draw(&image, &carver, pictures, Rgba([255, 0, 0, 255]))?)
        {
            marked.save(path)?;
        }
        Ok(DynamicImage::ImageRgba8(carve(&image, &carver, columns, rows)?))
    } else {
        let image = image.to_rgb8();
        if let (Some(path), Some(marked)) =
            (pictures.seam, draw(&image, &carver, pictures, Rgb([255, 0, 0]))?)
        {
            marked.save(path)?;
        }
        Ok(DynamicImage::ImageRgb8(carve(&image, &carver, columns, rows)?))
    }
}

fn try_main() -> Result<(), failure::Error> {
    let matches = App::new("seamcarve")
        .version(crate_version!())
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image reduction by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image; the format follows the extension")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("columns")
                .short("c")
                .long("columns")
                .takes_value(true)
                .default_value("0")
                .help("How many columns to carve away"),
        )
        .arg(
            Arg::with_name("rows")
                .short("r")
                .long("rows")
                .takes_value(true)
                .default_value("0")
                .help("How many rows to carve away"),
        )
        .arg(
            Arg::with_name("energy")
                .short("e")
                .long("energy")
                .takes_value(true)
                .possible_values(&["sobel", "gradient"])
                .default_value("sobel")
                .help("How pixel importance is measured"),
        )
        .arg(
            Arg::with_name("energy-map")
                .long("energy-map")
                .takes_value(true)
                .value_name("FILE")
                .help("Also write a picture of the input's energy"),
        )
        .arg(
            Arg::with_name("seam")
                .long("seam")
                .takes_value(true)
                .value_name("FILE")
                .help("Also write the input with its cheapest left-to-right seam in red"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Report progress; twice to report every seam"),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let columns = value_t!(matches, "columns", u32).unwrap_or_else(|e| e.exit());
    let rows = value_t!(matches, "rows", u32).unwrap_or_else(|e| e.exit());
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();
    let pictures = Pictures {
        energy: matches.value_of("energy-map"),
        seam: matches.value_of("seam"),
    };

    let image = image::open(input)?;
    info!(input, columns, rows, "carving");
    let carved = match matches.value_of("energy") {
        Some("gradient") => run(image, DualGradientEnergy, columns, rows, &pictures)?,
        _ => run(image, SobelEnergy, columns, rows, &pictures)?,
    };
    carved.save(output)?;
    info!(output, width = carved.width(), height = carved.height(), "done");
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("seamcarve: {}", err);
        std::process::exit(1);
    }
}
