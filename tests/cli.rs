use assert_cmd::Command;
use image::{GenericImageView, Rgb, RgbImage};
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn write_sample(path: &Path) {
    RgbImage::from_fn(12, 8, |x, y| Rgb([(x * 20) as u8, (y * 30) as u8, ((x + y) * 7) as u8]))
        .save(path)
        .unwrap();
}

#[test]
fn carves_rows_and_columns() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_sample(&input);

    Command::cargo_bin("seamcarve")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .args(&["--columns", "3", "--rows", "2"])
        .assert()
        .success();

    let carved = image::open(&output).unwrap();
    assert_eq!(carved.dimensions(), (9, 6));
}

#[test]
fn writes_the_energy_map_when_asked() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    let energy = dir.path().join("energy.png");
    write_sample(&input);

    Command::cargo_bin("seamcarve")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .args(&["--energy", "gradient", "--energy-map"])
        .arg(&energy)
        .assert()
        .success();

    assert_eq!(image::open(&energy).unwrap().dimensions(), (12, 8));
    assert_eq!(image::open(&output).unwrap().dimensions(), (12, 8));
}

#[test]
fn marks_the_cheapest_seam_when_asked() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    let seam = dir.path().join("seam.png");
    write_sample(&input);

    Command::cargo_bin("seamcarve")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .args(&["--rows", "1", "-v", "--seam"])
        .arg(&seam)
        .assert()
        .success()
        .stderr(predicate::str::contains("cheapest seam"));

    let marked = image::open(&seam).unwrap().to_rgb8();
    assert_eq!(marked.dimensions(), (12, 8));
    // One red pixel in every column.
    for x in 0..12 {
        let red = (0..8).filter(|&y| marked.get_pixel(x, y) == &Rgb([255, 0, 0])).count();
        assert_eq!(red, 1);
    }
    assert_eq!(image::open(&output).unwrap().dimensions(), (12, 7));
}

#[test]
fn refuses_to_carve_more_than_there_is() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_sample(&input);

    Command::cargo_bin("seamcarve")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .args(&["--rows", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot reduce height of 8 pixels by 9 pixels"));
    assert!(!output.exists());
}

#[test]
fn rejects_unknown_energy_functions() {
    Command::cargo_bin("seamcarve")
        .unwrap()
        .args(&["a.png", "b.png", "--energy", "entropy"])
        .assert()
        .failure();
}
