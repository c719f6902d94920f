use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use seamcarve::{calculate_cost, energy_map, find_seam, reduce_width, SobelEnergy};

fn sample(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = ((x * 37 + y * 91 + x * y) % 256) as u8;
        Rgb([v, v.wrapping_mul(3), 255 - v])
    })
}

fn bench_pipeline(c: &mut Criterion) {
    let image = sample(320, 240);
    let energy = energy_map(&image, &SobelEnergy).unwrap();
    let costs = calculate_cost(&energy).unwrap();

    c.bench_function("sobel_energy_320x240", |b| {
        b.iter(|| energy_map(black_box(&image), &SobelEnergy).unwrap())
    });
    c.bench_function("cost_matrix_320x240", |b| {
        b.iter(|| calculate_cost(black_box(&energy)).unwrap())
    });
    c.bench_function("find_seam_320x240", |b| {
        b.iter(|| find_seam(black_box(&costs)).unwrap())
    });
    c.bench_function("reduce_width_10_of_320x240", |b| {
        b.iter(|| reduce_width(black_box(&image), 10).unwrap())
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
