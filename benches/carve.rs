use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seamcarve::{calculate_energy, find_seam, PixelGrid, SeamCarver};

fn sample(width: u32, height: u32) -> PixelGrid {
    PixelGrid::from_fn(width, height, |x, y| {
        let v = ((x * 13 + y * 7 + x * y) % 256) as u8;
        [v, 255 - v, v / 2]
    })
}

fn energy_benchmark(c: &mut Criterion) {
    let image = sample(160, 120);
    c.bench_function("energy 160x120", |b| {
        b.iter(|| calculate_energy(black_box(&image)))
    });
}

fn seam_benchmark(c: &mut Criterion) {
    let energy = calculate_energy(&sample(160, 120)).unwrap();
    c.bench_function("seam 160x120", |b| b.iter(|| find_seam(black_box(&energy))));
}

fn carve_benchmark(c: &mut Criterion) {
    let image = sample(64, 48);
    let carver = SeamCarver::new();
    c.bench_function("carve 64x48 to 48 columns", |b| {
        b.iter(|| carver.carve_columns(black_box(&image), 48))
    });
}

criterion_group!(benches, energy_benchmark, seam_benchmark, carve_benchmark);
criterion_main!(benches);
