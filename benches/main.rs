// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

use correlation_rs::prelude::*;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Cell of `n_atoms` randomly placed silicon and oxygen atoms in the ratio 1:2.
fn random_silica(n_atoms: usize) -> Cell {
    let mut rng = StdRng::seed_from_u64(1234);
    let edge = (n_atoms as f64 * 15.0).cbrt();
    let lattice = Lattice::from_parameters([edge, edge, edge, 90.0, 90.0, 90.0].into()).unwrap();

    let atoms = (0..n_atoms)
        .map(|i| {
            let element = if i % 3 == 0 { "Si" } else { "O" };
            let position = Vector3D::new(rng.gen(), rng.gen(), rng.gen());
            Atom::new(i + 1, element, Position::fractional(position))
        })
        .collect();

    Cell::new("Random silica", lattice, atoms)
}

fn benchmark(c: &mut Criterion) {
    let radii = CovalentRadii::default();
    let cell = random_silica(300);

    c.bench_function("Cell::compute_rdf (300 atoms, cutoff 8)", |b| {
        b.iter(|| {
            let mut cell = cell.clone();
            std::hint::black_box(cell.compute_rdf(&radii, 8.0, 1.2).unwrap());
        })
    });

    #[cfg(feature = "parallel")]
    c.bench_function("Cell::compute_rdf_parallel (300 atoms, cutoff 8, 4 threads)", |b| {
        b.iter(|| {
            let mut cell = cell.clone();
            std::hint::black_box(cell.compute_rdf_parallel(&radii, 8.0, 1.2, 4).unwrap());
        })
    });

    let mut analyzed = cell.clone();
    let distances = analyzed.compute_rdf(&radii, 8.0, 1.2).unwrap();

    c.bench_function("Cell::compute_cn", |b| {
        b.iter(|| {
            std::hint::black_box(analyzed.compute_cn().unwrap());
        })
    });

    c.bench_function("Cell::compute_bad", |b| {
        b.iter(|| {
            std::hint::black_box(analyzed.compute_bad(AngleUnit::Degrees).unwrap());
        })
    });

    c.bench_function("PairDistances::histograms", |b| {
        b.iter(|| {
            std::hint::black_box(distances.histograms(0.05).unwrap());
        })
    });

    let params = AnalysisParams {
        rdf_cutoff: 6.0,
        ..Default::default()
    };

    c.bench_function("Cell::analyze (300 atoms, cutoff 6)", |b| {
        b.iter(|| {
            let mut cell = cell.clone();
            std::hint::black_box(cell.analyze(&radii, &params).unwrap());
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
