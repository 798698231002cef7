//! Benchmarks for the Goppa-code pipeline
//!
//! Covers the hot paths of key generation and decryption: canonical
//! check-matrix construction, bringing it into systematic form, and Patterson
//! syndrome decoding, at classic McEliece-style parameter sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use goppa_algebra::{
    canonical_check_matrix, compute_syndrome, syndrome_decode, systematic_form, BitMatrix,
    BitVector, Gf2mField, Gf2mPoly, PolyRing,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Benchmark check-matrix construction for growing field sizes.
fn bench_check_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_check_matrix");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for (m, t) in [(8usize, 10usize), (10, 20), (11, 32)] {
        let field = Gf2mField::new(m).unwrap();
        let gp = Gf2mPoly::random_irreducible(field, t, &mut rng).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("m{m}_t{t}")),
            &(field, gp),
            |b, (field, gp)| {
                b.iter(|| {
                    let h = canonical_check_matrix(black_box(field), black_box(gp)).unwrap();
                    black_box(h);
                });
            },
        );
    }
    group.finish();
}

/// Benchmark the randomized systematic-form search.
fn bench_systematic_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("systematic_form");
    group.sample_size(20);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for (m, t) in [(8usize, 10usize), (10, 20)] {
        let field = Gf2mField::new(m).unwrap();
        let gp = Gf2mPoly::random_irreducible(field, t, &mut rng).unwrap();
        let h = canonical_check_matrix(&field, &gp).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("m{m}_t{t}")),
            &h,
            |b, h| {
                b.iter(|| {
                    let form = systematic_form(black_box(h), &mut rng).unwrap();
                    black_box(form);
                });
            },
        );
    }
    group.finish();
}

/// Benchmark Patterson decoding of full-weight error patterns.
fn bench_syndrome_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("syndrome_decode");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for (m, t) in [(8usize, 10usize), (10, 20), (11, 32)] {
        let field = Gf2mField::new(m).unwrap();
        let gp = Gf2mPoly::random_irreducible(field, t, &mut rng).unwrap();
        let h = canonical_check_matrix(&field, &gp).unwrap();
        let ring = PolyRing::new(gp.clone()).unwrap();
        let e = BitVector::random_with_weight(field.size(), t, &mut rng).unwrap();
        let syndrome = compute_syndrome(&h, &e).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("m{m}_t{t}")),
            &(field, gp, syndrome, ring),
            |b, (field, gp, syndrome, ring)| {
                b.iter(|| {
                    let decoded = syndrome_decode(
                        black_box(syndrome),
                        field,
                        gp,
                        ring.square_root_matrix(),
                    )
                    .unwrap();
                    black_box(decoded);
                });
            },
        );
    }
    group.finish();
}

/// Benchmark GF(2) matrix inversion, the dominant cost of the systematic
/// form.
fn bench_matrix_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_matrix_inverse");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for n in [80usize, 200, 352] {
        let a = BitMatrix::random_regular(n, &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &a, |b, a| {
            b.iter(|| {
                let inv = black_box(a).inverse().unwrap();
                black_box(inv);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_check_matrix,
    bench_systematic_form,
    bench_syndrome_decode,
    bench_matrix_inverse
);
criterion_main!(benches);
