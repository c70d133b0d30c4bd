use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fcgr::_internal_test_data::POINTS_1M;
use fcgr::grid::Fcgr;

fn bin_1m_coarse(c: &mut Criterion) {
    c.bench_function("Bin 1M points at word length 4", |b| {
        b.iter(|| {
            let fcgr = Fcgr::from_points(4, black_box(POINTS_1M.as_slice())).unwrap();
            assert_eq!(fcgr.total(), 1_000_000);
        })
    });
}

fn bin_1m_fine(c: &mut Criterion) {
    c.bench_function("Bin 1M points at word length 8", |b| {
        b.iter(|| {
            let fcgr = Fcgr::from_points(8, black_box(POINTS_1M.as_slice())).unwrap();
            assert_eq!(fcgr.total(), 1_000_000);
        })
    });
}

criterion_group!(benches, bin_1m_coarse, bin_1m_fine);
criterion_main!(benches);
