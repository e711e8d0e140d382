use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndufunc::ops::{binary, unary};
use ndufunc::{matmul, may_share_memory, s, Array, LuDecomposition};

fn ramp(n: usize) -> Array<f64> {
    Array::from_vec((0..n).map(|i| i as f64).collect(), [n]).unwrap()
}

fn bench_array_creation(c: &mut Criterion) {
    c.bench_function("zeros 1000", |b| b.iter(|| Array::<f64>::zeros(black_box([1000usize]))));

    c.bench_function("arange 1000", |b| {
        b.iter(|| Array::arange(black_box(0.0f64), 1000.0, 1.0).unwrap())
    });

    c.bench_function("linspace 1000", |b| {
        b.iter(|| Array::linspace(black_box(0.0f64), 1.0, 1000, true))
    });
}

fn bench_unary_ops(c: &mut Criterion) {
    let x = ramp(1000);

    c.bench_function("negative 1000", |b| b.iter(|| unary::negative(black_box(&x)).unwrap()));

    c.bench_function("sqrt 1000", |b| b.iter(|| unary::sqrt(black_box(&x)).unwrap()));

    c.bench_function("exp 1000", |b| b.iter(|| unary::exp(black_box(&x)).unwrap()));
}

fn bench_binary_ops(c: &mut Criterion) {
    let x = ramp(1000);
    let y = Array::from_vec((0..1000).map(|i| (i + 1) as f64).collect(), [1000]).unwrap();

    c.bench_function("add 1000", |b| {
        b.iter(|| binary::add(black_box(&x), black_box(&y)).unwrap())
    });

    c.bench_function("divide 1000", |b| {
        b.iter(|| binary::divide(black_box(&x), black_box(&y)).unwrap())
    });

    c.bench_function("add scalar 1000", |b| b.iter(|| black_box(&x) + 2.0));
}

fn bench_broadcasting(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast add");

    for size in [10, 100, 300].iter() {
        let col = Array::from_vec((0..*size).map(|i| i as f64).collect(), [*size, 1]).unwrap();
        let row = Array::from_vec((0..*size).map(|i| i as f64).collect(), [1, *size]).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| binary::add(black_box(&col), black_box(&row)).unwrap())
        });
    }

    group.finish();
}

fn bench_strided_views(c: &mut Criterion) {
    let a = Array::from_vec((0..250_000).map(|i| i as f64).collect(), [500, 500]).unwrap();

    c.bench_function("copy contiguous 500x500", |b| b.iter(|| black_box(&a).copy()));

    c.bench_function("copy transposed 500x500", |b| b.iter(|| black_box(&a).t().copy()));

    c.bench_function("copy reversed step 500x500", |b| {
        b.iter(|| black_box(&a).index(&s![..;-2, ..;3]).unwrap().copy())
    });
}

fn bench_aliasing(c: &mut Criterion) {
    let a = Array::from_vec((0..10_000).map(|i| i as f64).collect(), [100, 100]).unwrap();
    let even = a.index(&s![.., ..;2]).unwrap();
    let odd = a.index(&s![.., 1..;2]).unwrap();

    c.bench_function("may_share_memory interleaved", |b| {
        b.iter(|| may_share_memory(black_box(&even), black_box(&odd)))
    });

    c.bench_function("in-place add transpose 100x100", |b| {
        b.iter_batched(
            || a.copy(),
            |mut x| {
                x += &x.t();
                x
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_linalg(c: &mut Criterion) {
    let mut group = c.benchmark_group("linalg");

    for n in [8, 32, 64].iter() {
        let a = Array::from_vec(
            (0..n * n)
                .map(|i| ((i * 7919) % 101) as f64 + if i % (n + 1) == 0 { 100.0 } else { 0.0 })
                .collect(),
            [*n, *n],
        )
        .unwrap();
        let rhs = ramp(*n);

        group.bench_with_input(BenchmarkId::new("matmul", n), n, |b, _| {
            b.iter(|| matmul(black_box(&a), black_box(&a)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("lu solve", n), n, |b, _| {
            b.iter(|| LuDecomposition::new(black_box(&a)).unwrap().solve(&rhs).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_array_creation,
    bench_unary_ops,
    bench_binary_ops,
    bench_broadcasting,
    bench_strided_views,
    bench_aliasing,
    bench_linalg
);
criterion_main!(benches);
