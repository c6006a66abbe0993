//! Benchmarks for the operator-list walker.
//!
//! Measures the single-pass dispatch loop over synthetic operator lists at
//! various scales, with a device that accepts everything and does nothing, so
//! the walker's own overhead dominates.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use blueline_core::interp::{PageDevice, PageWalker};
use blueline_core::model::{ObjectStore, Operand, OperatorList};

struct NullDevice;

impl PageDevice for NullDevice {}

/// Generate a synthetic operator list with N operations: a mix of
/// save/restore, transforms, text markers, and path-construction groups.
fn generate_list(n: usize) -> OperatorList {
    let mut codes = Vec::with_capacity(n);
    let mut args = Vec::with_capacity(n);

    for i in 0..n {
        match i % 5 {
            0 => {
                codes.push(10); // save
                args.push(vec![]);
            }
            1 => {
                codes.push(12); // transform
                args.push(vec![
                    Operand::Num(1.0),
                    Operand::Num(0.0),
                    Operand::Num(0.0),
                    Operand::Num(1.0),
                    Operand::Num(i as f64),
                    Operand::Num(0.0),
                ]);
            }
            2 => {
                codes.push(91); // constructPath
                args.push(vec![
                    Operand::Array(vec![Operand::Num(13.0), Operand::Num(14.0)]),
                    Operand::Array(vec![
                        Operand::Array(vec![Operand::Num(0.0), Operand::Num(0.0)]),
                        Operand::Array(vec![Operand::Num(i as f64), Operand::Num(i as f64)]),
                    ]),
                    Operand::Array(vec![
                        Operand::Num(0.0),
                        Operand::Num(0.0),
                        Operand::Num(i as f64),
                        Operand::Num(i as f64),
                    ]),
                ]);
            }
            3 => {
                codes.push(31); // beginText
                args.push(vec![]);
            }
            _ => {
                codes.push(11); // restore
                args.push(vec![]);
            }
        }
    }

    OperatorList::from_arrays(codes, args).unwrap()
}

fn bench_walk(c: &mut Criterion) {
    let objects = ObjectStore::new();
    let mut group = c.benchmark_group("walker");

    for &n in &[100usize, 1_000, 10_000] {
        let list = generate_list(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &list, |b, list| {
            b.iter(|| {
                let mut device = NullDevice;
                let stats = PageWalker::new(&mut device, &objects)
                    .walk(black_box(list))
                    .unwrap();
                black_box(stats)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
