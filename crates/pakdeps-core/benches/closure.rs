use criterion::{Criterion, criterion_group, criterion_main};
use pakdeps_core::closure::compute_closure;
use pakdeps_core::package::PackageId;
use pakdeps_core::policy::ExclusionPolicy;
use pakdeps_core::registry::Registry;
use std::hint::black_box;

/// A layered content graph: each package references a few packages in the
/// next layer plus a shared engine package.
fn build_registry(layers: usize, width: usize) -> Registry {
    let mut registry = Registry::new();
    for layer in 0..layers {
        for i in 0..width {
            let from = format!("/Game/L{}/P{}", layer, i);
            let mut deps = vec![PackageId::from("/Engine/BasicShapes/Cube")];
            if layer + 1 < layers {
                for k in 0..3 {
                    deps.push(PackageId::new(format!(
                        "/Game/L{}/P{}",
                        layer + 1,
                        (i + k) % width
                    )));
                }
            }
            registry.insert_package(from, deps);
        }
    }
    registry
}

fn bench_closure_small(c: &mut Criterion) {
    let registry = build_registry(10, 20);

    c.bench_function("closure_200_packages", |b| {
        b.iter(|| {
            compute_closure(
                black_box(&registry),
                ExclusionPolicy::default(),
                [PackageId::from("/Game/L0/P0")],
            )
        })
    });
}

fn bench_closure_large(c: &mut Criterion) {
    let registry = build_registry(50, 200);
    let seeds: Vec<PackageId> = (0..20)
        .map(|i| PackageId::new(format!("/Game/L0/P{}", i)))
        .collect();

    c.bench_function("closure_10k_packages_20_seeds", |b| {
        b.iter(|| {
            compute_closure(
                black_box(&registry),
                ExclusionPolicy::default(),
                seeds.iter().cloned(),
            )
        })
    });
}

criterion_group!(benches, bench_closure_small, bench_closure_large);
criterion_main!(benches);
