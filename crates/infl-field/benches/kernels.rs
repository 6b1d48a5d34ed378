//! Field kernel throughput: every kernel variant × unit layout on the default
//! 320 × 320 grid, with the reference unit set and a large one.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use infl_core::{GridDims, KernelChoice, Precision, SimRng, Unit, UnitGenConfig, UnitLayout, generate_units};
use infl_field::{Capabilities, FieldComputer, FieldKernel, FieldPublisher, Kernel};
use infl_sched::Scheduler;

fn unit_sets(grid: GridDims) -> Vec<(&'static str, Vec<Unit>)> {
    let mut rng = SimRng::new(UnitGenConfig::DETERMINISTIC_SEED);
    let reference = generate_units(&UnitGenConfig::default(), grid, &mut rng);

    let large_cfg = UnitGenConfig { min_per_side: 500, max_per_side: 501, ..Default::default() };
    let large     = generate_units(&large_cfg, grid, &mut rng);

    vec![("reference", reference), ("1000", large)]
}

fn kernels() -> Vec<Kernel> {
    let caps = Capabilities::detect();
    let mut out = vec![
        Kernel::select(caps, KernelChoice::Scalar, Precision::Exact),
        Kernel::select(caps, KernelChoice::Lanes4, Precision::Exact),
        Kernel::select(caps, KernelChoice::Lanes4, Precision::Approximate),
        Kernel::select(caps, KernelChoice::Lanes8, Precision::Exact),
        Kernel::select(caps, KernelChoice::Lanes8, Precision::Approximate),
    ];
    if caps.fma() {
        out.push(Kernel::select(caps.without_fma(), KernelChoice::Lanes8, Precision::Exact));
    }
    out
}

fn bench_field(c: &mut Criterion) {
    let grid      = GridDims::DEFAULT;
    let scheduler = Scheduler::new(None, 1024).unwrap();
    let mut publisher = FieldPublisher::new(grid);

    for (set_name, units) in unit_sets(grid) {
        let mut group = c.benchmark_group(format!("field/{set_name}"));
        group.throughput(Throughput::Elements((grid.cell_count() * units.len()) as u64));

        for kernel in kernels() {
            for layout in [UnitLayout::Soa, UnitLayout::Aos] {
                let mut computer = FieldComputer::new(kernel, layout, None);
                let id = BenchmarkId::new(format!("{}-{}", kernel.name(), kernel.path()), layout);
                group.bench_function(id, |b| {
                    b.iter(|| {
                        let scratch  = publisher.begin_compute(grid);
                        let computed = computer.compute(&scheduler, black_box(&units), scratch).unwrap();
                        black_box(publisher.publish(computed).unwrap().generation())
                    })
                });
            }
        }
        group.finish();
    }
}

criterion_group!(benches, bench_field);
criterion_main!(benches);
