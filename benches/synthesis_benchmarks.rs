//! Performance benchmarks for snap-in generation.
//!
//! - Fixtures: the example templates end to end, synthesis plus rendering
//! - Scaling: templates with growing operation and delegate counts
//!
//! ```bash
//! cargo bench --bench synthesis_benchmarks
//! ```

use std::hint::black_box;
use std::path::PathBuf;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use snapin::prelude::*;

fn load_fixture(filename: &str) -> DeclarationRegistry {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(filename);
    DeclarationRegistry::from_json_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Template with `ops` generic operations over a delegate with `ops` methods.
fn scaled_registry(ops: usize) -> DeclarationRegistry {
    let mut target = TypeDecl::interface("bench.Target");
    let mut template = TypeDecl::class("bench.Tmpl")
        .with_modifiers(Modifiers::ABSTRACT)
        .with_type_param(TypeParamDecl::new("T"))
        .with_interface(TypeRef::declared(
            DEFAULT_MARKER_CONTRACT,
            vec![TypeRef::class("bench.Target")],
        ));
    let t = template.type_var("T");

    for i in 0..ops {
        let name = format!("op{i}");
        let owner = GenericOwner::method("bench.Tmpl".into(), &name);
        template = template.with_method(
            MethodDecl::template(&name)
                .with_type_param(TypeParamDecl::new("T"))
                .returns(TypeRef::var("T", owner))
                .with_param("value", t.clone())
                .with_var_param("rest", TypeRef::string()),
        );
        target = target.with_method(
            MethodDecl::new(format!("call{i}"))
                .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .with_param("value", TypeRef::string()),
        );
    }

    let mut registry = DeclarationRegistry::with_marker_contract();
    registry.register_type(target).expect("register target");
    registry.register_type(template).expect("register template");
    registry
}

fn bench_fixtures(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate/fixtures");

    let fixtures = [
        ("example", "example.json", "mbenson.snapin.example.ExampleSnapinTemplate"),
        ("function", "function.json", "mbenson.snapin.example.external.FunctionSnapinTemplate"),
        ("parameterized", "parameterized.json", "mbenson.snapin.example.param.ParameterizedSnapinTemplate"),
    ];
    for (label, file, template) in fixtures {
        let generator = Generator::new(load_fixture(file));
        let request = [TemplateRequest::new(template, "Snap")];
        group.bench_function(label, |b| {
            b.iter(|| {
                let report = generator.generate_requests(black_box(&request));
                black_box(report.render());
            });
        });
    }

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate/scaling");

    for ops in [1usize, 10, 50, 200] {
        let generator = Generator::new(scaled_registry(ops));
        let request = [TemplateRequest::new("bench.Tmpl", "Snap")];
        group.throughput(Throughput::Elements(ops as u64));
        group.bench_with_input(BenchmarkId::new("synthesize", ops), &request, |b, request| {
            b.iter(|| black_box(generator.generate_requests(request)));
        });
        let report = generator.generate_requests(&request);
        group.bench_with_input(BenchmarkId::new("render", ops), &report, |b, report| {
            b.iter(|| black_box(report.render()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fixtures, bench_scaling);
criterion_main!(benches);
