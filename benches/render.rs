use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for size in [1_024usize, 10_240, 102_400] {
        let doc = envwriter::parse_str(&make_input(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| envwriter::render(black_box(doc)));
        });
    }
    group.finish();
}

fn bench_render_after_edits(c: &mut Criterion) {
    let mut doc = envwriter::parse_str(&make_input(10_240));
    for (idx, (key, _)) in doc.get_all().into_iter().enumerate() {
        if idx % 2 == 0 {
            doc.set(&key, "edited value").expect("set should succeed");
        }
    }

    c.bench_function("render_after_edits", |b| {
        b.iter(|| envwriter::render(black_box(&doc)));
    });
}

fn make_input(bytes: usize) -> String {
    let mut out = String::new();
    let mut counter = 0usize;
    while out.len() < bytes {
        out.push_str(&format!(
            "# section {counter}\nKEY_{counter}=value\nQUOTED_{counter}=\"a b c\" # note\n\n"
        ));
        counter += 1;
    }
    out
}

criterion_group!(benches, bench_render, bench_render_after_edits);
criterion_main!(benches);
