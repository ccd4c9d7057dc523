use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use goto_language_server::report::{render, ReportOptions};
use goto_language_server::{analyze_document, OutputFormat};
use std::hint::black_box;

fn generate_document(size_kb: usize) -> String {
    let target_bytes = size_kb * 1024;
    let mut content = String::with_capacity(target_bytes + 100);

    let patterns = [
        "C dispatch on the selector\n",
        "      GO TO (100, 200, 300), ISEL\n",
        "      GO TO 400\n",
        "\n",
        "c   fall through to the handler\n",
        "      GO TO NEXT\n",
        "      go to 0\n",
        "      GO TO (10, 20 30), I\n",
    ];

    let mut index = 0;
    while content.len() < target_bytes {
        content.push_str(patterns[index % patterns.len()]);
        index += 1;
    }

    content
}

fn bench_analyze_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_document");

    for size_kb in [16, 256, 1024].iter() {
        let content = generate_document(*size_kb);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("size_kb", size_kb), &content, |b, content| {
            b.iter(|| {
                let report = analyze_document(black_box(content));
                black_box(report.statistics.success_rate())
            })
        });
    }
    group.finish();
}

fn bench_render_reports(c: &mut Criterion) {
    let report = analyze_document(&generate_document(256));
    let mut group = c.benchmark_group("render_report");

    for (name, format) in [
        ("text", OutputFormat::Text),
        ("json", OutputFormat::Json),
        ("csv", OutputFormat::Csv),
    ] {
        let options = ReportOptions {
            format,
            include_comments: true,
        };
        group.bench_function(name, |b| {
            b.iter(|| black_box(render(&report, Some("bench.f"), options)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analyze_document, bench_render_reports);
criterion_main!(benches);
