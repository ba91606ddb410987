//! Benchmarks for unibar encoding and rendering performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use unibar::{registry, BarcodeGenerator, Configuration, SvgCanvas};

fn generator(name: &str) -> BarcodeGenerator {
    let cfg = Configuration::new(name);
    registry::create(name, &cfg)
        .map(BarcodeGenerator::new)
        .unwrap()
}

fn bench_encode(c: &mut Criterion) {
    let code39 = generator("code39");
    c.bench_function("encode_code39", |b| {
        b.iter(|| code39.calc_dimensions(black_box("CODE 39 BENCHMARK")).unwrap())
    });

    let royal_mail = generator("royal-mail-cbc");
    c.bench_function("encode_royal_mail", |b| {
        b.iter(|| royal_mail.calc_dimensions(black_box("SN34RD1A")).unwrap())
    });
}

fn bench_render_svg(c: &mut Criterion) {
    let code39 = generator("code39");
    c.bench_function("render_code39_svg", |b| {
        b.iter(|| {
            let mut canvas = SvgCanvas::new();
            code39
                .generate(&mut canvas, black_box("CODE 39 BENCHMARK"))
                .unwrap();
            canvas.to_xml().unwrap()
        })
    });

    let postnet = generator("postnet");
    c.bench_function("render_postnet_svg", |b| {
        b.iter(|| {
            let mut canvas = SvgCanvas::new();
            postnet.generate(&mut canvas, black_box("802021234")).unwrap();
            canvas.to_xml().unwrap()
        })
    });
}

criterion_group!(benches, bench_encode, bench_render_svg);
criterion_main!(benches);
