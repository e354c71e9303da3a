use criterion::*;
use tagson::parse::parse;
use tagson::*;

#[derive(Debug, Clone, PartialEq)]
struct Sample {
    id: u64,
    label: String,
    reading: f64,
}
impl_mapped!(Sample, "bench.Sample", id, label, reading);

fn plain_document() -> Value {
    let rows = (0..100)
        .map(|i| {
            Value::new_map(vec![
                ("id".to_string(), Value::new_num(i)),
                ("label".to_string(), Value::new_str("row")),
                ("reading".to_string(), Value::new_num(i as f64 * 0.25)),
            ])
        })
        .collect();
    Value::Seq(rows)
}

fn tagged_document() -> Value {
    let rows = (0..100)
        .map(|i| {
            Value::new_obj(Sample {
                id: i,
                label: "row".to_string(),
                reading: i as f64 * 0.25,
            })
        })
        .collect();
    Value::Seq(rows)
}

fn encode(c: &mut Criterion) {
    let plain = plain_document();
    let tagged = tagged_document();

    c.bench_function("encode plain rows", |b| {
        let mut registry = MapperRegistry::new();
        b.iter(|| to_json(black_box(&plain), &mut registry))
    });
    c.bench_function("encode tagged rows", |b| {
        let mut registry = MapperRegistry::new();
        b.iter(|| to_json(black_box(&tagged), &mut registry))
    });
}

fn decode(c: &mut Criterion) {
    let mut registry = MapperRegistry::new();
    let plain = to_json(&plain_document(), &mut registry).unwrap();
    let tagged = to_json(&tagged_document(), &mut registry).unwrap();

    c.bench_function("parse plain rows", |b| {
        b.iter(|| parse(black_box(&plain)))
    });
    c.bench_function("decode plain rows", |b| {
        b.iter(|| from_json(black_box(&plain), &registry))
    });
    c.bench_function("decode tagged rows", |b| {
        b.iter(|| from_json(black_box(&tagged), &registry))
    });
    c.bench_function("decode numbers", |b| {
        b.iter(|| parse(black_box("[1234567890, -1234567890, -1234.56789e-12, 6800123.769]")))
    });
}

criterion_group!(benches, encode, decode);
criterion_main!(benches);
