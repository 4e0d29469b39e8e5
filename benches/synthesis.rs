use apiforge::adapters::synthesizer::Synthesizer;
use apiforge::adapters::variabilizer::{variabilize, VariableScope};
use apiforge::domain::SchemaNode;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

fn order_schema() -> SchemaNode {
    SchemaNode::from_value(&json!({
        "type": "object",
        "required": ["id", "customer", "lines"],
        "properties": {
            "id": { "type": "string", "format": "uuid" },
            "placed_at": { "type": "string", "format": "date-time" },
            "customer": {
                "type": "object",
                "required": ["name", "email"],
                "properties": {
                    "name": { "type": "string", "description": "customer name" },
                    "email": { "type": "string", "format": "email" },
                    "phone": { "type": "string", "description": "phone number" }
                }
            },
            "lines": {
                "type": "array",
                "items": {
                    "allOf": [
                        { "type": "object", "required": ["sku"], "properties": { "sku": { "type": "string", "pattern": "^\\d+$" } } },
                        { "type": "object", "properties": { "qty": { "type": "integer", "minimum": 1, "maximum": 20 } } }
                    ]
                }
            },
            "status": { "type": "string", "enum": ["new", "paid", "shipped"] },
            "total": { "type": "number" }
        }
    }))
    .unwrap()
}

fn benchmark_synthesize(c: &mut Criterion) {
    let schema = order_schema();
    let mut synth = Synthesizer::seeded(42);

    c.bench_function("synthesize_order", |b| {
        b.iter(|| synth.synthesize(black_box(&schema)))
    });
}

fn benchmark_variabilize(c: &mut Criterion) {
    let schema = order_schema();
    let mut synth = Synthesizer::seeded(42);
    let mut group = c.benchmark_group("variabilize");

    for orders in [1usize, 10, 100] {
        let payload = json!((0..orders).map(|_| synth.synthesize(&schema)).collect::<Vec<_>>());
        group.bench_with_input(BenchmarkId::from_parameter(orders), &payload, |b, payload| {
            b.iter(|| variabilize(black_box(payload)))
        });
    }
    group.finish();
}

fn benchmark_path_params(c: &mut Criterion) {
    let segments = ["orgs", "{orgId}", "users", "{userId}", "orders", "{orderId}"];

    c.bench_function("substitute_path_segments", |b| {
        b.iter(|| {
            let mut scope = VariableScope::new();
            scope.substitute_path_segments(black_box(&segments[..]), "example_value")
        })
    });
}

criterion_group!(benches, benchmark_synthesize, benchmark_variabilize, benchmark_path_params);
criterion_main!(benches);
