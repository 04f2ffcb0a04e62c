use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use serde_json::{Value, json};

use dashkit_sharing::sanitize_role_assignments;

fn well_formed_candidate(consumers: usize) -> Value {
    let mut map = serde_json::Map::new();
    for id in 0..consumers {
        map.insert(id.to_string(), json!(["editor", "author", "subscriber"]));
    }
    Value::Object(map)
}

/// Every third entry carries some structural corruption.
fn mixed_candidate(consumers: usize) -> Value {
    let mut map = serde_json::Map::new();
    for id in 0..consumers {
        match id % 3 {
            0 => map.insert(format!("k{id}"), json!(["editor"])),
            1 => map.insert(id.to_string(), json!("not-a-list")),
            _ => map.insert(id.to_string(), json!(["editor", 42, "author", true])),
        };
    }
    Value::Object(map)
}

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize_role_assignments");

    for size in [16usize, 256, 4096] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("well_formed", size), &size, |b, &size| {
            let candidate = well_formed_candidate(size);
            b.iter(|| sanitize_role_assignments(black_box(&candidate)));
        });

        group.bench_with_input(BenchmarkId::new("mixed_corruption", size), &size, |b, &size| {
            let candidate = mixed_candidate(size);
            b.iter(|| sanitize_role_assignments(black_box(&candidate)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sanitize);
criterion_main!(benches);
