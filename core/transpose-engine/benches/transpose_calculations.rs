//! FILENAME: benches/transpose_calculations.rs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use transpose_engine::{
    calculate_transpose, DataCell, DataRow, FieldDescriptor, PivotColumn, QueryResponse,
    TransposeConfig,
};

fn build_response(rows: usize, measures: usize, pivots: usize) -> QueryResponse {
    let mut response = QueryResponse::default();
    response.fields.dimension_like = vec![FieldDescriptor::new("d", "D")];
    response.fields.measure_like = (0..measures)
        .map(|m| FieldDescriptor::new(format!("m{}", m), format!("Measure {}", m)))
        .collect();
    response.pivots = (0..pivots)
        .map(|p| {
            let label = format!("Period {}", p);
            PivotColumn::new(format!("P{}", p)).with_value("period", label.as_str())
        })
        .collect();
    response.data = (0..rows)
        .map(|r| {
            let label = format!("row {}", r);
            let mut row = DataRow::new().with_dimension("d", DataCell::new(label.as_str()));
            for m in 0..measures {
                row = row.with_measure(
                    format!("m{}", m),
                    (0..pivots)
                        .map(|p| (format!("P{}", p), DataCell::new((r + m + p + 1) as f64))),
                );
            }
            row
        })
        .collect();
    response
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");
    for rows in [100usize, 1_000, 10_000] {
        let response = build_response(rows, 8, 4);

        group.bench_with_input(BenchmarkId::new("raw", rows), &response, |b, response| {
            let config = TransposeConfig::default();
            b.iter(|| calculate_transpose(black_box(response), black_box(&config)))
        });

        let id = BenchmarkId::new("delta_grouped", rows);
        group.bench_with_input(id, &response, |b, response| {
            let config = TransposeConfig {
                pivots_as_delta: true,
                color_deltas: true,
                measure_sort_first: true,
                ..TransposeConfig::default()
            };
            b.iter(|| calculate_transpose(black_box(response), black_box(&config)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transpose);
criterion_main!(benches);
