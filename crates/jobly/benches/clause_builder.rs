use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jobly::{
    COMPANY_COLUMNS, COMPANY_FILTERS, ColumnMap, Fields, JOB_FILTERS, sql_for_filter,
    sql_for_partial_update,
};

/// An update payload with `n` fields, none of them known to the column table:
/// `{"field0": 0, "field1": 1, ...}`
fn build_payload(n: usize) -> Fields {
    (0..n).map(|i| (format!("field{i}"), i as i64)).collect()
}

fn bench_partial_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("clause_builder/partial_update");
    let columns = ColumnMap::new(&[]);

    for n in [1, 5, 10, 50, 100] {
        let payload = build_payload(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &payload, |b, payload| {
            b.iter(|| black_box(sql_for_partial_update(payload, &columns)));
        });
    }

    group.finish();
}

fn bench_company_update(c: &mut Criterion) {
    let payload = Fields::new()
        .with("name", "New Name")
        .with("description", "New Description")
        .with("numEmployees", 250)
        .with("logoUrl", "http://new.img");

    c.bench_function("clause_builder/company_update", |b| {
        b.iter(|| black_box(sql_for_partial_update(&payload, &COMPANY_COLUMNS)));
    });
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("clause_builder/filter");

    let company = Fields::from_pairs([
        ("name", "Net"),
        ("minEmployees", "100"),
        ("maxEmployees", "1000"),
    ]);
    group.bench_function("company", |b| {
        b.iter(|| black_box(sql_for_filter(&company, &COMPANY_FILTERS)));
    });

    let job = Fields::from_pairs([("title", "Engineer"), ("minSalary", "50000"), ("hasEquity", "true")]);
    group.bench_function("job", |b| {
        b.iter(|| black_box(sql_for_filter(&job, &JOB_FILTERS)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_partial_update,
    bench_company_update,
    bench_filters
);
criterion_main!(benches);
