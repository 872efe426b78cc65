//! Criterion benchmarks for the calculators.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use calcof_core::fraction::{decimal_to_fraction, simplify_fraction};
use calcof_core::loan::{calculate_loan, LoanInputs, PaymentFrequency};
use calcof_core::{CalculatorFactory, DefaultFactory, FormFields};

fn bench_fractions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fraction");
    group.bench_function("simplify", |b| {
        b.iter(|| simplify_fraction(std::hint::black_box(832_040), 1_346_269));
    });
    group.bench_function("decimal_to_fraction", |b| {
        b.iter(|| decimal_to_fraction(std::hint::black_box("0.123456")));
    });
    group.finish();
}

fn bench_loan(c: &mut Criterion) {
    let terms: Vec<u32> = vec![1, 5, 15, 30];

    let mut group = c.benchmark_group("LoanSchedule");
    for &term in &terms {
        let inputs = LoanInputs {
            loan_amount: 250_000.0,
            interest_rate: 6.5,
            loan_term: term,
            payment_frequency: PaymentFrequency::Monthly,
        };
        group.bench_with_input(BenchmarkId::from_parameter(term), &inputs, |b, inputs| {
            b.iter(|| calculate_loan(inputs));
        });
    }
    group.finish();
}

fn bench_registry(c: &mut Criterion) {
    let factory = DefaultFactory::new();
    let calc = factory.get("calorie").unwrap();
    let fields = FormFields::parse_pairs([
        "age=30",
        "gender=male",
        "weight=80",
        "height=180",
        "activityLevel=active",
        "goal=lose",
    ])
    .unwrap();

    c.bench_function("registry_calorie_fields", |b| {
        b.iter(|| calc.calculate_fields(&fields));
    });
}

criterion_group!(benches, bench_fractions, bench_loan, bench_registry);
criterion_main!(benches);
