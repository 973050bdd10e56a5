use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use invoicedesk_invoicing::{FormMode, RawForm, validate};

fn valid_form() -> RawForm {
    RawForm::new()
        .with("customerId", "3958dc9e-712f-4377-85e9-fec4b6a6442a")
        .with("amount", "1234.56")
        .with("status", "pending")
}

fn invalid_form() -> RawForm {
    RawForm::new()
        .with("customerId", "")
        .with("amount", "-5")
        .with("status", "overdue")
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for (name, form, mode) in [
        ("create_valid", valid_form(), FormMode::Create),
        ("create_all_invalid", invalid_form(), FormMode::Create),
        ("edit_valid", valid_form().with("id", "inv-1"), FormMode::Edit),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(form, mode), |b, (form, mode)| {
            b.iter(|| validate(black_box(form), *mode))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
