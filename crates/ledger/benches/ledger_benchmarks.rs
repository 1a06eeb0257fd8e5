use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use std::sync::Arc;

use rust_decimal::Decimal;

use crestbank_core::{AccountNumber, AccountType, CustomerId};
use crestbank_ledger::{LedgerConfig, LedgerService};
use crestbank_store::{InMemoryAccountStore, InMemoryTransactionLog};

type BenchService = LedgerService<Arc<InMemoryAccountStore>, Arc<InMemoryTransactionLog>>;

fn setup() -> BenchService {
    LedgerService::new(
        Arc::new(InMemoryAccountStore::new()),
        Arc::new(InMemoryTransactionLog::new()),
        LedgerConfig::default(),
    )
}

fn open(service: &BenchService, balance: i64) -> AccountNumber {
    service
        .open_account(
            CustomerId::new("CUST0001"),
            AccountType::Checking,
            Some(Decimal::from(balance)),
        )
        .unwrap()
        .account_number
}

fn bench_deposit(c: &mut Criterion) {
    let mut group = c.benchmark_group("deposit");
    group.throughput(Throughput::Elements(1));
    group.bench_function("single_account", |b| {
        let service = setup();
        let account = open(&service, 0);
        b.iter(|| {
            service
                .deposit(black_box(&account), black_box(Decimal::ONE), "bench")
                .unwrap()
        });
    });
    group.finish();
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");
    group.throughput(Throughput::Elements(1));
    group.bench_function("uncontended_pair", |b| {
        let service = setup();
        // large enough that the debit never runs dry mid-run
        let from = open(&service, i64::MAX / 4);
        let to = open(&service, 0);
        b.iter(|| {
            service
                .transfer(
                    black_box(&from),
                    black_box(&to),
                    black_box(Decimal::from(10)),
                    "bench",
                )
                .unwrap()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_deposit, bench_transfer);
criterion_main!(benches);
