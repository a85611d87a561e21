use bank_ledger::core::account_number::RandomAccountNumbers;
use bank_ledger::storage::JsonStorage;
use bank_ledger::AccountStore;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;

fn seeded_store(path: &std::path::Path, accounts: usize) -> (AccountStore, String) {
    let mut store = AccountStore::with_backend(
        Box::new(JsonStorage::new(path)),
        Box::new(RandomAccountNumbers::seeded(7)),
    );
    let mut last = String::new();
    for idx in 0..accounts {
        last = store
            .create_account(&format!("Holder {idx}"), 30, "holder@example.com", "1234")
            .expect("create account")
            .account_number;
    }
    (store, last)
}

fn bench_store_cycle(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bank_data.json");
    let (mut store, number) = seeded_store(&path, 1_000);

    c.bench_function("deposit_withdraw_1k_accounts", |b| {
        b.iter(|| {
            store
                .deposit(black_box(&number), "1234", 25.0)
                .expect("deposit");
            store
                .withdraw(black_box(&number), "1234", 25.0)
                .expect("withdraw");
        })
    });

    c.bench_function("create_account_1k_accounts", |b| {
        b.iter(|| {
            let account = store
                .create_account("Bench", 40, "bench@example.com", "4321")
                .expect("create account");
            store
                .delete_account(&account.account_number, "4321")
                .expect("delete account");
        })
    });

    c.bench_function("summaries_1k_accounts", |b| {
        b.iter(|| black_box(store.summaries()))
    });
}

criterion_group!(benches, bench_store_cycle);
criterion_main!(benches);
