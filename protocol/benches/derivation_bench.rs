// Program-address derivation benchmarks.
//
// Covers the canonical bump search, single-bump verification, and the
// associated token address lookup used on every token vault operation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use timelock_protocol::config::TIMELOCK_PROGRAM_ID;
use timelock_protocol::token::get_associated_token_address;
use timelock_protocol::{create_program_address, find_program_address, Address};

fn bench_find_program_address(c: &mut Criterion) {
    let owner = Address::new_unique();
    let amount = 100_000_000u64.to_le_bytes();
    let unlock = 1_700_000_060i64.to_le_bytes();
    let seeds: [&[u8]; 4] = [b"vault", owner.as_ref(), &amount, &unlock];

    c.bench_function("derivation/find_program_address", |b| {
        b.iter(|| find_program_address(black_box(&seeds), &TIMELOCK_PROGRAM_ID));
    });
}

fn bench_create_program_address(c: &mut Criterion) {
    let owner = Address::new_unique();
    let amount = 100_000_000u64.to_le_bytes();
    let unlock = 1_700_000_060i64.to_le_bytes();
    let seeds: [&[u8]; 4] = [b"vault", owner.as_ref(), &amount, &unlock];
    let (_, bump) = find_program_address(&seeds, &TIMELOCK_PROGRAM_ID).unwrap();
    let bump_seed = [bump];
    let with_bump: [&[u8]; 5] = [b"vault", owner.as_ref(), &amount, &unlock, &bump_seed];

    c.bench_function("derivation/create_program_address", |b| {
        b.iter(|| create_program_address(black_box(&with_bump), &TIMELOCK_PROGRAM_ID));
    });
}

fn bench_seed_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation/seed_count");
    let seed = [0xabu8; 32];

    for count in [1usize, 4, 8, 15] {
        let seeds: Vec<&[u8]> = vec![&seed[..]; count];
        group.bench_with_input(BenchmarkId::from_parameter(count), &seeds, |b, seeds| {
            b.iter(|| find_program_address(black_box(seeds), &TIMELOCK_PROGRAM_ID));
        });
    }

    group.finish();
}

fn bench_associated_token_address(c: &mut Criterion) {
    let wallet = Address::new_unique();
    let mint = Address::new_unique();

    c.bench_function("derivation/associated_token_address", |b| {
        b.iter(|| get_associated_token_address(black_box(&wallet), black_box(&mint)));
    });
}

criterion_group!(
    benches,
    bench_find_program_address,
    bench_create_program_address,
    bench_seed_count,
    bench_associated_token_address,
);
criterion_main!(benches);
