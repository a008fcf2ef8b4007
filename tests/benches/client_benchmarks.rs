//! # ResumeChain Client Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | rc-08 Content Store | Stable JSON digest of a resume document |
//! | shared-types | Handle parsing and canonical form |
//! | rc-04 Ledger Scanner | Full scan over an in-memory ledger |
//! | rc-07 Ledger RPC | Record decoding |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rc_04_ledger_scanner::{LedgerScanner, ScanFilter, ScannerConfig};
use rc_07_ledger_rpc::codec::decode_record;
use rc_08_content_store::{hash_json_stable, stable_json};
use serde_json::json;
use shared_types::abi::{address_word, bool_word, u64_word};
use shared_types::{Address, Handle, MockLedger, Record};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// rc-08: Content digests
// ============================================================================

fn bench_stable_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("rc-08-stable-json");

    for skills in [4usize, 32, 256] {
        let doc = json!({
            "basic": { "name": "Ada", "title": "Engineer", "location": "London" },
            "skills": (0..skills).map(|i| format!("skill-{i}")).collect::<Vec<_>>(),
            "about": "Analytical engines and the notes on them",
            "fileCid": "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
        });
        group.throughput(Throughput::Elements(skills as u64));
        group.bench_with_input(BenchmarkId::new("stable_json", skills), &doc, |b, doc| {
            b.iter(|| black_box(stable_json(doc)))
        });
        group.bench_with_input(BenchmarkId::new("hash_json_stable", skills), &doc, |b, doc| {
            b.iter(|| black_box(hash_json_stable(doc)))
        });
    }

    group.finish();
}

// ============================================================================
// shared-types: Handles
// ============================================================================

fn bench_handle_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-handles");
    let inputs = [
        ("hex", format!("0x{}", "ab".repeat(32))),
        ("short_hex", "0x1f".to_string()),
        ("decimal", "115792089237316195423570985008687907853269984665640564039457".to_string()),
    ];

    for (name, raw) in &inputs {
        group.bench_with_input(BenchmarkId::new("parse", name), raw, |b, raw| {
            b.iter(|| black_box(Handle::parse(raw).ok()))
        });
    }

    let handle = Handle([0x5a; 32]);
    group.bench_function("canonical_hex", |b| b.iter(|| black_box(handle.canonical_hex())));
    group.finish();
}

// ============================================================================
// rc-04: Scanning
// ============================================================================

fn bench_ledger_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("rc-04-ledger-scan");
    group.measurement_time(Duration::from_secs(5));

    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let owner = Address::new([0x11; 20]);

    for size in [16u64, 128, 1024] {
        let ledger = Arc::new(MockLedger::new(Address::new([0xcc; 20]), owner));
        for id in 1..=size {
            ledger.insert_record(Record {
                id,
                owner: if id % 3 == 0 { owner } else { Address::new([0x22; 20]) },
                content_hash: shared_types::keccak256(&id.to_be_bytes()),
                is_public: id % 2 == 0,
                created_at: id,
                updated_at: id,
                caller_access: Handle::NULL,
            });
        }

        for concurrency in [1usize, 8] {
            let scanner = LedgerScanner::new(
                ledger.clone(),
                ScannerConfig {
                    max_concurrent_reads: concurrency,
                },
            );
            group.throughput(Throughput::Elements(size));
            group.bench_with_input(
                BenchmarkId::new(format!("public_c{concurrency}"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        runtime
                            .block_on(scanner.scan(ScanFilter::Public, None))
                            .map(|(records, _)| black_box(records.len()))
                    })
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// rc-07: ABI decoding
// ============================================================================

fn bench_record_decoding(c: &mut Criterion) {
    let mut data = Vec::with_capacity(6 * 32);
    data.extend_from_slice(&address_word(&Address::new([0x11; 20])));
    data.extend_from_slice(&[0xab; 32]);
    data.extend_from_slice(&bool_word(true));
    data.extend_from_slice(&u64_word(1_700_000_000));
    data.extend_from_slice(&u64_word(1_700_000_100));
    data.extend_from_slice(&[0x5a; 32]);

    c.bench_function("rc-07-decode-record", |b| {
        b.iter(|| black_box(decode_record(7, &data).ok()))
    });
}

criterion_group!(
    benches,
    bench_stable_json,
    bench_handle_parsing,
    bench_ledger_scan,
    bench_record_decoding,
);

criterion_main!(benches);
