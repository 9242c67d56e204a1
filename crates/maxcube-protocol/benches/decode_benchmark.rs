//! Decoding throughput for configuration messages.
//!
//! ## Running the benchmarks
//!
//! ```bash
//! cargo bench -p maxcube-protocol
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use maxcube_protocol::{
    ConfigurationRecord, DEVICE_TYPE_HEATING_THERMOSTAT, DEVICE_TYPE_SHUTTER_CONTACT,
    DEVICE_TYPE_WALL_MOUNTED_THERMOSTAT, FULL_THERMOSTAT_MIN_LEN,
};

fn message(kind: u8, len: usize) -> String {
    let mut bytes = vec![0x45u8; len];
    bytes[0] = (len - 1) as u8;
    bytes[1..4].copy_from_slice(&[0x12, 0x34, 0x56]);
    bytes[4] = kind;
    bytes[8..18].copy_from_slice(b"KEQ0000000");
    format!("C:123456,{}", STANDARD.encode(&bytes))
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let cases = [
        ("shutter_contact", message(DEVICE_TYPE_SHUTTER_CONTACT, 20)),
        ("wall_thermostat", message(DEVICE_TYPE_WALL_MOUNTED_THERMOSTAT, 207)),
        ("heating_thermostat", message(DEVICE_TYPE_HEATING_THERMOSTAT, FULL_THERMOSTAT_MIN_LEN)),
    ];

    for (name, line) in cases.iter() {
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_with_input(BenchmarkId::new("from_message", name), line, |b, line| {
            b.iter(|| ConfigurationRecord::from_message(black_box(line)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
