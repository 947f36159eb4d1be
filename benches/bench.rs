// Copyright 2022 houseme
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flakeid::{encoding, IdGenerator, Snowflake, StringIdGenerator, WideSnowflake};

fn bench_next_id(c: &mut Criterion) {
    let sf = Snowflake::new().expect("Could not create Snowflake");
    c.bench_function("snowflake_next_id", |b| {
        b.iter(|| sf.next_id());
    });
}

fn bench_wide_next_id(c: &mut Criterion) {
    let sf = WideSnowflake::new().expect("Could not create WideSnowflake");
    c.bench_function("wide_snowflake_next_id", |b| {
        b.iter(|| sf.next_id());
    });
}

fn bench_base32(c: &mut Criterion) {
    let ids = StringIdGenerator::with_encoder(
        Snowflake::new().expect("Could not create Snowflake"),
        encoding::base32_padded,
    );
    c.bench_function("base32_string_id", |b| {
        b.iter(|| ids.generate());
    });
    c.bench_function("encode32", |b| {
        b.iter(|| encoding::encode32(black_box(0x7FFF_FFFF_FFFF_FFFF), true));
    });
}

criterion_group!(snowflake_perf, bench_next_id, bench_wide_next_id, bench_base32);
criterion_main!(snowflake_perf);
