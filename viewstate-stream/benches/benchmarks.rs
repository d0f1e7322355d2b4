// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregate_bench::bench_aggregate;
use criterion::{criterion_group, criterion_main};


criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
