// Copyright 2024-2025 Irreducible Inc.

use content_hash::{ContentHasher, Digest, Sha256, DEFAULT_BLOCK_SIZE};
use content_hash_utils::{
	env::{boolean_env_flag_set, usize_env_var},
	tracing::init_tracing,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{thread_rng, RngCore};

fn bench_content_hash(c: &mut Criterion) {
	if boolean_env_flag_set("CONTENT_HASH_TRACE") {
		init_tracing();
	}

	let mut group = c.benchmark_group("ContentHash");

	let mut rng = thread_rng();

	const N: usize = 1 << 24;
	let mut data = vec![0u8; N];
	rng.fill_bytes(&mut data);
	group.throughput(Throughput::Bytes(N as u64));

	group.bench_function("Sha256", |bench| bench.iter(|| Sha256::digest(&data)));

	let block_sizes = match usize_env_var("CONTENT_HASH_BLOCK_SIZE") {
		Some(block_size) => vec![block_size],
		None => vec![1 << 16, 1 << 20, DEFAULT_BLOCK_SIZE],
	};
	for block_size in block_sizes {
		group.bench_with_input(
			BenchmarkId::new("ContentHasher<Sha256>", block_size),
			&block_size,
			|bench, &block_size| {
				bench.iter(|| {
					let mut hasher = ContentHasher::<Sha256>::new(block_size);
					hasher.write(&data).expect("Sha256 never fails");
					hasher.sum().expect("Sha256 never fails")
				})
			},
		);
	}

	group.finish()
}

criterion_group!(hash, bench_content_hash);
criterion_main!(hash);
