// Copyright 2023-2025 Irreducible Inc.

/// Installs a global subscriber printing events to stderr, filtered by `RUST_LOG`.
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing() {
	use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

	let _ = tracing_subscriber::registry()
		.with(EnvFilter::from_default_env())
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.try_init();
}
