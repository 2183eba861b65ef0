// Copyright 2024-2025 Irreducible Inc.

use bytesize::ByteSize;

/// Read boolean flag from the environment variable.
pub fn boolean_env_flag_set(flag: &str) -> bool {
	match std::env::var(flag) {
		Ok(val) => ["1", "on", "ON", "true", "TRUE", "yes", "YES"].contains(&val.as_str()),
		Err(_) => false,
	}
}

/// Read a byte count such as `4096` or `4 MiB` from the environment variable.
///
/// Returns `None` when the variable is unset or malformed.
pub fn usize_env_var(name: &str) -> Option<usize> {
	let val = std::env::var(name).ok()?;
	let count = parse_byte_count(&val);
	if count.is_none() {
		tracing::warn!(name, value = %val, "ignoring malformed byte count");
	}
	count
}

fn parse_byte_count(val: &str) -> Option<usize> {
	let size = val.trim().parse::<ByteSize>().ok()?;
	usize::try_from(size.as_u64()).ok()
}
