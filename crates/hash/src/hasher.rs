// Copyright 2023-2025 Irreducible Inc.

use std::convert::Infallible;

use digest::{Digest, Reset};

/// Trait representing a streaming cryptographic hash function that can serve as the block and
/// outer hasher of a [`ContentHasher`](crate::ContentHasher).
///
/// This interface is largely based on the [`digest::Digest`] trait, except that absorbing data is
/// fallible and reading the digest does not consume or reset the accumulated state. Every
/// [`Digest`] that is also [`Clone`] and [`Reset`] implements it, which covers the RustCrypto
/// hashers.
pub trait BlockHasher {
	/// Failure reported by [`BlockHasher::update`].
	type Error: std::error::Error + Send + Sync + 'static;

	/// Length of the digest in bytes.
	fn output_size(&self) -> usize;

	/// Absorbs all of `data`, or none of it on failure.
	fn update(&mut self, data: &[u8]) -> Result<(), Self::Error>;

	/// Writes the digest of everything absorbed since the last reset into `out`.
	///
	/// `out` must be exactly [`BlockHasher::output_size`] bytes long. The hasher state is left
	/// untouched, so more data may be absorbed afterwards.
	fn digest_into(&self, out: &mut [u8]);

	/// Returns the hasher to its empty state.
	fn reset(&mut self);
}

impl<D: Digest + Clone + Reset> BlockHasher for D {
	type Error = Infallible;

	fn output_size(&self) -> usize {
		<D as Digest>::output_size()
	}

	fn update(&mut self, data: &[u8]) -> Result<(), Infallible> {
		Digest::update(self, data);
		Ok(())
	}

	fn digest_into(&self, out: &mut [u8]) {
		out.copy_from_slice(&self.clone().finalize());
	}

	fn reset(&mut self) {
		Digest::reset(self)
	}
}

#[cfg(test)]
mod tests {
	use hex_literal::hex;
	use sha2::Sha256;

	use super::*;

	#[test]
	fn test_digest_into_preserves_state() {
		let mut hasher = Sha256::new();
		BlockHasher::update(&mut hasher, b"ab").unwrap();

		let mut out = [0u8; 32];
		hasher.digest_into(&mut out);
		assert_eq!(out[..], Sha256::digest(b"ab")[..]);

		BlockHasher::update(&mut hasher, b"c").unwrap();
		hasher.digest_into(&mut out);
		assert_eq!(out, hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"));
	}

	#[test]
	fn test_reset() {
		let mut hasher = Sha256::new();
		BlockHasher::update(&mut hasher, b"discarded").unwrap();
		BlockHasher::reset(&mut hasher);

		let mut out = [0u8; 32];
		hasher.digest_into(&mut out);
		assert_eq!(out, hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"));
	}

	#[test]
	fn test_output_size() {
		assert_eq!(BlockHasher::output_size(&Sha256::new()), 32);
		assert_eq!(BlockHasher::output_size(&sha2::Sha512::new()), 64);
	}
}
