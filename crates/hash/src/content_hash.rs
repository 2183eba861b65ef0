// Copyright 2025 Irreducible Inc.

use std::{cmp::min, fmt, io};

use sha2::Sha256;
use tracing::{debug, trace};

use crate::hasher::BlockHasher;

/// Block size used when the caller does not configure one, 4 MiB.
pub const DEFAULT_BLOCK_SIZE: usize = 1 << 22;

/// Error returned by [`ContentHasher::write`] when the underlying hasher fails.
#[derive(Debug, thiserror::Error)]
#[error("block hasher failed after consuming {consumed} bytes")]
pub struct WriteError<E> {
	/// Number of bytes consumed by the call before the failure.
	pub consumed: usize,
	#[source]
	pub source: E,
}

/// Hash of block hashes.
///
/// The input stream is split into blocks of [`ContentHasher::block_size`] bytes. Each block is
/// digested on its own by an inner hasher and the block digests are fed, in order, to an outer
/// hasher whose digest is the checksum. With SHA-256 and the default 4 MiB block size this
/// yields Dropbox's content hash.
///
/// The last block may be shorter than the block size. An input whose length is an exact
/// multiple of the block size is never followed by an extra empty block.
#[derive(Clone)]
pub struct ContentHasher<H = Sha256> {
	/// Sums the current block.
	inner: H,
	/// Sums the block digests.
	outer: H,
	/// Holds the digest of the block being finalized.
	scratch: Vec<u8>,
	block_size: usize,
	/// Invariant: `remaining <= block_size`.
	remaining: usize,
}

impl<H: BlockHasher + Default> ContentHasher<H> {
	/// Creates a hasher with `H`'s default state.
	///
	/// A `block_size` of zero selects [`DEFAULT_BLOCK_SIZE`].
	pub fn new(block_size: usize) -> Self {
		Self::with_factory(H::default, block_size)
	}
}

impl<H: BlockHasher> ContentHasher<H> {
	/// Creates a hasher whose inner and outer states are both produced by `factory`.
	///
	/// A `block_size` of zero selects [`DEFAULT_BLOCK_SIZE`].
	pub fn with_factory(mut factory: impl FnMut() -> H, block_size: usize) -> Self {
		let block_size = if block_size == 0 {
			debug!(block_size = DEFAULT_BLOCK_SIZE, "falling back to default block size");
			DEFAULT_BLOCK_SIZE
		} else {
			block_size
		};

		let inner = factory();
		let outer = factory();
		let scratch = vec![0; inner.output_size()];
		debug!(block_size, digest_size = scratch.len(), "created content hasher");

		Self {
			inner,
			outer,
			scratch,
			block_size,
			remaining: block_size,
		}
	}

	/// The configured block size in bytes.
	pub fn block_size(&self) -> usize {
		self.block_size
	}

	/// The checksum length in bytes.
	pub fn size(&self) -> usize {
		self.inner.output_size()
	}

	/// Appends `data` to the stream, closing a block every time it fills up.
	///
	/// Returns `data.len()`. On failure the state reflects exactly [`WriteError::consumed`] bytes
	/// of `data`. A block whose digest could not be handed to the outer hasher stays pending and
	/// is closed again by the next `write` or `sum`.
	pub fn write(&mut self, mut data: &[u8]) -> Result<usize, WriteError<H::Error>> {
		let mut consumed = 0;
		while !data.is_empty() {
			if self.remaining == 0 {
				self.complete_block()
					.map_err(|source| WriteError { consumed, source })?;
			}

			let len = min(data.len(), self.remaining);
			self.inner
				.update(&data[..len])
				.map_err(|source| WriteError { consumed, source })?;

			consumed += len;
			data = &data[len..];
			self.remaining -= len;

			if self.remaining == 0 {
				self.complete_block()
					.map_err(|source| WriteError { consumed, source })?;
			}
		}

		Ok(consumed)
	}

	/// Appends the checksum to `out`.
	///
	/// A partially filled block is closed first. Its unused capacity is NOT restored, so bytes
	/// written after this call only fill up what was left of that block before a new full-size
	/// block starts. Calling `sum` mid-stream therefore changes the block partition, and the
	/// final checksum, compared to writing everything before a single `sum`. For the same reason
	/// a second `sum` without intervening writes closes an empty block. Use [`Clone`] to take a
	/// checksum of a stream that will keep growing.
	pub fn sum_into(&mut self, out: &mut Vec<u8>) -> Result<(), H::Error> {
		if self.remaining == 0 {
			self.complete_block()?;
		} else if self.remaining != self.block_size {
			self.finalize_block(self.block_size - self.remaining)?;
		}

		let start = out.len();
		out.resize(start + self.outer.output_size(), 0);
		self.outer.digest_into(&mut out[start..]);
		Ok(())
	}

	/// Returns the checksum. See [`ContentHasher::sum_into`] for how this affects later writes.
	pub fn sum(&mut self) -> Result<Vec<u8>, H::Error> {
		let mut out = Vec::with_capacity(self.size());
		self.sum_into(&mut out)?;
		Ok(out)
	}

	/// Discards all written data. The configuration is kept.
	pub fn reset(&mut self) {
		self.inner.reset();
		self.outer.reset();
		self.remaining = self.block_size;
	}

	/// Closes a full block and starts the next one.
	fn complete_block(&mut self) -> Result<(), H::Error> {
		self.finalize_block(self.block_size)?;
		self.remaining = self.block_size;
		Ok(())
	}

	/// Feeds the digest of the current block to the outer hasher and clears the inner hasher.
	///
	/// The inner hasher keeps the block if the outer hasher fails.
	fn finalize_block(&mut self, block_len: usize) -> Result<(), H::Error> {
		self.inner.digest_into(&mut self.scratch);
		self.outer.update(&self.scratch)?;
		self.inner.reset();
		trace!(block_len, "finalized block");
		Ok(())
	}
}

impl<H: BlockHasher + Default> Default for ContentHasher<H> {
	fn default() -> Self {
		Self::new(DEFAULT_BLOCK_SIZE)
	}
}

impl<H: BlockHasher> fmt::Debug for ContentHasher<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContentHasher")
			.field("block_size", &self.block_size)
			.field("remaining", &self.remaining)
			.field("digest_size", &self.scratch.len())
			.finish_non_exhaustive()
	}
}

/// A failed write is reported as an error even when part of `buf` was consumed, since
/// [`io::Write`] cannot carry both. [`ContentHasher::write`] reports the consumed count.
impl<H: BlockHasher> io::Write for ContentHasher<H> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		ContentHasher::write(self, buf).map_err(io::Error::other)
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Computes the checksum of `data` with the default block size.
pub fn hash<H: BlockHasher + Default>(data: impl AsRef<[u8]>) -> Result<Vec<u8>, H::Error> {
	let mut hasher = ContentHasher::<H>::default();
	hasher
		.write(data.as_ref())
		.map_err(|WriteError { source, .. }| source)?;
	hasher.sum()
}
