// Copyright 2023-2025 Irreducible Inc.

//! Hash of block hashes: a streaming checksum that digests fixed-size blocks independently and
//! then digests the sequence of block digests.

pub mod content_hash;
pub mod hasher;

pub use content_hash::*;
pub use digest::{self, Digest};
pub use hasher::*;
pub use sha2::Sha256;
