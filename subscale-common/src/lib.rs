// Copyright 2019-2023 Parity Technologies (UK) Ltd.
// This file is part of subscale.
//
// subscale is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// subscale is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with subscale.  If not, see <http://www.gnu.org/licenses/>.

//! Common types between the subscale crates.

#![forbid(unsafe_code)]

pub use sp_core::H256;

/// Spec Version type defined in the runtime of a chain.
pub type SpecVersion = u32;

/// Digest produced by a [`HashFn`].
pub type Hash = H256;

/// A hash function over SCALE encoded bytes.
///
/// Registries are configured with one of these; every value constructed against
/// a registry hashes its encoding through it.
pub type HashFn = fn(&[u8]) -> Hash;

/// The hasher Substrate chains use for block and extrinsic hashes.
pub fn blake2_256(data: &[u8]) -> Hash {
	H256(sp_core::blake2_256(data))
}
