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

//! Metadata v9. Hashers predate `Blake2_128Concat` and maps may be linked.

use super::{
	latest,
	legacy::{self, IntoLatestEntry, ModuleMetadata},
};
use codec::{Decode, Encode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum StorageHasher {
	Blake2_128,
	Blake2_256,
	Twox128,
	Twox256,
	Twox64Concat,
}

impl From<StorageHasher> for latest::StorageHasher {
	fn from(hasher: StorageHasher) -> Self {
		match hasher {
			StorageHasher::Blake2_128 => latest::StorageHasher::Blake2_128,
			StorageHasher::Blake2_256 => latest::StorageHasher::Blake2_256,
			StorageHasher::Twox128 => latest::StorageHasher::Twox128,
			StorageHasher::Twox256 => latest::StorageHasher::Twox256,
			StorageHasher::Twox64Concat => latest::StorageHasher::Twox64Concat,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum StorageEntryType {
	Plain(String),
	Map { hasher: StorageHasher, key: String, value: String, is_linked: bool },
	DoubleMap { hasher: StorageHasher, key1: String, key2: String, value: String, key2_hasher: StorageHasher },
}

impl IntoLatestEntry for StorageEntryType {
	fn into_latest(self) -> latest::StorageEntryType {
		match self {
			StorageEntryType::Plain(ty) => latest::StorageEntryType::Plain(ty),
			StorageEntryType::Map { hasher, key, value, is_linked } => {
				let value = if is_linked { legacy::linked_value(&key, &value) } else { value };
				latest::StorageEntryType::Map { hashers: vec![hasher.into()], keys: vec![key], value }
			}
			StorageEntryType::DoubleMap { hasher, key1, key2, value, key2_hasher } => latest::StorageEntryType::Map {
				hashers: vec![hasher.into(), key2_hasher.into()],
				keys: vec![key1, key2],
				value,
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct RuntimeMetadataV9 {
	pub modules: Vec<ModuleMetadata<StorageEntryType>>,
}

impl From<RuntimeMetadataV9> for latest::Metadata {
	fn from(metadata: RuntimeMetadataV9) -> Self {
		latest::Metadata {
			version: 9,
			modules: legacy::convert_modules(metadata.modules),
			extrinsic: latest::ExtrinsicMetadata::default(),
			types: Vec::new(),
		}
	}
}
