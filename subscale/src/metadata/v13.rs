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

//! Metadata v13. Adds storage maps keyed by any number of keys.

pub use super::v11::StorageHasher;

use super::{
	latest,
	legacy::{self, ExtrinsicMetadata, IndexedModuleMetadata, IntoLatestEntry},
};
use codec::{Decode, Encode};

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum StorageEntryType {
	Plain(String),
	Map { hasher: StorageHasher, key: String, value: String, unused: bool },
	DoubleMap { hasher: StorageHasher, key1: String, key2: String, value: String, key2_hasher: StorageHasher },
	NMap { keys: Vec<String>, hashers: Vec<StorageHasher>, value: String },
}

impl IntoLatestEntry for StorageEntryType {
	fn into_latest(self) -> latest::StorageEntryType {
		match self {
			StorageEntryType::Plain(ty) => latest::StorageEntryType::Plain(ty),
			StorageEntryType::Map { hasher, key, value, .. } => {
				latest::StorageEntryType::Map { hashers: vec![hasher.into()], keys: vec![key], value }
			}
			StorageEntryType::DoubleMap { hasher, key1, key2, value, key2_hasher } => latest::StorageEntryType::Map {
				hashers: vec![hasher.into(), key2_hasher.into()],
				keys: vec![key1, key2],
				value,
			},
			StorageEntryType::NMap { keys, hashers, value } => {
				latest::StorageEntryType::Map { hashers: hashers.into_iter().map(Into::into).collect(), keys, value }
			}
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct RuntimeMetadataV13 {
	pub modules: Vec<IndexedModuleMetadata<StorageEntryType>>,
	pub extrinsic: ExtrinsicMetadata,
}

impl From<RuntimeMetadataV13> for latest::Metadata {
	fn from(metadata: RuntimeMetadataV13) -> Self {
		latest::Metadata {
			version: 13,
			modules: legacy::convert_modules(metadata.modules),
			extrinsic: metadata.extrinsic.into(),
			types: Vec::new(),
		}
	}
}
