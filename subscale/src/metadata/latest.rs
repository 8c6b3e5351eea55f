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

//! The version independent shape every metadata version is converted into.

use sp_core::hashing::{blake2_128, blake2_256, twox_128, twox_256, twox_64};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
	pub(crate) version: u8,
	pub(crate) modules: Vec<ModuleMetadata>,
	pub(crate) extrinsic: ExtrinsicMetadata,
	/// Portable type definitions, keyed `Lookup{id}`. Only present from v14.
	pub(crate) types: Vec<(String, crate::TypeDef)>,
}

impl Default for Metadata {
	fn default() -> Self {
		Metadata { version: 9, modules: Vec::new(), extrinsic: ExtrinsicMetadata::default(), types: Vec::new() }
	}
}

impl Metadata {
	/// The schema version this metadata was decoded from.
	pub fn version(&self) -> u8 {
		self.version
	}

	pub fn modules(&self) -> &[ModuleMetadata] {
		&self.modules
	}

	pub fn extrinsic(&self) -> &ExtrinsicMetadata {
		&self.extrinsic
	}

	pub fn types(&self) -> &[(String, crate::TypeDef)] {
		&self.types
	}

	pub fn module(&self, name: &str) -> Option<&ModuleMetadata> {
		self.modules.iter().find(|m| m.name == name)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMetadata {
	pub name: String,
	/// Pallet index. Position in the module list before v12.
	pub index: u8,
	/// First byte of calls into this module, `None` for modules without calls.
	pub call_index: Option<u8>,
	pub storage: Option<StorageMetadata>,
	pub calls: Vec<CallMetadata>,
	pub events: Vec<EventMetadata>,
	pub constants: Vec<ConstantMetadata>,
	pub errors: Vec<ErrorMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageMetadata {
	pub prefix: String,
	pub items: Vec<StorageEntryMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntryMetadata {
	pub name: String,
	pub modifier: StorageEntryModifier,
	pub ty: StorageEntryType,
	pub default: Vec<u8>,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageEntryModifier {
	Optional,
	Default,
}

/// Plain values, or maps keyed by one or more hashed keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEntryType {
	Plain(String),
	Map { hashers: Vec<StorageHasher>, keys: Vec<String>, value: String },
}

impl StorageEntryType {
	/// Type name of the stored value.
	pub fn value(&self) -> &str {
		match self {
			StorageEntryType::Plain(value) | StorageEntryType::Map { value, .. } => value,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageHasher {
	Blake2_128,
	Blake2_256,
	Blake2_128Concat,
	Twox128,
	Twox256,
	Twox64Concat,
	Identity,
}

impl StorageHasher {
	/// Hash an encoded key. The `Concat` hashers and `Identity` keep the key itself readable.
	pub fn hash(&self, data: &[u8]) -> Vec<u8> {
		match self {
			StorageHasher::Blake2_128 => blake2_128(data).to_vec(),
			StorageHasher::Blake2_256 => blake2_256(data).to_vec(),
			StorageHasher::Blake2_128Concat => [&blake2_128(data)[..], data].concat(),
			StorageHasher::Twox128 => twox_128(data).to_vec(),
			StorageHasher::Twox256 => twox_256(data).to_vec(),
			StorageHasher::Twox64Concat => [&twox_64(data)[..], data].concat(),
			StorageHasher::Identity => data.to_vec(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMetadata {
	pub name: String,
	pub index: u8,
	pub args: Vec<CallArgMetadata>,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgMetadata {
	pub name: String,
	pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMetadata {
	pub name: String,
	pub index: u8,
	pub args: Vec<String>,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantMetadata {
	pub name: String,
	pub ty: String,
	pub value: Vec<u8>,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMetadata {
	pub name: String,
	pub index: u8,
	pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtrinsicMetadata {
	pub version: u8,
	pub signed_extensions: Vec<String>,
}

impl Default for ExtrinsicMetadata {
	fn default() -> Self {
		ExtrinsicMetadata { version: 4, signed_extensions: Vec::new() }
	}
}
