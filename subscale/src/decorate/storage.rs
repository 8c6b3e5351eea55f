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

use super::Section;
use crate::{
	codec::engine,
	metadata::{StorageEntryMetadata, StorageEntryModifier, StorageEntryType},
	Codec, CodecInput, Error, Metadata, Registry, Value,
};
use heck::ToLowerCamelCase;
use sp_core::hashing::twox_128;

/// Key builder and value decoder for one storage item.
#[derive(Debug, Clone)]
pub struct StorageEntry<'r> {
	registry: &'r Registry,
	section: String,
	method: String,
	prefix: String,
	meta: StorageEntryMetadata,
	/// Well known keys are stored verbatim rather than hashed.
	raw_key: Option<&'static [u8]>,
}

impl<'r> StorageEntry<'r> {
	/// `twox128(prefix) ++ twox128(item)`, the common prefix of every key of this item.
	pub fn prefix_key(&self) -> Vec<u8> {
		match self.raw_key {
			Some(key) => key.to_vec(),
			None => [twox_128(self.prefix.as_bytes()), twox_128(self.meta.name.as_bytes())].concat(),
		}
	}

	/// The full key for `args`, one argument per map key.
	pub fn key(&self, args: &[Value]) -> Result<Vec<u8>, Error> {
		let (hashers, keys) = match &self.meta.ty {
			StorageEntryType::Plain(_) => (&[][..], &[][..]),
			StorageEntryType::Map { hashers, keys, .. } => (hashers.as_slice(), keys.as_slice()),
		};
		if args.len() != keys.len() || hashers.len() != keys.len() {
			return Err(Error::StorageArgs {
				section: self.section.clone(),
				method: self.method.clone(),
				expected: keys.len(),
				got: args.len(),
			});
		}
		let mut key = self.prefix_key();
		for ((hasher, ty), arg) in hashers.iter().zip(keys).zip(args) {
			let encoded = engine::encode(self.registry, &self.registry.resolve(ty)?, arg)?;
			key.extend(hasher.hash(&encoded));
		}
		log::trace!("{}.{} key: {}", self.section, self.method, hex::encode(&key));
		Ok(key)
	}

	pub fn is_map(&self) -> bool {
		matches!(self.meta.ty, StorageEntryType::Map { .. })
	}

	pub fn section(&self) -> &str {
		&self.section
	}

	pub fn method(&self) -> &str {
		&self.method
	}

	pub fn meta(&self) -> &StorageEntryMetadata {
		&self.meta
	}

	/// Decode a value read from storage.
	///
	/// Missing values of `Default` items decode the item's default; missing values of
	/// `Optional` items are `None`.
	pub fn decode_value(&self, data: Option<&[u8]>) -> Result<Option<Box<dyn Codec + 'r>>, Error> {
		let data = match (data, self.meta.modifier) {
			(Some(data), _) => data,
			(None, StorageEntryModifier::Default) => self.meta.default.as_slice(),
			(None, StorageEntryModifier::Optional) => return Ok(None),
		};
		self.registry.create_type(self.meta.ty.value(), CodecInput::Encoded(data)).map(Some)
	}
}

/// Keys the runtime stores outside of any module.
const WELL_KNOWN: &[(&str, &[u8], &str)] = &[
	("code", b":code", "Bytes"),
	("heapPages", b":heappages", "u64"),
	("extrinsicIndex", b":extrinsic_index", "u32"),
];

fn well_known<'r>(registry: &'r Registry) -> Section<StorageEntry<'r>> {
	let mut section = Section::new();
	for (name, key, ty) in WELL_KNOWN {
		section.insert(
			*name,
			StorageEntry {
				registry,
				section: "substrate".into(),
				method: name.to_string(),
				prefix: String::new(),
				meta: StorageEntryMetadata {
					name: name.to_string(),
					modifier: StorageEntryModifier::Optional,
					ty: StorageEntryType::Plain(ty.to_string()),
					default: Vec::new(),
					docs: Vec::new(),
				},
				raw_key: Some(*key),
			},
		);
	}
	section
}

/// Key builders for every storage item, keyed by section then item.
///
/// The `substrate` section holds the well known keys (`:code`, `:heappages`, ...).
pub fn decorate_storage<'r>(registry: &'r Registry, metadata: &Metadata) -> Section<Section<StorageEntry<'r>>> {
	let mut query = Section::new();
	query.insert("substrate", well_known(registry));
	for module in metadata.modules() {
		let storage = match &module.storage {
			Some(storage) => storage,
			None => continue,
		};
		let section_name = module.name.to_lower_camel_case();
		let mut section = Section::new();
		for item in storage.items.iter() {
			let method = item.name.to_lower_camel_case();
			section.insert(
				method.clone(),
				StorageEntry {
					registry,
					section: section_name.clone(),
					method,
					prefix: storage.prefix.clone(),
					meta: item.clone(),
					raw_key: None,
				},
			);
		}
		query.insert(section_name, section);
	}
	query
}
