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

//! Schema pieces shared by the pre-v14 metadata versions.
//!
//! Type names in these versions are plain strings, so every shape is an owned
//! struct decoded straight from the wire. Only storage hashers, storage entry
//! types and the module layout change from one version to the next.

use super::latest;
use codec::{Decode, Encode};

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct StorageMetadata<E> {
	pub prefix: String,
	pub entries: Vec<StorageEntryMetadata<E>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct StorageEntryMetadata<E> {
	pub name: String,
	pub modifier: StorageEntryModifier,
	pub ty: E,
	pub default: Vec<u8>,
	pub documentation: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum StorageEntryModifier {
	Optional,
	Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct FunctionMetadata {
	pub name: String,
	pub arguments: Vec<FunctionArgumentMetadata>,
	pub documentation: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct FunctionArgumentMetadata {
	pub name: String,
	pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct EventMetadata {
	pub name: String,
	pub arguments: Vec<String>,
	pub documentation: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ModuleConstantMetadata {
	pub name: String,
	pub ty: String,
	pub value: Vec<u8>,
	pub documentation: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ErrorMetadata {
	pub name: String,
	pub documentation: Vec<String>,
}

/// Modules up to v11, indexed by their position.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ModuleMetadata<E> {
	pub name: String,
	pub storage: Option<StorageMetadata<E>>,
	pub calls: Option<Vec<FunctionMetadata>>,
	pub event: Option<Vec<EventMetadata>>,
	pub constants: Vec<ModuleConstantMetadata>,
	pub errors: Vec<ErrorMetadata>,
}

/// Modules from v12, carrying an explicit index.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct IndexedModuleMetadata<E> {
	pub name: String,
	pub storage: Option<StorageMetadata<E>>,
	pub calls: Option<Vec<FunctionMetadata>>,
	pub event: Option<Vec<EventMetadata>>,
	pub constants: Vec<ModuleConstantMetadata>,
	pub errors: Vec<ErrorMetadata>,
	pub index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct ExtrinsicMetadata {
	pub version: u8,
	pub signed_extensions: Vec<String>,
}

/// Storage entry types of each version convert into the normalized form.
pub trait IntoLatestEntry {
	fn into_latest(self) -> latest::StorageEntryType;
}

impl From<StorageEntryModifier> for latest::StorageEntryModifier {
	fn from(modifier: StorageEntryModifier) -> Self {
		match modifier {
			StorageEntryModifier::Optional => latest::StorageEntryModifier::Optional,
			StorageEntryModifier::Default => latest::StorageEntryModifier::Default,
		}
	}
}

impl From<ExtrinsicMetadata> for latest::ExtrinsicMetadata {
	fn from(extrinsic: ExtrinsicMetadata) -> Self {
		latest::ExtrinsicMetadata { version: extrinsic.version, signed_extensions: extrinsic.signed_extensions }
	}
}

/// Value type of a linked map, which stores the neighbouring keys next to the value.
pub fn linked_value(key: &str, value: &str) -> String {
	format!("({}, (Option<{}>, Option<{}>))", value, key, key)
}

/// A module in normalized form, before its pallet and call indices are known.
pub struct LegacyModule<E> {
	pub name: String,
	pub storage: Option<StorageMetadata<E>>,
	pub calls: Option<Vec<FunctionMetadata>>,
	pub event: Option<Vec<EventMetadata>>,
	pub constants: Vec<ModuleConstantMetadata>,
	pub errors: Vec<ErrorMetadata>,
	pub index: Option<u8>,
}

/// Module layouts of the different versions.
pub trait IntoLegacyModule {
	type Entry: IntoLatestEntry;

	fn into_module(self) -> LegacyModule<Self::Entry>;
}

impl<E: IntoLatestEntry> IntoLegacyModule for ModuleMetadata<E> {
	type Entry = E;

	fn into_module(self) -> LegacyModule<E> {
		LegacyModule {
			name: self.name,
			storage: self.storage,
			calls: self.calls,
			event: self.event,
			constants: self.constants,
			errors: self.errors,
			index: None,
		}
	}
}

impl<E: IntoLatestEntry> IntoLegacyModule for IndexedModuleMetadata<E> {
	type Entry = E;

	fn into_module(self) -> LegacyModule<E> {
		LegacyModule {
			name: self.name,
			storage: self.storage,
			calls: self.calls,
			event: self.event,
			constants: self.constants,
			errors: self.errors,
			index: Some(self.index),
		}
	}
}

fn position(i: usize) -> u8 {
	u8::try_from(i).unwrap_or(u8::MAX)
}

/// Normalize the modules of any pre-v14 version.
///
/// Without explicit indices, a module's index is its position in the list and its
/// call index its position among the modules that have calls.
pub fn convert_modules<M: IntoLegacyModule>(modules: Vec<M>) -> Vec<latest::ModuleMetadata> {
	let mut with_calls = 0;
	modules
		.into_iter()
		.enumerate()
		.map(|(i, module)| {
			let module = module.into_module();
			let has_calls = module.calls.is_some();
			let call_index = match (has_calls, module.index) {
				(false, _) => None,
				(true, Some(index)) => Some(index),
				(true, None) => {
					let index = position(with_calls);
					with_calls += 1;
					Some(index)
				}
			};
			convert_module(module, position(i), call_index)
		})
		.collect()
}

fn convert_module<E: IntoLatestEntry>(module: LegacyModule<E>, list_index: u8, call_index: Option<u8>) -> latest::ModuleMetadata {
	let storage = module.storage.map(|s| latest::StorageMetadata {
		prefix: s.prefix,
		items: s
			.entries
			.into_iter()
			.map(|e| latest::StorageEntryMetadata {
				name: e.name,
				modifier: e.modifier.into(),
				ty: e.ty.into_latest(),
				default: e.default,
				docs: e.documentation,
			})
			.collect(),
	});
	let calls = module
		.calls
		.unwrap_or_default()
		.into_iter()
		.enumerate()
		.map(|(i, call)| latest::CallMetadata {
			name: call.name,
			index: position(i),
			args: call.arguments.into_iter().map(|a| latest::CallArgMetadata { name: a.name, ty: a.ty }).collect(),
			docs: call.documentation,
		})
		.collect();
	let events = module
		.event
		.unwrap_or_default()
		.into_iter()
		.enumerate()
		.map(|(i, event)| latest::EventMetadata {
			name: event.name,
			index: position(i),
			args: event.arguments,
			docs: event.documentation,
		})
		.collect();
	let constants = module
		.constants
		.into_iter()
		.map(|c| latest::ConstantMetadata { name: c.name, ty: c.ty, value: c.value, docs: c.documentation })
		.collect();
	let errors = module
		.errors
		.into_iter()
		.enumerate()
		.map(|(i, e)| latest::ErrorMetadata { name: e.name, index: position(i), docs: e.documentation })
		.collect();
	latest::ModuleMetadata {
		name: module.name,
		index: module.index.unwrap_or(list_index),
		call_index,
		storage,
		calls,
		events,
		constants,
		errors,
	}
}
