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

//! Metadata of a small node runtime, in the shapes of several metadata versions.

use codec::Encode;
use subscale::{
	metadata::{
		v10, v13, FunctionArgumentMetadata, FunctionMetadata, IndexedModuleMetadata, LegacyExtrinsicMetadata,
		LegacyModuleMetadata, LegacyStorageEntryMetadata, LegacyStorageEntryModifier, LegacyStorageMetadata,
		ModuleConstantMetadata, RuntimeMetadata,
	},
	MetadataVersioned, Registry,
};

pub const SIGNED_EXTENSIONS: &[&str] = &[
	"CheckSpecVersion",
	"CheckTxVersion",
	"CheckGenesis",
	"CheckMortality",
	"CheckNonce",
	"CheckWeight",
	"ChargeTransactionPayment",
];

fn call(name: &str, args: &[(&str, &str)]) -> FunctionMetadata {
	FunctionMetadata {
		name: name.into(),
		arguments: args.iter().map(|(n, t)| FunctionArgumentMetadata { name: n.to_string(), ty: t.to_string() }).collect(),
		documentation: Vec::new(),
	}
}

fn entry<E>(name: &str, modifier: LegacyStorageEntryModifier, ty: E, default: Vec<u8>) -> LegacyStorageEntryMetadata<E> {
	LegacyStorageEntryMetadata { name: name.into(), modifier, ty, default, documentation: Vec::new() }
}

fn constant(name: &str, ty: &str, value: Vec<u8>) -> ModuleConstantMetadata {
	ModuleConstantMetadata { name: name.into(), ty: ty.into(), value, documentation: Vec::new() }
}

/// System (0), Timestamp (3), Grandpa (4, no calls), Balances (5), Council (9).
pub fn node_v13() -> MetadataVersioned {
	use v13::{StorageEntryType, StorageHasher};
	let module = |name: &str, index: u8| IndexedModuleMetadata::<StorageEntryType> {
		name: name.into(),
		storage: None,
		calls: None,
		event: None,
		constants: Vec::new(),
		errors: Vec::new(),
		index,
	};
	let system = IndexedModuleMetadata {
		storage: Some(LegacyStorageMetadata {
			prefix: "System".into(),
			entries: vec![
				entry(
					"Account",
					LegacyStorageEntryModifier::Default,
					StorageEntryType::Map {
						hasher: StorageHasher::Blake2_128Concat,
						key: "T::AccountId".into(),
						value: "AccountInfo<T::Index, T::AccountData>".into(),
						unused: false,
					},
					vec![0; 80],
				),
				entry("Number", LegacyStorageEntryModifier::Default, StorageEntryType::Plain("T::BlockNumber".into()), vec![0; 4]),
				entry(
					"BlockHash",
					LegacyStorageEntryModifier::Default,
					StorageEntryType::Map {
						hasher: StorageHasher::Twox64Concat,
						key: "T::BlockNumber".into(),
						value: "T::Hash".into(),
						unused: false,
					},
					vec![0; 32],
				),
			],
		}),
		calls: Some(vec![call("remark", &[("_remark", "Vec<u8>")])]),
		constants: vec![constant("BlockHashCount", "T::BlockNumber", 2400u32.encode())],
		..module("System", 0)
	};
	let timestamp = IndexedModuleMetadata {
		storage: Some(LegacyStorageMetadata {
			prefix: "Timestamp".into(),
			entries: vec![entry("Now", LegacyStorageEntryModifier::Default, StorageEntryType::Plain("T::Moment".into()), vec![0; 8])],
		}),
		calls: Some(vec![call("set", &[("now", "Compact<T::Moment>")])]),
		constants: vec![constant("MinimumPeriod", "T::Moment", 3000u64.encode())],
		..module("Timestamp", 3)
	};
	let grandpa = module("Grandpa", 4);
	let balances = IndexedModuleMetadata {
		storage: Some(LegacyStorageMetadata {
			prefix: "Balances".into(),
			entries: vec![entry(
				"TotalIssuance",
				LegacyStorageEntryModifier::Default,
				StorageEntryType::Plain("T::Balance".into()),
				vec![0; 16],
			)],
		}),
		calls: Some(vec![
			call("transfer", &[("dest", "<T::Lookup as StaticLookup>::Source"), ("value", "Compact<T::Balance>")]),
			call("transfer_keep_alive", &[("dest", "<T::Lookup as StaticLookup>::Source"), ("value", "Compact<T::Balance>")]),
		]),
		constants: vec![constant("ExistentialDeposit", "T::Balance", 1_000_000_000_000u128.encode())],
		..module("Balances", 5)
	};
	let council = IndexedModuleMetadata {
		storage: Some(LegacyStorageMetadata {
			prefix: "Instance1Collective".into(),
			entries: vec![entry(
				"Members",
				LegacyStorageEntryModifier::Default,
				StorageEntryType::Plain("Vec<T::AccountId>".into()),
				vec![0],
			)],
		}),
		calls: Some(vec![call("set_members", &[("new_members", "Vec<T::AccountId>"), ("prime", "Option<T::AccountId>")])]),
		..module("Council", 9)
	};
	RuntimeMetadata::V13(v13::RuntimeMetadataV13 {
		modules: vec![system, timestamp, grandpa, balances, council],
		extrinsic: LegacyExtrinsicMetadata {
			version: 4,
			signed_extensions: SIGNED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
		},
	})
	.into()
}

/// The same runtime before explicit module indices, as v10.
pub fn node_v10() -> MetadataVersioned {
	use v10::{StorageEntryType, StorageHasher};
	let plain = |prefix: &str, name: &str, ty: &str, default: Vec<u8>| LegacyStorageMetadata {
		prefix: prefix.into(),
		entries: vec![entry(name, LegacyStorageEntryModifier::Default, StorageEntryType::Plain(ty.into()), default)],
	};
	let module = |name: &str, storage, calls, constants| LegacyModuleMetadata {
		name: name.to_string(),
		storage,
		calls,
		event: None,
		constants,
		errors: Vec::new(),
	};
	let mut system = plain("System", "Number", "T::BlockNumber", vec![0; 4]);
	system.entries.push(entry(
		"Account",
		LegacyStorageEntryModifier::Default,
		StorageEntryType::Map {
			hasher: StorageHasher::Blake2_128Concat,
			key: "T::AccountId".into(),
			value: "AccountInfo<T::Index, T::AccountData>".into(),
			is_linked: false,
		},
		vec![0; 80],
	));
	// Twox64Concat has no v9 counterpart, so this metadata cannot pass for v9
	system.entries.push(entry(
		"BlockHash",
		LegacyStorageEntryModifier::Default,
		StorageEntryType::Map {
			hasher: StorageHasher::Twox64Concat,
			key: "T::BlockNumber".into(),
			value: "T::Hash".into(),
			is_linked: false,
		},
		vec![0; 32],
	));
	RuntimeMetadata::V10(v10::RuntimeMetadataV10 {
		modules: vec![
			module("System", Some(system), Some(vec![call("remark", &[("_remark", "Vec<u8>")])]), Vec::new()),
			module("Grandpa", None, None, Vec::new()),
			module(
				"Timestamp",
				Some(plain("Timestamp", "Now", "T::Moment", vec![0; 8])),
				Some(vec![call("set", &[("now", "Compact<T::Moment>")])]),
				Vec::new(),
			),
		],
	})
	.into()
}

/// A registry loaded with [`node_v13`].
pub fn registry() -> Registry {
	let metadata = node_v13().as_latest().expect("fixture metadata converts");
	Registry::builder().spec_name("node").metadata(metadata).build().expect("fixture registry builds")
}
