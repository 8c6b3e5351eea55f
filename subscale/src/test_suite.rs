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

//! Metadata fixtures for unit tests.
//!
//! The legacy fixtures mimic an early Substrate node template; the v14 fixture is
//! generated from `scale-info` descriptions of a few stand-in runtime types.

use crate::metadata::{
	v10, v11, v12, v9, FunctionArgumentMetadata, FunctionMetadata, IndexedModuleMetadata, LegacyErrorMetadata,
	LegacyExtrinsicMetadata,
	LegacyModuleMetadata, LegacyStorageEntryMetadata, LegacyStorageEntryModifier, LegacyStorageMetadata, MetadataVersioned,
	ModuleConstantMetadata, RuntimeMetadata,
};
use codec::Encode;

fn call(name: &str, args: &[(&str, &str)]) -> FunctionMetadata {
	FunctionMetadata {
		name: name.into(),
		arguments: args.iter().map(|(n, t)| FunctionArgumentMetadata { name: n.to_string(), ty: t.to_string() }).collect(),
		documentation: vec![format!(" The `{}` call.", name)],
	}
}

fn entry<E>(name: &str, modifier: LegacyStorageEntryModifier, ty: E, default: Vec<u8>) -> LegacyStorageEntryMetadata<E> {
	LegacyStorageEntryMetadata { name: name.into(), modifier, ty, default, documentation: Vec::new() }
}

fn constant(name: &str, ty: &str, value: Vec<u8>) -> ModuleConstantMetadata {
	ModuleConstantMetadata { name: name.into(), ty: ty.into(), value, documentation: Vec::new() }
}

fn module<E>(
	name: &str,
	storage: Option<LegacyStorageMetadata<E>>,
	calls: Option<Vec<FunctionMetadata>>,
	constants: Vec<ModuleConstantMetadata>,
) -> LegacyModuleMetadata<E> {
	LegacyModuleMetadata { name: name.into(), storage, calls, event: None, constants, errors: Vec::new() }
}

pub fn v10_modules() -> Vec<LegacyModuleMetadata<v10::StorageEntryType>> {
	use v10::{StorageEntryType, StorageHasher};
	vec![
		module(
			"System",
			Some(LegacyStorageMetadata {
				prefix: "System".into(),
				entries: vec![
					entry(
						"Account",
						LegacyStorageEntryModifier::Default,
						StorageEntryType::Map {
							hasher: StorageHasher::Blake2_128Concat,
							key: "T::AccountId".into(),
							value: "AccountInfo".into(),
							is_linked: false,
						},
						vec![0; 80],
					),
					entry("Number", LegacyStorageEntryModifier::Default, StorageEntryType::Plain("T::BlockNumber".into()), vec![0; 4]),
				],
			}),
			Some(vec![call("remark", &[("_remark", "Vec<u8>")])]),
			vec![constant("BlockHashCount", "T::BlockNumber", 250u32.encode())],
		),
		module("Timestamp", None, Some(vec![call("set", &[("now", "Compact<T::Moment>")])]), Vec::new()),
		module("Aura", None, None, Vec::new()),
		module(
			"Balances",
			Some(LegacyStorageMetadata {
				prefix: "Balances".into(),
				entries: vec![entry(
					"Locks",
					LegacyStorageEntryModifier::Optional,
					StorageEntryType::Map {
						hasher: StorageHasher::Twox64Concat,
						key: "T::AccountId".into(),
						value: "Vec<u8>".into(),
						is_linked: true,
					},
					Vec::new(),
				)],
			}),
			Some(vec![
				call("transfer", &[("dest", "<T::Lookup as StaticLookup>::Source"), ("value", "Compact<T::Balance>")]),
				call("set_balance", &[("who", "<T::Lookup as StaticLookup>::Source"), ("new_free", "Compact<T::Balance>")]),
			]),
			vec![constant("ExistentialDeposit", "T::Balance", 500u128.encode())],
		),
	]
}

/// v10 metadata. Its `Twox64Concat` hasher does not exist in v9.
pub fn metadata_v10() -> MetadataVersioned {
	RuntimeMetadata::V10(v10::RuntimeMetadataV10 { modules: v10_modules() }).into()
}

pub fn metadata_v9() -> MetadataVersioned {
	use v9::StorageEntryType;
	let storage = LegacyStorageMetadata {
		prefix: "Timestamp".into(),
		entries: vec![entry("Now", LegacyStorageEntryModifier::Default, StorageEntryType::Plain("T::Moment".into()), vec![0; 8])],
	};
	let mut timestamp =
		module("Timestamp", Some(storage), Some(vec![call("set", &[("now", "Compact<T::Moment>")])]), Vec::new());
	timestamp.errors = vec![LegacyErrorMetadata { name: "TooEarly".into(), documentation: Vec::new() }];
	RuntimeMetadata::V9(v9::RuntimeMetadataV9 { modules: vec![timestamp] }).into()
}

pub fn metadata_v12() -> MetadataVersioned {
	let indexed = |name: &str, index: u8, calls: Option<Vec<FunctionMetadata>>| IndexedModuleMetadata::<v11::StorageEntryType> {
		name: name.into(),
		storage: None,
		calls,
		event: None,
		constants: Vec::new(),
		errors: Vec::new(),
		index,
	};
	RuntimeMetadata::V12(v12::RuntimeMetadataV12 {
		modules: vec![
			indexed("System", 0, Some(vec![call("remark", &[("_remark", "Vec<u8>")])])),
			indexed("Timestamp", 3, Some(vec![call("set", &[("now", "Compact<T::Moment>")])])),
			indexed("Aura", 4, None),
			indexed(
				"Balances",
				5,
				Some(vec![call("transfer", &[("dest", "<T::Lookup as StaticLookup>::Source"), ("value", "Compact<T::Balance>")])]),
			),
		],
		extrinsic: LegacyExtrinsicMetadata {
			version: 4,
			signed_extensions: vec!["CheckSpecVersion".into(), "CheckNonce".into()],
		},
	})
	.into()
}

#[allow(dead_code, non_camel_case_types)]
mod runtime {
	use scale_info::TypeInfo;
	use std::marker::PhantomData;

	#[derive(TypeInfo)]
	pub struct AccountId32(pub [u8; 32]);

	#[derive(TypeInfo)]
	pub enum MultiAddress {
		Id(AccountId32),
		Index(#[codec(compact)] u32),
	}

	#[derive(TypeInfo)]
	pub enum MultiSignature {
		Ed25519([u8; 64]),
		Sr25519([u8; 64]),
		Ecdsa([u8; 65]),
	}

	#[derive(TypeInfo)]
	pub struct AccountData {
		pub free: u128,
		pub reserved: u128,
		pub misc_frozen: u128,
		pub fee_frozen: u128,
	}

	#[derive(TypeInfo)]
	pub enum BalancesCall {
		transfer {
			dest: MultiAddress,
			#[codec(compact)]
			value: u128,
		},
		set_flag {
			flag: Option<bool>,
		},
	}

	#[derive(TypeInfo)]
	pub enum BalancesEvent {
		Transfer { from: AccountId32, to: AccountId32, amount: u128 },
	}

	#[derive(TypeInfo)]
	pub enum RuntimeCall {
		Balances(BalancesCall),
	}

	#[derive(TypeInfo)]
	pub struct UncheckedExtrinsic<Address, Call, Signature, Extra>(PhantomData<(Address, Call, Signature, Extra)>);
}

/// v14 metadata with a single `Balances` pallet at index 4.
pub fn metadata_v14() -> MetadataVersioned {
	use frame_metadata::v14::{
		ExtrinsicMetadata, PalletCallMetadata, PalletConstantMetadata, PalletEventMetadata, PalletMetadata,
		PalletStorageMetadata, RuntimeMetadataV14, SignedExtensionMetadata, StorageEntryMetadata, StorageEntryModifier,
		StorageEntryType, StorageHasher,
	};
	use runtime::*;
	use scale_info::meta_type;

	let balances = PalletMetadata {
		name: "Balances",
		storage: Some(PalletStorageMetadata {
			prefix: "Balances",
			entries: vec![StorageEntryMetadata {
				name: "Account",
				modifier: StorageEntryModifier::Default,
				ty: StorageEntryType::Map {
					hashers: vec![StorageHasher::Blake2_128Concat],
					key: meta_type::<AccountId32>(),
					value: meta_type::<AccountData>(),
				},
				default: vec![0; 64],
				docs: vec![" The balance of an account."],
			}],
		}),
		calls: Some(PalletCallMetadata { ty: meta_type::<BalancesCall>() }),
		event: Some(PalletEventMetadata { ty: meta_type::<BalancesEvent>() }),
		constants: vec![PalletConstantMetadata {
			name: "ExistentialDeposit",
			ty: meta_type::<u128>(),
			value: 500u128.encode(),
			docs: vec![],
		}],
		error: None,
		index: 4,
	};
	let extrinsic = ExtrinsicMetadata {
		ty: meta_type::<UncheckedExtrinsic<MultiAddress, RuntimeCall, MultiSignature, ()>>(),
		version: 4,
		signed_extensions: vec![SignedExtensionMetadata {
			identifier: "CheckNonce",
			ty: meta_type::<()>(),
			additional_signed: meta_type::<()>(),
		}],
	};
	let metadata = RuntimeMetadataV14::new(vec![balances], extrinsic, meta_type::<()>());
	RuntimeMetadata::V14(metadata).into()
}
