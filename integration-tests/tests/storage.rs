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

use crate::runtime_metadata::*;
use anyhow::Result;
use codec::Encode;
use sp_core::twox_128;
use sp_keyring::AccountKeyring;
use subscale::{decorate::decorate_storage, Error, Value};

const ALICE_ACCOUNT_KEY: &str = "26aa394eea5630e07c48ae0c9558cef7b99d880ec681799c0cf30e8886371da9de1e86a9a8c739864cf3cc5ec2bea59fd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

#[test]
fn should_derive_alice_account_key() -> Result<()> {
	let _ = pretty_env_logger::try_init();
	let registry = registry();
	let query = decorate_storage(&registry, registry.metadata());
	let account = query.get("system").and_then(|s| s.get("account")).expect("System.Account is decorated");

	let alice = Value::Bytes(AccountKeyring::Alice.to_raw_public().to_vec());
	let key = account.key(&[alice])?;
	assert_eq!(hex::encode(&key), ALICE_ACCOUNT_KEY);

	let mut prefix = twox_128(b"System").to_vec();
	prefix.extend(twox_128(b"Account"));
	assert_eq!(account.prefix_key(), prefix);
	assert!(key.starts_with(&prefix));
	Ok(())
}

#[test]
fn should_decode_account_info() -> Result<()> {
	let registry = registry();
	let query = decorate_storage(&registry, registry.metadata());
	let account = query.get("system").and_then(|s| s.get("account")).expect("System.Account is decorated");

	// nonce 7, one provider, 1000 free
	let mut encoded = 7u32.encode();
	encoded.extend(0u32.encode());
	encoded.extend(1u32.encode());
	encoded.extend(0u32.encode());
	encoded.extend(1000u128.encode());
	encoded.extend([0u8; 48]);

	let info = account.decode_value(Some(&encoded))?.expect("Default items always decode");
	let info = info.to_value();
	assert_eq!(info.field("nonce"), Some(&Value::U32(7)));
	assert_eq!(info.field("providers"), Some(&Value::U32(1)));
	assert_eq!(info.field("data").and_then(|d| d.field("free")), Some(&Value::U128(1000)));

	let empty = account.decode_value(None)?.expect("Default items always decode");
	assert_eq!(empty.to_value().field("nonce"), Some(&Value::U32(0)));
	Ok(())
}

#[test]
fn should_hash_twox64_keys() -> Result<()> {
	let registry = registry();
	let query = decorate_storage(&registry, registry.metadata());
	let block_hash = query.get("system").and_then(|s| s.get("blockHash")).expect("System.BlockHash is decorated");
	let key = block_hash.key(&[Value::U32(1)])?;
	let encoded = 1u32.encode();
	assert_eq!(&key[32..], [&sp_core::twox_64(&encoded)[..], &encoded[..]].concat());
	Ok(())
}

#[test]
fn should_check_key_arguments() {
	let registry = registry();
	let query = decorate_storage(&registry, registry.metadata());
	let number = query.get("system").and_then(|s| s.get("number")).expect("System.Number is decorated");
	assert!(matches!(number.key(&[Value::U32(1)]), Err(Error::StorageArgs { expected: 0, got: 1, .. })));
	let account = query.get("system").and_then(|s| s.get("account")).expect("System.Account is decorated");
	assert!(account.key(&[Value::Bool(true)]).is_err());
}

#[test]
fn should_expose_well_known_keys() -> Result<()> {
	let registry = registry();
	let query = decorate_storage(&registry, registry.metadata());
	let substrate = query.get("substrate").expect("well known keys are always present");
	assert_eq!(substrate.names().collect::<Vec<_>>(), vec!["code", "heapPages", "extrinsicIndex"]);
	let heap_pages = substrate.get("heapPages").expect("heapPages is well known");
	assert_eq!(heap_pages.key(&[])?, b":heappages".to_vec());
	let pages = heap_pages.decode_value(Some(&64u64.encode()))?.expect("value was supplied");
	assert_eq!(pages.to_value(), Value::U64(64));
	assert!(heap_pages.decode_value(None)?.is_none());
	Ok(())
}
