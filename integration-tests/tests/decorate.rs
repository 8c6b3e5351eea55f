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
use paste::paste;
use serde_json::json;
use subscale::{
	decorate::{decorate_metadata, filter_sections, SectionCheck, SectionChecks},
	Registry, Value,
};

/// One test per constant, checking its encoding and decoded JSON.
macro_rules! constant_test {
	($($section:ident . $name:ident => $hex:literal, $json:expr),*) => {
		$(
			paste! {
				#[test]
				fn [<should_decode_constant_ $section _ $name:snake>]() {
					let registry = registry();
					let decorated = decorate_metadata(&registry, registry.metadata());
					let constant = decorated
						.consts
						.get(stringify!($section))
						.and_then(|s| s.get(stringify!($name)))
						.expect("constant is decorated");
					assert_eq!(constant.to_hex(), $hex);
					assert_eq!(constant.to_json(), $json);
				}
			}
		)*
	};
}

constant_test!(
	system.blockHashCount => "0x60090000", json!(2400),
	timestamp.minimumPeriod => "0xb80b000000000000", json!(3000),
	balances.existentialDeposit => "0x0010a5d4e80000000000000000000000", json!(1_000_000_000_000u64)
);

#[test]
fn should_keep_declaration_order() {
	let registry = registry();
	let decorated = decorate_metadata(&registry, registry.metadata());
	assert_eq!(decorated.tx.names().collect::<Vec<_>>(), vec!["system", "timestamp", "balances", "council"]);
	assert_eq!(
		decorated.tx.get("balances").map(|s| s.names().collect::<Vec<_>>()),
		Some(vec!["transfer", "transferKeepAlive"])
	);
	assert_eq!(
		decorated.query.names().collect::<Vec<_>>(),
		vec!["substrate", "system", "timestamp", "balances", "council"]
	);
	assert_eq!(decorated.consts.get("balances").map(|s| s.len()), Some(1));
}

#[test]
fn should_gate_optional_sections() {
	let _ = pretty_env_logger::try_init();
	let registry = registry();
	let decorated = decorate_metadata(&registry, registry.metadata());
	let tx = filter_sections(decorated.tx, &decorated.query, &SectionChecks::default(), &registry);
	// council is detected from the module list of the runtime
	assert_eq!(tx.names().collect::<Vec<_>>(), vec!["system", "timestamp", "balances", "council"]);

	let checks = SectionChecks::default().with("council", SectionCheck::default().methods(["proposals"]));
	let decorated = decorate_metadata(&registry, registry.metadata());
	let tx = filter_sections(decorated.tx, &decorated.query, &checks, &registry);
	assert!(!tx.contains("council"));
}

#[test]
fn should_use_configured_instances() {
	let metadata = node_v13().as_latest().expect("fixture metadata converts");
	let registry = Registry::builder()
		.spec_name("node")
		.module_instances("node", "technicalCommittee", ["council"])
		.metadata(metadata)
		.build()
		.expect("registry builds");
	let checks = SectionChecks::empty().with("technicalCommittee", SectionCheck::default().methods(["members"]));
	let decorated = decorate_metadata(&registry, registry.metadata());
	assert!(checks.is_available("technicalCommittee", &decorated.query, &registry));
	assert!(!checks.is_available("technicalCommittee", &decorated.query, &Registry::new()));
}

#[test]
fn should_decode_constants_as_codecs() {
	let registry = registry();
	let decorated = decorate_metadata(&registry, registry.metadata());
	let deposit = decorated.consts.get("balances").and_then(|s| s.get("existentialDeposit")).expect("constant is decorated");
	assert_eq!(deposit.to_value(), Value::U128(1_000_000_000_000));
	assert_eq!(deposit.to_raw_type(), "T::Balance");
	assert_eq!(deposit.encoded_length(), 16);
}
