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
use crate::{Codec, CodecInput, Metadata, Registry};
use heck::ToLowerCamelCase;

/// Module constants decoded as their declared types, keyed by section then name.
pub fn decorate_constants<'r>(registry: &'r Registry, metadata: &Metadata) -> Section<Section<Box<dyn Codec + 'r>>> {
	let mut consts = Section::new();
	for module in metadata.modules().iter().filter(|m| !m.constants.is_empty()) {
		let mut section = Section::new();
		for constant in module.constants.iter() {
			match registry.create_type(&constant.ty, CodecInput::Encoded(&constant.value)) {
				Ok(value) => section.insert(constant.name.to_lower_camel_case(), value),
				Err(e) => log::warn!("skipping constant {}.{}: {}", module.name, constant.name, e),
			}
		}
		consts.insert(module.name.to_lower_camel_case(), section);
	}
	consts
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{test_suite, Value};

	#[test]
	fn should_decode_constants() {
		let mut registry = Registry::new();
		registry.set_metadata(test_suite::metadata_v10().as_latest().unwrap());
		let consts = decorate_constants(&registry, registry.metadata());
		let deposit = consts.get("balances").and_then(|s| s.get("existentialDeposit")).unwrap();
		assert_eq!(deposit.to_value(), Value::U128(500));
		assert_eq!(deposit.to_raw_type(), "T::Balance");
		let count = consts.get("system").and_then(|s| s.get("blockHashCount")).unwrap();
		assert_eq!(count.to_json(), serde_json::json!(250));
	}

	#[test]
	fn should_decode_v14_constants() {
		let mut registry = Registry::new();
		registry.set_metadata(test_suite::metadata_v14().as_latest().unwrap());
		let consts = decorate_constants(&registry, registry.metadata());
		let deposit = consts.get("balances").and_then(|s| s.get("existentialDeposit")).unwrap();
		assert_eq!(deposit.to_value(), Value::U128(500));
	}
}
