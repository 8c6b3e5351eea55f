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
use crate::{metadata::CallMetadata, Call, CallValue, Error, Metadata, Registry, Value};
use heck::ToLowerCamelCase;

/// Constructor for calls of one method.
#[derive(Debug, Clone)]
pub struct CallFunction<'r> {
	registry: &'r Registry,
	section: String,
	method: String,
	call_index: [u8; 2],
	meta: CallMetadata,
}

impl<'r> CallFunction<'r> {
	/// Build the call from its arguments, given in declaration order.
	pub fn call(&self, args: Vec<Value>) -> Result<Call<'r>, Error> {
		if args.len() != self.meta.args.len() {
			return Err(Error::ArgumentCount {
				section: self.section.clone(),
				method: self.method.clone(),
				expected: self.meta.args.len(),
				got: args.len(),
			});
		}
		let args = self.meta.args.iter().map(|a| a.name.to_lower_camel_case()).zip(args).collect();
		Call::from_value(
			self.registry,
			CallValue { section: self.section.clone(), method: self.method.clone(), call_index: self.call_index, args },
		)
	}

	pub fn section(&self) -> &str {
		&self.section
	}

	pub fn method(&self) -> &str {
		&self.method
	}

	/// `[section index, method index]`.
	pub fn call_index(&self) -> [u8; 2] {
		self.call_index
	}

	pub fn meta(&self) -> &CallMetadata {
		&self.meta
	}

	/// Whether `call` was made by this function.
	pub fn is(&self, call: &Call<'_>) -> bool {
		call.call_index() == self.call_index
	}
}

/// Call constructors for every module with calls, keyed by section then method.
pub fn decorate_extrinsics<'r>(registry: &'r Registry, metadata: &Metadata) -> Section<Section<CallFunction<'r>>> {
	let mut tx = Section::new();
	for module in metadata.modules() {
		let section_index = match module.call_index {
			Some(index) if !module.calls.is_empty() => index,
			_ => continue,
		};
		let section_name = module.name.to_lower_camel_case();
		let mut section = Section::new();
		for call in module.calls.iter() {
			let method = call.name.to_lower_camel_case();
			section.insert(
				method.clone(),
				CallFunction {
					registry,
					section: section_name.clone(),
					method,
					call_index: [section_index, call.index],
					meta: call.clone(),
				},
			);
		}
		tx.insert(section_name, section);
	}
	tx
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{test_suite, Codec};

	fn registry() -> Registry {
		let mut registry = Registry::new();
		registry.set_metadata(test_suite::metadata_v10().as_latest().unwrap());
		registry
	}

	#[test]
	fn should_decorate_calls_in_declaration_order() {
		let registry = registry();
		let tx = decorate_extrinsics(&registry, registry.metadata());
		assert_eq!(tx.names().collect::<Vec<_>>(), vec!["system", "timestamp", "balances"]);
		let balances = tx.get("balances").unwrap();
		assert_eq!(balances.names().collect::<Vec<_>>(), vec!["transfer", "setBalance"]);
		assert_eq!(balances.get("setBalance").unwrap().call_index(), [2, 1]);
	}

	#[test]
	fn should_encode_timestamp_set() {
		let registry = registry();
		let tx = decorate_extrinsics(&registry, registry.metadata());
		let set = tx.get("timestamp").and_then(|s| s.get("set")).unwrap();
		let call = set.call(vec![Value::U64(10101)]).unwrap();
		assert_eq!(call.to_u8a(false), vec![0x01, 0x00, 0xd5, 0x9d]);
		assert!(set.is(&call));
		assert!(!tx.get("system").and_then(|s| s.get("remark")).unwrap().is(&call));
	}

	#[test]
	fn should_check_argument_count() {
		let registry = registry();
		let tx = decorate_extrinsics(&registry, registry.metadata());
		let set = tx.get("timestamp").and_then(|s| s.get("set")).unwrap();
		assert!(matches!(set.call(vec![]), Err(Error::ArgumentCount { expected: 1, got: 0, .. })));
	}
}
