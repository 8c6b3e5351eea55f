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

use crate::{
	codec::{engine, Codec, CodecInput},
	metadata::CallMetadata,
	CallValue, Error, Registry, Value,
};

/// A runtime call: `[section index, method index] ++ args`.
///
/// Arguments are checked against the registry's metadata on construction, and the
/// held value is always the canonical decoding of the held encoding.
#[derive(Debug, Clone)]
pub struct Call<'r> {
	pub(crate) registry: &'r Registry,
	value: CallValue,
	encoded: Vec<u8>,
}

impl<'r> Call<'r> {
	pub fn new(registry: &'r Registry, input: CodecInput<'_>) -> Result<Self, Error> {
		match input {
			CodecInput::Encoded(bytes) | CodecInput::Raw(bytes) => Self::decode_all(registry, bytes),
			CodecInput::Str(s) => match CodecInput::hex_bytes(s) {
				Some(bytes) => Self::decode_all(registry, &bytes?),
				None => Err(Error::invalid_input("Call", s)),
			},
			CodecInput::Value(Value::Call(call)) => Self::from_value(registry, call),
			CodecInput::Value(Value::Bytes(bytes)) => Self::decode_all(registry, &bytes),
			input => Err(Error::invalid_input("Call", input)),
		}
	}

	/// Encode `call` against the active metadata.
	pub fn from_value(registry: &'r Registry, call: CallValue) -> Result<Self, Error> {
		let mut encoded = Vec::new();
		engine::encode_call(registry, &call, &mut encoded)?;
		Self::decode_all(registry, &encoded)
	}

	fn decode_all(registry: &'r Registry, bytes: &[u8]) -> Result<Self, Error> {
		let mut data = bytes;
		let call = Self::decode(registry, &mut data)?;
		if !data.is_empty() {
			let ty = format!("{}.{}", call.section(), call.method());
			return Err(Error::TrailingBytes { ty, remaining: data.len() });
		}
		Ok(call)
	}

	/// Decode a call from the front of `data`, advancing it past the call.
	pub(crate) fn decode(registry: &'r Registry, data: &mut &[u8]) -> Result<Self, Error> {
		let start: &[u8] = *data;
		let value = engine::decode_call(registry, data)?;
		let encoded = start[..start.len() - data.len()].to_vec();
		Ok(Call { registry, value, encoded })
	}

	/// `[section index, method index]`.
	pub fn call_index(&self) -> [u8; 2] {
		self.value.call_index
	}

	pub fn section(&self) -> &str {
		&self.value.section
	}

	pub fn method(&self) -> &str {
		&self.value.method
	}

	pub fn args(&self) -> &[(String, Value)] {
		&self.value.args
	}

	pub fn value(&self) -> &CallValue {
		&self.value
	}

	pub fn meta(&self) -> Result<&'r CallMetadata, Error> {
		let [section, method] = self.value.call_index;
		self.registry.find_call(section, method).map(|(_, call)| call)
	}

	/// Same section and method, regardless of arguments.
	pub fn is(&self, other: &Call<'_>) -> bool {
		self.call_index() == other.call_index()
	}
}

impl Codec for Call<'_> {
	fn registry(&self) -> &Registry {
		self.registry
	}

	/// Calls carry no length prefix, bare or not.
	fn to_u8a(&self, _is_bare: bool) -> Vec<u8> {
		self.encoded.clone()
	}

	fn to_raw_type(&self) -> String {
		"Call".into()
	}

	fn to_value(&self) -> Value {
		Value::Call(self.value.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_suite;

	fn registry() -> Registry {
		let mut registry = Registry::new();
		registry.set_metadata(test_suite::metadata_v10().as_latest().unwrap());
		registry
	}

	#[test]
	fn should_decode_calls_by_index() {
		let registry = registry();
		let call = Call::new(&registry, "0x010008".into()).unwrap();
		assert_eq!(call.section(), "timestamp");
		assert_eq!(call.method(), "set");
		assert_eq!(call.args(), &[("now".to_string(), Value::U64(2))]);
		assert_eq!(call.meta().unwrap().name, "set");
		assert_eq!(call.to_hex(), "0x010008");
		assert_eq!(call.encoded_length(), 3);
	}

	#[test]
	fn should_canonicalize_values() {
		let registry = registry();
		let call = Call::from_value(
			&registry,
			CallValue {
				section: String::new(),
				method: String::new(),
				call_index: [1, 0],
				args: vec![("now".into(), Value::U128(10101))],
			},
		)
		.unwrap();
		assert_eq!(call.to_u8a(true), vec![0x01, 0x00, 0xd5, 0x9d]);
		assert_eq!(call.section(), "timestamp");
		assert_eq!(call.args()[0].1, Value::U64(10101));
	}

	#[test]
	fn should_reject_unknown_indices() {
		let registry = registry();
		assert!(matches!(Call::new(&registry, CodecInput::Encoded(&[9, 9])), Err(Error::UnknownCall(9, 9))));
		assert!(matches!(Call::new(&registry, CodecInput::Empty), Err(Error::InvalidInputType { .. })));
	}

	#[test]
	fn should_reject_trailing_bytes() {
		let registry = registry();
		assert!(matches!(
			Call::new(&registry, "0x01000800".into()),
			Err(Error::TrailingBytes { remaining: 1, .. })
		));
		let mut data = &[0x01, 0x00, 0x08, 0x00][..];
		let call = Call::decode(&registry, &mut data).unwrap();
		assert_eq!(call.to_u8a(true), vec![0x01, 0x00, 0x08]);
		assert_eq!(data, &[0x00]);
	}
}
