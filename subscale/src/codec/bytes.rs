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

use super::{Codec, CodecInput};
use crate::{compact, Error, Registry, Value};

fn bytes_from(ty: &str, input: CodecInput<'_>) -> Result<Vec<u8>, Error> {
	let bytes = match input {
		CodecInput::Empty => Vec::new(),
		CodecInput::Encoded(bytes) | CodecInput::Raw(bytes) => bytes.to_vec(),
		CodecInput::Str(s) => match CodecInput::hex_bytes(s) {
			Some(bytes) => bytes?,
			None => s.as_bytes().to_vec(),
		},
		CodecInput::Value(Value::Bytes(bytes)) => bytes,
		CodecInput::Value(Value::Text(s)) => return bytes_from(ty, CodecInput::Str(&s)),
		CodecInput::Value(v) => return Err(Error::invalid_input(ty, v)),
	};
	Ok(bytes)
}

/// A byte buffer without a length prefix.
///
/// Raw bytes carry no length of their own, so they encode verbatim and consume
/// everything they are constructed from.
#[derive(Debug, Clone)]
pub struct Raw<'r> {
	registry: &'r Registry,
	bytes: Vec<u8>,
}

impl<'r> Raw<'r> {
	pub fn new(registry: &'r Registry, input: CodecInput<'_>) -> Result<Self, Error> {
		Ok(Raw { registry, bytes: bytes_from("Raw", input)? })
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}
}

impl Codec for Raw<'_> {
	fn registry(&self) -> &Registry {
		self.registry
	}

	fn to_u8a(&self, _is_bare: bool) -> Vec<u8> {
		self.bytes.clone()
	}

	fn to_raw_type(&self) -> String {
		"Raw".into()
	}

	fn to_value(&self) -> Value {
		Value::Bytes(self.bytes.clone())
	}
}

/// A length-prefixed byte buffer, `Vec<u8>`.
#[derive(Debug, Clone)]
pub struct Bytes<'r> {
	registry: &'r Registry,
	bytes: Vec<u8>,
}

impl<'r> Bytes<'r> {
	pub fn new(registry: &'r Registry, input: CodecInput<'_>) -> Result<Self, Error> {
		let bytes = match input {
			CodecInput::Encoded([]) => Vec::new(),
			CodecInput::Encoded(bytes) => compact::decode_length_prefixed(bytes)?.0.to_vec(),
			input => bytes_from("Bytes", input)?,
		};
		Ok(Bytes { registry, bytes })
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}
}

impl Codec for Bytes<'_> {
	fn registry(&self) -> &Registry {
		self.registry
	}

	fn to_u8a(&self, is_bare: bool) -> Vec<u8> {
		if is_bare {
			self.bytes.clone()
		} else {
			compact::add_length(&self.bytes)
		}
	}

	fn to_raw_type(&self) -> String {
		"Bytes".into()
	}

	fn to_value(&self) -> Value {
		Value::Bytes(self.bytes.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn should_keep_raw_bytes_unprefixed() {
		let registry = Registry::new();
		let raw = Raw::new(&registry, CodecInput::Encoded(&[1, 2, 3])).unwrap();
		assert_eq!(raw.to_u8a(false), vec![1, 2, 3]);
		assert_eq!(raw.encoded_length(), 3);
		assert_eq!(raw.to_hex(), "0x010203");
	}

	#[test]
	fn should_prefix_bytes() {
		let registry = Registry::new();
		let bytes = Bytes::new(&registry, CodecInput::Encoded(&[0x0c, 1, 2, 3, 4])).unwrap();
		assert_eq!(bytes.as_bytes(), &[1, 2, 3]);
		assert_eq!(bytes.to_u8a(false), vec![0x0c, 1, 2, 3]);
		assert_eq!(bytes.to_u8a(true), vec![1, 2, 3]);

		let raw = Bytes::new(&registry, CodecInput::Raw(&[1, 2, 3])).unwrap();
		assert!(raw.eq_codec(&bytes));
	}

	#[test]
	fn should_read_hex_strings() {
		let registry = Registry::new();
		let bytes = Bytes::new(&registry, "0xdeadbeef".into()).unwrap();
		assert_eq!(bytes.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
		assert!(matches!(Bytes::new(&registry, "0xzz".into()), Err(Error::Hex(_))));
		assert_eq!(bytes.to_json(), serde_json::json!("0xdeadbeef"));
	}
}
