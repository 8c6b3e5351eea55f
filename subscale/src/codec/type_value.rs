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

use super::{engine, Codec, CodecInput};
use crate::{Error, Registry, TypeDef, Value};

/// A value of any structurally defined type.
///
/// The encoding is computed once at construction; the value held is always the
/// canonical decoding of that encoding.
#[derive(Debug, Clone)]
pub struct TypeValue<'r> {
	registry: &'r Registry,
	name: String,
	def: TypeDef,
	value: Value,
	encoded: Vec<u8>,
	prefix_len: usize,
}

impl<'r> TypeValue<'r> {
	pub fn new(registry: &'r Registry, name: impl Into<String>, def: TypeDef, input: CodecInput<'_>) -> Result<Self, Error> {
		let name = name.into();
		let value = match input {
			CodecInput::Empty => engine::default_value(registry, &def)?,
			CodecInput::Encoded(bytes) => return Self::decode(registry, name, def, bytes),
			CodecInput::Raw(bytes) => match registry.resolve_def(&def)? {
				TypeDef::Bytes => Value::Bytes(bytes.to_vec()),
				TypeDef::Text => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
				_ => return Self::decode(registry, name, def, bytes),
			},
			CodecInput::Str(s) => match CodecInput::hex_bytes(s) {
				Some(bytes) => return Self::decode(registry, name, def, &bytes?),
				None => Value::Text(s.to_string()),
			},
			CodecInput::Value(value) => value,
		};
		let encoded = engine::encode(registry, &def, &value)?;
		Self::decode(registry, name, def, &encoded)
	}

	fn decode(registry: &'r Registry, name: String, def: TypeDef, bytes: &[u8]) -> Result<Self, Error> {
		let mut data = bytes;
		let value = engine::decode(registry, &def, &mut data)?;
		if !data.is_empty() {
			log::warn!("{} bytes left over after decoding {}", data.len(), name);
		}
		let encoded = engine::encode(registry, &def, &value)?;
		let prefix_len = engine::bare_prefix_len(registry, &def, &encoded)?;
		Ok(TypeValue { registry, name, def, value, encoded, prefix_len })
	}

	pub fn value(&self) -> &Value {
		&self.value
	}

	pub fn into_value(self) -> Value {
		self.value
	}

	pub fn def(&self) -> &TypeDef {
		&self.def
	}
}

impl Codec for TypeValue<'_> {
	fn registry(&self) -> &Registry {
		self.registry
	}

	fn to_u8a(&self, is_bare: bool) -> Vec<u8> {
		if is_bare {
			self.encoded[self.prefix_len..].to_vec()
		} else {
			self.encoded.clone()
		}
	}

	fn to_raw_type(&self) -> String {
		self.name.clone()
	}

	fn to_value(&self) -> Value {
		self.value.clone()
	}
}
