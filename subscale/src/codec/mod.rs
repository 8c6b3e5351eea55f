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

//! The codec contract and the primitive codecs.

mod bytes;
pub(crate) mod engine;
mod text;
mod type_value;

pub use self::{
	bytes::{Bytes, Raw},
	text::Text,
	type_value::TypeValue,
};

use crate::{Hash, Registry, Value};
use std::fmt;

/// Implemented by every value constructed through a [`Registry`].
pub trait Codec: fmt::Debug {
	/// The registry this value was constructed against.
	fn registry(&self) -> &Registry;

	/// SCALE encoding. `is_bare` leaves out length or version prefixes the
	/// surrounding context already supplies.
	fn to_u8a(&self, is_bare: bool) -> Vec<u8>;

	/// Name of the type this value was created as.
	fn to_raw_type(&self) -> String;

	fn to_value(&self) -> Value;

	fn encoded_length(&self) -> usize {
		self.to_u8a(false).len()
	}

	fn to_hex(&self) -> String {
		crate::value::as_hex(&self.to_u8a(false))
	}

	fn to_json(&self) -> serde_json::Value {
		serde_json::to_value(self.to_value()).unwrap_or(serde_json::Value::Null)
	}

	fn to_human(&self) -> serde_json::Value {
		self.to_json()
	}

	/// Equality of the underlying values, regardless of how each was encoded.
	fn eq_codec(&self, other: &dyn Codec) -> bool {
		self.to_value() == other.to_value()
	}

	fn hash(&self) -> Hash {
		self.registry().hash(&self.to_u8a(false))
	}

	/// True if the value encodes to nothing but zero bytes.
	fn is_empty(&self) -> bool {
		self.to_u8a(true).iter().all(|b| *b == 0)
	}
}

/// Everything a codec can be constructed from.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecInput<'a> {
	/// The type's default value.
	Empty,
	/// SCALE encoded bytes, length-prefixed where the type is.
	Encoded(&'a [u8]),
	/// Bytes without any length prefix.
	Raw(&'a [u8]),
	/// A plain string or `0x` prefixed hex.
	Str(&'a str),
	Value(Value),
}

impl<'a> From<&'a [u8]> for CodecInput<'a> {
	fn from(bytes: &'a [u8]) -> Self {
		CodecInput::Encoded(bytes)
	}
}

impl<'a> From<&'a Vec<u8>> for CodecInput<'a> {
	fn from(bytes: &'a Vec<u8>) -> Self {
		CodecInput::Encoded(bytes.as_slice())
	}
}

impl<'a> From<&'a str> for CodecInput<'a> {
	fn from(s: &'a str) -> Self {
		CodecInput::Str(s)
	}
}

impl From<Value> for CodecInput<'_> {
	fn from(value: Value) -> Self {
		CodecInput::Value(value)
	}
}

impl CodecInput<'_> {
	/// Hex strings as bytes. `None` for anything that is not hex.
	pub(crate) fn hex_bytes(s: &str) -> Option<Result<Vec<u8>, hex::FromHexError>> {
		s.strip_prefix("0x").map(hex::decode)
	}
}

/// Construction options beyond the input value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeExtra {
	pub is_signed: bool,
	pub version: Option<u8>,
}

impl TypeExtra {
	pub fn signed(mut self, is_signed: bool) -> Self {
		self.is_signed = is_signed;
		self
	}

	pub fn version(mut self, version: u8) -> Self {
		self.version = Some(version);
		self
	}
}
