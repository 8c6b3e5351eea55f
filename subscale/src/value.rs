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

//! Dynamic values every registry codec decodes into and encodes from.

use serde::{
	ser::{SerializeMap, SerializeSeq},
	Serialize, Serializer,
};
use sp_runtime::generic::Era;
use std::fmt;

/// A decoded SCALE value.
///
/// Values carry no type information; the [`TypeDef`](crate::TypeDef) they are encoded
/// against decides the wire format. Encoding is lenient about numeric widths, a
/// `Value::U128(5)` encodes fine as a `u8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	Bool(bool),
	U8(u8),
	U16(u16),
	U32(u32),
	U64(u64),
	U128(u128),
	I8(i8),
	I16(i16),
	I32(i32),
	I64(i64),
	I128(i128),
	Text(String),
	/// Byte strings and fixed byte arrays.
	Bytes(Vec<u8>),
	Sequence(Vec<Value>),
	Tuple(Vec<Value>),
	Struct(Vec<(String, Value)>),
	/// An enum variant by name. Unit variants carry [`Value::Null`].
	Variant(String, Box<Value>),
	Option(Option<Box<Value>>),
	Result(Result<Box<Value>, Box<Value>>),
	Call(CallValue),
	Era(Era),
	Null,
}

/// A runtime call addressed by its section and method index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallValue {
	pub section: String,
	pub method: String,
	pub call_index: [u8; 2],
	pub args: Vec<(String, Value)>,
}

impl Value {
	pub fn variant(name: impl Into<String>, value: Value) -> Value {
		Value::Variant(name.into(), Box::new(value))
	}

	pub fn unit_variant(name: impl Into<String>) -> Value {
		Value::Variant(name.into(), Box::new(Value::Null))
	}

	pub fn some(value: Value) -> Value {
		Value::Option(Some(Box::new(value)))
	}

	pub fn none() -> Value {
		Value::Option(None)
	}

	pub fn named<S: Into<String>>(fields: impl IntoIterator<Item = (S, Value)>) -> Value {
		Value::Struct(fields.into_iter().map(|(n, v)| (n.into(), v)).collect())
	}

	/// Unsigned view of any non-negative integer value.
	pub fn as_u128(&self) -> Option<u128> {
		match *self {
			Value::U8(n) => Some(n.into()),
			Value::U16(n) => Some(n.into()),
			Value::U32(n) => Some(n.into()),
			Value::U64(n) => Some(n.into()),
			Value::U128(n) => Some(n),
			Value::I8(n) => u128::try_from(n).ok(),
			Value::I16(n) => u128::try_from(n).ok(),
			Value::I32(n) => u128::try_from(n).ok(),
			Value::I64(n) => u128::try_from(n).ok(),
			Value::I128(n) => u128::try_from(n).ok(),
			_ => None,
		}
	}

	/// Signed view of any integer value that fits in an `i128`.
	pub fn as_i128(&self) -> Option<i128> {
		match *self {
			Value::U128(n) => i128::try_from(n).ok(),
			Value::I8(n) => Some(n.into()),
			Value::I16(n) => Some(n.into()),
			Value::I32(n) => Some(n.into()),
			Value::I64(n) => Some(n.into()),
			Value::I128(n) => Some(n),
			ref v => v.as_u128().and_then(|n| i128::try_from(n).ok()),
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Text(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Value::Bytes(b) => Some(b),
			_ => None,
		}
	}

	/// Look up a field of a struct value.
	pub fn field(&self, name: &str) -> Option<&Value> {
		match self {
			Value::Struct(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
			_ => None,
		}
	}
}

macro_rules! value_from {
	($($ty: ty => $variant: ident),*) => {
		$(
			impl From<$ty> for Value {
				fn from(v: $ty) -> Value {
					Value::$variant(v)
				}
			}
		)*
	};
}

value_from!(
	bool => Bool, u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128,
	i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128,
	String => Text, Vec<u8> => Bytes, CallValue => Call, Era => Era
);

impl From<&str> for Value {
	fn from(s: &str) -> Value {
		Value::Text(s.to_string())
	}
}

impl From<[u8; 32]> for Value {
	fn from(b: [u8; 32]) -> Value {
		Value::Bytes(b.to_vec())
	}
}

impl From<Option<Value>> for Value {
	fn from(v: Option<Value>) -> Value {
		Value::Option(v.map(Box::new))
	}
}

/// JSON numbers lose precision past 2^53, wide integers serialize as decimal strings.
fn serialize_u128<S: Serializer>(n: u128, serializer: S) -> Result<S::Ok, S::Error> {
	match u64::try_from(n) {
		Ok(n) => serializer.serialize_u64(n),
		Err(_) => serializer.serialize_str(&n.to_string()),
	}
}

fn serialize_i128<S: Serializer>(n: i128, serializer: S) -> Result<S::Ok, S::Error> {
	match i64::try_from(n) {
		Ok(n) => serializer.serialize_i64(n),
		Err(_) => serializer.serialize_str(&n.to_string()),
	}
}

pub(crate) fn as_hex(bytes: &[u8]) -> String {
	format!("0x{}", hex::encode(bytes))
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::U8(n) => serializer.serialize_u8(*n),
			Value::U16(n) => serializer.serialize_u16(*n),
			Value::U32(n) => serializer.serialize_u32(*n),
			Value::U64(n) => serializer.serialize_u64(*n),
			Value::U128(n) => serialize_u128(*n, serializer),
			Value::I8(n) => serializer.serialize_i8(*n),
			Value::I16(n) => serializer.serialize_i16(*n),
			Value::I32(n) => serializer.serialize_i32(*n),
			Value::I64(n) => serializer.serialize_i64(*n),
			Value::I128(n) => serialize_i128(*n, serializer),
			Value::Text(s) => serializer.serialize_str(s),
			Value::Bytes(b) => serializer.serialize_str(&as_hex(b)),
			Value::Sequence(items) | Value::Tuple(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Value::Struct(fields) => {
				let mut map = serializer.serialize_map(Some(fields.len()))?;
				for (name, value) in fields {
					map.serialize_entry(name, value)?;
				}
				map.end()
			}
			Value::Variant(name, value) => match value.as_ref() {
				Value::Null => serializer.serialize_str(name),
				value => {
					let mut map = serializer.serialize_map(Some(1))?;
					map.serialize_entry(name, value)?;
					map.end()
				}
			},
			Value::Option(None) | Value::Null => serializer.serialize_none(),
			Value::Option(Some(value)) => serializer.serialize_some(value.as_ref()),
			Value::Result(result) => {
				let mut map = serializer.serialize_map(Some(1))?;
				match result {
					Ok(v) => map.serialize_entry("Ok", v.as_ref())?,
					Err(e) => map.serialize_entry("Err", e.as_ref())?,
				}
				map.end()
			}
			Value::Call(call) => {
				let mut map = serializer.serialize_map(Some(2))?;
				map.serialize_entry("callIndex", &as_hex(&call.call_index))?;
				map.serialize_entry("args", &Value::Struct(call.args.clone()))?;
				map.end()
			}
			Value::Era(Era::Immortal) => serializer.serialize_str("ImmortalEra"),
			Value::Era(Era::Mortal(period, phase)) => {
				let mut map = serializer.serialize_map(Some(1))?;
				map.serialize_entry("MortalEra", &[("period", *period), ("phase", *phase)].into_iter().collect::<std::collections::BTreeMap<_, _>>())?;
				map.end()
			}
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Text(s) => write!(f, "{}", s),
			Value::Bytes(b) => write!(f, "{}", as_hex(b)),
			v => match serde_json::to_string(v) {
				Ok(s) => write!(f, "{}", s),
				Err(_) => write!(f, "{:?}", v),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn should_serialize_as_json() {
		let value = Value::named([
			("who", Value::Bytes(vec![0xde, 0xad])),
			("amount", Value::U128(u128::MAX)),
			("nonce", Value::U32(7)),
			("kind", Value::unit_variant("Free")),
			("tip", Value::variant("Some", Value::U8(1))),
			("memo", Value::none()),
		]);
		assert_eq!(
			serde_json::to_value(&value).unwrap(),
			json!({
				"who": "0xdead",
				"amount": "340282366920938463463374607431768211455",
				"nonce": 7,
				"kind": "Free",
				"tip": { "Some": 1 },
				"memo": null,
			})
		);
	}

	#[test]
	fn should_convert_numbers() {
		assert_eq!(Value::U8(5).as_u128(), Some(5));
		assert_eq!(Value::I32(-1).as_u128(), None);
		assert_eq!(Value::I32(-1).as_i128(), Some(-1));
		assert_eq!(Value::U128(u128::MAX).as_i128(), None);
		assert_eq!(Value::Text("5".into()).as_u128(), None);
	}

	#[test]
	fn should_serialize_eras() {
		assert_eq!(serde_json::to_value(Value::Era(Era::Immortal)).unwrap(), json!("ImmortalEra"));
		assert_eq!(
			serde_json::to_value(Value::Era(Era::Mortal(64, 13))).unwrap(),
			json!({ "MortalEra": { "period": 64, "phase": 13 } })
		);
	}
}
