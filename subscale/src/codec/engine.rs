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

//! Encoding and decoding of [`Value`]s against a [`TypeDef`].

use crate::{
	compact::{self, add_length, encode_compact},
	value::CallValue,
	Error, Primitive, Registry, TypeDef, Value,
};
use codec::{Decode, Encode};
use heck::ToLowerCamelCase;
use sp_runtime::generic::Era;

fn take<'a>(data: &mut &'a [u8], n: usize) -> Result<&'a [u8], Error> {
	let input: &'a [u8] = *data;
	if n > input.len() {
		return Err(Error::DecodeLengthExceeded { declared: n, limit: input.len() });
	}
	let (head, tail) = input.split_at(n);
	*data = tail;
	Ok(head)
}

fn take_length_prefixed<'a>(data: &mut &'a [u8]) -> Result<&'a [u8], Error> {
	let input: &'a [u8] = *data;
	let (body, consumed) = compact::decode_length_prefixed(input)?;
	*data = &input[consumed..];
	Ok(body)
}

fn take_compact(data: &mut &[u8]) -> Result<u128, Error> {
	let input: &[u8] = *data;
	let (value, consumed) = compact::decode_compact(input)?;
	*data = &input[consumed..];
	Ok(value)
}

/// An unsigned value of the width of `prim`, if `n` fits.
fn uint_value(prim: Primitive, n: u128) -> Option<Value> {
	let value = match prim {
		Primitive::U8 => Value::U8(u8::try_from(n).ok()?),
		Primitive::U16 => Value::U16(u16::try_from(n).ok()?),
		Primitive::U32 => Value::U32(u32::try_from(n).ok()?),
		Primitive::U64 => Value::U64(u64::try_from(n).ok()?),
		Primitive::U128 => Value::U128(n),
		_ => return None,
	};
	Some(value)
}

/// Deepest nesting of types the engine walks before giving up.
pub const MAX_DEPTH: usize = 256;

fn descend(depth: usize) -> Result<usize, Error> {
	if depth >= MAX_DEPTH {
		return Err(Error::DepthLimitExceeded(MAX_DEPTH));
	}
	Ok(depth + 1)
}

/// Decode a value of type `ty` from the front of `data`, advancing it.
pub(crate) fn decode(registry: &Registry, ty: &TypeDef, data: &mut &[u8]) -> Result<Value, Error> {
	decode_nested(registry, ty, data, 0)
}

fn decode_nested(registry: &Registry, ty: &TypeDef, data: &mut &[u8], depth: usize) -> Result<Value, Error> {
	let depth = descend(depth)?;
	log::trace!("decoding {} with {} bytes left", ty, data.len());
	let value = match ty {
		TypeDef::Primitive(prim) => decode_primitive(*prim, data)?,
		TypeDef::Text => Value::Text(String::from_utf8_lossy(take_length_prefixed(data)?).into_owned()),
		TypeDef::Bytes => Value::Bytes(take_length_prefixed(data)?.to_vec()),
		TypeDef::Compact(inner) => decode_compact_as(registry, inner, data, depth)?,
		TypeDef::Vec(inner) => {
			let len = take_compact(data)?;
			let len = usize::try_from(len).unwrap_or(usize::MAX);
			if len > compact::MAX_LENGTH {
				return Err(Error::DecodeLengthExceeded { declared: len, limit: compact::MAX_LENGTH });
			}
			let mut items = Vec::with_capacity(len.min(data.len()));
			for _ in 0..len {
				items.push(decode_nested(registry, inner, data, depth)?);
			}
			Value::Sequence(items)
		}
		TypeDef::Option(inner) => {
			let is_bool = registry.resolve_def(inner)? == TypeDef::Primitive(Primitive::Bool);
			match (u8::decode(data)?, is_bool) {
				(0, _) => Value::Option(None),
				(1, true) => Value::some(Value::Bool(true)),
				(2, true) => Value::some(Value::Bool(false)),
				(1, false) => Value::some(decode_nested(registry, inner, data, depth)?),
				_ => return Err(codec::Error::from("Invalid Option discriminant").into()),
			}
		}
		TypeDef::Result(ok, err) => match u8::decode(data)? {
			0 => Value::Result(Ok(Box::new(decode_nested(registry, ok, data, depth)?))),
			1 => Value::Result(Err(Box::new(decode_nested(registry, err, data, depth)?))),
			_ => return Err(codec::Error::from("Invalid Result discriminant").into()),
		},
		TypeDef::Tuple(tys) => {
			Value::Tuple(tys.iter().map(|t| decode_nested(registry, t, data, depth)).collect::<Result<_, _>>()?)
		}
		TypeDef::Array { len, ty } => {
			if registry.resolve_def(ty)?.is_u8() {
				Value::Bytes(take(data, *len)?.to_vec())
			} else {
				Value::Sequence((0..*len).map(|_| decode_nested(registry, ty, data, depth)).collect::<Result<_, _>>()?)
			}
		}
		TypeDef::Struct(fields) => Value::Struct(
			fields
				.iter()
				.map(|f| Ok((f.name.clone(), decode_nested(registry, &f.ty, data, depth)?)))
				.collect::<Result<_, Error>>()?,
		),
		TypeDef::Enum(variants) => {
			let index = u8::decode(data)?;
			let variant = variants
				.iter()
				.find(|v| v.index == index)
				.ok_or_else(|| codec::Error::from("Invalid enum variant index"))?;
			Value::Variant(variant.name.clone(), Box::new(decode_nested(registry, &variant.ty, data, depth)?))
		}
		TypeDef::Named(name) => decode_nested(registry, &registry.resolve(name)?, data, depth)?,
		TypeDef::Call => Value::Call(decode_call_nested(registry, data, depth)?),
		TypeDef::Era => Value::Era(Era::decode(data)?),
		TypeDef::Null => Value::Null,
		TypeDef::Unsupported(name) => return Err(Error::UnsupportedType(name.clone())),
	};
	Ok(value)
}

fn decode_primitive(prim: Primitive, data: &mut &[u8]) -> Result<Value, Error> {
	let value = match prim {
		Primitive::Bool => Value::Bool(bool::decode(data)?),
		Primitive::U8 => Value::U8(u8::decode(data)?),
		Primitive::U16 => Value::U16(u16::decode(data)?),
		Primitive::U32 => Value::U32(u32::decode(data)?),
		Primitive::U64 => Value::U64(u64::decode(data)?),
		Primitive::U128 => Value::U128(u128::decode(data)?),
		Primitive::I8 => Value::I8(i8::decode(data)?),
		Primitive::I16 => Value::I16(i16::decode(data)?),
		Primitive::I32 => Value::I32(i32::decode(data)?),
		Primitive::I64 => Value::I64(i64::decode(data)?),
		Primitive::I128 => Value::I128(i128::decode(data)?),
	};
	Ok(value)
}

/// Compact encoding applies to unsigned integers and to single-field wrappers around them.
fn decode_compact_as(registry: &Registry, inner: &TypeDef, data: &mut &[u8], depth: usize) -> Result<Value, Error> {
	let depth = descend(depth)?;
	match registry.resolve_def(inner)? {
		TypeDef::Primitive(prim) if prim.is_unsigned() => {
			let n = take_compact(data)?;
			uint_value(prim, n).ok_or_else(|| codec::Error::from("Compact value out of range").into())
		}
		TypeDef::Struct(fields) if fields.len() == 1 => {
			Ok(Value::Struct(vec![(fields[0].name.clone(), decode_compact_as(registry, &fields[0].ty, data, depth)?)]))
		}
		TypeDef::Tuple(tys) if tys.len() == 1 => Ok(Value::Tuple(vec![decode_compact_as(registry, &tys[0], data, depth)?])),
		TypeDef::Null => Ok(Value::Null),
		other => Err(Error::UnsupportedType(format!("Compact<{}>", other))),
	}
}

/// Decode a call: section index, method index, then the arguments the metadata declares.
pub(crate) fn decode_call(registry: &Registry, data: &mut &[u8]) -> Result<CallValue, Error> {
	decode_call_nested(registry, data, 0)
}

fn decode_call_nested(registry: &Registry, data: &mut &[u8], depth: usize) -> Result<CallValue, Error> {
	let depth = descend(depth)?;
	let index = take(data, 2)?;
	let (module, call) = registry.find_call(index[0], index[1])?;
	log::trace!("decoding call {}.{}", module.name, call.name);
	let mut args = Vec::with_capacity(call.args.len());
	for arg in call.args.iter() {
		let ty = registry.resolve(&arg.ty)?;
		args.push((arg.name.to_lower_camel_case(), decode_nested(registry, &ty, data, depth)?));
	}
	Ok(CallValue {
		section: module.name.to_lower_camel_case(),
		method: call.name.to_lower_camel_case(),
		call_index: [index[0], index[1]],
		args,
	})
}

/// Encode `value` as `ty`.
pub(crate) fn encode(registry: &Registry, ty: &TypeDef, value: &Value) -> Result<Vec<u8>, Error> {
	let mut out = Vec::new();
	encode_to(registry, ty, value, &mut out, 0)?;
	Ok(out)
}

fn number(prim: Primitive, value: &Value) -> Result<u128, Error> {
	value
		.as_u128()
		.or_else(|| value.as_str().and_then(|s| s.parse().ok()))
		.ok_or_else(|| Error::invalid_input(prim, value))
}

fn signed_number(prim: Primitive, value: &Value) -> Result<i128, Error> {
	value
		.as_i128()
		.or_else(|| value.as_str().and_then(|s| s.parse().ok()))
		.ok_or_else(|| Error::invalid_input(prim, value))
}

fn encode_primitive(prim: Primitive, value: &Value, out: &mut Vec<u8>) -> Result<(), Error> {
	let out_of_range = || Error::invalid_input(prim, value);
	match prim {
		Primitive::Bool => match value {
			Value::Bool(b) => b.encode_to(out),
			_ => return Err(out_of_range()),
		},
		Primitive::U8 => u8::try_from(number(prim, value)?).map_err(|_| out_of_range())?.encode_to(out),
		Primitive::U16 => u16::try_from(number(prim, value)?).map_err(|_| out_of_range())?.encode_to(out),
		Primitive::U32 => u32::try_from(number(prim, value)?).map_err(|_| out_of_range())?.encode_to(out),
		Primitive::U64 => u64::try_from(number(prim, value)?).map_err(|_| out_of_range())?.encode_to(out),
		Primitive::U128 => number(prim, value)?.encode_to(out),
		Primitive::I8 => i8::try_from(signed_number(prim, value)?).map_err(|_| out_of_range())?.encode_to(out),
		Primitive::I16 => i16::try_from(signed_number(prim, value)?).map_err(|_| out_of_range())?.encode_to(out),
		Primitive::I32 => i32::try_from(signed_number(prim, value)?).map_err(|_| out_of_range())?.encode_to(out),
		Primitive::I64 => i64::try_from(signed_number(prim, value)?).map_err(|_| out_of_range())?.encode_to(out),
		Primitive::I128 => signed_number(prim, value)?.encode_to(out),
	}
	Ok(())
}

/// Raw bytes of a byte-like value. Strings are taken as hex when `0x` prefixed.
fn bytes_of(ty: &TypeDef, value: &Value) -> Result<Vec<u8>, Error> {
	match value {
		Value::Bytes(b) => Ok(b.clone()),
		Value::Text(s) => match s.strip_prefix("0x") {
			Some(h) => Ok(hex::decode(h)?),
			None => Ok(s.as_bytes().to_vec()),
		},
		Value::Sequence(items) => items
			.iter()
			.map(|i| i.as_u128().and_then(|n| u8::try_from(n).ok()))
			.collect::<Option<Vec<u8>>>()
			.ok_or_else(|| Error::invalid_input(ty, value)),
		_ => Err(Error::invalid_input(ty, value)),
	}
}

fn encode_to(registry: &Registry, ty: &TypeDef, value: &Value, out: &mut Vec<u8>, depth: usize) -> Result<(), Error> {
	let depth = descend(depth)?;
	match ty {
		TypeDef::Primitive(prim) => encode_primitive(*prim, value, out)?,
		TypeDef::Text => match value {
			Value::Text(s) => out.extend(add_length(s.as_bytes())),
			_ => return Err(Error::invalid_input(ty, value)),
		},
		TypeDef::Bytes => out.extend(add_length(&bytes_of(ty, value)?)),
		TypeDef::Compact(inner) => encode_compact_as(registry, inner, value, out, depth)?,
		TypeDef::Vec(inner) => match value {
			Value::Sequence(items) => {
				out.extend(encode_compact(items.len() as u128));
				for item in items {
					encode_to(registry, inner, item, out, depth)?;
				}
			}
			Value::Bytes(bytes) if registry.resolve_def(inner)?.is_u8() => out.extend(add_length(bytes)),
			_ => return Err(Error::invalid_input(ty, value)),
		},
		TypeDef::Option(inner) => match value {
			Value::Option(None) | Value::Null => out.push(0),
			Value::Option(Some(v)) => encode_some(registry, inner, v, out, depth)?,
			v => encode_some(registry, inner, v, out, depth)?,
		},
		TypeDef::Result(ok, err) => match value {
			Value::Result(Ok(v)) => {
				out.push(0);
				encode_to(registry, ok, v, out, depth)?;
			}
			Value::Result(Err(e)) => {
				out.push(1);
				encode_to(registry, err, e, out, depth)?;
			}
			_ => return Err(Error::invalid_input(ty, value)),
		},
		TypeDef::Tuple(tys) => match value {
			Value::Tuple(vals) | Value::Sequence(vals) if vals.len() == tys.len() => {
				for (t, v) in tys.iter().zip(vals) {
					encode_to(registry, t, v, out, depth)?;
				}
			}
			v if tys.len() == 1 => encode_to(registry, &tys[0], v, out, depth)?,
			_ => return Err(Error::invalid_input(ty, value)),
		},
		TypeDef::Array { len, ty: inner } => {
			if registry.resolve_def(inner)?.is_u8() {
				let bytes = bytes_of(ty, value)?;
				if bytes.len() != *len {
					return Err(Error::invalid_input(ty, value));
				}
				out.extend(bytes);
			} else {
				match value {
					Value::Sequence(items) | Value::Tuple(items) if items.len() == *len => {
						for item in items {
							encode_to(registry, inner, item, out, depth)?;
						}
					}
					_ => return Err(Error::invalid_input(ty, value)),
				}
			}
		}
		TypeDef::Struct(fields) => match value {
			Value::Struct(vals) => {
				for field in fields {
					let v = vals
						.iter()
						.find(|(n, _)| *n == field.name)
						.map(|(_, v)| v)
						.ok_or_else(|| Error::invalid_input(ty, value))?;
					encode_to(registry, &field.ty, v, out, depth)?;
				}
			}
			Value::Tuple(vals) if vals.len() == fields.len() => {
				for (field, v) in fields.iter().zip(vals) {
					encode_to(registry, &field.ty, v, out, depth)?;
				}
			}
			v if fields.len() == 1 => encode_to(registry, &fields[0].ty, v, out, depth)?,
			_ => return Err(Error::invalid_input(ty, value)),
		},
		TypeDef::Enum(variants) => {
			let unit = Value::Null;
			let (name, payload) = match value {
				Value::Variant(name, payload) => (name.as_str(), payload.as_ref()),
				Value::Text(name) => (name.as_str(), &unit),
				_ => return Err(Error::invalid_input(ty, value)),
			};
			let variant =
				variants.iter().find(|v| v.name == name).ok_or_else(|| Error::invalid_input(ty, value))?;
			out.push(variant.index);
			encode_to(registry, &variant.ty, payload, out, depth)?;
		}
		TypeDef::Named(name) => encode_to(registry, &registry.resolve(name)?, value, out, depth)?,
		TypeDef::Call => match value {
			Value::Call(call) => encode_call_nested(registry, call, out, depth)?,
			_ => return Err(Error::invalid_input(ty, value)),
		},
		TypeDef::Era => match value {
			Value::Era(era) => era.encode_to(out),
			_ => return Err(Error::invalid_input(ty, value)),
		},
		TypeDef::Null => match value {
			Value::Null => (),
			Value::Tuple(vals) if vals.is_empty() => (),
			_ => return Err(Error::invalid_input(ty, value)),
		},
		TypeDef::Unsupported(name) => return Err(Error::UnsupportedType(name.clone())),
	}
	Ok(())
}

fn encode_some(registry: &Registry, inner: &TypeDef, value: &Value, out: &mut Vec<u8>, depth: usize) -> Result<(), Error> {
	if registry.resolve_def(inner)? == TypeDef::Primitive(Primitive::Bool) {
		match value {
			Value::Bool(true) => out.push(1),
			Value::Bool(false) => out.push(2),
			_ => return Err(Error::invalid_input("Option<bool>", value)),
		}
		return Ok(());
	}
	out.push(1);
	encode_to(registry, inner, value, out, depth)
}

fn encode_compact_as(
	registry: &Registry,
	inner: &TypeDef,
	value: &Value,
	out: &mut Vec<u8>,
	depth: usize,
) -> Result<(), Error> {
	let depth = descend(depth)?;
	match registry.resolve_def(inner)? {
		TypeDef::Primitive(prim) if prim.is_unsigned() => {
			let n = number(prim, value)?;
			if uint_value(prim, n).is_none() {
				return Err(Error::invalid_input(prim, value));
			}
			out.extend(encode_compact(n));
		}
		TypeDef::Struct(fields) if fields.len() == 1 => {
			let v = value.field(&fields[0].name).unwrap_or(value);
			encode_compact_as(registry, &fields[0].ty, v, out, depth)?;
		}
		TypeDef::Tuple(tys) if tys.len() == 1 => match value {
			Value::Tuple(vals) if vals.len() == 1 => encode_compact_as(registry, &tys[0], &vals[0], out, depth)?,
			v => encode_compact_as(registry, &tys[0], v, out, depth)?,
		},
		TypeDef::Null => (),
		other => return Err(Error::UnsupportedType(format!("Compact<{}>", other))),
	}
	Ok(())
}

/// Encode a call, checking its arguments against the active metadata.
pub(crate) fn encode_call(registry: &Registry, call: &CallValue, out: &mut Vec<u8>) -> Result<(), Error> {
	encode_call_nested(registry, call, out, 0)
}

fn encode_call_nested(registry: &Registry, call: &CallValue, out: &mut Vec<u8>, depth: usize) -> Result<(), Error> {
	let depth = descend(depth)?;
	let (module, meta) = registry.find_call(call.call_index[0], call.call_index[1])?;
	if meta.args.len() != call.args.len() {
		return Err(Error::ArgumentCount {
			section: module.name.clone(),
			method: meta.name.clone(),
			expected: meta.args.len(),
			got: call.args.len(),
		});
	}
	out.extend_from_slice(&call.call_index);
	for (arg, (_, value)) in meta.args.iter().zip(call.args.iter()) {
		encode_to(registry, &registry.resolve(&arg.ty)?, value, out, depth)?;
	}
	Ok(())
}

/// The value a type takes when constructed from nothing.
pub(crate) fn default_value(registry: &Registry, ty: &TypeDef) -> Result<Value, Error> {
	default_nested(registry, ty, 0)
}

fn default_nested(registry: &Registry, ty: &TypeDef, depth: usize) -> Result<Value, Error> {
	let depth = descend(depth)?;
	let value = match ty {
		TypeDef::Primitive(Primitive::Bool) => Value::Bool(false),
		TypeDef::Primitive(prim) if prim.is_unsigned() => uint_value(*prim, 0).unwrap_or(Value::U128(0)),
		TypeDef::Primitive(Primitive::I8) => Value::I8(0),
		TypeDef::Primitive(Primitive::I16) => Value::I16(0),
		TypeDef::Primitive(Primitive::I32) => Value::I32(0),
		TypeDef::Primitive(Primitive::I64) => Value::I64(0),
		TypeDef::Primitive(_) => Value::I128(0),
		TypeDef::Text => Value::Text(String::new()),
		TypeDef::Bytes => Value::Bytes(Vec::new()),
		TypeDef::Compact(inner) => default_nested(registry, inner, depth)?,
		TypeDef::Vec(_) => Value::Sequence(Vec::new()),
		TypeDef::Option(_) => Value::Option(None),
		TypeDef::Result(ok, _) => Value::Result(Ok(Box::new(default_nested(registry, ok, depth)?))),
		TypeDef::Tuple(tys) => {
			Value::Tuple(tys.iter().map(|t| default_nested(registry, t, depth)).collect::<Result<_, _>>()?)
		}
		TypeDef::Array { len, ty: inner } => {
			if registry.resolve_def(inner)?.is_u8() {
				Value::Bytes(vec![0; *len])
			} else {
				let item = default_nested(registry, inner, depth)?;
				Value::Sequence(vec![item; *len])
			}
		}
		TypeDef::Struct(fields) => Value::Struct(
			fields.iter().map(|f| Ok((f.name.clone(), default_nested(registry, &f.ty, depth)?))).collect::<Result<_, Error>>()?,
		),
		TypeDef::Enum(variants) => {
			let first = variants.iter().min_by_key(|v| v.index).ok_or_else(|| Error::invalid_input(ty, "empty enum"))?;
			Value::Variant(first.name.clone(), Box::new(default_nested(registry, &first.ty, depth)?))
		}
		TypeDef::Named(name) => default_nested(registry, &registry.resolve(name)?, depth)?,
		TypeDef::Call => Value::Call(CallValue {
			section: String::new(),
			method: String::new(),
			call_index: [0, 0],
			args: Vec::new(),
		}),
		TypeDef::Era => Value::Era(Era::Immortal),
		TypeDef::Null => Value::Null,
		TypeDef::Unsupported(name) => return Err(Error::UnsupportedType(name.clone())),
	};
	Ok(value)
}

/// Size of the length prefix a bare encoding of `ty` leaves out.
pub(crate) fn bare_prefix_len(registry: &Registry, ty: &TypeDef, encoded: &[u8]) -> Result<usize, Error> {
	match registry.resolve_def(ty)? {
		TypeDef::Text | TypeDef::Bytes | TypeDef::Vec(_) => Ok(compact::decode_compact(encoded)?.1),
		_ => Ok(0),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{regex, Field, Variant};

	fn round_trip(registry: &Registry, ty: &str, hex_str: &str) -> Value {
		let ty = regex::parse(ty);
		let bytes = hex::decode(hex_str).unwrap();
		let mut data = bytes.as_slice();
		let value = decode(registry, &ty, &mut data).unwrap();
		assert!(data.is_empty(), "{} bytes left decoding {}", data.len(), ty);
		assert_eq!(encode(registry, &ty, &value).unwrap(), bytes);
		value
	}

	#[test]
	fn should_round_trip_primitives() {
		let registry = Registry::new();
		assert_eq!(round_trip(&registry, "u32", "2a000000"), Value::U32(42));
		assert_eq!(round_trip(&registry, "i16", "feff"), Value::I16(-2));
		assert_eq!(round_trip(&registry, "bool", "01"), Value::Bool(true));
		assert_eq!(round_trip(&registry, "Compact<u64>", "d59d"), Value::U64(10101));
	}

	#[test]
	fn should_round_trip_containers() {
		let registry = Registry::new();
		assert_eq!(
			round_trip(&registry, "Vec<(u8, Option<u16>)>", "0801000201ff00"),
			Value::Sequence(vec![
				Value::Tuple(vec![Value::U8(1), Value::none()]),
				Value::Tuple(vec![Value::U8(2), Value::some(Value::U16(0xff))]),
			])
		);
		assert_eq!(round_trip(&registry, "[u8; 4]", "01020304"), Value::Bytes(vec![1, 2, 3, 4]));
		assert_eq!(round_trip(&registry, "Vec<u8>", "0c010203"), Value::Bytes(vec![1, 2, 3]));
		assert_eq!(round_trip(&registry, "Result<u8, bool>", "0100"), Value::Result(Err(Box::new(Value::Bool(false)))));
	}

	#[test]
	fn should_use_single_byte_for_option_bool() {
		let registry = Registry::new();
		assert_eq!(round_trip(&registry, "Option<bool>", "00"), Value::none());
		assert_eq!(round_trip(&registry, "Option<bool>", "01"), Value::some(Value::Bool(true)));
		assert_eq!(round_trip(&registry, "Option<bool>", "02"), Value::some(Value::Bool(false)));
	}

	#[test]
	fn should_round_trip_structs_and_enums() {
		let registry = Registry::new();
		let ty = TypeDef::Struct(vec![
			Field::new("id", TypeDef::Compact(Box::new(TypeDef::named("u32")))),
			Field::new(
				"status",
				TypeDef::Enum(vec![Variant::unit("Idle", 0), Variant::new("Busy", 3, TypeDef::named("Text"))]),
			),
		]);
		let value = Value::named([("id", Value::U32(1)), ("status", Value::variant("Busy", Value::from("hi")))]);
		let bytes = encode(&registry, &ty, &value).unwrap();
		assert_eq!(bytes, vec![0x04, 0x03, 0x08, b'h', b'i']);
		assert_eq!(decode(&registry, &ty, &mut bytes.as_slice()).unwrap(), value);
	}

	#[test]
	fn should_encode_lenient_numbers() {
		let registry = Registry::new();
		assert_eq!(encode(&registry, &regex::parse("u8"), &Value::U128(5)).unwrap(), vec![5]);
		assert_eq!(encode(&registry, &regex::parse("u16"), &Value::from("258")).unwrap(), vec![2, 1]);
		assert!(matches!(
			encode(&registry, &regex::parse("u8"), &Value::U32(256)),
			Err(Error::InvalidInputType { .. })
		));
		assert!(matches!(
			encode(&registry, &regex::parse("Compact<u8>"), &Value::U32(256)),
			Err(Error::InvalidInputType { .. })
		));
	}

	#[test]
	fn should_reject_bad_shapes() {
		let registry = Registry::new();
		assert!(matches!(
			encode(&registry, &regex::parse("[u8; 2]"), &Value::Bytes(vec![1])),
			Err(Error::InvalidInputType { .. })
		));
		assert!(matches!(
			encode(&registry, &regex::parse("Text"), &Value::U8(1)),
			Err(Error::InvalidInputType { .. })
		));
		assert!(matches!(
			decode(&registry, &regex::parse("Vec<u8>"), &mut &[0x10, 1, 2][..]),
			Err(Error::DecodeLengthExceeded { declared: 4, limit: 2 })
		));
	}

	#[test]
	fn should_build_defaults() {
		let registry = Registry::new();
		assert_eq!(default_value(&registry, &regex::parse("(u32, Vec<u8>, [u8; 2])")).unwrap(),
			Value::Tuple(vec![Value::U32(0), Value::Bytes(vec![]), Value::Bytes(vec![0, 0])]));
	}

	#[test]
	fn should_stop_at_nesting_limit() {
		let mut registry = Registry::new();
		registry.register_type("Nested", "Vec<Nested>");
		let ty = regex::parse("Nested");

		let mut shallow = vec![0x04; 10];
		shallow.push(0x00);
		let value = decode(&registry, &ty, &mut shallow.as_slice()).unwrap();
		assert_eq!(encode(&registry, &ty, &value).unwrap(), shallow);

		let mut deep = vec![0x04; 100_000];
		deep.push(0x00);
		assert!(matches!(
			decode(&registry, &ty, &mut deep.as_slice()),
			Err(Error::DepthLimitExceeded(MAX_DEPTH))
		));

		let mut value = Value::Sequence(Vec::new());
		for _ in 0..MAX_DEPTH {
			value = Value::Sequence(vec![value]);
		}
		assert!(matches!(encode(&registry, &ty, &value), Err(Error::DepthLimitExceeded(_))));
	}

	#[test]
	fn should_reject_self_referencing_defaults() {
		let mut registry = Registry::new();
		registry.register_type("Loop", "(Loop, u8)");
		assert!(matches!(
			default_value(&registry, &regex::parse("Loop")),
			Err(Error::DepthLimitExceeded(MAX_DEPTH))
		));
	}
}
