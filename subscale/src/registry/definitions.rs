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

//! Type definitions in the polkadot-js JSON format.
//!
//! Each key of the top level object names a type. Values are one of
//! - a type string, `"Balance": "u128"`
//! - a struct, `{"free": "Balance", "reserved": "Balance"}`
//! - an enum, `{"_enum": ["A", "B"]}` or `{"_enum": {"A": "u32", "B": null}}`.
//!   Enums whose variants all map to numbers use those numbers as indices.
//! - a set of bit flags, `{"_set": {"_bitLength": 8, "A": 1, "B": 2}}`

use super::factory::{BytesFactory, CallFactory, Definition, ExtrinsicFactory, RawFactory, TextFactory, TypeFactory};
use crate::{regex, Error, Field, Primitive, TypeDef, Variant};
use serde_json::{Map, Value};

pub const DEFAULT: &str = include_str!("./definitions/default.json");

/// Types with a dedicated codec rather than a structural definition.
pub fn builtins() -> Vec<(&'static str, Box<dyn TypeFactory>)> {
	vec![
		("Text", Box::new(TextFactory)),
		("String", Box::new(TextFactory)),
		("Str", Box::new(TextFactory)),
		("Bytes", Box::new(BytesFactory)),
		("Vec<u8>", Box::new(BytesFactory)),
		("Raw", Box::new(RawFactory)),
		("Call", Box::new(CallFactory)),
		("Proposal", Box::new(CallFactory)),
		("Extrinsic", Box::new(ExtrinsicFactory)),
		("ExtrinsicEra", Box::new(Definition(TypeDef::Era))),
		("Era", Box::new(Definition(TypeDef::Era))),
	]
}

/// Parse a JSON object of type definitions, keeping declaration order.
pub fn parse(json: &str) -> Result<Vec<(String, TypeDef)>, Error> {
	let types: Map<String, Value> = serde_json::from_str(json)?;
	types.into_iter().map(|(name, def)| Ok((name.clone(), parse_definition(&name, def)?))).collect()
}

fn parse_definition(name: &str, def: Value) -> Result<TypeDef, Error> {
	match def {
		Value::String(s) => Ok(regex::parse(&s)),
		Value::Object(mut obj) => {
			if obj.len() == 1 {
				if let Some(v) = obj.get("_enum") {
					return parse_enum(v);
				}
				if let Some(v) = obj.get("_set") {
					return parse_set(v);
				}
			}
			obj.remove("_alias");
			obj.remove("_fallback");
			parse_struct(&obj)
		}
		Value::Array(a) => parse_tuple(&a),
		Value::Null => Ok(TypeDef::Null),
		other => Err(Error::invalid_input(name, other)),
	}
}

fn parse_field(value: &Value) -> Result<TypeDef, Error> {
	match value {
		Value::Null => Ok(TypeDef::Null),
		Value::String(s) => Ok(regex::parse(s)),
		Value::Object(o) => match o.get("_enum") {
			Some(v) if o.len() == 1 => parse_enum(v),
			_ => parse_struct(o),
		},
		Value::Array(a) => parse_tuple(a),
		other => Err(Error::invalid_input("field", other)),
	}
}

fn parse_struct(obj: &Map<String, Value>) -> Result<TypeDef, Error> {
	let fields = obj.iter().map(|(key, value)| Ok(Field::new(key, parse_field(value)?))).collect::<Result<_, Error>>()?;
	Ok(TypeDef::Struct(fields))
}

fn parse_tuple(values: &[Value]) -> Result<TypeDef, Error> {
	Ok(TypeDef::Tuple(values.iter().map(parse_field).collect::<Result<_, _>>()?))
}

fn variant_index(i: usize) -> Result<u8, Error> {
	u8::try_from(i).map_err(|_| Error::invalid_input("enum", format!("{} variants", i + 1)))
}

fn parse_enum(value: &Value) -> Result<TypeDef, Error> {
	let variants = match value {
		Value::Array(names) => names
			.iter()
			.enumerate()
			.map(|(i, n)| match n {
				Value::String(name) => Ok(Variant::unit(name, variant_index(i)?)),
				other => Err(Error::invalid_input("enum", other)),
			})
			.collect::<Result<_, Error>>()?,
		// Variants given explicit indices, as `ProxyType` is on some chains.
		Value::Object(obj) if obj.values().all(Value::is_number) => {
			let mut variants = obj
				.iter()
				.map(|(name, n)| {
					let index = n.as_u64().and_then(|n| u8::try_from(n).ok()).ok_or_else(|| Error::invalid_input("enum", n))?;
					Ok(Variant::unit(name, index))
				})
				.collect::<Result<Vec<_>, Error>>()?;
			variants.sort_by_key(|v| v.index);
			variants
		}
		Value::Object(obj) => obj
			.iter()
			.enumerate()
			.map(|(i, (name, ty))| Ok(Variant::new(name, variant_index(i)?, parse_field(ty)?)))
			.collect::<Result<_, Error>>()?,
		other => return Err(Error::invalid_input("enum", other)),
	};
	Ok(TypeDef::Enum(variants))
}

/// Sets are bit flags over an unsigned integer of `_bitLength` bits.
fn parse_set(value: &Value) -> Result<TypeDef, Error> {
	let bits = value.get("_bitLength").and_then(Value::as_u64).unwrap_or(8);
	let prim = match bits {
		8 => Primitive::U8,
		16 => Primitive::U16,
		32 => Primitive::U32,
		64 => Primitive::U64,
		128 => Primitive::U128,
		_ => return Err(Error::invalid_input("set", value)),
	};
	Ok(TypeDef::Primitive(prim))
}
