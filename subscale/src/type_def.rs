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

use std::fmt;

/// Fixed-width primitives of the SCALE format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Primitive {
	#[display(fmt = "bool")]
	Bool,
	#[display(fmt = "u8")]
	U8,
	#[display(fmt = "u16")]
	U16,
	#[display(fmt = "u32")]
	U32,
	#[display(fmt = "u64")]
	U64,
	#[display(fmt = "u128")]
	U128,
	#[display(fmt = "i8")]
	I8,
	#[display(fmt = "i16")]
	I16,
	#[display(fmt = "i32")]
	I32,
	#[display(fmt = "i64")]
	I64,
	#[display(fmt = "i128")]
	I128,
}

impl Primitive {
	pub fn from_name(s: &str) -> Option<Primitive> {
		let prim = match s {
			"bool" => Primitive::Bool,
			"u8" => Primitive::U8,
			"u16" => Primitive::U16,
			"u32" => Primitive::U32,
			"u64" => Primitive::U64,
			"u128" => Primitive::U128,
			"i8" => Primitive::I8,
			"i16" => Primitive::I16,
			"i32" => Primitive::I32,
			"i64" => Primitive::I64,
			"i128" => Primitive::I128,
			_ => return None,
		};
		Some(prim)
	}

	pub fn is_unsigned(&self) -> bool {
		matches!(self, Primitive::U8 | Primitive::U16 | Primitive::U32 | Primitive::U64 | Primitive::U128)
	}
}

/// The structural shape of a type.
///
/// Everything the registry can encode or decode reduces to one of these. `Named`
/// refers to another registered type and is resolved through the registry when a
/// value is encoded or decoded, which keeps definitions late-bound: a chain can
/// override `Balance` after `Vec<Balance>` has been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
	Primitive(Primitive),
	/// Compact-length prefixed UTF-8.
	Text,
	/// Compact-length prefixed bytes.
	Bytes,
	Compact(Box<TypeDef>),
	Vec(Box<TypeDef>),
	Option(Box<TypeDef>),
	Result(Box<TypeDef>, Box<TypeDef>),
	Tuple(Vec<TypeDef>),
	Array { len: usize, ty: Box<TypeDef> },
	Struct(Vec<Field>),
	Enum(Vec<Variant>),
	Named(String),
	/// A call into the runtime, decoded against the active metadata.
	Call,
	/// Mortality of an extrinsic.
	Era,
	Null,
	/// Known to the metadata but not representable as a value.
	Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
	pub name: String,
	pub ty: TypeDef,
}

impl Field {
	pub fn new(name: impl Into<String>, ty: TypeDef) -> Self {
		Field { name: name.into(), ty }
	}
}

/// One variant of an enum. Unit variants carry [`TypeDef::Null`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
	pub name: String,
	pub index: u8,
	pub ty: TypeDef,
}

impl Variant {
	pub fn new(name: impl Into<String>, index: u8, ty: TypeDef) -> Self {
		Variant { name: name.into(), index, ty }
	}

	pub fn unit(name: impl Into<String>, index: u8) -> Self {
		Variant::new(name, index, TypeDef::Null)
	}
}

impl TypeDef {
	pub fn named(name: impl Into<String>) -> Self {
		TypeDef::Named(name.into())
	}

	/// An enum whose variants are indexed by position.
	pub fn indexed_enum(variants: Vec<(&str, TypeDef)>) -> Self {
		TypeDef::Enum(variants.into_iter().enumerate().map(|(i, (name, ty))| Variant::new(name, i as u8, ty)).collect())
	}

	pub fn is_u8(&self) -> bool {
		matches!(self, TypeDef::Primitive(Primitive::U8))
	}
}

impl fmt::Display for TypeDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TypeDef::Primitive(p) => write!(f, "{}", p),
			TypeDef::Text => write!(f, "Text"),
			TypeDef::Bytes => write!(f, "Bytes"),
			TypeDef::Compact(t) => write!(f, "Compact<{}>", t),
			TypeDef::Vec(t) => write!(f, "Vec<{}>", t),
			TypeDef::Option(t) => write!(f, "Option<{}>", t),
			TypeDef::Result(ok, err) => write!(f, "Result<{}, {}>", ok, err),
			TypeDef::Tuple(tys) => {
				write!(f, "(")?;
				for (i, ty) in tys.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}", ty)?;
				}
				write!(f, ")")
			}
			TypeDef::Array { len, ty } => write!(f, "[{}; {}]", ty, len),
			TypeDef::Struct(fields) => {
				write!(f, "{{")?;
				for (i, field) in fields.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}: {}", field.name, field.ty)?;
				}
				write!(f, "}}")
			}
			TypeDef::Enum(variants) => {
				let names = variants.iter().map(|v| v.name.as_str()).collect::<Vec<_>>();
				write!(f, "{{_enum: [{}]}}", names.join(", "))
			}
			TypeDef::Named(name) => write!(f, "{}", name),
			TypeDef::Call => write!(f, "Call"),
			TypeDef::Era => write!(f, "ExtrinsicEra"),
			TypeDef::Null => write!(f, "Null"),
			TypeDef::Unsupported(name) => write!(f, "{}", name),
		}
	}
}
