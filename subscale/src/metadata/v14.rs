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

//! Metadata v14, which describes every type in a portable registry.
//!
//! Each registry entry becomes a `Lookup{id}` definition in the normalized metadata.
//! Calls, events and errors are read from the variants of their pallet enums.

use super::{latest, MetadataError};
use crate::{Field, Primitive, TypeDef, Variant};
use frame_metadata::v14::{
	PalletMetadata, RuntimeMetadataV14, StorageEntryModifier, StorageEntryType, StorageHasher,
};
use heck::ToLowerCamelCase;
use scale_info::{form::PortableForm, PortableRegistry, Type, TypeDefPrimitive};

/// Name under which the portable type `id` is registered.
pub fn lookup_name(id: u32) -> String {
	format!("Lookup{}", id)
}

fn lookup(id: u32) -> TypeDef {
	TypeDef::Named(lookup_name(id))
}

fn resolve(types: &PortableRegistry, id: u32) -> Result<&Type<PortableForm>, MetadataError> {
	types.resolve(id).ok_or(MetadataError::TypeNotFound(id))
}

fn path_is(ty: &Type<PortableForm>, path: &[&str]) -> bool {
	ty.path.segments.iter().map(String::as_str).eq(path.iter().copied())
}

fn type_param(ty: &Type<PortableForm>, name: &str) -> Option<u32> {
	ty.type_params.iter().find(|p| p.name == name).and_then(|p| p.ty.as_ref()).map(|t| t.id)
}

fn fields_def(fields: &[scale_info::Field<PortableForm>]) -> TypeDef {
	match fields {
		[] => TypeDef::Null,
		[single] if single.name.is_none() => lookup(single.ty.id),
		_ if fields.iter().all(|f| f.name.is_none()) => TypeDef::Tuple(fields.iter().map(|f| lookup(f.ty.id)).collect()),
		_ => TypeDef::Struct(
			fields
				.iter()
				.enumerate()
				.map(|(i, f)| {
					let name = f.name.as_ref().map(|n| n.to_lower_camel_case()).unwrap_or_else(|| i.to_string());
					Field::new(name, lookup(f.ty.id))
				})
				.collect(),
		),
	}
}

/// Structural definition of one portable type.
fn convert_type(types: &PortableRegistry, ty: &Type<PortableForm>) -> Result<TypeDef, MetadataError> {
	use scale_info::TypeDef as Def;

	// `Option<bool>` has its own encoding, so options keep their identity.
	if path_is(ty, &["Option"]) {
		if let Some(inner) = type_param(ty, "T") {
			return Ok(TypeDef::Option(Box::new(lookup(inner))));
		}
	}
	if path_is(ty, &["sp_runtime", "generic", "era", "Era"]) {
		return Ok(TypeDef::Era);
	}

	let def = match &ty.type_def {
		Def::Composite(composite) => fields_def(&composite.fields),
		Def::Variant(variant) => TypeDef::Enum(
			variant.variants.iter().map(|v| Variant::new(v.name.clone(), v.index, fields_def(&v.fields))).collect(),
		),
		Def::Sequence(seq) => {
			let inner = resolve(types, seq.type_param.id)?;
			if matches!(inner.type_def, Def::Primitive(TypeDefPrimitive::U8)) {
				TypeDef::Bytes
			} else {
				TypeDef::Vec(Box::new(lookup(seq.type_param.id)))
			}
		}
		Def::Array(array) => TypeDef::Array { len: array.len as usize, ty: Box::new(lookup(array.type_param.id)) },
		Def::Tuple(tuple) if tuple.fields.is_empty() => TypeDef::Null,
		Def::Tuple(tuple) => TypeDef::Tuple(tuple.fields.iter().map(|f| lookup(f.id)).collect()),
		Def::Primitive(prim) => convert_primitive(prim),
		Def::Compact(compact) => TypeDef::Compact(Box::new(lookup(compact.type_param.id))),
		Def::BitSequence(_) => TypeDef::Unsupported("BitVec".into()),
	};
	Ok(def)
}

fn convert_primitive(prim: &TypeDefPrimitive) -> TypeDef {
	let prim = match prim {
		TypeDefPrimitive::Bool => Primitive::Bool,
		TypeDefPrimitive::Str => return TypeDef::Text,
		TypeDefPrimitive::U8 => Primitive::U8,
		TypeDefPrimitive::U16 => Primitive::U16,
		TypeDefPrimitive::U32 => Primitive::U32,
		TypeDefPrimitive::U64 => Primitive::U64,
		TypeDefPrimitive::U128 => Primitive::U128,
		TypeDefPrimitive::I8 => Primitive::I8,
		TypeDefPrimitive::I16 => Primitive::I16,
		TypeDefPrimitive::I32 => Primitive::I32,
		TypeDefPrimitive::I64 => Primitive::I64,
		TypeDefPrimitive::I128 => Primitive::I128,
		TypeDefPrimitive::Char => return TypeDef::Unsupported("char".into()),
		TypeDefPrimitive::U256 => return TypeDef::Unsupported("u256".into()),
		TypeDefPrimitive::I256 => return TypeDef::Unsupported("i256".into()),
	};
	TypeDef::Primitive(prim)
}

fn variants_of<'a>(
	types: &'a PortableRegistry,
	id: u32,
) -> Result<&'a [scale_info::Variant<PortableForm>], MetadataError> {
	match &resolve(types, id)?.type_def {
		scale_info::TypeDef::Variant(v) => Ok(&v.variants),
		_ => Err(MetadataError::UnsupportedType(lookup_name(id))),
	}
}

fn convert_hasher(hasher: &StorageHasher) -> latest::StorageHasher {
	match hasher {
		StorageHasher::Blake2_128 => latest::StorageHasher::Blake2_128,
		StorageHasher::Blake2_256 => latest::StorageHasher::Blake2_256,
		StorageHasher::Blake2_128Concat => latest::StorageHasher::Blake2_128Concat,
		StorageHasher::Twox128 => latest::StorageHasher::Twox128,
		StorageHasher::Twox256 => latest::StorageHasher::Twox256,
		StorageHasher::Twox64Concat => latest::StorageHasher::Twox64Concat,
		StorageHasher::Identity => latest::StorageHasher::Identity,
	}
}

fn convert_entry_type(
	types: &PortableRegistry,
	ty: &StorageEntryType<PortableForm>,
) -> Result<latest::StorageEntryType, MetadataError> {
	let entry = match ty {
		StorageEntryType::Plain(value) => latest::StorageEntryType::Plain(lookup_name(value.id)),
		StorageEntryType::Map { hashers, key, value } => {
			let hashers = hashers.iter().map(convert_hasher).collect::<Vec<_>>();
			// Maps with several hashers take a tuple key, one element per hasher.
			let keys = match &resolve(types, key.id)?.type_def {
				scale_info::TypeDef::Tuple(tuple) if hashers.len() > 1 && tuple.fields.len() == hashers.len() => {
					tuple.fields.iter().map(|f| lookup_name(f.id)).collect()
				}
				_ => vec![lookup_name(key.id)],
			};
			latest::StorageEntryType::Map { hashers, keys, value: lookup_name(value.id) }
		}
	};
	Ok(entry)
}

fn convert_pallet(
	types: &PortableRegistry,
	pallet: &PalletMetadata<PortableForm>,
) -> Result<latest::ModuleMetadata, MetadataError> {
	let storage = match &pallet.storage {
		Some(storage) => Some(latest::StorageMetadata {
			prefix: storage.prefix.clone(),
			items: storage
				.entries
				.iter()
				.map(|e| {
					Ok(latest::StorageEntryMetadata {
						name: e.name.clone(),
						modifier: match e.modifier {
							StorageEntryModifier::Optional => latest::StorageEntryModifier::Optional,
							StorageEntryModifier::Default => latest::StorageEntryModifier::Default,
						},
						ty: convert_entry_type(types, &e.ty)?,
						default: e.default.clone(),
						docs: e.docs.clone(),
					})
				})
				.collect::<Result<_, MetadataError>>()?,
		}),
		None => None,
	};

	let calls = match &pallet.calls {
		Some(calls) => variants_of(types, calls.ty.id)?
			.iter()
			.map(|v| latest::CallMetadata {
				name: v.name.clone(),
				index: v.index,
				args: v
					.fields
					.iter()
					.enumerate()
					.map(|(i, f)| latest::CallArgMetadata {
						name: f.name.clone().unwrap_or_else(|| format!("arg{}", i)),
						ty: lookup_name(f.ty.id),
					})
					.collect(),
				docs: v.docs.clone(),
			})
			.collect(),
		None => Vec::new(),
	};

	let events = match &pallet.event {
		Some(event) => variants_of(types, event.ty.id)?
			.iter()
			.map(|v| latest::EventMetadata {
				name: v.name.clone(),
				index: v.index,
				args: v.fields.iter().map(|f| lookup_name(f.ty.id)).collect(),
				docs: v.docs.clone(),
			})
			.collect(),
		None => Vec::new(),
	};

	let errors = match &pallet.error {
		Some(error) => variants_of(types, error.ty.id)?
			.iter()
			.map(|v| latest::ErrorMetadata { name: v.name.clone(), index: v.index, docs: v.docs.clone() })
			.collect(),
		None => Vec::new(),
	};

	let constants = pallet
		.constants
		.iter()
		.map(|c| latest::ConstantMetadata {
			name: c.name.clone(),
			ty: lookup_name(c.ty.id),
			value: c.value.clone(),
			docs: c.docs.clone(),
		})
		.collect();

	Ok(latest::ModuleMetadata {
		name: pallet.name.clone(),
		index: pallet.index,
		call_index: pallet.calls.as_ref().map(|_| pallet.index),
		storage,
		calls,
		events,
		constants,
		errors,
	})
}

impl TryFrom<RuntimeMetadataV14> for latest::Metadata {
	type Error = MetadataError;

	fn try_from(metadata: RuntimeMetadataV14) -> Result<Self, Self::Error> {
		let registry = &metadata.types;
		let mut types = registry
			.types
			.iter()
			.map(|t| Ok((lookup_name(t.id), convert_type(registry, &t.ty)?)))
			.collect::<Result<Vec<_>, MetadataError>>()?;

		// The extrinsic type names the address and signature types signed extrinsics use.
		let extrinsic_ty = resolve(registry, metadata.extrinsic.ty.id)?;
		if let Some(address) = type_param(extrinsic_ty, "Address") {
			types.push(("Address".into(), lookup(address)));
		}
		if let Some(signature) = type_param(extrinsic_ty, "Signature") {
			types.push(("ExtrinsicSignature".into(), lookup(signature)));
		}

		let modules = metadata.pallets.iter().map(|p| convert_pallet(registry, p)).collect::<Result<_, _>>()?;

		Ok(latest::Metadata {
			version: 14,
			modules,
			extrinsic: latest::ExtrinsicMetadata {
				version: metadata.extrinsic.version,
				signed_extensions: metadata.extrinsic.signed_extensions.iter().map(|e| e.identifier.clone()).collect(),
			},
			types,
		})
	}
}
