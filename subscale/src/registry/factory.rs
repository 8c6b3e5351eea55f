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

//! Constructors the registry dispatches to by type name.

use crate::{
	codec::{Bytes, Raw, Text, TypeValue},
	Call, Codec, CodecInput, Error, Extrinsic, Registry, TypeDef, TypeExtra,
};
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Builds codecs of one registered type.
pub trait TypeFactory: DynClone + Debug {
	/// Structural shape of the type, used when it appears nested inside another type.
	fn shape(&self) -> TypeDef;

	/// Construct a top-level value of this type.
	fn construct<'r>(
		&self,
		registry: &'r Registry,
		name: &str,
		input: CodecInput<'_>,
		extra: &TypeExtra,
	) -> Result<Box<dyn Codec + 'r>, Error>;
}

dyn_clone::clone_trait_object!(TypeFactory);

/// A type described purely by its structure.
#[derive(Debug, Clone)]
pub struct Definition(pub TypeDef);

impl TypeFactory for Definition {
	fn shape(&self) -> TypeDef {
		self.0.clone()
	}

	fn construct<'r>(
		&self,
		registry: &'r Registry,
		name: &str,
		input: CodecInput<'_>,
		_: &TypeExtra,
	) -> Result<Box<dyn Codec + 'r>, Error> {
		Ok(Box::new(TypeValue::new(registry, name, self.0.clone(), input)?))
	}
}

#[derive(Debug, Clone)]
pub struct TextFactory;

impl TypeFactory for TextFactory {
	fn shape(&self) -> TypeDef {
		TypeDef::Text
	}

	fn construct<'r>(
		&self,
		registry: &'r Registry,
		_: &str,
		input: CodecInput<'_>,
		_: &TypeExtra,
	) -> Result<Box<dyn Codec + 'r>, Error> {
		Ok(Box::new(Text::new(registry, input)?))
	}
}

#[derive(Debug, Clone)]
pub struct BytesFactory;

impl TypeFactory for BytesFactory {
	fn shape(&self) -> TypeDef {
		TypeDef::Bytes
	}

	fn construct<'r>(
		&self,
		registry: &'r Registry,
		_: &str,
		input: CodecInput<'_>,
		_: &TypeExtra,
	) -> Result<Box<dyn Codec + 'r>, Error> {
		Ok(Box::new(Bytes::new(registry, input)?))
	}
}

/// Raw bytes have no self-describing length, so they cannot be nested.
#[derive(Debug, Clone)]
pub struct RawFactory;

impl TypeFactory for RawFactory {
	fn shape(&self) -> TypeDef {
		TypeDef::Unsupported("Raw".into())
	}

	fn construct<'r>(
		&self,
		registry: &'r Registry,
		_: &str,
		input: CodecInput<'_>,
		_: &TypeExtra,
	) -> Result<Box<dyn Codec + 'r>, Error> {
		Ok(Box::new(Raw::new(registry, input)?))
	}
}

#[derive(Debug, Clone)]
pub struct CallFactory;

impl TypeFactory for CallFactory {
	fn shape(&self) -> TypeDef {
		TypeDef::Call
	}

	fn construct<'r>(
		&self,
		registry: &'r Registry,
		_: &str,
		input: CodecInput<'_>,
		_: &TypeExtra,
	) -> Result<Box<dyn Codec + 'r>, Error> {
		Ok(Box::new(Call::new(registry, input)?))
	}
}

/// Extrinsics nest as opaque length-prefixed bytes, as they do inside a block body.
#[derive(Debug, Clone)]
pub struct ExtrinsicFactory;

impl TypeFactory for ExtrinsicFactory {
	fn shape(&self) -> TypeDef {
		TypeDef::Bytes
	}

	fn construct<'r>(
		&self,
		registry: &'r Registry,
		_: &str,
		input: CodecInput<'_>,
		extra: &TypeExtra,
	) -> Result<Box<dyn Codec + 'r>, Error> {
		Ok(Box::new(Extrinsic::from_input(registry, input, extra)?))
	}
}
