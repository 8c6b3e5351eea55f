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

//! Metadata-driven SCALE codecs for Substrate runtimes.
//!
//! A [`Registry`] maps type names to codec constructors and holds the active runtime
//! [`Metadata`]. Metadata blobs of any version from 9 to 14 are decoded through
//! [`MetadataVersioned`] and normalized before anything else looks at them.
//! The [`decorate`] functions turn normalized metadata into name-addressed maps of call
//! constructors, storage-key builders and constants, and [`Extrinsic`] encodes and decodes
//! the transaction envelope against the same registry.
//!
//! ```ignore
//! let mut registry = Registry::new();
//! let metadata = MetadataVersioned::from_bytes(&bytes)?.as_latest()?;
//! registry.set_metadata(metadata);
//! let decorated = decorate::decorate_metadata(&registry, registry.metadata());
//! let key = decorated.query.get("system").and_then(|s| s.get("account")).unwrap().key(&[alice])?;
//! ```

#![forbid(unsafe_code)]

pub mod codec;
pub mod compact;
pub mod decorate;
mod error;
pub mod extrinsic;
pub mod metadata;
pub mod regex;
pub mod registry;
#[cfg(test)]
mod test_suite;
mod type_def;
mod value;

pub use self::{
	codec::{Codec, CodecInput, TypeExtra},
	error::Error,
	extrinsic::{Call, Extrinsic, SignatureOptions, Signer},
	metadata::{Metadata, MetadataError, MetadataVersioned},
	registry::{Registry, RegistryBuilder, TypeFactory},
	type_def::{Field, Primitive, TypeDef, Variant},
	value::{CallValue, Value},
};
pub use subscale_common::{Hash, HashFn, SpecVersion};
