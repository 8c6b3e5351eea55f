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

//! Versioned runtime metadata.
//!
//! A metadata blob is the magic number `meta`, one version byte and the payload of
//! that version. [`MetadataVersioned`] decodes versions 9 through 14 and
//! [`MetadataVersioned::as_latest`] converts any of them into the single normalized
//! [`Metadata`] the rest of the crate works with.

mod latest;
mod legacy;
pub mod v10;
pub mod v11;
pub mod v12;
pub mod v13;
pub mod v14;
pub mod v9;

pub use self::latest::{
	CallArgMetadata, CallMetadata, ConstantMetadata, ErrorMetadata, EventMetadata, ExtrinsicMetadata, Metadata,
	ModuleMetadata, StorageEntryMetadata, StorageEntryModifier, StorageEntryType, StorageHasher, StorageMetadata,
};
pub use self::legacy::{
	ErrorMetadata as LegacyErrorMetadata, EventMetadata as LegacyEventMetadata,
	ExtrinsicMetadata as LegacyExtrinsicMetadata, FunctionArgumentMetadata, FunctionMetadata, IndexedModuleMetadata,
	ModuleConstantMetadata, ModuleMetadata as LegacyModuleMetadata, StorageEntryMetadata as LegacyStorageEntryMetadata,
	StorageEntryModifier as LegacyStorageEntryModifier, StorageMetadata as LegacyStorageMetadata,
};

use codec::{Decode, Encode};
use frame_metadata::v14::RuntimeMetadataV14;

/// `meta`, read little endian.
pub const META_RESERVED: u32 = 0x6174656d;

/// Metadata with no modules, used when a runtime supplies none.
pub const EMPTY: &[u8] = &[0x6d, 0x65, 0x74, 0x61, 0x09, 0x00];

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
	#[error("Invalid metadata prefix {0:#010x}")]
	InvalidMagic(u32),
	#[error("Metadata version {0} is not supported")]
	UnsupportedVersion(u8),
	#[error("Failed to decode metadata v{version}: {source}")]
	DecodeFailure {
		version: u8,
		#[source]
		source: codec::Error,
	},
	#[error("{remaining} bytes left over after decoding metadata v{version}")]
	TrailingBytes { version: u8, remaining: usize },
	#[error("Type {0} not found in the portable registry")]
	TypeNotFound(u32),
	#[error("Type {0} does not have the expected shape")]
	UnsupportedType(String),
}

/// The decoded payload of each supported version.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeMetadata {
	V9(v9::RuntimeMetadataV9),
	V10(v10::RuntimeMetadataV10),
	V11(v11::RuntimeMetadataV11),
	V12(v12::RuntimeMetadataV12),
	V13(v13::RuntimeMetadataV13),
	V14(RuntimeMetadataV14),
}

impl RuntimeMetadata {
	pub fn version(&self) -> u8 {
		match self {
			RuntimeMetadata::V9(_) => 9,
			RuntimeMetadata::V10(_) => 10,
			RuntimeMetadata::V11(_) => 11,
			RuntimeMetadata::V12(_) => 12,
			RuntimeMetadata::V13(_) => 13,
			RuntimeMetadata::V14(_) => 14,
		}
	}

	fn encode_payload(&self) -> Vec<u8> {
		match self {
			RuntimeMetadata::V9(m) => m.encode(),
			RuntimeMetadata::V10(m) => m.encode(),
			RuntimeMetadata::V11(m) => m.encode(),
			RuntimeMetadata::V12(m) => m.encode(),
			RuntimeMetadata::V13(m) => m.encode(),
			RuntimeMetadata::V14(m) => m.encode(),
		}
	}
}

/// Metadata as found on chain, in the version it was published in.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataVersioned {
	metadata: RuntimeMetadata,
}

fn decode_all<T: Decode>(version: u8, payload: &[u8]) -> Result<T, MetadataError> {
	let mut input = payload;
	let metadata = T::decode(&mut input).map_err(|source| MetadataError::DecodeFailure { version, source })?;
	if !input.is_empty() {
		return Err(MetadataError::TrailingBytes { version, remaining: input.len() });
	}
	Ok(metadata)
}

impl MetadataVersioned {
	/// Decode a metadata blob. An empty blob decodes as [`EMPTY`].
	///
	/// Some chains published v10 metadata under version byte 9. When a v9 payload fails
	/// to decode it is retried once as v10.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetadataError> {
		let bytes = if bytes.is_empty() { EMPTY } else { bytes };
		let mut input = bytes;
		let magic = u32::decode(&mut input).map_err(|source| MetadataError::DecodeFailure { version: 0, source })?;
		if magic != META_RESERVED {
			return Err(MetadataError::InvalidMagic(magic));
		}
		let version = u8::decode(&mut input).map_err(|source| MetadataError::DecodeFailure { version: 0, source })?;
		log::debug!("decoding metadata v{}", version);

		let metadata = match Self::decode_version(version, input) {
			Err(e) if version == 9 => {
				log::warn!("metadata v9 failed to decode ({}), retrying as v10", e);
				Self::decode_version(10, input)?
			}
			other => other?,
		};
		Ok(MetadataVersioned { metadata })
	}

	fn decode_version(version: u8, payload: &[u8]) -> Result<RuntimeMetadata, MetadataError> {
		let metadata = match version {
			9 => RuntimeMetadata::V9(decode_all(version, payload)?),
			10 => RuntimeMetadata::V10(decode_all(version, payload)?),
			11 => RuntimeMetadata::V11(decode_all(version, payload)?),
			12 => RuntimeMetadata::V12(decode_all(version, payload)?),
			13 => RuntimeMetadata::V13(decode_all(version, payload)?),
			14 => RuntimeMetadata::V14(decode_all(version, payload)?),
			v => return Err(MetadataError::UnsupportedVersion(v)),
		};
		Ok(metadata)
	}

	/// Version of the decoded payload. After the v9 fallback this is 10.
	pub fn version(&self) -> u8 {
		self.metadata.version()
	}

	pub fn metadata(&self) -> &RuntimeMetadata {
		&self.metadata
	}

	/// True for metadata without any modules, such as [`EMPTY`].
	pub fn is_empty_sentinel(&self) -> bool {
		matches!(&self.metadata, RuntimeMetadata::V9(m) if m.modules.is_empty())
	}

	/// Convert into the normalized form.
	pub fn as_latest(&self) -> Result<Metadata, MetadataError> {
		let metadata = match self.metadata.clone() {
			RuntimeMetadata::V9(m) => m.into(),
			RuntimeMetadata::V10(m) => m.into(),
			RuntimeMetadata::V11(m) => m.into(),
			RuntimeMetadata::V12(m) => m.into(),
			RuntimeMetadata::V13(m) => m.into(),
			RuntimeMetadata::V14(m) => Metadata::try_from(m)?,
		};
		Ok(metadata)
	}

	/// Encode the envelope: magic, version, payload.
	pub fn to_u8a(&self) -> Vec<u8> {
		let mut out = META_RESERVED.encode();
		out.push(self.version());
		out.extend(self.metadata.encode_payload());
		out
	}
}

impl From<RuntimeMetadata> for MetadataVersioned {
	fn from(metadata: RuntimeMetadata) -> Self {
		MetadataVersioned { metadata }
	}
}
