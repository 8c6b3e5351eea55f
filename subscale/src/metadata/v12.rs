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

//! Metadata v12. Modules carry their pallet index.

use super::{
	latest,
	legacy::{self, ExtrinsicMetadata, IndexedModuleMetadata},
	v11::StorageEntryType,
};
use codec::{Decode, Encode};

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct RuntimeMetadataV12 {
	pub modules: Vec<IndexedModuleMetadata<StorageEntryType>>,
	pub extrinsic: ExtrinsicMetadata,
}

impl From<RuntimeMetadataV12> for latest::Metadata {
	fn from(metadata: RuntimeMetadataV12) -> Self {
		latest::Metadata {
			version: 12,
			modules: legacy::convert_modules(metadata.modules),
			extrinsic: metadata.extrinsic.into(),
			types: Vec::new(),
		}
	}
}
