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

use crate::metadata::MetadataError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A length prefix declared more bytes than the buffer holds or than policy allows.
	#[error("Declared length {declared} exceeds the limit of {limit} bytes")]
	DecodeLengthExceeded { declared: usize, limit: usize },
	#[error("{remaining} bytes left over after decoding {ty}")]
	TrailingBytes { ty: String, remaining: usize },
	#[error("Cannot construct {ty} from {input}")]
	InvalidInputType { ty: String, input: String },
	/// Types nest deeper than the engine walks, as with a self-referencing definition.
	#[error("Type nesting exceeds the limit of {0} levels")]
	DepthLimitExceeded(usize),
	#[error("Type {0} is not registered")]
	UnknownType(String),
	#[error(transparent)]
	Metadata(#[from] MetadataError),
	#[error(transparent)]
	Codec(#[from] codec::Error),
	#[error(transparent)]
	Hex(#[from] hex::FromHexError),
	#[error(transparent)]
	Json(#[from] serde_json::Error),
	#[error("No call found at index {0}:{1}")]
	UnknownCall(u8, u8),
	#[error("Module {0} not found")]
	ModuleNotFound(String),
	#[error("{section}.{method} expects {expected} arguments, got {got}")]
	ArgumentCount { section: String, method: String, expected: usize, got: usize },
	#[error("{section}.{method} expects {expected} storage keys, got {got}")]
	StorageArgs { section: String, method: String, expected: usize, got: usize },
	#[error("Values of {0} cannot be encoded or decoded")]
	UnsupportedType(String),
	#[error("{0}")]
	Fail(String),
}

impl Error {
	pub(crate) fn invalid_input(ty: impl ToString, input: impl std::fmt::Debug) -> Self {
		Error::InvalidInputType { ty: ty.to_string(), input: format!("{:?}", input) }
	}
}

impl From<&str> for Error {
	fn from(e: &str) -> Error {
		Error::Fail(e.to_string())
	}
}

impl From<String> for Error {
	fn from(e: String) -> Error {
		Error::Fail(e)
	}
}
