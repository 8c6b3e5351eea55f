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

use crate::{
	codec::{engine, Codec, CodecInput, TypeValue},
	compact, Error, Hash, Registry, SpecVersion, Value,
};
use codec::{Compact, Decode, Encode};
use sp_runtime::generic::Era;

/// Name of the registry type signers are encoded as.
pub const SIGNER_TYPE: &str = "Address";
/// Name of the registry type signatures are encoded as.
pub const SIGNATURE_TYPE: &str = "ExtrinsicSignature";

/// Everything a signature commits to besides the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureOptions {
	pub era: Era,
	pub nonce: u64,
	pub tip: u128,
	/// Checkpoint block for mortal eras.
	pub block_hash: Hash,
	pub genesis_hash: Hash,
	pub spec_version: SpecVersion,
	pub transaction_version: u32,
}

impl Default for SignatureOptions {
	fn default() -> Self {
		SignatureOptions {
			era: Era::Immortal,
			nonce: 0,
			tip: 0,
			block_hash: Hash::zero(),
			genesis_hash: Hash::zero(),
			spec_version: 0,
			transaction_version: 0,
		}
	}
}

/// Produces the SCALE encoded [`SIGNATURE_TYPE`] for a signing payload.
pub trait Signer {
	fn sign(&self, payload: &[u8]) -> Vec<u8>;
}

impl<F> Signer for F
where
	F: Fn(&[u8]) -> Vec<u8>,
{
	fn sign(&self, payload: &[u8]) -> Vec<u8> {
		self(payload)
	}
}

/// The signature block of a signed extrinsic.
///
/// Encoded as `signer ++ signature ++ era ++ compact(nonce) ++ compact(tip)`.
#[derive(Debug, Clone)]
pub struct ExtrinsicSignature<'r> {
	signer: TypeValue<'r>,
	signature: TypeValue<'r>,
	era: Era,
	nonce: u64,
	tip: u128,
}

fn decode_typed<'r>(registry: &'r Registry, name: &str, data: &mut &[u8]) -> Result<TypeValue<'r>, Error> {
	let def = registry.resolve(name)?;
	let value = engine::decode(registry, &def, data)?;
	TypeValue::new(registry, name, def, CodecInput::Value(value))
}

impl<'r> ExtrinsicSignature<'r> {
	pub fn new(registry: &'r Registry, signer: Value, signature: Value, options: &SignatureOptions) -> Result<Self, Error> {
		Ok(ExtrinsicSignature {
			signer: TypeValue::new(registry, SIGNER_TYPE, registry.resolve(SIGNER_TYPE)?, CodecInput::Value(signer))?,
			signature: TypeValue::new(
				registry,
				SIGNATURE_TYPE,
				registry.resolve(SIGNATURE_TYPE)?,
				CodecInput::Value(signature),
			)?,
			era: options.era,
			nonce: options.nonce,
			tip: options.tip,
		})
	}

	/// Like [`ExtrinsicSignature::new`], with the signature given in its SCALE encoding.
	pub fn from_encoded_signature(
		registry: &'r Registry,
		signer: Value,
		signature: &[u8],
		options: &SignatureOptions,
	) -> Result<Self, Error> {
		let mut data = signature;
		let signature = decode_typed(registry, SIGNATURE_TYPE, &mut data)?;
		if !data.is_empty() {
			log::warn!("{} bytes left over after decoding signature", data.len());
		}
		Self::new(registry, signer, signature.into_value(), options)
	}

	pub(crate) fn decode(registry: &'r Registry, data: &mut &[u8]) -> Result<Self, Error> {
		let signer = decode_typed(registry, SIGNER_TYPE, data)?;
		let signature = decode_typed(registry, SIGNATURE_TYPE, data)?;
		let era = Era::decode(data)?;
		let nonce = u64::try_from(take_compact(data)?).map_err(|_| Error::from("Nonce does not fit in 64 bits"))?;
		let tip = take_compact(data)?;
		log::trace!("decoded signature, nonce {} tip {}", nonce, tip);
		Ok(ExtrinsicSignature { signer, signature, era, nonce, tip })
	}

	pub(crate) fn encode_to(&self, out: &mut Vec<u8>) {
		out.extend(self.signer.to_u8a(false));
		out.extend(self.signature.to_u8a(false));
		self.era.encode_to(out);
		Compact(self.nonce).encode_to(out);
		Compact(self.tip).encode_to(out);
	}

	pub fn signer(&self) -> &TypeValue<'r> {
		&self.signer
	}

	pub fn signature(&self) -> &TypeValue<'r> {
		&self.signature
	}

	pub fn era(&self) -> Era {
		self.era
	}

	pub fn nonce(&self) -> u64 {
		self.nonce
	}

	pub fn tip(&self) -> u128 {
		self.tip
	}

	pub fn to_value(&self) -> Value {
		Value::named([
			("signer", self.signer.to_value()),
			("signature", self.signature.to_value()),
			("era", Value::Era(self.era)),
			("nonce", Value::U64(self.nonce)),
			("tip", Value::U128(self.tip)),
		])
	}
}

fn take_compact(data: &mut &[u8]) -> Result<u128, Error> {
	let input: &[u8] = *data;
	let (value, consumed) = compact::decode_compact(input)?;
	*data = &input[consumed..];
	Ok(value)
}
