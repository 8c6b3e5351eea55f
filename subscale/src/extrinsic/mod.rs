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

//! The transaction envelope.
//!
//! An encoded extrinsic is `compact(length) ++ version ++ payload`. The first byte
//! of the payload is laid out as `abbbbbbb`, where `a` is set for signed
//! extrinsics and `b` is the format version. Version 4 is the only format decoded;
//! other versions are kept as opaque payloads.

mod call;
mod payload;
mod signature;

pub use self::{
	call::Call,
	payload::{SignerPayload, MAX_UNHASHED_PAYLOAD},
	signature::{ExtrinsicSignature, SignatureOptions, Signer, SIGNATURE_TYPE, SIGNER_TYPE},
};

use crate::{
	codec::{Codec, CodecInput, TypeExtra},
	compact, Error, Hash, Registry, Value,
};
use std::cell::OnceCell;

pub const LATEST_EXTRINSIC_VERSION: u8 = 4;
const BIT_SIGNED: u8 = 0b1000_0000;
const BIT_VERSION: u8 = 0b0111_1111;

/// Signature used by [`Extrinsic::sign_fake`], an `Sr25519` signature of all ones.
const FAKE_SIGNATURE: [u8; 65] = [1; 65];

#[derive(Debug, Clone)]
pub struct ExtrinsicV4<'r> {
	pub signature: Option<ExtrinsicSignature<'r>>,
	pub method: Call<'r>,
}

#[derive(Debug, Clone)]
pub enum ExtrinsicInner<'r> {
	V4(ExtrinsicV4<'r>),
	/// A format this crate cannot decode. `version` is the full first byte.
	Unknown { version: u8, payload: Vec<u8> },
}

#[derive(Debug, Clone)]
pub struct Extrinsic<'r> {
	registry: &'r Registry,
	inner: ExtrinsicInner<'r>,
	hash: OnceCell<Hash>,
}

impl<'r> Extrinsic<'r> {
	/// An unsigned extrinsic of the latest format.
	pub fn new(call: Call<'r>) -> Self {
		let registry = call.registry;
		Extrinsic { registry, inner: ExtrinsicInner::V4(ExtrinsicV4 { signature: None, method: call }), hash: OnceCell::new() }
	}

	/// Construct from any codec input.
	///
	/// `Raw` input without a length prefix starts at the version byte, unless `extra`
	/// names a version, in which case it starts after it and `extra.is_signed` says
	/// whether a signature block follows.
	pub fn from_input(registry: &'r Registry, input: CodecInput<'_>, extra: &TypeExtra) -> Result<Self, Error> {
		match input {
			CodecInput::Encoded(bytes) => Self::decode(registry, bytes),
			CodecInput::Raw(bytes) => match extra.version {
				Some(version) => Self::decode_versioned(registry, version, extra.is_signed, bytes),
				None => Self::decode_payload(registry, bytes),
			},
			CodecInput::Str(s) => match CodecInput::hex_bytes(s) {
				Some(bytes) => Self::decode(registry, &bytes?),
				None => Err(Error::invalid_input("Extrinsic", s)),
			},
			CodecInput::Value(Value::Bytes(bytes)) => Self::decode(registry, &bytes),
			CodecInput::Value(Value::Call(call)) => Ok(Self::new(Call::from_value(registry, call)?)),
			input => Err(Error::invalid_input("Extrinsic", input)),
		}
	}

	/// Decode a length-prefixed extrinsic.
	pub fn decode(registry: &'r Registry, bytes: &[u8]) -> Result<Self, Error> {
		let (length, offset) = compact::decode_compact(bytes)?;
		let available = bytes.len() - offset;
		let length = usize::try_from(length).unwrap_or(usize::MAX);
		if length > available {
			return Err(Error::DecodeLengthExceeded { declared: length, limit: available });
		}
		if length < available {
			log::warn!("{} bytes left over after decoding extrinsic", available - length);
		}
		Self::decode_payload(registry, &bytes[offset..offset + length])
	}

	fn decode_payload(registry: &'r Registry, payload: &[u8]) -> Result<Self, Error> {
		let (first, rest) = payload.split_first().ok_or(Error::DecodeLengthExceeded { declared: 1, limit: 0 })?;
		Self::decode_versioned(registry, first & BIT_VERSION, first & BIT_SIGNED != 0, rest)
	}

	fn decode_versioned(registry: &'r Registry, version: u8, is_signed: bool, data: &[u8]) -> Result<Self, Error> {
		log::trace!("decoding extrinsic version {}, signed: {}", version, is_signed);
		let inner = match version {
			LATEST_EXTRINSIC_VERSION => {
				let mut data = data;
				let signature = if is_signed { Some(ExtrinsicSignature::decode(registry, &mut data)?) } else { None };
				let method = Call::decode(registry, &mut data)?;
				if !data.is_empty() {
					log::warn!("{} bytes left over after decoding extrinsic call", data.len());
				}
				ExtrinsicInner::V4(ExtrinsicV4 { signature, method })
			}
			_ => {
				let version = if is_signed { version | BIT_SIGNED } else { version };
				ExtrinsicInner::Unknown { version, payload: data.to_vec() }
			}
		};
		Ok(Extrinsic { registry, inner, hash: OnceCell::new() })
	}

	fn v4_mut(&mut self) -> Result<&mut ExtrinsicV4<'r>, Error> {
		self.hash = OnceCell::new();
		match &mut self.inner {
			ExtrinsicInner::V4(inner) => Ok(inner),
			ExtrinsicInner::Unknown { version, .. } => {
				Err(Error::UnsupportedType(format!("Extrinsic version {}", *version & BIT_VERSION)))
			}
		}
	}

	/// Attach an existing signature, replacing any previous one.
	pub fn add_signature(&mut self, signer: Value, signature: Value, options: &SignatureOptions) -> Result<&mut Self, Error> {
		let signature = ExtrinsicSignature::new(self.registry, signer, signature, options)?;
		self.v4_mut()?.signature = Some(signature);
		Ok(self)
	}

	/// Sign the call for `signer_address` with `signer`.
	pub fn sign(&mut self, signer_address: Value, signer: &dyn Signer, options: &SignatureOptions) -> Result<&mut Self, Error> {
		let payload = SignerPayload::new(self.registry, &self.v4_mut()?.method, options);
		let signature = signer.sign(&payload.to_signable());
		let signature = ExtrinsicSignature::from_encoded_signature(self.registry, signer_address, &signature, options)?;
		self.v4_mut()?.signature = Some(signature);
		Ok(self)
	}

	/// Attach a placeholder signature, for fee estimation and the like.
	pub fn sign_fake(&mut self, signer_address: Value, options: &SignatureOptions) -> Result<&mut Self, Error> {
		let signature =
			ExtrinsicSignature::from_encoded_signature(self.registry, signer_address, &FAKE_SIGNATURE, options)?;
		self.v4_mut()?.signature = Some(signature);
		Ok(self)
	}

	/// The format version, without the signed bit.
	pub fn version(&self) -> u8 {
		match &self.inner {
			ExtrinsicInner::V4(_) => LATEST_EXTRINSIC_VERSION,
			ExtrinsicInner::Unknown { version, .. } => version & BIT_VERSION,
		}
	}

	pub fn is_signed(&self) -> bool {
		match &self.inner {
			ExtrinsicInner::V4(inner) => inner.signature.is_some(),
			ExtrinsicInner::Unknown { version, .. } => version & BIT_SIGNED != 0,
		}
	}

	pub fn method(&self) -> Option<&Call<'r>> {
		match &self.inner {
			ExtrinsicInner::V4(inner) => Some(&inner.method),
			ExtrinsicInner::Unknown { .. } => None,
		}
	}

	pub fn signature(&self) -> Option<&ExtrinsicSignature<'r>> {
		match &self.inner {
			ExtrinsicInner::V4(inner) => inner.signature.as_ref(),
			ExtrinsicInner::Unknown { .. } => None,
		}
	}

	pub fn inner(&self) -> &ExtrinsicInner<'r> {
		&self.inner
	}

	/// Whether this extrinsic dispatches the same section and method as `call`.
	pub fn is(&self, call: &Call<'_>) -> bool {
		self.method().map_or(false, |method| method.is(call))
	}

	/// `version ++ signature? ++ call`, without the length prefix.
	fn payload(&self) -> Vec<u8> {
		match &self.inner {
			ExtrinsicInner::V4(inner) => {
				let mut out = Vec::new();
				match &inner.signature {
					Some(signature) => {
						out.push(LATEST_EXTRINSIC_VERSION | BIT_SIGNED);
						signature.encode_to(&mut out);
					}
					None => out.push(LATEST_EXTRINSIC_VERSION),
				}
				out.extend(inner.method.to_u8a(false));
				out
			}
			ExtrinsicInner::Unknown { version, payload } => {
				let mut out = Vec::with_capacity(payload.len() + 1);
				out.push(*version);
				out.extend_from_slice(payload);
				out
			}
		}
	}
}

impl Codec for Extrinsic<'_> {
	fn registry(&self) -> &Registry {
		self.registry
	}

	fn to_u8a(&self, is_bare: bool) -> Vec<u8> {
		let payload = self.payload();
		if is_bare {
			payload
		} else {
			compact::add_length(&payload)
		}
	}

	fn to_raw_type(&self) -> String {
		"Extrinsic".into()
	}

	fn to_value(&self) -> Value {
		match &self.inner {
			ExtrinsicInner::V4(inner) => Value::named([
				("version", Value::U8(LATEST_EXTRINSIC_VERSION)),
				("isSigned", Value::Bool(inner.signature.is_some())),
				("signature", Value::from(inner.signature.as_ref().map(ExtrinsicSignature::to_value))),
				("method", inner.method.to_value()),
			]),
			ExtrinsicInner::Unknown { version, payload } => Value::named([
				("version", Value::U8(version & BIT_VERSION)),
				("isSigned", Value::Bool(version & BIT_SIGNED != 0)),
				("payload", Value::Bytes(payload.clone())),
			]),
		}
	}

	/// Memoized until the signature changes.
	fn hash(&self) -> Hash {
		*self.hash.get_or_init(|| self.registry.hash(&self.to_u8a(false)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_suite;

	fn registry() -> Registry {
		let mut registry = Registry::new();
		registry.set_metadata(test_suite::metadata_v10().as_latest().unwrap());
		registry
	}

	fn alice() -> Value {
		Value::variant("Id", Value::Bytes(vec![0xd4; 32]))
	}

	#[test]
	fn should_encode_unsigned_extrinsics() {
		let registry = registry();
		let call = Call::new(&registry, "0x0100d59d".into()).unwrap();
		let xt = Extrinsic::new(call);
		assert_eq!(xt.to_u8a(false), vec![0x14, 0x04, 0x01, 0x00, 0xd5, 0x9d]);
		assert_eq!(xt.to_u8a(true), vec![0x04, 0x01, 0x00, 0xd5, 0x9d]);
		assert!(!xt.is_signed());
		assert_eq!(xt.version(), 4);

		let decoded = Extrinsic::decode(&registry, &xt.to_u8a(false)).unwrap();
		assert!(decoded.is(xt.method().unwrap()));
		assert_eq!(decoded.to_value(), xt.to_value());
	}

	#[test]
	fn should_set_the_signed_bit() {
		let registry = registry();
		let mut xt = Extrinsic::new(Call::new(&registry, "0x0100d59d".into()).unwrap());
		let unsigned_hash = xt.hash();
		xt.sign_fake(alice(), &SignatureOptions { nonce: 3, ..Default::default() }).unwrap();
		assert!(xt.is_signed());
		assert_ne!(xt.hash(), unsigned_hash);

		let encoded = xt.to_u8a(false);
		let (_, offset) = compact::decode_compact(&encoded).unwrap();
		assert_eq!(encoded[offset], 0x84);
		let decoded = Extrinsic::decode(&registry, &encoded).unwrap();
		assert!(decoded.is_signed());
		assert_eq!(decoded.signature().unwrap().nonce(), 3);
		assert_eq!(decoded.signature().unwrap().signer().to_value(), alice());
		assert_eq!(decoded.hash(), xt.hash());
	}

	#[test]
	fn should_sign_with_a_signer() {
		let registry = registry();
		let mut xt = Extrinsic::new(Call::new(&registry, "0x0100d59d".into()).unwrap());
		let signed = std::cell::RefCell::new(Vec::new());
		let signer = |payload: &[u8]| {
			signed.borrow_mut().extend_from_slice(payload);
			let mut sig = vec![0x01];
			sig.extend([0xee; 64]);
			sig
		};
		let options = SignatureOptions::default();
		xt.sign(alice(), &signer, &options).unwrap();
		let payload = SignerPayload::new(&registry, xt.method().unwrap(), &options);
		assert_eq!(*signed.borrow(), payload.to_signable());
		assert_eq!(
			xt.signature().unwrap().signature().to_value(),
			Value::variant("Sr25519", Value::Bytes(vec![0xee; 64]))
		);
	}

	#[test]
	fn should_keep_unknown_versions() {
		let registry = registry();
		let xt = Extrinsic::decode(&registry, &[0x0c, 0x83, 0xaa, 0xbb]).unwrap();
		assert_eq!(xt.version(), 3);
		assert!(xt.is_signed());
		assert!(xt.method().is_none());
		assert_eq!(xt.to_u8a(false), vec![0x0c, 0x83, 0xaa, 0xbb]);
		let mut xt = xt;
		assert!(matches!(xt.sign_fake(alice(), &Default::default()), Err(Error::UnsupportedType(_))));
	}

	#[test]
	fn should_reject_lengths_beyond_the_buffer() {
		let registry = registry();
		assert!(matches!(
			Extrinsic::decode(&registry, &[0x14, 0x04, 0x01]),
			Err(Error::DecodeLengthExceeded { declared: 5, limit: 2 })
		));
	}

	#[test]
	fn should_construct_from_raw_input() {
		let registry = registry();
		let extra = TypeExtra::default().version(4);
		let xt = Extrinsic::from_input(&registry, CodecInput::Raw(&[0x01, 0x00, 0xd5, 0x9d]), &extra).unwrap();
		assert_eq!(xt.method().unwrap().section(), "timestamp");
		let nested = registry.create_type("Extrinsic", CodecInput::Encoded(&xt.to_u8a(false))).unwrap();
		assert_eq!(nested.to_u8a(false), xt.to_u8a(false));
	}
}
