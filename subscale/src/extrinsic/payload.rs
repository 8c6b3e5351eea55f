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

use super::{Call, SignatureOptions};
use crate::{Codec, Registry};
use codec::{Compact, Encode};
use sp_runtime::generic::Era;

/// Payloads longer than this are hashed before signing.
pub const MAX_UNHASHED_PAYLOAD: usize = 256;

/// Signed extensions that add nothing to the signed payload beyond the era, nonce and tip.
const NO_ADDITIONAL_SIGNED: &[&str] = &[
	"CheckNonce",
	"CheckWeight",
	"ChargeTransactionPayment",
	"ChargeAssetTxPayment",
	"CheckNonZeroSender",
	"CheckBlockGasLimit",
	"LockStakingStatus",
	"ValidateDoubleVoteReports",
	"LimitParathreadCommits",
	"OnlyStakingAndClaims",
	"PrevalidateAttests",
	"RestrictFunctionality",
];

/// The bytes a signer signs for a call.
///
/// `call ++ era ++ compact(nonce) ++ compact(tip) ++ additional signed`, where the
/// additional signed data is contributed by each of the registry's signed extensions
/// in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerPayload {
	method: Vec<u8>,
	era: Era,
	nonce: u64,
	tip: u128,
	additional_signed: Vec<u8>,
}

impl SignerPayload {
	pub fn new(registry: &Registry, call: &Call<'_>, options: &SignatureOptions) -> Self {
		let mut additional_signed = Vec::new();
		for extension in registry.signed_extensions() {
			match extension.as_str() {
				"CheckSpecVersion" | "CheckVersion" => options.spec_version.encode_to(&mut additional_signed),
				"CheckTxVersion" => options.transaction_version.encode_to(&mut additional_signed),
				"CheckGenesis" => additional_signed.extend_from_slice(options.genesis_hash.as_bytes()),
				"CheckMortality" | "CheckEra" => match options.era {
					Era::Immortal => additional_signed.extend_from_slice(options.genesis_hash.as_bytes()),
					Era::Mortal(..) => additional_signed.extend_from_slice(options.block_hash.as_bytes()),
				},
				e if NO_ADDITIONAL_SIGNED.contains(&e) => (),
				e => log::warn!("Unknown signed extension {}, signing without its additional data", e),
			}
		}
		SignerPayload {
			method: call.to_u8a(false),
			era: options.era,
			nonce: options.nonce,
			tip: options.tip,
			additional_signed,
		}
	}

	pub fn encode(&self) -> Vec<u8> {
		let mut out = self.method.clone();
		self.era.encode_to(&mut out);
		Compact(self.nonce).encode_to(&mut out);
		Compact(self.tip).encode_to(&mut out);
		out.extend_from_slice(&self.additional_signed);
		out
	}

	/// What actually gets signed: the encoding, or its blake2-256 hash when it is long.
	pub fn to_signable(&self) -> Vec<u8> {
		let encoded = self.encode();
		if encoded.len() > MAX_UNHASHED_PAYLOAD {
			sp_core::blake2_256(&encoded).to_vec()
		} else {
			encoded
		}
	}

	pub fn additional_signed(&self) -> &[u8] {
		&self.additional_signed
	}
}
