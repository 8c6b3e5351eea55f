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

//! SCALE compact integers and compact length prefixes.
//!
//! The two low bits of the first byte select the mode:
//!
//! | mode | bytes | range |
//! |------|-------|-------|
//! | `0b00` | 1 | `0..=63` |
//! | `0b01` | 2 | `64..=16383` |
//! | `0b10` | 4 | `16384..=2^30 - 1` |
//! | `0b11` | `(first >> 2) + 5` | everything else, little-endian after the first byte |

use crate::Error;
use codec::{Compact, Decode, Encode};

/// Upper bound on the length of a single text or byte payload.
pub const MAX_LENGTH: usize = 128 * 1024;

/// Decode a compact integer from the start of `data`.
///
/// Returns the value and the number of bytes it occupied.
pub fn decode_compact(data: &[u8]) -> Result<(u128, usize), Error> {
	let first = *data.first().ok_or(Error::DecodeLengthExceeded { declared: 1, limit: 0 })?;
	let size = match first & 0b11 {
		0b00 => 1,
		0b01 => 2,
		0b10 => 4,
		_ => usize::from(first >> 2) + 5,
	};
	if size > data.len() {
		return Err(Error::DecodeLengthExceeded { declared: size, limit: data.len() });
	}
	let mut input = &data[..size];
	let Compact(value) = Compact::<u128>::decode(&mut input)?;
	log::trace!("compact {} ({} bytes)", value, size);
	Ok((value, size))
}

pub fn encode_compact(value: u128) -> Vec<u8> {
	Compact(value).encode()
}

/// Prefix `bytes` with their compact encoded length.
pub fn add_length(bytes: &[u8]) -> Vec<u8> {
	let mut out = Compact(bytes.len() as u64).encode();
	out.extend_from_slice(bytes);
	out
}

/// Split a length-prefixed payload off the front of `data`.
///
/// Returns the payload and the total number of bytes consumed (prefix and payload).
/// Lengths above [`MAX_LENGTH`] or beyond the end of `data` are rejected before
/// anything is copied.
pub fn decode_length_prefixed(data: &[u8]) -> Result<(&[u8], usize), Error> {
	let (length, offset) = decode_compact(data)?;
	let length = usize::try_from(length).unwrap_or(usize::MAX);
	if length > MAX_LENGTH {
		return Err(Error::DecodeLengthExceeded { declared: length, limit: MAX_LENGTH });
	}
	let available = data.len() - offset;
	if length > available {
		return Err(Error::DecodeLengthExceeded { declared: length, limit: available });
	}
	Ok((&data[offset..offset + length], offset + length))
}
