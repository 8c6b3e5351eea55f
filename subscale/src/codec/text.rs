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

use super::{Codec, CodecInput};
use crate::{compact, Error, Registry, Value};
use std::fmt;

/// UTF-8 text, length-prefixed on the wire.
///
/// A display override changes how the text is shown, never how it is encoded.
#[derive(Debug, Clone)]
pub struct Text<'r> {
	registry: &'r Registry,
	text: String,
	display: Option<String>,
}

impl<'r> Text<'r> {
	pub fn new(registry: &'r Registry, input: CodecInput<'_>) -> Result<Self, Error> {
		let text = match input {
			CodecInput::Empty => String::new(),
			CodecInput::Encoded(bytes) => Self::decode_text(bytes)?.0,
			CodecInput::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
			CodecInput::Str(s) => match CodecInput::hex_bytes(s) {
				Some(bytes) => String::from_utf8_lossy(&bytes?).into_owned(),
				None => s.to_string(),
			},
			CodecInput::Value(Value::Text(s)) => s,
			CodecInput::Value(Value::Bytes(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
			CodecInput::Value(v) => return Err(Error::invalid_input("Text", v)),
		};
		Ok(Text { registry, text, display: None })
	}

	/// Decode text from the front of `bytes`, returning it and the bytes consumed.
	///
	/// An empty buffer is an empty string that consumed nothing.
	pub fn decode(registry: &'r Registry, bytes: &[u8]) -> Result<(Self, usize), Error> {
		let (text, consumed) = Self::decode_text(bytes)?;
		Ok((Text { registry, text, display: None }, consumed))
	}

	fn decode_text(bytes: &[u8]) -> Result<(String, usize), Error> {
		if bytes.is_empty() {
			return Ok((String::new(), 0));
		}
		let (body, consumed) = compact::decode_length_prefixed(bytes)?;
		log::trace!("decoded text of {} bytes", body.len());
		Ok((String::from_utf8_lossy(body).into_owned(), consumed))
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}

	pub fn set_override(&mut self, display: impl Into<String>) {
		self.display = Some(display.into());
	}
}

impl fmt::Display for Text<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.display.as_deref().unwrap_or(&self.text))
	}
}

impl Codec for Text<'_> {
	fn registry(&self) -> &Registry {
		self.registry
	}

	fn to_u8a(&self, is_bare: bool) -> Vec<u8> {
		if is_bare {
			self.text.as_bytes().to_vec()
		} else {
			compact::add_length(self.text.as_bytes())
		}
	}

	fn to_raw_type(&self) -> String {
		"Text".into()
	}

	fn to_value(&self) -> Value {
		Value::Text(self.text.clone())
	}

	fn to_human(&self) -> serde_json::Value {
		serde_json::Value::String(self.to_string())
	}
}
