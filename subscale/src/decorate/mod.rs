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

//! Name-addressed accessors built from metadata.
//!
//! Decoration turns the module list of a [`Metadata`] into maps keyed by lower camel
//! case section and item names: call constructors (`tx`), storage key builders
//! (`query`) and decoded constants (`consts`). Maps are rebuilt whenever the
//! registry's metadata changes.

mod checks;
mod constants;
mod extrinsics;
mod storage;

pub use self::{
	checks::{filter_sections, SectionCheck, SectionChecks},
	constants::decorate_constants,
	extrinsics::{decorate_extrinsics, CallFunction},
	storage::{decorate_storage, StorageEntry},
};

use crate::{Codec, Metadata, Registry};

/// An insertion-ordered map from names to accessors.
///
/// Inserting an existing name replaces the value in place, keeping its position.
#[derive(Debug, Clone)]
pub struct Section<T> {
	entries: Vec<(String, T)>,
}

impl<T> Default for Section<T> {
	fn default() -> Self {
		Section { entries: Vec::new() }
	}
}

impl<T> Section<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: impl Into<String>, value: T) {
		let name = name.into();
		match self.entries.iter_mut().find(|(n, _)| *n == name) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((name, value)),
		}
	}

	pub fn get(&self, name: &str) -> Option<&T> {
		self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
		self.entries.iter().map(|(n, v)| (n.as_str(), v))
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(n, _)| n.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Keep only the entries `keep` accepts.
	pub fn retain(&mut self, mut keep: impl FnMut(&str, &T) -> bool) {
		self.entries.retain(|(n, v)| keep(n, v));
	}
}

/// All accessors of one metadata.
#[derive(Debug)]
pub struct Decorated<'r> {
	pub tx: Section<Section<CallFunction<'r>>>,
	pub query: Section<Section<StorageEntry<'r>>>,
	pub consts: Section<Section<Box<dyn Codec + 'r>>>,
}

/// Decorate calls, storage and constants of `metadata`.
///
/// Constants that fail to decode are logged and left out.
pub fn decorate_metadata<'r>(registry: &'r Registry, metadata: &Metadata) -> Decorated<'r> {
	Decorated {
		tx: decorate_extrinsics(registry, metadata),
		query: decorate_storage(registry, metadata),
		consts: decorate_constants(registry, metadata),
	}
}
