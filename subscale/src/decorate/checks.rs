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

//! Gating of optional sections.
//!
//! Some modules are only usable when particular pallet instances exist on the
//! connected runtime. A section named in the [`SectionChecks`] is kept only if one
//! of its instances shows up in the storage map with every required method, or,
//! for sections with detection enabled, if the registry knows any instance of it
//! for the current spec name.

use super::{Section, StorageEntry};
use crate::Registry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionCheck {
	/// Instance names to look for. The section's own name if empty.
	pub instances: Vec<String>,
	/// Storage items an instance must have.
	pub methods: Vec<String>,
	pub detect: bool,
}

impl SectionCheck {
	pub fn instances<S: Into<String>>(mut self, instances: impl IntoIterator<Item = S>) -> Self {
		self.instances = instances.into_iter().map(Into::into).collect();
		self
	}

	pub fn methods<S: Into<String>>(mut self, methods: impl IntoIterator<Item = S>) -> Self {
		self.methods = methods.into_iter().map(Into::into).collect();
		self
	}

	pub fn detect(mut self) -> Self {
		self.detect = true;
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionChecks {
	checks: Vec<(String, SectionCheck)>,
}

impl Default for SectionChecks {
	fn default() -> Self {
		SectionChecks::empty()
			.with("contracts", SectionCheck::default())
			.with("council", SectionCheck::default().detect())
			.with("democracy", SectionCheck::default())
			.with(
				"elections",
				SectionCheck::default().instances(["phragmenElection", "electionsPhragmen", "elections", "society"]).detect(),
			)
			.with("imOnline", SectionCheck::default())
			.with("membership", SectionCheck::default())
			.with("parachains", SectionCheck::default())
			.with("session", SectionCheck::default())
			.with("society", SectionCheck::default())
			.with("staking", SectionCheck::default().methods(["erasRewardPoints"]))
			.with("technicalCommittee", SectionCheck::default().detect())
			.with("treasury", SectionCheck::default())
	}
}

impl SectionChecks {
	/// No checks at all; every section present in storage is kept.
	pub fn empty() -> Self {
		SectionChecks { checks: Vec::new() }
	}

	/// Add or replace the check for `section`.
	pub fn with(mut self, section: impl Into<String>, check: SectionCheck) -> Self {
		let section = section.into();
		self.checks.retain(|(s, _)| *s != section);
		self.checks.push((section, check));
		self
	}

	pub fn get(&self, section: &str) -> Option<&SectionCheck> {
		self.checks.iter().find(|(s, _)| s == section).map(|(_, c)| c)
	}

	/// Whether `section` should be exposed for the runtime described by `query`.
	pub fn is_available(&self, section: &str, query: &Section<Section<StorageEntry<'_>>>, registry: &Registry) -> bool {
		let check = match self.get(section) {
			Some(check) => check,
			None => return query.contains(section),
		};
		let known = registry.get_module_instances(registry.spec_name(), section);
		let own = [section.to_string()];
		let instances = if check.instances.is_empty() { &own[..] } else { &check.instances[..] };
		let present = instances.iter().chain(known.iter()).any(|instance| match query.get(instance) {
			Some(items) => check.methods.iter().all(|m| items.contains(m)),
			None => false,
		});
		present || (check.detect && !known.is_empty())
	}
}

/// Drop the sections of `sections` the runtime does not provide.
pub fn filter_sections<T>(
	mut sections: Section<T>,
	query: &Section<Section<StorageEntry<'_>>>,
	checks: &SectionChecks,
	registry: &Registry,
) -> Section<T> {
	sections.retain(|name, _| {
		let keep = checks.is_available(name, query, registry);
		if !keep {
			log::debug!("section {} is not available on this runtime", name);
		}
		keep
	});
	sections
}
