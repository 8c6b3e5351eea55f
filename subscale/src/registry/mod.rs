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

//! The type registry.
//!
//! A [`Registry`] belongs to one chain connection. It maps type names to the
//! [`TypeFactory`] that constructs them, holds the active runtime [`Metadata`] and
//! the signed extensions extrinsics are built with. Lookups are exact first; names
//! that are not registered are parsed structurally (`Vec<T>`, `Option<T>`, tuples,
//! arrays) and finally retried in sanitized form.

pub mod definitions;
mod factory;

pub use self::factory::{BytesFactory, CallFactory, Definition, ExtrinsicFactory, RawFactory, TextFactory, TypeFactory};

use crate::{
	codec::{Codec, CodecInput, TypeExtra},
	metadata::{CallMetadata, Metadata, ModuleMetadata},
	regex, Error, Hash, HashFn, TypeDef,
};
use heck::ToLowerCamelCase;
use std::collections::HashMap;

/// How many aliases deep a name may resolve before it is considered cyclic.
const MAX_ALIAS_DEPTH: usize = 32;

/// Extensions assumed until metadata announces its own.
pub const DEFAULT_SIGNED_EXTENSIONS: &[&str] = &[
	"CheckSpecVersion",
	"CheckTxVersion",
	"CheckGenesis",
	"CheckMortality",
	"CheckNonce",
	"CheckWeight",
	"ChargeTransactionPayment",
];

/// spec name -> module -> instance names
type KnownInstances = HashMap<String, HashMap<String, Vec<String>>>;

#[derive(Debug, Clone)]
pub struct Registry {
	types: HashMap<String, Box<dyn TypeFactory>>,
	metadata: Metadata,
	signed_extensions: Vec<String>,
	hasher: HashFn,
	spec_name: String,
	known_instances: KnownInstances,
	/// Derived from the active metadata on every `set_metadata`.
	module_instances: HashMap<String, Vec<String>>,
}

impl Default for Registry {
	fn default() -> Self {
		let mut registry = Registry {
			types: HashMap::new(),
			metadata: Metadata::default(),
			signed_extensions: DEFAULT_SIGNED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
			hasher: subscale_common::blake2_256,
			spec_name: String::new(),
			known_instances: HashMap::new(),
			module_instances: HashMap::new(),
		};
		for (name, factory) in definitions::builtins() {
			registry.types.insert(name.to_string(), factory);
		}
		for (name, def) in definitions::parse(definitions::DEFAULT).expect("Included definitions should not panic") {
			registry.types.insert(name, Box::new(Definition(def)));
		}
		registry
	}
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::default()
	}

	/// The factory registered under exactly `name`.
	pub fn get(&self, name: &str) -> Result<&dyn TypeFactory, Error> {
		self.types.get(name).map(|f| f.as_ref()).ok_or_else(|| Error::UnknownType(name.to_string()))
	}

	pub fn has(&self, name: &str) -> bool {
		self.types.contains_key(name)
	}

	/// Register a factory, shadowing any earlier registration of the same name.
	pub fn register(&mut self, name: impl Into<String>, factory: Box<dyn TypeFactory>) {
		let name = name.into();
		log::debug!("registering {}", name);
		self.types.insert(name, factory);
	}

	pub fn register_definition(&mut self, name: impl Into<String>, def: TypeDef) {
		self.register(name, Box::new(Definition(def)));
	}

	/// Register `name` as the type `definition` names, e.g. `("Balance", "u64")`.
	pub fn register_type(&mut self, name: impl Into<String>, definition: &str) {
		self.register_definition(name, regex::parse(definition));
	}

	/// Register every type of a polkadot-js style JSON object.
	pub fn register_json(&mut self, json: &str) -> Result<(), Error> {
		for (name, def) in definitions::parse(json)? {
			self.register_definition(name, def);
		}
		Ok(())
	}

	fn lookup(&self, name: &str) -> Option<TypeDef> {
		if let Some(factory) = self.types.get(name) {
			return Some(factory.shape());
		}
		match regex::parse(name) {
			TypeDef::Named(n) => self
				.types
				.get(&n)
				.or_else(|| regex::generic_outer(&n).and_then(|outer| self.types.get(&outer)))
				.map(|f| f.shape()),
			ty => Some(ty),
		}
	}

	/// The structural definition of `name`, following aliases until the outermost
	/// shape is no longer a bare name.
	pub fn resolve(&self, name: &str) -> Result<TypeDef, Error> {
		let mut current = name.to_string();
		for _ in 0..MAX_ALIAS_DEPTH {
			match self.lookup(&current) {
				Some(TypeDef::Named(next)) => current = next,
				Some(ty) => return Ok(ty),
				None => return Err(Error::UnknownType(current)),
			}
		}
		Err(Error::UnknownType(name.to_string()))
	}

	/// Like [`Registry::resolve`] for a definition that may itself be a name.
	pub fn resolve_def(&self, def: &TypeDef) -> Result<TypeDef, Error> {
		if let TypeDef::Named(name) = def {
			self.resolve(name)
		} else {
			Ok(def.clone())
		}
	}

	pub fn create_type<'r>(&'r self, name: &str, input: CodecInput<'_>) -> Result<Box<dyn Codec + 'r>, Error> {
		self.create_type_with(name, input, &TypeExtra::default())
	}

	/// Construct a value of the type `name`.
	///
	/// Registered names use their factory. Anything else is resolved structurally and
	/// built as a generic value.
	pub fn create_type_with<'r>(
		&'r self,
		name: &str,
		input: CodecInput<'_>,
		extra: &TypeExtra,
	) -> Result<Box<dyn Codec + 'r>, Error> {
		if let Some(factory) = self.types.get(name) {
			return factory.construct(self, name, input, extra);
		}
		let def = self.resolve(name)?;
		Definition(def).construct(self, name, input, extra)
	}

	pub fn hash(&self, data: &[u8]) -> Hash {
		(self.hasher)(data)
	}

	pub fn metadata(&self) -> &Metadata {
		&self.metadata
	}

	/// Replace the active metadata.
	///
	/// Lookup types the metadata carries are registered, its signed extensions
	/// replace the current ones when it names any, and module instances are derived anew.
	pub fn set_metadata(&mut self, metadata: Metadata) {
		log::debug!("setting metadata v{} with {} modules", metadata.version(), metadata.modules().len());
		for (name, def) in metadata.types() {
			self.types.insert(name.clone(), Box::new(Definition(def.clone())));
		}
		if !metadata.extrinsic().signed_extensions.is_empty() {
			self.signed_extensions = metadata.extrinsic().signed_extensions.clone();
		}
		self.module_instances = metadata
			.modules()
			.iter()
			.map(|m| {
				let name = m.name.to_lower_camel_case();
				(name.clone(), vec![name])
			})
			.collect();
		self.metadata = metadata;
	}

	/// The module and call at `(section, method)` of the active metadata.
	pub fn find_call(&self, section: u8, method: u8) -> Result<(&ModuleMetadata, &CallMetadata), Error> {
		self.metadata
			.modules()
			.iter()
			.filter(|m| m.call_index == Some(section))
			.find_map(|m| m.calls.iter().find(|c| c.index == method).map(|c| (m, c)))
			.ok_or(Error::UnknownCall(section, method))
	}

	pub fn signed_extensions(&self) -> &[String] {
		&self.signed_extensions
	}

	pub fn set_signed_extensions(&mut self, extensions: Vec<String>) {
		self.signed_extensions = extensions;
	}

	pub fn spec_name(&self) -> &str {
		&self.spec_name
	}

	pub fn set_spec_name(&mut self, spec_name: impl Into<String>) {
		self.spec_name = spec_name.into();
	}

	/// Declare the instances of `module` on chains with `spec_name`, e.g. the
	/// `council` module being deployed as `generalCouncil`.
	pub fn set_known_instances(&mut self, spec_name: &str, module: &str, instances: Vec<String>) {
		self.known_instances.entry(spec_name.to_string()).or_default().insert(module.to_string(), instances);
	}

	/// Instances of `module` present for `spec_name`: declared ones if there are any,
	/// otherwise those found in the active metadata.
	pub fn get_module_instances(&self, spec_name: &str, module: &str) -> Vec<String> {
		self.known_instances
			.get(spec_name)
			.and_then(|modules| modules.get(module))
			.or_else(|| self.module_instances.get(module))
			.cloned()
			.unwrap_or_default()
	}
}

/// Configure a [`Registry`] before building it.
#[derive(Default)]
pub struct RegistryBuilder {
	spec_name: Option<String>,
	hasher: Option<HashFn>,
	signed_extensions: Option<Vec<String>>,
	types: Vec<(String, String)>,
	json: Vec<String>,
	instances: Vec<(String, String, Vec<String>)>,
	metadata: Option<Metadata>,
}

impl RegistryBuilder {
	pub fn spec_name(mut self, spec_name: impl Into<String>) -> Self {
		self.spec_name = Some(spec_name.into());
		self
	}

	/// Hash function used for `Codec::hash` and extrinsic hashes. Defaults to blake2-256.
	pub fn hasher(mut self, hasher: HashFn) -> Self {
		self.hasher = Some(hasher);
		self
	}

	pub fn signed_extensions<S: Into<String>>(mut self, extensions: impl IntoIterator<Item = S>) -> Self {
		self.signed_extensions = Some(extensions.into_iter().map(Into::into).collect());
		self
	}

	pub fn register_type(mut self, name: impl Into<String>, definition: impl Into<String>) -> Self {
		self.types.push((name.into(), definition.into()));
		self
	}

	pub fn register_json(mut self, json: impl Into<String>) -> Self {
		self.json.push(json.into());
		self
	}

	pub fn module_instances<S: Into<String>>(
		mut self,
		spec_name: impl Into<String>,
		module: impl Into<String>,
		instances: impl IntoIterator<Item = S>,
	) -> Self {
		self.instances.push((spec_name.into(), module.into(), instances.into_iter().map(Into::into).collect()));
		self
	}

	pub fn metadata(mut self, metadata: Metadata) -> Self {
		self.metadata = Some(metadata);
		self
	}

	/// Build the registry. Fails if any JSON definitions are malformed.
	pub fn build(self) -> Result<Registry, Error> {
		let mut registry = Registry::new();
		if let Some(spec_name) = self.spec_name {
			registry.set_spec_name(spec_name);
		}
		if let Some(hasher) = self.hasher {
			registry.hasher = hasher;
		}
		for json in self.json.iter() {
			registry.register_json(json)?;
		}
		for (name, definition) in self.types.iter() {
			registry.register_type(name.as_str(), definition);
		}
		for (spec_name, module, instances) in self.instances {
			registry.set_known_instances(&spec_name, &module, instances);
		}
		if let Some(metadata) = self.metadata {
			registry.set_metadata(metadata);
		}
		// Explicit extensions win over those announced by metadata.
		if let Some(extensions) = self.signed_extensions {
			registry.set_signed_extensions(extensions);
		}
		Ok(registry)
	}
}
