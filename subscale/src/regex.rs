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

//! Parsing of the type names found in legacy metadata and type definitions.
//!
//! Names like `Vec<(T::AccountId, BalanceOf<T>)>` are turned into a [`TypeDef`] tree.
//! Anything that is not structural becomes [`TypeDef::Named`] with trait bounds, paths
//! and `T::` prefixes removed, so it can be looked up in a registry.

use crate::{Primitive, TypeDef};
use onig::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum RegexSet {
	Array,
	BitSize,
	Vec,
	BoundedVec,
	Option,
	Result,
	Compact,
	Box,
	BTreeMap,
	BTreeSet,
	Tuple,
}

impl RegexSet {
	/// Checks if string matches any of the patterns defined
	/// Returns none if it does not match
	fn get_type(s: &str) -> Option<RegexSet> {
		if rust_array_decl().is_match(s) {
			Some(RegexSet::Array)
		} else if rust_bit_size().is_match(s) {
			Some(RegexSet::BitSize)
		} else if rust_vec_decl().is_match(s) {
			Some(RegexSet::Vec)
		} else if rust_bounded_vec_decl().is_match(s) {
			Some(RegexSet::BoundedVec)
		} else if rust_option_decl().is_match(s) {
			Some(RegexSet::Option)
		} else if rust_result_decl().is_match(s) {
			Some(RegexSet::Result)
		} else if rust_compact_decl().is_match(s) {
			Some(RegexSet::Compact)
		} else if rust_box_decl().is_match(s) {
			Some(RegexSet::Box)
		} else if rust_btree_map_decl().is_match(s) {
			Some(RegexSet::BTreeMap)
		} else if rust_btree_set_decl().is_match(s) {
			Some(RegexSet::BTreeSet)
		} else if rust_tuple_decl().is_match(s) {
			Some(RegexSet::Tuple)
		} else {
			None
		}
	}

	fn parse_type(&self, s: &str) -> Option<TypeDef> {
		match self {
			RegexSet::Array => parse_array(s),
			RegexSet::BitSize => parse_bit_size(s),
			RegexSet::Vec => parse_vec(&first_capture(rust_vec_decl(), s)?),
			RegexSet::BoundedVec => {
				let inner = first_capture(rust_bounded_vec_decl(), s)?;
				parse_vec(split_top_level(&inner).first()?)
			}
			RegexSet::Option => Some(TypeDef::Option(Box::new(parse(&first_capture(rust_option_decl(), s)?)))),
			RegexSet::Result => {
				let inner = split_top_level(&first_capture(rust_result_decl(), s)?);
				match inner.as_slice() {
					[ok, err] => Some(TypeDef::Result(Box::new(parse(ok)), Box::new(parse(err)))),
					_ => None,
				}
			}
			RegexSet::Compact => Some(TypeDef::Compact(Box::new(parse(&first_capture(rust_compact_decl(), s)?)))),
			// boxing is a memory layout concern, only the boxed type matters
			RegexSet::Box => Some(parse(&first_capture(rust_box_decl(), s)?)),
			RegexSet::BTreeMap => {
				let inner = split_top_level(&first_capture(rust_btree_map_decl(), s)?);
				match inner.as_slice() {
					[key, value] => Some(TypeDef::Vec(Box::new(TypeDef::Tuple(vec![parse(key), parse(value)])))),
					_ => None,
				}
			}
			RegexSet::BTreeSet => parse_vec(&first_capture(rust_btree_set_decl(), s)?),
			RegexSet::Tuple => {
				let inner = first_capture(rust_tuple_decl(), s)?;
				let fields = split_top_level(&inner);
				if fields.is_empty() {
					Some(TypeDef::Null)
				} else {
					Some(TypeDef::Tuple(fields.iter().map(|f| parse(f)).collect()))
				}
			}
		}
	}
}

/// Matches an array like `[u8; 32]` or `[u8; 20; H160]`.
/// The trailing type name of the second form is discarded.
fn rust_array_decl() -> Regex {
	Regex::new(r"^\[\s*(?<type>.+?)\s*;\s*(?<size>\d+)\s*(?:;\s*\w+\s*)?\]$")
		.expect("Regex expression should be infallible; qed")
}

pub fn rust_bit_size() -> Regex {
	Regex::new(r"^(Int|UInt)<(\d+)(?:,\s*\w+)?>$").expect("Regex expression should be infallible; qed")
}

/// Match a rust vector
/// allowed to be nested within, or have other (ie Option<>) nested within
pub fn rust_vec_decl() -> Regex {
	Regex::new(r"^Vec<(?<type>.+)>$").expect("Regex expression should be infallible; qed")
}

pub fn rust_bounded_vec_decl() -> Regex {
	Regex::new(r"^(?:BoundedVec|WeakBoundedVec)<(?<type>.+)>$").expect("Regex expression should be infallible; qed")
}

pub fn rust_option_decl() -> Regex {
	Regex::new(r"^Option<(?<type>.+)>$").expect("Regex expression should be infallible; qed")
}

pub fn rust_result_decl() -> Regex {
	Regex::new(r"^Result<(?<type>.+)>$").expect("Regex expression should be infallible; qed")
}

/// Match a parity-scale-codec Compact<T> type
pub fn rust_compact_decl() -> Regex {
	Regex::new(r"^Compact<(?<type>.+)>$").expect("Regex expression should be infallible; qed")
}

pub fn rust_box_decl() -> Regex {
	Regex::new(r"^Box<(?<type>.+)>$").expect("Regex expression should be infallible; qed")
}

pub fn rust_btree_map_decl() -> Regex {
	Regex::new(r"^BTreeMap<(?<type>.+)>$").expect("Regex expression should be infallible; qed")
}

pub fn rust_btree_set_decl() -> Regex {
	Regex::new(r"^BTreeSet<(?<type>.+)>$").expect("Regex expression should be infallible; qed")
}

/// Only the outer parentheses are matched, fields are split with [`split_top_level`].
pub fn rust_tuple_decl() -> Regex {
	Regex::new(r"^\((?<type>.*)\)$").expect("Regex expression should be infallible; qed")
}

/// Match a generic type that is not one of the structural wrappers, ie `BalanceOf<T>`
pub fn rust_generic_decl() -> Regex {
	Regex::new(r"^(?!(?:Vec|Option|Compact|Box|Result|BTreeMap|BTreeSet)<)(?<outer_type>\w+)<(?<inner_type>.+)>$")
		.expect("Regex expression should be infallible; qed")
}

fn first_capture(re: Regex, s: &str) -> Option<String> {
	re.captures(s)?.at(1).map(|c| c.trim().to_string())
}

/// Splits a list of type names on the commas that are not nested in brackets.
pub fn split_top_level(s: &str) -> Vec<String> {
	let mut parts = Vec::new();
	let mut current = String::new();
	let mut depth = 0usize;
	for c in s.chars() {
		match c {
			'<' | '(' | '[' => {
				depth += 1;
				current.push(c);
			}
			'>' | ')' | ']' => {
				depth = depth.saturating_sub(1);
				current.push(c);
			}
			',' if depth == 0 => {
				parts.push(current.trim().to_string());
				current.clear();
			}
			_ => current.push(c),
		}
	}
	if !current.trim().is_empty() {
		parts.push(current.trim().to_string());
	}
	parts
}

fn parse_vec(inner: &str) -> Option<TypeDef> {
	let ty = parse(inner);
	if ty.is_u8() {
		Some(TypeDef::Bytes)
	} else {
		Some(TypeDef::Vec(Box::new(ty)))
	}
}

fn parse_array(s: &str) -> Option<TypeDef> {
	let re = rust_array_decl();
	let caps = re.captures(s)?;
	let ty = parse(caps.at(1)?);
	let len = caps.at(2)?.parse::<usize>().ok()?;
	Some(TypeDef::Array { len, ty: Box::new(ty) })
}

fn parse_bit_size(s: &str) -> Option<TypeDef> {
	let re = rust_bit_size();
	let caps = re.captures(s)?;
	let bits = caps.at(2)?.parse::<usize>().ok()?;
	let prim = match (caps.at(1)?, bits) {
		("UInt", 8) => Primitive::U8,
		("UInt", 16) => Primitive::U16,
		("UInt", 32) => Primitive::U32,
		("UInt", 64) => Primitive::U64,
		("UInt", 128) => Primitive::U128,
		("Int", 8) => Primitive::I8,
		("Int", 16) => Primitive::I16,
		("Int", 32) => Primitive::I32,
		("Int", 64) => Primitive::I64,
		("Int", 128) => Primitive::I128,
		(_, bits) => return Some(TypeDef::Array { len: bits / 8, ty: Box::new(TypeDef::Primitive(Primitive::U8)) }),
	};
	Some(TypeDef::Primitive(prim))
}

/// Removes the trait preceding the type.
/// I.E Removes `<T as Trait>::` from `<T as Trait>::Call`
pub fn remove_trait<S: AsRef<str>>(s: S) -> String {
	let re = Regex::new(r"<T as [\w:]+(?:<\w+>)?>::").expect("Regex expression should be infallible; qed");
	re.replace_all(s.as_ref(), "")
}

/// Transforms a prefixed generic type (EX: T::Moment)
/// into a non-prefixed type (T::Moment -> Moment)
pub fn remove_prefix<S: AsRef<str>>(s: S) -> String {
	let re = Regex::new(r"\b[TI]::").expect("Regex expression should be infallible; qed");
	re.replace_all(s.as_ref(), "")
}

/// Removes a path from a string that is a rust type.
/// Ex: removes 'schedule' from schedule::Period<T::BlockNumber>
pub fn remove_path<S: AsRef<str>>(s: S) -> String {
	let re = Regex::new(r"\b\w+::").expect("Regex expression should be infallible; qed");
	re.replace_all(s.as_ref(), "")
}

pub fn remove_empty_generic<S: AsRef<str>>(s: S) -> String {
	let re = Regex::new(r"<\(\)>").expect("Regex expression should be infallible; qed");
	re.replace_all(s.as_ref(), "")
}

fn remove_lookup_source<S: AsRef<str>>(s: S) -> String {
	let re = Regex::new(r"<T::Lookup as StaticLookup>::Source").expect("Regex expression should be infallible; qed");
	re.replace_all(s.as_ref(), "LookupSource")
}

/// Sanitizes a type and returns parts that might correspond to registered types
pub fn sanitize_ty(ty: &str) -> String {
	log::trace!("sanitizing ty {}", ty);
	let ty = ty.split_whitespace().collect::<Vec<_>>().join(" ");
	let ty = remove_lookup_source(ty);
	let ty = remove_trait(ty);
	let ty = remove_prefix(ty);
	let ty = remove_empty_generic(ty);
	let ty = remove_path(ty);
	log::trace!("Possibly sanitized type: {}", ty);
	ty
}

/// The outer name of a non-structural generic, `BalanceOf` for `BalanceOf<T>`.
pub fn generic_outer(s: &str) -> Option<String> {
	first_capture(rust_generic_decl(), s)
}

/// Parse a type name into its structural definition.
pub fn parse(s: &str) -> TypeDef {
	parse_inner(s.trim(), false)
}

fn parse_inner(s: &str, sanitized: bool) -> TypeDef {
	if let Some(prim) = Primitive::from_name(s) {
		return TypeDef::Primitive(prim);
	}
	if s == "()" || s == "Null" {
		return TypeDef::Null;
	}
	if let Some(ty) = RegexSet::get_type(s).and_then(|m| m.parse_type(s)) {
		return ty;
	}
	if !sanitized {
		let clean = sanitize_ty(s);
		if clean != s {
			return parse_inner(clean.trim(), true);
		}
	}
	TypeDef::Named(s.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::TypeDef as T;

	fn named(s: &str) -> T {
		T::Named(s.to_string())
	}

	fn prim(p: Primitive) -> T {
		T::Primitive(p)
	}

	#[test]
	fn should_parse_primitives() {
		assert_eq!(parse("u8"), prim(Primitive::U8));
		assert_eq!(parse("i128"), prim(Primitive::I128));
		assert_eq!(parse("bool"), prim(Primitive::Bool));
		assert_eq!(parse("()"), T::Null);
	}

	#[test]
	fn should_parse_arrays() {
		assert_eq!(parse("[u8; 32]"), T::Array { len: 32, ty: Box::new(prim(Primitive::U8)) });
		assert_eq!(parse("[u8; 20; H160]"), T::Array { len: 20, ty: Box::new(prim(Primitive::U8)) });
		assert_eq!(parse("[Vec<Foo>; 4]"), T::Array { len: 4, ty: Box::new(T::Vec(Box::new(named("Foo")))) });
	}

	#[test]
	fn should_parse_vecs() {
		assert_eq!(parse("Vec<u8>"), T::Bytes);
		assert_eq!(parse("Vec<T::AccountId>"), T::Vec(Box::new(named("AccountId"))));
		assert_eq!(parse("Vec<Vec<u8>>"), T::Vec(Box::new(T::Bytes)));
		assert_eq!(parse("BoundedVec<u32, MaxLen>"), T::Vec(Box::new(prim(Primitive::U32))));
	}

	#[test]
	fn should_parse_nested_wrappers() {
		assert_eq!(parse("Option<Compact<T::Balance>>"), T::Option(Box::new(T::Compact(Box::new(named("Balance"))))));
		assert_eq!(
			parse("Result<(), DispatchError>"),
			T::Result(Box::new(T::Null), Box::new(named("DispatchError")))
		);
		assert_eq!(parse("Box<<T as Trait>::Call>"), named("Call"));
	}

	#[test]
	fn should_parse_tuples() {
		assert_eq!(
			parse("(T::AccountId, Vec<(u32, BalanceOf<T>)>)"),
			T::Tuple(vec![
				named("AccountId"),
				T::Vec(Box::new(T::Tuple(vec![prim(Primitive::U32), named("BalanceOf<T>")]))),
			])
		);
	}

	#[test]
	fn should_parse_maps() {
		assert_eq!(
			parse("BTreeMap<u32, Vec<u8>>"),
			T::Vec(Box::new(T::Tuple(vec![prim(Primitive::U32), T::Bytes])))
		);
	}

	#[test]
	fn should_parse_bit_size() {
		assert_eq!(parse("UInt<64, Balance>"), prim(Primitive::U64));
		assert_eq!(parse("Int<32>"), prim(Primitive::I32));
	}

	#[test]
	fn should_sanitize() {
		assert_eq!(sanitize_ty("<T as Trait>::Proposal"), "Proposal");
		assert_eq!(sanitize_ty("<T as Trait<I>>::Balance"), "Balance");
		assert_eq!(sanitize_ty("<T as frame_system::Config>::AccountId"), "AccountId");
		assert_eq!(sanitize_ty("<T::Lookup as StaticLookup>::Source"), "LookupSource");
		assert_eq!(sanitize_ty("T::Moment"), "Moment");
		assert_eq!(sanitize_ty("schedule::Period<T::BlockNumber>"), "Period<BlockNumber>");
		assert_eq!(sanitize_ty("Foo<()>"), "Foo");
	}

	#[test]
	fn should_find_generic_outer() {
		assert_eq!(generic_outer("BalanceOf<T>"), Some("BalanceOf".to_string()));
		assert_eq!(generic_outer("Vec<T>"), None);
		assert_eq!(generic_outer("Balance"), None);
	}

	#[test]
	fn should_split_top_level() {
		assert_eq!(split_top_level("u32, (u8, u16), Vec<A, B>"), vec!["u32", "(u8, u16)", "Vec<A, B>"]);
		assert!(split_top_level("").is_empty());
	}
}
