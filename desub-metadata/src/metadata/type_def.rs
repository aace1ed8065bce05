// Copyright 2019-2021 Parity Technologies (UK) Ltd.
// This file is part of substrate-desub.
//
// substrate-desub is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// substrate-desub is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with substrate-desub.  If not, see <http://www.gnu.org/licenses/>.

//! The shape of a single type in the registry. Types refer to each other by
//! [`TypeId`] only, so recursive and self-referential types are just IDs that
//! point back into the registry.

use crate::TypeId;
use codec::{Decode, Encode, Input, Output};

/// The full description of a single type.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Type {
	/// The namespace segments leading to this type, ie `["sp_runtime", "MultiAddress"]`.
	/// Empty for primitives and anonymous types like tuples.
	pub path: Vec<String>,
	/// Generic parameters of the type.
	pub type_params: Vec<TypeParameter>,
	/// What the type actually looks like.
	pub type_def: TypeDef,
	pub docs: Vec<String>,
}

impl Type {
	/// The path segments joined with `::`.
	pub fn path_string(&self) -> String {
		self.path.join("::")
	}
}

/// A generic type parameter. The type itself is absent if it was
/// erased when the registry was generated.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeParameter {
	pub name: String,
	pub ty: Option<TypeId>,
}

/// A named or unnamed field of a composite type or enum variant.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Field {
	pub name: Option<String>,
	pub ty: TypeId,
	/// The name of the type as it was written in the source, ie `T::AccountId`.
	pub type_name: Option<String>,
	pub docs: Vec<String>,
}

/// A single enum variant.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Variant {
	pub name: String,
	pub fields: Vec<Field>,
	/// The byte that selects this variant when a value of the enum is encoded.
	pub index: u8,
	pub docs: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeDefComposite {
	pub fields: Vec<Field>,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeDefVariant {
	pub variants: Vec<Variant>,
}

impl TypeDefVariant {
	/// Find a variant by its name.
	pub fn variant_by_name(&self, name: &str) -> Option<&Variant> {
		self.variants.iter().find(|v| v.name == name)
	}

	/// Find a variant by the byte used to select it, which is not necessarily
	/// its position in the list of variants.
	pub fn variant_by_index(&self, index: u8) -> Option<&Variant> {
		self.variants.iter().find(|v| v.index == index)
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeDefSequence {
	pub type_param: TypeId,
}

/// A fixed length array. Note that the length is a fixed width `u32`, not a compact.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeDefArray {
	pub len: u32,
	pub type_param: TypeId,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeDefTuple {
	pub fields: Vec<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeDefCompact {
	pub type_param: TypeId,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeDefBitSequence {
	pub bit_store_type: TypeId,
	pub bit_order_type: TypeId,
}

/// The different shapes that a type can take. Encoded as a single byte
/// discriminant followed by the payload of the active variant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TypeDef {
	Composite(TypeDefComposite),
	Variant(TypeDefVariant),
	Sequence(TypeDefSequence),
	Array(TypeDefArray),
	Tuple(TypeDefTuple),
	Primitive(TypeDefPrimitive),
	Compact(TypeDefCompact),
	BitSequence(TypeDefBitSequence),
	/// A legacy type, given only by its name.
	HistoricMetaCompat(String),
}

impl TypeDef {
	fn discriminant(&self) -> u8 {
		match self {
			TypeDef::Composite(_) => 0,
			TypeDef::Variant(_) => 1,
			TypeDef::Sequence(_) => 2,
			TypeDef::Array(_) => 3,
			TypeDef::Tuple(_) => 4,
			TypeDef::Primitive(_) => 5,
			TypeDef::Compact(_) => 6,
			TypeDef::BitSequence(_) => 7,
			TypeDef::HistoricMetaCompat(_) => 8,
		}
	}

	/// A short name for the kind of type this is, used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			TypeDef::Composite(_) => "Composite",
			TypeDef::Variant(_) => "Variant",
			TypeDef::Sequence(_) => "Sequence",
			TypeDef::Array(_) => "Array",
			TypeDef::Tuple(_) => "Tuple",
			TypeDef::Primitive(_) => "Primitive",
			TypeDef::Compact(_) => "Compact",
			TypeDef::BitSequence(_) => "BitSequence",
			TypeDef::HistoricMetaCompat(_) => "HistoricMetaCompat",
		}
	}
}

impl Decode for TypeDef {
	fn decode<I: Input>(input: &mut I) -> Result<Self, codec::Error> {
		let tag = input.read_byte().map_err(|e| e.chain("Could not decode `TypeDef`, failed to read variant byte"))?;
		let def = match tag {
			0 => TypeDef::Composite(Decode::decode(input)?),
			1 => TypeDef::Variant(Decode::decode(input)?),
			2 => TypeDef::Sequence(Decode::decode(input)?),
			3 => TypeDef::Array(Decode::decode(input)?),
			4 => TypeDef::Tuple(Decode::decode(input)?),
			5 => TypeDef::Primitive(Decode::decode(input)?),
			6 => TypeDef::Compact(Decode::decode(input)?),
			7 => TypeDef::BitSequence(Decode::decode(input)?),
			8 => TypeDef::HistoricMetaCompat(Decode::decode(input)?),
			other => {
				return Err(codec::Error::from("Could not decode `TypeDef`, variant doesn't exist")
					.chain(format!("unexpected `TypeDef` variant byte {other}")))
			}
		};
		Ok(def)
	}
}

impl Encode for TypeDef {
	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		dest.push_byte(self.discriminant());
		match self {
			TypeDef::Composite(c) => c.encode_to(dest),
			TypeDef::Variant(v) => v.encode_to(dest),
			TypeDef::Sequence(s) => s.encode_to(dest),
			TypeDef::Array(a) => a.encode_to(dest),
			TypeDef::Tuple(t) => t.encode_to(dest),
			TypeDef::Primitive(p) => p.encode_to(dest),
			TypeDef::Compact(c) => c.encode_to(dest),
			TypeDef::BitSequence(b) => b.encode_to(dest),
			TypeDef::HistoricMetaCompat(name) => name.encode_to(dest),
		}
	}
}

/// Scalar types. Encoded as a single byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TypeDefPrimitive {
	#[display(fmt = "bool")]
	Bool,
	#[display(fmt = "char")]
	Char,
	#[display(fmt = "str")]
	Str,
	#[display(fmt = "u8")]
	U8,
	#[display(fmt = "u16")]
	U16,
	#[display(fmt = "u32")]
	U32,
	#[display(fmt = "u64")]
	U64,
	#[display(fmt = "u128")]
	U128,
	#[display(fmt = "u256")]
	U256,
	#[display(fmt = "i8")]
	I8,
	#[display(fmt = "i16")]
	I16,
	#[display(fmt = "i32")]
	I32,
	#[display(fmt = "i64")]
	I64,
	#[display(fmt = "i128")]
	I128,
	#[display(fmt = "i256")]
	I256,
}

impl TypeDefPrimitive {
	const ALL: [TypeDefPrimitive; 15] = [
		TypeDefPrimitive::Bool,
		TypeDefPrimitive::Char,
		TypeDefPrimitive::Str,
		TypeDefPrimitive::U8,
		TypeDefPrimitive::U16,
		TypeDefPrimitive::U32,
		TypeDefPrimitive::U64,
		TypeDefPrimitive::U128,
		TypeDefPrimitive::U256,
		TypeDefPrimitive::I8,
		TypeDefPrimitive::I16,
		TypeDefPrimitive::I32,
		TypeDefPrimitive::I64,
		TypeDefPrimitive::I128,
		TypeDefPrimitive::I256,
	];
}

impl Decode for TypeDefPrimitive {
	fn decode<I: Input>(input: &mut I) -> Result<Self, codec::Error> {
		let tag = input
			.read_byte()
			.map_err(|e| e.chain("Could not decode `TypeDefPrimitive`, failed to read variant byte"))?;
		TypeDefPrimitive::ALL.get(tag as usize).copied().ok_or_else(|| {
			codec::Error::from("Could not decode `TypeDefPrimitive`, variant doesn't exist")
				.chain(format!("unexpected `TypeDefPrimitive` variant byte {tag}"))
		})
	}
}

impl Encode for TypeDefPrimitive {
	fn size_hint(&self) -> usize {
		1
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		// Variants are declared in wire order.
		dest.push_byte(*self as u8)
	}
}
