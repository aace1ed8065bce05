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

use super::readonly_array::ReadonlyArray;
use super::type_def::Type;
use crate::TypeId;
use codec::{Compact, Decode, Encode, Input, Output};
use std::collections::HashMap;

/// A type along with the ID that other types use to refer to it.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortableType {
	pub id: TypeId,
	pub ty: Type,
}

/// Every type used in the metadata, stored flat in the order it was decoded in,
/// plus an index so that types can be resolved by [`TypeId`] without a scan.
///
/// Types are never resolved while decoding, so IDs that point at missing
/// types (or at themselves) decode fine. Duplicate IDs are rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeRegistry {
	types: ReadonlyArray<PortableType>,
	#[cfg_attr(feature = "serde", serde(skip))]
	positions: HashMap<TypeId, usize>,
}

impl TypeRegistry {
	/// Build a registry from some types, failing on the first duplicated ID.
	pub fn from_types(types: Vec<PortableType>) -> Result<Self, codec::Error> {
		let mut positions = HashMap::with_capacity(types.len());
		for (pos, ty) in types.iter().enumerate() {
			if positions.insert(ty.id, pos).is_some() {
				return Err(codec::Error::from("Could not decode `TypeRegistry`, duplicate type ID")
					.chain(format!("type ID {} appears more than once", ty.id)));
			}
		}
		Ok(TypeRegistry { types: types.into(), positions })
	}

	/// Given a [`TypeId`], return the corresponding type, if it exists.
	pub fn resolve<Id: Into<TypeId>>(&self, id: Id) -> Option<&Type> {
		let pos = *self.positions.get(&id.into())?;
		Some(&self.types[pos].ty)
	}

	/// All of the types, in the order that they were decoded.
	pub fn types(&self) -> &[PortableType] {
		&self.types
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

impl Decode for TypeRegistry {
	fn decode<I: Input>(input: &mut I) -> Result<Self, codec::Error> {
		let len = <Compact<u32>>::decode(input).map_err(|e| e.chain("Could not decode `TypeRegistry` length"))?.0;
		log::trace!("Decoding {} types", len);

		// Don't trust the length prefix for preallocation; truncated input
		// will error out below anyway.
		let mut types = Vec::with_capacity((len as usize).min(input.remaining_len()?.unwrap_or(0)));
		for _ in 0..len {
			types.push(PortableType::decode(input).map_err(|e| e.chain("Could not decode `TypeRegistry` entry"))?);
		}
		TypeRegistry::from_types(types)
	}
}

impl Encode for TypeRegistry {
	fn size_hint(&self) -> usize {
		self.types.size_hint()
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		self.types.encode_to(dest)
	}
}
