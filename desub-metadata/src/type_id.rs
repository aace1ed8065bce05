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

use codec::{Compact, Decode, Encode, Input, Output};

/// The ID of a type in the [`crate::metadata::TypeRegistry`]. On the wire this is a
/// compact encoded `u32`; it's only ever used as a lookup key into the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct TypeId(u32);

impl TypeId {
	/// Return the `u32` ID of this type.
	pub fn id(&self) -> u32 {
		self.0
	}
}

impl From<u32> for TypeId {
	fn from(id: u32) -> Self {
		TypeId(id)
	}
}

impl Decode for TypeId {
	fn decode<I: Input>(input: &mut I) -> Result<Self, codec::Error> {
		let id = <Compact<u32>>::decode(input).map_err(|e| e.chain("Could not decode `TypeId`"))?;
		Ok(TypeId(id.0))
	}
}

impl Encode for TypeId {
	fn size_hint(&self) -> usize {
		Compact(self.0).size_hint()
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		Compact(self.0).encode_to(dest)
	}
}
