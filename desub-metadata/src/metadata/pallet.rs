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

//! Per pallet metadata: storage, calls, events, constants and errors, as well
//! as the description of the extrinsic format.

use crate::TypeId;
use codec::{Decode, Encode, Input, Output};

/// Everything the metadata knows about a single pallet.
///
/// The field order here is the wire order.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PalletMetadata {
	pub name: String,
	pub storage: Option<PalletStorageMetadata>,
	pub calls: Option<PalletCallMetadata>,
	pub event: Option<PalletEventMetadata>,
	pub constants: Vec<PalletConstantMetadata>,
	pub error: Option<PalletErrorMetadata>,
	/// The index of the pallet in the runtime; the first byte of any call or
	/// event belonging to it.
	pub index: u8,
}

impl PalletMetadata {
	/// Does this pallet expose any calls?
	pub fn has_calls(&self) -> bool {
		self.calls.is_some()
	}

	pub fn has_events(&self) -> bool {
		self.event.is_some()
	}

	/// Find a constant in this pallet by name.
	pub fn constant(&self, name: &str) -> Option<&PalletConstantMetadata> {
		self.constants.iter().find(|c| c.name == name)
	}

	/// Find a storage entry in this pallet by name.
	pub fn storage_entry(&self, name: &str) -> Option<&StorageEntryMetadata> {
		self.storage.as_ref()?.entries.iter().find(|e| e.name == name)
	}
}

/// The storage items of a pallet, all sharing one prefix.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PalletStorageMetadata {
	/// Normally identical to the pallet name, but the two are distinct values.
	pub prefix: String,
	pub entries: Vec<StorageEntryMetadata>,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StorageEntryMetadata {
	pub name: String,
	pub modifier: StorageEntryModifier,
	pub ty: StorageEntryType,
	/// The SCALE encoded value handed back when nothing is stored at this entry.
	pub default: Vec<u8>,
	pub docs: Vec<String>,
}

impl StorageEntryMetadata {
	pub fn is_plain(&self) -> bool {
		matches!(self.ty, StorageEntryType::Plain(_))
	}

	pub fn is_map(&self) -> bool {
		matches!(self.ty, StorageEntryType::Map { .. })
	}

	/// The hashers used to build keys for this entry. Empty for plain entries.
	pub fn hashers(&self) -> &[StorageHasher] {
		match &self.ty {
			StorageEntryType::Plain(_) => &[],
			StorageEntryType::Map { hashers, .. } => hashers,
		}
	}

	/// The type of the value stored at this entry.
	pub fn value_type(&self) -> TypeId {
		match &self.ty {
			StorageEntryType::Plain(ty) => *ty,
			StorageEntryType::Map { value, .. } => *value,
		}
	}
}

/// What a storage entry hands back when nothing is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StorageEntryModifier {
	/// Nothing; the entry is an `Option`.
	Optional,
	/// The entry's `default` bytes.
	Default,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StorageHasher {
	Blake2_128,
	Blake2_256,
	Blake2_128Concat,
	Twox128,
	Twox256,
	Twox64Concat,
	Identity,
}

impl StorageHasher {
	/// Concatenating hashers append the encoded key after the hash,
	/// so the original key can be recovered from a storage key.
	pub fn is_concat(&self) -> bool {
		matches!(self, StorageHasher::Blake2_128Concat | StorageHasher::Twox64Concat | StorageHasher::Identity)
	}

	/// The number of hash bytes this hasher produces, not counting any
	/// concatenated key.
	pub fn hash_len(&self) -> usize {
		match self {
			StorageHasher::Blake2_128 | StorageHasher::Blake2_128Concat | StorageHasher::Twox128 => 16,
			StorageHasher::Blake2_256 | StorageHasher::Twox256 => 32,
			StorageHasher::Twox64Concat => 8,
			StorageHasher::Identity => 0,
		}
	}
}

/// The shape of a storage entry: a single value, or a map from
/// one or more hashed keys to values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StorageEntryType {
	Plain(TypeId),
	Map {
		/// One hasher per key; `key` is a tuple type when there are several.
		hashers: Vec<StorageHasher>,
		key: TypeId,
		value: TypeId,
	},
}

impl Decode for StorageEntryType {
	fn decode<I: Input>(input: &mut I) -> Result<Self, codec::Error> {
		let tag =
			input.read_byte().map_err(|e| e.chain("Could not decode `StorageEntryType`, failed to read variant byte"))?;
		match tag {
			0 => Ok(StorageEntryType::Plain(Decode::decode(input)?)),
			1 => Ok(StorageEntryType::Map {
				hashers: Decode::decode(input)?,
				key: Decode::decode(input)?,
				value: Decode::decode(input)?,
			}),
			other => Err(codec::Error::from("Could not decode `StorageEntryType`, variant doesn't exist")
				.chain(format!("unexpected `StorageEntryType` variant byte {other}"))),
		}
	}
}

impl Encode for StorageEntryType {
	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		match self {
			StorageEntryType::Plain(ty) => {
				dest.push_byte(0);
				ty.encode_to(dest);
			}
			StorageEntryType::Map { hashers, key, value } => {
				dest.push_byte(1);
				hashers.encode_to(dest);
				key.encode_to(dest);
				value.encode_to(dest);
			}
		}
	}
}

/// Points at the enum type whose variants are the pallet's calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PalletCallMetadata {
	pub ty: TypeId,
}

/// Points at the enum type whose variants are the pallet's events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PalletEventMetadata {
	pub ty: TypeId,
}

/// Points at the enum type whose variants are the pallet's errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PalletErrorMetadata {
	pub ty: TypeId,
}

/// A constant declared by a pallet. The value is left SCALE encoded;
/// decode it against `ty` to make sense of it.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PalletConstantMetadata {
	pub name: String,
	pub ty: TypeId,
	pub value: Vec<u8>,
	pub docs: Vec<String>,
}

/// Details about the extrinsic format supported by the node.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtrinsicMetadata {
	/// The type of the extrinsic envelope itself.
	pub ty: TypeId,
	/// The version of the extrinsic format in use by the node.
	pub version: u8,
	pub signed_extensions: Vec<SignedExtensionMetadata>,
}

/// Part of the extrinsic signature area can be varied to include whatever
/// information a node decides is important. Each entry describes one such part.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SignedExtensionMetadata {
	pub identifier: String,
	pub ty: TypeId,
	pub additional_signed: TypeId,
}
