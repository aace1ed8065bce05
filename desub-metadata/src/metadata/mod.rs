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

//! Decode SCALE encoded V14 metadata from a substrate node into a [`Metadata`]
//! document that can be queried by name (see [`crate::query`]).

mod pallet;
mod readonly_array;
mod registry;
mod type_def;

use crate::TypeId;
use codec::{Decode, Encode, Input};
use std::fmt::Write;

pub use pallet::{
	ExtrinsicMetadata, PalletCallMetadata, PalletConstantMetadata, PalletErrorMetadata, PalletEventMetadata,
	PalletMetadata, PalletStorageMetadata, SignedExtensionMetadata, StorageEntryMetadata, StorageEntryModifier,
	StorageEntryType, StorageHasher,
};
pub use readonly_array::ReadonlyArray;
pub use registry::{PortableType, TypeRegistry};
pub use type_def::{
	Field, Type, TypeDef, TypeDefArray, TypeDefBitSequence, TypeDefCompact, TypeDefComposite, TypeDefPrimitive,
	TypeDefSequence, TypeDefTuple, TypeDefVariant, TypeParameter, Variant,
};

/// The magic number ("meta" in little endian) at the start of encoded metadata.
pub const META_RESERVED: u32 = 0x6174656d;

/// The only metadata version understood here.
pub const METADATA_VERSION: u8 = 14;

/// An enum of the possible errors that can be returned from attempting to construct
/// a [`Metadata`] struct.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetadataError {
	#[error("invalid metadata prefix {0:#010x}")]
	InvalidMagic(u32),
	#[error("metadata version {0} is not supported")]
	UnsupportedVersion(u8),
	#[error("{0}")]
	CodecError(#[from] codec::Error),
}

/// This is a representation of the SCALE encoded V14 metadata obtained from a substrate
/// node. Once decoded it is never modified, so it can be shared freely between threads
/// and queried concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Metadata {
	/// Type information lives inside this.
	types: TypeRegistry,
	/// The pallets, in the order they appear in the metadata (which is
	/// not necessarily sorted by name or index).
	pallets: ReadonlyArray<PalletMetadata>,
	/// Details about the extrinsic format.
	extrinsic: ExtrinsicMetadata,
	/// The type of the runtime itself.
	ty: TypeId,
}

impl Metadata {
	/// Attempt to convert some SCALE encoded bytes into Metadata, returning an
	/// error if something goes wrong in doing so. The bytes are expected to be
	/// prefixed by the "meta" magic number and version, which is how a node hands
	/// them back. Here's an example command using `curl` and `jq` to download this
	/// from a locally running node (on the default port) and save it as `node_metadata.scale`.
	///
	/// ```sh
	/// curl -sX POST -H "Content-Type: application/json" --data '{"jsonrpc":"2.0","method":"state_getMetadata", "id": 1}' localhost:9933 \
	///     | jq .result \
	///     | cut -d '"' -f 2 \
	///     | xxd -r -p > node_metadata.scale
	/// ```
	///
	/// This file can then be read and passed directly to this method.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetadataError> {
		log::trace!("Decoding metadata");
		let cursor = &mut &*bytes;

		let magic = u32::decode(cursor)?;
		if magic != META_RESERVED {
			return Err(MetadataError::InvalidMagic(magic));
		}
		let version = cursor.read_byte()?;
		if version != METADATA_VERSION {
			return Err(MetadataError::UnsupportedVersion(version));
		}
		log::trace!("V14 metadata found.");

		Self::from_v14_bytes(*cursor)
	}

	/// Decode the V14 metadata body, without any magic number or version prefix.
	pub fn from_v14_bytes(mut bytes: &[u8]) -> Result<Self, MetadataError> {
		Ok(Metadata::decode(&mut bytes)?)
	}

	/// Encode the pallets and extrinsic details back to SCALE bytes.
	///
	/// # Note
	/// The type registry and runtime type ID are not part of the output, so this
	/// is not the inverse of [`Metadata::from_v14_bytes`]. Anything that needs the
	/// whole document back has to hold on to the original bytes.
	pub fn encode_pallets_and_extrinsic(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.pallets.size_hint() + self.extrinsic.size_hint());
		self.pallets.encode_to(&mut out);
		self.extrinsic.encode_to(&mut out);
		out
	}

	/// Return a reference to the type registry.
	pub fn types(&self) -> &TypeRegistry {
		&self.types
	}

	/// Given a [`crate::TypeId`], return the corresponding type from the type registry, if possible.
	pub fn resolve<Id: Into<TypeId>>(&self, id: Id) -> Option<&Type> {
		self.types.resolve(id)
	}

	/// All pallets, in metadata order.
	pub fn pallets(&self) -> &[PalletMetadata] {
		&self.pallets
	}

	/// Return details about the type of extrinsic supported by this metadata.
	pub fn extrinsic(&self) -> &ExtrinsicMetadata {
		&self.extrinsic
	}

	/// The ID of the type describing the runtime itself.
	pub fn runtime_type(&self) -> TypeId {
		self.ty
	}

	/// print out a human readable description of the metadata
	pub fn pretty(&self) -> String {
		let mut string = String::new();
		for pallet in self.pallets.iter() {
			let _ = writeln!(string, "{} ({})", pallet.name, pallet.index);
			if let Some(storage) = &pallet.storage {
				for entry in &storage.entries {
					let _ = writeln!(string, " s  {} {}", entry.name, entry.modifier);
				}
			}
			if let Ok(calls) = self.call_variants(&pallet.name) {
				for call in &calls.variants {
					let _ = writeln!(string, " c  {}", call.name);
				}
			}
			if let Ok(events) = self.event_variants(&pallet.name) {
				for event in &events.variants {
					let _ = writeln!(string, " e  {}", event.name);
				}
			}
			for constant in &pallet.constants {
				let _ = writeln!(string, " k  {} = 0x{}", constant.name, hex::encode(&constant.value));
			}
		}
		string
	}
}

impl Decode for Metadata {
	fn decode<I: Input>(input: &mut I) -> Result<Self, codec::Error> {
		let types = TypeRegistry::decode(input)?;
		let pallets = <ReadonlyArray<PalletMetadata>>::decode(input)
			.map_err(|e| e.chain("Could not decode `Metadata::pallets`"))?;
		log::debug!("Decoded {} types and {} pallets", types.len(), pallets.len());
		let extrinsic = ExtrinsicMetadata::decode(input).map_err(|e| e.chain("Could not decode `Metadata::extrinsic`"))?;
		let ty = TypeId::decode(input).map_err(|e| e.chain("Could not decode `Metadata::ty`"))?;
		Ok(Metadata { types, pallets, extrinsic, ty })
	}
}
