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

//! Name based lookups against a decoded [`Metadata`] document.
//!
//! Everything here is a read-only scan over the pallets in metadata order;
//! nothing is cached between calls, and pallets are not assumed to be sorted
//! by either name or index.

use crate::metadata::{Metadata, PalletMetadata, StorageEntryMetadata, TypeDef, TypeDefVariant};
use crate::TypeId;

/// An enum of the possible errors that can be returned when looking something up
/// in the [`Metadata`]. Each carries the name or index that could not be found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
	#[error("call {0} should be of the form `Module.Call`")]
	InvalidCallPath(String),
	#[error("module {0} not found in metadata")]
	ModuleNotFound(String),
	#[error("module {0} has no calls")]
	NoCalls(String),
	#[error("module {0} has no events")]
	NoEvents(String),
	#[error("module {0} has no errors")]
	NoErrors(String),
	#[error("method {call} not found within module {module}")]
	CallNotFound { module: String, call: String },
	#[error("module index {0} not found in metadata")]
	ModuleIndexNotFound(u8),
	#[error("event index {index} not found within module {module}")]
	EventNotFound { module: String, index: u8 },
	#[error("storage {item} not found within module {module}")]
	StorageNotFound { module: String, item: String },
	#[error("could not find constant {module}.{constant}")]
	ConstantNotFound { module: String, constant: String },
	#[error("could not find type with ID {0}")]
	TypeNotFound(u32),
	#[error("unexpected type; expecting a Variant type, but got {got}")]
	ExpectedVariantType { got: &'static str },
}

/// The two bytes at the start of an encoded call: the pallet index
/// and the index of the call variant within that pallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[display(fmt = "({}, {})", pallet, call)]
pub struct CallIndex {
	pub pallet: u8,
	pub call: u8,
}

/// Identifies an event by its pallet index and the index of the
/// event variant within that pallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[display(fmt = "({}, {})", pallet, variant)]
pub struct EventId {
	pub pallet: u8,
	pub variant: u8,
}

impl From<(u8, u8)> for EventId {
	fn from((pallet, variant): (u8, u8)) -> Self {
		EventId { pallet, variant }
	}
}

impl Metadata {
	/// Find a pallet by name.
	pub fn pallet(&self, name: &str) -> Option<&PalletMetadata> {
		self.pallets().iter().find(|p| p.name == name)
	}

	/// Find a pallet by its index in the runtime.
	pub fn pallet_by_index(&self, index: u8) -> Option<&PalletMetadata> {
		self.pallets().iter().find(|p| p.index == index)
	}

	/// Check if a module exists. Names are compared exactly.
	pub fn module_exists(&self, name: &str) -> bool {
		self.pallet(name).is_some()
	}

	/// Given a call like `"Balances.transfer"`, return the pallet index and call index
	/// needed to encode it. The call name is resolved against the variants of the
	/// pallet's call enum, and the index handed back is the variant's own index byte.
	pub fn call_index(&self, call: &str) -> Result<CallIndex, LookupError> {
		let (module, call_name) = call.split_once('.').ok_or_else(|| LookupError::InvalidCallPath(call.to_string()))?;

		let pallet = match self.pallets().iter().find(|p| p.has_calls() && p.name == module) {
			Some(pallet) => pallet,
			None if self.module_exists(module) => return Err(LookupError::NoCalls(module.to_string())),
			None => return Err(LookupError::ModuleNotFound(module.to_string())),
		};

		let calls = self.call_variants_of(pallet)?;
		let variant = calls.variant_by_name(call_name).ok_or_else(|| LookupError::CallNotFound {
			module: module.to_string(),
			call: call_name.to_string(),
		})?;
		Ok(CallIndex { pallet: pallet.index, call: variant.index })
	}

	/// Given an event ID, return the name of the pallet and of the event. The variant
	/// index is matched against the index byte of each event variant.
	pub fn event_names<E: Into<EventId>>(&self, event: E) -> Result<(&str, &str), LookupError> {
		let event = event.into();
		let pallet = self
			.pallets()
			.iter()
			.find(|p| p.has_events() && p.index == event.pallet)
			.ok_or(LookupError::ModuleIndexNotFound(event.pallet))?;

		let events = self.event_variants_of(pallet)?;
		let variant = events
			.variant_by_index(event.variant)
			.ok_or_else(|| LookupError::EventNotFound { module: pallet.name.clone(), index: event.variant })?;
		Ok((pallet.name.as_str(), variant.name.as_str()))
	}

	/// Return the storage entry `item` from the pallet whose storage prefix is `module`.
	pub fn storage_entry(&self, module: &str, item: &str) -> Result<&StorageEntryMetadata, LookupError> {
		let storage = self
			.pallets()
			.iter()
			.filter_map(|p| p.storage.as_ref())
			.find(|s| s.prefix == module)
			.ok_or_else(|| LookupError::ModuleNotFound(module.to_string()))?;

		storage
			.entries
			.iter()
			.find(|e| e.name == item)
			.ok_or_else(|| LookupError::StorageNotFound { module: module.to_string(), item: item.to_string() })
	}

	/// Does a storage entry exist? See [`Metadata::storage_entry`].
	pub fn storage_entry_exists(&self, module: &str, item: &str) -> bool {
		self.storage_entry(module, item).is_ok()
	}

	/// Return the SCALE encoded value of a pallet constant.
	pub fn constant_value(&self, module: &str, constant: &str) -> Result<&[u8], LookupError> {
		let mut module_found = false;
		for pallet in self.pallets().iter().filter(|p| p.name == module) {
			module_found = true;
			if let Some(c) = pallet.constant(constant) {
				return Ok(&c.value);
			}
		}

		if module_found {
			Err(LookupError::ConstantNotFound { module: module.to_string(), constant: constant.to_string() })
		} else {
			Err(LookupError::ModuleNotFound(module.to_string()))
		}
	}

	/// The variants of a pallet's call enum.
	pub fn call_variants(&self, module: &str) -> Result<&TypeDefVariant, LookupError> {
		let pallet = self.pallet(module).ok_or_else(|| LookupError::ModuleNotFound(module.to_string()))?;
		self.call_variants_of(pallet)
	}

	/// The variants of a pallet's event enum.
	pub fn event_variants(&self, module: &str) -> Result<&TypeDefVariant, LookupError> {
		let pallet = self.pallet(module).ok_or_else(|| LookupError::ModuleNotFound(module.to_string()))?;
		self.event_variants_of(pallet)
	}

	/// The variants of a pallet's error enum.
	pub fn error_variants(&self, module: &str) -> Result<&TypeDefVariant, LookupError> {
		let pallet = self.pallet(module).ok_or_else(|| LookupError::ModuleNotFound(module.to_string()))?;
		let error = pallet.error.ok_or_else(|| LookupError::NoErrors(pallet.name.clone()))?;
		self.get_variant(error.ty)
	}

	fn call_variants_of(&self, pallet: &PalletMetadata) -> Result<&TypeDefVariant, LookupError> {
		let calls = pallet.calls.ok_or_else(|| LookupError::NoCalls(pallet.name.clone()))?;
		self.get_variant(calls.ty)
	}

	fn event_variants_of(&self, pallet: &PalletMetadata) -> Result<&TypeDefVariant, LookupError> {
		let event = pallet.event.ok_or_else(|| LookupError::NoEvents(pallet.name.clone()))?;
		self.get_variant(event.ty)
	}

	/// A helper function to get hold of a Variant given a type ID.
	fn get_variant(&self, ty: TypeId) -> Result<&TypeDefVariant, LookupError> {
		let ty = self.resolve(ty).ok_or(LookupError::TypeNotFound(ty.id()))?;
		match &ty.type_def {
			TypeDef::Variant(variant) => Ok(variant),
			other => Err(LookupError::ExpectedVariantType { got: other.kind() }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::metadata::{
		tests::balances_metadata, ExtrinsicMetadata, Field, PalletCallMetadata, PalletConstantMetadata,
		PalletErrorMetadata, PalletEventMetadata, PalletStorageMetadata, PortableType, StorageEntryModifier,
		StorageEntryType, Type, TypeDefPrimitive, Variant,
	};
	use codec::Encode;

	fn ty(type_def: TypeDef) -> Type {
		Type { path: vec![], type_params: vec![], type_def, docs: vec![] }
	}

	fn variants(names: &[(&str, u8)]) -> TypeDef {
		TypeDef::Variant(TypeDefVariant {
			variants: names
				.iter()
				.map(|(name, index)| Variant { name: name.to_string(), fields: vec![], index: *index, docs: vec![] })
				.collect(),
		})
	}

	fn empty_pallet(name: &str, index: u8) -> PalletMetadata {
		PalletMetadata {
			name: name.into(),
			storage: None,
			calls: None,
			event: None,
			constants: vec![],
			error: None,
			index,
		}
	}

	/// Pallets are deliberately not in index order.
	fn metadata() -> Metadata {
		let types = vec![
			PortableType { id: 0.into(), ty: ty(TypeDef::Primitive(TypeDefPrimitive::U32)) },
			// System events:
			PortableType { id: 1.into(), ty: ty(variants(&[("ExtrinsicSuccess", 0), ("ExtrinsicFailed", 1)])) },
			// Balances calls, with a gap in the indexes:
			PortableType { id: 2.into(), ty: ty(variants(&[("transfer", 0), ("force_transfer", 2)])) },
			// Balances events:
			PortableType { id: 3.into(), ty: ty(variants(&[("Endowed", 0), ("Transfer", 2)])) },
			// Balances errors:
			PortableType { id: 4.into(), ty: ty(variants(&[("InsufficientBalance", 2)])) },
		];

		let system = PalletMetadata {
			storage: Some(PalletStorageMetadata {
				prefix: "System".into(),
				entries: vec![StorageEntryMetadata {
					name: "Number".into(),
					modifier: StorageEntryModifier::Default,
					ty: StorageEntryType::Plain(0.into()),
					default: vec![0; 4],
					docs: vec![],
				}],
			}),
			event: Some(PalletEventMetadata { ty: 1.into() }),
			constants: vec![PalletConstantMetadata {
				name: "BlockWeights".into(),
				ty: 0.into(),
				value: vec![0x00, 0x01],
				docs: vec![],
			}],
			..empty_pallet("System", 0)
		};
		let balances = PalletMetadata {
			calls: Some(PalletCallMetadata { ty: 2.into() }),
			event: Some(PalletEventMetadata { ty: 3.into() }),
			error: Some(PalletErrorMetadata { ty: 4.into() }),
			..empty_pallet("Balances", 5)
		};
		// Points its calls at a type that isn't an enum:
		let broken = PalletMetadata { calls: Some(PalletCallMetadata { ty: 0.into() }), ..empty_pallet("Broken", 7) };
		// Points its calls at a type that doesn't exist:
		let dangling = PalletMetadata { calls: Some(PalletCallMetadata { ty: 99.into() }), ..empty_pallet("Dangling", 8) };
		let timestamp = empty_pallet("Timestamp", 3);

		let pallets = vec![balances, timestamp, system, broken, dangling];
		let extrinsic = ExtrinsicMetadata { ty: 0.into(), version: 4, signed_extensions: vec![] };
		let bytes = (types, pallets, extrinsic, TypeId::from(0)).encode();
		Metadata::from_v14_bytes(&bytes).expect("valid metadata")
	}

	#[test]
	fn finds_constant_values() {
		let meta = metadata();
		assert_eq!(meta.constant_value("System", "BlockWeights"), Ok(&[0x00, 0x01][..]));
		assert_eq!(
			meta.constant_value("System", "Nope"),
			Err(LookupError::ConstantNotFound { module: "System".into(), constant: "Nope".into() })
		);
		assert_eq!(meta.constant_value("Nope", "BlockWeights"), Err(LookupError::ModuleNotFound("Nope".into())));
	}

	#[test]
	fn module_exists_is_exact() {
		let meta = metadata();
		assert!(meta.module_exists("Balances"));
		assert!(meta.module_exists("Timestamp"));
		assert!(!meta.module_exists("balances"));
		assert!(!meta.module_exists("Balance"));
		assert!(!meta.module_exists(""));
		// Repeated queries give the same answer:
		for _ in 0..3 {
			assert!(meta.module_exists("System"));
		}
	}

	#[test]
	fn resolves_call_indexes_from_call_variants() {
		let meta = metadata();
		assert_eq!(meta.call_index("Balances.transfer"), Ok(CallIndex { pallet: 5, call: 0 }));
		// The variant's index byte is used, not its position:
		assert_eq!(meta.call_index("Balances.force_transfer"), Ok(CallIndex { pallet: 5, call: 2 }));
		assert_eq!(CallIndex { pallet: 5, call: 2 }.to_string(), "(5, 2)");

		// Constants are not calls:
		assert_eq!(
			meta.call_index("System.BlockWeights"),
			Err(LookupError::NoCalls("System".into()))
		);
		assert_eq!(
			meta.call_index("Balances.transfer_all"),
			Err(LookupError::CallNotFound { module: "Balances".into(), call: "transfer_all".into() })
		);
		assert_eq!(meta.call_index("Staking.bond"), Err(LookupError::ModuleNotFound("Staking".into())));
		assert_eq!(meta.call_index("Balances"), Err(LookupError::InvalidCallPath("Balances".into())));
	}

	#[test]
	fn call_types_must_be_enums_that_exist() {
		let meta = metadata();
		assert_eq!(meta.call_index("Broken.anything"), Err(LookupError::ExpectedVariantType { got: "Primitive" }));
		assert_eq!(meta.call_index("Dangling.anything"), Err(LookupError::TypeNotFound(99)));
	}

	#[test]
	fn resolves_event_names_from_event_variants() {
		let meta = metadata();
		assert_eq!(meta.event_names((0, 1)), Ok(("System", "ExtrinsicFailed")));
		assert_eq!(meta.event_names(EventId { pallet: 5, variant: 2 }), Ok(("Balances", "Transfer")));
		assert_eq!(
			meta.event_names((5, 1)),
			Err(LookupError::EventNotFound { module: "Balances".into(), index: 1 })
		);
		// Timestamp exists at index 3 but has no events:
		assert_eq!(meta.event_names((3, 0)), Err(LookupError::ModuleIndexNotFound(3)));
		assert_eq!(meta.event_names((42, 0)), Err(LookupError::ModuleIndexNotFound(42)));
	}

	#[test]
	fn finds_storage_entries() {
		let meta = metadata();
		let entry = meta.storage_entry("System", "Number").expect("entry exists");
		assert_eq!(entry.name, "Number");
		assert!(entry.is_plain());
		assert!(meta.storage_entry_exists("System", "Number"));

		assert_eq!(
			meta.storage_entry("System", "Account"),
			Err(LookupError::StorageNotFound { module: "System".into(), item: "Account".into() })
		);
		// Balances has no storage section at all:
		assert_eq!(meta.storage_entry("Balances", "Account"), Err(LookupError::ModuleNotFound("Balances".into())));
		assert!(!meta.storage_entry_exists("Balances", "Account"));
	}

	#[test]
	fn pallet_lookups() {
		let meta = metadata();
		assert_eq!(meta.pallet_by_index(3).map(|p| p.name.as_str()), Some("Timestamp"));
		assert!(meta.pallet_by_index(1).is_none());
		assert_eq!(meta.pallet("System").map(|p| p.index), Some(0));

		let errors = meta.error_variants("Balances").expect("balances has errors");
		assert_eq!(errors.variant_by_index(2).map(|v| v.name.as_str()), Some("InsufficientBalance"));
		assert_eq!(meta.error_variants("System"), Err(LookupError::NoErrors("System".into())));
		assert_eq!(meta.event_variants("Timestamp"), Err(LookupError::NoEvents("Timestamp".into())));
		assert_eq!(meta.call_variants("Nope"), Err(LookupError::ModuleNotFound("Nope".into())));
	}

	#[test]
	fn queries_can_run_concurrently() {
		let meta = std::sync::Arc::new(balances_metadata());
		let handles: Vec<_> = (0..4)
			.map(|_| {
				let meta = meta.clone();
				std::thread::spawn(move || meta.call_index("Balances.transfer"))
			})
			.collect();
		for handle in handles {
			assert_eq!(handle.join().expect("thread didn't panic"), Ok(CallIndex { pallet: 5, call: 0 }));
		}
	}

	#[test]
	fn error_messages_name_what_was_missing() {
		let err = LookupError::ConstantNotFound { module: "System".into(), constant: "Nope".into() };
		assert_eq!(err.to_string(), "could not find constant System.Nope");
		assert_eq!(LookupError::TypeNotFound(3).to_string(), "could not find type with ID 3");
	}

	#[test]
	fn unused_field_types_are_fine() {
		// A call with fields pointing at types that don't exist still resolves;
		// only the call enum itself has to be present.
		let field = Field { name: None, ty: 1234.into(), type_name: None, docs: vec![] };
		let types = vec![PortableType {
			id: 0.into(),
			ty: ty(TypeDef::Variant(TypeDefVariant {
				variants: vec![Variant { name: "remark".into(), fields: vec![field], index: 1, docs: vec![] }],
			})),
		}];
		let pallets = vec![PalletMetadata { calls: Some(PalletCallMetadata { ty: 0.into() }), ..empty_pallet("System", 0) }];
		let extrinsic = ExtrinsicMetadata { ty: 0.into(), version: 4, signed_extensions: vec![] };
		let bytes = (types, pallets, extrinsic, TypeId::from(0)).encode();
		let meta = Metadata::from_v14_bytes(&bytes).expect("valid metadata");
		assert_eq!(meta.call_index("System.remark"), Ok(CallIndex { pallet: 0, call: 1 }));
	}
}
