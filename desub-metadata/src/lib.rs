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

//! A crate to decode V14 metadata from substrate nodes into an immutable document
//! and look up calls, events, storage entries and constants in it by name.
//! See [`Metadata::from_bytes`] to get started, and [`query`] for the lookups.

#![forbid(unsafe_code)]

mod type_id;

pub mod metadata;
pub mod query;

pub use metadata::{Metadata, MetadataError};
pub use query::{CallIndex, EventId, LookupError};

pub use type_id::TypeId;
