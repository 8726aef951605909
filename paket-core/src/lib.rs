// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! # Paket Core
//!
//! Core runtime for the Paket binary packet protocol. It serializes
//! typed packets to a compact big-endian wire form and rebuilds them on
//! the other side, with per-field constraints checked in both
//! directions.
//!
//! ## Architecture
//!
//! - **buffer**: byte cursor with independent read and write positions
//! - **catalogue**: batch registration of packets, codecs and rules
//! - **encoder**: frame layout, packet identifier then payload
//! - **error**: error taxonomy shared by every fallible operation
//! - **factory**: packet groups and framed encode/decode
//! - **metadata**: per-field constraints and codec overrides
//! - **packet**: packet declarations and their readers and writers
//! - **resolver**: type descriptors, codec provider, resolution rules
//! - **serializer**: codec contract and the built-in codecs
//!
//! ## Key Concepts
//!
//! - **[`Serializer`]**: the codec contract, one implementation per
//!   wire form
//! - **[`TypeDescriptor`]**: immutable description of a field's type
//!   and constraints, shared across threads
//! - **[`SerializerProvider`]**: resolves descriptors to codecs through
//!   overrides, direct registrations and rules
//! - **[`PacketFactory`]**: registry of packet groups plus the frame
//!   encoder in front of them
//! - **[`DataVisitor`]**: the byte cursor every codec reads from and
//!   writes to
//!
//! ## Usage
//!
//! Values serialize through a provider and a context:
//!
//! ```rust
//! use paket_core::{read_value, write_value, Error};
//! use paket_core::{SerializerContext, SerializerProvider, VecVisitor};
//!
//! fn main() -> Result<(), Error> {
//!     let provider = SerializerProvider::with_defaults()?;
//!     let context = SerializerContext::untyped(&provider);
//!
//!     let mut buffer = VecVisitor::new();
//!     write_value(&context, &mut buffer, &String::from("hello"))?;
//!     write_value(&context, &mut buffer, &42i32)?;
//!
//!     assert_eq!(read_value::<String>(&context, &mut buffer)?, "hello");
//!     assert_eq!(read_value::<i32>(&context, &mut buffer)?, 42);
//!     Ok(())
//! }
//! ```
//!
//! Packets declare their identifier and field constraints with the
//! derive macro from `paket-derive` and travel through a factory:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use paket_core::{PacketFactory, SerializerProvider, VarIntPacketEncoder, VecVisitor};
//! use paket_derive::Packet;
//!
//! #[derive(Packet, Debug, PartialEq)]
//! #[packet(id = 0x00)]
//! struct Handshake {
//!     #[field(varint)]
//!     protocol_version: i32,
//!     address: String,
//!     port: u16,
//! }
//!
//! let provider = Arc::new(SerializerProvider::with_defaults()?);
//! let factory = PacketFactory::new(VarIntPacketEncoder::default(), provider);
//! factory.add_packet::<Handshake>()?;
//!
//! let mut wire = VecVisitor::new();
//! let handshake = Handshake {
//!     protocol_version: 770,
//!     address: "localhost".into(),
//!     port: 25565,
//! };
//! factory.write(&handshake, &mut wire)?;
//!
//! let decoded: Handshake = factory.create_as("default", &mut wire)?;
//! assert_eq!(decoded, handshake);
//! ```

pub mod buffer;
pub mod catalogue;
pub mod encoder;
pub mod error;
pub mod factory;
pub mod metadata;
pub mod packet;
pub mod resolver;
pub mod serializer;

pub use buffer::{DataVisitor, ReadOnly, VecVisitor, WriteOnly};
pub use catalogue::{
    Catalogue, DefaultRules, DefaultSerializers, PacketRegistration, RuleRegistration,
    SerializerRegistration,
};
pub use encoder::{CodecPacketEncoder, Encoded, PacketEncoder, VarIntPacketEncoder};
pub use error::Error;
pub use factory::{PacketFactory, PacketInfo};
pub use metadata::Metadata;
pub use packet::{
    proxied_reader, proxied_writer, AccessorStrategy, FieldModel, Packet, PacketId, PacketLogic,
    PacketReader, PacketWriter, DEFAULT_GROUP,
};
pub use resolver::context::{read_value, write_value, SerializerContext};
pub use resolver::descriptor::{Described, TypeDescriptor};
pub use resolver::provider::{CodecHandle, CodecKey, SerializerProvider};
pub use resolver::rule::SerializationRule;
pub use serializer::blob::Blob;
pub use serializer::enum_::Enumerated;
pub use serializer::Serializer;
