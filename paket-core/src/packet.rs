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

//! Packet declarations and accessor strategies.
//!
//! A packet type declares its identifier, its group and one of three
//! accessor strategies. Custom logic hands the payload layout to the
//! type itself through [`PacketLogic`]; the generated strategy inlines
//! per-field code at derive time; the proxied strategy walks a static
//! field table at runtime. All three surface as the same type-erased
//! [`PacketReader`] and [`PacketWriter`] pair, which is all the registry
//! ever sees.

use std::any::Any;
use std::sync::Arc;

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::resolver::context::SerializerContext;
use crate::resolver::descriptor::TypeDescriptor;

/// Group packets land in when their declaration names none.
pub const DEFAULT_GROUP: &str = "default";

/// How a packet obtains its wire identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketId {
    /// A fixed identifier assigned at declaration.
    Id(u32),
    /// The declaration exists but registers nothing.
    Skip,
    /// The identifier is resolved per group at registration time.
    Dynamic,
}

/// Which reader/writer pair a packet declaration produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessorStrategy {
    /// Hand-written logic on the packet type itself.
    Custom,
    /// Per-field accessors generated at derive time.
    Generated,
    /// A static field table walked at runtime.
    Proxied,
}

/// A registrable packet type.
///
/// Usually implemented by the derive macro; hand-written impls only need
/// to produce a reader/writer pair.
pub trait Packet: Sized + 'static {
    const ID: PacketId;
    const GROUP: &'static str = DEFAULT_GROUP;
    const STRATEGY: AccessorStrategy;

    /// Resolves the identifier for dynamically numbered packets. Fixed
    /// declarations never consult this.
    fn dynamic_id(_group: &str) -> Option<u32> {
        None
    }

    fn reader() -> PacketReader;

    fn writer() -> PacketWriter;
}

/// Hand-written payload layout for a packet.
///
/// Deconstruction writes the payload; construction rebuilds the packet
/// from it. The pair owns the layout entirely, the engine contributes
/// nothing but the context and the cursor.
pub trait PacketLogic: Sized {
    fn deconstruct(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<(), Error>;

    fn construct(
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<Self, Error>;
}

type ReadFn =
    dyn Fn(&SerializerContext<'_>, &mut dyn DataVisitor) -> Result<Box<dyn Any>, Error>
        + Send
        + Sync;

type WriteFn = dyn Fn(&SerializerContext<'_>, &mut dyn DataVisitor, &dyn Any) -> Result<(), Error>
    + Send
    + Sync;

/// Type-erased deserializer producing a boxed packet value.
#[derive(Clone)]
pub struct PacketReader {
    read: Arc<ReadFn>,
}

impl PacketReader {
    pub fn new(
        read: impl Fn(&SerializerContext<'_>, &mut dyn DataVisitor) -> Result<Box<dyn Any>, Error>
            + Send
            + Sync
            + 'static,
    ) -> PacketReader {
        PacketReader {
            read: Arc::new(read),
        }
    }

    pub fn read(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<Box<dyn Any>, Error> {
        (self.read)(context, visitor)
    }
}

/// Type-erased serializer consuming a borrowed packet value.
#[derive(Clone)]
pub struct PacketWriter {
    write: Arc<WriteFn>,
}

impl PacketWriter {
    pub fn new(
        write: impl Fn(&SerializerContext<'_>, &mut dyn DataVisitor, &dyn Any) -> Result<(), Error>
            + Send
            + Sync
            + 'static,
    ) -> PacketWriter {
        PacketWriter {
            write: Arc::new(write),
        }
    }

    pub fn write(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        packet: &dyn Any,
    ) -> Result<(), Error> {
        (self.write)(context, visitor, packet)
    }
}

/// One field of a proxied packet: its memoized descriptor and the thunks
/// moving it between the packet value and the cursor.
pub struct FieldModel {
    pub name: &'static str,
    pub descriptor: fn() -> TypeDescriptor,
    pub read: fn(&SerializerContext<'_>, &mut dyn DataVisitor, &mut dyn Any) -> Result<(), Error>,
    pub write: fn(&SerializerContext<'_>, &mut dyn DataVisitor, &dyn Any) -> Result<(), Error>,
}

/// A reader that default-constructs `T` and fills it one field at a
/// time. Fields missing from the table keep their default value.
pub fn proxied_reader<T>(fields: &'static [FieldModel]) -> PacketReader
where
    T: Default + 'static,
{
    PacketReader::new(move |context, visitor| {
        let mut value = T::default();
        for field in fields {
            let child = context.with_descriptor((field.descriptor)());
            (field.read)(&child, visitor, &mut value)?;
        }
        Ok(Box::new(value))
    })
}

/// A writer that walks the field table in declaration order.
pub fn proxied_writer(fields: &'static [FieldModel]) -> PacketWriter {
    PacketWriter::new(move |context, visitor, packet| {
        for field in fields {
            let child = context.with_descriptor((field.descriptor)());
            (field.write)(&child, visitor, packet)?;
        }
        Ok(())
    })
}
