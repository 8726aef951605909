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

//! Packet registration and framed encode/decode.
//!
//! The [`PacketFactory`] owns the packet groups, the codec provider and
//! the frame encoder. Groups partition the identifier space, so two
//! protocol phases can reuse the same numbers; a packet type itself
//! belongs to exactly one group.
//!
//! All registration maps are concurrent. Registration is first-writer
//! wins: re-registering a type is a no-op, claiming an identifier owned
//! by a different type is an error.

use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::buffer::{DataVisitor, VecVisitor};
use crate::catalogue::Catalogue;
use crate::encoder::{Encoded, PacketEncoder};
use crate::ensure;
use crate::error::Error;
use crate::packet::{Packet, PacketId, PacketReader, PacketWriter};
use crate::resolver::context::SerializerContext;
use crate::resolver::provider::SerializerProvider;

/// Where a packet type is registered.
#[derive(Clone, Debug)]
pub struct PacketInfo {
    pub group: String,
    pub id: u32,
    pub type_name: &'static str,
}

struct GroupEntry {
    type_id: TypeId,
    type_name: &'static str,
    reader: PacketReader,
    writer: PacketWriter,
}

struct PacketGroup {
    by_id: DashMap<u32, Arc<GroupEntry>>,
    ids_by_type: DashMap<TypeId, u32>,
}

impl PacketGroup {
    fn new() -> PacketGroup {
        PacketGroup {
            by_id: DashMap::new(),
            ids_by_type: DashMap::new(),
        }
    }
}

/// Registry of packet types and the encoder framing them.
pub struct PacketFactory {
    groups: DashMap<String, Arc<PacketGroup>>,
    by_type: DashMap<TypeId, PacketInfo>,
    provider: Arc<SerializerProvider>,
    encoder: Box<dyn PacketEncoder>,
}

impl PacketFactory {
    pub fn new(encoder: impl PacketEncoder, provider: Arc<SerializerProvider>) -> PacketFactory {
        PacketFactory {
            groups: DashMap::new(),
            by_type: DashMap::new(),
            provider,
            encoder: Box::new(encoder),
        }
    }

    pub fn provider(&self) -> &SerializerProvider {
        &self.provider
    }

    /// Registers a packet type under its declared group and identifier.
    ///
    /// Skipped declarations register nothing. Registering the same type
    /// again is a no-op. A second type claiming an already-used
    /// identifier, or one type claiming a second group, is a
    /// configuration error.
    pub fn add_packet<T: Packet>(&self) -> Result<(), Error> {
        let id = match T::ID {
            PacketId::Skip => return Ok(()),
            PacketId::Id(id) => id,
            PacketId::Dynamic => T::dynamic_id(T::GROUP)
                .ok_or_else(|| Error::no_dynamic_id(type_name::<T>(), T::GROUP))?,
        };
        self.add_packet_with::<T>(T::GROUP, id, T::reader(), T::writer())
    }

    /// Registers a reader/writer pair for `T` without going through its
    /// declaration.
    pub fn add_packet_with<T: 'static>(
        &self,
        group: &str,
        id: u32,
        reader: PacketReader,
        writer: PacketWriter,
    ) -> Result<(), Error> {
        ensure!(
            id <= i32::MAX as u32,
            Error::invalid_packet_id(type_name::<T>())
        );
        let type_id = TypeId::of::<T>();
        if let Some(info) = self.by_type.get(&type_id) {
            ensure!(
                info.group == group,
                Error::Configuration(format!(
                    "packet {} is already registered in group {}",
                    type_name::<T>(),
                    info.group
                ))
            );
        }
        let group_entry = self
            .groups
            .entry(group.to_string())
            .or_insert_with(|| Arc::new(PacketGroup::new()))
            .clone();
        if group_entry.ids_by_type.contains_key(&type_id) {
            return Ok(());
        }
        match group_entry.by_id.entry(id) {
            Entry::Occupied(occupied) => {
                if occupied.get().type_id != type_id {
                    return Err(Error::id_collision(id, occupied.get().type_name));
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::new(GroupEntry {
                    type_id,
                    type_name: type_name::<T>(),
                    reader,
                    writer,
                }));
            }
        }
        group_entry.ids_by_type.insert(type_id, id);
        self.by_type.insert(
            type_id,
            PacketInfo {
                group: group.to_string(),
                id,
                type_name: type_name::<T>(),
            },
        );
        Ok(())
    }

    /// Decodes one framed packet from `visitor`.
    pub fn create(
        &self,
        group: &str,
        visitor: &mut dyn DataVisitor,
    ) -> Result<Box<dyn Any>, Error> {
        let encoded = self.encoder.decode(visitor, &self.provider, group)?;
        let id = encoded.id();
        let mut payload = VecVisitor::from_vec(encoded.into_data());
        self.create_with_id(id, group, &mut payload)
    }

    /// Builds the packet registered under `id` from an unframed payload.
    pub fn create_with_id(
        &self,
        id: u32,
        group: &str,
        visitor: &mut dyn DataVisitor,
    ) -> Result<Box<dyn Any>, Error> {
        let entry = self
            .groups
            .get(group)
            .ok_or_else(|| Error::unknown_group(group))?
            .by_id
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::unknown_packet(id, group))?;
        let context = SerializerContext::untyped(&self.provider);
        entry.reader.read(&context, visitor)
    }

    /// Decodes one framed packet and downcasts it to `T`.
    pub fn create_as<T: 'static>(
        &self,
        group: &str,
        visitor: &mut dyn DataVisitor,
    ) -> Result<T, Error> {
        let packet = self.create(group, visitor)?;
        packet.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            Error::Resolution(format!("decoded packet is not a {}", type_name::<T>()))
        })
    }

    /// Frames and writes a registered packet.
    pub fn write<T: 'static>(&self, packet: &T, visitor: &mut dyn DataVisitor) -> Result<(), Error> {
        let info = self
            .by_type
            .get(&TypeId::of::<T>())
            .map(|info| info.clone())
            .ok_or_else(|| Error::unregistered_packet(type_name::<T>()))?;
        self.write_in(&info.group, info.id, packet, visitor)
    }

    /// Frames and writes a packet, insisting it belongs to `group`.
    pub fn write_as<T: 'static>(
        &self,
        group: &str,
        packet: &T,
        visitor: &mut dyn DataVisitor,
    ) -> Result<(), Error> {
        let id = self
            .groups
            .get(group)
            .ok_or_else(|| Error::unknown_group(group))?
            .ids_by_type
            .get(&TypeId::of::<T>())
            .map(|id| *id)
            .ok_or_else(|| Error::unregistered_packet(type_name::<T>()))?;
        self.write_in(group, id, packet, visitor)
    }

    fn write_in<T: 'static>(
        &self,
        group: &str,
        id: u32,
        packet: &T,
        visitor: &mut dyn DataVisitor,
    ) -> Result<(), Error> {
        let entry = self
            .groups
            .get(group)
            .ok_or_else(|| Error::unknown_group(group))?
            .by_id
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::unknown_packet(id, group))?;
        let mut scratch = VecVisitor::new();
        let context = SerializerContext::untyped(&self.provider);
        entry.writer.write(&context, &mut scratch, packet)?;
        self.encoder.encode(
            visitor,
            &self.provider,
            group,
            Encoded::new(id, scratch.into_vec()),
        )
    }

    /// Removes the registration at `id` in `group`, reporting whether
    /// one existed.
    pub fn remove_packet(&self, group: &str, id: u32) -> bool {
        let Some(group_entry) = self.groups.get(group).map(|entry| entry.clone()) else {
            return false;
        };
        let Some((_, removed)) = group_entry.by_id.remove(&id) else {
            return false;
        };
        group_entry.ids_by_type.remove(&removed.type_id);
        self.by_type.remove(&removed.type_id);
        true
    }

    /// Removes the registration of packet type `T`, wherever it lives.
    pub fn remove_packet_type<T: 'static>(&self) -> bool {
        let Some((_, info)) = self.by_type.remove(&TypeId::of::<T>()) else {
            return false;
        };
        if let Some(group_entry) = self.groups.get(&info.group).map(|entry| entry.clone()) {
            group_entry.by_id.remove(&info.id);
            group_entry.ids_by_type.remove(&TypeId::of::<T>());
        }
        true
    }

    /// Registration details for packet type `T`, when registered.
    pub fn lookup<T: 'static>(&self) -> Option<PacketInfo> {
        self.by_type.get(&TypeId::of::<T>()).map(|info| info.clone())
    }

    pub fn packet_id<T: 'static>(&self) -> Option<u32> {
        self.lookup::<T>().map(|info| info.id)
    }

    pub fn packet_group<T: 'static>(&self) -> Option<String> {
        self.lookup::<T>().map(|info| info.group)
    }

    /// Every registration, in no particular order.
    pub fn registered_packets(&self) -> Vec<PacketInfo> {
        self.by_type
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Registers every packet listed by `catalogue`.
    pub fn add_packets(&self, catalogue: &dyn Catalogue) -> Result<(), Error> {
        for registration in catalogue.packets() {
            (registration.register)(self)?;
        }
        Ok(())
    }

    /// Registers every codec listed by `catalogue` with the provider.
    pub fn add_serializers(&self, catalogue: &dyn Catalogue) -> Result<(), Error> {
        self.provider.add_serializers(catalogue)
    }

    /// Installs every rule listed by `catalogue` on the provider.
    pub fn add_serialization_rules(&self, catalogue: &dyn Catalogue) {
        self.provider.add_serialization_rules(catalogue)
    }
}
