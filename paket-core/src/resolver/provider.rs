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

//! Codec registration and lookup.
//!
//! The [`SerializerProvider`] is the shared registry every serialization
//! operation consults. Lookups resolve in a fixed order: an exact codec
//! override on the field, the alias, the codec registered for the value
//! type, and finally the resolution rules in the order they were added.
//!
//! All maps are concurrent; registration from multiple threads is safe and
//! the first registration wins.

use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::catalogue::Catalogue;
use crate::ensure;
use crate::error::Error;
use crate::resolver::descriptor::{Described, Kind, TypeDescriptor};
use crate::resolver::rule::SerializationRule;
use crate::serializer::Serializer;

/// A type-erased, cheaply cloneable handle to a codec instance.
#[derive(Clone)]
pub struct CodecHandle {
    codec_type: TypeId,
    codec_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl CodecHandle {
    /// Erases a codec for values of type `T`.
    pub fn of<T, C>(codec: C) -> CodecHandle
    where
        T: 'static,
        C: Serializer<T>,
    {
        CodecHandle {
            codec_type: TypeId::of::<C>(),
            codec_name: type_name::<C>(),
            inner: Arc::new(Arc::new(codec) as Arc<dyn Serializer<T>>),
        }
    }

    /// The concrete type of the codec behind this handle.
    pub fn codec_type(&self) -> TypeId {
        self.codec_type
    }

    pub fn codec_name(&self) -> &'static str {
        self.codec_name
    }

    /// Recovers the typed codec. Fails when this handle serializes a
    /// different value type than `T`.
    pub fn typed<T: 'static>(&self) -> Result<Arc<dyn Serializer<T>>, Error> {
        self.inner
            .downcast_ref::<Arc<dyn Serializer<T>>>()
            .cloned()
            .ok_or_else(|| Error::type_mismatch(type_name::<T>(), self.codec_name))
    }
}

/// Identifies a codec type and knows how to build its default instance.
///
/// Keys are plain data, so field metadata can name a codec without holding
/// one; the provider constructs and caches the instance on first use.
#[derive(Clone, Copy, Debug)]
pub struct CodecKey {
    id: TypeId,
    name: &'static str,
    construct: fn() -> CodecHandle,
}

impl CodecKey {
    /// A key for codec type `C` serializing values of type `T`.
    pub fn of<C, T>() -> CodecKey
    where
        T: 'static,
        C: Serializer<T> + Default,
    {
        CodecKey {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
            construct: || CodecHandle::of::<T, C>(C::default()),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

struct RuleEntry {
    rule_type: TypeId,
    rule_name: &'static str,
    rule: Arc<dyn SerializationRule>,
}

/// Thread-safe registry mapping value types to codecs.
#[derive(Default)]
pub struct SerializerProvider {
    /// Value type to the codec claiming it.
    supported: DashMap<TypeId, CodecHandle>,
    /// Codec type to the instance registered under it.
    by_identity: DashMap<TypeId, CodecHandle>,
    /// Codec type to a lazily built default instance.
    cached: DashMap<TypeId, CodecHandle>,
    /// Fallback rules, consulted in insertion order.
    rules: RwLock<Vec<RuleEntry>>,
}

impl SerializerProvider {
    /// An empty provider with no codecs and no rules.
    pub fn new() -> SerializerProvider {
        SerializerProvider::default()
    }

    /// A provider preloaded with the built-in codecs and resolution rules.
    pub fn with_defaults() -> Result<SerializerProvider, Error> {
        let provider = SerializerProvider::new();
        provider.add_serializers(&crate::catalogue::DefaultSerializers)?;
        provider.add_serialization_rules(&crate::catalogue::DefaultRules);
        Ok(provider)
    }

    /// Registers `codec` as the serializer for values of type `T`.
    ///
    /// Registering the same codec type again is a no-op that keeps the
    /// first instance. Claiming a value type already owned by a different
    /// codec is a configuration error.
    pub fn register<T, C>(&self, codec: C) -> Result<(), Error>
    where
        T: 'static,
        C: Serializer<T>,
    {
        let codec_id = TypeId::of::<C>();
        let handle = match self.by_identity.entry(codec_id) {
            Entry::Occupied(occupied) => occupied.get().clone(),
            Entry::Vacant(vacant) => {
                self.cached.remove(&codec_id);
                vacant.insert(CodecHandle::of::<T, C>(codec)).clone()
            }
        };
        match self.supported.entry(TypeId::of::<T>()) {
            Entry::Occupied(occupied) => {
                ensure!(
                    occupied.get().codec_type() == handle.codec_type(),
                    Error::duplicate_codec(type_name::<T>())
                );
            }
            Entry::Vacant(vacant) => {
                vacant.insert(handle);
            }
        }
        Ok(())
    }

    /// Registers `codec` for identity lookups only, without claiming its
    /// value type. Fields naming the codec explicitly will use this
    /// instance instead of a default-constructed one.
    pub fn register_of<T, C>(&self, codec: C)
    where
        T: 'static,
        C: Serializer<T>,
    {
        let codec_id = TypeId::of::<C>();
        self.cached.remove(&codec_id);
        self.by_identity
            .entry(codec_id)
            .or_insert_with(|| CodecHandle::of::<T, C>(codec));
    }

    /// The codec instance for `key`: a registered instance when one
    /// exists, otherwise a default-constructed one built once and cached.
    pub fn get_of_key(&self, key: CodecKey) -> CodecHandle {
        if let Some(handle) = self.by_identity.get(&key.id) {
            return handle.clone();
        }
        self.cached
            .entry(key.id)
            .or_insert_with(|| (key.construct)())
            .clone()
    }

    /// The typed codec instance of type `C` for values of type `T`.
    pub fn get_of<C, T>(&self) -> Result<Arc<dyn Serializer<T>>, Error>
    where
        T: 'static,
        C: Serializer<T> + Default,
    {
        self.get_of_key(CodecKey::of::<C, T>()).typed::<T>()
    }

    /// The codec serializing values of type `T`, resolved through the
    /// type's own descriptor.
    pub fn get_for<T: Described>(&self) -> Result<Arc<dyn Serializer<T>>, Error> {
        self.resolve(&T::describe())?.typed::<T>()
    }

    /// Resolves the codec for a described type.
    pub fn resolve(&self, descriptor: &TypeDescriptor) -> Result<CodecHandle, Error> {
        if let Kind::Optional { wrap } = descriptor.kind() {
            let Some(inner) = descriptor.params().first() else {
                return Err(Error::not_generic(descriptor.type_name()));
            };
            // The optional is transparent to metadata: constraints on the
            // field apply to the wrapped value.
            let inner = inner.with_metadata(descriptor.metadata().clone());
            let handle = self.resolve(&inner)?;
            return wrap(handle, inner);
        }
        let metadata = descriptor.metadata();
        if let Some(key) = metadata.codec {
            return Ok(self.get_of_key(key));
        }
        if let Some(key) = metadata.alias {
            return Ok(self.get_of_key(key));
        }
        if let Some(handle) = self.supported.get(&descriptor.type_id()) {
            return Ok(handle.clone());
        }
        let rules = self.rules.read();
        for entry in rules.iter() {
            if let Some(handle) = entry.rule.codec_for(descriptor, self) {
                return Ok(handle);
            }
        }
        Err(Error::no_codec(descriptor.type_name()))
    }

    /// Appends a fallback resolution rule. Adding a rule type twice keeps
    /// the first instance.
    pub fn add_rule<R>(&self, rule: R)
    where
        R: SerializationRule,
    {
        let mut rules = self.rules.write();
        if rules.iter().any(|entry| entry.rule_type == TypeId::of::<R>()) {
            return;
        }
        rules.push(RuleEntry {
            rule_type: TypeId::of::<R>(),
            rule_name: type_name::<R>(),
            rule: Arc::new(rule),
        });
    }

    /// Removes the rule of type `R`, reporting whether one was present.
    pub fn remove_rule<R: SerializationRule>(&self) -> bool {
        let mut rules = self.rules.write();
        let before = rules.len();
        rules.retain(|entry| entry.rule_type != TypeId::of::<R>());
        rules.len() != before
    }

    /// Removes the codec of type `C` and every value type it claimed.
    pub fn remove_serializer<C: 'static>(&self) -> bool {
        let codec_id = TypeId::of::<C>();
        self.cached.remove(&codec_id);
        let had_identity = self.by_identity.remove(&codec_id).is_some();
        let before = self.supported.len();
        self.supported
            .retain(|_, handle| handle.codec_type() != codec_id);
        had_identity || self.supported.len() != before
    }

    /// Names of the registered codec types.
    pub fn registered_serializers(&self) -> Vec<&'static str> {
        self.by_identity
            .iter()
            .map(|entry| entry.value().codec_name())
            .collect()
    }

    /// Names of the installed rule types, in resolution order.
    pub fn registered_rules(&self) -> Vec<&'static str> {
        self.rules.read().iter().map(|entry| entry.rule_name).collect()
    }

    /// Registers every codec listed by `catalogue`.
    pub fn add_serializers(&self, catalogue: &dyn Catalogue) -> Result<(), Error> {
        for registration in catalogue.serializers() {
            (registration.register)(self)?;
        }
        Ok(())
    }

    /// Installs every rule listed by `catalogue`.
    pub fn add_serialization_rules(&self, catalogue: &dyn Catalogue) {
        for registration in catalogue.rules() {
            (registration.register)(self);
        }
    }
}
