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

//! Serialization state threaded through codecs.

use std::sync::Arc;

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::metadata::Metadata;
use crate::resolver::descriptor::{Described, TypeDescriptor};
use crate::resolver::provider::SerializerProvider;
use crate::serializer::Serializer;

/// What is currently being serialized: the descriptor of the value under
/// the cursor and the provider to resolve nested codecs with.
///
/// Contexts are immutable. Descending into a field or a type parameter
/// derives a fresh child context, so a codec can never corrupt the state
/// of its caller.
#[derive(Clone)]
pub struct SerializerContext<'a> {
    descriptor: Option<TypeDescriptor>,
    provider: &'a SerializerProvider,
}

impl<'a> SerializerContext<'a> {
    pub fn new(
        descriptor: TypeDescriptor,
        provider: &'a SerializerProvider,
    ) -> SerializerContext<'a> {
        SerializerContext {
            descriptor: Some(descriptor),
            provider,
        }
    }

    /// A context with no current type, used at packet boundaries.
    pub fn untyped(provider: &'a SerializerProvider) -> SerializerContext<'a> {
        SerializerContext {
            descriptor: None,
            provider,
        }
    }

    pub fn provider(&self) -> &'a SerializerProvider {
        self.provider
    }

    pub fn descriptor(&self) -> Option<&TypeDescriptor> {
        self.descriptor.as_ref()
    }

    /// Metadata of the current type, when one is set.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.descriptor.as_ref().map(|d| d.metadata())
    }

    /// A child context for the given descriptor.
    pub fn with_descriptor(&self, descriptor: TypeDescriptor) -> SerializerContext<'a> {
        SerializerContext {
            descriptor: Some(descriptor),
            provider: self.provider,
        }
    }

    /// A child context for the `index`-th type parameter of the current
    /// type. An element codec override on the current field carries over
    /// to the first parameter.
    pub fn parameter(&self, index: usize) -> Result<SerializerContext<'a>, Error> {
        let Some(descriptor) = self.descriptor.as_ref() else {
            return Ok(SerializerContext::untyped(self.provider));
        };
        let params = descriptor.params();
        if params.is_empty() {
            return Err(Error::not_generic(descriptor.type_name()));
        }
        let Some(child) = params.get(index) else {
            return Err(Error::no_parameter(descriptor.type_name(), index));
        };
        let mut child = child.clone();
        if index == 0 {
            if let Some(key) = descriptor.metadata().element_codec {
                child = child.with_metadata(Metadata {
                    codec: Some(key),
                    ..Metadata::default()
                });
            }
        }
        Ok(self.with_descriptor(child))
    }

    /// Resolves the codec for values of type `T` in this context. Falls
    /// back to the type's own descriptor when the context is untyped.
    pub fn serialize_with<T: Described>(&self) -> Result<Arc<dyn Serializer<T>>, Error> {
        let handle = match self.descriptor.as_ref() {
            Some(descriptor) => self.provider.resolve(descriptor)?,
            None => self.provider.resolve(&T::describe())?,
        };
        handle.typed::<T>()
    }
}

/// Serializes one value with the codec resolution rules of `context`.
///
/// Convenience for hand-written packet logic.
pub fn write_value<T: Described>(
    context: &SerializerContext<'_>,
    visitor: &mut dyn DataVisitor,
    value: &T,
) -> Result<(), Error> {
    let child = context.with_descriptor(T::describe());
    let codec = child.serialize_with::<T>()?;
    codec.serialize(&child, visitor, value)
}

/// Deserializes one value with the codec resolution rules of `context`.
pub fn read_value<T: Described>(
    context: &SerializerContext<'_>,
    visitor: &mut dyn DataVisitor,
) -> Result<T, Error> {
    let child = context.with_descriptor(T::describe());
    let codec = child.serialize_with::<T>()?;
    codec.deserialize(&child, visitor)
}
