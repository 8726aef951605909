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

//! Presence-prefixed codec for optional values.

use std::sync::Arc;

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::resolver::context::SerializerContext;
use crate::resolver::descriptor::TypeDescriptor;
use crate::serializer::Serializer;

/// Serializes `Option<T>` as one presence byte, followed by the value
/// when present. An absent value writes the byte and nothing else.
///
/// Built by the resolver when it unwraps an optional descriptor: `inner`
/// is the codec resolved for the wrapped value and `descriptor` the
/// descriptor it was resolved against.
pub struct OptionCodec<T> {
    inner: Arc<dyn Serializer<T>>,
    descriptor: TypeDescriptor,
}

impl<T> OptionCodec<T> {
    pub fn new(inner: Arc<dyn Serializer<T>>, descriptor: TypeDescriptor) -> OptionCodec<T> {
        OptionCodec { inner, descriptor }
    }
}

impl<T> Serializer<Option<T>> for OptionCodec<T>
where
    T: Send + Sync + 'static,
{
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &Option<T>,
    ) -> Result<(), Error> {
        match value {
            Some(inner) => {
                visitor.write_bool(true)?;
                let child = context.with_descriptor(self.descriptor.clone());
                self.inner.serialize(&child, visitor, inner)
            }
            None => visitor.write_bool(false),
        }
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<Option<T>, Error> {
        if !visitor.read_bool()? {
            return Ok(None);
        }
        let child = context.with_descriptor(self.descriptor.clone());
        Ok(Some(self.inner.deserialize(&child, visitor)?))
    }
}
