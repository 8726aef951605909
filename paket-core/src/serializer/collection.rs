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

//! Generic codec for sequence containers.

use std::marker::PhantomData;

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::metadata::check_length;
use crate::resolver::context::SerializerContext;
use crate::resolver::descriptor::Described;
use crate::serializer::{read_size, write_size, Serializer};

/// Serializes any sequence container as a length prefix followed by the
/// elements in iteration order.
///
/// The element codec is resolved from the container's first type
/// parameter, so overrides on the field flow down to the elements.
pub struct CollectionCodec<C, T> {
    marker: PhantomData<fn(C, T)>,
}

impl<C, T> CollectionCodec<C, T> {
    pub fn new() -> CollectionCodec<C, T> {
        CollectionCodec {
            marker: PhantomData,
        }
    }
}

impl<C, T> Default for CollectionCodec<C, T> {
    fn default() -> CollectionCodec<C, T> {
        CollectionCodec::new()
    }
}

impl<C, T> Serializer<C> for CollectionCodec<C, T>
where
    C: FromIterator<T> + Send + Sync + 'static,
    T: Described + Send + Sync,
    for<'a> &'a C: IntoIterator<Item = &'a T>,
    for<'a> <&'a C as IntoIterator>::IntoIter: ExactSizeIterator,
{
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &C,
    ) -> Result<(), Error> {
        let elements = value.into_iter();
        let size = elements.len();
        check_length(context.metadata(), size)?;
        write_size(context, visitor, size)?;
        let element_context = context.parameter(0)?;
        let codec = element_context.serialize_with::<T>()?;
        for element in elements {
            codec.serialize(&element_context, visitor, element)?;
        }
        Ok(())
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<C, Error> {
        let size = read_size(context, visitor)?;
        check_length(context.metadata(), size)?;
        let element_context = context.parameter(0)?;
        let codec = element_context.serialize_with::<T>()?;
        // The size prefix is untrusted input; cap the preallocation.
        let mut elements = Vec::with_capacity(size.min(1024));
        for _ in 0..size {
            elements.push(codec.deserialize(&element_context, visitor)?);
        }
        Ok(elements.into_iter().collect())
    }
}
