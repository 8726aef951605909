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

//! Generic codec for key-value containers.

use std::marker::PhantomData;

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::metadata::check_length;
use crate::resolver::context::SerializerContext;
use crate::resolver::descriptor::Described;
use crate::serializer::{read_size, write_size, Serializer};

/// Serializes any key-value container as a length prefix followed by
/// alternating keys and values in iteration order.
pub struct MapCodec<M, K, V> {
    marker: PhantomData<fn(M, K, V)>,
}

impl<M, K, V> MapCodec<M, K, V> {
    pub fn new() -> MapCodec<M, K, V> {
        MapCodec {
            marker: PhantomData,
        }
    }
}

impl<M, K, V> Default for MapCodec<M, K, V> {
    fn default() -> MapCodec<M, K, V> {
        MapCodec::new()
    }
}

impl<M, K, V> Serializer<M> for MapCodec<M, K, V>
where
    M: FromIterator<(K, V)> + Send + Sync + 'static,
    K: Described + Send + Sync,
    V: Described + Send + Sync,
    for<'a> &'a M: IntoIterator<Item = (&'a K, &'a V)>,
    for<'a> <&'a M as IntoIterator>::IntoIter: ExactSizeIterator,
{
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &M,
    ) -> Result<(), Error> {
        let entries = value.into_iter();
        let size = entries.len();
        check_length(context.metadata(), size)?;
        write_size(context, visitor, size)?;
        let key_context = context.parameter(0)?;
        let value_context = context.parameter(1)?;
        let key_codec = key_context.serialize_with::<K>()?;
        let value_codec = value_context.serialize_with::<V>()?;
        for (key, entry) in entries {
            key_codec.serialize(&key_context, visitor, key)?;
            value_codec.serialize(&value_context, visitor, entry)?;
        }
        Ok(())
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<M, Error> {
        let size = read_size(context, visitor)?;
        check_length(context.metadata(), size)?;
        let key_context = context.parameter(0)?;
        let value_context = context.parameter(1)?;
        let key_codec = key_context.serialize_with::<K>()?;
        let value_codec = value_context.serialize_with::<V>()?;
        let mut entries = Vec::with_capacity(size.min(1024));
        for _ in 0..size {
            let key = key_codec.deserialize(&key_context, visitor)?;
            let entry = value_codec.deserialize(&value_context, visitor)?;
            entries.push((key, entry));
        }
        Ok(entries.into_iter().collect())
    }
}
