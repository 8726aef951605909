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

//! Codecs for fixed-size arrays and raw byte vectors.

use std::marker::PhantomData;

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::metadata::check_length;
use crate::resolver::context::SerializerContext;
use crate::resolver::descriptor::Described;
use crate::serializer::{read_size, write_size, Serializer};

/// Serializes `[T; N]` as the `N` elements back to back.
///
/// The length lives in the type, so nothing is written for it.
pub struct ArrayCodec<T, const N: usize> {
    marker: PhantomData<fn(T)>,
}

impl<T, const N: usize> ArrayCodec<T, N> {
    pub fn new() -> ArrayCodec<T, N> {
        ArrayCodec {
            marker: PhantomData,
        }
    }
}

impl<T, const N: usize> Default for ArrayCodec<T, N> {
    fn default() -> ArrayCodec<T, N> {
        ArrayCodec::new()
    }
}

impl<T, const N: usize> Serializer<[T; N]> for ArrayCodec<T, N>
where
    T: Described + Send + Sync,
{
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &[T; N],
    ) -> Result<(), Error> {
        let element_context = context.parameter(0)?;
        let codec = element_context.serialize_with::<T>()?;
        for element in value {
            codec.serialize(&element_context, visitor, element)?;
        }
        Ok(())
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<[T; N], Error> {
        let element_context = context.parameter(0)?;
        let codec = element_context.serialize_with::<T>()?;
        let mut elements = Vec::with_capacity(N);
        for _ in 0..N {
            elements.push(codec.deserialize(&element_context, visitor)?);
        }
        elements
            .try_into()
            .map_err(|_| Error::invalid_data(format!("expected {N} array elements")))
    }
}

/// Serializes `Vec<u8>` as a length prefix followed by the raw bytes.
///
/// Registered directly for byte vectors so they bypass the element-wise
/// collection codec. A non-prefixed fixed-length field writes exactly its
/// declared number of bytes and nothing else.
#[derive(Default)]
pub struct ByteArrayCodec;

impl Serializer<Vec<u8>> for ByteArrayCodec {
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &Vec<u8>,
    ) -> Result<(), Error> {
        check_length(context.metadata(), value.len())?;
        write_size(context, visitor, value.len())?;
        visitor.write_bytes(value)
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<Vec<u8>, Error> {
        let len = read_size(context, visitor)?;
        check_length(context.metadata(), len)?;
        visitor.read_bytes(len)
    }
}
