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

//! Ordinal codec for fieldless enums.

use std::any::type_name;
use std::marker::PhantomData;

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::resolver::context::SerializerContext;
use crate::serializer::Serializer;

/// A fieldless enum with a stable variant numbering.
///
/// Usually implemented through the derive macro, which numbers variants
/// in declaration order starting at zero.
pub trait Enumerated: Sized + Send + Sync + 'static {
    fn ordinal(&self) -> i32;

    fn from_ordinal(ordinal: i32) -> Option<Self>;
}

/// Serializes an [`Enumerated`] type by its ordinal.
///
/// The ordinal travels through whatever codec the provider resolves for
/// `i32`, so replacing the integer codec changes the wire form of every
/// enum with it.
pub struct EnumCodec<E> {
    marker: PhantomData<fn(E)>,
}

impl<E> EnumCodec<E> {
    pub fn new() -> EnumCodec<E> {
        EnumCodec {
            marker: PhantomData,
        }
    }
}

impl<E> Default for EnumCodec<E> {
    fn default() -> EnumCodec<E> {
        EnumCodec::new()
    }
}

impl<E> Serializer<E> for EnumCodec<E>
where
    E: Enumerated,
{
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &E,
    ) -> Result<(), Error> {
        let codec = context.provider().get_for::<i32>()?;
        codec.serialize(context, visitor, &value.ordinal())
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<E, Error> {
        let codec = context.provider().get_for::<i32>()?;
        let ordinal = codec.deserialize(context, visitor)?;
        E::from_ordinal(ordinal).ok_or_else(|| {
            Error::invalid_data(format!(
                "no variant with ordinal {ordinal} in {}",
                type_name::<E>()
            ))
        })
    }
}
