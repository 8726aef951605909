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

//! Codec implementations for the built-in types.

pub mod array;
pub mod bits;
pub mod blob;
pub mod collection;
pub mod enum_;
pub mod map;
pub mod number;
pub mod option;
pub mod primitive;
pub mod string;
pub mod time;
pub mod uuid;
pub mod varint;

use std::sync::Arc;

use crate::buffer::DataVisitor;
use crate::ensure;
use crate::error::Error;
use crate::resolver::context::SerializerContext;
use crate::resolver::provider::CodecKey;
use crate::serializer::varint::VarIntCodec;

/// Encodes and decodes values of type `T`.
///
/// A codec holds no per-operation state. Everything it needs to know about
/// the value under the cursor, field constraints and nested type
/// parameters included, arrives through the context, so one instance can
/// serve any number of concurrent serializations.
pub trait Serializer<T>: Send + Sync + 'static {
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &T,
    ) -> Result<(), Error>;

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<T, Error>;
}

/// The codec encoding length prefixes for the current field.
///
/// Defaults to the variable-length integer codec; a `length_with` override
/// on the field picks a different one.
pub fn length_codec(context: &SerializerContext<'_>) -> Result<Arc<dyn Serializer<i32>>, Error> {
    let key = context
        .metadata()
        .and_then(|m| m.length_with)
        .unwrap_or_else(|| CodecKey::of::<VarIntCodec, i32>());
    context.provider().get_of_key(key).typed::<i32>()
}

/// Writes the length prefix for a value of `size` elements.
///
/// Non-prefixed fields write nothing; their declared fixed length must
/// match the actual one. Codecs for length-delimited types call this so
/// the `no_prefix`, `fixed` and `length_with` constraints behave the same
/// everywhere.
pub fn write_size(
    context: &SerializerContext<'_>,
    visitor: &mut dyn DataVisitor,
    size: usize,
) -> Result<(), Error> {
    if context.metadata().is_some_and(|m| m.no_prefix) {
        let Some(fixed) = context.metadata().and_then(|m| m.fixed_length) else {
            return Err(Error::Configuration(
                "a non-prefixed field requires a fixed length".to_string(),
            ));
        };
        ensure!(size == fixed, Error::fixed_length_mismatch(fixed, size));
        return Ok(());
    }
    ensure!(
        size <= i32::MAX as usize,
        Error::unsupported(format!("length {size} exceeds the wire limit"))
    );
    length_codec(context)?.serialize(context, visitor, &(size as i32))
}

/// Reads the length prefix written by [`write_size`].
pub fn read_size(
    context: &SerializerContext<'_>,
    visitor: &mut dyn DataVisitor,
) -> Result<usize, Error> {
    if context.metadata().is_some_and(|m| m.no_prefix) {
        let Some(fixed) = context.metadata().and_then(|m| m.fixed_length) else {
            return Err(Error::Configuration(
                "a non-prefixed field requires a fixed length".to_string(),
            ));
        };
        return Ok(fixed);
    }
    let size = length_codec(context)?.deserialize(context, visitor)?;
    ensure!(
        size >= 0,
        Error::invalid_data(format!("negative length prefix {size}"))
    );
    Ok(size as usize)
}
