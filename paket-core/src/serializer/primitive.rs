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

//! Codecs for fixed-width scalar types.
//!
//! Integral codecs enforce the range constraint of the current field on
//! both paths, so an out-of-contract value is rejected whether it comes
//! from local code or from the wire.

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::metadata::{check_float_range, check_range};
use crate::resolver::context::SerializerContext;
use crate::serializer::Serializer;

/// Serializes `bool` as one byte.
#[derive(Default)]
pub struct BoolCodec;

impl Serializer<bool> for BoolCodec {
    fn serialize(
        &self,
        _context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &bool,
    ) -> Result<(), Error> {
        visitor.write_bool(*value)
    }

    fn deserialize(
        &self,
        _context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<bool, Error> {
        visitor.read_bool()
    }
}

macro_rules! int_codec {
    ($(#[$doc:meta])* $codec:ident, $ty:ty, $write:ident, $read:ident) => {
        $(#[$doc])*
        #[derive(Default)]
        pub struct $codec;

        impl Serializer<$ty> for $codec {
            fn serialize(
                &self,
                context: &SerializerContext<'_>,
                visitor: &mut dyn DataVisitor,
                value: &$ty,
            ) -> Result<(), Error> {
                check_range(context.metadata(), *value as i128)?;
                visitor.$write(*value)
            }

            fn deserialize(
                &self,
                context: &SerializerContext<'_>,
                visitor: &mut dyn DataVisitor,
            ) -> Result<$ty, Error> {
                let value = visitor.$read()?;
                check_range(context.metadata(), value as i128)?;
                Ok(value)
            }
        }
    };
}

int_codec!(
    /// Serializes `u8` as one byte.
    U8Codec, u8, write_u8, read_u8
);
int_codec!(
    /// Serializes `i8` as one byte.
    I8Codec, i8, write_i8, read_i8
);
int_codec!(
    /// Serializes `i16` as two bytes, network order.
    I16Codec, i16, write_i16, read_i16
);
int_codec!(
    /// Serializes `u16` as two bytes, network order.
    U16Codec, u16, write_u16, read_u16
);
int_codec!(
    /// Serializes `i32` as four bytes, network order.
    I32Codec, i32, write_i32, read_i32
);
int_codec!(
    /// Serializes `u32` as four bytes, network order.
    U32Codec, u32, write_u32, read_u32
);
int_codec!(
    /// Serializes `i64` as eight bytes, network order.
    I64Codec, i64, write_i64, read_i64
);
int_codec!(
    /// Serializes `u64` as eight bytes, network order.
    U64Codec, u64, write_u64, read_u64
);

macro_rules! float_codec {
    ($(#[$doc:meta])* $codec:ident, $ty:ty, $write:ident, $read:ident) => {
        $(#[$doc])*
        #[derive(Default)]
        pub struct $codec;

        impl Serializer<$ty> for $codec {
            fn serialize(
                &self,
                context: &SerializerContext<'_>,
                visitor: &mut dyn DataVisitor,
                value: &$ty,
            ) -> Result<(), Error> {
                check_float_range(context.metadata(), *value as f64)?;
                visitor.$write(*value)
            }

            fn deserialize(
                &self,
                context: &SerializerContext<'_>,
                visitor: &mut dyn DataVisitor,
            ) -> Result<$ty, Error> {
                let value = visitor.$read()?;
                check_float_range(context.metadata(), value as f64)?;
                Ok(value)
            }
        }
    };
}

float_codec!(
    /// Serializes `f32` as its IEEE 754 bits, network order.
    F32Codec, f32, write_f32, read_f32
);
float_codec!(
    /// Serializes `f64` as its IEEE 754 bits, network order.
    F64Codec, f64, write_f64, read_f64
);

/// Serializes `char` as its Unicode scalar value in four bytes.
#[derive(Default)]
pub struct CharCodec;

impl Serializer<char> for CharCodec {
    fn serialize(
        &self,
        _context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &char,
    ) -> Result<(), Error> {
        visitor.write_u32(*value as u32)
    }

    fn deserialize(
        &self,
        _context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<char, Error> {
        let scalar = visitor.read_u32()?;
        char::from_u32(scalar)
            .ok_or_else(|| Error::invalid_data(format!("invalid character scalar {scalar}")))
    }
}
