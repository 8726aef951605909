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

//! Variable-length integer encoding.
//!
//! Values are written in groups of seven bits, least significant group
//! first, with the high bit of each byte flagging a continuation. Small
//! magnitudes take one byte; an `i32` never takes more than five and an
//! `i64` never more than ten. Negative values always occupy the maximum,
//! since the encoding carries the raw two's complement bits without
//! zigzag folding.
//!
//! Decoding accepts overlong encodings of small values but rejects any
//! sequence that continues past the maximum width.

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::metadata::check_range;
use crate::resolver::context::SerializerContext;
use crate::serializer::Serializer;

const SEGMENT_BITS: u32 = 0x7F;
const CONTINUE_BIT: u32 = 0x80;

const LONG_SEGMENT_BITS: u64 = 0x7F;
const LONG_CONTINUE_BIT: u64 = 0x80;

/// Writes an `i32` in the variable-length encoding.
pub fn write_varint(visitor: &mut dyn DataVisitor, value: i32) -> Result<(), Error> {
    let mut value = value as u32;
    loop {
        if value & !SEGMENT_BITS == 0 {
            return visitor.write_u8(value as u8);
        }
        visitor.write_u8((value & SEGMENT_BITS | CONTINUE_BIT) as u8)?;
        value >>= 7;
    }
}

/// Reads an `i32` written by [`write_varint`].
pub fn read_varint(visitor: &mut dyn DataVisitor) -> Result<i32, Error> {
    let mut value: u32 = 0;
    let mut position = 0;
    loop {
        let byte = visitor.read_u8()? as u32;
        value |= (byte & SEGMENT_BITS) << position;
        if byte & CONTINUE_BIT == 0 {
            return Ok(value as i32);
        }
        position += 7;
        if position >= 32 {
            return Err(Error::invalid_data("VarInt is too big"));
        }
    }
}

/// Writes an `i64` in the variable-length encoding.
pub fn write_varlong(visitor: &mut dyn DataVisitor, value: i64) -> Result<(), Error> {
    let mut value = value as u64;
    loop {
        if value & !LONG_SEGMENT_BITS == 0 {
            return visitor.write_u8(value as u8);
        }
        visitor.write_u8((value & LONG_SEGMENT_BITS | LONG_CONTINUE_BIT) as u8)?;
        value >>= 7;
    }
}

/// Reads an `i64` written by [`write_varlong`].
pub fn read_varlong(visitor: &mut dyn DataVisitor) -> Result<i64, Error> {
    let mut value: u64 = 0;
    let mut position = 0;
    loop {
        let byte = visitor.read_u8()? as u64;
        value |= (byte & LONG_SEGMENT_BITS) << position;
        if byte & LONG_CONTINUE_BIT == 0 {
            return Ok(value as i64);
        }
        position += 7;
        if position >= 64 {
            return Err(Error::invalid_data("VarLong is too big"));
        }
    }
}

/// Serializes `i32` in the variable-length encoding.
#[derive(Default)]
pub struct VarIntCodec;

impl Serializer<i32> for VarIntCodec {
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &i32,
    ) -> Result<(), Error> {
        check_range(context.metadata(), *value as i128)?;
        write_varint(visitor, *value)
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<i32, Error> {
        let value = read_varint(visitor)?;
        check_range(context.metadata(), value as i128)?;
        Ok(value)
    }
}

/// Serializes `i64` in the variable-length encoding.
#[derive(Default)]
pub struct VarLongCodec;

impl Serializer<i64> for VarLongCodec {
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &i64,
    ) -> Result<(), Error> {
        check_range(context.metadata(), *value as i128)?;
        write_varlong(visitor, *value)
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<i64, Error> {
        let value = read_varlong(visitor)?;
        check_range(context.metadata(), value as i128)?;
        Ok(value)
    }
}
