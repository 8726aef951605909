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

//! UTF-8 string codec.

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::metadata::check_length;
use crate::resolver::context::SerializerContext;
use crate::serializer::{read_size, write_size, Serializer};

/// Serializes `String` as a length prefix followed by the UTF-8 bytes.
///
/// Length constraints apply to the encoded byte length. On the read path
/// they are checked against the prefix before any payload byte is
/// consumed, so an oversized declaration fails without allocating.
#[derive(Default)]
pub struct StringCodec;

impl Serializer<String> for StringCodec {
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &String,
    ) -> Result<(), Error> {
        let bytes = value.as_bytes();
        check_length(context.metadata(), bytes.len())?;
        write_size(context, visitor, bytes.len())?;
        visitor.write_bytes(bytes)
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<String, Error> {
        let len = read_size(context, visitor)?;
        check_length(context.metadata(), len)?;
        let bytes = visitor.read_bytes(len)?;
        String::from_utf8(bytes)
            .map_err(|e| Error::invalid_data(format!("invalid UTF-8 string: {e}")))
    }
}
