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

//! UUID codec.

use uuid::Uuid;

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::resolver::context::SerializerContext;
use crate::serializer::Serializer;

/// Serializes [`Uuid`] as its sixteen bytes, most significant half first.
#[derive(Default)]
pub struct UuidCodec;

impl Serializer<Uuid> for UuidCodec {
    fn serialize(
        &self,
        _context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &Uuid,
    ) -> Result<(), Error> {
        let (high, low) = value.as_u64_pair();
        visitor.write_u64(high)?;
        visitor.write_u64(low)
    }

    fn deserialize(
        &self,
        _context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<Uuid, Error> {
        let high = visitor.read_u64()?;
        let low = visitor.read_u64()?;
        Ok(Uuid::from_u64_pair(high, low))
    }
}
