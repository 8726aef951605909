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

//! Timestamp codec.

use chrono::{DateTime, Utc};

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::resolver::context::SerializerContext;
use crate::serializer::Serializer;

/// Serializes a UTC timestamp as milliseconds since the Unix epoch.
///
/// Sub-millisecond precision does not survive a round trip.
#[derive(Default)]
pub struct TimestampCodec;

impl Serializer<DateTime<Utc>> for TimestampCodec {
    fn serialize(
        &self,
        _context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &DateTime<Utc>,
    ) -> Result<(), Error> {
        visitor.write_i64(value.timestamp_millis())
    }

    fn deserialize(
        &self,
        _context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<DateTime<Utc>, Error> {
        let millis = visitor.read_i64()?;
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| Error::invalid_data(format!("timestamp {millis} out of range")))
    }
}
