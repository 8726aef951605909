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

//! Packet framing.
//!
//! An encoder owns the bytes around a payload: how the identifier is
//! written and where the payload ends. The default frame is an
//! identifier followed directly by the payload with no length prefix;
//! decoding therefore hands the entire remainder of the cursor to the
//! packet's reader.

use std::sync::Arc;

use crate::buffer::DataVisitor;
use crate::ensure;
use crate::error::Error;
use crate::resolver::context::SerializerContext;
use crate::resolver::provider::SerializerProvider;
use crate::serializer::varint::{read_varint, write_varint};
use crate::serializer::Serializer;

/// An identified payload, the unit the framing layer moves around.
pub struct Encoded {
    id: u32,
    data: Vec<u8>,
}

impl Encoded {
    pub fn new(id: u32, data: Vec<u8>) -> Encoded {
        Encoded { id, data }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Writes and reads the frame around a packet payload.
pub trait PacketEncoder: Send + Sync + 'static {
    fn encode(
        &self,
        target: &mut dyn DataVisitor,
        provider: &SerializerProvider,
        group: &str,
        encoded: Encoded,
    ) -> Result<(), Error>;

    fn decode(
        &self,
        source: &mut dyn DataVisitor,
        provider: &SerializerProvider,
        group: &str,
    ) -> Result<Encoded, Error>;
}

/// The default frame: a variable-length identifier directly followed by
/// the payload.
#[derive(Default)]
pub struct VarIntPacketEncoder;

impl PacketEncoder for VarIntPacketEncoder {
    fn encode(
        &self,
        target: &mut dyn DataVisitor,
        _provider: &SerializerProvider,
        _group: &str,
        encoded: Encoded,
    ) -> Result<(), Error> {
        write_varint(target, encoded.id() as i32)?;
        target.write_bytes(encoded.data())
    }

    fn decode(
        &self,
        source: &mut dyn DataVisitor,
        _provider: &SerializerProvider,
        _group: &str,
    ) -> Result<Encoded, Error> {
        let id = read_varint(source)?;
        ensure!(
            id >= 0,
            Error::invalid_data(format!("negative packet id {id}"))
        );
        Ok(Encoded::new(id as u32, source.finish()?))
    }
}

/// A frame that runs the identifier through an arbitrary integer codec,
/// for protocols that do not use the variable-length form.
pub struct CodecPacketEncoder {
    codec: Arc<dyn Serializer<i32>>,
}

impl CodecPacketEncoder {
    pub fn of<C>(codec: C) -> CodecPacketEncoder
    where
        C: Serializer<i32>,
    {
        CodecPacketEncoder {
            codec: Arc::new(codec),
        }
    }
}

impl PacketEncoder for CodecPacketEncoder {
    fn encode(
        &self,
        target: &mut dyn DataVisitor,
        provider: &SerializerProvider,
        _group: &str,
        encoded: Encoded,
    ) -> Result<(), Error> {
        let context = SerializerContext::untyped(provider);
        self.codec
            .serialize(&context, target, &(encoded.id() as i32))?;
        target.write_bytes(encoded.data())
    }

    fn decode(
        &self,
        source: &mut dyn DataVisitor,
        provider: &SerializerProvider,
        _group: &str,
    ) -> Result<Encoded, Error> {
        let context = SerializerContext::untyped(provider);
        let id = self.codec.deserialize(&context, source)?;
        ensure!(
            id >= 0,
            Error::invalid_data(format!("negative packet id {id}"))
        );
        Ok(Encoded::new(id as u32, source.finish()?))
    }
}
