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

use std::sync::Arc;

use paket_core::{
    AccessorStrategy, DataVisitor, Error, PacketFactory, PacketId, PacketLogic, SerializerContext,
    SerializerProvider, VarIntPacketEncoder, VecVisitor, DEFAULT_GROUP,
};
use paket_derive::Packet;

#[test]
fn test_generated_packet_roundtrip() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0x80)]
    struct StatusUpdate {
        name: String,
        value: i32,
        height: f64,
    }

    let factory = PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    );
    factory.add_packet::<StatusUpdate>().unwrap();

    let packet = StatusUpdate {
        name: "Foo".to_string(),
        value: 5,
        height: 20.0,
    };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();

    // 2 identifier bytes, then 1 + 3 for the name, 4 for the value, 8 for
    // the height
    assert_eq!(wire.as_slice().len(), 18);

    let decoded: StatusUpdate = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn test_proxied_packet_roundtrip() {
    #[derive(Packet, Debug, Default, PartialEq)]
    #[packet(id = 0x07, proxied)]
    struct Totals {
        hits: i32,
        misses: i32,
        label: String,
    }

    assert_eq!(
        <Totals as paket_core::Packet>::STRATEGY,
        AccessorStrategy::Proxied
    );

    let factory = PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    );
    factory.add_packet::<Totals>().unwrap();

    let packet = Totals {
        hits: 31,
        misses: -2,
        label: "daily".to_string(),
    };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();
    let decoded: Totals = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn test_custom_logic_packet() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0x21, custom)]
    struct ChunkPosition {
        x: i32,
        z: i32,
    }

    impl PacketLogic for ChunkPosition {
        fn deconstruct(
            &self,
            _context: &SerializerContext<'_>,
            visitor: &mut dyn DataVisitor,
        ) -> Result<(), Error> {
            // Both halves packed into one i64, as the wire protocol wants
            let packed = ((self.x as i64) << 32) | (self.z as i64 & 0xFFFF_FFFF);
            visitor.write_i64(packed)
        }

        fn construct(
            _context: &SerializerContext<'_>,
            visitor: &mut dyn DataVisitor,
        ) -> Result<ChunkPosition, Error> {
            let packed = visitor.read_i64()?;
            Ok(ChunkPosition {
                x: (packed >> 32) as i32,
                z: packed as i32,
            })
        }
    }

    assert_eq!(
        <ChunkPosition as paket_core::Packet>::STRATEGY,
        AccessorStrategy::Custom
    );

    let factory = PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    );
    factory.add_packet::<ChunkPosition>().unwrap();

    let packet = ChunkPosition { x: -153, z: 4096 };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();

    // 1 identifier byte plus the packed position
    assert_eq!(wire.as_slice().len(), 9);

    let decoded: ChunkPosition = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn test_empty_packet() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0x00)]
    struct Ping;

    let factory = PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    );
    factory.add_packet::<Ping>().unwrap();

    let mut wire = VecVisitor::new();
    factory.write(&Ping, &mut wire).unwrap();
    assert_eq!(wire.as_slice(), &[0x00]);

    let decoded: Ping = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, Ping);
}

#[test]
fn test_skipped_packet_never_registers() {
    #[derive(Packet, Debug)]
    #[packet(skip)]
    struct Draft {
        value: i32,
    }

    assert_eq!(<Draft as paket_core::Packet>::ID, PacketId::Skip);

    let factory = PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    );
    factory.add_packet::<Draft>().unwrap();
    assert!(factory.lookup::<Draft>().is_none());

    let mut wire = VecVisitor::new();
    let result = factory.write(&Draft { value: 1 }, &mut wire);
    assert!(matches!(result, Err(Error::Resolution(_))));
}

#[test]
fn test_packet_group_declaration() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0x04, group = "play")]
    struct ChatMessage {
        #[field(length(max = 256))]
        message: String,
    }

    assert_eq!(<ChatMessage as paket_core::Packet>::GROUP, "play");

    let factory = PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    );
    factory.add_packet::<ChatMessage>().unwrap();
    assert_eq!(factory.packet_group::<ChatMessage>(), Some("play".to_string()));
    assert_eq!(factory.packet_id::<ChatMessage>(), Some(0x04));

    let packet = ChatMessage {
        message: "hello there".to_string(),
    };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();
    let decoded: ChatMessage = factory.create_as("play", &mut wire).unwrap();
    assert_eq!(decoded, packet);
}
