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

use chrono::{DateTime, Utc};
use paket_core::serializer::bits::BitSet;
use paket_core::serializer::number::{BigDecimal, BigInteger};
use paket_core::serializer::varint::write_varint;
use paket_core::{
    Blob, DataVisitor, Error, Enumerated, PacketFactory, SerializerContext, SerializerProvider,
    VarIntPacketEncoder, VecVisitor, DEFAULT_GROUP,
};
use paket_derive::Packet;
use uuid::Uuid;

fn factory() -> PacketFactory {
    PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    )
}

#[test]
fn test_option_field() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 1)]
    struct Disconnect {
        reason: Option<String>,
    }

    let factory = factory();
    factory.add_packet::<Disconnect>().unwrap();

    let mut wire = VecVisitor::new();
    factory.write(&Disconnect { reason: None }, &mut wire).unwrap();
    assert_eq!(wire.as_slice(), &[0x01, 0x00]);
    let decoded: Disconnect = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded.reason, None);

    let mut wire = VecVisitor::new();
    factory
        .write(
            &Disconnect {
                reason: Some("hi".to_string()),
            },
            &mut wire,
        )
        .unwrap();
    assert_eq!(wire.as_slice(), &[0x01, 0x01, 0x02, b'h', b'i']);
    let decoded: Disconnect = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded.reason.as_deref(), Some("hi"));
}

#[test]
fn test_enumerated_derive() {
    #[derive(paket_derive::Enumerated, Debug, PartialEq, Clone, Copy)]
    enum Hand {
        Main,
        Off,
    }

    assert_eq!(Hand::Main.ordinal(), 0);
    assert_eq!(Hand::Off.ordinal(), 1);
    assert_eq!(Hand::from_ordinal(0), Some(Hand::Main));
    assert_eq!(Hand::from_ordinal(7), None);

    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 6)]
    struct Swing {
        hand: Hand,
    }

    let factory = factory();
    factory.add_packet::<Swing>().unwrap();

    let mut wire = VecVisitor::new();
    factory.write(&Swing { hand: Hand::Off }, &mut wire).unwrap();
    assert_eq!(wire.as_slice(), &[0x06, 0, 0, 0, 1]);
    let decoded: Swing = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded.hand, Hand::Off);

    // An ordinal no variant claims
    let mut wire = VecVisitor::new();
    write_varint(&mut wire, 6).unwrap();
    wire.write_i32(99).unwrap();
    let result = factory.create_as::<Swing>(DEFAULT_GROUP, &mut wire);
    assert!(matches!(result, Err(Error::MalformedInput(_))));
}

#[test]
fn test_uuid_field() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 2)]
    struct PlayerInfo {
        id: Uuid,
    }

    let factory = factory();
    factory.add_packet::<PlayerInfo>().unwrap();

    let packet = PlayerInfo { id: Uuid::new_v4() };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();

    // 1 identifier byte and the sixteen raw octets
    assert_eq!(wire.as_slice().len(), 17);
    let decoded: PlayerInfo = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn test_timestamp_field() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 3)]
    struct WorldTime {
        instant: DateTime<Utc>,
    }

    let factory = factory();
    factory.add_packet::<WorldTime>().unwrap();

    let packet = WorldTime {
        instant: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
    };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();

    assert_eq!(wire.as_slice().len(), 9);
    let decoded: WorldTime = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn test_bitset_field() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 4)]
    struct SkinParts {
        worn: BitSet,
    }

    let factory = factory();
    factory.add_packet::<SkinParts>().unwrap();

    let mut worn = BitSet::new();
    worn.set(0);
    worn.set(5);
    let packet = SkinParts { worn };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();

    // id, word count, one word
    assert_eq!(wire.as_slice().len(), 10);
    let decoded: SkinParts = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn test_fixed_bitset_field() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 5)]
    struct Acknowledged {
        #[field(fixed = 20)]
        offsets: BitSet,
    }

    let factory = factory();
    factory.add_packet::<Acknowledged>().unwrap();

    let mut offsets = BitSet::new();
    offsets.set(19);
    let packet = Acknowledged { offsets };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();

    // Twenty bits round up to three payload bytes, no prefix
    assert_eq!(wire.as_slice().len(), 4);
    let decoded: Acknowledged = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, packet);

    // A set wider than the declared size is refused
    let mut offsets = BitSet::new();
    offsets.set(25);
    let mut wire = VecVisitor::new();
    let result = factory.write(&Acknowledged { offsets }, &mut wire);
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_big_number_fields() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 7)]
    struct Ledger {
        balance: BigInteger,
        rate: BigDecimal,
    }

    let factory = factory();
    factory.add_packet::<Ledger>().unwrap();

    let packet = Ledger {
        balance: BigInteger::new("123456789012345678901234567890").unwrap(),
        rate: BigDecimal::new("-12.5").unwrap(),
    };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();
    let decoded: Ledger = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, packet);

    assert_eq!(BigInteger::from(-42).as_str(), "-42");
}

#[test]
fn test_blob_field() {
    #[derive(Debug, PartialEq)]
    struct Coordinates {
        x: i32,
        z: i32,
    }

    impl Blob for Coordinates {
        fn encode(
            &self,
            _context: &SerializerContext<'_>,
            visitor: &mut dyn DataVisitor,
        ) -> Result<(), Error> {
            visitor.write_i32(self.x)?;
            visitor.write_i32(self.z)
        }

        fn decode(
            _context: &SerializerContext<'_>,
            visitor: &mut dyn DataVisitor,
        ) -> Result<Coordinates, Error> {
            Ok(Coordinates {
                x: visitor.read_i32()?,
                z: visitor.read_i32()?,
            })
        }
    }

    paket_core::impl_blob!(Coordinates);

    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 8)]
    struct SpawnPoint {
        location: Coordinates,
        angle: f32,
    }

    let factory = factory();
    factory.add_packet::<SpawnPoint>().unwrap();

    let packet = SpawnPoint {
        location: Coordinates { x: 100, z: -2048 },
        angle: 90.0,
    };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();

    // id, two coordinate words, the angle
    assert_eq!(wire.as_slice().len(), 13);
    let decoded: SpawnPoint = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, packet);
}
