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

use paket_core::serializer::varint::write_varint;
use paket_core::{
    Error, PacketFactory, ReadOnly, SerializerProvider, VarIntPacketEncoder, VecVisitor,
    WriteOnly, DEFAULT_GROUP,
};
use paket_derive::Packet;

fn factory() -> PacketFactory {
    PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    )
}

#[test]
fn test_groups_partition_identifier_space() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0x00, group = "status")]
    struct StatusRequest;

    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0x00, group = "login")]
    struct LoginStart {
        username: String,
    }

    let factory = factory();
    factory.add_packet::<StatusRequest>().unwrap();
    factory.add_packet::<LoginStart>().unwrap();

    let mut wire = VecVisitor::new();
    factory
        .write(
            &LoginStart {
                username: "Alex".to_string(),
            },
            &mut wire,
        )
        .unwrap();
    let decoded: LoginStart = factory.create_as("login", &mut wire).unwrap();
    assert_eq!(decoded.username, "Alex");

    let mut wire = VecVisitor::new();
    factory.write(&StatusRequest, &mut wire).unwrap();
    let decoded: StatusRequest = factory.create_as("status", &mut wire).unwrap();
    assert_eq!(decoded, StatusRequest);
}

#[test]
fn test_identifier_collision() {
    #[derive(Packet, Debug)]
    #[packet(id = 0x10)]
    struct First {
        value: i32,
    }

    #[derive(Packet, Debug)]
    #[packet(id = 0x10)]
    struct Second {
        value: i32,
    }

    let factory = factory();
    factory.add_packet::<First>().unwrap();
    let result = factory.add_packet::<Second>();
    match result {
        Err(Error::Configuration(message)) => assert!(message.contains("First")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_registration_is_idempotent() {
    #[derive(Packet, Debug)]
    #[packet(id = 0x10)]
    struct Stable {
        value: i32,
    }

    let factory = factory();
    factory.add_packet::<Stable>().unwrap();
    factory.add_packet::<Stable>().unwrap();
    assert_eq!(factory.registered_packets().len(), 1);
}

#[test]
fn test_one_group_per_type() {
    #[derive(Packet, Debug)]
    #[packet(skip)]
    struct Probe {
        value: i32,
    }

    let factory = factory();
    factory
        .add_packet_with::<Probe>(
            "status",
            1,
            <Probe as paket_core::Packet>::reader(),
            <Probe as paket_core::Packet>::writer(),
        )
        .unwrap();
    let result = factory.add_packet_with::<Probe>(
        "login",
        2,
        <Probe as paket_core::Packet>::reader(),
        <Probe as paket_core::Packet>::writer(),
    );
    match result {
        Err(Error::Configuration(message)) => assert!(message.contains("status")),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_identifier_above_i32_max() {
    #[derive(Packet, Debug)]
    #[packet(skip)]
    struct Oversized;

    let factory = factory();
    let result = factory.add_packet_with::<Oversized>(
        DEFAULT_GROUP,
        u32::MAX,
        <Oversized as paket_core::Packet>::reader(),
        <Oversized as paket_core::Packet>::writer(),
    );
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn test_dynamic_identifier() {
    fn play_ids(group: &str) -> Option<u32> {
        match group {
            "play" => Some(0x42),
            _ => None,
        }
    }

    #[derive(Packet, Debug, PartialEq)]
    #[packet(dynamic, id_provider = play_ids, group = "play")]
    struct Teleport {
        x: f64,
        y: f64,
        z: f64,
    }

    let factory = factory();
    factory.add_packet::<Teleport>().unwrap();
    assert_eq!(factory.packet_id::<Teleport>(), Some(0x42));

    let packet = Teleport {
        x: 1.5,
        y: 64.0,
        z: -8.25,
    };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();
    let decoded: Teleport = factory.create_as("play", &mut wire).unwrap();
    assert_eq!(decoded, packet);

    #[derive(Packet, Debug)]
    #[packet(dynamic, id_provider = play_ids, group = "lobby")]
    struct Missing {
        value: i32,
    }

    let result = factory.add_packet::<Missing>();
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn test_unknown_group_and_identifier() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0x00)]
    struct Ping;

    let factory = factory();

    let mut wire = VecVisitor::new();
    write_varint(&mut wire, 5).unwrap();
    let result = factory.create(DEFAULT_GROUP, &mut wire);
    assert!(matches!(result, Err(Error::Resolution(_))));

    factory.add_packet::<Ping>().unwrap();
    let mut wire = VecVisitor::new();
    write_varint(&mut wire, 0x63).unwrap();
    let result = factory.create(DEFAULT_GROUP, &mut wire);
    assert!(matches!(result, Err(Error::Resolution(_))));
}

#[test]
fn test_create_as_checks_the_type() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0)]
    struct Ping;

    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 1)]
    struct Pong;

    let factory = factory();
    factory.add_packet::<Ping>().unwrap();
    factory.add_packet::<Pong>().unwrap();

    let mut wire = VecVisitor::new();
    factory.write(&Ping, &mut wire).unwrap();
    let result = factory.create_as::<Pong>(DEFAULT_GROUP, &mut wire);
    assert!(matches!(result, Err(Error::Resolution(_))));
}

#[test]
fn test_write_unregistered_packet() {
    #[derive(Packet, Debug)]
    #[packet(id = 0x30)]
    struct Orphan {
        value: i32,
    }

    let factory = factory();
    let mut wire = VecVisitor::new();
    let result = factory.write(&Orphan { value: 3 }, &mut wire);
    assert!(matches!(result, Err(Error::Resolution(_))));
}

#[test]
fn test_remove_packet() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0x09)]
    struct Heartbeat {
        sequence: i32,
    }

    let factory = factory();
    factory.add_packet::<Heartbeat>().unwrap();
    assert!(factory.lookup::<Heartbeat>().is_some());

    assert!(factory.remove_packet(DEFAULT_GROUP, 0x09));
    assert!(!factory.remove_packet(DEFAULT_GROUP, 0x09));
    assert!(factory.lookup::<Heartbeat>().is_none());

    // A removed identifier can be claimed again
    factory.add_packet::<Heartbeat>().unwrap();
    assert!(factory.remove_packet_type::<Heartbeat>());
    assert!(!factory.remove_packet_type::<Heartbeat>());
    assert!(factory.registered_packets().is_empty());
}

#[test]
fn test_visitor_views() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0x02)]
    struct Handshake {
        #[field(varint)]
        protocol_version: i32,
        address: String,
    }

    let factory = factory();
    factory.add_packet::<Handshake>().unwrap();

    let packet = Handshake {
        protocol_version: 765,
        address: "localhost".to_string(),
    };

    let mut storage = VecVisitor::new();
    factory
        .write(&packet, &mut WriteOnly::new(&mut storage))
        .unwrap();
    let decoded: Handshake = factory
        .create_as(DEFAULT_GROUP, &mut ReadOnly::new(&mut storage))
        .unwrap();
    assert_eq!(decoded, packet);

    // The views refuse operations from the other half
    let mut read_only = ReadOnly::new(&mut storage);
    assert!(matches!(
        factory.write(&packet, &mut read_only),
        Err(Error::Unsupported(_))
    ));
}
