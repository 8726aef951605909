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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paket_core::{PacketFactory, SerializerProvider, VarIntPacketEncoder, VecVisitor, DEFAULT_GROUP};
use paket_derive::Packet;

#[derive(Packet, Debug, Clone, PartialEq)]
#[packet(id = 0x24)]
struct EntityState {
    #[field(varint)]
    entity_id: i32,
    x: f64,
    y: f64,
    z: f64,
    yaw: f32,
    pitch: f32,
    on_ground: bool,
}

impl EntityState {
    fn new() -> Self {
        Self {
            entity_id: 4821,
            x: 120.5,
            y: 64.0,
            z: -33.25,
            yaw: 180.0,
            pitch: -12.5,
            on_ground: true,
        }
    }
}

#[derive(Packet, Debug, Clone, PartialEq)]
#[packet(id = 0x36)]
struct PlayerList {
    names: Vec<String>,
    latencies: Vec<i32>,
}

impl PlayerList {
    fn new() -> Self {
        Self {
            names: (0..32).map(|i| format!("player_{i}")).collect(),
            latencies: (0..32).collect(),
        }
    }
}

fn build_factory() -> PacketFactory {
    let factory = PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    );
    factory.add_packet::<EntityState>().unwrap();
    factory.add_packet::<PlayerList>().unwrap();
    factory
}

fn bench_entity_state_write(c: &mut Criterion) {
    let factory = build_factory();
    let original = EntityState::new();

    c.bench_function("entity_state_write", |b| {
        b.iter(|| {
            let mut wire = VecVisitor::new();
            factory.write(black_box(&original), &mut wire).unwrap();
            black_box(&wire);
        });
    });
}

fn bench_entity_state_create(c: &mut Criterion) {
    let factory = build_factory();
    let original = EntityState::new();
    let mut wire = VecVisitor::new();
    factory.write(&original, &mut wire).unwrap();
    let frame = wire.into_vec();

    c.bench_function("entity_state_create", |b| {
        b.iter(|| {
            let mut wire = VecVisitor::from_vec(black_box(frame.clone()));
            let result: EntityState = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
            black_box(&result);
        });
    });
}

fn bench_player_list_write(c: &mut Criterion) {
    let factory = build_factory();
    let original = PlayerList::new();

    c.bench_function("player_list_write", |b| {
        b.iter(|| {
            let mut wire = VecVisitor::new();
            factory.write(black_box(&original), &mut wire).unwrap();
            black_box(&wire);
        });
    });
}

fn bench_player_list_create(c: &mut Criterion) {
    let factory = build_factory();
    let original = PlayerList::new();
    let mut wire = VecVisitor::new();
    factory.write(&original, &mut wire).unwrap();
    let frame = wire.into_vec();

    c.bench_function("player_list_create", |b| {
        b.iter(|| {
            let mut wire = VecVisitor::from_vec(black_box(frame.clone()));
            let result: PlayerList = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
            black_box(&result);
        });
    });
}

criterion_group!(
    benches,
    bench_entity_state_write,
    bench_entity_state_create,
    bench_player_list_write,
    bench_player_list_create
);
criterion_main!(benches);
