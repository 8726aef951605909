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

use std::any::TypeId;
use std::sync::Arc;

use paket_core::serializer::primitive::I32Codec;
use paket_core::serializer::varint::VarIntCodec;
use paket_core::{
    read_value, write_value, Catalogue, CodecHandle, DataVisitor, Described, Error, PacketFactory,
    PacketRegistration, RuleRegistration, SerializationRule, Serializer, SerializerContext,
    SerializerProvider, SerializerRegistration, TypeDescriptor, VarIntPacketEncoder, VecVisitor,
    DEFAULT_GROUP,
};
use paket_derive::Packet;

#[test]
fn test_duplicate_codec_rejected() {
    #[derive(Default)]
    struct BackwardsI32;

    impl Serializer<i32> for BackwardsI32 {
        fn serialize(
            &self,
            _context: &SerializerContext<'_>,
            visitor: &mut dyn DataVisitor,
            value: &i32,
        ) -> Result<(), Error> {
            visitor.write_i32(value.swap_bytes())
        }

        fn deserialize(
            &self,
            _context: &SerializerContext<'_>,
            visitor: &mut dyn DataVisitor,
        ) -> Result<i32, Error> {
            Ok(visitor.read_i32()?.swap_bytes())
        }
    }

    let provider = SerializerProvider::with_defaults().unwrap();
    let result = provider.register::<i32, BackwardsI32>(BackwardsI32);
    assert!(matches!(result, Err(Error::Configuration(_))));

    // The same codec type again is a no-op
    provider.register::<i32, I32Codec>(I32Codec).unwrap();
}

#[test]
fn test_codec_instances_are_cached() {
    let provider = SerializerProvider::with_defaults().unwrap();

    let first = provider.get_of::<VarIntCodec, i32>().unwrap();
    let second = provider.get_of::<VarIntCodec, i32>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // A registered instance replaces the lazily built default
    provider.register_of::<i32, VarIntCodec>(VarIntCodec);
    let third = provider.get_of::<VarIntCodec, i32>().unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert!(Arc::ptr_eq(
        &third,
        &provider.get_of::<VarIntCodec, i32>().unwrap()
    ));
}

#[test]
fn test_rules_resolve_in_insertion_order() {
    struct VarIntEverywhere;

    impl SerializationRule for VarIntEverywhere {
        fn codec_for(
            &self,
            descriptor: &TypeDescriptor,
            _provider: &SerializerProvider,
        ) -> Option<CodecHandle> {
            (descriptor.type_id() == TypeId::of::<i32>())
                .then(|| CodecHandle::of::<i32, _>(VarIntCodec))
        }
    }

    struct PlainI32;

    impl SerializationRule for PlainI32 {
        fn codec_for(
            &self,
            descriptor: &TypeDescriptor,
            _provider: &SerializerProvider,
        ) -> Option<CodecHandle> {
            (descriptor.type_id() == TypeId::of::<i32>())
                .then(|| CodecHandle::of::<i32, _>(I32Codec))
        }
    }

    let provider = SerializerProvider::new();
    provider.add_rule(VarIntEverywhere);
    provider.add_rule(PlainI32);

    let context = SerializerContext::untyped(&provider);
    let mut visitor = VecVisitor::new();
    write_value(&context, &mut visitor, &300i32).unwrap();
    assert_eq!(visitor.as_slice().len(), 2);

    // With the first rule gone the second one answers
    assert!(provider.remove_rule::<VarIntEverywhere>());
    assert!(!provider.remove_rule::<VarIntEverywhere>());
    let mut visitor = VecVisitor::new();
    write_value(&context, &mut visitor, &300i32).unwrap();
    assert_eq!(visitor.as_slice().len(), 4);

    assert!(provider.remove_rule::<PlainI32>());
    let mut visitor = VecVisitor::new();
    let result = write_value(&context, &mut visitor, &300i32);
    assert!(matches!(result, Err(Error::Resolution(_))));
}

#[test]
fn test_remove_serializer() {
    let provider = SerializerProvider::with_defaults().unwrap();
    assert!(provider.remove_serializer::<I32Codec>());
    assert!(!provider.remove_serializer::<I32Codec>());

    let context = SerializerContext::untyped(&provider);
    let mut visitor = VecVisitor::new();
    let result = write_value(&context, &mut visitor, &1i32);
    assert!(matches!(result, Err(Error::Resolution(_))));

    // Other claims are untouched
    write_value(&context, &mut visitor, &"still here".to_string()).unwrap();
}

#[test]
fn test_registered_listings() {
    let provider = SerializerProvider::with_defaults().unwrap();

    let serializers = provider.registered_serializers();
    assert!(serializers.iter().any(|name| name.contains("I32Codec")));
    assert!(serializers.iter().any(|name| name.contains("StringCodec")));

    let rules = provider.registered_rules();
    assert_eq!(rules.len(), 5);
    assert!(rules[0].contains("CollectionRule"));
    assert!(rules[4].contains("BlobRule"));
}

#[test]
fn test_catalogue_registration() {
    #[derive(Debug, PartialEq, Clone, Copy)]
    struct Temperature(f32);

    impl Described for Temperature {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::value::<Temperature>()
        }
    }

    #[derive(Default)]
    struct TemperatureCodec;

    impl Serializer<Temperature> for TemperatureCodec {
        fn serialize(
            &self,
            _context: &SerializerContext<'_>,
            visitor: &mut dyn DataVisitor,
            value: &Temperature,
        ) -> Result<(), Error> {
            // Hundredths of a degree on the wire
            visitor.write_i32((value.0 * 100.0) as i32)
        }

        fn deserialize(
            &self,
            _context: &SerializerContext<'_>,
            visitor: &mut dyn DataVisitor,
        ) -> Result<Temperature, Error> {
            Ok(Temperature(visitor.read_i32()? as f32 / 100.0))
        }
    }

    #[derive(Default)]
    struct CelsiusRule;

    impl SerializationRule for CelsiusRule {
        fn codec_for(
            &self,
            descriptor: &TypeDescriptor,
            _provider: &SerializerProvider,
        ) -> Option<CodecHandle> {
            (descriptor.type_id() == TypeId::of::<Temperature>())
                .then(|| CodecHandle::of::<Temperature, _>(TemperatureCodec))
        }
    }

    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 0x50)]
    struct Forecast {
        noon: Temperature,
    }

    struct WeatherCatalogue;

    impl Catalogue for WeatherCatalogue {
        fn name(&self) -> &'static str {
            "weather"
        }

        fn packets(&self) -> Vec<PacketRegistration> {
            vec![PacketRegistration::packet::<Forecast>()]
        }

        fn serializers(&self) -> Vec<SerializerRegistration> {
            vec![SerializerRegistration::serializer::<Temperature, TemperatureCodec>()]
        }

        fn rules(&self) -> Vec<RuleRegistration> {
            vec![RuleRegistration::rule::<CelsiusRule>()]
        }
    }

    let factory = PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    );
    let catalogue = WeatherCatalogue;
    assert_eq!(catalogue.name(), "weather");
    factory.add_serializers(&catalogue).unwrap();
    factory.add_serialization_rules(&catalogue);
    factory.add_packets(&catalogue).unwrap();

    assert!(factory
        .provider()
        .registered_rules()
        .iter()
        .any(|name| name.contains("CelsiusRule")));

    let packet = Forecast {
        noon: Temperature(21.5),
    };
    let mut wire = VecVisitor::new();
    factory.write(&packet, &mut wire).unwrap();
    assert_eq!(wire.as_slice().len(), 5);
    let decoded: Forecast = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn test_codec_override_beats_alias() {
    #[derive(Packet, Debug, PartialEq)]
    #[packet(id = 1)]
    struct Pinned {
        #[field(varint, with = I32Codec)]
        value: i32,
    }

    let factory = PacketFactory::new(
        VarIntPacketEncoder::default(),
        Arc::new(SerializerProvider::with_defaults().unwrap()),
    );
    factory.add_packet::<Pinned>().unwrap();

    // The explicit codec wins over the varint alias
    let mut wire = VecVisitor::new();
    factory.write(&Pinned { value: 300 }, &mut wire).unwrap();
    assert_eq!(wire.as_slice().len(), 5);
    let decoded: Pinned = factory.create_as(DEFAULT_GROUP, &mut wire).unwrap();
    assert_eq!(decoded.value, 300);
}

#[test]
fn test_value_free_functions() {
    let provider = SerializerProvider::with_defaults().unwrap();
    let context = SerializerContext::untyped(&provider);

    let mut visitor = VecVisitor::new();
    write_value(&context, &mut visitor, &"combined".to_string()).unwrap();
    write_value(&context, &mut visitor, &7i64).unwrap();
    assert_eq!(read_value::<String>(&context, &mut visitor).unwrap(), "combined");
    assert_eq!(read_value::<i64>(&context, &mut visitor).unwrap(), 7);
}
