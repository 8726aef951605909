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

//! Bulk registration of packets, codecs and rules.
//!
//! A [`Catalogue`] describes a batch of registrations. Loading one has
//! exactly the same effect as performing each registration by hand, in
//! listed order, so the same first-writer-wins semantics apply.
//!
//! [`DefaultSerializers`] and [`DefaultRules`] hold the built-in
//! catalogue that [`SerializerProvider::with_defaults`] installs.
//!
//! [`SerializerProvider::with_defaults`]: crate::resolver::provider::SerializerProvider::with_defaults

use std::any::type_name;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Error;
use crate::factory::PacketFactory;
use crate::packet::Packet;
use crate::resolver::provider::SerializerProvider;
use crate::resolver::rule::{
    ArrayRule, BlobRule, CollectionRule, EnumRule, MapRule, SerializationRule,
};
use crate::serializer::array::ByteArrayCodec;
use crate::serializer::bits::{BitSet, BitSetCodec};
use crate::serializer::number::{BigDecimal, BigDecimalCodec, BigInteger, BigIntegerCodec};
use crate::serializer::primitive::{
    BoolCodec, CharCodec, F32Codec, F64Codec, I16Codec, I32Codec, I64Codec, I8Codec, U16Codec,
    U32Codec, U64Codec, U8Codec,
};
use crate::serializer::string::StringCodec;
use crate::serializer::time::TimestampCodec;
use crate::serializer::uuid::UuidCodec;
use crate::serializer::Serializer;

/// One packet type to register with a [`PacketFactory`].
pub struct PacketRegistration {
    pub type_name: &'static str,
    pub register: fn(&PacketFactory) -> Result<(), Error>,
}

impl PacketRegistration {
    pub fn packet<T: Packet>() -> PacketRegistration {
        PacketRegistration {
            type_name: type_name::<T>(),
            register: |factory| factory.add_packet::<T>(),
        }
    }
}

/// One codec to register with a [`SerializerProvider`].
pub struct SerializerRegistration {
    pub type_name: &'static str,
    pub register: fn(&SerializerProvider) -> Result<(), Error>,
}

impl SerializerRegistration {
    pub fn serializer<T: 'static, C: Serializer<T> + Default>() -> SerializerRegistration {
        SerializerRegistration {
            type_name: type_name::<T>(),
            register: |provider| provider.register::<T, C>(C::default()),
        }
    }
}

/// One rule to install on a [`SerializerProvider`].
pub struct RuleRegistration {
    pub type_name: &'static str,
    pub register: fn(&SerializerProvider),
}

impl RuleRegistration {
    pub fn rule<R: SerializationRule + Default>() -> RuleRegistration {
        RuleRegistration {
            type_name: type_name::<R>(),
            register: |provider| provider.add_rule(R::default()),
        }
    }
}

/// A named batch of registrations.
///
/// The default methods report empty lists, so an implementation only
/// overrides the kinds it actually carries.
pub trait Catalogue {
    fn name(&self) -> &'static str;

    fn packets(&self) -> Vec<PacketRegistration> {
        Vec::new()
    }

    fn serializers(&self) -> Vec<SerializerRegistration> {
        Vec::new()
    }

    fn rules(&self) -> Vec<RuleRegistration> {
        Vec::new()
    }
}

/// The built-in codecs for primitives, strings and the supported
/// standard value types.
pub struct DefaultSerializers;

impl Catalogue for DefaultSerializers {
    fn name(&self) -> &'static str {
        "default-serializers"
    }

    fn serializers(&self) -> Vec<SerializerRegistration> {
        vec![
            SerializerRegistration::serializer::<bool, BoolCodec>(),
            SerializerRegistration::serializer::<u8, U8Codec>(),
            SerializerRegistration::serializer::<i8, I8Codec>(),
            SerializerRegistration::serializer::<i16, I16Codec>(),
            SerializerRegistration::serializer::<u16, U16Codec>(),
            SerializerRegistration::serializer::<i32, I32Codec>(),
            SerializerRegistration::serializer::<u32, U32Codec>(),
            SerializerRegistration::serializer::<i64, I64Codec>(),
            SerializerRegistration::serializer::<u64, U64Codec>(),
            SerializerRegistration::serializer::<f32, F32Codec>(),
            SerializerRegistration::serializer::<f64, F64Codec>(),
            SerializerRegistration::serializer::<char, CharCodec>(),
            SerializerRegistration::serializer::<String, StringCodec>(),
            SerializerRegistration::serializer::<Vec<u8>, ByteArrayCodec>(),
            SerializerRegistration::serializer::<BigInteger, BigIntegerCodec>(),
            SerializerRegistration::serializer::<BigDecimal, BigDecimalCodec>(),
            SerializerRegistration::serializer::<Uuid, UuidCodec>(),
            SerializerRegistration::serializer::<DateTime<Utc>, TimestampCodec>(),
            SerializerRegistration::serializer::<BitSet, BitSetCodec>(),
        ]
    }
}

/// The built-in resolution rules for collections, maps, arrays, enums
/// and blobs.
pub struct DefaultRules;

impl Catalogue for DefaultRules {
    fn name(&self) -> &'static str {
        "default-rules"
    }

    fn rules(&self) -> Vec<RuleRegistration> {
        vec![
            RuleRegistration::rule::<CollectionRule>(),
            RuleRegistration::rule::<MapRule>(),
            RuleRegistration::rule::<ArrayRule>(),
            RuleRegistration::rule::<EnumRule>(),
            RuleRegistration::rule::<BlobRule>(),
        ]
    }
}
